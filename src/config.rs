use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::Difficulty;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub recognition: RecognitionConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionConfig {
    /// Without a key every image recognition fails
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Optional JSON verb catalog replacing the built-in one
    pub verbs_path: Option<String>,
    pub default_difficulty: Difficulty,
    pub summary_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            recognition: RecognitionConfig::default(),
            game: GameConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            frontend_dir: "../frontend".to_string(),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash-lite".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            verbs_path: None,
            default_difficulty: Difficulty::Easy,
            summary_delay_ms: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_setting("PORT", env::var("PORT").ok(), 3000)?,
            frontend_dir: env::var("FRONTEND_DIR")
                .unwrap_or_else(|_| "../frontend".to_string()),
        };

        let defaults = RecognitionConfig::default();
        let recognition = RecognitionConfig {
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            endpoint: env::var("GEMINI_ENDPOINT").unwrap_or(defaults.endpoint),
            timeout_secs: parse_setting(
                "RECOGNITION_TIMEOUT_SECS",
                env::var("RECOGNITION_TIMEOUT_SECS").ok(),
                defaults.timeout_secs,
            )?,
        };

        let default_level: u8 =
            parse_setting("DEFAULT_DIFFICULTY", env::var("DEFAULT_DIFFICULTY").ok(), 1)?;

        let game = GameConfig {
            verbs_path: env::var("VERBS_PATH").ok(),
            default_difficulty: Difficulty::try_from(default_level)
                .map_err(anyhow::Error::msg)
                .context("DEFAULT_DIFFICULTY must be 1, 2 or 3")?,
            summary_delay_ms: parse_setting(
                "SUMMARY_DELAY_MS",
                env::var("SUMMARY_DELAY_MS").ok(),
                1000,
            )?,
        };

        Ok(Config {
            server,
            recognition,
            game,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse a numeric setting, falling back to `default` when unset
fn parse_setting<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number", name)),
        None => Ok(default),
    }
}

impl RecognitionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl GameConfig {
    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.game.default_difficulty, Difficulty::Easy);
        assert_eq!(config.game.summary_delay(), Duration::from_millis(1000));
        assert_eq!(config.recognition.timeout(), Duration::from_secs(30));
        assert!(config.recognition.api_key.is_none());
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting::<u64>("SUMMARY_DELAY_MS", None, 1000).unwrap(), 1000);
        assert_eq!(
            parse_setting::<u64>("SUMMARY_DELAY_MS", Some(" 250 ".into()), 1000).unwrap(),
            250
        );

        let err = parse_setting::<u64>("SUMMARY_DELAY_MS", Some("soon".into()), 1000).unwrap_err();
        assert_eq!(err.to_string(), "SUMMARY_DELAY_MS must be a number");
        assert!(parse_setting::<u16>("PORT", Some("70000".into()), 3000).is_err());
    }
}
