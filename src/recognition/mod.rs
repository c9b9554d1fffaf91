//! Handwriting recognition boundary.
//!
//! The game only ever talks to a [`RecognitionClient`]. Production code uses
//! [`GeminiClient`], tests use scripted fakes.

#[cfg(test)]
pub mod fake;
pub mod gemini;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

pub use gemini::GeminiClient;

/// What the player handed in for a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawingPayload {
    /// Rendered PNG bytes from the drawing canvas
    Image(Vec<u8>),
    /// Text already recognized on the device (stylus/keyboard input)
    Text(String),
}

impl DrawingPayload {
    /// Decode a canvas export, accepting either a `data:image/...;base64,` URL
    /// or bare base64
    pub fn from_data_url(image_data: &str) -> Result<Self, base64::DecodeError> {
        let encoded = strip_data_url_prefix(image_data.trim());
        Ok(DrawingPayload::Image(STANDARD.decode(encoded)?))
    }
}

fn strip_data_url_prefix(image_data: &str) -> &str {
    match image_data.strip_prefix("data:image/") {
        Some(rest) => match rest.find(";base64,") {
            Some(pos) => &rest[pos + ";base64,".len()..],
            None => image_data,
        },
        None => image_data,
    }
}

/// Raw text returned by the recognizer. Never normalized here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    pub text: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Recognition usage limit reached")]
    QuotaExceeded,

    #[error("Recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl RecognitionError {
    pub fn kind(&self) -> &'static str {
        match self {
            RecognitionError::RateLimited => "rate_limited",
            RecognitionError::QuotaExceeded => "quota_exceeded",
            RecognitionError::RecognitionFailed(_) => "recognition_failed",
            RecognitionError::Network(_) => "network",
        }
    }

    /// Message shown to the player
    pub fn user_message(&self) -> &'static str {
        match self {
            RecognitionError::RateLimited => "Too many attempts! Please wait a moment.",
            RecognitionError::QuotaExceeded => {
                "AI usage limit reached. Please contact your teacher."
            }
            RecognitionError::RecognitionFailed(_) | RecognitionError::Network(_) => {
                "Failed to check your answer. Please try again."
            }
        }
    }
}

/// Converts a drawing into text. Implementations must not retry on their own.
#[async_trait]
pub trait RecognitionClient: Send + Sync {
    async fn recognize(&self, payload: &DrawingPayload) -> Result<Recognition, RecognitionError>;
}
