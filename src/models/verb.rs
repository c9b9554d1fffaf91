use serde::{Deserialize, Serialize};

/// A verb prompt and its expected past-tense answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verb {
    pub present: String,
    pub past: String,
    pub is_regular: bool,
}

impl Verb {
    pub fn new(present: &str, past: &str, is_regular: bool) -> Self {
        Self {
            present: present.to_string(),
            past: past.to_string(),
            is_regular,
        }
    }

    /// True when both forms contain something other than whitespace
    pub fn is_complete(&self) -> bool {
        !self.present.trim().is_empty() && !self.past.trim().is_empty()
    }
}

/// Difficulty level controlling the regular/irregular ratio of a grid.
/// Serialized as the bare level number (1, 2 or 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Number of (regular, irregular) verbs to draw for a 25-cell grid
    pub fn targets(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (20, 5),
            Difficulty::Medium => (13, 12),
            Difficulty::Hard => (5, 20),
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            other => Err(format!("difficulty must be 1, 2 or 3 (got {})", other)),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_always_fill_grid() {
        for difficulty in Difficulty::ALL {
            let (regular, irregular) = difficulty.targets();
            assert_eq!(regular + irregular, 25, "{:?} should target 25 verbs", difficulty);
        }
    }

    #[test]
    fn test_difficulty_serializes_as_level_number() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "2");
        let parsed: Difficulty = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert!(serde_json::from_str::<Difficulty>("4").is_err());
        assert!(serde_json::from_str::<Difficulty>("0").is_err());
    }

    #[test]
    fn test_verb_uses_camel_case_fields() {
        let verb: Verb =
            serde_json::from_str(r#"{"present":"go","past":"went","isRegular":false}"#).unwrap();
        assert_eq!(verb, Verb::new("go", "went", false));
    }

    #[test]
    fn test_blank_forms_are_incomplete() {
        assert!(Verb::new("walk", "walked", true).is_complete());
        assert!(!Verb::new("  ", "walked", true).is_complete());
        assert!(!Verb::new("walk", "", true).is_complete());
    }
}
