use thiserror::Error;

use crate::recognition::RecognitionError;

/// A verb list that cannot be used to build a grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("You need at least {required} verbs to play! (found {found})")]
    TooFewVerbs { found: usize, required: usize },
}

/// Refusals and failures surfaced by the game controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell {0} is outside the grid")]
    CellOutOfRange(usize),

    #[error("Cell {0} has already been answered correctly")]
    CellLocked(usize),

    #[error("The game has already been won")]
    GameWon,

    #[error("An answer is still being checked")]
    SubmissionInFlight,

    #[error("No cell is selected")]
    NoCellSelected,

    #[error("Cell {requested} is not the selected cell ({selected})")]
    CellMismatch { selected: usize, requested: usize },

    #[error("Action not allowed while {0}")]
    InvalidPhase(&'static str),

    #[error("Submission belongs to a previous game")]
    StaleSubmission,

    #[error("Invalid drawing: {0}")]
    InvalidDrawing(String),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GameError {
    /// Stable category reported to clients
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::Recognition(e) => e.kind(),
            GameError::Validation(_) => "validation",
            GameError::InvalidDrawing(_) => "bad_request",
            _ => "invalid_action",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(GameError::CellLocked(3).kind(), "invalid_action");
        assert_eq!(
            GameError::from(ValidationError::TooFewVerbs {
                found: 3,
                required: 25
            })
            .kind(),
            "validation"
        );
        assert_eq!(
            GameError::from(RecognitionError::RateLimited).kind(),
            "rate_limited"
        );
    }
}
