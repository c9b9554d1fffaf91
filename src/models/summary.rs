use serde::{Deserialize, Serialize};

/// How a single cell ended up, shown in the end-of-game review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellReview {
    pub present: String,
    pub past: String,
    pub attempted: bool,
    pub correct: bool,
    pub attempts: u32,
}

/// End-of-game statistics for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub has_won: bool,
    pub correct_count: usize,
    pub attempted_count: usize,
    /// Attempted cells that were never answered correctly
    pub incorrect_count: usize,
    pub total_attempts: u32,
    pub completed_lines: usize,
    pub cells: Vec<CellReview>,
}
