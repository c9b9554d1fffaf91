use serde::{Deserialize, Serialize};

use super::Verb;

/// Progress of a single grid position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub attempted: bool,
    pub correct: bool,
    pub attempts: u32,
}

impl CellState {
    /// Apply one completed recognition. Correctness is sticky.
    pub fn record(&mut self, is_correct: bool) {
        self.attempts += 1;
        self.attempted = true;
        self.correct = self.correct || is_correct;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub verb: Verb,
    pub state: CellState,
}
