use crate::{
    error::{GameError, ValidationError},
    game::lines::{self, GRID_SIDE},
    models::{CellReview, CellState, GameSummary, GridCell, Verb},
    verbs::GRID_CELLS,
};

/// The 25 verbs of a session and their progress, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    cells: Vec<GridCell>,
}

impl GridState {
    /// Build a fresh grid. Needs at least 25 verbs; extras are ignored.
    pub fn new(mut verbs: Vec<Verb>) -> Result<Self, ValidationError> {
        if verbs.len() < GRID_CELLS {
            return Err(ValidationError::TooFewVerbs {
                found: verbs.len(),
                required: GRID_CELLS,
            });
        }
        verbs.truncate(GRID_CELLS);

        let cells = verbs
            .into_iter()
            .map(|verb| GridCell {
                verb,
                state: CellState::default(),
            })
            .collect();

        Ok(Self { cells })
    }

    /// (row, col) of a cell index
    pub fn position(index: usize) -> (usize, usize) {
        (index / GRID_SIDE, index % GRID_SIDE)
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Result<&GridCell, GameError> {
        self.cells.get(index).ok_or(GameError::CellOutOfRange(index))
    }

    pub fn is_locked(&self, index: usize) -> Result<bool, GameError> {
        Ok(self.cell(index)?.state.correct)
    }

    /// Record a completed recognition for a cell that is not yet correct
    pub fn record_attempt(&mut self, index: usize, is_correct: bool) -> Result<CellState, GameError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GameError::CellOutOfRange(index))?;
        if cell.state.correct {
            return Err(GameError::CellLocked(index));
        }
        cell.state.record(is_correct);
        Ok(cell.state)
    }

    pub fn correct_mask(&self) -> [bool; GRID_CELLS] {
        std::array::from_fn(|index| self.cells[index].state.correct)
    }

    pub fn completed_lines(&self) -> usize {
        lines::detect_lines(&self.correct_mask()).len()
    }

    pub fn summary(&self, has_won: bool) -> GameSummary {
        let correct_count = self.cells.iter().filter(|c| c.state.correct).count();
        let attempted_count = self.cells.iter().filter(|c| c.state.attempted).count();

        GameSummary {
            has_won,
            correct_count,
            attempted_count,
            incorrect_count: attempted_count - correct_count,
            total_attempts: self.cells.iter().map(|c| c.state.attempts).sum(),
            completed_lines: self.completed_lines(),
            cells: self
                .cells
                .iter()
                .map(|c| CellReview {
                    present: c.verb.present.clone(),
                    past: c.verb.past.clone(),
                    attempted: c.state.attempted,
                    correct: c.state.correct,
                    attempts: c.state.attempts,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridState {
        let verbs = (0..GRID_CELLS)
            .map(|i| Verb::new(&format!("verb{}", i), &format!("verbed{}", i), true))
            .collect();
        GridState::new(verbs).unwrap()
    }

    #[test]
    fn test_new_grid_is_unattempted() {
        let grid = grid();
        assert_eq!(grid.cells().len(), 25);
        assert!(grid.cells().iter().all(|c| c.state == CellState::default()));
        assert_eq!(grid.completed_lines(), 0);
    }

    #[test]
    fn test_new_grid_needs_25_verbs() {
        let verbs = vec![Verb::new("go", "went", false); 24];
        assert_eq!(
            GridState::new(verbs),
            Err(ValidationError::TooFewVerbs {
                found: 24,
                required: 25
            })
        );
    }

    #[test]
    fn test_position_is_row_major() {
        assert_eq!(GridState::position(0), (0, 0));
        assert_eq!(GridState::position(7), (1, 2));
        assert_eq!(GridState::position(24), (4, 4));
    }

    #[test]
    fn test_correct_cell_is_locked() {
        let mut grid = grid();
        grid.record_attempt(3, false).unwrap();
        assert!(!grid.is_locked(3).unwrap());
        grid.record_attempt(3, true).unwrap();
        assert!(grid.is_locked(3).unwrap());
        assert_eq!(grid.record_attempt(3, true), Err(GameError::CellLocked(3)));
        assert_eq!(grid.cell(3).unwrap().state.attempts, 2);
    }

    #[test]
    fn test_out_of_range() {
        let mut grid = grid();
        assert_eq!(grid.record_attempt(25, true), Err(GameError::CellOutOfRange(25)));
        assert!(grid.cell(99).is_err());
    }

    #[test]
    fn test_summary_counts() {
        let mut grid = grid();
        for index in 0..5 {
            grid.record_attempt(index, true).unwrap();
        }
        grid.record_attempt(10, false).unwrap();
        grid.record_attempt(10, false).unwrap();

        let summary = grid.summary(false);
        assert_eq!(summary.correct_count, 5);
        assert_eq!(summary.attempted_count, 6);
        assert_eq!(summary.incorrect_count, 1);
        assert_eq!(summary.total_attempts, 7);
        assert_eq!(summary.completed_lines, 1);
        assert_eq!(summary.cells.len(), 25);
        assert_eq!(summary.cells[10].attempts, 2);
    }
}
