pub mod cell;
pub mod summary;
pub mod verb;

pub use cell::{CellState, GridCell};
pub use summary::{CellReview, GameSummary};
pub use verb::{Difficulty, Verb};
