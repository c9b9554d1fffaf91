// Game engine modules

pub mod celebration;
pub mod controller;
pub mod grid;
pub mod lines;
pub mod selector;

pub use celebration::{Celebration, CelebrationKind};
pub use controller::{Effect, GameController, SubmissionTicket};
