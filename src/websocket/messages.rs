use serde::{Deserialize, Serialize};

use crate::{
    error::GameError,
    game::{
        celebration::{Confetti, SoundCue},
        lines::{self, Line},
        Celebration, CelebrationKind, GameController,
    },
    models::{Difficulty, GameSummary, GridCell, Verb},
};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    StartGame {
        #[serde(default)]
        difficulty: Option<Difficulty>,
    },
    SelectCell {
        index: usize,
    },
    /// Either a canvas export (`image_data`) or device-recognized `text`
    SubmitAnswer {
        index: usize,
        #[serde(default)]
        image_data: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    Retry,
    CloseDialog,
    FinishCelebration,
    EndGame,
    Restart,
    ChangeDifficulty {
        difficulty: Difficulty,
    },
    SaveVerbs {
        verbs: Vec<Verb>,
    },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameState {
        session_id: String,
        difficulty: Difficulty,
        cells: Vec<GridCell>,
        completed_lines: usize,
        winning_lines: Vec<Line>,
        has_won: bool,
        phase: String,
        selected_cell: Option<usize>,
        verifying: bool,
    },
    AnswerResult {
        index: usize,
        correct: bool,
        interpreted: String,
    },
    Celebrate {
        lines: usize,
        kind: CelebrationKind,
        message: String,
        sound: Option<SoundCue>,
        confetti: Confetti,
    },
    Toast {
        message: String,
    },
    ShowSummary {
        summary: GameSummary,
    },
    VerbsSaved {
        count: usize,
    },
    Error {
        kind: String,
        message: String,
    },
}

impl ServerMessage {
    pub fn game_state<R: rand::Rng>(controller: &GameController<R>) -> Self {
        let session = controller.session();
        let phase = controller.phase();
        let grid = controller.grid();
        ServerMessage::GameState {
            session_id: session.id.to_string(),
            difficulty: session.difficulty,
            cells: grid.cells().to_vec(),
            completed_lines: session.completed_lines,
            winning_lines: lines::detect_lines(&grid.correct_mask()),
            has_won: session.has_won,
            phase: phase.describe().to_string(),
            selected_cell: phase.selected_cell(),
            verifying: phase.is_verifying(),
        }
    }

    pub fn celebrate(celebration: &Celebration) -> Self {
        ServerMessage::Celebrate {
            lines: celebration.lines,
            kind: celebration.kind,
            message: celebration.message().to_string(),
            sound: celebration.sound(),
            confetti: celebration.confetti(),
        }
    }

    /// Player-facing error; recognition failures use their friendly wording
    pub fn error(error: &GameError) -> Self {
        let message = match error {
            GameError::Recognition(e) => e.user_message().to_string(),
            other => other.to_string(),
        };
        ServerMessage::Error {
            kind: error.kind().to_string(),
            message,
        }
    }

    pub fn bad_request(message: String) -> Self {
        ServerMessage::Error {
            kind: "bad_request".to_string(),
            message,
        }
    }
}
