use std::time::Duration;

use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::GameError,
    game::{
        celebration::Celebration, grid::GridState, lines, selector::VerbSelector,
    },
    models::{Difficulty, GameSummary, Verb},
    recognition::{DrawingPayload, Recognition, RecognitionClient, RecognitionError},
    verbs::VerbPool,
};

/// Delay between the winning answer and the summary opening
pub const SUMMARY_DELAY: Duration = Duration::from_millis(1000);

const UNREADABLE_TEXT: &str = "Unable to read";
const CORRECT_TOAST: &str = "Correct! Great job!";

/// How a recognized answer compared to the expected past tense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct { interpreted: String },
    Incorrect { interpreted: String },
    /// Recognition completed but produced no text
    Unreadable,
}

impl AnswerOutcome {
    /// Compare case-insensitively, ignoring surrounding whitespace
    pub fn evaluate(recognized: &str, expected: &str) -> Self {
        let interpreted = normalize(recognized);
        if interpreted.is_empty() {
            AnswerOutcome::Unreadable
        } else if interpreted == normalize(expected) {
            AnswerOutcome::Correct { interpreted }
        } else {
            AnswerOutcome::Incorrect { interpreted }
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }

    /// Text shown back to the player
    pub fn interpreted(&self) -> &str {
        match self {
            AnswerOutcome::Correct { interpreted } | AnswerOutcome::Incorrect { interpreted } => {
                interpreted
            }
            AnswerOutcome::Unreadable => UNREADABLE_TEXT,
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Where the session's answer dialog flow currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingAnswer { index: usize },
    /// `dialog_open` is cleared when the player closes the dialog before
    /// the recognizer answers; the result is then applied silently
    Verifying { index: usize, dialog_open: bool },
    Resolved { index: usize, outcome: AnswerOutcome },
    Celebrating { celebration: Celebration },
    Won,
}

impl Phase {
    /// Cell whose answer dialog is on screen
    pub fn selected_cell(&self) -> Option<usize> {
        match self {
            Phase::AwaitingAnswer { index }
            | Phase::Verifying {
                index,
                dialog_open: true,
            }
            | Phase::Resolved { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn is_verifying(&self) -> bool {
        matches!(self, Phase::Verifying { .. })
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingAnswer { .. } => "awaiting an answer",
            Phase::Verifying { .. } => "checking an answer",
            Phase::Resolved { .. } => "showing a result",
            Phase::Celebrating { .. } => "celebrating",
            Phase::Won => "the game is won",
        }
    }
}

/// Side effects for the host to perform, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show the outcome in the still-open answer dialog
    AnswerResolved { index: usize, outcome: AnswerOutcome },
    Toast(String),
    Celebrate(Celebration),
    /// Call [`GameController::open_summary`] with this session id after `delay`
    ScheduleSummary { session_id: Uuid, delay: Duration },
    OpenSummary(GameSummary),
}

/// One play-through, from initialization to the next restart
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub grid: GridState,
    pub completed_lines: usize,
    pub has_won: bool,
    pub difficulty: Difficulty,
}

/// Proof that a submission was started for a given session and cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub session_id: Uuid,
    pub index: usize,
}

pub struct GameController<R: Rng = StdRng> {
    pool: VerbPool,
    session: Session,
    phase: Phase,
    pending_celebration: Option<Celebration>,
    summary_opened: bool,
    summary_delay: Duration,
    rng: R,
}

impl<R: Rng> GameController<R> {
    /// Start a session drawn from `pool`
    pub fn new(pool: VerbPool, difficulty: Difficulty, mut rng: R) -> Result<Self, GameError> {
        let session = Self::build_session(&pool, difficulty, &mut rng)?;
        Ok(Self {
            pool,
            session,
            phase: Phase::Idle,
            pending_celebration: None,
            summary_opened: false,
            summary_delay: SUMMARY_DELAY,
            rng,
        })
    }

    pub fn with_summary_delay(mut self, delay: Duration) -> Self {
        self.summary_delay = delay;
        self
    }

    fn build_session(
        pool: &VerbPool,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Session, GameError> {
        let verbs = VerbSelector::select_for_difficulty(difficulty, pool.verbs(), rng);
        let grid = GridState::new(verbs)?;
        Ok(Session {
            id: Uuid::new_v4(),
            grid,
            completed_lines: 0,
            has_won: false,
            difficulty,
        })
    }

    fn install(&mut self, session: Session) {
        tracing::debug!(
            "Starting session {} at difficulty {}",
            session.id,
            session.difficulty.level()
        );
        self.session = session;
        self.phase = Phase::Idle;
        self.pending_celebration = None;
        self.summary_opened = false;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn grid(&self) -> &GridState {
        &self.session.grid
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn pool(&self) -> &VerbPool {
        &self.pool
    }

    #[allow(dead_code)]
    pub fn pending_celebration(&self) -> Option<&Celebration> {
        self.pending_celebration.as_ref()
    }

    /// Open the answer dialog for a cell
    pub fn select_cell(&mut self, index: usize) -> Result<(), GameError> {
        let locked = self.session.grid.is_locked(index)?;
        if self.session.has_won {
            return Err(GameError::GameWon);
        }

        match &self.phase {
            Phase::Idle | Phase::Celebrating { .. } => {}
            Phase::AwaitingAnswer { index: selected } if *selected == index => return Ok(()),
            Phase::Resolved { index: selected, .. } if *selected == index => {
                return Err(GameError::InvalidPhase(self.phase.describe()))
            }
            Phase::AwaitingAnswer { index: selected } | Phase::Resolved { index: selected, .. } => {
                return Err(GameError::CellMismatch {
                    selected: *selected,
                    requested: index,
                })
            }
            Phase::Verifying { .. } => return Err(GameError::SubmissionInFlight),
            Phase::Won => return Err(GameError::GameWon),
        }

        if locked {
            return Err(GameError::CellLocked(index));
        }

        let (row, col) = GridState::position(index);
        tracing::debug!("Selected cell {} (row {}, col {})", index, row, col);
        self.phase = Phase::AwaitingAnswer { index };
        Ok(())
    }

    /// Move the selected cell into verification. The caller must hand the
    /// recognizer's answer to [`Self::resolve_submission`].
    pub fn begin_submission(&mut self, index: usize) -> Result<SubmissionTicket, GameError> {
        match &self.phase {
            Phase::AwaitingAnswer { index: selected } if *selected == index => {}
            Phase::AwaitingAnswer { index: selected } => {
                return Err(GameError::CellMismatch {
                    selected: *selected,
                    requested: index,
                })
            }
            Phase::Verifying { .. } => return Err(GameError::SubmissionInFlight),
            Phase::Won => return Err(GameError::GameWon),
            Phase::Idle | Phase::Celebrating { .. } => return Err(GameError::NoCellSelected),
            other => return Err(GameError::InvalidPhase(other.describe())),
        }

        self.phase = Phase::Verifying {
            index,
            dialog_open: true,
        };
        Ok(SubmissionTicket {
            session_id: self.session.id,
            index,
        })
    }

    /// Apply the recognizer's answer: cell update, line recount and
    /// celebration queueing happen together here.
    pub fn resolve_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<Recognition, RecognitionError>,
    ) -> Result<Vec<Effect>, GameError> {
        if ticket.session_id != self.session.id {
            tracing::debug!("Dropping result for finished session {}", ticket.session_id);
            return Err(GameError::StaleSubmission);
        }

        let (index, dialog_open) = match self.phase {
            Phase::Verifying { index, dialog_open } if index == ticket.index => {
                (index, dialog_open)
            }
            ref other => return Err(GameError::InvalidPhase(other.describe())),
        };

        let recognition = match result {
            Ok(recognition) => recognition,
            Err(e) => {
                tracing::warn!("Recognition failed for cell {}: {}", index, e);
                self.phase = if dialog_open {
                    Phase::AwaitingAnswer { index }
                } else {
                    Phase::Idle
                };
                return Err(GameError::Recognition(e));
            }
        };

        let expected = &self.session.grid.cell(index)?.verb.past;
        let outcome = AnswerOutcome::evaluate(&recognition.text, expected);
        tracing::debug!(
            "Cell {} interpreted {:?}, expected {:?}",
            index,
            outcome.interpreted(),
            expected
        );

        if let Err(e) = self.session.grid.record_attempt(index, outcome.is_correct()) {
            self.phase = Phase::Idle;
            return Err(e);
        }

        let mut effects = Vec::new();
        if dialog_open {
            effects.push(Effect::AnswerResolved {
                index,
                outcome: outcome.clone(),
            });
            if outcome.is_correct() {
                effects.push(Effect::Toast(CORRECT_TOAST.to_string()));
            }
        }

        effects.extend(self.recount_lines());

        if dialog_open {
            self.phase = Phase::Resolved { index, outcome };
        } else {
            // Any earned celebration stays queued for the next dialog close
            self.phase = self.resting_phase();
        }

        Ok(effects)
    }

    fn recount_lines(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        let completed = self.session.grid.completed_lines();

        if completed > self.session.completed_lines {
            tracing::debug!(
                "Completed lines {} -> {}",
                self.session.completed_lines,
                completed
            );
            self.session.completed_lines = completed;
            self.pending_celebration = Some(Celebration::for_lines(completed));
        }

        if !self.session.has_won && lines::has_won(&self.session.grid.correct_mask()) {
            tracing::info!("Session {} won with {} lines", self.session.id, completed);
            self.session.has_won = true;
            effects.push(Effect::ScheduleSummary {
                session_id: self.session.id,
                delay: self.summary_delay,
            });
        }

        effects
    }

    /// Verify a drawing end to end against `client`. The WebSocket host
    /// splits this into its two halves so it can await off the loop.
    #[allow(dead_code)]
    pub async fn submit_answer(
        &mut self,
        index: usize,
        payload: &DrawingPayload,
        client: &dyn RecognitionClient,
    ) -> Result<Vec<Effect>, GameError> {
        let ticket = self.begin_submission(index)?;
        let result = client.recognize(payload).await;
        self.resolve_submission(ticket, result)
    }

    /// Clear an incorrect result and let the player try the same cell again
    pub fn retry(&mut self) -> Result<(), GameError> {
        match &self.phase {
            Phase::Resolved { index, outcome } if !outcome.is_correct() => {
                let index = *index;
                self.phase = Phase::AwaitingAnswer { index };
                Ok(())
            }
            other => Err(GameError::InvalidPhase(other.describe())),
        }
    }

    /// Close (or cancel) the answer dialog, firing any pending celebration
    pub fn close_dialog(&mut self) -> Vec<Effect> {
        match self.phase {
            Phase::AwaitingAnswer { .. } | Phase::Resolved { .. } => self.leave_dialog(),
            Phase::Verifying { index, .. } => {
                self.phase = Phase::Verifying {
                    index,
                    dialog_open: false,
                };
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn leave_dialog(&mut self) -> Vec<Effect> {
        match self.pending_celebration.take() {
            Some(celebration) => {
                self.phase = Phase::Celebrating { celebration };
                vec![Effect::Celebrate(celebration)]
            }
            None => {
                self.phase = self.resting_phase();
                Vec::new()
            }
        }
    }

    fn resting_phase(&self) -> Phase {
        if self.session.has_won {
            Phase::Won
        } else {
            Phase::Idle
        }
    }

    /// The frontend finished playing a celebration
    pub fn finish_celebration(&mut self) {
        if let Phase::Celebrating { .. } = self.phase {
            self.phase = self.resting_phase();
        }
    }

    /// Open the summary once the post-win delay has elapsed
    pub fn open_summary(&mut self, session_id: Uuid) -> Option<Effect> {
        if session_id != self.session.id || !self.session.has_won || self.summary_opened {
            return None;
        }
        self.summary_opened = true;
        Some(Effect::OpenSummary(self.summary()))
    }

    /// Player asked to stop; the summary opens regardless of win state
    pub fn end_game(&mut self) -> Effect {
        Effect::OpenSummary(self.summary())
    }

    pub fn summary(&self) -> GameSummary {
        self.session.grid.summary(self.session.has_won)
    }

    pub fn restart(&mut self) -> Result<(), GameError> {
        self.change_difficulty(self.session.difficulty)
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        let session = Self::build_session(&self.pool, difficulty, &mut self.rng)?;
        self.install(session);
        Ok(())
    }

    /// Replace the verb pool and start over. A rejected list changes nothing.
    pub fn save_verbs(&mut self, candidates: Vec<Verb>) -> Result<(), GameError> {
        let pool = VerbPool::validate(candidates)?;
        let session = Self::build_session(&pool, self.session.difficulty, &mut self.rng)?;
        tracing::info!("Verb list replaced with {} verbs", pool.len());
        self.pool = pool;
        self.install(session);
        Ok(())
    }
}
