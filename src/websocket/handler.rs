use crate::{
    error::GameError,
    game::{Effect, GameController, SubmissionTicket},
    recognition::{DrawingPayload, Recognition, RecognitionClient, RecognitionError},
    websocket::messages::{ClientMessage, ServerMessage},
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use tokio::{sync::mpsc, time::Instant};
use uuid::Uuid;

pub type RecognitionResult = (SubmissionTicket, Result<Recognition, RecognitionError>);

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One game per connection. Recognition calls run in their own tasks and
/// report back through `results` so the loop keeps serving the player.
pub struct ConnectionSession {
    controller: GameController<StdRng>,
    recognizer: Arc<dyn RecognitionClient>,
    results: mpsc::Sender<RecognitionResult>,
    summary_due: Option<(Uuid, Instant)>,
}

impl ConnectionSession {
    pub fn new(
        controller: GameController<StdRng>,
        recognizer: Arc<dyn RecognitionClient>,
        results: mpsc::Sender<RecognitionResult>,
    ) -> Self {
        Self {
            controller,
            recognizer,
            results,
            summary_due: None,
        }
    }

    pub fn controller(&self) -> &GameController<StdRng> {
        &self.controller
    }

    pub fn summary_due(&self) -> Option<(Uuid, Instant)> {
        self.summary_due
    }

    pub fn state_message(&self) -> ServerMessage {
        ServerMessage::game_state(&self.controller)
    }

    /// Handle one client action, replying with the resulting messages
    pub fn handle_client_message(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
        let mut replies = match self.dispatch(msg) {
            Ok(replies) => replies,
            Err(e) => {
                tracing::warn!("Refused client action: {}", e);
                vec![ServerMessage::error(&e)]
            }
        };
        replies.push(self.state_message());
        replies
    }

    fn dispatch(&mut self, msg: ClientMessage) -> Result<Vec<ServerMessage>, GameError> {
        match msg {
            ClientMessage::StartGame { difficulty } => {
                let difficulty = difficulty.unwrap_or(self.controller.session().difficulty);
                self.reset_timer();
                self.controller.change_difficulty(difficulty)?;
                Ok(Vec::new())
            }
            ClientMessage::SelectCell { index } => {
                self.controller.select_cell(index)?;
                Ok(Vec::new())
            }
            ClientMessage::SubmitAnswer {
                index,
                image_data,
                text,
            } => {
                let payload = match (text, image_data) {
                    (Some(text), _) => DrawingPayload::Text(text),
                    (None, Some(image_data)) => DrawingPayload::from_data_url(&image_data)
                        .map_err(|e| GameError::InvalidDrawing(e.to_string()))?,
                    (None, None) => {
                        return Err(GameError::InvalidDrawing("No image data provided".into()))
                    }
                };
                let ticket = self.controller.begin_submission(index)?;
                self.spawn_recognition(ticket, payload);
                Ok(Vec::new())
            }
            ClientMessage::Retry => {
                self.controller.retry()?;
                Ok(Vec::new())
            }
            ClientMessage::CloseDialog => {
                let effects = self.controller.close_dialog();
                Ok(self.apply_effects(effects))
            }
            ClientMessage::FinishCelebration => {
                self.controller.finish_celebration();
                Ok(Vec::new())
            }
            ClientMessage::EndGame => {
                let effect = self.controller.end_game();
                Ok(self.apply_effects(vec![effect]))
            }
            ClientMessage::Restart => {
                self.reset_timer();
                self.controller.restart()?;
                Ok(Vec::new())
            }
            ClientMessage::ChangeDifficulty { difficulty } => {
                self.reset_timer();
                self.controller.change_difficulty(difficulty)?;
                Ok(Vec::new())
            }
            ClientMessage::SaveVerbs { verbs } => {
                self.controller.save_verbs(verbs)?;
                self.reset_timer();
                Ok(vec![ServerMessage::VerbsSaved {
                    count: self.controller.pool().len(),
                }])
            }
        }
    }

    fn reset_timer(&mut self) {
        self.summary_due = None;
    }

    fn spawn_recognition(&self, ticket: SubmissionTicket, payload: DrawingPayload) {
        let recognizer = self.recognizer.clone();
        let results = self.results.clone();
        tokio::spawn(async move {
            let result = recognizer.recognize(&payload).await;
            if results.send((ticket, result)).await.is_err() {
                tracing::debug!("Connection closed before recognition finished");
            }
        });
    }

    /// Feed a finished recognition back into the game
    pub fn handle_recognition(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<Recognition, RecognitionError>,
    ) -> Vec<ServerMessage> {
        match self.controller.resolve_submission(ticket, result) {
            Ok(effects) => {
                let mut replies = self.apply_effects(effects);
                replies.push(self.state_message());
                replies
            }
            Err(GameError::StaleSubmission) => Vec::new(),
            Err(e) => {
                let mut replies = Vec::new();
                // Only the open dialog shows recognition errors
                if self.controller.phase().selected_cell() == Some(ticket.index) {
                    replies.push(ServerMessage::error(&e));
                }
                replies.push(self.state_message());
                replies
            }
        }
    }

    /// The post-win delay elapsed
    pub fn handle_summary_due(&mut self) -> Vec<ServerMessage> {
        let Some((session_id, _)) = self.summary_due.take() else {
            return Vec::new();
        };
        match self.controller.open_summary(session_id) {
            Some(effect) => self.apply_effects(vec![effect]),
            None => Vec::new(),
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> Vec<ServerMessage> {
        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::AnswerResolved { index, outcome } => {
                    replies.push(ServerMessage::AnswerResult {
                        index,
                        correct: outcome.is_correct(),
                        interpreted: outcome.interpreted().to_string(),
                    });
                }
                Effect::Toast(message) => replies.push(ServerMessage::Toast { message }),
                Effect::Celebrate(celebration) => {
                    replies.push(ServerMessage::celebrate(&celebration));
                }
                Effect::ScheduleSummary { session_id, delay } => {
                    self.summary_due = Instant::now()
                        .checked_add(delay)
                        .map(|at| (session_id, at));
                    if self.summary_due.is_none() {
                        tracing::warn!("Summary delay {:?} is out of range, not scheduling", delay);
                    }
                }
                Effect::OpenSummary(summary) => {
                    replies.push(ServerMessage::ShowSummary { summary });
                }
            }
        }
        replies
    }
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);
    let (results_tx, mut results_rx) = mpsc::channel::<RecognitionResult>(8);

    let controller = match GameController::new(
        state.verbs.clone(),
        state.config.game.default_difficulty,
        StdRng::from_os_rng(),
    ) {
        Ok(controller) => controller.with_summary_delay(state.config.game.summary_delay()),
        Err(e) => {
            tracing::error!("Failed to start game session: {}", e);
            return;
        }
    };
    let mut session = ConnectionSession::new(controller, state.recognizer.clone(), results_tx);

    tracing::info!(
        "WebSocket connection established, session {}",
        session.controller().session().id
    );

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    if tx.send(session.state_message()).await.is_err() {
        send_task.abort();
        return;
    }

    'conn: loop {
        let summary_at = session
            .summary_due()
            .map(|(_, at)| at)
            .unwrap_or_else(Instant::now);

        let replies = tokio::select! {
            _ = &mut send_task => break 'conn,
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => session.handle_client_message(client_msg),
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        vec![ServerMessage::bad_request(format!("Invalid message format: {}", e))]
                    }
                },
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Client disconnected");
                    break 'conn;
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break 'conn;
                }
                Some(Ok(_)) => Vec::new(),
            },
            Some((ticket, result)) = results_rx.recv() => session.handle_recognition(ticket, result),
            _ = tokio::time::sleep_until(summary_at), if session.summary_due().is_some() => {
                session.handle_summary_due()
            }
        };

        for reply in replies {
            if tx.send(reply).await.is_err() {
                break 'conn;
            }
        }
    }

    send_task.abort();

    tracing::info!(
        "WebSocket connection closed, session {}",
        session.controller().session().id
    );
}
