use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DrawingPayload, Recognition, RecognitionClient, RecognitionError};

/// Recognizer that replays queued responses in order
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<Recognition, RecognitionError>>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push_text(&self, text: &str) {
        self.push(Ok(Recognition {
            text: text.to_string(),
        }));
    }

    pub fn push(&self, response: Result<Recognition, RecognitionError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecognitionClient for ScriptedClient {
    async fn recognize(&self, _payload: &DrawingPayload) -> Result<Recognition, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(RecognitionError::RecognitionFailed(
                    "no scripted response".into(),
                ))
            })
    }
}
