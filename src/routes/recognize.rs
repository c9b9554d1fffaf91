use crate::{
    recognition::{DrawingPayload, RecognitionError},
    AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeRequest {
    #[serde(default)]
    pub image_data: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecognizeResponse {
    pub text: String,
}

/// Failure reply for the recognition endpoint, always `{ "error": ... }`
#[derive(Debug)]
pub struct RecognizeError {
    status: StatusCode,
    message: String,
}

impl RecognizeError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<RecognitionError> for RecognizeError {
    fn from(e: RecognitionError) -> Self {
        let (status, message) = match e {
            RecognitionError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again in a moment.".to_string(),
            ),
            RecognitionError::QuotaExceeded => (
                StatusCode::PAYMENT_REQUIRED,
                "AI usage limit reached. Please contact your administrator.".to_string(),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };
        Self { status, message }
    }
}

impl IntoResponse for RecognizeError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Read the handwritten word in a canvas export
pub async fn recognize_handwriting(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecognizeRequest>,
) -> Result<Json<RecognizeResponse>, RecognizeError> {
    let image_data = payload
        .image_data
        .filter(|data| !data.trim().is_empty())
        .ok_or_else(|| RecognizeError::bad_request("No image data provided"))?;

    let drawing = DrawingPayload::from_data_url(&image_data).map_err(|e| {
        tracing::warn!("Rejected undecodable image data: {}", e);
        RecognizeError::bad_request(format!("Invalid image data: {}", e))
    })?;

    let recognition = state.recognizer.recognize(&drawing).await.map_err(|e| {
        tracing::error!("Handwriting recognition failed: {}", e);
        RecognizeError::from(e)
    })?;

    tracing::debug!("Recognized text: {:?}", recognition.text);

    Ok(Json(RecognizeResponse {
        text: recognition.text,
    }))
}
