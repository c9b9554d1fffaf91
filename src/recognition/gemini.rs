use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{DrawingPayload, Recognition, RecognitionClient, RecognitionError};
use crate::config::RecognitionConfig;

const HANDWRITING_PROMPT: &str = "You are a handwriting recognition assistant for elementary \
school students learning English verb tenses. Your task is to interpret handwritten text from \
students and return ONLY the exact word or words you read, without any additional explanation \
or formatting. Be strict and precise - only return the word if you can clearly read it. What \
word is written in this image? Return only the word itself, nothing else.";

const MAX_OUTPUT_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.1;

/// Recognition backed by the Gemini `generateContent` API
pub struct GeminiClient {
    http: reqwest::Client,
    config: RecognitionConfig,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: RecognitionConfig) -> Self {
        Self { http, config }
    }

    fn request_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            api_key
        )
    }

    async fn recognize_image(&self, image: &[u8]) -> Result<Recognition, RecognitionError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            RecognitionError::RecognitionFailed("recognition API key is not configured".into())
        })?;

        tracing::debug!(
            "Sending {} byte image to {} for handwriting recognition",
            image.len(),
            self.config.model
        );

        let response = self
            .http
            .post(self.request_url(api_key))
            .timeout(self.config.timeout())
            .json(&request_body(image))
            .send()
            .await
            .map_err(|e| RecognitionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Recognition API error: {} {}", status, body);
            return Err(classify_status(status));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RecognitionError::RecognitionFailed(e.to_string()))?;

        let text = extract_text(&parsed);
        tracing::debug!("Recognition API interpreted: {:?}", text);
        Ok(Recognition { text })
    }
}

#[async_trait]
impl RecognitionClient for GeminiClient {
    async fn recognize(&self, payload: &DrawingPayload) -> Result<Recognition, RecognitionError> {
        match payload {
            DrawingPayload::Text(text) => Ok(Recognition { text: text.clone() }),
            DrawingPayload::Image(image) => self.recognize_image(image).await,
        }
    }
}

fn request_body(image: &[u8]) -> Value {
    json!({
        "contents": [
            {
                "parts": [
                    { "text": HANDWRITING_PROMPT },
                    {
                        "inline_data": {
                            "mime_type": "image/png",
                            "data": STANDARD.encode(image),
                        }
                    }
                ]
            }
        ],
        "generationConfig": {
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE,
        }
    })
}

fn classify_status(status: StatusCode) -> RecognitionError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => RecognitionError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => RecognitionError::QuotaExceeded,
        other => RecognitionError::RecognitionFailed(format!("recognition API returned {}", other)),
    }
}

/// First candidate's first text part, trimmed; empty when absent
fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
