//! Google Gemini client for emoji generation.
//!
//! Thin wrapper around the `generateContent` REST endpoint. Failures are
//! classified into [`RemoteErrorKind`]s here so callers never inspect
//! message text.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::model::{ComboRequest, EmojiModel, ImageRequest, Part, RemoteError, RemoteErrorKind};
use crate::config::{ConfigError, EmojifyConfig};
use crate::data_url::InlineImage;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Longest slice of an error body carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Block and finish reasons that mean the content was filtered.
const SAFETY_REASONS: [&str; 5] = [
    "SAFETY",
    "IMAGE_SAFETY",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
];

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    image_model: String,
    text_model: String,
}

// -- Response types --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponsePart {
    text: Option<String>,
    inline_data: Option<InlineImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiResponse {
    /// Parts of the first candidate, in order.
    pub fn first_candidate_parts(&self) -> Vec<Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| match (&p.inline_data, &p.text) {
                        (Some(image), _) => Some(Part::InlineData(image.clone())),
                        (None, Some(text)) => Some(Part::Text(text.clone())),
                        (None, None) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_candidate_parts()
            .iter()
            .filter_map(Part::as_text)
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// The safety reason that blocked this response, if any.
    pub fn safety_block(&self) -> Option<&str> {
        let block = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref());
        let finish = self
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref());

        block
            .into_iter()
            .chain(finish)
            .find(|reason| is_safety_reason(reason))
    }
}

fn is_safety_reason(reason: &str) -> bool {
    SAFETY_REASONS.contains(&reason)
}

impl GeminiClient {
    pub fn new(config: &EmojifyConfig) -> Result<Self, ConfigError> {
        if !config.has_api_key() {
            return Err(ConfigError::MissingApiKey);
        }

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.trim().to_string(),
            image_model: config.image_model.clone(),
            text_model: config.text_model.clone(),
        })
    }

    pub fn build_image_body(request: &ImageRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": request.parts
            }],
            "generationConfig": {
                "imageConfig": {
                    "aspectRatio": request.aspect_ratio
                }
            }
        })
    }

    pub fn build_combo_body(request: &ComboRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [{"text": request.prompt}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {"type": "STRING"}
                }
            }
        })
    }

    async fn post(&self, model: &str, body: &serde_json::Value) -> Result<GeminiResponse, RemoteError> {
        let url = format!("{}/{}:generateContent", GEMINI_ENDPOINT, model);

        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| RemoteError::unknown(format!("Invalid API key header: {}", e)))?;

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::unknown(format!("Gemini API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &error_body));
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::unknown(format!("Failed to parse Gemini response: {}", e)))
    }
}

/// Map a non-success HTTP response to a [`RemoteError`].
pub fn classify_failure(status: u16, body: &str) -> RemoteError {
    // Truncate error body to avoid leaking request data into logs
    let truncated: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    let message = format!("Gemini API error {}: {}", status, truncated);

    let kind = match status {
        400 => RemoteErrorKind::InvalidRequest,
        429 => RemoteErrorKind::RateLimited,
        _ if body.contains("SAFETY") => RemoteErrorKind::SafetyBlocked,
        _ => RemoteErrorKind::Unknown,
    };
    warn!(status, ?kind, "Gemini request rejected");
    RemoteError::new(kind, message)
}

#[async_trait]
impl EmojiModel for GeminiClient {
    async fn generate_image(&self, request: &ImageRequest) -> Result<Vec<Part>, RemoteError> {
        let body = Self::build_image_body(request);
        info!(
            model = %self.image_model,
            parts = request.parts.len(),
            "Gemini image generation"
        );

        let response = self.post(&self.image_model, &body).await?;
        let parts = response.first_candidate_parts();

        if !parts.iter().any(|p| p.as_inline_image().is_some()) {
            if let Some(reason) = response.safety_block() {
                return Err(RemoteError::new(
                    RemoteErrorKind::SafetyBlocked,
                    format!("Blocked by Gemini: {}", reason),
                ));
            }
        }

        debug!(parts = parts.len(), "Gemini image response received");
        Ok(parts)
    }

    async fn generate_text(&self, request: &ComboRequest) -> Result<Option<String>, RemoteError> {
        let body = Self::build_combo_body(request);
        debug!(model = %self.text_model, "Gemini combo generation");

        let response = self.post(&self.text_model, &body).await?;
        Ok(response.text())
    }
}
