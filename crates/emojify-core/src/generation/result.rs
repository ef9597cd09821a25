//! Generation requests and result records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::error::ValidationError;
use crate::data_url::InlineImage;
use crate::style::EmojiStyle;

/// Prompt shown for photo-only requests.
pub const IMAGE_VARIATION_LABEL: &str = "Image Variation";

/// Description used for combos when the prompt is empty.
pub const VISUAL_EMOJI_FALLBACK: &str = "Visual emoji";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: EmojiStyle,
    pub source_image: Option<InlineImage>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, style: EmojiStyle) -> Self {
        Self {
            prompt: prompt.into(),
            style,
            source_image: None,
        }
    }

    pub fn with_source_image(mut self, image: InlineImage) -> Self {
        self.source_image = Some(image);
        self
    }

    /// The prompt with surrounding whitespace removed.
    pub fn description(&self) -> &str {
        self.prompt.trim()
    }

    /// A request needs a description, a photo, or both.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description().is_empty() && self.source_image.is_none() {
            return Err(ValidationError::EmptyRequest);
        }
        Ok(())
    }

    /// Text shown for this request in the result card and history.
    pub fn display_prompt(&self) -> &str {
        match self.description() {
            "" => IMAGE_VARIATION_LABEL,
            text => text,
        }
    }

    /// Description the combo prompt is built from.
    pub fn combo_description(&self) -> &str {
        match self.description() {
            "" => VISUAL_EMOJI_FALLBACK,
            text => text,
        }
    }
}

/// Lifecycle of a result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Complete,
    Failed { reason: String },
}

/// The outcome of one generation attempt.
///
/// Records are created pending and settle exactly once; fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    id: Uuid,
    prompt: String,
    style: EmojiStyle,
    image_url: Option<String>,
    combos: Option<Vec<String>>,
    created_at: DateTime<Utc>,
    status: GenerationStatus,
}

impl GenerationResult {
    fn pending(request: &GenerationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: request.display_prompt().to_string(),
            style: request.style,
            image_url: None,
            combos: None,
            created_at: Utc::now(),
            status: GenerationStatus::Pending,
        }
    }

    fn complete(self, image_url: String, combos: Vec<String>) -> Self {
        Self {
            image_url: Some(image_url),
            combos: Some(combos),
            status: GenerationStatus::Complete,
            ..self
        }
    }

    fn fail(self, reason: String) -> Self {
        Self {
            status: GenerationStatus::Failed { reason },
            ..self
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn style(&self) -> EmojiStyle {
        self.style
    }

    /// Data URL of the generated image, once complete.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn combos(&self) -> Option<&[String]> {
        self.combos.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == GenerationStatus::Pending
    }

    pub fn is_complete(&self) -> bool {
        self.status == GenerationStatus::Complete
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            GenerationStatus::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// A submitted request together with its pending record.
///
/// Settling consumes the value, so a record can only leave the pending
/// state once.
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    request: GenerationRequest,
    record: GenerationResult,
}

impl PendingGeneration {
    pub fn new(request: GenerationRequest) -> Self {
        let record = GenerationResult::pending(&request);
        Self { request, record }
    }

    pub fn id(&self) -> Uuid {
        self.record.id
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// The placeholder to display while the request is in flight.
    pub fn record(&self) -> &GenerationResult {
        &self.record
    }

    pub fn complete(self, image_url: String, combos: Vec<String>) -> GenerationResult {
        self.record.complete(image_url, combos)
    }

    pub fn fail(self, reason: impl Into<String>) -> GenerationResult {
        self.record.fail(reason.into())
    }
}
