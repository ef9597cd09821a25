//! The remote generative model seam.
//!
//! The orchestrator talks to an [`EmojiModel`]; [`crate::generation::GeminiClient`]
//! is the production implementation and tests plug in scripted doubles.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_url::InlineImage;

/// Aspect ratio requested for generated emoji images.
pub const SQUARE_ASPECT_RATIO: &str = "1:1";

/// One part of a request or response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(InlineImage),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn as_inline_image(&self) -> Option<&InlineImage> {
        match self {
            Part::InlineData(image) => Some(image),
            Part::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::InlineData(_) => None,
        }
    }
}

/// An image-synthesis request: ordered parts plus the output aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub parts: Vec<Part>,
    pub aspect_ratio: String,
}

/// A structured-text request whose answer must be a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboRequest {
    pub prompt: String,
}

/// Why a remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The service rejected the request as malformed (HTTP 400).
    InvalidRequest,
    /// Quota or rate limit hit (HTTP 429).
    RateLimited,
    /// The prompt or output was blocked by safety filters.
    SafetyBlocked,
    /// Anything else, including transport failures.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Unknown, message)
    }
}

/// A generative model able to draw emoji images and propose emoji combos.
#[async_trait]
pub trait EmojiModel: Send + Sync {
    /// Returns the parts of the first candidate.
    async fn generate_image(&self, request: &ImageRequest) -> Result<Vec<Part>, RemoteError>;

    /// Returns the text of the first candidate, if there is any.
    async fn generate_text(&self, request: &ComboRequest) -> Result<Option<String>, RemoteError>;
}

#[async_trait]
impl<T: EmojiModel + ?Sized> EmojiModel for Arc<T> {
    async fn generate_image(&self, request: &ImageRequest) -> Result<Vec<Part>, RemoteError> {
        (**self).generate_image(request).await
    }

    async fn generate_text(&self, request: &ComboRequest) -> Result<Option<String>, RemoteError> {
        (**self).generate_text(request).await
    }
}
