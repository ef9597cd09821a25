use thiserror::Error;

use super::model::{RemoteError, RemoteErrorKind};

/// Why an image generation failed. The display text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Invalid request. Please check your prompt or image and try again.")]
    InvalidRequest,

    #[error("Too many requests. Please wait a moment before trying again.")]
    RateLimited,

    #[error("The prompt triggered safety filters. Please try a different description.")]
    SafetyBlocked,

    #[error("The model did not return an image. Please try a different prompt.")]
    NoImageReturned,

    #[error("Failed to generate image. {0}")]
    Unknown(String),
}

impl From<RemoteError> for GenerationError {
    fn from(err: RemoteError) -> Self {
        match err.kind {
            RemoteErrorKind::InvalidRequest => GenerationError::InvalidRequest,
            RemoteErrorKind::RateLimited => GenerationError::RateLimited,
            RemoteErrorKind::SafetyBlocked => GenerationError::SafetyBlocked,
            RemoteErrorKind::Unknown if err.message.trim().is_empty() => {
                GenerationError::Unknown("Unknown error.".to_string())
            }
            RemoteErrorKind::Unknown => GenerationError::Unknown(err.message),
        }
    }
}

/// Reasons a generation request is refused before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a description or upload an image.")]
    EmptyRequest,

    #[error("A generation is already in progress.")]
    AlreadyGenerating,
}
