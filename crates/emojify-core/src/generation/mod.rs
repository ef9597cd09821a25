//! Emoji generation.
//!
//! A [`GenerationRequest`] becomes a [`PendingGeneration`] on submission and
//! the [`Orchestrator`] settles it into a complete or failed
//! [`GenerationResult`]. Remote calls go through the [`EmojiModel`] trait.

mod error;
#[cfg(feature = "gemini")]
mod gemini;
mod model;
mod orchestrator;
mod result;

pub use error::{GenerationError, ValidationError};
#[cfg(feature = "gemini")]
pub use gemini::{classify_failure, GeminiClient, GeminiResponse};
pub use model::{
    ComboRequest, EmojiModel, ImageRequest, Part, RemoteError, RemoteErrorKind,
    SQUARE_ASPECT_RATIO,
};
pub use orchestrator::{
    build_combo_request, build_image_request, first_inline_image, parse_combos, settle,
    Orchestrator,
};
pub use result::{
    GenerationRequest, GenerationResult, GenerationStatus, PendingGeneration,
    IMAGE_VARIATION_LABEL, VISUAL_EMOJI_FALLBACK,
};
