//! Emojify Core - emoji generation library
//!
//! This crate provides the core functionality for Emojify: the photo editor
//! (decode, rotate, crop, filter, encode), the style templates, and the
//! generation pipeline that asks a generative model for an emoji image and
//! a set of emoji combos.

pub mod config;
pub mod data_url;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod generation;
pub mod history;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod studio;
pub mod style;
pub mod transform;

pub use config::{ConfigError, EmojifyConfig};
pub use data_url::{DataUrlError, InlineImage};
pub use editor::{EditOptions, EditSession, ImageProcessingError};
#[cfg(feature = "gemini")]
pub use generation::GeminiClient;
pub use generation::{
    EmojiModel, GenerationError, GenerationRequest, GenerationResult, GenerationStatus,
    Orchestrator, PendingGeneration, RemoteError, RemoteErrorKind, ValidationError,
};
pub use history::History;
pub use studio::{EmojiStudio, UploadError};
pub use style::EmojiStyle;
pub use transform::{CropRegion, ImageFilter};
