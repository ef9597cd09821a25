//! Emojify WASM - WebAssembly bindings for Emojify
//!
//! This crate exposes the photo editor and the style catalogue of
//! emojify-core to the browser. Generation requests are made from
//! JavaScript; the prompts they carry are built here so both sides agree on
//! the wording.
//!
//! # Module Structure
//!
//! - `editor` - Edit sessions (crop, rotate, filter, save as JPEG data URL)
//! - `transform` - Preview helpers (decode, rotate, filter)
//! - `style` - Style catalogue and prompt building
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession, build_instruction } from '@emojify/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession(uploadedDataUrl);
//! session.rotation = 90;
//! const edited = session.apply();
//! const prompt = build_instruction('pixel', 'Cyberpunk cat');
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod style;
mod transform;
mod types;

pub use editor::JsEditSession;
pub use style::{
    build_instruction, build_transform_instruction, default_style_id, list_styles, StyleInfo,
};
pub use transform::{apply_filter, apply_rotation, decode_data_url, list_filters};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
