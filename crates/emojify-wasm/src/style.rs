//! WASM bindings for the emoji style catalogue.

use emojify_core::EmojiStyle;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A style as listed in the style picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleInfo {
    pub id: &'static str,
    pub label: &'static str,
}

pub(crate) fn style_infos() -> Vec<StyleInfo> {
    EmojiStyle::ALL
        .iter()
        .map(|style| StyleInfo {
            id: style.id(),
            label: style.label(),
        })
        .collect()
}

/// All styles as `{ id, label }` objects, in picker order.
#[wasm_bindgen]
pub fn list_styles() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&style_infos()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The style selected when the app opens.
#[wasm_bindgen]
pub fn default_style_id() -> String {
    EmojiStyle::default().id().to_string()
}

/// The styled image instruction for `description`.
///
/// Unknown style ids use the default style.
#[wasm_bindgen]
pub fn build_instruction(style_id: &str, description: &str) -> String {
    EmojiStyle::from_id(style_id).instruction(description)
}

/// The instruction sent alongside a source photo.
#[wasm_bindgen]
pub fn build_transform_instruction(style_id: &str, description: &str) -> String {
    EmojiStyle::from_id(style_id).transform_instruction(description)
}
