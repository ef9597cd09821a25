//! WASM bindings for the editor preview.
//!
//! The preview decodes the uploaded photo once and re-applies rotation and
//! filter as the user drags the controls. Saving goes through
//! [`crate::JsEditSession`] instead.

use crate::types::JsDecodedImage;
use emojify_core::decode::{decode_image, resize_to_fit, FilterType};
use emojify_core::transform::{apply_rotation as core_rotate, ImageFilter};
use emojify_core::InlineImage;
use wasm_bindgen::prelude::*;

/// Decode a data URL (or bare base64) into RGB pixels.
///
/// `max_edge` bounds the preview size; pass 0 to keep full resolution.
#[wasm_bindgen]
pub fn decode_data_url(data_url: &str, max_edge: u32) -> Result<JsDecodedImage, JsValue> {
    let bytes = InlineImage::from_data_url(data_url)
        .and_then(|image| image.decode_bytes())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let decoded = decode_image(&bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let decoded = if max_edge == 0 {
        decoded
    } else {
        resize_to_fit(&decoded, max_edge, FilterType::Bilinear)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    Ok(JsDecodedImage::from_decoded(decoded))
}

/// Rotate an image clockwise about its centre, expanding the canvas.
#[wasm_bindgen]
pub fn apply_rotation(image: &JsDecodedImage, angle_degrees: f64) -> JsDecodedImage {
    JsDecodedImage::from_decoded(core_rotate(&image.to_decoded(), angle_degrees))
}

/// Apply a named filter (`none`, `grayscale`, `sepia`, `contrast`).
#[wasm_bindgen]
pub fn apply_filter(image: &JsDecodedImage, filter: &str) -> Result<JsDecodedImage, JsValue> {
    let filter: ImageFilter = filter.parse().map_err(|e: String| JsValue::from_str(&e))?;
    let mut decoded = image.to_decoded();
    filter.apply(&mut decoded.pixels);
    Ok(JsDecodedImage::from_decoded(decoded))
}

/// Names of the available filters, in display order.
#[wasm_bindgen]
pub fn list_filters() -> Vec<String> {
    ImageFilter::ALL.iter().map(|f| f.to_string()).collect()
}
