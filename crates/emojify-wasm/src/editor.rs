//! WASM bindings for photo edit sessions.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsEditSession(uploadedDataUrl);
//! session.rotation = 90;
//! session.set_crop(crop.x, crop.y, crop.width, crop.height);
//! session.set_filter('sepia');
//! const edited = session.apply(); // "data:image/jpeg;base64,..."
//! ```

use emojify_core::transform::{CropRegion, ImageFilter};
use emojify_core::{EditOptions, EditSession, InlineImage};
use wasm_bindgen::prelude::*;
use web_sys::console;

/// Editor state for one uploaded photo.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
    options: EditOptions,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Open a session on a data URL (or bare base64, taken as PNG).
    #[wasm_bindgen(constructor)]
    pub fn new(data_url: &str) -> Result<JsEditSession, JsValue> {
        let source =
            InlineImage::from_data_url(data_url).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_source(source))
    }

    /// Crop rectangle in pixels of the rotated photo.
    pub fn set_crop(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.inner.set_crop(CropRegion::new(x, y, width, height));
    }

    /// Frame the whole rotated photo again.
    pub fn clear_crop(&mut self) {
        self.inner.clear_crop();
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    #[wasm_bindgen(setter)]
    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner.set_zoom(zoom);
    }

    /// Rotation in degrees, clockwise, normalised to [0, 360).
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.rotation()
    }

    #[wasm_bindgen(setter)]
    pub fn set_rotation(&mut self, degrees: f64) {
        self.inner.set_rotation(degrees);
    }

    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> String {
        self.inner.filter().to_string()
    }

    pub fn set_filter(&mut self, filter: &str) -> Result<(), JsValue> {
        let filter: ImageFilter = filter.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.inner.set_filter(filter);
        Ok(())
    }

    /// Output JPEG quality (1-100).
    pub fn set_quality(&mut self, quality: u8) {
        self.options.quality = quality.clamp(1, 100);
    }

    /// Longest edge of the saved square.
    pub fn set_max_output_edge(&mut self, edge: u32) {
        self.options.max_output_edge = edge.max(1);
    }

    /// Render the session to a square JPEG data URL.
    ///
    /// The session is unchanged on failure, so the caller can adjust the
    /// crop and try again.
    pub fn apply(&self) -> Result<String, JsValue> {
        self.inner
            .apply(&self.options)
            .map(|image| image.to_data_url())
            .map_err(|e| {
                let message = e.to_string();
                console::error_1(&JsValue::from_str(&format!("Failed to save edit: {}", message)));
                JsValue::from_str(&message)
            })
    }
}

impl JsEditSession {
    pub(crate) fn from_source(source: InlineImage) -> Self {
        Self {
            inner: EditSession::new(source),
            options: EditOptions::default(),
        }
    }
}
