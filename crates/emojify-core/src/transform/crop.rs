//! Image cropping in pixel coordinates.
//!
//! Crop regions come from the editor in pixels of the image being cropped
//! (for the edit pipeline, that is the *rotated* canvas).
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - regions extending past the image are clamped to its bounds
//!
//! # Example
//!
//! ```ignore
//! let region = CropRegion::new(25, 25, 50, 50);
//! let cropped = apply_crop(&image, &region)?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors produced when a crop region cannot yield any pixels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropError {
    /// The region has zero width or height.
    #[error("Crop region is empty ({width}x{height})")]
    Degenerate { width: u32, height: u32 },

    /// The region lies entirely outside the image.
    #[error("Crop region at ({x}, {y}) lies outside the {image_width}x{image_height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        image_width: u32,
        image_height: u32,
    },
}

/// A rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The region covering a whole `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The largest square centred inside this region.
    pub fn centered_square(&self) -> Self {
        let side = self.width.min(self.height);
        Self {
            x: self.x + (self.width - side) / 2,
            y: self.y + (self.height - side) / 2,
            width: side,
            height: side,
        }
    }

    /// Clamp the region to a `width x height` image.
    ///
    /// Returns `None` if nothing of the region remains inside the image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        let left = self.x.min(width);
        let top = self.y.min(height);
        let right = self.x.saturating_add(self.width).min(width);
        let bottom = self.y.saturating_add(self.height).min(height);

        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }
}

/// Crop an image to a pixel region.
///
/// The region is clamped to the image bounds first.
///
/// # Errors
///
/// - `CropError::Degenerate` if the requested region has zero area
/// - `CropError::OutOfBounds` if the region does not intersect the image
pub fn apply_crop(image: &DecodedImage, region: &CropRegion) -> Result<DecodedImage, CropError> {
    if region.is_degenerate() {
        return Err(CropError::Degenerate {
            width: region.width,
            height: region.height,
        });
    }

    let clamped = region
        .clamp_to(image.width, image.height)
        .ok_or(CropError::OutOfBounds {
            x: region.x,
            y: region.y,
            image_width: image.width,
            image_height: image.height,
        })?;

    // Fast path: full crop returns a clone
    if clamped == CropRegion::full(image.width, image.height) {
        return Ok(image.clone());
    }

    let row_bytes = (clamped.width * 3) as usize;
    let mut output = Vec::with_capacity(row_bytes * clamped.height as usize);

    // Copy pixel data row by row
    for y in clamped.y..clamped.y + clamped.height {
        let start = ((y * image.width + clamped.x) * 3) as usize;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(DecodedImage::new(clamped.width, clamped.height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
