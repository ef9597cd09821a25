//! Image transformation operations: rotation, cropping and filters.
//!
//! # Transform Order
//!
//! The editor applies transforms in this order:
//! 1. Rotation (about the centre, canvas expands)
//! 2. Crop (coordinates refer to the rotated canvas)
//! 3. Square framing (largest centred square of the crop)
//! 4. Filter
//!
//! Rotating before cropping matches what the user does on screen: they
//! rotate the photo first and then frame the crop over the rotated result.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are pixels of the rotated canvas
//! - Origin is top-left corner

mod crop;
mod filter;
mod rotation;

pub use crop::{apply_crop, CropError, CropRegion};
pub use filter::ImageFilter;
pub use rotation::{apply_rotation, compute_rotated_bounds, normalize_degrees};
