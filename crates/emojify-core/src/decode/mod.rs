//! Image decoding for Emojify.
//!
//! This module provides functionality for:
//! - Decoding uploaded photos (JPEG, PNG, WebP) with EXIF orientation applied
//! - Resizing images to bound what is sent for generation
//!
//! # Architecture
//!
//! Decoding runs synchronously inside a single editor "Apply" action, either
//! natively or from the browser via the WASM bindings.
//!
//! # Examples
//!
//! ```ignore
//! use emojify_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod resize;
mod types;

pub use raster::{decode_image, get_orientation};
pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
