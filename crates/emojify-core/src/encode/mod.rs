//! Image encoding for Emojify.
//!
//! Edited photos are re-encoded as JPEG before they cross the data-URL
//! boundary into a generation request.
//!
//! # Examples
//!
//! ```ignore
//! use emojify_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, encode_jpeg_image, EncodeError};

/// MIME type of images produced by this module.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
