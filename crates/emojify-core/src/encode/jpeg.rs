//! JPEG encoding for edited photos.
//!
//! Edited photos are re-encoded lossily before they are attached to a
//! generation request, which keeps request bodies small.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a decoded image to JPEG bytes.
pub fn encode_jpeg_image(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&image.pixels, image.width, image.height, quality)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: valid input always yields a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 1u8..=100,
            fill in any::<u8>(),
        ) {
            let pixels = vec![fill; (width * height * 3) as usize];
            let jpeg = encode_jpeg(&pixels, width, height, quality);

            prop_assert!(jpeg.is_ok());
            let jpeg = jpeg.unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: mismatched buffer lengths are rejected.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in (1u32..=20, 1u32..=20),
            delta in 1usize..=10,
            longer in any::<bool>(),
        ) {
            let expected = (width * height * 3) as usize;
            let actual = if longer { expected + delta } else { expected.saturating_sub(delta) };
            let pixels = vec![0u8; actual];

            prop_assert!(
                matches!(
                    encode_jpeg(&pixels, width, height, 90),
                    Err(EncodeError::InvalidPixelData { .. })
                ),
                "length {} for {}x{} should be rejected",
                actual,
                width,
                height
            );
        }
    }
}
