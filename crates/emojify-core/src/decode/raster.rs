//! Raster decoding (JPEG, PNG, WebP) with EXIF orientation handling.
//!
//! Phone photos usually carry their rotation in EXIF rather than in the pixel
//! data, so orientation is applied here. Crop rectangles chosen in the editor
//! refer to the image as the user sees it.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an encoded image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the byte stream; the caller's declared MIME
/// type is not trusted.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known format,
/// `DecodeError::CorruptedFile` if decoding fails part-way, and
/// `DecodeError::EmptyImage` for zero-sized images.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let decoded = DecodedImage::from_rgb_image(apply_orientation(img, orientation).into_rgb8());
    if decoded.is_empty() {
        return Err(DecodeError::EmptyImage);
    }
    Ok(decoded)
}

/// Extract EXIF orientation from encoded image bytes.
///
/// Returns `Orientation::Normal` when there is no EXIF block (PNG and WebP
/// uploads usually have none).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
