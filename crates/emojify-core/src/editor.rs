//! Photo edit sessions.
//!
//! An [`EditSession`] holds the editor state for one uploaded photo: crop
//! rectangle, zoom, rotation and filter. Saving renders the session into a
//! square JPEG ready to be attached to a generation request.
//!
//! # Pipeline
//!
//! ```text
//! data URL -> decode (EXIF-oriented) -> rotate -> crop -> centred square
//!          -> downscale to max edge -> filter -> JPEG -> data URL
//! ```

use thiserror::Error;
use tracing::debug;

use crate::config::EmojifyConfig;
use crate::data_url::{DataUrlError, InlineImage};
use crate::decode::{decode_image, resize_to_fit, DecodeError, DecodedImage, FilterType};
use crate::encode::{encode_jpeg_image, EncodeError, JPEG_MIME_TYPE};
use crate::transform::{
    apply_crop, apply_rotation, normalize_degrees, CropError, CropRegion, ImageFilter,
};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 3.0;

/// Errors from rendering an edit session.
#[derive(Debug, Error)]
pub enum ImageProcessingError {
    #[error("Invalid source image: {0}")]
    Source(#[from] DataUrlError),

    #[error("Could not read image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid crop: {0}")]
    Crop(#[from] CropError),

    #[error("Could not encode image: {0}")]
    Encode(#[from] EncodeError),
}

/// Output settings for a rendered edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOptions {
    /// JPEG quality (1-100).
    pub quality: u8,
    /// Longest edge of the output square.
    pub max_output_edge: u32,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            quality: 90,
            max_output_edge: 1024,
        }
    }
}

impl From<&EmojifyConfig> for EditOptions {
    fn from(config: &EmojifyConfig) -> Self {
        Self {
            quality: config.output_quality,
            max_output_edge: config.max_output_edge,
        }
    }
}

/// Editor state for one source photo.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    source: InlineImage,
    crop: Option<CropRegion>,
    zoom: f64,
    rotation: f64,
    filter: ImageFilter,
}

impl EditSession {
    pub fn new(source: InlineImage) -> Self {
        Self {
            source,
            crop: None,
            zoom: MIN_ZOOM,
            rotation: 0.0,
            filter: ImageFilter::None,
        }
    }

    pub fn source(&self) -> &InlineImage {
        &self.source
    }

    /// Crop rectangle in pixels of the rotated image; `None` frames the
    /// whole canvas.
    pub fn crop(&self) -> Option<CropRegion> {
        self.crop
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Rotation in degrees, clockwise, in `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn filter(&self) -> ImageFilter {
        self.filter
    }

    pub fn set_crop(&mut self, crop: CropRegion) {
        self.crop = Some(crop);
    }

    pub fn clear_crop(&mut self) {
        self.crop = None;
    }

    /// Zoom only affects how the editor frames the crop; it is clamped to
    /// `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            MIN_ZOOM
        };
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn set_filter(&mut self, filter: ImageFilter) {
        self.filter = filter;
    }

    /// Render the session to a square JPEG.
    ///
    /// The session itself is left untouched, so a failed save can be
    /// adjusted and retried.
    pub fn apply(&self, options: &EditOptions) -> Result<InlineImage, ImageProcessingError> {
        let bytes = self.source.decode_bytes()?;
        let image = decode_image(&bytes)?;
        debug!(
            width = image.width,
            height = image.height,
            rotation = self.rotation,
            filter = %self.filter,
            "Rendering edit session"
        );

        let output = render(
            &image,
            self.crop.as_ref(),
            self.rotation,
            self.filter,
            options.max_output_edge,
        )?;
        let jpeg = encode_jpeg_image(&output, options.quality)?;
        debug!(
            side = output.width,
            bytes = jpeg.len(),
            "Edit session rendered"
        );

        Ok(InlineImage::from_bytes(JPEG_MIME_TYPE, &jpeg))
    }
}

/// Apply rotation, crop, square framing, downscale and filter to a decoded
/// image.
pub fn render(
    image: &DecodedImage,
    crop: Option<&CropRegion>,
    rotation: f64,
    filter: ImageFilter,
    max_output_edge: u32,
) -> Result<DecodedImage, ImageProcessingError> {
    let rotated = apply_rotation(image, rotation);

    let region = match crop {
        Some(region) => *region,
        None => CropRegion::full(rotated.width, rotated.height),
    };
    let cropped = apply_crop(&rotated, &region)?;

    let square = CropRegion::full(cropped.width, cropped.height).centered_square();
    let squared = apply_crop(&cropped, &square)?;

    let mut output = resize_to_fit(&squared, max_output_edge, FilterType::Lanczos3)?;
    filter.apply(&mut output.pixels);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_data_url(width: u32, height: u32, color: [u8; 3]) -> InlineImage {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb(color));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        InlineImage::from_bytes("image/png", bytes.get_ref())
    }

    /// Left half red, right half blue.
    fn split_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..height {
            for x in 0..width {
                if x < width / 2 {
                    pixels.extend_from_slice(&[255, 0, 0]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 255]);
                }
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn decode_output(image: &InlineImage) -> DecodedImage {
        assert_eq!(image.mime_type, "image/jpeg");
        decode_image(&image.decode_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_new_session_defaults() {
        let session = EditSession::new(png_data_url(4, 4, [0, 0, 0]));
        assert_eq!(session.crop(), None);
        assert_eq!(session.zoom(), 1.0);
        assert_eq!(session.rotation(), 0.0);
        assert_eq!(session.filter(), ImageFilter::None);
    }

    #[test]
    fn test_setters_clamp_and_normalize() {
        let mut session = EditSession::new(png_data_url(4, 4, [0, 0, 0]));
        session.set_zoom(7.5);
        assert_eq!(session.zoom(), MAX_ZOOM);
        session.set_zoom(0.2);
        assert_eq!(session.zoom(), MIN_ZOOM);
        session.set_zoom(f64::NAN);
        assert_eq!(session.zoom(), MIN_ZOOM);

        session.set_rotation(-90.0);
        assert_eq!(session.rotation(), 270.0);
        session.set_rotation(360.0);
        assert_eq!(session.rotation(), 0.0);
    }

    #[test]
    fn test_apply_produces_square_jpeg() {
        let session = EditSession::new(png_data_url(40, 20, [200, 100, 50]));
        let output = session.apply(&EditOptions::default()).unwrap();

        let decoded = decode_output(&output);
        assert_eq!((decoded.width, decoded.height), (20, 20));
    }

    #[test]
    fn test_apply_with_rotation_and_crop() {
        let mut session = EditSession::new(png_data_url(40, 20, [10, 200, 10]));
        session.set_rotation(90.0);
        // After a quarter turn the canvas is 20x40
        session.set_crop(CropRegion::new(0, 0, 20, 30));

        let decoded = decode_output(&session.apply(&EditOptions::default()).unwrap());
        assert_eq!((decoded.width, decoded.height), (20, 20));
    }

    #[test]
    fn test_apply_downscales_to_max_edge() {
        let session = EditSession::new(png_data_url(300, 300, [90, 90, 90]));
        let options = EditOptions {
            quality: 80,
            max_output_edge: 100,
        };

        let decoded = decode_output(&session.apply(&options).unwrap());
        assert_eq!((decoded.width, decoded.height), (100, 100));
    }

    #[test]
    fn test_apply_grayscale_filter() {
        let mut session = EditSession::new(png_data_url(16, 16, [220, 40, 40]));
        session.set_filter(ImageFilter::Grayscale);

        let decoded = decode_output(&session.apply(&EditOptions::default()).unwrap());
        for chunk in decoded.pixels.chunks_exact(3) {
            assert!((chunk[0] as i32 - chunk[1] as i32).abs() <= 3);
            assert!((chunk[1] as i32 - chunk[2] as i32).abs() <= 3);
        }
    }

    #[test]
    fn test_degenerate_crop_fails_and_keeps_session() {
        let mut session = EditSession::new(png_data_url(10, 10, [0, 0, 0]));
        session.set_crop(CropRegion::new(2, 2, 0, 5));
        let before = session.clone();

        let result = session.apply(&EditOptions::default());
        assert!(matches!(
            result,
            Err(ImageProcessingError::Crop(CropError::Degenerate { .. }))
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn test_crop_outside_canvas_fails() {
        let mut session = EditSession::new(png_data_url(10, 10, [0, 0, 0]));
        session.set_crop(CropRegion::new(50, 50, 5, 5));

        assert!(matches!(
            session.apply(&EditOptions::default()),
            Err(ImageProcessingError::Crop(CropError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_undecodable_source_fails() {
        let session = EditSession::new(InlineImage::from_bytes("image/png", b"not an image"));
        assert!(matches!(
            session.apply(&EditOptions::default()),
            Err(ImageProcessingError::Decode(_))
        ));

        let session = EditSession::new(InlineImage::new("image/png", "%%%"));
        assert!(matches!(
            session.apply(&EditOptions::default()),
            Err(ImageProcessingError::Source(_))
        ));
    }

    #[test]
    fn test_render_half_turn_swaps_sides() {
        let img = split_image(8, 8);
        let output = render(&img, None, 180.0, ImageFilter::None, 1024).unwrap();

        assert_eq!(output.pixel(0, 0), [0, 0, 255]);
        assert_eq!(output.pixel(7, 7), [255, 0, 0]);
    }

    #[test]
    fn test_render_takes_centered_square() {
        let img = split_image(12, 4);
        let output = render(&img, None, 0.0, ImageFilter::None, 1024).unwrap();

        assert_eq!((output.width, output.height), (4, 4));
        // Columns 4..8 of the source: two red then two blue
        assert_eq!(output.pixel(1, 0), [255, 0, 0]);
        assert_eq!(output.pixel(2, 0), [0, 0, 255]);
    }

    #[test]
    fn test_render_crop_in_rotated_space() {
        let img = split_image(8, 4);
        // 90 degrees clockwise: red (left) ends up on top, canvas 4x8
        let top = render(
            &img,
            Some(&CropRegion::new(0, 0, 4, 4)),
            90.0,
            ImageFilter::None,
            1024,
        )
        .unwrap();
        assert!(top.pixels.chunks_exact(3).all(|p| p == [255, 0, 0]));

        let bottom = render(
            &img,
            Some(&CropRegion::new(0, 4, 4, 4)),
            90.0,
            ImageFilter::None,
            1024,
        )
        .unwrap();
        assert!(bottom.pixels.chunks_exact(3).all(|p| p == [0, 0, 255]));
    }
}
