//! Image rotation about the centre with canvas expansion.
//!
//! Angles are in degrees and positive angles rotate **clockwise**, matching
//! the editor's rotation slider. The output canvas is the bounding box of the
//! rotated image; uncovered area is filled with black.
//!
//! Quarter turns (90, 180, 270) are exact pixel remaps. Any other angle uses
//! inverse mapping with bilinear sampling. For a destination pixel centre
//! `(x, y)` relative to the destination centre, the source position is:
//!
//! ```text
//! src_x =  x * cos(θ) + y * sin(θ) + src_cx
//! src_y = -x * sin(θ) + y * cos(θ) + src_cy
//! ```

use crate::decode::DecodedImage;

/// Angles closer than this to a multiple of 90 degrees snap to the exact path.
const ANGLE_EPSILON: f64 = 0.001;

/// Normalize an angle in degrees to the range `[0, 360)`.
pub fn normalize_degrees(angle_degrees: f64) -> f64 {
    if !angle_degrees.is_finite() {
        return 0.0;
    }
    let normalized = angle_degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// Rotation direction does not affect the bounds.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image clockwise about its centre.
///
/// Returns a new image sized to the rotated bounding box.
pub fn apply_rotation(image: &DecodedImage, angle_degrees: f64) -> DecodedImage {
    match quarter_turns(angle_degrees) {
        Some(0) => image.clone(),
        Some(turns) => rotate_quarter_turns(image, turns),
        None => rotate_bilinear(image, angle_degrees),
    }
}

/// Number of clockwise quarter turns if the angle is (nearly) a multiple of 90.
fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let normalized = normalize_degrees(angle_degrees);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < ANGLE_EPSILON {
        Some((turns as u8) % 4)
    } else {
        None
    }
}

fn rotate_quarter_turns(image: &DecodedImage, turns: u8) -> DecodedImage {
    let (w, h) = (image.width, image.height);
    let (dst_w, dst_h) = if turns % 2 == 1 { (h, w) } else { (w, h) };
    let mut output = Vec::with_capacity((dst_w * dst_h * 3) as usize);

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = match turns {
                1 => (dst_y, h - 1 - dst_x),
                2 => (w - 1 - dst_x, h - 1 - dst_y),
                _ => (w - 1 - dst_y, dst_x),
            };
            output.extend_from_slice(&image.pixel(src_x, src_y));
        }
    }

    DecodedImage::new(dst_w, dst_h, output)
}

fn rotate_bilinear(image: &DecodedImage, angle_degrees: f64) -> DecodedImage {
    if image.is_empty() {
        return image.clone();
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; (dst_w * dst_h * 3) as usize];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            // Continuous source coordinates, shifted back to pixel indices
            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            if let Some(pixel) = sample_bilinear(image, src_x, src_y) {
                let idx = ((dst_y * dst_w + dst_x) * 3) as usize;
                output[idx..idx + 3].copy_from_slice(&pixel);
            }
        }
    }

    DecodedImage::new(dst_w, dst_h, output)
}

/// Sample a pixel using bilinear interpolation.
///
/// Returns `None` when the position falls outside the source image. Positions
/// within half a pixel of the border are clamped to the edge.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 3]> {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;

    if x < -0.5 || y < -0.5 || x > max_x + 0.5 || y > max_y + 0.5 {
        return None;
    }

    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(result)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = DecodedImage> {
        (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
            let len = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| DecodedImage::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: a half turn applied twice is the identity.
        #[test]
        fn prop_half_turn_is_involution(img in image_strategy()) {
            let twice = apply_rotation(&apply_rotation(&img, 180.0), 180.0);
            prop_assert_eq!(twice, img);
        }

        /// Property: output buffer always matches the reported dimensions.
        #[test]
        fn prop_pixel_data_matches_dimensions(
            img in image_strategy(),
            angle in -720.0f64..720.0,
        ) {
            let rotated = apply_rotation(&img, angle);
            let (w, h) = compute_rotated_bounds(img.width, img.height, angle);

            prop_assert_eq!((rotated.width, rotated.height), (w, h));
            prop_assert_eq!(rotated.pixels.len(), (w * h * 3) as usize);
        }
    }
}
