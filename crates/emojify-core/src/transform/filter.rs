//! Named visual filters offered by the photo editor.
//!
//! The filters reproduce the CSS filter functions the editor previews with,
//! so the saved image looks like what the user saw:
//!
//! | filter      | CSS equivalent      |
//! |-------------|---------------------|
//! | `none`      | `none`              |
//! | `grayscale` | `grayscale(100%)`   |
//! | `sepia`     | `sepia(100%)`       |
//! | `contrast`  | `contrast(150%)`    |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Contrast multiplier applied around mid-grey.
const CONTRAST_FACTOR: f32 = 1.5;

/// Rec. 709 luma weights (the CSS `grayscale()` matrix).
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// The CSS `sepia(100%)` colour matrix, row-major.
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// A named editor filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFilter {
    #[default]
    None,
    Grayscale,
    Sepia,
    Contrast,
}

impl ImageFilter {
    /// All filters in the order the editor lists them.
    pub const ALL: [ImageFilter; 4] = [
        ImageFilter::None,
        ImageFilter::Grayscale,
        ImageFilter::Sepia,
        ImageFilter::Contrast,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageFilter::None => "none",
            ImageFilter::Grayscale => "grayscale",
            ImageFilter::Sepia => "sepia",
            ImageFilter::Contrast => "contrast",
        }
    }

    /// Whether the filter leaves pixels untouched.
    pub fn is_identity(self) -> bool {
        self == ImageFilter::None
    }

    /// Apply the filter to RGB pixel data in place.
    pub fn apply(self, pixels: &mut [u8]) {
        if self.is_identity() {
            return;
        }

        for chunk in pixels.chunks_exact_mut(3) {
            let r = chunk[0] as f32 / 255.0;
            let g = chunk[1] as f32 / 255.0;
            let b = chunk[2] as f32 / 255.0;

            let (r, g, b) = match self {
                ImageFilter::None => (r, g, b),
                ImageFilter::Grayscale => {
                    let y = LUMA[0] * r + LUMA[1] * g + LUMA[2] * b;
                    (y, y, y)
                }
                ImageFilter::Sepia => (
                    SEPIA[0][0] * r + SEPIA[0][1] * g + SEPIA[0][2] * b,
                    SEPIA[1][0] * r + SEPIA[1][1] * g + SEPIA[1][2] * b,
                    SEPIA[2][0] * r + SEPIA[2][1] * g + SEPIA[2][2] * b,
                ),
                ImageFilter::Contrast => (
                    (r - 0.5) * CONTRAST_FACTOR + 0.5,
                    (g - 0.5) * CONTRAST_FACTOR + 0.5,
                    (b - 0.5) * CONTRAST_FACTOR + 0.5,
                ),
            };

            chunk[0] = to_u8(r);
            chunk[1] = to_u8(g);
            chunk[2] = to_u8(b);
        }
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for ImageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(ImageFilter::None),
            "grayscale" | "greyscale" => Ok(ImageFilter::Grayscale),
            "sepia" => Ok(ImageFilter::Sepia),
            "contrast" => Ok(ImageFilter::Contrast),
            other => Err(format!("Unknown filter: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pixels() -> Vec<u8> {
        vec![
            200, 40, 40, // red-ish
            30, 160, 60, // green-ish
            128, 128, 128, // mid grey
            10, 20, 240, // blue-ish
        ]
    }

    #[test]
    fn test_none_is_identity() {
        let mut pixels = sample_pixels();
        ImageFilter::None.apply(&mut pixels);
        assert_eq!(pixels, sample_pixels());
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let mut pixels = sample_pixels();
        ImageFilter::Grayscale.apply(&mut pixels);
        for chunk in pixels.chunks_exact(3) {
            assert_eq!(chunk[0], chunk[1]);
            assert_eq!(chunk[1], chunk[2]);
        }
    }

    #[test]
    fn test_sepia_tints_warm() {
        let mut pixels = vec![128, 128, 128];
        ImageFilter::Sepia.apply(&mut pixels);
        assert!(pixels[0] > pixels[1], "red should exceed green: {:?}", pixels);
        assert!(pixels[1] > pixels[2], "green should exceed blue: {:?}", pixels);
    }

    #[test]
    fn test_contrast_pushes_away_from_midpoint() {
        let mut pixels = vec![64, 128, 192];
        ImageFilter::Contrast.apply(&mut pixels);
        assert!(pixels[0] < 64);
        assert!((pixels[1] as i32 - 128).abs() <= 1);
        assert!(pixels[2] > 192);
    }

    #[test]
    fn test_filters_are_distinguishable() {
        let outputs: Vec<Vec<u8>> = ImageFilter::ALL
            .iter()
            .map(|filter| {
                let mut pixels = sample_pixels();
                filter.apply(&mut pixels);
                pixels
            })
            .collect();

        for i in 0..outputs.len() {
            for j in (i + 1)..outputs.len() {
                assert_ne!(
                    outputs[i], outputs[j],
                    "{} and {} produced identical output",
                    ImageFilter::ALL[i],
                    ImageFilter::ALL[j]
                );
            }
        }
    }

    #[test]
    fn test_parse_round_trip_names() {
        for filter in ImageFilter::ALL {
            assert_eq!(filter.as_str().parse::<ImageFilter>(), Ok(filter));
        }
        assert_eq!("Sepia".parse::<ImageFilter>(), Ok(ImageFilter::Sepia));
        assert!("blur".parse::<ImageFilter>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ImageFilter::Grayscale).unwrap();
        assert_eq!(json, "\"grayscale\"");
        let parsed: ImageFilter = serde_json::from_str("\"contrast\"").unwrap();
        assert_eq!(parsed, ImageFilter::Contrast);
    }
}
