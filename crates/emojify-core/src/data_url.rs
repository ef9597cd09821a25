//! The image boundary: MIME type plus base64 payload.
//!
//! Every image that enters or leaves the engine (uploads, edited photos,
//! generated emojis) travels as an [`InlineImage`]. It converts to and from
//! `data:<mime>;base64,<data>` URLs and doubles as the `inlineData` part of
//! a Gemini request or response.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME type assumed when a payload carries no data-URL header.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    #[error("Image data is empty")]
    Empty,

    #[error("Malformed data URL: {0}")]
    Malformed(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// An image as MIME type and base64 data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Parse a `data:` URL, or a bare base64 string.
    ///
    /// A bare string is taken as the payload with [`DEFAULT_MIME_TYPE`], as
    /// is a header that names no MIME type.
    pub fn from_data_url(input: &str) -> Result<Self, DataUrlError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DataUrlError::Empty);
        }

        let Some(rest) = input.strip_prefix("data:") else {
            return Ok(Self::new(DEFAULT_MIME_TYPE, input));
        };

        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| DataUrlError::Malformed("missing ',' separator".to_string()))?;

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default().trim();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(DataUrlError::Malformed(
                "only base64 data URLs are supported".to_string(),
            ));
        }
        if data.is_empty() {
            return Err(DataUrlError::Empty);
        }

        let mime_type = if mime_type.is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type
        };
        Ok(Self::new(mime_type, data))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the payload to raw bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, DataUrlError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))
    }

    /// Size of the decoded payload, computed from the base64 length.
    pub fn approx_byte_len(&self) -> usize {
        let unpadded = self.data.trim_end_matches('=').len();
        unpadded * 3 / 4
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the size estimate matches the decoded length.
        #[test]
        fn prop_approx_len_matches_decoded(bytes in prop::collection::vec(any::<u8>(), 0..300)) {
            let image = InlineImage::from_bytes("image/jpeg", &bytes);
            prop_assert_eq!(image.approx_byte_len(), bytes.len());
        }
    }
}
