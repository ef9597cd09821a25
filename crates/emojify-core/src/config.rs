//! Runtime configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::style::EmojiStyle;

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_MAX_HISTORY: usize = 10;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid config JSON: {0}")]
    Json(String),

    #[error("Gemini API key is required (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// Settings shared by the editor, the orchestrator and the Gemini client.
///
/// Missing fields take their defaults when deserialising.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmojifyConfig {
    pub api_key: String,
    pub image_model: String,
    pub text_model: String,
    pub max_history: usize,
    pub default_style: EmojiStyle,
    pub max_upload_bytes: usize,
    pub output_quality: u8,
    pub max_output_edge: u32,
    pub request_timeout_secs: u64,
}

impl Default for EmojifyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            max_history: DEFAULT_MAX_HISTORY,
            default_style: EmojiStyle::ThreeD,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            output_quality: 90,
            max_output_edge: 1024,
            request_timeout_secs: 60,
        }
    }
}

impl EmojifyConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from a key lookup.
    ///
    /// The API key comes from `GEMINI_API_KEY`, falling back to `API_KEY`.
    /// `EMOJIFY_IMAGE_MODEL`, `EMOJIFY_TEXT_MODEL` and `EMOJIFY_MAX_HISTORY`
    /// override the matching defaults. Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            config.api_key = key;
        }
        if let Some(model) = get("EMOJIFY_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Some(model) = get("EMOJIFY_TEXT_MODEL") {
            config.text_model = model;
        }
        if let Some(value) = get("EMOJIFY_MAX_HISTORY") {
            config.max_history = match value.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "EMOJIFY_MAX_HISTORY",
                        value,
                    })
                }
            };
        }

        debug!(
            image_model = %config.image_model,
            text_model = %config.text_model,
            max_history = config.max_history,
            has_api_key = config.has_api_key(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EmojifyConfig::default();
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.text_model, "gemini-3-flash-preview");
        assert_eq!(config.max_history, 10);
        assert_eq!(config.default_style, EmojiStyle::ThreeD);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_empty_lookup_gives_defaults() {
        let config = EmojifyConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, EmojifyConfig::default());
    }

    #[test]
    fn test_gemini_key_preferred_over_api_key() {
        let config =
            EmojifyConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "g"), ("API_KEY", "a")]))
                .unwrap();
        assert_eq!(config.api_key, "g");

        let config = EmojifyConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "  "),
            ("API_KEY", "a"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "a");
    }

    #[test]
    fn test_overrides() {
        let config = EmojifyConfig::from_lookup(lookup_from(&[
            ("EMOJIFY_IMAGE_MODEL", "img-model"),
            ("EMOJIFY_TEXT_MODEL", "txt-model"),
            ("EMOJIFY_MAX_HISTORY", "3"),
        ]))
        .unwrap();
        assert_eq!(config.image_model, "img-model");
        assert_eq!(config.text_model, "txt-model");
        assert_eq!(config.max_history, 3);
    }

    #[test]
    fn test_invalid_max_history() {
        for value in ["zero", "0", "-2"] {
            let result =
                EmojifyConfig::from_lookup(lookup_from(&[("EMOJIFY_MAX_HISTORY", value)]));
            assert_eq!(
                result,
                Err(ConfigError::InvalidValue {
                    key: "EMOJIFY_MAX_HISTORY",
                    value: value.to_string(),
                })
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EmojifyConfig::from_json(r#"{"maxHistory": 4, "defaultStyle": "clay"}"#)
            .unwrap();
        assert_eq!(config.max_history, 4);
        assert_eq!(config.default_style, EmojiStyle::Clay);
        assert_eq!(config.output_quality, 90);
        assert!(EmojifyConfig::from_json("{").is_err());
    }
}
