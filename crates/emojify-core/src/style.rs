//! Emoji style templates.
//!
//! A style wraps the user's description in a fixed prefix and suffix before
//! it is sent to the image model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six supported emoji styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmojiStyle {
    #[default]
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "flat")]
    Flat,
    #[serde(rename = "pixel")]
    Pixel,
    #[serde(rename = "clay")]
    Clay,
    #[serde(rename = "vaporwave")]
    Vaporwave,
    #[serde(rename = "sticker")]
    Sticker,
}

impl EmojiStyle {
    /// All styles in picker order.
    pub const ALL: [EmojiStyle; 6] = [
        EmojiStyle::ThreeD,
        EmojiStyle::Flat,
        EmojiStyle::Pixel,
        EmojiStyle::Clay,
        EmojiStyle::Vaporwave,
        EmojiStyle::Sticker,
    ];

    pub fn id(self) -> &'static str {
        match self {
            EmojiStyle::ThreeD => "3d",
            EmojiStyle::Flat => "flat",
            EmojiStyle::Pixel => "pixel",
            EmojiStyle::Clay => "clay",
            EmojiStyle::Vaporwave => "vaporwave",
            EmojiStyle::Sticker => "sticker",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmojiStyle::ThreeD => "3D (Apple Style)",
            EmojiStyle::Flat => "Flat Design",
            EmojiStyle::Pixel => "Pixel Art",
            EmojiStyle::Clay => "Clay / Plasticine",
            EmojiStyle::Vaporwave => "Vaporwave",
            EmojiStyle::Sticker => "Sticker Pack",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            EmojiStyle::ThreeD => {
                "Create a high-quality, 3D, Apple-style emoji icon representing: "
            }
            EmojiStyle::Flat => "Create a flat, 2D vector art style emoji icon representing: ",
            EmojiStyle::Pixel => "Create a pixel art style emoji icon representing: ",
            EmojiStyle::Clay => "Create a claymation style emoji icon representing: ",
            EmojiStyle::Vaporwave => "Create a vaporwave aesthetic emoji icon representing: ",
            EmojiStyle::Sticker => "Create a die-cut sticker style emoji icon representing: ",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            EmojiStyle::ThreeD => {
                ". Isolated on a pure white background, soft lighting, glossy finish, minimalist design."
            }
            EmojiStyle::Flat => {
                ". Minimalist, solid colors, thick outlines, sticker style, white background."
            }
            EmojiStyle::Pixel => {
                ". 16-bit, retro game style, crisp edges, limited color palette, white background."
            }
            EmojiStyle::Clay => {
                ". Plasticine texture, soft rounded edges, handcrafted look, stop-motion aesthetic, white background."
            }
            EmojiStyle::Vaporwave => {
                ". Neon pink and purple color palette, glitch effects, retro 80s grid background, statue bust aesthetic, nostalgic."
            }
            EmojiStyle::Sticker => {
                ". Thick white border, subtle drop shadow, glossy vinyl texture, vibrant colors, isolated on white."
            }
        }
    }

    /// Look up a style by id, falling back to the default for unknown ids.
    pub fn from_id(id: &str) -> Self {
        Self::parse(id).unwrap_or_default()
    }

    /// Exact, case-insensitive lookup by id.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.id().eq_ignore_ascii_case(id))
    }

    /// The styled instruction for a text-only request.
    pub fn instruction(self, description: &str) -> String {
        format!("{}{}{}", self.prefix(), description, self.suffix())
    }

    /// The styled instruction when a source photo accompanies the request.
    pub fn transform_instruction(self, description: &str) -> String {
        format!(
            "Transform this image into a {} emoji. {}",
            self.label(),
            self.instruction(description)
        )
    }
}

impl fmt::Display for EmojiStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
