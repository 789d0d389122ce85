//! Colours for the demo scene
//!
//! The palette is configured in the `colors:` section of `config.yaml` as
//! `#RRGGBB` or `#RRGGBBAA` strings. Unknown or malformed entries fall back to
//! the built-in dark palette with a logged warning.

use serde::{Deserialize, Serialize};

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Raw colour strings as stored in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteData {
    pub background: String,
    pub app_bar: String,
    pub content: String,
    pub sheet: String,
    pub handle: String,
    pub title: String,
    pub list_item: String,
    pub list_item_alt: String,
}

impl Default for PaletteData {
    fn default() -> Self {
        Palette::default_dark().to_data()
    }
}

/// Resolved palette, ARGB ready
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub app_bar: Color,
    pub content: Color,
    pub sheet: Color,
    pub handle: Color,
    pub title: Color,
    pub list_item: Color,
    pub list_item_alt: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_dark()
    }
}

impl Palette {
    pub fn default_dark() -> Self {
        Self {
            background: Color::rgb(0x12, 0x12, 0x14),
            app_bar: Color::rgb(0x2B, 0x2D, 0x30),
            content: Color::rgb(0x1E, 0x1F, 0x22),
            sheet: Color::rgb(0x31, 0x33, 0x38),
            handle: Color::rgb(0x6F, 0x73, 0x7A),
            title: Color::rgb(0x3C, 0x3F, 0x45),
            list_item: Color::rgb(0x35, 0x37, 0x3C),
            list_item_alt: Color::rgb(0x2E, 0x30, 0x34),
        }
    }

    /// Resolve a palette, falling back per entry on parse errors
    pub fn from_data(data: &PaletteData) -> Self {
        let fallback = Self::default_dark();
        let resolve = |name: &str, value: &str, default: Color| {
            Color::from_hex(value).unwrap_or_else(|e| {
                tracing::warn!("Invalid color for {}: {} ({})", name, value, e);
                default
            })
        };
        Self {
            background: resolve("background", &data.background, fallback.background),
            app_bar: resolve("app_bar", &data.app_bar, fallback.app_bar),
            content: resolve("content", &data.content, fallback.content),
            sheet: resolve("sheet", &data.sheet, fallback.sheet),
            handle: resolve("handle", &data.handle, fallback.handle),
            title: resolve("title", &data.title, fallback.title),
            list_item: resolve("list_item", &data.list_item, fallback.list_item),
            list_item_alt: resolve("list_item_alt", &data.list_item_alt, fallback.list_item_alt),
        }
    }

    pub fn to_data(&self) -> PaletteData {
        PaletteData {
            background: self.background.to_hex(),
            app_bar: self.app_bar.to_hex(),
            content: self.content.to_hex(),
            sheet: self.sheet.to_hex(),
            handle: self.handle.to_hex(),
            title: self.title.to_hex(),
            list_item: self.list_item.to_hex(),
            list_item_alt: self.list_item_alt.to_hex(),
        }
    }
}
