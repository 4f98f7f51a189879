//! Colors, tools and brush widths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// An opaque RGBA8 color.
///
/// Serialized as the `#rrggbb` hex string a color picker produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black, the default brush color.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white, the canvas background.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#rrggbb` (or `#rgb`) hex string.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidColor`] if the string is not a hex color.
    pub fn from_hex(hex: &str) -> CanvasResult<Self> {
        let invalid = || CanvasError::InvalidColor(hex.to_string());
        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let expand = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::rgb(
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Format as a lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The color as RGBA bytes.
    #[must_use]
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = CanvasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// The active drawing tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paints with the chosen color.
    #[default]
    Brush,
    /// Paints with the background color.
    Eraser,
}

/// Brush width policy applied by hosts before calling the controller.
///
/// The controller itself accepts any width; the slider range lives here.
pub struct BrushWidth;

impl BrushWidth {
    /// Smallest width offered by the slider.
    pub const MIN: u32 = 1;
    /// Largest width offered by the slider.
    pub const MAX: u32 = 20;
    /// Initial brush width.
    pub const DEFAULT: u32 = 5;

    /// Clamp a requested width into the slider range.
    #[must_use]
    pub fn clamp_ui(width: u32) -> u32 {
        width.clamp(Self::MIN, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(Color::from_hex("#000000").unwrap(), Color::BLACK);
        assert_eq!(Color::from_hex("#FFFFFF").unwrap(), Color::WHITE);
        assert_eq!(
            Color::from_hex("#1e90ff").unwrap(),
            Color::rgb(0x1e, 0x90, 0xff)
        );
        assert_eq!(Color::from_hex("#f00").unwrap(), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_reject_invalid_colors() {
        assert!(Color::from_hex("000000").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("#ééé").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Color::rgb(0x1e, 0x90, 0xff).to_hex(), "#1e90ff");
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_color_serde_uses_hex() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");

        let parsed: Color = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(parsed, Color::rgb(0, 255, 0));

        assert!(serde_json::from_str::<Color>("\"green\"").is_err());
    }

    #[test]
    fn test_tool_serde() {
        assert_eq!(serde_json::to_string(&Tool::Eraser).unwrap(), "\"eraser\"");
        assert_eq!(Tool::default(), Tool::Brush);
    }

    #[test]
    fn test_brush_width_clamp() {
        assert_eq!(BrushWidth::clamp_ui(0), 1);
        assert_eq!(BrushWidth::clamp_ui(7), 7);
        assert_eq!(BrushWidth::clamp_ui(99), 20);
    }
}
