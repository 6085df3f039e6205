//! Color parsing, interpolation and CSS serialization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color.
///
/// Channels are stored in `[0, 255]` space as `f64` and are deliberately not
/// clamped: interpolation may extrapolate past either endpoint and only the
/// serialized form is clamped and rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
    /// Opacity [0.0, 1.0]
    pub a: f64,
}

impl Color {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from channel values in `[0, 255]`.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse a CSS color string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` (with or without the leading
    /// `#`) and the functional `rgb(r, g, b)` / `rgba(r, g, b, a)` forms.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a supported color.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            let args = args
                .strip_suffix(')')
                .ok_or(ColorParseError::InvalidFunction)?;
            return Self::from_function_args(args);
        }
        Self::from_hex(s)
    }

    /// Parse a hex color string (e.g., "#ff0000", "f00" or "#ff000080").
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHex);
        }

        let channel = |s: &str| -> Result<f64, ColorParseError> {
            u8::from_str_radix(s, 16)
                .map(f64::from)
                .map_err(|_| ColorParseError::InvalidHex)
        };

        match hex.len() {
            3 => {
                let mut out = [0.0; 3];
                for (slot, i) in out.iter_mut().zip(0..3) {
                    let digit = channel(&hex[i..=i])?;
                    *slot = digit * 17.0;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])? / 255.0,
            )),
            _ => Err(ColorParseError::InvalidLength),
        }
    }

    fn from_function_args(args: &str) -> Result<Self, ColorParseError> {
        let parts: Vec<f64> = args
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|_| ColorParseError::InvalidFunction)
            })
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
            _ => Err(ColorParseError::InvalidFunction),
        }
    }

    /// Linear interpolation in RGB space.
    ///
    /// `t` is not clamped: values outside `[0, 1]` extrapolate.
    #[must_use]
    pub fn interpolate(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Convert to hex string (RGB only, channels clamped).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            clamp_channel(self.r),
            clamp_channel(self.g),
            clamp_channel(self.b)
        )
    }

    /// Serialize as a CSS functional color: `rgb(r, g, b)` when opaque,
    /// otherwise `rgba(r, g, b, a)`.
    #[must_use]
    pub fn to_css(&self) -> String {
        let a = if self.a.is_nan() {
            1.0
        } else {
            self.a.clamp(0.0, 1.0)
        };
        if a >= 1.0 {
            format!(
                "rgb({}, {}, {})",
                clamp_channel(self.r),
                clamp_channel(self.g),
                clamp_channel(self.b)
            )
        } else {
            format!(
                "rgba({}, {}, {}, {a})",
                clamp_channel(self.r),
                clamp_channel(self.g),
                clamp_channel(self.b)
            )
        }
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// White color
    pub const WHITE: Self = Self::rgb(255.0, 255.0, 255.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    crate::geometry::round_half_up(v).clamp(0.0, 255.0) as u8
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Invalid hex characters
    #[error("invalid hex characters")]
    InvalidHex,
    /// Invalid string length
    #[error("invalid hex string length (expected 3, 6 or 8)")]
    InvalidLength,
    /// Malformed `rgb()` / `rgba()` expression
    #[error("invalid rgb() color expression")]
    InvalidFunction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_constants() {
        assert_eq!(Color::BLACK.r, 0.0);
        assert_eq!(Color::WHITE.r, 255.0);
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn test_color_default() {
        let c = Color::default();
        assert_eq!(c, Color::BLACK);
    }

    #[test]
    fn test_short_hex_expands() {
        let c = Color::parse("#ddd").unwrap();
        assert_eq!(c, Color::rgb(221.0, 221.0, 221.0));
    }

    #[test]
    fn test_color_parse_error_display() {
        assert_eq!(
            ColorParseError::InvalidHex.to_string(),
            "invalid hex characters"
        );
        assert_eq!(
            ColorParseError::InvalidLength.to_string(),
            "invalid hex string length (expected 3, 6 or 8)"
        );
    }
}
