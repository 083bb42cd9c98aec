//! Packed ARGB colors and their conversion to the host context's representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphicsError;

/// A 32-bit color packed as `0xAARRGGBB`.
///
/// Alpha lives in the most significant byte, followed by red, green and blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Build a color from its four channels.
    #[must_use]
    pub const fn from_channels(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self((alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Alpha normalized to `0.0..=1.0`.
    #[must_use]
    pub fn alpha_fraction(self) -> f64 {
        f64::from(self.alpha()) / 255.0
    }

    /// Convert to the representation a 2D drawing context expects.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        Rgba { red: self.red(), green: self.green(), blue: self.blue(), alpha: self.alpha_fraction() }
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for Argb {
    type Err = GraphicsError;

    /// Parse `#AARRGGBB`, `#RRGGBB` (opaque) or `0xAARRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| GraphicsError::InvalidColor(s.to_string()))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GraphicsError::InvalidColor(s.to_string()));
        }

        let value =
            u32::from_str_radix(hex, 16).map_err(|_| GraphicsError::InvalidColor(s.to_string()))?;
        match hex.len() {
            8 => Ok(Self(value)),
            6 if trimmed.starts_with('#') => Ok(Self(0xFF00_0000 | value)),
            _ => Err(GraphicsError::InvalidColor(s.to_string())),
        }
    }
}

impl TryFrom<String> for Argb {
    type Error = GraphicsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Argb> for String {
    fn from(color: Argb) -> Self {
        color.to_string()
    }
}

/// A color as a 2D drawing context consumes it: byte channels plus a
/// fractional alpha. Displays as a CSS `rgba()` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha in `0.0..=1.0`.
    pub alpha: f64,
}

impl Rgba {
    /// Alpha scaled back to a byte.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn alpha_u8(self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.red, self.green, self.blue, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_layout() {
        let c = Argb(0x80_11_22_33);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0x11);
        assert_eq!(c.green(), 0x22);
        assert_eq!(c.blue(), 0x33);
        assert_eq!(Argb::from_channels(0x80, 0x11, 0x22, 0x33), c);
    }

    #[test]
    fn alpha_is_normalized() {
        assert!((Argb::BLACK.alpha_fraction() - 1.0).abs() < f64::EPSILON);
        assert!(Argb::TRANSPARENT.alpha_fraction().abs() < f64::EPSILON);
        assert!((Argb(0x8000_0000).alpha_fraction() - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn css_form() {
        assert_eq!(Argb(0xFF10_2030).to_rgba().to_string(), "rgba(16, 32, 48, 1)");
        assert_eq!(Argb(0x0010_2030).to_rgba().to_string(), "rgba(16, 32, 48, 0)");
    }

    #[test]
    fn alpha_byte_round_trips() {
        for alpha in [0u8, 1, 127, 128, 254, 255] {
            let rgba = Argb::from_channels(alpha, 0, 0, 0).to_rgba();
            assert_eq!(rgba.alpha_u8(), alpha);
        }
    }

    #[test]
    fn parse_forms() {
        assert_eq!("#FF336699".parse::<Argb>().unwrap(), Argb(0xFF33_6699));
        assert_eq!("#336699".parse::<Argb>().unwrap(), Argb(0xFF33_6699));
        assert_eq!("0x80336699".parse::<Argb>().unwrap(), Argb(0x8033_6699));
        assert_eq!(" #ffffffff ".parse::<Argb>().unwrap(), Argb::WHITE);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("336699".parse::<Argb>().is_err());
        assert!("#12345".parse::<Argb>().is_err());
        assert!("0x336699".parse::<Argb>().is_err());
        assert!("#GG336699".parse::<Argb>().is_err());
        assert!("#+1234567".parse::<Argb>().is_err());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Argb(0x0A0B_0C0D).to_string(), "#0A0B0C0D");
    }
}
