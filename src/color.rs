//! Opaque 32-bit ARGB colors.
//!
//! Options files spell colors as `"#RRGGBB"` or `"#AARRGGBB"`; the GPU side
//! wants normalized floats. [`Color`] sits between the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A packed `0xAARRGGBB` color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Pack individual channels.
    #[must_use]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(
            ((a as u32) << 24)
                | ((r as u32) << 16)
                | ((g as u32) << 8)
                | (b as u32),
        )
    }

    /// Opaque color from RGB channels.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    /// The packed ARGB value.
    #[must_use]
    pub const fn argb(self) -> u32 {
        self.0
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

    /// Normalized `[r, g, b, a]` in the color's own (sRGB) encoding.
    #[must_use]
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            f32::from(self.red()) / 255.0,
            f32::from(self.green()) / 255.0,
            f32::from(self.blue()) / 255.0,
            f32::from(self.alpha()) / 255.0,
        ]
    }

    /// Normalized `[r, g, b, a]` with the color channels decoded to linear
    /// light, for writing into `*Srgb` render targets.
    #[must_use]
    pub fn to_linear_rgba(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_rgba_f32();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Failure to parse a hex color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string did not start with `#`.
    MissingHash,
    /// Neither 6 nor 8 hex digits followed the `#`.
    BadLength(usize),
    /// A non-hex character was found.
    InvalidDigit,
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "color must start with '#'"),
            Self::BadLength(n) => {
                write!(f, "expected 6 or 8 hex digits, found {n}")
            }
            Self::InvalidDigit => write!(f, "invalid hex digit in color"),
        }
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or(ParseColorError::MissingHash)?;
        let len = hex.len();
        if len != 6 && len != 8 {
            return Err(ParseColorError::BadLength(len));
        }
        // from_str_radix alone would let a sign through
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit);
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| ParseColorError::InvalidDigit)?;
        Ok(if len == 6 {
            Self(0xFF00_0000 | value)
        } else {
            Self(value)
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}
