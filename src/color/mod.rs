//! Color representation and colorimetric math
//!
//! This module provides:
//! - [`Color`], an 8-bit sRGB value with a canonical lowercase `#rrggbb` form
//! - [`Hsl`], a derived hue/saturation/lightness view of a color
//! - [`convert`], conversions between hex, RGB, HSL, linear RGB and CIE L*
//! - [`contrast`], WCAG 2 contrast ratio and APCA lightness contrast
//!
//! # Example
//!
//! ```rust
//! use tonal_scales::color::Color;
//!
//! let blue: Color = "#3B82F6".parse().unwrap();
//! assert_eq!(blue.to_hex(), "#3b82f6");
//! assert!(blue.lstar() > 50.0 && blue.lstar() < 60.0);
//! ```

pub mod contrast;
pub mod convert;

use crate::core::error::{Result, ScaleError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use contrast::{
    apca_contrast, contrast_ratio, relative_luminance, wcag_level, ContrastReport, WCAG_AA,
    WCAG_AAA, WCAG_AA_LARGE,
};
pub use convert::{
    color_at_lightness, hex_to_rgb, hsl_to_rgb, lstar_to_rgb, rgb_to_hex, rgb_to_hsl,
    rgb_to_lstar,
};

// =============================================================================
// Color
// =============================================================================

/// An opaque sRGB color with 8 bits per channel
///
/// Serialized as its canonical hex string so configuration files and token
/// exports can spell colors as `"#3b82f6"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Color {
    /// Pure white, the light anchor of every scale
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Pure black, the dark anchor of every scale
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Create a color from RGB values (0-255)
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` or `rrggbb` string (case-insensitive)
    pub fn from_hex(hex: &str) -> Result<Self> {
        hex_to_rgb(hex)
    }

    /// Create a color from HSL components
    pub fn from_hsl(hsl: Hsl) -> Self {
        hsl_to_rgb(hsl)
    }

    /// Canonical lowercase `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to an RGB tuple (0-255)
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Hue/saturation/lightness view of this color
    pub fn to_hsl(&self) -> Hsl {
        rgb_to_hsl(*self)
    }

    /// CIE L* perceptual lightness (0 = black, 100 = white)
    pub fn lstar(&self) -> f64 {
        rgb_to_lstar(*self)
    }

    /// WCAG relative luminance
    pub fn relative_luminance(&self) -> f64 {
        relative_luminance(*self)
    }

    /// WCAG contrast ratio against another color (1.0 - 21.0)
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        contrast_ratio(*self, *other)
    }

    /// Whether the color reads as light (L* above the midpoint)
    pub fn is_light(&self) -> bool {
        self.lstar() > 50.0
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
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ScaleError;

    fn try_from(value: String) -> Result<Self> {
        hex_to_rgb(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// =============================================================================
// HSL
// =============================================================================

/// Hue/saturation/lightness triple
///
/// Always derived from a [`Color`] on demand; never stored as the source of
/// truth for a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees, [0, 360)
    pub h: f64,
    /// Saturation, [0, 1]
    pub s: f64,
    /// Lightness, [0, 1]
    pub l: f64,
}

impl Hsl {
    /// Create an HSL value, wrapping hue and clamping saturation and lightness
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({:.0}, {:.0}%, {:.0}%)",
            self.h,
            self.s * 100.0,
            self.l * 100.0
        )
    }
}
