//! Color harmonization
//!
//! Derives a new key color for one scale from another scale's key color.
//! The target keeps its own hue; saturation and lightness come from the base
//! color, transformed by the chosen method.

use crate::color::{Color, Hsl};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named color-theory transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum HarmonyMethod {
    /// Same saturation and lightness as the base
    #[default]
    Direct,
    /// Lightness mirrored around 50%
    Complementary,
    /// Slightly less saturated, slightly lighter
    Analogous,
    /// More saturated, same lightness
    Triadic,
    /// Same saturation, darker
    Monochromatic,
}

impl HarmonyMethod {
    /// All available methods
    pub const ALL: [HarmonyMethod; 5] = [
        Self::Direct,
        Self::Complementary,
        Self::Analogous,
        Self::Triadic,
        Self::Monochromatic,
    ];

    /// Look up a method by name; unknown names fall back to [`Self::Direct`]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "direct" => Self::Direct,
            "complementary" => Self::Complementary,
            "analogous" => Self::Analogous,
            "triadic" => Self::Triadic,
            "monochromatic" => Self::Monochromatic,
            other => {
                debug!("Unknown harmony method '{}', using direct", other);
                Self::Direct
            }
        }
    }

    /// Saturation derived from the base saturation
    pub fn saturation(&self, base_s: f64) -> f64 {
        match self {
            Self::Direct | Self::Complementary | Self::Monochromatic => base_s,
            Self::Analogous => base_s * 0.9,
            Self::Triadic => (base_s * 1.2).min(1.0),
        }
    }

    /// Lightness derived from the base lightness
    pub fn lightness(&self, base_l: f64) -> f64 {
        match self {
            Self::Direct | Self::Triadic => base_l,
            Self::Complementary => 1.0 - base_l,
            Self::Analogous => (base_l + 0.1).min(0.95),
            Self::Monochromatic => (base_l - 0.2).max(0.2),
        }
    }
}

impl fmt::Display for HarmonyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Complementary => write!(f, "complementary"),
            Self::Analogous => write!(f, "analogous"),
            Self::Triadic => write!(f, "triadic"),
            Self::Monochromatic => write!(f, "monochromatic"),
        }
    }
}

impl From<&str> for HarmonyMethod {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for HarmonyMethod {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Target's hue with the base's saturation and lightness, transformed
pub fn harmonize(base: Color, target: Color, method: HarmonyMethod) -> Color {
    let base_hsl = base.to_hsl();
    let target_hsl = target.to_hsl();

    Color::from_hsl(Hsl::new(
        target_hsl.h,
        method.saturation(base_hsl.s),
        method.lightness(base_hsl.l),
    ))
}

/// One-level undo for harmonization
///
/// Holds the color a harmonization replaced until it is reverted or the next
/// harmonization overwrites it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarmonyHistory {
    previous: Option<Color>,
}

impl HarmonyHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Harmonize `current` against `base`, remembering `current`
    pub fn apply(&mut self, current: Color, base: Color, method: HarmonyMethod) -> Color {
        self.previous = Some(current);
        harmonize(base, current, method)
    }

    /// Restore the color replaced by the last harmonization
    pub fn revert(&mut self) -> Option<Color> {
        self.previous.take()
    }

    /// Whether a revert is available
    pub fn can_revert(&self) -> bool {
        self.previous.is_some()
    }
}
