//! Scale generation
//!
//! Turns a [`ScaleConfig`] into an ordered list of swatches running from the
//! light end to the dark end of the configured L* range. Generation is a pure
//! function of its input: nothing is cached or retained between calls.

use super::bezier::BezierPoints;
use crate::color::{color_at_lightness, Color};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Upper bound applied to `swatch_count` when clamping
pub const MAX_SWATCH_COUNT: usize = 100;

/// Input to [`generate`]
///
/// Numeric fields are expected in range; [`ScaleConfig::clamped`] folds
/// anything outside back into its domain instead of rejecting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Representative color of the scale
    pub key_color: Color,

    /// L* of the darkest generated swatch (0-100)
    pub lstar_min: f64,

    /// L* of the lightest generated swatch (0-100)
    pub lstar_max: f64,

    /// Saturation percentage applied at the dark end (0-100)
    pub saturation_min: f64,

    /// Saturation percentage applied at the light end (0-100)
    pub saturation_max: f64,

    /// Hue rotation in degrees at the dark end
    pub hue_shift_dark: f64,

    /// Hue rotation in degrees at the light end
    pub hue_shift_light: f64,

    /// Easing curve from scale position to lightness position
    pub bezier: BezierPoints,

    /// Number of generated swatches, not counting anchors
    pub swatch_count: usize,

    /// Keep the pure white and pure black anchors in the output
    pub include_anchors: bool,

    /// Replace the nearest-lightness swatch with the exact key color
    pub lock_key_color: bool,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            key_color: Color::from_rgb(0x3b, 0x82, 0xf6),
            lstar_min: 10.0,
            lstar_max: 98.0,
            saturation_min: 100.0,
            saturation_max: 100.0,
            hue_shift_dark: 0.0,
            hue_shift_light: 0.0,
            bezier: BezierPoints::LINEAR,
            swatch_count: 12,
            include_anchors: false,
            lock_key_color: false,
        }
    }
}

fn clamp_or(value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(lo, hi)
    }
}

impl ScaleConfig {
    /// Create a config with default shaping around `key_color`
    pub fn with_key(key_color: Color) -> Self {
        Self {
            key_color,
            ..Self::default()
        }
    }

    /// Copy with every numeric field folded into its valid domain
    ///
    /// L* bounds go to [0, 100] and are swapped if reversed; saturations go
    /// to [0, 100]; hue shifts to [-180, 180]; `swatch_count` to
    /// [1, [`MAX_SWATCH_COUNT`]]; control points into the unit square.
    pub fn clamped(&self) -> Self {
        let mut lstar_min = clamp_or(self.lstar_min, 0.0, 100.0, 0.0);
        let mut lstar_max = clamp_or(self.lstar_max, 0.0, 100.0, 100.0);
        if lstar_min > lstar_max {
            std::mem::swap(&mut lstar_min, &mut lstar_max);
        }

        Self {
            key_color: self.key_color,
            lstar_min,
            lstar_max,
            saturation_min: clamp_or(self.saturation_min, 0.0, 100.0, 100.0),
            saturation_max: clamp_or(self.saturation_max, 0.0, 100.0, 100.0),
            hue_shift_dark: clamp_or(self.hue_shift_dark, -180.0, 180.0, 0.0),
            hue_shift_light: clamp_or(self.hue_shift_light, -180.0, 180.0, 0.0),
            bezier: self.bezier.clamped(),
            swatch_count: self.swatch_count.clamp(1, MAX_SWATCH_COUNT),
            include_anchors: self.include_anchors,
            lock_key_color: self.lock_key_color,
        }
    }
}

/// One color of a scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    /// Position in the scale; stable across regenerations of equal length
    pub index: usize,

    /// Display label (placeholder until numbered)
    pub step: i32,

    /// Swatch color
    pub color: Color,

    /// Target L* for generated swatches, measured L* for exact colors
    pub lstar: f64,

    /// Set when a caller override replaced the generated color
    pub is_custom: bool,
}

impl Swatch {
    /// Output record: step, hex, and L* fixed to one decimal
    pub fn to_record(&self) -> SwatchRecord {
        SwatchRecord {
            step: self.step,
            hex: self.color.to_hex(),
            lstar: format!("{:.1}", self.lstar),
        }
    }
}

/// Serializable view of a [`Swatch`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchRecord {
    pub step: i32,
    pub hex: String,
    pub lstar: String,
}

/// Ordered swatches, lightest first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scale {
    pub swatches: Vec<Swatch>,
}

impl Scale {
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.swatches.iter()
    }

    /// L* of every swatch, in order
    pub fn lstar_values(&self) -> Vec<f64> {
        self.swatches.iter().map(|s| s.lstar).collect()
    }

    /// Step label of every swatch, in order
    pub fn steps(&self) -> Vec<i32> {
        self.swatches.iter().map(|s| s.step).collect()
    }

    /// Swatch carrying the given step label
    pub fn swatch_for_step(&self, step: i32) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.step == step)
    }

    /// Replace the step labels; `labels` must match the scale length
    pub fn relabel(&mut self, labels: &[i32]) {
        debug_assert_eq!(labels.len(), self.swatches.len());
        for (swatch, label) in self.swatches.iter_mut().zip(labels) {
            swatch.step = *label;
        }
    }

    pub fn to_records(&self) -> Vec<SwatchRecord> {
        self.swatches.iter().map(Swatch::to_record).collect()
    }
}

impl<'a> IntoIterator for &'a Scale {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.swatches.iter()
    }
}

/// Index of the swatch whose HSL lightness is closest to the key color's
///
/// Ties resolve to the earlier (lighter) swatch.
pub fn find_key_color_index(swatches: &[Swatch], key_color: Color) -> Option<usize> {
    let key_l = key_color.to_hsl().l;

    swatches
        .iter()
        .enumerate()
        .map(|(i, s)| (i, (s.color.to_hsl().l - key_l).abs()))
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Generate a scale from `config`
///
/// Produces white, `swatch_count` eased steps, then black. With
/// `lock_key_color` the step nearest the key color's lightness becomes the
/// exact key color; without `include_anchors` white and black are dropped.
/// Steps carry placeholder labels `(i + 1) * 100`; see
/// [`super::numbering::assign_labels`] for real ones.
pub fn generate(config: &ScaleConfig) -> Scale {
    let config = config.clamped();
    let steps = config.swatch_count + 2;
    let last = steps - 1;

    let mut swatches: Vec<Swatch> = (0..steps)
        .map(|i| {
            let (color, lstar) = if i == 0 {
                (Color::WHITE, 100.0)
            } else if i == last {
                (Color::BLACK, 0.0)
            } else {
                let t = i as f64 / last as f64;
                let eased = config.bezier.ease(t);
                let lstar = config.lstar_max - eased * (config.lstar_max - config.lstar_min);
                let color = color_at_lightness(
                    config.key_color,
                    lstar,
                    config.lstar_min,
                    config.lstar_max,
                    config.saturation_min,
                    config.saturation_max,
                    config.hue_shift_dark,
                    config.hue_shift_light,
                );
                trace!("step {}: t={:.4} eased={:.4} L*={:.2} {}", i, t, eased, lstar, color);
                (color, lstar)
            };

            Swatch {
                index: i,
                step: (i as i32 + 1) * 100,
                color,
                lstar,
                is_custom: false,
            }
        })
        .collect();

    if config.lock_key_color {
        // Anchors never take the key color
        if let Some(offset) = find_key_color_index(&swatches[1..last], config.key_color) {
            let target = &mut swatches[offset + 1];
            debug!(
                "Locking key color {} at position {} (was {})",
                config.key_color, target.index, target.color
            );
            target.color = config.key_color;
            target.lstar = config.key_color.lstar();
        }
    }

    if !config.include_anchors {
        swatches.truncate(last);
        swatches.remove(0);
        for (i, swatch) in swatches.iter_mut().enumerate() {
            swatch.index = i;
        }
    }

    Scale { swatches }
}

/// Degenerate one-swatch scale holding only the key color
pub fn generate_single(key_color: Color) -> Scale {
    Scale {
        swatches: vec![Swatch {
            index: 0,
            step: 100,
            color: key_color,
            lstar: key_color.lstar(),
            is_custom: false,
        }],
    }
}
