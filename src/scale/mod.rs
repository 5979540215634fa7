//! Scale engine
//!
//! This module contains everything needed to go from a key color to a
//! labelled scale:
//!
//! - `bezier` - Cubic Bézier easing and its inverse solve
//! - `generator` - Swatch generation, key-color locking and anchors
//! - `numbering` - Step labels (sequential or lightness-based)
//! - `overrides` - Custom swatch colors keyed by stable index
//!
//! # Example
//!
//! ```rust
//! use tonal_scales::color::Color;
//! use tonal_scales::scale::{build_scale, NumberingOptions, ScaleConfig, SwatchOverrides};
//!
//! let config = ScaleConfig::with_key(Color::from_rgb(0x3b, 0x82, 0xf6));
//! let scale = build_scale(&config, &NumberingOptions::default(), &SwatchOverrides::new());
//! assert_eq!(scale.steps(), vec![98, 95, 90, 80, 70, 60, 50, 40, 30, 20, 15, 10]);
//! ```

pub mod bezier;
pub mod generator;
pub mod numbering;
pub mod overrides;

pub use bezier::{bezier_y, cubic_bezier, solve_bezier_x, BezierPoints, ControlPoint};
pub use generator::{
    find_key_color_index, generate, generate_single, Scale, ScaleConfig, Swatch, SwatchRecord,
};
pub use numbering::{assign_labels, NumberingMode, NumberingOptions};
pub use overrides::{OverrideEntry, SwatchOverrides};

/// Generate, number, then apply overrides
///
/// Overrides are applied strictly after numbering so custom colors never
/// influence the labels.
pub fn build_scale(
    config: &ScaleConfig,
    numbering: &NumberingOptions,
    overrides: &SwatchOverrides,
) -> Scale {
    let config = config.clamped();
    let mut scale = generate(&config);

    let labels = assign_labels(
        &scale.lstar_values(),
        numbering.mode,
        config.lstar_min,
        config.lstar_max,
        numbering.increment,
    );
    scale.relabel(&labels);

    overrides.apply(&mut scale);
    scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_build_scale_reference_labels() {
        let config = ScaleConfig {
            key_color: Color::from_rgb(0x10, 0xb9, 0x81),
            lstar_min: 10.0,
            lstar_max: 98.0,
            swatch_count: 12,
            ..ScaleConfig::default()
        };
        let scale = build_scale(&config, &NumberingOptions::default(), &SwatchOverrides::new());

        assert_eq!(scale.len(), 12);
        assert_eq!(scale.swatches[0].step, 98);
        assert_eq!(scale.swatches[11].step, 10);

        let values = scale.lstar_values();
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        assert_eq!(values[0], max);
        assert_eq!(values[11], min);
    }

    #[test]
    fn test_build_scale_sequential() {
        let numbering = NumberingOptions {
            mode: NumberingMode::Sequential,
            increment: 100,
        };
        let scale = build_scale(
            &ScaleConfig {
                swatch_count: 5,
                ..ScaleConfig::default()
            },
            &numbering,
            &SwatchOverrides::new(),
        );
        assert_eq!(scale.steps(), vec![100, 200, 300, 400, 500]);
    }

    #[test]
    fn test_build_scale_overrides_do_not_change_labels() {
        let config = ScaleConfig {
            swatch_count: 20,
            ..ScaleConfig::default()
        };
        let plain = build_scale(&config, &NumberingOptions::default(), &SwatchOverrides::new());

        let mut overrides = SwatchOverrides::new();
        overrides.set(4, Color::BLACK);
        let custom = build_scale(&config, &NumberingOptions::default(), &overrides);

        assert_eq!(plain.steps(), custom.steps());
        assert_eq!(custom.swatches[4].color, Color::BLACK);
        assert!(custom.swatches[4].is_custom);
    }

    #[test]
    fn test_build_scale_with_anchors_labels_ends() {
        let config = ScaleConfig {
            include_anchors: true,
            swatch_count: 18,
            ..ScaleConfig::default()
        };
        let scale = build_scale(&config, &NumberingOptions::default(), &SwatchOverrides::new());
        assert_eq!(scale.len(), 20);
        assert_eq!(scale.swatches[0].color, Color::WHITE);
        assert_eq!(scale.swatches[0].step, 98);
        assert_eq!(scale.swatches[19].color, Color::BLACK);
        assert_eq!(scale.swatches[19].step, 10);
    }
}
