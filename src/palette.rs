//! Palettes of named scales
//!
//! A palette is a list of scale entries that share one set of default
//! shaping parameters and one numbering setting. An entry can take its key
//! color from another entry through a harmonize reference; references are
//! resolved in dependency order before any scale is generated.

use crate::color::Color;
use crate::core::error::{Result, ScaleError};
use crate::harmony::{harmonize, HarmonyMethod};
use crate::scale::{
    build_scale, generate_single, BezierPoints, NumberingOptions, OverrideEntry, Scale,
    ScaleConfig, SwatchOverrides,
};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Harmonize reference from one palette entry to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonizeFrom {
    /// Name of the entry whose key color acts as the base
    pub from: String,

    /// Transform name; unknown names act as `direct`
    #[serde(default)]
    pub method: HarmonyMethod,
}

/// One named scale in a palette
///
/// Shaping fields left unset inherit the palette defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Scale name, used as the export key
    pub name: String,

    /// Key color (for harmonized entries, the color whose hue is kept)
    pub key_color: Color,

    /// Emit only the key color instead of a full scale
    #[serde(default)]
    pub single: bool,

    /// Derive the key color from another entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmonize: Option<HarmonizeFrom>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lstar_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lstar_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_shift_dark: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_shift_light: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bezier: Option<BezierPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swatch_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_anchors: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_key_color: Option<bool>,

    /// Custom swatch colors by index
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<OverrideEntry>,
}

impl PaletteEntry {
    /// Entry with the given name and key color, inheriting everything else
    pub fn new(name: impl Into<String>, key_color: Color) -> Self {
        Self {
            name: name.into(),
            key_color,
            single: false,
            harmonize: None,
            lstar_min: None,
            lstar_max: None,
            saturation_min: None,
            saturation_max: None,
            hue_shift_dark: None,
            hue_shift_light: None,
            bezier: None,
            swatch_count: None,
            include_anchors: None,
            lock_key_color: None,
            overrides: Vec::new(),
        }
    }

    /// Builder: derive the key color from another entry
    pub fn harmonized_from(mut self, from: impl Into<String>, method: HarmonyMethod) -> Self {
        self.harmonize = Some(HarmonizeFrom {
            from: from.into(),
            method,
        });
        self
    }

    /// Builder: single-color entry
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Merge this entry over `defaults` with the resolved key color
    pub fn scale_config(&self, defaults: &ScaleConfig, key_color: Color) -> ScaleConfig {
        ScaleConfig {
            key_color,
            lstar_min: self.lstar_min.unwrap_or(defaults.lstar_min),
            lstar_max: self.lstar_max.unwrap_or(defaults.lstar_max),
            saturation_min: self.saturation_min.unwrap_or(defaults.saturation_min),
            saturation_max: self.saturation_max.unwrap_or(defaults.saturation_max),
            hue_shift_dark: self.hue_shift_dark.unwrap_or(defaults.hue_shift_dark),
            hue_shift_light: self.hue_shift_light.unwrap_or(defaults.hue_shift_light),
            bezier: self.bezier.unwrap_or(defaults.bezier),
            swatch_count: self.swatch_count.unwrap_or(defaults.swatch_count),
            include_anchors: self.include_anchors.unwrap_or(defaults.include_anchors),
            lock_key_color: self.lock_key_color.unwrap_or(defaults.lock_key_color),
        }
    }
}

/// A generated scale with its name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedScale {
    pub name: String,
    pub key_color: Color,
    pub single: bool,
    pub scale: Scale,
}

/// Named scales sharing defaults and numbering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    pub defaults: ScaleConfig,
    pub numbering: NumberingOptions,
    pub entries: Vec<PaletteEntry>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

impl Palette {
    pub fn new(defaults: ScaleConfig, numbering: NumberingOptions, entries: Vec<PaletteEntry>) -> Self {
        Self {
            defaults,
            numbering,
            entries,
        }
    }

    /// Final key color of every entry, in entry order
    ///
    /// Fails on duplicate names, references to unknown entries, and
    /// reference cycles.
    pub fn resolve_key_colors(&self) -> Result<Vec<Color>> {
        let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            if by_name.insert(entry.name.as_str(), i).is_some() {
                return Err(ScaleError::DuplicateScale(entry.name.clone()));
            }
        }

        let mut resolved: Vec<Option<Color>> = vec![None; self.entries.len()];
        let mut state: Vec<Option<Visit>> = vec![None; self.entries.len()];

        for i in 0..self.entries.len() {
            self.resolve_one(i, &by_name, &mut resolved, &mut state)?;
        }

        Ok(resolved.into_iter().flatten().collect())
    }

    fn resolve_one(
        &self,
        i: usize,
        by_name: &HashMap<&str, usize>,
        resolved: &mut [Option<Color>],
        state: &mut [Option<Visit>],
    ) -> Result<Color> {
        match state[i] {
            Some(Visit::Done) => {
                if let Some(color) = resolved[i] {
                    return Ok(color);
                }
            }
            Some(Visit::InProgress) => {
                return Err(ScaleError::HarmonizeCycle(self.entries[i].name.clone()));
            }
            None => {}
        }

        state[i] = Some(Visit::InProgress);
        let entry = &self.entries[i];

        let color = match &entry.harmonize {
            None => entry.key_color,
            Some(reference) => {
                let base_index = *by_name
                    .get(reference.from.as_str())
                    .ok_or_else(|| ScaleError::UnknownScale(reference.from.clone()))?;
                let base = self.resolve_one(base_index, by_name, resolved, state)?;
                let color = harmonize(base, entry.key_color, reference.method);
                debug!(
                    "Harmonized '{}' from '{}' ({}): {} -> {}",
                    entry.name, reference.from, reference.method, entry.key_color, color
                );
                color
            }
        };

        resolved[i] = Some(color);
        state[i] = Some(Visit::Done);
        Ok(color)
    }

    /// Generate every scale
    ///
    /// Key colors are resolved first; the scales themselves are independent
    /// and are generated in parallel.
    pub fn generate(&self) -> Result<Vec<NamedScale>> {
        let keys = self.resolve_key_colors()?;

        let scales: Vec<NamedScale> = self
            .entries
            .par_iter()
            .zip(keys.par_iter())
            .map(|(entry, &key_color)| {
                let scale = if entry.single {
                    generate_single(key_color)
                } else {
                    let config = entry.scale_config(&self.defaults, key_color);
                    let overrides: SwatchOverrides = entry.overrides.iter().copied().collect();
                    build_scale(&config, &self.numbering, &overrides)
                };

                NamedScale {
                    name: entry.name.clone(),
                    key_color,
                    single: entry.single,
                    scale,
                }
            })
            .collect();

        info!("Generated {} scale(s)", scales.len());
        Ok(scales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsl;

    fn blue() -> Color {
        Color::from_rgb(0x3b, 0x82, 0xf6)
    }

    #[test]
    fn test_entry_inherits_defaults() {
        let defaults = ScaleConfig::default();
        let mut entry = PaletteEntry::new("blue", blue());
        entry.swatch_count = Some(5);
        entry.hue_shift_dark = Some(12.0);

        let config = entry.scale_config(&defaults, blue());
        assert_eq!(config.swatch_count, 5);
        assert_eq!(config.hue_shift_dark, 12.0);
        assert_eq!(config.lstar_min, defaults.lstar_min);
        assert_eq!(config.bezier, defaults.bezier);
    }

    #[test]
    fn test_generate_preserves_entry_order() {
        let palette = Palette::new(
            ScaleConfig::default(),
            NumberingOptions::default(),
            vec![
                PaletteEntry::new("blue", blue()),
                PaletteEntry::new("brand", Color::from_rgb(250, 204, 21)).single(),
                PaletteEntry::new("red", Color::from_rgb(239, 68, 68)),
            ],
        );

        let scales = palette.generate().unwrap();
        let names: Vec<&str> = scales.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["blue", "brand", "red"]);
        assert_eq!(scales[0].scale.len(), 12);
        assert_eq!(scales[1].scale.len(), 1);
        assert!(scales[1].single);
    }

    #[test]
    fn test_harmonize_reference_resolves_in_dependency_order() {
        let base = Color::from_hsl(Hsl::new(0.0, 0.8, 0.5));
        let target = Color::from_hsl(Hsl::new(200.0, 0.3, 0.3));

        // The dependent entry comes first on purpose
        let palette = Palette::new(
            ScaleConfig::default(),
            NumberingOptions::default(),
            vec![
                PaletteEntry::new("sky", target).harmonized_from("red", HarmonyMethod::Complementary),
                PaletteEntry::new("red", base),
            ],
        );

        let keys = palette.resolve_key_colors().unwrap();
        assert_eq!(keys[0], harmonize(base, target, HarmonyMethod::Complementary));
        assert_eq!(keys[1], base);
    }

    #[test]
    fn test_harmonize_chain() {
        let palette = Palette::new(
            ScaleConfig::default(),
            NumberingOptions::default(),
            vec![
                PaletteEntry::new("a", blue()),
                PaletteEntry::new("b", Color::from_rgb(16, 185, 129))
                    .harmonized_from("a", HarmonyMethod::Analogous),
                PaletteEntry::new("c", Color::from_rgb(239, 68, 68))
                    .harmonized_from("b", HarmonyMethod::Monochromatic),
            ],
        );
        let keys = palette.resolve_key_colors().unwrap();
        let b = harmonize(blue(), Color::from_rgb(16, 185, 129), HarmonyMethod::Analogous);
        assert_eq!(keys[1], b);
        assert_eq!(
            keys[2],
            harmonize(b, Color::from_rgb(239, 68, 68), HarmonyMethod::Monochromatic)
        );
    }

    #[test]
    fn test_unknown_reference_is_error() {
        let palette = Palette::new(
            ScaleConfig::default(),
            NumberingOptions::default(),
            vec![PaletteEntry::new("a", blue()).harmonized_from("ghost", HarmonyMethod::Direct)],
        );
        assert!(matches!(
            palette.generate(),
            Err(ScaleError::UnknownScale(ref name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_cycle_is_error() {
        let palette = Palette::new(
            ScaleConfig::default(),
            NumberingOptions::default(),
            vec![
                PaletteEntry::new("a", blue()).harmonized_from("b", HarmonyMethod::Direct),
                PaletteEntry::new("b", blue()).harmonized_from("a", HarmonyMethod::Direct),
            ],
        );
        assert!(matches!(palette.resolve_key_colors(), Err(ScaleError::HarmonizeCycle(_))));
    }

    #[test]
    fn test_duplicate_name_is_error() {
        let palette = Palette::new(
            ScaleConfig::default(),
            NumberingOptions::default(),
            vec![PaletteEntry::new("a", blue()), PaletteEntry::new("a", blue())],
        );
        assert!(matches!(palette.resolve_key_colors(), Err(ScaleError::DuplicateScale(_))));
    }

    #[test]
    fn test_entry_overrides_applied() {
        let mut entry = PaletteEntry::new("blue", blue());
        entry.overrides.push(OverrideEntry {
            index: 1,
            color: Color::from_rgb(1, 2, 3),
        });
        let palette = Palette::new(ScaleConfig::default(), NumberingOptions::default(), vec![entry]);

        let scales = palette.generate().unwrap();
        let swatch = scales[0].scale.swatches[1];
        assert_eq!(swatch.color, Color::from_rgb(1, 2, 3));
        assert!(swatch.is_custom);
        assert_eq!(swatch.step, 95);
    }
}
