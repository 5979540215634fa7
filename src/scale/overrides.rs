//! Custom swatch overrides
//!
//! Overrides are keyed by swatch index, not by step label: labels are
//! recomputed whenever the count or numbering mode changes, indices are not.
//! Step labels are only derived from an applied scale for display and export.

use super::generator::Scale;
use crate::color::Color;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caller-chosen colors that replace generated swatches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwatchOverrides {
    entries: BTreeMap<usize, Color>,
}

/// One override as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Swatch index (0 = lightest)
    pub index: usize,
    /// Replacement color
    pub color: Color,
}

impl SwatchOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the override for a swatch index
    pub fn set(&mut self, index: usize, color: Color) -> Option<Color> {
        self.entries.insert(index, color)
    }

    /// Remove the override for one swatch, returning the custom color
    pub fn reset(&mut self, index: usize) -> Option<Color> {
        self.entries.remove(&index)
    }

    /// Remove every override
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.entries.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrite matching swatches and mark them custom
    ///
    /// Call after numbering. Entries past the end of `scale` are kept so
    /// they come back if the scale grows again.
    pub fn apply(&self, scale: &mut Scale) {
        for swatch in scale.swatches.iter_mut() {
            if let Some(color) = self.entries.get(&swatch.index) {
                swatch.color = *color;
                swatch.lstar = color.lstar();
                swatch.is_custom = true;
            }
        }

        let dormant = self
            .entries
            .keys()
            .filter(|&&i| i >= scale.len())
            .count();
        if dormant > 0 {
            debug!(
                "{} override(s) beyond a {}-swatch scale left dormant",
                dormant,
                scale.len()
            );
        }
    }

    /// Project onto the step labels of an already numbered scale
    pub fn by_step(&self, scale: &Scale) -> BTreeMap<i32, Color> {
        scale
            .iter()
            .filter_map(|s| self.entries.get(&s.index).map(|c| (s.step, *c)))
            .collect()
    }

    /// Entries in index order, for writing back to configuration
    pub fn to_entries(&self) -> Vec<OverrideEntry> {
        self.entries
            .iter()
            .map(|(&index, &color)| OverrideEntry { index, color })
            .collect()
    }
}

impl FromIterator<OverrideEntry> for SwatchOverrides {
    fn from_iter<I: IntoIterator<Item = OverrideEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|e| (e.index, e.color)).collect(),
        }
    }
}
