//! Step numbering
//!
//! Turns a scale's L* values into unique integer labels. Sequential mode is
//! a plain multiple of an increment. Lightness mode picks labels that read
//! like the lightness itself (98, 95, 90 … 10): small scales use hand-tuned
//! tables, larger ones a priority-ordered rounding pass.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How step labels are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingMode {
    /// `(i + 1) * increment`
    Sequential,
    /// Labels that track each swatch's L*
    #[default]
    Lightness,
}

impl fmt::Display for NumberingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Lightness => write!(f, "lightness"),
        }
    }
}

impl FromStr for NumberingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "lightness" | "lstar" => Ok(Self::Lightness),
            other => Err(format!(
                "unknown numbering mode '{}': expected sequential or lightness",
                other
            )),
        }
    }
}

/// Numbering settings shared by every scale of a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberingOptions {
    /// Label derivation
    pub mode: NumberingMode,

    /// Step between sequential labels
    pub increment: i32,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            mode: NumberingMode::Lightness,
            increment: 100,
        }
    }
}

/// Largest count served by a fixed table
pub const MAX_TABLE_COUNT: usize = 15;

/// Decades claimed in the first rounding pass, in priority order
const DECADES: [i32; 8] = [90, 80, 70, 60, 50, 40, 30, 20];

/// Furthest a swatch may sit from a decade and still claim it
const DECADE_REACH: f64 = 7.0;

/// Hand-tuned labels for small scales, lightest first
fn table_labels(count: usize) -> Option<&'static [i32]> {
    let table: &'static [i32] = match count {
        1 => &[50],
        2 => &[90, 10],
        3 => &[90, 50, 10],
        4 => &[90, 70, 30, 10],
        5 => &[90, 70, 50, 30, 10],
        6 => &[95, 80, 60, 40, 20, 10],
        7 => &[95, 80, 65, 50, 35, 20, 10],
        8 => &[95, 90, 75, 60, 45, 30, 20, 10],
        9 => &[95, 90, 80, 70, 60, 50, 40, 25, 10],
        10 => &[95, 90, 80, 70, 60, 50, 40, 30, 20, 10],
        11 => &[98, 95, 90, 80, 70, 60, 50, 40, 30, 20, 10],
        12 => &[98, 95, 90, 80, 70, 60, 50, 40, 30, 20, 15, 10],
        13 => &[98, 95, 90, 85, 80, 70, 60, 50, 40, 30, 20, 15, 10],
        14 => &[98, 95, 90, 85, 80, 70, 60, 50, 40, 30, 25, 20, 15, 10],
        15 => &[98, 95, 90, 85, 80, 75, 70, 60, 50, 40, 30, 25, 20, 15, 10],
        _ => return None,
    };
    Some(table)
}

/// Assign one label per L* value
///
/// The result has the same length as `lstar_values` and never contains a
/// duplicate. In lightness mode with more than [`MAX_TABLE_COUNT`] values
/// the first and last labels are `round(lstar_max)` and `round(lstar_min)`.
pub fn assign_labels(
    lstar_values: &[f64],
    mode: NumberingMode,
    lstar_min: f64,
    lstar_max: f64,
    increment: i32,
) -> Vec<i32> {
    match mode {
        NumberingMode::Sequential => sequential_labels(lstar_values.len(), increment),
        NumberingMode::Lightness => match table_labels(lstar_values.len()) {
            Some(table) => table.to_vec(),
            None if lstar_values.is_empty() => Vec::new(),
            None => lightness_labels(lstar_values, lstar_min, lstar_max),
        },
    }
}

/// `(i + 1) * increment`, with `increment` clamped so the last label fits in an `i32`
fn sequential_labels(count: usize, increment: i32) -> Vec<i32> {
    let count = count.min(i32::MAX as usize) as i32;
    let max_increment = i32::MAX / count.max(1);
    let increment = increment.clamp(1, max_increment);
    (1..=count).map(|i| i * increment).collect()
}

/// Closest unused integer to `base`, probing +1, −1, +2, −2, …
///
/// Terminates within `used.len() + 1` probes on each side.
fn nearest_free_label(base: i32, used: &HashSet<i32>) -> i32 {
    let mut distance = 0;
    loop {
        if !used.contains(&(base + distance)) {
            return base + distance;
        }
        if distance > 0 && !used.contains(&(base - distance)) {
            return base - distance;
        }
        distance += 1;
    }
}

fn lightness_labels(values: &[f64], lstar_min: f64, lstar_max: f64) -> Vec<i32> {
    let n = values.len();
    let mut labels: Vec<Option<i32>> = vec![None; n];
    let mut used: HashSet<i32> = HashSet::with_capacity(n);

    // Pass 1: anchor the ends to the range bounds
    let first = lstar_max.round() as i32;
    labels[0] = Some(first);
    used.insert(first);
    if n > 1 {
        let last = nearest_free_label(lstar_min.round() as i32, &used);
        labels[n - 1] = Some(last);
        used.insert(last);
    }

    let interior = 1..n.saturating_sub(1);

    // Pass 2: each decade goes to the nearest unassigned swatch within reach
    for decade in DECADES {
        if used.contains(&decade) {
            continue;
        }
        let nearest = interior
            .clone()
            .filter(|&i| labels[i].is_none())
            .map(|i| (i, (values[i] - decade as f64).abs()))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((i, d)),
            });

        if let Some((i, distance)) = nearest {
            if distance <= DECADE_REACH {
                labels[i] = Some(decade);
                used.insert(decade);
            }
        }
    }

    // Pass 3: nearest multiple of five
    for i in interior.clone() {
        if labels[i].is_some() {
            continue;
        }
        let five = ((values[i] / 5.0).round() * 5.0) as i32;
        if !used.contains(&five) {
            labels[i] = Some(five);
            used.insert(five);
        }
    }

    // Pass 4: nearest free integer
    for i in interior {
        if labels[i].is_some() {
            continue;
        }
        let base = values[i].round() as i32;
        let label = nearest_free_label(base, &used);
        if label != base {
            trace!("L* {:.2} collided at {}, labelled {}", values[i], base, label);
        }
        labels[i] = Some(label);
        used.insert(label);
    }

    labels.into_iter().flatten().collect()
}
