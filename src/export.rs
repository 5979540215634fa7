//! Design-token export
//!
//! Writes generated scales as JSON design tokens:
//!
//! ```json
//! {
//!   "blue": {
//!     "98": { "value": "#f5f8ff", "type": "color" },
//!     "95": { "value": "#e8efff", "type": "color" }
//!   },
//!   "brand": { "value": "#facc15", "type": "color" }
//! }
//! ```
//!
//! Scales keep palette order and swatches keep scale order (lightest first),
//! so the object is serialized by hand rather than through a sorted map.

use crate::color::Color;
use crate::core::error::Result;
use crate::palette::NamedScale;
use crate::scale::Scale;
use log::info;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A single `{ "value", "type" }` token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorToken {
    pub value: String,
    #[serde(rename = "type")]
    pub token_type: &'static str,
}

impl ColorToken {
    pub fn new(color: Color) -> Self {
        Self {
            value: color.to_hex(),
            token_type: "color",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenGroup {
    Single(ColorToken),
    Steps(Vec<(i32, ColorToken)>),
}

impl Serialize for TokenGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TokenGroup::Single(token) => token.serialize(serializer),
            TokenGroup::Steps(steps) => {
                let mut map = serializer.serialize_map(Some(steps.len()))?;
                for (step, token) in steps {
                    map.serialize_entry(&step.to_string(), token)?;
                }
                map.end()
            }
        }
    }
}

/// Ordered token document for a set of scales
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenExport {
    groups: Vec<(String, TokenGroup)>,
}

impl TokenExport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from generated palette scales, in palette order
    pub fn from_scales(scales: &[NamedScale]) -> Self {
        let mut export = Self::new();
        for named in scales {
            if named.single {
                export.push_single(&named.name, named.key_color);
            } else {
                export.push_scale(&named.name, &named.scale);
            }
        }
        export
    }

    /// Add a full scale, one token per step label
    pub fn push_scale(&mut self, name: &str, scale: &Scale) {
        let steps = scale
            .iter()
            .map(|s| (s.step, ColorToken::new(s.color)))
            .collect();
        self.groups.push((name.to_string(), TokenGroup::Steps(steps)));
    }

    /// Add a single-color entry
    pub fn push_single(&mut self, name: &str, color: Color) {
        self.groups
            .push((name.to_string(), TokenGroup::Single(ColorToken::new(color))));
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the document to `path`, creating parent directories
    pub fn write_to(&self, path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut json = self.to_json(pretty)?;
        json.push('\n');
        fs::write(path, json)?;
        info!("Exported {} token group(s) to {}", self.len(), path.display());
        Ok(())
    }
}

impl Serialize for TokenExport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, group) in &self.groups {
            map.serialize_entry(name, group)?;
        }
        map.end()
    }
}
