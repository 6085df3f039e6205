//! User-facing chart settings and the option schema advertised to the host.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Palette used when the host supplies no color range.
pub const DEFAULT_COLOR_RANGE: [&str; 8] = [
    "#dd3333", "#80ce5d", "#f78131", "#369dc1", "#c572d3", "#36c1b3", "#b57052", "#ed69af",
];

/// Chart settings chosen in the host's editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    /// Colors cycled across top-level categories
    pub color_range: Vec<String>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            color_range: DEFAULT_COLOR_RANGE.iter().map(ToString::to_string).collect(),
        }
    }
}

impl VisConfig {
    /// Settings with a custom color range.
    #[must_use]
    pub fn with_color_range<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            color_range: colors.into_iter().map(Into::into).collect(),
        }
    }
}

/// Editor widget type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// List of values
    Array,
    /// Free text
    String,
    /// Numeric input
    Number,
    /// Checkbox
    Boolean,
}

/// One configurable option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSpec {
    /// Widget type
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Display label
    pub label: String,
    /// Editor hint (e.g. `colors`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Default value
    pub default: Value,
}

/// Registration metadata for the treemap visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationDefinition {
    /// Stable identifier
    pub id: String,
    /// Human-readable name
    pub label: String,
    /// Options keyed by config field name
    pub options: BTreeMap<String, OptionSpec>,
}

/// The treemap's registration metadata.
#[must_use]
pub fn definition() -> VisualizationDefinition {
    let mut options = BTreeMap::new();
    options.insert(
        "color_range".to_string(),
        OptionSpec {
            kind: OptionType::Array,
            label: "Color Range".to_string(),
            display: Some("colors".to_string()),
            default: json!(DEFAULT_COLOR_RANGE),
        },
    );
    VisualizationDefinition {
        id: "treemap".to_string(),
        label: "Treemap".to_string(),
        options,
    }
}
