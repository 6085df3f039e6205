//! Tabular input rows as delivered by the query host.

use crate::error::HierarchyError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One field of a row: the raw value plus whatever display metadata the host
/// attached (`rendered`, `links`, `filterable_value`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Raw value
    #[serde(default)]
    pub value: Value,
    /// Host-rendered display text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
    /// Remaining host metadata, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Cell {
    /// Create a cell holding only a value.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            rendered: None,
            extra: BTreeMap::new(),
        }
    }

    /// The value as a grouping key.
    ///
    /// Strings are used as-is; numbers and booleans use their display form and
    /// null becomes `"null"`, so that `1` and `"1"` land in the same group.
    #[must_use]
    pub fn key(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_key(n),
            other => other.to_string(),
        }
    }

    /// The value as a number for aggregation.
    ///
    /// Numeric strings are parsed and booleans count as 1/0; anything that
    /// does not yield a finite number contributes 0.
    #[must_use]
    pub fn number(&self) -> f64 {
        let n = match &self.value {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Value::Bool(b) => f64::from(u8::from(*b)),
            _ => 0.0,
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }
}

/// Shortest display of a JSON number: `2024.0` and `2024` share the key `2024`.
fn number_key(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map_or_else(|| n.to_string(), |f| format!("{f}"))
    }
}

/// A data row: field name to [`Cell`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, Cell>,
}

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field holding `value`.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.insert(field.into(), Cell::new(value));
        self
    }

    /// Add a fully specified cell.
    #[must_use]
    pub fn with_cell(mut self, field: impl Into<String>, cell: Cell) -> Self {
        self.cells.insert(field.into(), cell);
        self
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Cell> {
        self.cells.get(field)
    }

    /// Look up a field that must be present.
    pub fn cell(&self, field: &str) -> Result<&Cell, HierarchyError> {
        self.get(field).ok_or_else(|| HierarchyError::missing(field))
    }

    /// Numeric value of a measure field.
    pub fn measure(&self, field: &str) -> Result<f64, HierarchyError> {
        self.cell(field).map(Cell::number)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
