//! Query result descriptor and the shape check run before every render.

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A dimension, measure or pivot field of the query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    /// Fully qualified field name, used as the row key
    pub name: String,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Spreadsheet-style number format (e.g. `$#,##0.00`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    /// Remaining host metadata, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Field {
    /// Field with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach a number format.
    #[must_use]
    pub fn with_value_format(mut self, format: impl Into<String>) -> Self {
        self.value_format = Some(format.into());
        self
    }
}

/// Field lists of a query result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFields {
    /// Dimensions and dimension-like table calculations, outermost first
    pub dimension_like: Vec<Field>,
    /// Measures and measure-like table calculations
    pub measure_like: Vec<Field>,
    /// Pivoted dimensions
    pub pivots: Vec<Field>,
}

/// Query result descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Field lists
    #[serde(default)]
    pub fields: QueryFields,
}

impl QueryResponse {
    /// Descriptor with the given dimensions and measures and no pivots.
    #[must_use]
    pub fn new(dimensions: Vec<Field>, measures: Vec<Field>) -> Self {
        Self {
            fields: QueryFields {
                dimension_like: dimensions,
                measure_like: measures,
                pivots: Vec::new(),
            },
        }
    }

    /// Dimension field names in order.
    #[must_use]
    pub fn dimension_names(&self) -> Vec<&str> {
        self.fields
            .dimension_like
            .iter()
            .map(|f| f.name.as_str())
            .collect()
    }

    /// The measure that sizes the chart.
    #[must_use]
    pub fn measure(&self) -> Option<&Field> {
        self.fields.measure_like.first()
    }

    /// Check field counts against `req`.
    pub fn validate(&self, req: &Requirements) -> Result<(), QueryError> {
        let f = &self.fields;
        check(
            f.pivots.len(),
            req.min_pivots,
            req.max_pivots,
            |min, found| QueryError::TooFewPivots { min, found },
            |max, found| QueryError::TooManyPivots { max, found },
        )?;
        check(
            f.dimension_like.len(),
            req.min_dimensions,
            req.max_dimensions,
            |min, found| QueryError::TooFewDimensions { min, found },
            |max, found| QueryError::TooManyDimensions { max, found },
        )?;
        check(
            f.measure_like.len(),
            req.min_measures,
            req.max_measures,
            |min, found| QueryError::TooFewMeasures { min, found },
            |max, found| QueryError::TooManyMeasures { max, found },
        )
    }
}

fn check(
    found: usize,
    min: usize,
    max: Option<usize>,
    too_few: impl FnOnce(usize, usize) -> QueryError,
    too_many: impl FnOnce(usize, usize) -> QueryError,
) -> Result<(), QueryError> {
    if found < min {
        return Err(too_few(min, found));
    }
    match max {
        Some(max) if found > max => Err(too_many(max, found)),
        _ => Ok(()),
    }
}

/// Allowed field counts; `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
    /// Minimum pivots
    pub min_pivots: usize,
    /// Maximum pivots
    pub max_pivots: Option<usize>,
    /// Minimum dimensions
    pub min_dimensions: usize,
    /// Maximum dimensions
    pub max_dimensions: Option<usize>,
    /// Minimum measures
    pub min_measures: usize,
    /// Maximum measures
    pub max_measures: Option<usize>,
}

impl Requirements {
    /// No pivots, at least one dimension, exactly one measure.
    pub const TREEMAP: Self = Self {
        min_pivots: 0,
        max_pivots: Some(0),
        min_dimensions: 1,
        max_dimensions: None,
        min_measures: 1,
        max_measures: Some(1),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(dims: usize, measures: usize, pivots: usize) -> QueryResponse {
        let fields = |prefix: &str, n: usize| {
            (0..n)
                .map(|i| Field::new(format!("{prefix}.{i}")))
                .collect::<Vec<_>>()
        };
        QueryResponse {
            fields: QueryFields {
                dimension_like: fields("dim", dims),
                measure_like: fields("measure", measures),
                pivots: fields("pivot", pivots),
            },
        }
    }

    #[test]
    fn test_treemap_accepts_valid_shapes() {
        assert!(query(1, 1, 0).validate(&Requirements::TREEMAP).is_ok());
        assert!(query(5, 1, 0).validate(&Requirements::TREEMAP).is_ok());
    }

    #[test]
    fn test_treemap_rejects_pivots() {
        assert_eq!(
            query(1, 1, 1).validate(&Requirements::TREEMAP),
            Err(QueryError::TooManyPivots { max: 0, found: 1 })
        );
    }

    #[test]
    fn test_treemap_rejects_missing_dimension() {
        assert_eq!(
            query(0, 1, 0).validate(&Requirements::TREEMAP),
            Err(QueryError::TooFewDimensions { min: 1, found: 0 })
        );
    }

    #[test]
    fn test_treemap_requires_exactly_one_measure() {
        assert_eq!(
            query(1, 0, 0).validate(&Requirements::TREEMAP),
            Err(QueryError::TooFewMeasures { min: 1, found: 0 })
        );
        assert_eq!(
            query(1, 2, 0).validate(&Requirements::TREEMAP),
            Err(QueryError::TooManyMeasures { max: 1, found: 2 })
        );
    }

    #[test]
    fn test_pivots_checked_first() {
        assert!(matches!(
            query(0, 0, 2).validate(&Requirements::TREEMAP),
            Err(QueryError::TooManyPivots { .. })
        ));
    }

    #[test]
    fn test_deserialize_host_descriptor() {
        let q: QueryResponse = serde_json::from_value(json!({
            "fields": {
                "dimension_like": [{"name": "users.country", "label": "Country"}],
                "measure_like": [{"name": "orders.total", "value_format": "$#,##0", "type": "sum"}]
            }
        }))
        .unwrap();
        assert_eq!(q.dimension_names(), ["users.country"]);
        let m = q.measure().unwrap();
        assert_eq!(m.value_format.as_deref(), Some("$#,##0"));
        assert_eq!(m.extra["type"], "sum");
        assert!(q.fields.pivots.is_empty());
    }
}
