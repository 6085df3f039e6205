//! Error types for hierarchy construction and layout.

use thiserror::Error;

/// Errors raised while turning rows into a laid-out tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// At least one dimension is required to group rows.
    #[error("at least one dimension is required")]
    NoDimensions,

    /// A row lacks a field the chart was configured with.
    #[error("row is missing field '{field}'")]
    MissingField {
        /// Missing field name
        field: String,
    },
}

impl HierarchyError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}
