//! Error types for the chart facade.

use canopy_layout::HierarchyError;
use thiserror::Error;

/// The query result does not have the shape the treemap needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Fewer pivots than required.
    #[error("This visualization requires {min} pivot(s), found {found}.")]
    TooFewPivots {
        /// Required minimum
        min: usize,
        /// Pivots present
        found: usize,
    },
    /// More pivots than allowed.
    #[error("This visualization requires no more than {max} pivot(s), found {found}.")]
    TooManyPivots {
        /// Allowed maximum
        max: usize,
        /// Pivots present
        found: usize,
    },
    /// Fewer dimensions than required.
    #[error("This visualization requires {min} dimension(s), found {found}.")]
    TooFewDimensions {
        /// Required minimum
        min: usize,
        /// Dimensions present
        found: usize,
    },
    /// More dimensions than allowed.
    #[error("This visualization requires no more than {max} dimension(s), found {found}.")]
    TooManyDimensions {
        /// Allowed maximum
        max: usize,
        /// Dimensions present
        found: usize,
    },
    /// Fewer measures than required.
    #[error("This visualization requires {min} measure(s), found {found}.")]
    TooFewMeasures {
        /// Required minimum
        min: usize,
        /// Measures present
        found: usize,
    },
    /// More measures than allowed.
    #[error("This visualization requires no more than {max} measure(s), found {found}.")]
    TooManyMeasures {
        /// Allowed maximum
        max: usize,
        /// Measures present
        found: usize,
    },
}

impl QueryError {
    /// Short headline suitable for an error overlay.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::TooFewPivots { .. } => "Not Enough Pivots",
            Self::TooManyPivots { .. } => "Too Many Pivots",
            Self::TooFewDimensions { .. } => "Not Enough Dimensions",
            Self::TooManyDimensions { .. } => "Too Many Dimensions",
            Self::TooFewMeasures { .. } => "Not Enough Measures",
            Self::TooManyMeasures { .. } => "Too Many Measures",
        }
    }
}

/// Errors that abort a render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Query shape rejected before any work was done.
    #[error("{title}: {0}", title = .0.title())]
    Query(#[from] QueryError),

    /// Rows did not match the query's fields.
    #[error("invalid data: {0}")]
    Data(#[from] HierarchyError),
}
