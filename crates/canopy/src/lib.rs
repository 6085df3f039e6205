#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
//! Canopy: a hierarchical treemap chart.
//!
//! Rows are grouped by successive dimension values, laid out as nested
//! squarified rectangles sized by one measure, colored by top-level
//! category and drawn as a [`Scene`] with a hover breadcrumb.
//!
//! # Quick Start
//!
//! ```
//! use canopy::{Container, Field, QueryResponse, Row, TreemapChart, VisConfig};
//!
//! let query = QueryResponse::new(
//!     vec![Field::new("country"), Field::new("city")],
//!     vec![Field::new("sales")],
//! );
//! let rows = vec![
//!     Row::new().with("country", "US").with("city", "NY").with("sales", 5),
//!     Row::new().with("country", "US").with("city", "LA").with("sales", 7),
//! ];
//!
//! let container = Container::new(400.0, 300.0);
//! let mut chart = TreemapChart::create(container, VisConfig::default());
//! chart.update(&rows, container, &VisConfig::default(), &query).unwrap();
//!
//! // BFS order: root, US, NY, LA
//! chart.pointer_enter(2);
//! assert_eq!(chart.breadcrumb(), "US-NY: 5");
//! ```

pub mod chart;
pub mod config;
mod error;
pub mod format;
pub mod interaction;
pub mod palette;
pub mod query;
pub mod scene;

pub use chart::{render, Container, Render, TreemapChart};
pub use config::{definition, VisConfig, VisualizationDefinition, DEFAULT_COLOR_RANGE};
pub use error::{QueryError, RenderError};
pub use format::{NumberFormat, ValueFormatter};
pub use interaction::HoverState;
pub use palette::{category_index, color_for_ancestor_name, Fill};
pub use query::{Field, QueryResponse, Requirements};
pub use scene::Scene;

pub use canopy_core::{Color, Event, MouseButton, Point, Rect, Size};
pub use canopy_layout::{
    build_hierarchy, taxonomy_key, Cell, HierarchyError, LayoutNode, LayoutTree, NodeId, Row,
    TaxonomyKey, TreeNode, TreemapLayout,
};
