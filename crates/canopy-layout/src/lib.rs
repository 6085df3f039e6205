#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::doc_markdown)]
//! Hierarchy construction and squarified treemap layout for Canopy.
//!
//! Two stages, both pure:
//!
//! - [`build_hierarchy`] groups flat [`Row`]s into a [`TreeNode`] tree keyed
//!   by successive dimension values.
//! - [`TreemapLayout::compute`] sums a measure over the tree and assigns
//!   every node a rectangle, producing a [`LayoutTree`].
//!
//! ```
//! use canopy_core::Size;
//! use canopy_layout::{build_hierarchy, Row, TreemapLayout};
//!
//! let rows = vec![
//!     Row::new().with("country", "US").with("sales", 10),
//!     Row::new().with("country", "CA").with("sales", 5),
//! ];
//! let root = build_hierarchy(&rows, &["country"]).unwrap();
//! let tree = TreemapLayout::new(Size::new(400.0, 300.0))
//!     .compute(&root, |row| row.measure("sales"))
//!     .unwrap();
//! assert_eq!(tree.root().value, 15.0);
//! ```

mod error;
mod hierarchy;
mod row;
pub mod squarify;
mod treemap;

pub use error::HierarchyError;
pub use hierarchy::{build_hierarchy, taxonomy_key, HierarchyBuilder, TaxonomyKey, TreeNode, ROOT_NAME};
pub use row::{Cell, Row};
pub use treemap::{LayoutNode, LayoutTree, NodeId, TreemapLayout};
