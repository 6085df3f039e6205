//! Hierarchy builder: flat rows to a tree keyed by successive dimension values.
//!
//! Each row's [`TaxonomyKey`] is its path from the root. Grouping nodes are
//! created the first time a key segment is seen at a level and reused after
//! that, so sibling order is first-seen order rather than sorted order. The
//! row itself is stored in a dedicated slot on the terminal node; a dimension
//! value can never collide with it.

use crate::error::HierarchyError;
use crate::row::{Cell, Row};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Name of the synthetic root node.
pub const ROOT_NAME: &str = "root";

/// A row's path from the root: one value per dimension, in dimension order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxonomyKey(Vec<String>);

impl TaxonomyKey {
    /// Key segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for TaxonomyKey {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

/// Extract the taxonomy key of `row` for the given dimension fields.
pub fn taxonomy_key<S: AsRef<str>>(
    row: &Row,
    dimensions: &[S],
) -> Result<TaxonomyKey, HierarchyError> {
    dimensions
        .iter()
        .map(|dim| row.cell(dim.as_ref()).map(Cell::key))
        .collect::<Result<Vec<_>, _>>()
        .map(TaxonomyKey)
}

/// A node of the grouped tree.
///
/// Exactly the nodes at depth `dimensions.len()` carry `data`; every other
/// node only aggregates its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    /// Dimension value (or `"root"`)
    pub name: String,
    /// Distance from the root
    pub depth: usize,
    /// Children in first-seen order
    pub children: Vec<TreeNode>,
    /// Row attached to a terminal node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Row>,
}

impl TreeNode {
    /// Check if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follow a path of names below this node.
    #[must_use]
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Self> {
        path.iter()
            .try_fold(self, |node, name| node.child(name.as_ref()))
    }

    /// All nodes in breadth-first order, starting with `self`.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([self]);
        while let Some(node) = queue.pop_front() {
            out.push(node);
            queue.extend(node.children.iter());
        }
        out
    }

    /// Nodes carrying a row.
    #[must_use]
    pub fn data_nodes(&self) -> Vec<&Self> {
        self.descendants()
            .into_iter()
            .filter(|n| n.data.is_some())
            .collect()
    }
}

/// Mutable grouping node used while rows are inserted.
#[derive(Debug, Default)]
struct GroupNode {
    name: String,
    children: Vec<GroupNode>,
    index: HashMap<String, usize>,
    row: Option<Row>,
}

impl GroupNode {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn child_mut(&mut self, key: &str) -> &mut Self {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.children.push(Self::named(key));
                let idx = self.children.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.children[idx]
    }

    fn into_tree(self, depth: usize) -> TreeNode {
        TreeNode {
            name: self.name,
            depth,
            children: self
                .children
                .into_iter()
                .map(|c| c.into_tree(depth + 1))
                .collect(),
            data: self.row,
        }
    }
}

/// Incremental tree builder.
#[derive(Debug)]
pub struct HierarchyBuilder {
    dimensions: Vec<String>,
    root: GroupNode,
    rows: usize,
}

impl HierarchyBuilder {
    /// Create a builder grouping by `dimensions`, outermost first.
    pub fn new<S: AsRef<str>>(dimensions: &[S]) -> Result<Self, HierarchyError> {
        if dimensions.is_empty() {
            return Err(HierarchyError::NoDimensions);
        }
        Ok(Self {
            dimensions: dimensions.iter().map(|d| d.as_ref().to_string()).collect(),
            root: GroupNode::named(ROOT_NAME),
            rows: 0,
        })
    }

    /// Insert a row along its taxonomy key.
    ///
    /// A later row with the same full key replaces the stored row.
    pub fn insert(&mut self, row: &Row) -> Result<(), HierarchyError> {
        let key = taxonomy_key(row, &self.dimensions)?;
        let terminal = key
            .segments()
            .iter()
            .fold(&mut self.root, |node, segment| node.child_mut(segment));
        terminal.row = Some(row.clone());
        self.rows += 1;
        Ok(())
    }

    /// Number of rows inserted so far, duplicates included.
    #[must_use]
    pub fn rows_inserted(&self) -> usize {
        self.rows
    }

    /// Finish and return the root node (depth 0).
    #[must_use]
    pub fn build(self) -> TreeNode {
        self.root.into_tree(0)
    }
}

/// Group `rows` into a tree by `dimensions`.
pub fn build_hierarchy<S: AsRef<str>>(
    rows: &[Row],
    dimensions: &[S],
) -> Result<TreeNode, HierarchyError> {
    let mut builder = HierarchyBuilder::new(dimensions)?;
    for row in rows {
        builder.insert(row)?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(country: &str, city: &str, sales: f64) -> Row {
        Row::new()
            .with("country", country)
            .with("city", city)
            .with("sales", sales)
    }

    #[test]
    fn test_single_dimension() {
        let rows = vec![Row::new().with("country", "US").with("sales", 10)];
        let root = build_hierarchy(&rows, &["country"]).unwrap();
        assert_eq!(root.name, ROOT_NAME);
        assert_eq!(root.depth, 0);
        assert!(root.data.is_none());
        assert_eq!(root.children.len(), 1);
        let us = &root.children[0];
        assert_eq!(us.name, "US");
        assert_eq!(us.depth, 1);
        assert!(us.data.is_some());
    }

    #[test]
    fn test_children_keep_first_seen_order() {
        let rows = vec![
            row("US", "NY", 5.0),
            row("CA", "Toronto", 3.0),
            row("US", "LA", 7.0),
            row("BR", "Rio", 1.0),
        ];
        let root = build_hierarchy(&rows, &["country", "city"]).unwrap();
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["US", "CA", "BR"]);
        let us_cities: Vec<_> = root.children[0]
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(us_cities, ["NY", "LA"]);
    }

    #[test]
    fn test_numeric_keys_are_not_reordered() {
        let rows = vec![
            Row::new().with("year", 2020).with("v", 1),
            Row::new().with("year", 2019).with("v", 1),
            Row::new().with("year", "b").with("v", 1),
            Row::new().with("year", 1).with("v", 1),
        ];
        let root = build_hierarchy(&rows, &["year"]).unwrap();
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["2020", "2019", "b", "1"]);
    }

    #[test]
    fn test_integral_float_and_integer_share_group() {
        let rows: Vec<Row> = serde_json::from_value(serde_json::json!([
            {"k": {"value": 2024.0}, "v": {"value": 1}},
            {"k": {"value": 2024}, "j": {"value": "x"}, "v": {"value": 2}}
        ]))
        .unwrap();
        let root = build_hierarchy(&rows, &["k"]).unwrap();
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["2024"]);
    }

    #[test]
    fn test_duplicate_full_key_keeps_last_row() {
        let rows = vec![row("US", "NY", 5.0), row("US", "NY", 9.0)];
        let root = build_hierarchy(&rows, &["country", "city"]).unwrap();
        let ny = root.find(&["US", "NY"]).unwrap();
        let kept = ny.data.as_ref().unwrap();
        assert_eq!(kept.measure("sales").unwrap(), 9.0);
        assert_eq!(root.data_nodes().len(), 1);
    }

    #[test]
    fn test_payload_slot_does_not_collide_with_key() {
        let rows = vec![
            row("__data", "data", 1.0),
            row("US", "__data", 2.0),
        ];
        let root = build_hierarchy(&rows, &["country", "city"]).unwrap();
        assert_eq!(root.children.len(), 2);
        assert!(root.find(&["__data", "data"]).unwrap().data.is_some());
        assert!(root.find(&["US", "__data"]).unwrap().data.is_some());
        assert!(root.children[0].data.is_none());
    }

    #[test]
    fn test_zero_rows() {
        let root = build_hierarchy(&[], &["country"]).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.descendants().len(), 1);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let dims: [&str; 0] = [];
        assert_eq!(
            build_hierarchy(&[], &dims).unwrap_err(),
            HierarchyError::NoDimensions
        );
    }

    #[test]
    fn test_missing_dimension_field() {
        let rows = vec![Row::new().with("country", "US")];
        let err = build_hierarchy(&rows, &["country", "city"]).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::MissingField {
                field: "city".to_string()
            }
        );
    }

    #[test]
    fn test_taxonomy_key() {
        let key = taxonomy_key(&row("US", "NY", 1.0), &["city", "country"]).unwrap();
        assert_eq!(key.segments(), ["NY", "US"]);
        assert_eq!(key.len(), 2);
    }

    #[test]
    fn test_descendants_breadth_first() {
        let rows = vec![row("US", "NY", 5.0), row("CA", "Toronto", 3.0)];
        let root = build_hierarchy(&rows, &["country", "city"]).unwrap();
        let names: Vec<_> = root
            .descendants()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, ["root", "US", "CA", "NY", "Toronto"]);
    }

    #[test]
    fn test_builder_counts_duplicates() {
        let mut builder = HierarchyBuilder::new(&["country"]).unwrap();
        builder.insert(&Row::new().with("country", "US")).unwrap();
        builder.insert(&Row::new().with("country", "US")).unwrap();
        assert_eq!(builder.rows_inserted(), 2);
        assert_eq!(builder.build().children.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_data_nodes_sit_at_dimension_depth(
            keys in prop::collection::vec((0u8..4, 0u8..4, 0u8..4), 0..40)
        ) {
            let rows: Vec<Row> = keys
                .iter()
                .map(|(a, b, c)| Row::new().with("a", *a).with("b", *b).with("c", *c))
                .collect();
            let root = build_hierarchy(&rows, &["a", "b", "c"]).unwrap();
            for node in root.descendants() {
                prop_assert_eq!(node.data.is_some(), node.depth == 3);
                for child in &node.children {
                    prop_assert_eq!(child.depth, node.depth + 1);
                }
            }
        }

        #[test]
        fn prop_build_is_deterministic(
            keys in prop::collection::vec((0u8..5, 0u8..5), 0..30)
        ) {
            let rows: Vec<Row> = keys
                .iter()
                .map(|(a, b)| Row::new().with("a", *a).with("b", *b))
                .collect();
            let first = build_hierarchy(&rows, &["a", "b"]).unwrap();
            let second = build_hierarchy(&rows, &["a", "b"]).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
