//! Integration tests for canopy-layout.
//!
//! These tests drive rows through the hierarchy builder and the layout and
//! check the structural guarantees the chart relies on.

use canopy_core::{Rect, Size};
use canopy_layout::{build_hierarchy, HierarchyError, LayoutTree, Row, TreemapLayout};
use proptest::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

fn sales(row: &Row) -> Result<f64, HierarchyError> {
    row.measure("sales")
}

fn layout(rows: &[Row], dims: &[&str], width: f64, height: f64) -> LayoutTree {
    let root = build_hierarchy(rows, dims).unwrap();
    TreemapLayout::new(Size::new(width, height))
        .compute(&root, sales)
        .unwrap()
}

fn region_rows() -> Vec<Row> {
    let data = [
        ("EMEA", "DE", "Berlin", 40.0),
        ("EMEA", "DE", "Munich", 25.0),
        ("EMEA", "FR", "Paris", 30.0),
        ("AMER", "US", "NY", 55.0),
        ("AMER", "US", "LA", 35.0),
        ("AMER", "CA", "Toronto", 12.0),
        ("APAC", "JP", "Tokyo", 48.0),
        ("APAC", "AU", "Sydney", 9.0),
    ];
    data.iter()
        .map(|(region, country, city, v)| {
            Row::new()
                .with("region", *region)
                .with("country", *country)
                .with("city", *city)
                .with("sales", *v)
        })
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_single_row_single_dimension() {
    let rows = vec![Row::new().with("country", "US").with("sales", 10)];
    let tree = layout(&rows, &["country"], 300.0, 200.0);
    assert_eq!(tree.root().value, 10.0);
    assert_eq!(tree.len(), 2);
    let us = tree.node(1).unwrap();
    assert_eq!(us.name, "US");
    assert_eq!(us.depth, 1);
    assert_eq!(us.value, 10.0);
}

#[test]
fn test_two_cities_under_one_country() {
    let rows = vec![
        Row::new().with("country", "US").with("city", "NY").with("sales", 5),
        Row::new().with("country", "US").with("city", "LA").with("sales", 7),
    ];
    let tree = layout(&rows, &["country", "city"], 300.0, 200.0);
    let us = tree.node(1).unwrap();
    assert_eq!(us.value, 12.0);
    let kids: Vec<_> = us
        .children
        .iter()
        .map(|&c| {
            let n = tree.node(c).unwrap();
            (n.name.as_str(), n.value)
        })
        .collect();
    assert_eq!(kids, [("NY", 5.0), ("LA", 7.0)]);
}

#[test]
fn test_zero_rows_gives_bare_root() {
    let tree = layout(&[], &["country"], 300.0, 200.0);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().value, 0.0);
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().rect, Rect::new(0.0, 0.0, 300.0, 200.0));
}

#[test]
fn test_three_level_totals() {
    let rows = region_rows();
    let tree = layout(&rows, &["region", "country", "city"], 800.0, 600.0);
    let total: f64 = rows.iter().map(|r| r.measure("sales").unwrap()).sum();
    assert_eq!(tree.root().value, total);

    for node in tree.nodes() {
        if !node.is_leaf() {
            let sum: f64 = node
                .children
                .iter()
                .map(|&c| tree.node(c).unwrap().value)
                .sum();
            assert!((node.value - sum).abs() < 1e-9, "{}", node.name);
        }
    }
    for id in tree.leaves() {
        assert_eq!(tree.node(id).unwrap().depth, 3);
    }
}

#[test]
fn test_all_rectangles_are_integer_pixels() {
    let tree = layout(&region_rows(), &["region", "country", "city"], 640.0, 464.0);
    for node in tree.nodes() {
        let r = node.rect;
        for edge in [r.x0, r.y0, r.x1, r.y1] {
            assert_eq!(edge.fract(), 0.0);
        }
    }
}

#[test]
fn test_tiny_canvas_collapses_without_inverting() {
    let tree = layout(&region_rows(), &["region", "country", "city"], 6.0, 4.0);
    for node in tree.nodes() {
        assert!(node.rect.x1 >= node.rect.x0);
        assert!(node.rect.y1 >= node.rect.y0);
    }
}

#[test]
fn test_negative_height_canvas_collapses_root() {
    let tree = layout(&region_rows(), &["region"], 100.0, -10.0);
    assert_eq!(tree.root().rect.height(), 0.0);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_rectangles_nest(
        keys in prop::collection::vec((0u8..4, 0u8..3, 1u32..100), 1..40),
        width in 50.0f64..1200.0,
        height in 50.0f64..900.0
    ) {
        let rows: Vec<Row> = keys
            .iter()
            .map(|(a, b, v)| Row::new().with("a", *a).with("b", *b).with("sales", *v))
            .collect();
        let tree = layout(&rows, &["a", "b"], width, height);
        for node in tree.nodes() {
            prop_assert!(node.rect.x1 >= node.rect.x0);
            prop_assert!(node.rect.y1 >= node.rect.y0);
            // A parent shorter than its own header band has no room for
            // children; they collapse onto its content midline instead.
            if let Some(parent) = node.parent {
                let p = tree.node(parent).unwrap();
                let header = if p.depth == 1 { 16.0 } else { 0.0 };
                if p.rect.width() >= 2.0 && p.rect.height() >= header + 2.0 {
                    prop_assert!(
                        p.rect.contains_rect(&node.rect),
                        "{:?} not in {:?}", node.rect, p.rect
                    );
                }
            }
        }
    }

    #[test]
    fn prop_root_value_is_row_total(
        keys in prop::collection::vec((0u8..50, 0u32..1000), 0..40)
    ) {
        // Unique keys only: duplicates would overwrite each other.
        let mut seen = std::collections::HashSet::new();
        let rows: Vec<Row> = keys
            .iter()
            .filter(|(k, _)| seen.insert(*k))
            .map(|(k, v)| Row::new().with("k", *k).with("sales", *v))
            .collect();
        let tree = layout(&rows, &["k"], 400.0, 300.0);
        let expected: f64 = rows.iter().map(|r| r.measure("sales").unwrap()).sum();
        prop_assert_eq!(tree.root().value, expected);
    }
}
