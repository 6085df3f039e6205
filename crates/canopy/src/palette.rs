//! Fill and outline colors.
//!
//! Each top-level category takes a color from the configured range, cycling
//! when there are more categories than colors. Deeper nodes fade linearly
//! towards a neutral gray.

use canopy_core::Color;
use canopy_layout::{LayoutTree, NodeId};
use std::collections::HashMap;
use std::fmt;

/// Gray every fill fades towards.
pub const NEUTRAL: Color = Color::rgb(221.0, 221.0, 221.0);

/// Outline drawn around the hovered node and its ancestors.
pub const HIGHLIGHT: &str = "#fff";

/// Depth at which a fill equals its category color.
const FADE_START: f64 = 1.0;
/// Depth at which a fill reaches [`NEUTRAL`].
const FADE_END: f64 = 6.5;

/// Position of each name in first-seen order. Later duplicates keep the
/// first position.
#[must_use]
pub fn category_index<S: AsRef<str>>(names: &[S]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(names.len());
    for name in names {
        let next = index.len();
        index.entry(name.as_ref().to_string()).or_insert(next);
    }
    index
}

/// Range color for the top-level category `name`.
///
/// The slot is `name`'s entry in `index` (or `index.len()` when absent),
/// wrapped around the range. Returns `None` only for an empty range.
#[must_use]
pub fn color_for_ancestor_name<'a>(
    name: &str,
    color_range: &'a [String],
    index: &HashMap<String, usize>,
) -> Option<&'a str> {
    if color_range.is_empty() {
        return None;
    }
    let slot = index.get(name).copied().unwrap_or(index.len());
    Some(color_range[slot % color_range.len()].as_str())
}

/// Fill for a node at `depth` whose category color is `base`.
///
/// A missing base resolves to [`NEUTRAL`] at every depth.
#[must_use]
pub fn fill_for_depth(base: Option<Color>, depth: usize) -> Color {
    fade(base, depth as f64)
}

/// Linear fade from `base` at [`FADE_START`] to [`NEUTRAL`] at [`FADE_END`],
/// extrapolated outside that span.
fn fade(base: Option<Color>, depth: f64) -> Color {
    let t = (depth - FADE_START) / (FADE_END - FADE_START);
    base.map_or(NEUTRAL, |c| c.interpolate(&NEUTRAL, t))
}

/// Paint for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// Transparent
    None,
    /// Solid color
    Solid(Color),
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Solid(c) => f.write_str(&c.to_css()),
        }
    }
}

/// Category colors resolved for one laid-out tree.
#[derive(Debug, Clone)]
pub struct Palette {
    categories: Vec<String>,
    index: HashMap<String, usize>,
    colors: Vec<Option<Color>>,
}

impl Palette {
    /// Resolve a color for each of the root's children.
    ///
    /// Unparseable range entries are logged and fall back to [`NEUTRAL`].
    pub fn new(tree: &LayoutTree, color_range: &[String]) -> Self {
        let categories: Vec<String> = tree
            .root()
            .children
            .iter()
            .filter_map(|&id| tree.node(id))
            .map(|n| n.name.clone())
            .collect();

        if color_range.is_empty() && !categories.is_empty() {
            tracing::warn!("empty color range, filling every node with neutral gray");
        }

        let index = category_index(&categories);
        let colors = categories
            .iter()
            .map(|name| {
                let spec = color_for_ancestor_name(name, color_range, &index)?;
                match Color::parse(spec) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        tracing::warn!(color = spec, category = %name, error = %e, "unusable range color");
                        None
                    }
                }
            })
            .collect();

        Self {
            categories,
            index,
            colors,
        }
    }

    /// Top-level category names in color order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Base color of a category, if it resolved.
    #[must_use]
    pub fn category_color(&self, name: &str) -> Option<Color> {
        let slot = *self.index.get(name)?;
        self.colors.get(slot).copied().flatten()
    }

    /// Fill for node `id`. The root is unfilled.
    #[must_use]
    pub fn fill(&self, tree: &LayoutTree, id: NodeId) -> Fill {
        let Some(node) = tree.node(id) else {
            return Fill::None;
        };
        if node.depth == 0 {
            return Fill::None;
        }
        let base = tree
            .ancestor_at_depth(id, 1)
            .and_then(|a| tree.node(a))
            .and_then(|a| self.category_color(&a.name));
        Fill::Solid(fill_for_depth(base, node.depth))
    }
}
