//! Hover state and the breadcrumb shown for the hovered node.

use crate::format::ValueFormatter;
use canopy_layout::{LayoutTree, NodeId};

/// Pointer hover state of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// Nothing hovered
    #[default]
    Idle,
    /// Pointer is over a node
    Hovering(NodeId),
}

impl HoverState {
    /// Hovered node, if any.
    #[must_use]
    pub const fn target(&self) -> Option<NodeId> {
        match self {
            Self::Idle => None,
            Self::Hovering(id) => Some(*id),
        }
    }

    /// Whether nothing is hovered.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// `"<a>-<b>-…: <value>"` for node `id`: names from the top-level category
/// down to the node, then its formatted value. The root contributes no name.
#[must_use]
pub fn breadcrumb_text(tree: &LayoutTree, id: NodeId, formatter: &ValueFormatter) -> Option<String> {
    let node = tree.node(id)?;
    let names: Vec<&str> = tree
        .path(id)
        .into_iter()
        .skip(1)
        .filter_map(|a| tree.node(a))
        .map(|n| n.name.as_str())
        .collect();
    Some(format!("{}: {}", names.join("-"), formatter.format(node.value)))
}
