//! Treemap layout: value aggregation, padding and pixel snapping on top of
//! [`squarify`](crate::squarify::squarify).
//!
//! The tree is flattened into an arena in breadth-first order, which is also
//! the draw order: a node's index is its position in the rendered document,
//! and later nodes paint over earlier ones.

use crate::error::HierarchyError;
use crate::hierarchy::TreeNode;
use crate::row::Row;
use crate::squarify::squarify;
use canopy_core::{Point, Rect, Size};
use serde::Serialize;
use std::collections::VecDeque;

/// Index of a node in a [`LayoutTree`].
pub type NodeId = usize;

/// A tree node with its computed rectangle and aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// Dimension value (or `"root"`)
    pub name: String,
    /// Distance from the root
    pub depth: usize,
    /// Measure summed over this node and all descendants
    pub value: f64,
    /// Computed bounds
    pub rect: Rect,
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
    /// Children in tree order
    pub children: Vec<NodeId>,
    /// Row attached to a terminal node
    #[serde(skip)]
    pub data: Option<Row>,
}

impl LayoutNode {
    /// Check if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Laid-out tree, nodes stored breadth-first with the root at index 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
    size: Size,
}

impl LayoutTree {
    /// Root node id.
    pub const ROOT: NodeId = 0;

    /// Get a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> &LayoutNode {
        &self.nodes[Self::ROOT]
    }

    /// All nodes in draw order.
    #[must_use]
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A layout always holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Canvas size the layout was computed for.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Ancestor chain from `id` up to the root, `id` first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.nodes.get(id).map(|_| id);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.nodes[current].parent;
        }
        chain
    }

    /// Path from the root down to `id`, root first.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = self.ancestors(id);
        chain.reverse();
        chain
    }

    /// Ancestor of `id` at `depth`, if `id` is at least that deep.
    #[must_use]
    pub fn ancestor_at_depth(&self, id: NodeId, depth: usize) -> Option<NodeId> {
        self.ancestors(id)
            .into_iter()
            .find(|&a| self.nodes[a].depth == depth)
    }

    /// Topmost node whose rectangle contains `point`.
    ///
    /// Later nodes in draw order sit on top, so the last match wins.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rposition(|n| n.rect.contains_point(&point))
    }

    /// Ids of nodes without children.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&id| self.nodes[id].is_leaf())
            .collect()
    }
}

/// Treemap layout parameters.
///
/// Padding mirrors a box model: every node with children reserves `outer`
/// on its left, right and bottom edges and a top band of `header` pixels
/// when it sits at `header_depth` (zero at every other depth). Siblings are
/// separated by `inner`, split evenly between the two neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreemapLayout {
    size: Size,
    ratio: f64,
    inner: f64,
    outer: f64,
    header: f64,
    header_depth: usize,
    round: bool,
}

impl Default for TreemapLayout {
    fn default() -> Self {
        Self {
            size: Size::new(1.0, 1.0),
            ratio: 1.0,
            inner: 1.0,
            outer: 1.0,
            header: 16.0,
            header_depth: 1,
            round: true,
        }
    }
}

impl TreemapLayout {
    /// Create a layout for a canvas of the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Set the target aspect ratio of tiles.
    #[must_use]
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Set the gap between siblings.
    #[must_use]
    pub fn with_inner_padding(mut self, inner: f64) -> Self {
        self.inner = inner;
        self
    }

    /// Set the left/right/bottom padding of parents.
    #[must_use]
    pub fn with_outer_padding(mut self, outer: f64) -> Self {
        self.outer = outer;
        self
    }

    /// Reserve a top band of `height` pixels on nodes at `depth`.
    #[must_use]
    pub fn with_header(mut self, height: f64, depth: usize) -> Self {
        self.header = height;
        self.header_depth = depth;
        self
    }

    /// Toggle snapping to integer pixels.
    #[must_use]
    pub fn with_rounding(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Canvas size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    fn padding_top(&self, depth: usize) -> f64 {
        if depth == self.header_depth {
            self.header
        } else {
            0.0
        }
    }

    /// Lay out `root`, sizing nodes by `measure` applied to each attached row.
    pub fn compute<F>(&self, root: &TreeNode, measure: F) -> Result<LayoutTree, HierarchyError>
    where
        F: Fn(&Row) -> Result<f64, HierarchyError>,
    {
        let mut nodes = flatten(root);

        // Sum bottom-up: children always come after their parent. Children
        // are added last to first.
        for id in (0..nodes.len()).rev() {
            let own = match &nodes[id].data {
                Some(row) => measure(row)?,
                None => 0.0,
            };
            let total = nodes[id]
                .children
                .iter()
                .rev()
                .fold(own, |acc, &c| acc + nodes[c].value);
            nodes[id].value = total;
        }

        nodes[LayoutTree::ROOT].rect = Rect::from_size(self.size);
        for id in 0..nodes.len() {
            self.position(&mut nodes, id);
        }

        if self.round {
            for node in &mut nodes {
                node.rect = node.rect.rounded();
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            width = self.size.width,
            height = self.size.height,
            "treemap layout computed"
        );

        Ok(LayoutTree {
            nodes,
            size: self.size,
        })
    }

    /// Shrink a node by its share of the sibling gap, then tile its children
    /// inside its padded box.
    fn position(&self, nodes: &mut [LayoutNode], id: NodeId) {
        let node = &nodes[id];
        let gap = if node.depth == 0 { 0.0 } else { self.inner / 2.0 };
        let rect = node.rect.inset(gap);
        nodes[id].rect = rect;

        if nodes[id].children.is_empty() {
            return;
        }

        let half = self.inner / 2.0;
        let depth = nodes[id].depth;
        let content = rect.inset_edges(
            self.padding_top(depth) - half,
            self.outer - half,
            self.outer - half,
            self.outer - half,
        );

        let children = nodes[id].children.clone();
        let values: Vec<f64> = children.iter().map(|&c| nodes[c].value).collect();
        let (rects, _) = squarify(&values, nodes[id].value, self.ratio, content);
        for (child, r) in children.into_iter().zip(rects) {
            nodes[child].rect = r;
        }
    }
}

/// Flatten `root` breadth-first into arena nodes with parent/child links.
fn flatten(root: &TreeNode) -> Vec<LayoutNode> {
    let mut nodes: Vec<LayoutNode> = Vec::new();
    let mut queue: VecDeque<(&TreeNode, Option<NodeId>)> = VecDeque::from([(root, None)]);
    while let Some((tree, parent)) = queue.pop_front() {
        let id = nodes.len();
        nodes.push(LayoutNode {
            name: tree.name.clone(),
            depth: tree.depth,
            value: 0.0,
            rect: Rect::default(),
            parent,
            children: Vec::new(),
            data: tree.data.clone(),
        });
        if let Some(p) = parent {
            nodes[p].children.push(id);
        }
        queue.extend(tree.children.iter().map(|c| (c, Some(id))));
    }
    nodes
}
