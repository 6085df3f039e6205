//! Drawing model of a rendered treemap and its SVG serialization.

use crate::palette::{Fill, Palette, HIGHLIGHT};
use canopy_core::{Point, Size};
use canopy_layout::{LayoutTree, NodeId, ROOT_NAME};
use std::fmt::Write;

/// Height of the band above the treemap that holds the breadcrumb.
pub const BREADCRUMB_BAND: f64 = 16.0;

/// Outline width of every cell.
pub const STROKE_WIDTH: f64 = 1.5;

/// Label font stack.
pub const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Breadcrumb anchor relative to the translated group.
pub const BREADCRUMB_POSITION: Point = Point { x: 4.0, y: -5.0 };

/// Text label inside a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Displayed text
    pub text: String,
    /// Offset from the cell's left edge
    pub x: f64,
    /// Baseline offset from the cell's top edge
    pub y: f64,
    /// Font size in pixels
    pub font_size: f64,
    /// 1 when visible, 0 when hidden
    pub opacity: f64,
}

impl Label {
    fn for_depth(name: &str, depth: usize) -> Self {
        let top = depth == 1;
        Self {
            text: if name == ROOT_NAME {
                String::new()
            } else {
                name.to_string()
            },
            x: 2.0,
            y: if top { 13.0 } else { 10.0 },
            font_size: if top { 14.0 } else { 10.0 },
            opacity: if top { 1.0 } else { 0.0 },
        }
    }
}

/// One node's group: rectangle, clip path and label.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    /// Layout node drawn by this cell
    pub node: NodeId,
    /// Node depth
    pub depth: usize,
    /// Top-left corner of the cell
    pub translate: Point,
    /// Rectangle size
    pub size: Size,
    /// Rectangle paint
    pub fill: Fill,
    /// Outline color while highlighted
    pub stroke: Option<&'static str>,
    /// Cell label
    pub label: Label,
}

impl CellView {
    /// CSS classes of the group.
    #[must_use]
    pub fn class(&self) -> String {
        format!("node depth-{}", self.depth)
    }

    /// Id of the rectangle.
    #[must_use]
    pub fn rect_id(&self) -> String {
        format!("rect-{}", self.node)
    }

    /// Id of the clip path bounding the label.
    #[must_use]
    pub fn clip_id(&self) -> String {
        format!("clip-{}", self.node)
    }
}

/// Everything needed to draw the chart.
///
/// Cells are in breadth-first order, which is also paint order, and the
/// cell at index `i` draws layout node `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Container size
    pub size: Size,
    /// Breadcrumb text (empty when nothing is hovered)
    pub breadcrumb: String,
    /// One cell per layout node
    pub cells: Vec<CellView>,
}

impl Scene {
    /// Build cells for every node of `tree`.
    #[must_use]
    pub fn build(tree: &LayoutTree, palette: &Palette, size: Size) -> Self {
        let cells = tree
            .nodes()
            .iter()
            .enumerate()
            .map(|(id, node)| CellView {
                node: id,
                depth: node.depth,
                translate: node.rect.origin(),
                size: node.rect.size(),
                fill: palette.fill(tree, id),
                stroke: None,
                label: Label::for_depth(&node.name, node.depth),
            })
            .collect();
        Self {
            size,
            breadcrumb: String::new(),
            cells,
        }
    }

    /// Cell drawing `node`.
    #[must_use]
    pub fn cell(&self, node: NodeId) -> Option<&CellView> {
        self.cells.get(node)
    }

    /// Outline exactly the cells in `nodes`.
    pub fn highlight(&mut self, nodes: &[NodeId]) {
        for cell in &mut self.cells {
            cell.stroke = nodes.contains(&cell.node).then_some(HIGHLIGHT);
        }
    }

    /// Remove every outline.
    pub fn clear_highlight(&mut self) {
        for cell in &mut self.cells {
            cell.stroke = None;
        }
    }

    /// Nodes currently outlined, in paint order.
    #[must_use]
    pub fn highlighted(&self) -> Vec<NodeId> {
        self.cells
            .iter()
            .filter(|c| c.stroke.is_some())
            .map(|c| c.node)
            .collect()
    }

    /// Serialize as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(256 + self.cells.len() * 384);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="100%" height="100%" viewBox="0 0 {} {}">"#,
            self.size.width, self.size.height
        );
        let _ = writeln!(svg, r#"<g transform="translate(0,{BREADCRUMB_BAND})">"#);
        let _ = writeln!(
            svg,
            r#"<text y="{}" x="{}">{}</text>"#,
            BREADCRUMB_POSITION.y,
            BREADCRUMB_POSITION.x,
            xml_escape(&self.breadcrumb)
        );

        for cell in &self.cells {
            let _ = writeln!(
                svg,
                r#"<g transform="translate({},{})" class="{}" style="stroke-width: {STROKE_WIDTH}; cursor: pointer;">"#,
                cell.translate.x,
                cell.translate.y,
                cell.class()
            );
            let stroke = cell
                .stroke
                .map_or_else(String::new, |s| format!(" stroke: {s};"));
            let _ = writeln!(
                svg,
                r#"<rect id="{}" width="{}" height="{}" style="fill: {};{stroke}"/>"#,
                cell.rect_id(),
                cell.size.width,
                cell.size.height,
                cell.fill
            );
            let _ = writeln!(
                svg,
                r##"<clipPath id="{}"><use xlink:href="#{}"/></clipPath>"##,
                cell.clip_id(),
                cell.rect_id()
            );
            let label = &cell.label;
            let _ = writeln!(
                svg,
                r#"<text clip-path="url(#{})" y="{}" x="{}" style="opacity: {}; font-family: {FONT_FAMILY}; fill: white; font-size: {}px;">{}</text>"#,
                cell.clip_id(),
                label.y,
                label.x,
                label.opacity,
                label.font_size,
                xml_escape(&label.text)
            );
            svg.push_str("</g>\n");
        }

        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
