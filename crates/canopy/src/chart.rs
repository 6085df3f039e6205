//! The treemap chart: explicit create/update entry points and pointer
//! interaction over the current render.

use crate::config::VisConfig;
use crate::error::{QueryError, RenderError};
use crate::format::ValueFormatter;
use crate::interaction::{breadcrumb_text, HoverState};
use crate::palette::Palette;
use crate::query::{QueryResponse, Requirements};
use crate::scene::{Scene, BREADCRUMB_BAND};
use canopy_core::{Event, Point, Size};
use canopy_layout::{build_hierarchy, LayoutNode, LayoutTree, NodeId, Row, TreemapLayout};
use serde::{Deserialize, Serialize};

/// Drawing surface size reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Width in pixels
    pub client_width: f64,
    /// Height in pixels
    pub client_height: f64,
}

impl Container {
    /// Create a container size.
    #[must_use]
    pub const fn new(client_width: f64, client_height: f64) -> Self {
        Self {
            client_width,
            client_height,
        }
    }

    /// Full container size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.client_width, self.client_height)
    }

    /// Area available to the treemap below the breadcrumb band.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        Size::new(self.client_width, self.client_height - BREADCRUMB_BAND)
    }
}

/// Output of one render pass.
#[derive(Debug, Clone)]
pub struct Render {
    /// Laid-out tree
    pub layout: LayoutTree,
    /// Drawing model
    pub scene: Scene,
    /// Formatter for the measure
    pub formatter: ValueFormatter,
}

/// Validate, group, lay out and build the scene for one dataset.
pub fn render(
    rows: &[Row],
    container: Container,
    config: &VisConfig,
    query: &QueryResponse,
) -> Result<Render, RenderError> {
    query.validate(&Requirements::TREEMAP)?;
    let measure = query
        .measure()
        .ok_or(QueryError::TooFewMeasures { min: 1, found: 0 })?;
    let dimensions = query.dimension_names();

    let root = build_hierarchy(rows, &dimensions)?;
    let layout =
        TreemapLayout::new(container.canvas_size()).compute(&root, |row| row.measure(&measure.name))?;
    let palette = Palette::new(&layout, &config.color_range);
    let scene = Scene::build(&layout, &palette, container.size());

    tracing::debug!(
        rows = rows.len(),
        nodes = layout.len(),
        categories = palette.categories().len(),
        total = layout.root().value,
        "rendered treemap"
    );

    Ok(Render {
        layout,
        scene,
        formatter: ValueFormatter::new(measure.value_format.as_deref()),
    })
}

#[derive(Debug, Clone)]
struct RenderState {
    render: Render,
    hover: HoverState,
}

/// A treemap chart bound to one container.
#[derive(Debug, Clone)]
pub struct TreemapChart {
    container: Container,
    config: VisConfig,
    state: Option<RenderState>,
}

impl TreemapChart {
    /// Chart with nothing rendered yet.
    #[must_use]
    pub const fn create(container: Container, config: VisConfig) -> Self {
        Self {
            container,
            config,
            state: None,
        }
    }

    /// Re-render from scratch.
    ///
    /// Hover resets to idle. On error the previous render is kept as is.
    pub fn update(
        &mut self,
        rows: &[Row],
        container: Container,
        config: &VisConfig,
        query: &QueryResponse,
    ) -> Result<&Scene, RenderError> {
        let render = render(rows, container, config, query).map_err(|e| {
            tracing::warn!(error = %e, "treemap update rejected");
            e
        })?;
        self.container = container;
        self.config = config.clone();
        let state = self.state.insert(RenderState {
            render,
            hover: HoverState::Idle,
        });
        Ok(&state.render.scene)
    }

    /// Hover `node`: outline it and its ancestors and show its breadcrumb.
    ///
    /// Returns `false` when nothing is rendered or `node` does not exist.
    pub fn pointer_enter(&mut self, node: NodeId) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let render = &mut state.render;
        let Some(text) = breadcrumb_text(&render.layout, node, &render.formatter) else {
            return false;
        };
        render.scene.highlight(&render.layout.ancestors(node));
        render.scene.breadcrumb = text;
        state.hover = HoverState::Hovering(node);
        true
    }

    /// Clear the breadcrumb and every outline.
    pub fn pointer_leave(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.render.scene.clear_highlight();
            state.render.scene.breadcrumb.clear();
            state.hover = HoverState::Idle;
        }
    }

    /// Report a click on `node`. Rendering is unaffected.
    pub fn click(&self, node: NodeId) -> Option<&LayoutNode> {
        let n = self.layout()?.node(node)?;
        tracing::debug!(
            node,
            name = %n.name,
            depth = n.depth,
            value = n.value,
            "treemap node clicked"
        );
        Some(n)
    }

    /// Node under a point in container coordinates.
    ///
    /// The root is unfilled and never a target.
    #[must_use]
    pub fn node_at(&self, position: Point) -> Option<NodeId> {
        let local = Point::new(position.x, position.y - BREADCRUMB_BAND);
        self.layout()?
            .hit_test(local)
            .filter(|&id| id != LayoutTree::ROOT)
    }

    /// Dispatch a pointer event. Returns whether the scene changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::PointerMove { position } => {
                let target = self.node_at(*position);
                self.retarget(target)
            }
            Event::PointerDown { position, .. } => {
                if let Some(id) = self.node_at(*position) {
                    self.click(id);
                }
                false
            }
            Event::PointerLeave => self.retarget(None),
        }
    }

    fn retarget(&mut self, target: Option<NodeId>) -> bool {
        let current = self.hover().target();
        if current == target {
            return false;
        }
        if current.is_some() {
            self.pointer_leave();
        }
        if let Some(id) = target {
            self.pointer_enter(id);
        }
        true
    }

    /// Current scene, if a render succeeded.
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.state.as_ref().map(|s| &s.render.scene)
    }

    /// Current layout, if a render succeeded.
    #[must_use]
    pub fn layout(&self) -> Option<&LayoutTree> {
        self.state.as_ref().map(|s| &s.render.layout)
    }

    /// Current hover state.
    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.state.as_ref().map_or(HoverState::Idle, |s| s.hover)
    }

    /// Current breadcrumb text.
    #[must_use]
    pub fn breadcrumb(&self) -> &str {
        self.scene().map_or("", |s| s.breadcrumb.as_str())
    }

    /// Container of the last successful update (or creation).
    #[must_use]
    pub const fn container(&self) -> Container {
        self.container
    }

    /// Settings of the last successful update (or creation).
    #[must_use]
    pub const fn config(&self) -> &VisConfig {
        &self.config
    }
}
