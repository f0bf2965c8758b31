//! Interactive tree view: owns a tree with its layout, collapse and highlight
//! state, and applies user commands to them.
//!
//! [TreeView] is the single place where state changes. Every mutation takes
//! `&mut self` and replaces all derived state (layout, collapse flags,
//! highlight region) before returning, so readers never see a half-updated
//! view. Commands can be applied directly or queued with
//! [`TreeView::enqueue`] and applied in order of receipt by [`TreeView::flush`].
//!
//! # Example
//! ```
//! use phyloview::layout::LayoutKind;
//! use phyloview::view::{TreeView, ViewConfig};
//!
//! let config = ViewConfig::default().with_layout_kind(LayoutKind::Rectangular);
//! let mut view = TreeView::from_newick("((Kea:1,Kaka:1):1,Kakapo:2);", config).unwrap();
//!
//! view.layout();
//! let focus = view.find_and_zoom("Kaka").unwrap().unwrap();
//! assert_eq!(focus.node, 3);
//!
//! assert!(view.reroot("Kakapo"));
//! assert_eq!(view.tree().root().name(), "Kakapo");
//! ```

use crate::collapse::CollapseState;
use crate::highlight::{HighlightRegion, HighlightState};
use crate::layout::{Extension, Layout, LayoutConfig, LayoutKind, LinkMode, Point};
use crate::model::reroot::{reroot, reroot_at};
use crate::model::{NodeId, PhyloTree};
use crate::newick::NewickParser;
use crate::parser::ParsingError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, warn};

/// Default zoom factor when focusing a search hit
pub const DEFAULT_FOCUS_ZOOM: f64 = 3.0;

// =#========================================================================#=
// CONFIGURATION
// =#========================================================================#=
/// Which tree a reroot starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RerootOrigin {
    /// The currently displayed tree, so reroots chain
    #[default]
    Live,
    /// The tree as initially parsed
    Original,
}

/// Size of the area the plot is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 960.0,
            height: 960.0,
        }
    }
}

/// Transient marker flashed on a search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub from_radius: f64,
    pub to_radius: f64,
    pub duration_ms: u32,
    pub color: String,
}

impl Default for PulseConfig {
    fn default() -> Self {
        PulseConfig {
            from_radius: 4.0,
            to_radius: 24.0,
            duration_ms: 1000,
            color: "#d62728".to_string(),
        }
    }
}

/// Settings of a [TreeView].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub layout: LayoutConfig,
    pub reroot_origin: RerootOrigin,
    pub focus_zoom: f64,
    pub viewport: Viewport,
    pub pulse: PulseConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            layout: LayoutConfig::default(),
            reroot_origin: RerootOrigin::default(),
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            viewport: Viewport::default(),
            pulse: PulseConfig::default(),
        }
    }
}

impl ViewConfig {
    /// Sets the full layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the layout kind, keeping the rest of the layout configuration.
    pub fn with_layout_kind(mut self, kind: LayoutKind) -> Self {
        self.layout.kind = kind;
        self
    }

    /// Makes every reroot start from the initially parsed tree.
    pub fn with_reroot_origin(mut self, origin: RerootOrigin) -> Self {
        self.reroot_origin = origin;
        self
    }

    /// Sets the zoom factor applied when focusing a search hit.
    pub fn with_focus_zoom(mut self, zoom: f64) -> Self {
        self.focus_zoom = zoom;
        self
    }

    /// Sets the viewport size.
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    fn effective_zoom(&self) -> f64 {
        if self.focus_zoom > 0.0 {
            self.focus_zoom
        } else {
            DEFAULT_FOCUS_ZOOM
        }
    }
}

// =#========================================================================#=
// ERRORS, COMMANDS & RESULTS
// =#========================================================================#=
/// Errors of view operations. The view is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("no layout computed yet")]
    LayoutPending,
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

/// A user interaction, as queued with [`TreeView::enqueue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Reroot { name: String },
    /// Reroot by id, e.g. at an unnamed internal node
    RerootAt { node: NodeId },
    ToggleCollapse { node: NodeId },
    Search { name: String },
    Highlight { node: NodeId, active: bool },
    HighlightPath { node: NodeId },
    SetLinkMode { mode: LinkMode },
    SetLayoutKind { kind: LayoutKind },
}

/// Result of an applied [Command].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Rerooted { success: bool },
    Collapsed { collapsed: bool },
    Found { focus: Option<Focus> },
    Highlighted { region: Option<HighlightRegion> },
    PathHighlighted,
    LayoutChanged,
}

/// View transform `screen = scale · plot + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewTransform {
    /// Maps a plot point to screen coordinates.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.scale * p.x + self.translate_x,
            self.scale * p.y + self.translate_y,
        )
    }
}

/// Radius flash drawn at a search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pulse {
    pub center: Point,
    pub from_radius: f64,
    pub to_radius: f64,
    pub duration_ms: u32,
    pub color: String,
}

/// Search hit: which node, how to center it, and the feedback pulse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Focus {
    pub node: NodeId,
    pub transform: ViewTransform,
    pub pulse: Pulse,
}

// =#========================================================================#=
// RENDER MODEL
// =#========================================================================#=
/// Serializable snapshot of everything a renderer draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub kind: LayoutKind,
    pub link_mode: LinkMode,
    pub nodes: Vec<RenderNode>,
    pub links: Vec<RenderLink>,
    pub extensions: Vec<RenderExtension>,
    pub highlight: Option<RenderHighlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub name: String,
    pub point: Point,
    pub is_leaf: bool,
    pub collapsed: bool,
    pub hidden: bool,
    pub highlighted: bool,
    pub on_path: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderLink {
    pub parent: NodeId,
    pub child: NodeId,
    pub path: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderExtension {
    #[serde(flatten)]
    pub extension: Extension,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderHighlight {
    pub node: NodeId,
    pub region: HighlightRegion,
    pub path: String,
}

// =#========================================================================#=
// TREE VIEW
// =#========================================================================#=
/// Interactive view of one phylogenetic tree, see [module documentation](self).
#[derive(Debug, Clone)]
pub struct TreeView {
    config: ViewConfig,
    /// Tree as initially parsed
    source: PhyloTree,
    /// Tree as currently displayed
    tree: PhyloTree,
    layout: Option<Layout>,
    collapse: CollapseState,
    highlight: HighlightState,
    pending: VecDeque<Command>,
}

// ============================================================================
// Construction & Access (pub)
// ============================================================================
impl TreeView {
    /// Creates a view of `tree`. No layout is computed until [`layout()`](Self::layout).
    pub fn new(tree: PhyloTree, config: ViewConfig) -> Self {
        TreeView {
            config,
            collapse: CollapseState::new(&tree),
            source: tree.clone(),
            tree,
            layout: None,
            highlight: HighlightState::new(),
            pending: VecDeque::new(),
        }
    }

    /// Parses `newick` with default settings and creates a view of it.
    pub fn from_newick(newick: &str, config: ViewConfig) -> Result<Self, ParsingError> {
        let tree = NewickParser::new().parse_str(newick)?;
        Ok(Self::new(tree, config))
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the tree as currently displayed.
    pub fn tree(&self) -> &PhyloTree {
        &self.tree
    }

    /// Returns the tree as initially parsed.
    pub fn source_tree(&self) -> &PhyloTree {
        &self.source
    }

    pub fn collapse_state(&self) -> &CollapseState {
        &self.collapse
    }

    pub fn highlight_state(&self) -> &HighlightState {
        &self.highlight
    }

    /// Returns the layout, computing it on first use.
    pub fn layout(&mut self) -> &Layout {
        self.layout
            .get_or_insert_with(|| Layout::compute(&self.tree, &self.config.layout))
    }

    /// Returns the layout if one has been computed.
    pub fn current_layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    fn check_node(&self, id: NodeId) -> Result<(), ViewError> {
        if self.tree.contains(id) {
            Ok(())
        } else {
            Err(ViewError::UnknownNode(id))
        }
    }

    /// Displays `rerooted`, resetting collapse and highlight state, unless it
    /// equals the displayed tree, in which case nothing changes.
    fn replace_tree(&mut self, rerooted: PhyloTree) {
        if rerooted == self.tree {
            debug!("tree already rooted there, keeping view state");
            return;
        }
        self.tree = rerooted;
        self.collapse = CollapseState::new(&self.tree);
        self.highlight.reset();
        self.relayout();
    }

    /// Recomputes the layout if there is one, then the highlight region.
    fn relayout(&mut self) {
        if self.layout.is_some() {
            let layout = Layout::compute(&self.tree, &self.config.layout);
            self.highlight.refresh(&self.tree, &layout, &self.collapse);
            self.layout = Some(layout);
        }
    }
}

// ============================================================================
// Interactions (pub)
// ============================================================================
impl TreeView {
    /// Searches the drawn nodes for an exact `name` match and returns how to
    /// center the view on it.
    ///
    /// Nodes hidden inside a collapsed clade are skipped.
    ///
    /// # Returns
    /// * `Ok(Some(Focus))` - for the first match in pre-order
    /// * `Ok(None)` - if no drawn node has that name (logged)
    /// * `Err(ViewError::LayoutPending)` - before the first layout
    pub fn find_and_zoom(&self, name: &str) -> Result<Option<Focus>, ViewError> {
        let layout = self.layout.as_ref().ok_or(ViewError::LayoutPending)?;

        let hit = self
            .tree
            .pre_order_iter()
            .filter(|n| !self.collapse.is_hidden(n.id()))
            .find(|n| !name.is_empty() && n.name() == name)
            .map(|n| n.id());

        let Some(node) = hit else {
            warn!(query = name, "no drawn node with this name");
            return Ok(None);
        };

        let center = layout.point(node);
        let scale = self.config.effective_zoom();
        let viewport = self.config.viewport;
        let transform = ViewTransform {
            scale,
            translate_x: viewport.width / 2.0 - scale * center.x,
            translate_y: viewport.height / 2.0 - scale * center.y,
        };
        let pulse = &self.config.pulse;
        debug!(node, scale, "focusing search hit");
        Ok(Some(Focus {
            node,
            transform,
            pulse: Pulse {
                center,
                from_radius: pulse.from_radius,
                to_radius: pulse.to_radius,
                duration_ms: pulse.duration_ms,
                color: pulse.color.clone(),
            },
        }))
    }

    /// Reroots at the first node named `name` (breadth-first).
    ///
    /// Starts from the displayed tree or the initially parsed one, depending
    /// on [`ViewConfig::reroot_origin`]. On success collapse and highlight
    /// state are reset and the layout, if any, is recomputed. Rerooting at
    /// the node that already is the root keeps all state.
    ///
    /// # Returns
    /// `false` if no node has that name; the view is unchanged then.
    pub fn reroot(&mut self, name: &str) -> bool {
        let origin = match self.config.reroot_origin {
            RerootOrigin::Live => &self.tree,
            RerootOrigin::Original => &self.source,
        };
        let Some(rerooted) = reroot(origin, name) else {
            return false;
        };
        self.replace_tree(rerooted);
        true
    }

    /// Reroots the displayed tree at node `id`, which need not be named.
    ///
    /// Ids refer to the displayed tree, so this always starts from it,
    /// whatever [`ViewConfig::reroot_origin`] says. State handling is the
    /// same as for [`reroot()`](Self::reroot).
    pub fn reroot_at(&mut self, id: NodeId) -> Result<(), ViewError> {
        self.check_node(id)?;
        let rerooted = reroot_at(&self.tree, id);
        self.replace_tree(rerooted);
        Ok(())
    }

    /// Collapses or expands the clade at `id`, see [`CollapseState::toggle`].
    pub fn toggle_collapse(&mut self, id: NodeId) -> Result<bool, ViewError> {
        self.check_node(id)?;
        let collapsed = self.collapse.toggle(&self.tree, id);
        if let Some(layout) = &self.layout {
            self.highlight.refresh(&self.tree, layout, &self.collapse);
        }
        Ok(collapsed)
    }

    /// Activates or deactivates the highlight of the clade at `id`.
    pub fn set_highlight(
        &mut self,
        id: NodeId,
        active: bool,
    ) -> Result<Option<HighlightRegion>, ViewError> {
        self.check_node(id)?;
        let layout = self.layout.as_ref().ok_or(ViewError::LayoutPending)?;
        Ok(self
            .highlight
            .set_active(&self.tree, layout, &self.collapse, id, active)
            .cloned())
    }

    /// Flags the path from `id` up to the root.
    pub fn highlight_path(&mut self, id: NodeId) -> Result<(), ViewError> {
        self.check_node(id)?;
        self.highlight.highlight_path(&self.tree, id);
        Ok(())
    }

    /// Switches between proportional and per-generation link lengths.
    pub fn set_link_mode(&mut self, mode: LinkMode) {
        self.config.layout.link_mode = mode;
        if let Some(layout) = self.layout.as_mut() {
            layout.set_link_mode(&self.tree, mode);
            self.highlight.refresh(&self.tree, layout, &self.collapse);
        }
    }

    /// Switches the layout kind, recomputing the layout if there is one.
    pub fn set_layout_kind(&mut self, kind: LayoutKind) {
        self.config.layout.kind = kind;
        self.relayout();
    }

    /// Applies a single command.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, ViewError> {
        debug!(?command, "applying command");
        match command {
            Command::Reroot { name } => Ok(Outcome::Rerooted {
                success: self.reroot(&name),
            }),
            Command::RerootAt { node } => {
                self.reroot_at(node)?;
                Ok(Outcome::Rerooted { success: true })
            }
            Command::ToggleCollapse { node } => Ok(Outcome::Collapsed {
                collapsed: self.toggle_collapse(node)?,
            }),
            Command::Search { name } => Ok(Outcome::Found {
                focus: self.find_and_zoom(&name)?,
            }),
            Command::Highlight { node, active } => Ok(Outcome::Highlighted {
                region: self.set_highlight(node, active)?,
            }),
            Command::HighlightPath { node } => {
                self.highlight_path(node)?;
                Ok(Outcome::PathHighlighted)
            }
            Command::SetLinkMode { mode } => {
                self.set_link_mode(mode);
                Ok(Outcome::LayoutChanged)
            }
            Command::SetLayoutKind { kind } => {
                self.set_layout_kind(kind);
                Ok(Outcome::LayoutChanged)
            }
        }
    }

    /// Queues a command for the next [`flush()`](Self::flush).
    pub fn enqueue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Returns the number of queued commands.
    pub fn num_pending(&self) -> usize {
        self.pending.len()
    }

    /// Applies all queued commands in order of receipt.
    ///
    /// A failing command does not stop the ones after it.
    pub fn flush(&mut self) -> Vec<Result<Outcome, ViewError>> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some(command) = self.pending.pop_front() {
            outcomes.push(self.apply(command));
        }
        outcomes
    }
}

// ============================================================================
// Rendering (pub)
// ============================================================================
impl TreeView {
    /// Returns a snapshot of everything to draw.
    ///
    /// # Errors
    /// [ViewError::LayoutPending] before the first layout.
    pub fn render_model(&self) -> Result<RenderModel, ViewError> {
        let layout = self.layout.as_ref().ok_or(ViewError::LayoutPending)?;

        let nodes = self
            .tree
            .nodes()
            .iter()
            .map(|n| {
                let id = n.id();
                RenderNode {
                    id,
                    name: n.name().to_string(),
                    point: layout.point(id),
                    is_leaf: n.is_leaf(),
                    collapsed: self.collapse.is_collapsed(id),
                    hidden: self.collapse.is_hidden(id),
                    highlighted: self.highlight.is_highlighted(id),
                    on_path: self.highlight.on_path(id),
                }
            })
            .collect();

        let links = layout
            .links()
            .iter()
            .map(|link| RenderLink {
                parent: link.parent,
                child: link.child,
                path: link.shape.svg_path(),
                hidden: self.collapse.is_link_hidden(link.child),
            })
            .collect();

        let extensions = layout
            .extensions()
            .iter()
            .map(|&extension| RenderExtension {
                extension,
                hidden: self.collapse.is_hidden(extension.leaf),
            })
            .collect();

        let highlight = self
            .highlight
            .active_node()
            .zip(self.highlight.region())
            .map(|(node, region)| RenderHighlight {
                node,
                region: region.clone(),
                path: region.svg_path(),
            });

        Ok(RenderModel {
            kind: layout.kind(),
            link_mode: layout.link_mode(),
            nodes,
            links,
            extensions,
            highlight,
        })
    }
}
