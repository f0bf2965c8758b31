//! Clade highlight regions.
//!
//! Highlighting a clade shades the area its visible members occupy, shaped
//! after the layout kind:
//! * radial: annular wedge from the clade root's radius out past the labels
//! * rectangular: box from the clade root's x out past the labels
//! * unrooted: polygon from the clade root through the extended leaf tips
//!
//! Members hidden by a collapsed clade do not contribute; a collapsed node
//! inside the clade counts with its own position.
//!
//! Only one region is active at a time. Independently, the path from a node
//! up to the root can be flagged with [`HighlightState::highlight_path`].

use crate::collapse::CollapseState;
use crate::layout::{Layout, LayoutKind, Point};
use crate::model::{NodeId, PhyloTree};
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

// =#========================================================================#=
// HIGHLIGHT REGION
// =#========================================================================#=
/// Shaded area behind a highlighted clade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HighlightRegion {
    /// Annular sector, angles in degrees (0° up, clockwise). Spans at most
    /// a full circle; a full span is drawn as a complete annulus.
    Wedge {
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// Axis-aligned box.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Closed polygon; the first vertex is the clade root.
    Polygon { vertices: Vec<Point> },
}

impl HighlightRegion {
    /// Returns SVG path data outlining the region.
    ///
    /// # Example
    /// ```
    /// use phyloview::highlight::HighlightRegion;
    ///
    /// let rect = HighlightRegion::Rect { x: 10.0, y: 0.0, width: 5.0, height: 20.0 };
    /// assert_eq!(rect.svg_path(), "M10.000,0.000H15.000V20.000H10.000Z");
    /// ```
    pub fn svg_path(&self) -> String {
        let mut path = String::new();
        match self {
            HighlightRegion::Wedge {
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
            } if end_angle - start_angle >= FULL_CIRCLE - ANGLE_EPSILON => {
                // full annulus: each ring as two half arcs, inner ring reversed
                ring(&mut path, *start_angle, *outer_radius, 1);
                if *inner_radius > 0.0 {
                    ring(&mut path, *start_angle, *inner_radius, 0);
                }
            }
            HighlightRegion::Wedge {
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
            } => {
                let large_arc = u8::from(end_angle - start_angle > 180.0);
                let outer_start = Point::polar(*start_angle, *outer_radius);
                let outer_end = Point::polar(*end_angle, *outer_radius);
                let inner_end = Point::polar(*end_angle, *inner_radius);
                let inner_start = Point::polar(*start_angle, *inner_radius);
                let _ = write!(
                    path,
                    "M{:.3},{:.3}A{r:.3},{r:.3} 0 {large_arc},1 {:.3},{:.3}L{:.3},{:.3}",
                    outer_start.x,
                    outer_start.y,
                    outer_end.x,
                    outer_end.y,
                    inner_end.x,
                    inner_end.y,
                    r = outer_radius
                );
                let _ = write!(
                    path,
                    "A{r:.3},{r:.3} 0 {large_arc},0 {:.3},{:.3}Z",
                    inner_start.x,
                    inner_start.y,
                    r = inner_radius
                );
            }
            HighlightRegion::Rect {
                x,
                y,
                width,
                height,
            } => {
                let _ = write!(
                    path,
                    "M{:.3},{:.3}H{:.3}V{:.3}H{:.3}Z",
                    x,
                    y,
                    x + width,
                    y + height,
                    x
                );
            }
            HighlightRegion::Polygon { vertices } => {
                for (i, v) in vertices.iter().enumerate() {
                    let command = if i == 0 { 'M' } else { 'L' };
                    let _ = write!(path, "{command}{:.3},{:.3}", v.x, v.y);
                }
                path.push('Z');
            }
        }
        path
    }
}

/// Angular span of a full circle in degrees
const FULL_CIRCLE: f64 = 360.0;
/// Tolerance when comparing spans against [FULL_CIRCLE]
const ANGLE_EPSILON: f64 = 1e-9;

/// Appends a closed circle of `radius` drawn as two half arcs from `angle`.
fn ring(path: &mut String, angle: f64, radius: f64, sweep: u8) {
    let from = Point::polar(angle, radius);
    let opposite = Point::polar(angle + 180.0, radius);
    let _ = write!(path, "M{:.3},{:.3}", from.x, from.y);
    for to in [opposite, from] {
        let _ = write!(path, "A{r:.3},{r:.3} 0 1,{sweep} {:.3},{:.3}", to.x, to.y, r = radius);
    }
    path.push('Z');
}

/// Returns the clade of `id` as drawn: `id` itself plus every descendant
/// not folded away by a collapsed node within the clade (including `id`).
fn visible_members(tree: &PhyloTree, collapse: &CollapseState, id: NodeId) -> Vec<NodeId> {
    let mut members = Vec::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        members.push(current);
        if !collapse.is_collapsed(current) {
            stack.extend(tree[current].children().iter().rev());
        }
    }
    members
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Computes the highlight region of the clade at `id`.
///
/// # Panics
/// Panics if `id` is out of bounds for `layout`.
pub fn clade_region(
    tree: &PhyloTree,
    layout: &Layout,
    collapse: &CollapseState,
    id: NodeId,
) -> HighlightRegion {
    let members = visible_members(tree, collapse, id);
    let config = layout.config();
    let half_step = layout.leaf_step() / 2.0;

    let (min_ordinal, max_ordinal) = min_max(members.iter().map(|&m| layout.ordinal(m)));
    let (min_metric, _) = min_max(members.iter().map(|&m| layout.metric(m)));

    match layout.kind() {
        LayoutKind::Radial => {
            // padding never grows the wedge beyond a full circle
            let span = max_ordinal - min_ordinal;
            let pad = half_step.min((FULL_CIRCLE - span) / 2.0).max(0.0);
            HighlightRegion::Wedge {
                inner_radius: min_metric,
                outer_radius: config.plot_extent(),
                start_angle: min_ordinal - pad,
                end_angle: max_ordinal + pad,
            }
        }
        LayoutKind::Rectangular => {
            let y = min_ordinal - half_step;
            HighlightRegion::Rect {
                x: min_metric,
                y,
                width: config.plot_extent() - min_metric,
                height: max_ordinal + half_step - y,
            }
        }
        LayoutKind::Unrooted => {
            let mut tips: Vec<(f64, Point)> = members
                .iter()
                .filter(|&&m| m != id)
                .filter_map(|&m| {
                    if let Some(extension) = layout.extension(m) {
                        Some((layout.ordinal(m), extension.end))
                    } else if collapse.is_collapsed(m) {
                        Some((layout.ordinal(m), layout.point(m)))
                    } else {
                        None
                    }
                })
                .collect();
            tips.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut vertices = Vec::with_capacity(tips.len() + 1);
            vertices.push(layout.point(id));
            if tips.is_empty() {
                if let Some(extension) = layout.extension(id) {
                    vertices.push(extension.end);
                }
            }
            vertices.extend(tips.into_iter().map(|(_, p)| p));
            HighlightRegion::Polygon { vertices }
        }
    }
}

// =#========================================================================#=
// HIGHLIGHT STATE
// =#========================================================================#=
/// The active clade highlight (at most one) and the flagged root path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HighlightState {
    active: Option<(NodeId, HighlightRegion)>,
    in_clade: Vec<bool>,
    on_path: Vec<bool>,
}

impl HighlightState {
    /// Creates a state with no active clade and no flagged path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates or deactivates the highlight of the clade at `id`.
    ///
    /// Activating replaces any previously active region. Deactivating only
    /// has an effect if `id` is the active clade.
    ///
    /// # Returns
    /// The active region after the update.
    pub fn set_active(
        &mut self,
        tree: &PhyloTree,
        layout: &Layout,
        collapse: &CollapseState,
        id: NodeId,
        active: bool,
    ) -> Option<&HighlightRegion> {
        if active {
            let region = clade_region(tree, layout, collapse, id);
            self.in_clade = vec![false; tree.num_nodes()];
            for node in tree.subtree_iter(id) {
                self.in_clade[node.id()] = true;
            }
            debug!(node = id, "clade highlighted");
            self.active = Some((id, region));
        } else if self.active_node() == Some(id) {
            debug!(node = id, "clade highlight cleared");
            self.clear();
        }
        self.region()
    }

    /// Recomputes the active region, e.g. after the layout changed.
    pub fn refresh(&mut self, tree: &PhyloTree, layout: &Layout, collapse: &CollapseState) {
        if let Some((id, region)) = self.active.as_mut() {
            *region = clade_region(tree, layout, collapse, *id);
        }
    }

    /// Removes the active clade highlight.
    pub fn clear(&mut self) {
        self.active = None;
        self.in_clade.clear();
    }

    /// Returns the root of the active clade.
    pub fn active_node(&self) -> Option<NodeId> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    /// Returns the active region.
    pub fn region(&self) -> Option<&HighlightRegion> {
        self.active.as_ref().map(|(_, region)| region)
    }

    /// Returns `true` if `id` belongs to the active clade.
    pub fn is_highlighted(&self, id: NodeId) -> bool {
        self.in_clade.get(id).copied().unwrap_or(false)
    }

    /// Flags the path from `id` up to the root, replacing any earlier path.
    pub fn highlight_path(&mut self, tree: &PhyloTree, id: NodeId) {
        self.on_path = vec![false; tree.num_nodes()];
        for node in tree.ancestor_path(id) {
            self.on_path[node] = true;
        }
    }

    /// Removes the root path flags.
    pub fn clear_path(&mut self) {
        self.on_path.clear();
    }

    /// Returns `true` if `id` lies on the flagged root path.
    pub fn on_path(&self, id: NodeId) -> bool {
        self.on_path.get(id).copied().unwrap_or(false)
    }

    /// Forgets everything, e.g. after the tree was rerooted.
    pub fn reset(&mut self) {
        self.clear();
        self.clear_path();
    }
}
