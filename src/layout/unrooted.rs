//! Unrooted equal-angle projection.
//!
//! The root owns the full circle `[0, 2π)`. Every node splits its sector among
//! its children in child order, each child receiving a share proportional to
//! its leaf count, and is drawn along the bisector of its own sector. Child
//! positions are `parent + len · (sin θ, cos θ)`, after which the whole plot
//! is scaled uniformly so the farthest node sits at `inner_radius`.

use crate::layout::Projection;
use crate::layout::config::LayoutConfig;
use crate::layout::link::{Extension, LinkShape, Point};
use crate::layout::placement;
use crate::model::{NodeId, PhyloTree};
use serde::Serialize;
use std::f64::consts::TAU;

/// Angular interval `[start, end)` in radians owned by a clade.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sector {
    pub start: f64,
    pub end: f64,
}

impl Sector {
    /// Angular width in radians.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Direction the clade's root is drawn along.
    pub fn bisector(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Returns `true` if `angle` (radians) falls in `[start, end)`.
    pub fn contains(&self, angle: f64) -> bool {
        self.start <= angle && angle < self.end
    }
}

/// Returns the sector of every node, indexed by [NodeId].
pub(crate) fn sectors(tree: &PhyloTree) -> Vec<Sector> {
    let leaf_counts = tree.leaf_counts();
    let mut sectors = vec![Sector::default(); tree.num_nodes()];
    sectors[tree.root_id()] = Sector {
        start: 0.0,
        end: TAU,
    };

    for node in tree.pre_order_iter() {
        let sector = sectors[node.id()];
        let total = leaf_counts[node.id()] as f64;
        let mut start = sector.start;
        for &child in node.children() {
            let width = sector.width() * leaf_counts[child] as f64 / total;
            sectors[child] = Sector {
                start,
                end: start + width,
            };
            start += width;
        }
    }
    sectors
}

/// Returns the drawing direction of every node in radians, the sector table
/// and the angular share of a single leaf.
pub(crate) fn ordinal(tree: &PhyloTree) -> (Vec<f64>, Vec<Sector>, f64) {
    let sectors = sectors(tree);
    let directions = sectors.iter().map(Sector::bisector).collect();
    let step = TAU / tree.num_leaves() as f64;
    (directions, sectors, step)
}

/// Places every node; the metric value is the scaled path length from the root.
pub(crate) fn project(tree: &PhyloTree, config: &LayoutConfig, directions: &[f64]) -> Projection {
    let lengths = placement::edge_lengths(tree, config.link_mode);
    let mut points = vec![Point::default(); tree.num_nodes()];
    let mut metric = vec![0.0; tree.num_nodes()];

    for node in tree.pre_order_iter() {
        if let Some(parent) = node.parent() {
            let id = node.id();
            points[id] = points[parent].advance(directions[id], lengths[id]);
            metric[id] = metric[parent] + lengths[id];
        }
    }

    let farthest = points.iter().map(|p| p.norm()).fold(0.0_f64, f64::max);
    if farthest > 0.0 {
        let factor = config.inner_radius / farthest;
        points.iter_mut().for_each(|p| *p = p.scaled(factor));
        metric.iter_mut().for_each(|m| *m *= factor);
    }
    Projection { metric, points }
}

pub(crate) fn link(points: &[Point], parent: NodeId, child: NodeId) -> LinkShape {
    LinkShape::Straight {
        start: points[parent],
        end: points[child],
    }
}

pub(crate) fn extension(
    config: &LayoutConfig,
    directions: &[f64],
    points: &[Point],
    leaf: NodeId,
) -> Extension {
    let start = points[leaf];
    let end = start.advance(directions[leaf], config.extension_length);
    Extension {
        leaf,
        start,
        end,
        label_anchor: end,
    }
}
