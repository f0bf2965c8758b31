//! Rectangular projection: leaves stacked along y, depth along x.

use crate::layout::Projection;
use crate::layout::config::LayoutConfig;
use crate::layout::link::{Extension, LinkShape, Point};
use crate::layout::placement;
use crate::model::{NodeId, PhyloTree};

/// Returns the y coordinate of every node and the distance between adjacent leaves.
pub(crate) fn ordinal(tree: &PhyloTree, config: &LayoutConfig) -> (Vec<f64>, f64) {
    let step = config.leaf_separation;
    let ys = placement::leaf_ranks(tree)
        .into_iter()
        .map(|rank| rank * step)
        .collect();
    (ys, step)
}

pub(crate) fn project(tree: &PhyloTree, config: &LayoutConfig, ys: &[f64]) -> Projection {
    let raw = placement::metric_values(tree, config.link_mode);
    let xs = placement::scale_to(&raw, config.depth_extent);
    let points = xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect();
    Projection { metric: xs, points }
}

pub(crate) fn link(points: &[Point], parent: NodeId, child: NodeId) -> LinkShape {
    let start = points[parent];
    let end = points[child];
    LinkShape::Elbow {
        start,
        corner: Point::new(start.x, end.y),
        end,
    }
}

pub(crate) fn extension(config: &LayoutConfig, points: &[Point], leaf: NodeId) -> Extension {
    let start = points[leaf];
    Extension {
        leaf,
        start,
        end: Point::new(config.depth_extent, start.y),
        label_anchor: Point::new(config.depth_extent + config.label_offset, start.y),
    }
}
