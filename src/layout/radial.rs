//! Radial (circular dendrogram) projection.
//!
//! Leaves sit on a band of `angular_width` degrees, 0° pointing up and
//! angles growing clockwise; depth is drawn as radius.

use crate::layout::Projection;
use crate::layout::config::LayoutConfig;
use crate::layout::link::{Extension, LinkShape, Point};
use crate::layout::placement;
use crate::model::{NodeId, PhyloTree};

/// Returns the angle of every node in degrees and the angular step between
/// adjacent leaves.
pub(crate) fn ordinal(tree: &PhyloTree, config: &LayoutConfig) -> (Vec<f64>, f64) {
    let num_leaves = tree.num_leaves();
    let step = if num_leaves > 1 {
        config.angular_width / (num_leaves - 1) as f64
    } else {
        config.angular_width
    };
    let angles = placement::leaf_ranks(tree)
        .into_iter()
        .map(|rank| rank * step)
        .collect();
    (angles, step)
}

pub(crate) fn project(tree: &PhyloTree, config: &LayoutConfig, angles: &[f64]) -> Projection {
    let raw = placement::metric_values(tree, config.link_mode);
    let radii = placement::scale_to(&raw, config.inner_radius);
    let points = angles
        .iter()
        .zip(&radii)
        .map(|(&a, &r)| Point::polar(a, r))
        .collect();
    Projection {
        metric: radii,
        points,
    }
}

pub(crate) fn link(angles: &[f64], radii: &[f64], parent: NodeId, child: NodeId) -> LinkShape {
    let radius = radii[parent];
    LinkShape::RadialElbow {
        start: Point::polar(angles[parent], radius),
        corner: Point::polar(angles[child], radius),
        end: Point::polar(angles[child], radii[child]),
        radius,
        start_angle: angles[parent],
        end_angle: angles[child],
    }
}

pub(crate) fn extension(
    config: &LayoutConfig,
    angles: &[f64],
    points: &[Point],
    leaf: NodeId,
) -> Extension {
    let angle = angles[leaf];
    Extension {
        leaf,
        start: points[leaf],
        end: Point::polar(angle, config.inner_radius),
        label_anchor: Point::polar(angle, config.inner_radius + config.label_offset),
    }
}
