//! Geometry primitives shared by the layouts: points, links and leaf extensions.

use crate::model::NodeId;
use serde::Serialize;
use std::fmt::Write;

// =#========================================================================#=
// POINT
// =#========================================================================#=
/// A point in plot coordinates (y grows downwards, as in SVG).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point from Cartesian coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Point at `radius` on the ray at `angle` degrees, where 0° points up
    /// and angles grow clockwise.
    pub fn polar(angle: f64, radius: f64) -> Self {
        let theta = (angle - 90.0).to_radians();
        Point::new(radius * theta.cos(), radius * theta.sin())
    }

    /// Moves `distance` along direction `theta` (radians), using the
    /// `(sin θ, cos θ)` convention of the equal-angle layout.
    pub fn advance(self, theta: f64, distance: f64) -> Self {
        Point::new(
            self.x + distance * theta.sin(),
            self.y + distance * theta.cos(),
        )
    }

    /// Scales both coordinates about the origin.
    pub fn scaled(self, factor: f64) -> Self {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Distance from the origin, i.e. from the root in radial and unrooted layouts.
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Formats a coordinate for SVG path data.
fn coord(p: Point) -> String {
    format!("{:.3},{:.3}", p.x, p.y)
}

// =#========================================================================#=
// LINK
// =#========================================================================#=
/// Shape of the line drawn from a parent to a child.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkShape {
    /// Radial elbow: arc at the parent's radius from the parent's angle to the
    /// child's angle (`start` → `corner`), then radially out to the child (`end`).
    /// Angles in degrees.
    RadialElbow {
        start: Point,
        corner: Point,
        end: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// Orthogonal elbow: vertical from the parent to the child's row
    /// (`start` → `corner`), then horizontal to the child (`end`).
    Elbow { start: Point, corner: Point, end: Point },
    /// Straight segment, used by the unrooted layout.
    Straight { start: Point, end: Point },
}

impl LinkShape {
    /// Returns the parent end of the link.
    pub fn start(&self) -> Point {
        match self {
            LinkShape::RadialElbow { start, .. }
            | LinkShape::Elbow { start, .. }
            | LinkShape::Straight { start, .. } => *start,
        }
    }

    /// Returns the child end of the link.
    pub fn end(&self) -> Point {
        match self {
            LinkShape::RadialElbow { end, .. }
            | LinkShape::Elbow { end, .. }
            | LinkShape::Straight { end, .. } => *end,
        }
    }

    /// Returns SVG path data drawing this link.
    ///
    /// # Example
    /// ```
    /// use phyloview::layout::{LinkShape, Point};
    ///
    /// let link = LinkShape::Elbow {
    ///     start: Point::new(0.0, 10.0),
    ///     corner: Point::new(0.0, 20.0),
    ///     end: Point::new(5.0, 20.0),
    /// };
    /// assert_eq!(link.svg_path(), "M0.000,10.000V20.000H5.000");
    /// ```
    pub fn svg_path(&self) -> String {
        let mut path = String::new();
        match self {
            LinkShape::RadialElbow {
                start,
                corner,
                end,
                radius,
                start_angle,
                end_angle,
            } => {
                let _ = write!(path, "M{}", coord(*start));
                if start_angle != end_angle {
                    let sweep = u8::from(end_angle > start_angle);
                    let _ = write!(
                        path,
                        "A{r:.3},{r:.3} 0 0,{sweep} {}",
                        coord(*corner),
                        r = radius
                    );
                }
                let _ = write!(path, "L{}", coord(*end));
            }
            LinkShape::Elbow { start, corner, end } => {
                let _ = write!(path, "M{}V{:.3}H{:.3}", coord(*start), corner.y, end.x);
            }
            LinkShape::Straight { start, end } => {
                let _ = write!(path, "M{}L{}", coord(*start), coord(*end));
            }
        }
        path
    }
}

/// A drawn edge from `parent` to `child`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub parent: NodeId,
    pub child: NodeId,
    pub shape: LinkShape,
}

/// Dashed guide from a leaf out to where its label sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extension {
    pub leaf: NodeId,
    pub start: Point,
    pub end: Point,
    /// Where the leaf's label is drawn
    pub label_anchor: Point,
}
