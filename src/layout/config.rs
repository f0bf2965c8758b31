//! Layout configuration.
//!
//! [LayoutConfig] is configured builder-style, e.g.
//! `LayoutConfig::default().with_kind(LayoutKind::Unrooted)`, and can also be
//! deserialized from JSON (missing fields take their defaults).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Default angular width of the radial leaf band in degrees
/// (gap at 0° avoids wrap-around ambiguity between first and last leaf)
pub const DEFAULT_ANGULAR_WIDTH: f64 = 355.0;
/// Default radius reached by the deepest node
pub const DEFAULT_INNER_RADIUS: f64 = 310.0;
/// Default ordinal distance between adjacent leaves in rectangular layout
pub const DEFAULT_LEAF_SEPARATION: f64 = 20.0;
/// Default depth reached by the deepest node in rectangular layout
pub const DEFAULT_DEPTH_EXTENT: f64 = 600.0;
/// Default room for labels between tree extent and plot edge
pub const DEFAULT_LABEL_MARGIN: f64 = 170.0;
/// Default gap between end of a leaf extension and its label
pub const DEFAULT_LABEL_OFFSET: f64 = 4.0;
/// Default length of unrooted tip extensions
pub const DEFAULT_EXTENSION_LENGTH: f64 = 20.0;

// =#========================================================================#=
// LAYOUT KIND & LINK MODE
// =#========================================================================#=
/// The three visual topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Circular dendrogram: leaves on an angular band, depth as radius
    #[default]
    Radial,
    /// Rectangular cladogram: leaves on a vertical band, depth along x
    Rectangular,
    /// Unrooted equal-angle plot
    Unrooted,
}

/// How branch lengths translate into drawn distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Drawn distance proportional to branch length (phylogram)
    #[default]
    Variable,
    /// One unit per generation, branch lengths ignored (cladogram)
    Constant,
}

/// Error for unrecognized layout kind or link mode names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout option '{0}'")]
pub struct UnknownOption(pub String);

impl FromStr for LayoutKind {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radial" | "circular" => Ok(LayoutKind::Radial),
            "rectangular" => Ok(LayoutKind::Rectangular),
            "unrooted" | "equal-angle" => Ok(LayoutKind::Unrooted),
            _ => Err(UnknownOption(s.to_string())),
        }
    }
}

impl FromStr for LinkMode {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "variable" => Ok(LinkMode::Variable),
            "constant" => Ok(LinkMode::Constant),
            _ => Err(UnknownOption(s.to_string())),
        }
    }
}

// =#========================================================================#=
// LAYOUT CONFIG
// =#========================================================================#=
/// Geometry settings shared by all layout kinds.
///
/// Lengths are in plot units (e.g. SVG user units), angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Which topology to draw
    pub kind: LayoutKind,
    /// Proportional or per-generation depth
    pub link_mode: LinkMode,
    /// Radial: angular band the leaves are spread over, in degrees
    pub angular_width: f64,
    /// Radial and unrooted: distance of the farthest node from the root
    pub inner_radius: f64,
    /// Rectangular: distance between adjacent leaves
    pub leaf_separation: f64,
    /// Rectangular: x coordinate of the deepest node
    pub depth_extent: f64,
    /// Room reserved for labels beyond the tree; highlight regions reach this far
    pub label_margin: f64,
    /// Gap between the end of a leaf extension and the label anchor
    pub label_offset: f64,
    /// Unrooted: how far leaf tips are extended along their branch
    pub extension_length: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            kind: LayoutKind::default(),
            link_mode: LinkMode::default(),
            angular_width: DEFAULT_ANGULAR_WIDTH,
            inner_radius: DEFAULT_INNER_RADIUS,
            leaf_separation: DEFAULT_LEAF_SEPARATION,
            depth_extent: DEFAULT_DEPTH_EXTENT,
            label_margin: DEFAULT_LABEL_MARGIN,
            label_offset: DEFAULT_LABEL_OFFSET,
            extension_length: DEFAULT_EXTENSION_LENGTH,
        }
    }
}

impl LayoutConfig {
    /// Sets the layout kind.
    pub fn with_kind(mut self, kind: LayoutKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the link mode.
    pub fn with_link_mode(mut self, link_mode: LinkMode) -> Self {
        self.link_mode = link_mode;
        self
    }

    /// Sets the radial leaf band width in degrees. Values above `360` are
    /// clamped; non-positive ones fall back to [DEFAULT_ANGULAR_WIDTH].
    pub fn with_angular_width(mut self, degrees: f64) -> Self {
        self.angular_width = normalized_angular_width(degrees);
        self
    }

    /// Sets the radius of the farthest node (radial and unrooted).
    pub fn with_inner_radius(mut self, radius: f64) -> Self {
        self.inner_radius = radius;
        self
    }

    /// Sets the distance between adjacent leaves (rectangular).
    pub fn with_leaf_separation(mut self, separation: f64) -> Self {
        self.leaf_separation = separation;
        self
    }

    /// Sets the depth of the deepest node (rectangular).
    pub fn with_depth_extent(mut self, extent: f64) -> Self {
        self.depth_extent = extent;
        self
    }

    /// Sets the room reserved for labels beyond the tree.
    pub fn with_label_margin(mut self, margin: f64) -> Self {
        self.label_margin = margin;
        self
    }

    /// Sets the length of unrooted tip extensions.
    pub fn with_extension_length(mut self, length: f64) -> Self {
        self.extension_length = length;
        self
    }

    /// Returns a copy with every geometry setting in its valid range.
    ///
    /// Configurations deserialized from JSON skip the builder, so
    /// [Layout::compute](crate::layout::Layout::compute) normalizes them:
    /// * `angular_width` ends up in `(0, 360]`, see
    ///   [`with_angular_width`](Self::with_angular_width)
    /// * non-positive or non-finite `inner_radius`, `leaf_separation` and
    ///   `depth_extent` are replaced by their defaults
    pub fn normalized(&self) -> LayoutConfig {
        let defaults = LayoutConfig::default();
        let positive_or = |name: &str, value: f64, default: f64| {
            if value > 0.0 && value.is_finite() {
                value
            } else {
                warn!(setting = name, value, default, "invalid layout setting replaced");
                default
            }
        };

        LayoutConfig {
            angular_width: normalized_angular_width(self.angular_width),
            inner_radius: positive_or("inner_radius", self.inner_radius, defaults.inner_radius),
            leaf_separation: positive_or(
                "leaf_separation",
                self.leaf_separation,
                defaults.leaf_separation,
            ),
            depth_extent: positive_or("depth_extent", self.depth_extent, defaults.depth_extent),
            ..self.clone()
        }
    }

    /// Returns the metric extent of the tree itself: radius for radial and
    /// unrooted layouts, depth for rectangular ones.
    pub fn tree_extent(&self) -> f64 {
        match self.kind {
            LayoutKind::Radial | LayoutKind::Unrooted => self.inner_radius,
            LayoutKind::Rectangular => self.depth_extent,
        }
    }

    /// Returns the metric extent of the plot including the label margin.
    pub fn plot_extent(&self) -> f64 {
        self.tree_extent() + self.label_margin
    }
}

fn normalized_angular_width(degrees: f64) -> f64 {
    if degrees > 0.0 && degrees.is_finite() {
        degrees.min(360.0)
    } else {
        warn!(degrees, "invalid angular width, using default");
        DEFAULT_ANGULAR_WIDTH
    }
}
