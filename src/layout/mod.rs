//! Layout engine: turns a [PhyloTree] into drawable geometry.
//!
//! A [Layout] is computed for one tree and one [LayoutKind]:
//! * [LayoutKind::Radial] - circular dendrogram ([radial])
//! * [LayoutKind::Rectangular] - left-to-right cladogram ([rectangular])
//! * [LayoutKind::Unrooted] - equal-angle plot ([unrooted])
//!
//! Every node receives
//! * an ordinal coordinate (angle in degrees, y, or direction in radians),
//! * a metric coordinate (radius, x, or scaled path length from the root),
//! * a Cartesian [Point].
//!
//! Every non-root node gets a [Link] from its parent, and every leaf an
//! [Extension] out to its label anchor. Everything is stored in side tables
//! indexed by [NodeId]; the tree itself is never touched.
//!
//! Toggling the [LinkMode] with [`Layout::set_link_mode`] recomputes metric
//! values, points, links and extensions, but keeps the ordinal placement.
//!
//! # Example
//! ```
//! use phyloview::layout::{Layout, LayoutConfig, LayoutKind};
//! use phyloview::parse_newick_str;
//!
//! let tree = parse_newick_str("((Kea:1,Kaka:1):1,Kakapo:2);").unwrap();
//! let config = LayoutConfig::default().with_kind(LayoutKind::Rectangular);
//! let layout = Layout::compute(&tree, &config);
//!
//! assert_eq!(layout.point(2).y, 0.0);
//! assert_eq!(layout.point(4).x, config.depth_extent);
//! assert_eq!(layout.links().len(), tree.num_nodes() - 1);
//! ```

pub mod config;
pub mod link;
pub(crate) mod placement;
pub mod radial;
pub mod rectangular;
pub mod unrooted;

pub use config::{LayoutConfig, LayoutKind, LinkMode, UnknownOption};
pub use link::{Extension, Link, LinkShape, Point};
pub use unrooted::Sector;

use crate::model::{NodeId, PhyloTree};
use serde::Serialize;
use tracing::debug;

/// Metric values and points produced by one projection pass.
pub(crate) struct Projection {
    pub(crate) metric: Vec<f64>,
    pub(crate) points: Vec<Point>,
}

/// Placement of a single node, as reported by [`Layout::placement`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePlacement {
    pub id: NodeId,
    pub ordinal: f64,
    pub metric: f64,
    pub point: Point,
}

// =#========================================================================#=
// LAYOUT
// =#========================================================================#=
/// Computed geometry of a tree, see [module documentation](self).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    config: LayoutConfig,
    ordinal: Vec<f64>,
    /// Ordinal distance between adjacent leaves
    leaf_step: f64,
    /// Unrooted only, empty otherwise
    sectors: Vec<Sector>,
    metric: Vec<f64>,
    points: Vec<Point>,
    /// Links in pre-order of their child
    links: Vec<Link>,
    /// Index into `links` per child node
    #[serde(skip)]
    link_of: Vec<Option<usize>>,
    /// Extensions in leaf order
    extensions: Vec<Extension>,
    /// Index into `extensions` per leaf
    #[serde(skip)]
    extension_of: Vec<Option<usize>>,
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl Layout {
    /// Computes the full layout of `tree` for the kind and link mode in `config`.
    ///
    /// Out-of-range geometry settings are replaced first, see
    /// [`LayoutConfig::normalized`].
    pub fn compute(tree: &PhyloTree, config: &LayoutConfig) -> Self {
        let config = &config.normalized();
        let (ordinal, sectors, leaf_step) = match config.kind {
            LayoutKind::Radial => {
                let (angles, step) = radial::ordinal(tree, config);
                (angles, Vec::new(), step)
            }
            LayoutKind::Rectangular => {
                let (ys, step) = rectangular::ordinal(tree, config);
                (ys, Vec::new(), step)
            }
            LayoutKind::Unrooted => unrooted::ordinal(tree),
        };

        let mut layout = Layout {
            config: config.clone(),
            ordinal,
            leaf_step,
            sectors,
            metric: Vec::new(),
            points: Vec::new(),
            links: Vec::new(),
            link_of: Vec::new(),
            extensions: Vec::new(),
            extension_of: Vec::new(),
        };
        layout.place(tree);
        layout
    }

    /// Switches between proportional and per-generation link lengths.
    ///
    /// Only metric values, points, links and extensions are recomputed; the
    /// ordinal placement (and unrooted sectors) stay as they are.
    ///
    /// # Panics
    /// Panics if `tree` is not the tree this layout was computed for
    /// (different node count).
    pub fn set_link_mode(&mut self, tree: &PhyloTree, mode: LinkMode) {
        assert_eq!(
            tree.num_nodes(),
            self.ordinal.len(),
            "layout belongs to a different tree"
        );
        self.config.link_mode = mode;
        self.place(tree);
    }

    /// Runs the metric pass and derives links and extensions from it.
    fn place(&mut self, tree: &PhyloTree) {
        let config = &self.config;
        let Projection { metric, points } = match config.kind {
            LayoutKind::Radial => radial::project(tree, config, &self.ordinal),
            LayoutKind::Rectangular => rectangular::project(tree, config, &self.ordinal),
            LayoutKind::Unrooted => unrooted::project(tree, config, &self.ordinal),
        };

        let mut links = Vec::with_capacity(tree.num_nodes().saturating_sub(1));
        let mut link_of = vec![None; tree.num_nodes()];
        let mut extensions = Vec::with_capacity(tree.num_leaves());
        let mut extension_of = vec![None; tree.num_nodes()];

        for node in tree.pre_order_iter() {
            let id = node.id();
            if let Some(parent) = node.parent() {
                let shape = match config.kind {
                    LayoutKind::Radial => radial::link(&self.ordinal, &metric, parent, id),
                    LayoutKind::Rectangular => rectangular::link(&points, parent, id),
                    LayoutKind::Unrooted => unrooted::link(&points, parent, id),
                };
                link_of[id] = Some(links.len());
                links.push(Link {
                    parent,
                    child: id,
                    shape,
                });
            }
            if node.is_leaf() {
                let extension = match config.kind {
                    LayoutKind::Radial => radial::extension(config, &self.ordinal, &points, id),
                    LayoutKind::Rectangular => rectangular::extension(config, &points, id),
                    LayoutKind::Unrooted => {
                        unrooted::extension(config, &self.ordinal, &points, id)
                    }
                };
                extension_of[id] = Some(extensions.len());
                extensions.push(extension);
            }
        }

        debug!(
            kind = ?config.kind,
            link_mode = ?config.link_mode,
            nodes = tree.num_nodes(),
            "layout placed"
        );

        self.metric = metric;
        self.points = points;
        self.links = links;
        self.link_of = link_of;
        self.extensions = extensions;
        self.extension_of = extension_of;
    }
}

// ============================================================================
// Queries (pub)
// ============================================================================
impl Layout {
    /// Returns the layout kind this layout was computed for.
    pub fn kind(&self) -> LayoutKind {
        self.config.kind
    }

    /// Returns the current link mode.
    pub fn link_mode(&self) -> LinkMode {
        self.config.link_mode
    }

    /// Returns the (normalized) configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Returns the number of nodes this layout places.
    pub fn num_nodes(&self) -> usize {
        self.ordinal.len()
    }

    /// Returns the ordinal coordinate of `id`: angle in degrees (radial),
    /// y (rectangular) or drawing direction in radians (unrooted).
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    pub fn ordinal(&self, id: NodeId) -> f64 {
        self.ordinal[id]
    }

    /// Returns the metric coordinate of `id`: radius (radial), x
    /// (rectangular) or scaled path length from the root (unrooted).
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    pub fn metric(&self, id: NodeId) -> f64 {
        self.metric[id]
    }

    /// Returns the Cartesian position of `id`.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    pub fn point(&self, id: NodeId) -> Point {
        self.points[id]
    }

    /// Returns all placement values of `id`, or `None` if out of bounds.
    pub fn placement(&self, id: NodeId) -> Option<NodePlacement> {
        (id < self.num_nodes()).then(|| NodePlacement {
            id,
            ordinal: self.ordinal[id],
            metric: self.metric[id],
            point: self.points[id],
        })
    }

    /// Ordinal distance between two adjacent leaves.
    pub fn leaf_step(&self) -> f64 {
        self.leaf_step
    }

    /// Returns the equal-angle sector of `id` (unrooted layouts only).
    pub fn sector(&self, id: NodeId) -> Option<Sector> {
        self.sectors.get(id).copied()
    }

    /// Returns all links, ordered by their child in pre-order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the link drawn into `child`; `None` for the root.
    pub fn link_to(&self, child: NodeId) -> Option<&Link> {
        self.link_of.get(child).copied().flatten().map(|i| &self.links[i])
    }

    /// Returns all leaf extensions in leaf order.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Returns the extension of `leaf`; `None` for internal nodes.
    pub fn extension(&self, leaf: NodeId) -> Option<&Extension> {
        self.extension_of
            .get(leaf)
            .copied()
            .flatten()
            .map(|i| &self.extensions[i])
    }

    /// Returns where the label of `leaf` is drawn; `None` for internal nodes.
    pub fn label_anchor(&self, leaf: NodeId) -> Option<Point> {
        self.extension(leaf).map(|e| e.label_anchor)
    }
}
