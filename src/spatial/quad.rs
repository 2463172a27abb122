//! Arena-allocated quad tree with eager per-region color estimation

use crate::io::error::{Result, computation_error};
use crate::io::image::SourceImage;
use crate::spatial::region::Region;

/// Stable handle of a quad inside the arena
///
/// Handles are never invalidated: the arena only grows, and quads are
/// never removed. The split scheduler keeps handles, not references,
/// so the tree stays freely mutable while the priority queue lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadId(usize);

impl QuadId {
    #[allow(dead_code)]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the quad in the arena
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One node of the subdivision tree
///
/// Color, error, leaf flag, and area are computed eagerly when the quad
/// is constructed and never recomputed.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    /// Region of the source image this quad covers
    pub region: Region,
    /// Subdivision depth; the root is at depth 0
    pub depth: usize,
    /// Representative flat fill color
    pub color: [u8; 3],
    /// Luma-weighted standard deviation of the region around `color`
    pub error: f64,
    /// Pixel count of the region
    pub area: u64,
    /// True iff the region is at or below the leaf-size threshold
    pub is_leaf: bool,
    children: Option<[QuadId; 4]>,
}

impl Quad {
    /// Child handles in top-left, top-right, bottom-left, bottom-right
    /// order, if this quad has been split
    pub const fn children(&self) -> Option<[QuadId; 4]> {
        self.children
    }

    /// Error contribution of this quad to the global error sum
    pub fn weighted_error(&self) -> f64 {
        self.error * self.area as f64
    }
}

/// Arena of quads forming the subdivision tree
///
/// The root quad covers the whole source image. Splitting replaces a
/// quad structurally with four children partitioning its region; the
/// split quad remains in the arena as an internal node.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Quad>,
    leaf_size: u32,
}

impl QuadTree {
    /// Build a tree whose root covers the given source image
    ///
    /// # Errors
    ///
    /// Returns an error if the root region color estimation fails,
    /// which only happens for an empty source image.
    pub fn new(source: &SourceImage, leaf_size: u32) -> Result<Self> {
        let mut tree = Self {
            nodes: Vec::new(),
            leaf_size,
        };
        tree.construct(source, source.full_region(), 0)?;
        Ok(tree)
    }

    /// Handle of the root quad
    pub const fn root(&self) -> QuadId {
        QuadId(0)
    }

    /// Minimum region dimension below which quads become leaves
    pub const fn leaf_size(&self) -> u32 {
        self.leaf_size
    }

    /// Number of quads ever created, split or not
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the arena holds no quads
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a quad by handle
    pub fn get(&self, id: QuadId) -> Option<&Quad> {
        self.nodes.get(id.0)
    }

    /// Split a quad into its four quadrant children
    ///
    /// The children are constructed eagerly at `depth + 1` and recorded
    /// on the parent. The scheduler guarantees each quad is split at
    /// most once; splitting twice would discard the prior children.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown handle or when a child region
    /// color estimation fails (zero-area child), neither of which the
    /// scheduler produces.
    pub fn split(&mut self, id: QuadId, source: &SourceImage) -> Result<[QuadId; 4]> {
        let parent = self
            .get(id)
            .ok_or_else(|| computation_error("quad split", &"unknown quad handle"))?;
        let quadrants = parent.region.quadrants();
        let child_depth = parent.depth + 1;

        let mut children = [QuadId(0); 4];
        for (child, quadrant) in children.iter_mut().zip(quadrants) {
            *child = self.construct(source, quadrant, child_depth)?;
        }

        if let Some(node) = self.nodes.get_mut(id.0) {
            node.children = Some(children);
        }

        Ok(children)
    }

    /// Collect leaf handles in deterministic traversal order
    ///
    /// A quad with no children is always a leaf. With `Some(depth)`,
    /// any quad at or beyond that depth is treated as a leaf even if it
    /// has children, supporting rendering at coarser depths than the
    /// tree currently reaches. Traversal order is fixed: top-left,
    /// top-right, bottom-left, bottom-right, recursively.
    pub fn collect_leaves(&self, max_depth: Option<usize>) -> Vec<QuadId> {
        let mut leaves = Vec::new();
        self.collect_into(self.root(), max_depth, &mut leaves);
        leaves
    }

    fn collect_into(&self, id: QuadId, max_depth: Option<usize>, leaves: &mut Vec<QuadId>) {
        let Some(quad) = self.get(id) else {
            return;
        };

        let descend = match (quad.children, max_depth) {
            (None, _) => None,
            (Some(_), Some(limit)) if quad.depth >= limit => None,
            (Some(children), _) => Some(children),
        };

        match descend {
            None => leaves.push(id),
            Some(children) => {
                for child in children {
                    self.collect_into(child, max_depth, leaves);
                }
            }
        }
    }

    fn construct(&mut self, source: &SourceImage, region: Region, depth: usize) -> Result<QuadId> {
        let (color, error) = source.region_histogram(&region).estimate()?;
        let is_leaf = region.width() <= self.leaf_size || region.height() <= self.leaf_size;

        let id = QuadId(self.nodes.len());
        self.nodes.push(Quad {
            region,
            depth,
            color,
            error,
            area: region.area(),
            is_leaf,
            children: None,
        });
        Ok(id)
    }
}
