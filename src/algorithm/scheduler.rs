//! Priority-driven split scheduling over the quad tree

use crate::io::error::{Result, invalid_parameter};
use crate::io::image::SourceImage;
use crate::spatial::quad::{QuadId, QuadTree};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Parameters controlling subdivision behavior
#[derive(Clone, Copy, Debug)]
pub struct ModelConfig {
    /// Minimum region dimension below which a quad becomes a leaf
    pub leaf_size: u32,
    /// Exponent weighting region area in the split priority score
    pub area_power: f64,
}

impl ModelConfig {
    /// Validate parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error when `leaf_size` is zero (zero-area regions
    /// would reach the estimator) or `area_power` is negative or not
    /// finite.
    pub fn validate(&self) -> Result<()> {
        if self.leaf_size == 0 {
            return Err(invalid_parameter(
                "leaf_size",
                &self.leaf_size,
                &"must be at least 1",
            ));
        }
        if !self.area_power.is_finite() || self.area_power < 0.0 {
            return Err(invalid_parameter(
                "area_power",
                &self.area_power,
                &"must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Heap entry ranking a pending quad by refinement benefit
///
/// Non-leaves always outrank leaves; within a class, a higher
/// `error * area^p` score wins; exact ties resolve first-in-first-out
/// through the insertion sequence number, keeping runs reproducible.
#[derive(Debug, Clone, Copy)]
struct PendingEntry {
    leaf: bool,
    score: f64,
    seq: u64,
    id: QuadId,
}

impl Ord for PendingEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .leaf
            .cmp(&self.leaf)
            .then_with(|| self.score.total_cmp(&other.score))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PendingEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PendingEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingEntry {}

/// Subdivision model owning the tree and the pending-quad queue
///
/// Every quad ever created that has not been split sits in the queue
/// exactly once. `error_sum` tracks Σ(error × area) over those pending
/// quads so the area-weighted average error never requires a tree scan.
pub struct Subdivision {
    source: SourceImage,
    tree: QuadTree,
    pending: BinaryHeap<PendingEntry>,
    error_sum: f64,
    next_seq: u64,
    area_power: f64,
}

impl Subdivision {
    /// Build the model for a source image
    ///
    /// The root quad is computed immediately and becomes the first
    /// pending entry.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration or an empty source
    /// image.
    pub fn new(source: SourceImage, config: ModelConfig) -> Result<Self> {
        config.validate()?;

        let tree = QuadTree::new(&source, config.leaf_size)?;
        let mut model = Self {
            source,
            tree,
            pending: BinaryHeap::new(),
            error_sum: 0.0,
            next_seq: 0,
            area_power: config.area_power,
        };

        let root = model.tree.root();
        if let Some(quad) = model.tree.get(root) {
            model.error_sum = quad.weighted_error();
        }
        model.push(root);
        Ok(model)
    }

    /// The subdivision tree in its current state
    pub const fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// The decoded source image the model approximates
    pub const fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Number of quads currently pending (never split)
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Area-weighted average error over all pending quads
    ///
    /// Non-increasing across `split_next` calls: replacing a region by
    /// its four quadrants can only reduce or preserve its total
    /// weighted error.
    pub fn average_error(&self) -> f64 {
        let total_area = u64::from(self.source.width()) * u64::from(self.source.height());
        self.error_sum / total_area as f64
    }

    /// Split the highest-priority pending quad
    ///
    /// Pops the best entry, splits that quad into four children, moves
    /// its error contribution to the children, and enqueues them. A
    /// popped quad too small to partition without a zero-area child
    /// (width or height below 2) is pushed back unchanged, making the
    /// call a no-op; the queue therefore never empties.
    ///
    /// # Errors
    ///
    /// Returns an error only if an internal invariant is violated
    /// (dangling handle or empty child region).
    pub fn split_next(&mut self) -> Result<()> {
        let Some(entry) = self.pending.pop() else {
            // Unreachable after construction; the queue retains leaves
            return Ok(());
        };

        let Some(quad) = self.tree.get(entry.id) else {
            return Ok(());
        };

        if quad.region.width() < 2 || quad.region.height() < 2 {
            self.pending.push(entry);
            return Ok(());
        }

        self.error_sum -= quad.weighted_error();
        let children = self.tree.split(entry.id, &self.source)?;
        for child in children {
            if let Some(node) = self.tree.get(child) {
                self.error_sum += node.weighted_error();
            }
            self.push(child);
        }
        Ok(())
    }

    fn push(&mut self, id: QuadId) {
        let Some(quad) = self.tree.get(id) else {
            return;
        };
        let entry = PendingEntry {
            leaf: quad.is_leaf,
            score: quad.error * (quad.area as f64).powf(self.area_power),
            seq: self.next_seq,
            id,
        };
        self.next_seq += 1;
        self.pending.push(entry);
    }
}
