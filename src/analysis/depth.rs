//! Per-depth leaf coverage statistics

use crate::spatial::quad::QuadTree;
use std::collections::BTreeMap;
use std::fmt;

/// Leaf count at one depth against the theoretical capacity
#[derive(Debug, Clone, Copy)]
pub struct DepthRow {
    /// Subdivision depth
    pub depth: usize,
    /// Maximum quads a full tree holds at this depth (4^depth)
    pub capacity: u64,
    /// Leaves currently at this depth
    pub leaves: usize,
    /// Leaves as a percentage of capacity
    pub percentage: f64,
}

/// Diagnostic of how unevenly the tree grew
///
/// Lists, for every depth present among current full-depth leaves, the
/// leaf count against the 4^depth capacity. A sharply non-uniform
/// distribution indicates the scheduler concentrated refinement on
/// high-error regions.
#[derive(Debug, Clone)]
pub struct DepthReport {
    rows: Vec<DepthRow>,
    total_leaves: usize,
}

impl DepthReport {
    /// Tally the current leaves of a tree by depth
    pub fn from_tree(tree: &QuadTree) -> Self {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for id in tree.collect_leaves(None) {
            if let Some(quad) = tree.get(id) {
                *counts.entry(quad.depth).or_insert(0) += 1;
            }
        }

        let rows = counts
            .into_iter()
            .map(|(depth, leaves)| {
                let capacity = 4u64.saturating_pow(depth as u32);
                DepthRow {
                    depth,
                    capacity,
                    leaves,
                    percentage: 100.0 * leaves as f64 / capacity as f64,
                }
            })
            .collect::<Vec<_>>();
        let total_leaves = rows.iter().map(|row| row.leaves).sum();

        Self { rows, total_leaves }
    }

    /// Rows in ascending depth order
    pub fn rows(&self) -> &[DepthRow] {
        &self.rows
    }

    /// Total number of leaves across all depths
    pub const fn total_leaves(&self) -> usize {
        self.total_leaves
    }
}

impl fmt::Display for DepthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(32))?;
        for row in &self.rows {
            writeln!(
                f,
                "{:3} {:8} {:8} {:7.2}%",
                row.depth, row.capacity, row.leaves, row.percentage
            )?;
        }
        writeln!(f, "{}", "-".repeat(32))?;
        write!(f, "    {:8} {:8} {:7.2}%", "", self.total_leaves, 100.0)
    }
}
