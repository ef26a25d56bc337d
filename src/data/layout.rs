use std::ops::Range;

use crate::cluster::NodeId;

/// Partition layout of a row range: contiguous chunks of rows, each resident
/// on one node.
///
/// Every distributed vector and matrix shares its layout (via `Arc`), so
/// chunks are always co-indexed across structures.
#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    starts: Vec<usize>,
    nodes: Vec<NodeId>,
}

impl Layout {
    /// Splits `nrows` rows into `nparts` balanced contiguous partitions, one
    /// per simulated node.
    pub fn even(nrows: usize, nparts: usize) -> Layout {
        let nparts = nparts.max(1);
        let base = nrows / nparts;
        let rem = nrows % nparts;
        let mut starts = Vec::with_capacity(nparts + 1);
        let mut at = 0;
        starts.push(0);
        for p in 0..nparts {
            at += base + if p < rem { 1 } else { 0 };
            starts.push(at);
        }
        Layout {
            starts,
            nodes: (0..nparts).map(NodeId).collect(),
        }
    }

    /// Total number of rows.
    pub fn nrows(&self) -> usize {
        *self.starts.last().unwrap_or(&0)
    }

    /// Number of partitions.
    pub fn nparts(&self) -> usize {
        self.nodes.len()
    }

    /// Row range of partition `p`.
    pub fn range(&self, p: usize) -> Range<usize> {
        self.starts[p]..self.starts[p + 1]
    }

    /// Partition containing `row`.
    pub fn part_of(&self, row: usize) -> usize {
        debug_assert!(row < self.nrows());
        self.starts.partition_point(|&s| s <= row) - 1
    }

    /// Home node of the partition containing `row`.
    pub fn node_of(&self, row: usize) -> NodeId {
        self.nodes[self.part_of(row)]
    }
}
