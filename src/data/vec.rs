use std::sync::Arc;

use rayon::prelude::*;

use super::Layout;

/// A row-partitioned vector, one chunk per partition.
///
/// Elementwise passes consume immutable inputs and produce new vectors; the
/// chunked layout mirrors the distributed storage model even though all chunks
/// live in one process.
#[derive(Clone, Debug)]
pub struct DistVec {
    layout: Arc<Layout>,
    chunks: Vec<Vec<f64>>,
}

impl DistVec {
    /// Creates a zero vector over the given layout.
    pub fn zeros(layout: &Arc<Layout>) -> DistVec {
        let chunks = (0..layout.nparts())
            .map(|p| vec![0.0; layout.range(p).len()])
            .collect();
        DistVec {
            layout: layout.clone(),
            chunks,
        }
    }

    /// Partitions a plain vector according to the layout.
    pub fn from_vec(layout: &Arc<Layout>, values: Vec<f64>) -> DistVec {
        assert_eq!(values.len(), layout.nrows());
        let chunks = (0..layout.nparts())
            .map(|p| values[layout.range(p)].to_vec())
            .collect();
        DistVec {
            layout: layout.clone(),
            chunks,
        }
    }

    pub(crate) fn from_chunks(layout: &Arc<Layout>, chunks: Vec<Vec<f64>>) -> DistVec {
        debug_assert_eq!(chunks.len(), layout.nparts());
        DistVec {
            layout: layout.clone(),
            chunks,
        }
    }

    /// The shared partition layout.
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.layout.nrows()
    }

    /// Whether the vector has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at global row `i`.
    pub fn get(&self, i: usize) -> f64 {
        let p = self.layout.part_of(i);
        self.chunks[p][i - self.layout.range(p).start]
    }

    /// Collects the chunks back into one plain vector.
    pub fn to_vec(&self) -> Vec<f64> {
        self.chunks.iter().flatten().copied().collect()
    }

    /// Elementwise map pass producing a new vector.
    pub fn map(&self, f: impl Fn(f64) -> f64 + Sync) -> DistVec {
        let chunks = self
            .chunks
            .par_iter()
            .map(|ch| ch.iter().map(|&v| f(v)).collect())
            .collect();
        DistVec {
            layout: self.layout.clone(),
            chunks,
        }
    }

    /// Elementwise zip pass over two co-partitioned vectors.
    pub fn zip_map(&self, other: &DistVec, f: impl Fn(f64, f64) -> f64 + Sync) -> DistVec {
        debug_assert_eq!(self.layout, other.layout);
        let chunks = self
            .chunks
            .par_iter()
            .zip(other.chunks.par_iter())
            .map(|(a, b)| a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect())
            .collect();
        DistVec {
            layout: self.layout.clone(),
            chunks,
        }
    }

    pub(crate) fn chunks(&self) -> &[Vec<f64>] {
        &self.chunks
    }

    pub(crate) fn chunks_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.chunks
    }
}
