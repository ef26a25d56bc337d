use std::sync::Arc;

use ndarray::ArrayView2;

use super::{DistVec, Layout, Row};

/// A horizontally partitioned training dataset.
pub struct Dataset {
    layout: Arc<Layout>,
    chunks: Vec<Vec<Row>>,
}

impl Dataset {
    /// Partitions the given rows into `nparts` contiguous chunks.
    pub fn from_rows(rows: Vec<Row>, nparts: usize) -> Dataset {
        let layout = Arc::new(Layout::even(rows.len(), nparts));
        let mut chunks: Vec<Vec<Row>> = (0..layout.nparts())
            .map(|p| Vec::with_capacity(layout.range(p).len()))
            .collect();
        for (i, row) in rows.into_iter().enumerate() {
            chunks[layout.part_of(i)].push(row);
        }
        Dataset { layout, chunks }
    }

    /// Builds a labeled dataset from a dense feature matrix, one row per
    /// sample.
    pub fn from_array(x: &ArrayView2<f64>, y: &[f64], nparts: usize) -> Dataset {
        assert_eq!(x.nrows(), y.len());
        let rows = x
            .outer_iter()
            .zip(y.iter())
            .map(|(xi, &yi)| Row::dense(xi.to_vec()).with_label(yi))
            .collect();
        Dataset::from_rows(rows, nparts)
    }

    /// The shared partition layout.
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.layout.nrows()
    }

    /// Row at global index `i`.
    pub fn row(&self, i: usize) -> &Row {
        let p = self.layout.part_of(i);
        &self.chunks[p][i - self.layout.range(p).start]
    }

    /// Global index of the first sparse row, if any.
    pub fn first_sparse(&self) -> Option<usize> {
        let mut at = 0;
        for chunk in &self.chunks {
            for row in chunk {
                if row.is_sparse() {
                    return Some(at);
                }
                at += 1;
            }
        }
        None
    }

    /// Extracts the labels as a co-partitioned vector; rows without a label
    /// yield 0.0 (rejected later at solve entry).
    pub fn labels(&self) -> DistVec {
        let chunks = self
            .chunks
            .iter()
            .map(|chunk| chunk.iter().map(|r| r.label().unwrap_or(0.0)).collect())
            .collect();
        DistVec::from_chunks(&self.layout, chunks)
    }

    pub(crate) fn chunks(&self) -> &[Vec<Row>] {
        &self.chunks
    }
}
