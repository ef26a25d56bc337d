use std::sync::Arc;

use super::{DistVec, Layout};

/// A row-partitioned matrix stored column-oriented: a list of co-partitioned
/// [`DistVec`] columns.
///
/// The factorization appends one fully built column per pivot round; a column
/// is never touched again once the next one exists.
#[derive(Clone, Debug)]
pub struct DistMatrix {
    layout: Arc<Layout>,
    cols: Vec<DistVec>,
}

impl DistMatrix {
    /// Creates a matrix with no columns (degenerate but well-defined).
    pub fn empty(layout: &Arc<Layout>) -> DistMatrix {
        DistMatrix {
            layout: layout.clone(),
            cols: Vec::new(),
        }
    }

    /// Builds a matrix from row-major dense data, partitioned by the layout.
    pub fn from_dense(layout: &Arc<Layout>, data: &[f64], ncols: usize) -> DistMatrix {
        assert_eq!(data.len(), layout.nrows() * ncols);
        let cols = (0..ncols)
            .map(|j| {
                let col = (0..layout.nrows()).map(|i| data[i * ncols + j]).collect();
                DistVec::from_vec(layout, col)
            })
            .collect();
        DistMatrix {
            layout: layout.clone(),
            cols,
        }
    }

    pub(crate) fn from_cols(layout: &Arc<Layout>, cols: Vec<DistVec>) -> DistMatrix {
        DistMatrix {
            layout: layout.clone(),
            cols,
        }
    }

    /// The shared partition layout.
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.layout.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.cols.len()
    }

    /// Column `j`.
    pub fn col(&self, j: usize) -> &DistVec {
        &self.cols[j]
    }

    /// The columns, oldest first.
    pub fn cols(&self) -> &[DistVec] {
        &self.cols
    }

    /// Value at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cols[j].get(i)
    }

    /// Appends a fully built column.
    pub fn push_col(&mut self, col: DistVec) {
        debug_assert_eq!(*self.layout, **col.layout());
        self.cols.push(col);
    }
}
