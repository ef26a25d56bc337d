/// Feature values of a row.
#[derive(Clone, Debug)]
pub enum RowData {
    /// Dense numeric values.
    Dense(Vec<f64>),
    /// Sparse index/value pairs (declared for completeness, rejected by the
    /// factorization).
    Sparse(Vec<(usize, f64)>),
}

/// A single feature row: numeric values, categorical bin identifiers, an
/// optional ±1 label and the precomputed squared L2 norm.
///
/// Rows are read-only once extracted from a dataset. Categorical columns are
/// treated one-hot: each contributes 1.0 to the norm and 1.0 to a dot product
/// when the bins match.
#[derive(Clone, Debug)]
pub struct Row {
    data: RowData,
    cats: Vec<usize>,
    label: Option<f64>,
    norm_sq: f64,
}

impl Row {
    /// Creates a dense unlabeled row with no categorical columns.
    pub fn dense(values: Vec<f64>) -> Row {
        let norm_sq = values.iter().map(|v| v * v).sum();
        Row {
            data: RowData::Dense(values),
            cats: Vec::new(),
            label: None,
            norm_sq,
        }
    }

    /// Creates a sparse row (carried through the data model, rejected at
    /// factorization entry).
    pub fn sparse(entries: Vec<(usize, f64)>) -> Row {
        let norm_sq = entries.iter().map(|(_, v)| v * v).sum();
        Row {
            data: RowData::Sparse(entries),
            cats: Vec::new(),
            label: None,
            norm_sq,
        }
    }

    /// Attaches a label.
    pub fn with_label(mut self, label: f64) -> Self {
        self.label = Some(label);
        self
    }

    /// Attaches categorical bin identifiers.
    pub fn with_cats(mut self, cats: Vec<usize>) -> Self {
        self.norm_sq += cats.len() as f64;
        self.cats = cats;
        self
    }

    /// The row's label, if any.
    pub fn label(&self) -> Option<f64> {
        self.label
    }

    /// The precomputed squared L2 norm.
    pub fn norm_sq(&self) -> f64 {
        self.norm_sq
    }

    /// Whether the row uses the sparse representation.
    pub fn is_sparse(&self) -> bool {
        matches!(self.data, RowData::Sparse(_))
    }

    /// Dense feature values.
    ///
    /// Panics for sparse rows; the factorization rejects those before any row
    /// is read.
    pub fn values(&self) -> &[f64] {
        match &self.data {
            RowData::Dense(values) => values,
            RowData::Sparse(_) => panic!("sparse rows are not supported"),
        }
    }

    /// Dot product of two rows, categorical one-hot columns included.
    pub fn dot(&self, other: &Row) -> f64 {
        let mut sum: f64 = self
            .values()
            .iter()
            .zip(other.values())
            .map(|(a, b)| a * b)
            .sum();
        for (a, b) in self.cats.iter().zip(other.cats.iter()) {
            if a == b {
                sum += 1.0;
            }
        }
        sum
    }
}
