//! Rows, partition layout and chunked distributed structures.
mod dataset;
mod layout;
mod matrix;
mod row;
mod vec;

pub use dataset::Dataset;
pub use layout::Layout;
pub use matrix::DistMatrix;
pub use row::{Row, RowData};
pub use vec::DistVec;
