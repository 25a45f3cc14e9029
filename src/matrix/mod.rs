// src/matrix/mod.rs

pub mod matrix_format;
pub mod operation;
pub mod sparse_matrix;

// Re-export main types for convenience
pub use matrix_format::{parse_matrix, read_matrix, write_matrix};
pub use operation::{Operation, UnknownOperation};
pub use sparse_matrix::SparseMatrix;
