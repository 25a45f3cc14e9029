// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod matrix_cli;

pub use error::{CliError, ErrorKind, MatrixError, Result};
pub use matrix::{Operation, SparseMatrix};
