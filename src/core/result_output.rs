// src/core/result_output.rs

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use log::info;

use crate::core::directory_location::DirectoryLocations;
use crate::error::CliError;
use crate::matrix::{Operation, SparseMatrix};

/// How a result reached the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// No non-zero entries; only a notice was printed
    Empty,
    /// Entries printed to the console
    Console,
    /// Entries written to the given file
    File(PathBuf),
}

/// `Result of <label> (RxC):` followed by one `(r, c, v)` line per entry
pub fn render_result(matrix: &SparseMatrix, label: &str) -> String {
    let mut out = format!("Result of {} ({}x{}):\n", label, matrix.rows(), matrix.cols());
    for ((row, col), value) in matrix.sorted_entries() {
        out.push_str(&format!("({}, {}, {})\n", row, col, value));
    }
    out
}

/// Prints a result, or saves it under a timestamped name when it is too
/// large for the console
pub fn present_result<W: Write>(
    matrix: &SparseMatrix,
    operation: Operation,
    locations: &DirectoryLocations,
    console_limit: usize,
    out: &mut W,
) -> Result<Presentation, CliError> {
    let label = operation.label();

    if matrix.is_empty() {
        writeln!(out, "\nResult of {} is an empty matrix (all zeros).", label)
            .map_err(CliError::Console)?;
        return Ok(Presentation::Empty);
    }

    let text = render_result(matrix, label);
    if matrix.rows() <= console_limit && matrix.cols() <= console_limit {
        write!(out, "\n{}", text).map_err(CliError::Console)?;
        return Ok(Presentation::Console);
    }

    locations.ensure_output_dir()?;
    let path = locations.result_filepath(operation, &Local::now());
    fs::write(&path, text).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    info!("Wrote {} entries to {}", matrix.nnz(), path.display());
    writeln!(out, "\nResult saved to: {}", path.display()).map_err(CliError::Console)?;
    Ok(Presentation::File(path))
}
