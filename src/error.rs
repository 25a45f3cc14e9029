// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

use crate::matrix::UnknownOperation;

/// Result type alias using the calculator's error
pub type Result<T> = std::result::Result<T, MatrixError>;

/// A `(rows, cols)` pair, used to report operand shapes
pub type Shape = (usize, usize);

/// Errors raised while loading matrices or combining them
#[derive(Error, Debug)]
pub enum MatrixError {
    /// Fewer than two non-blank lines in the source
    #[error("Input file has insufficient data: expected `rows=` and `cols=` header lines")]
    InsufficientData,

    /// `rows=` or `cols=` line missing its prefix or carrying a non-integer value
    #[error("Line {line}: expected `{expected}=<integer>`, found `{found}`")]
    MalformedHeader {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// Element line that is not a parenthesized `(row,col,value)` triple
    #[error("Line {line}: malformed element `{found}` ({reason})")]
    MalformedElement {
        line: usize,
        found: String,
        reason: &'static str,
    },

    /// Element position outside the declared dimensions
    #[error("Line {line}: element ({row}, {col}) is outside a {rows}x{cols} matrix")]
    OutOfBounds {
        line: usize,
        row: i128,
        col: i128,
        rows: usize,
        cols: usize,
    },

    /// Add or subtract with operands of different shape
    #[error("Matrix dimensions must match: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch { left: Shape, right: Shape },

    /// Multiply where the left column count differs from the right row count
    #[error("Matrix sizes do not allow multiplication: {}x{} * {}x{}", .left.0, .left.1, .right.0, .right.1)]
    IncompatibleShape { left: Shape, right: Shape },

    /// Integer overflow while computing a result entry
    #[error("Integer overflow computing entry ({row}, {col})")]
    Overflow { row: usize, col: usize },

    /// Matrix file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the command-line front end
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Operation(#[from] UnknownOperation),

    #[error("The directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("No .txt files found in {}", .0.display())]
    NoInputFiles(PathBuf),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("File error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console error: {0}")]
    Console(#[source] std::io::Error),

    #[error("Input ended before a choice was made")]
    InputClosed,

    #[error("Usage: sparse-calc [<matrix_a.txt> <matrix_b.txt> <add|subtract|multiply>]")]
    Usage,
}

/// Fieldless tag of a [`MatrixError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InsufficientData,
    MalformedHeader,
    MalformedElement,
    OutOfBounds,
    DimensionMismatch,
    IncompatibleShape,
    Overflow,
    Io,
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::InsufficientData => ErrorKind::InsufficientData,
            MatrixError::MalformedHeader { .. } => ErrorKind::MalformedHeader,
            MatrixError::MalformedElement { .. } => ErrorKind::MalformedElement,
            MatrixError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            MatrixError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            MatrixError::IncompatibleShape { .. } => ErrorKind::IncompatibleShape,
            MatrixError::Overflow { .. } => ErrorKind::Overflow,
            MatrixError::Io { .. } => ErrorKind::Io,
        }
    }

    /// True for errors raised while decoding a matrix source
    pub fn is_format_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InsufficientData
                | ErrorKind::MalformedHeader
                | ErrorKind::MalformedElement
                | ErrorKind::OutOfBounds
        )
    }
}
