// src/matrix/matrix_format.rs
//
// Text format for a single matrix:
//
//     rows=<integer>
//     cols=<integer>
//     (row,col,value)
//     ...
//
// Lines are trimmed and blank lines skipped before validation.

use std::fs;
use std::num::IntErrorKind;
use std::path::Path;
use std::str::FromStr;

use log::info;

use crate::error::{MatrixError, Result};
use crate::matrix::sparse_matrix::SparseMatrix;

/// Parses the textual representation of a matrix
///
/// Later element lines overwrite earlier ones sharing a key. An element with
/// value 0 goes through [`SparseMatrix::set`], so it clears the key instead of
/// being stored.
pub fn parse_matrix(source: &str) -> Result<SparseMatrix> {
    // (1-based source line number, trimmed content)
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (Some(rows_line), Some(cols_line)) = (lines.next(), lines.next()) else {
        return Err(MatrixError::InsufficientData);
    };
    let rows = parse_header(rows_line, "rows")?;
    let cols = parse_header(cols_line, "cols")?;

    let mut matrix = SparseMatrix::new(rows, cols);
    for (line_number, line) in lines {
        let (row, col, value) = parse_element(line_number, line)?;
        let (row, col) = check_bounds(line_number, row, col, rows, cols)?;
        matrix.set(row, col, value);
    }
    Ok(matrix)
}

/// Reads and parses a matrix file in one scoped read
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<SparseMatrix> {
    let path = path.as_ref();
    info!("Loading matrix from '{}'", path.display());

    let source = fs::read_to_string(path).map_err(|source| MatrixError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let matrix = parse_matrix(&source)?;

    info!(
        "Loaded {}x{} matrix with {} non-zero entries",
        matrix.rows(),
        matrix.cols(),
        matrix.nnz()
    );
    Ok(matrix)
}

/// Writes a matrix back in the input format, entries in row-major order
pub fn write_matrix(matrix: &SparseMatrix) -> String {
    let mut out = format!("rows={}\ncols={}\n", matrix.rows(), matrix.cols());
    for ((row, col), value) in matrix.sorted_entries() {
        out.push_str(&format!("({},{},{})\n", row, col, value));
    }
    out
}

impl FromStr for SparseMatrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        parse_matrix(s)
    }
}

fn parse_header((line_number, line): (usize, &str), name: &'static str) -> Result<usize> {
    let malformed = || MatrixError::MalformedHeader {
        line: line_number,
        expected: name,
        found: line.to_string(),
    };

    let value = line
        .strip_prefix(name)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(malformed)?;
    value.trim().parse::<usize>().map_err(|_| malformed())
}

/// Parses a row or column index
///
/// Any well-formed integer is accepted; values beyond `i128` saturate so they
/// still reach the bounds check instead of reading as malformed.
fn parse_index(field: &str) -> Option<i128> {
    match field.parse::<i128>() {
        Ok(index) => Some(index),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i128::MAX),
            IntErrorKind::NegOverflow => Some(i128::MIN),
            _ => None,
        },
    }
}

fn parse_element(line_number: usize, line: &str) -> Result<(i128, i128, i64)> {
    let malformed = |reason| MatrixError::MalformedElement {
        line: line_number,
        found: line.to_string(),
        reason,
    };

    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| malformed("expected `(row,col,value)`"))?;

    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [row, col, value] = fields[..] else {
        return Err(malformed("expected exactly three fields"));
    };

    let not_integer = || malformed("fields must be integers");
    let row = parse_index(row).ok_or_else(not_integer)?;
    let col = parse_index(col).ok_or_else(not_integer)?;
    let value = value.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => malformed("value outside the i64 range"),
        _ => not_integer(),
    })?;
    Ok((row, col, value))
}

fn check_bounds(
    line_number: usize,
    row: i128,
    col: i128,
    rows: usize,
    cols: usize,
) -> Result<(usize, usize)> {
    let in_range = |index: i128, extent: usize| {
        usize::try_from(index).ok().filter(|&index| index < extent)
    };
    match (in_range(row, rows), in_range(col, cols)) {
        (Some(row), Some(col)) => Ok((row, col)),
        _ => Err(MatrixError::OutOfBounds {
            line: line_number,
            row,
            col,
            rows,
            cols,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_of(source: &str) -> ErrorKind {
        parse_matrix(source).unwrap_err().kind()
    }

    #[test]
    fn test_parse_basic() {
        let matrix = parse_matrix("rows=2\ncols=2\n(0,0,1)\n(1,1,2)\n").unwrap();
        assert_eq!(matrix.shape(), (2, 2));
        assert_eq!(matrix.sorted_entries(), vec![((0, 0), 1), ((1, 1), 2)]);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_blank_lines() {
        let source = "\n  rows = 3 \n\n\tcols=4\n  ( 2 , 3 , -7 )  \n\n";
        let matrix = parse_matrix(source).unwrap();
        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.get(2, 3), -7);
    }

    #[test]
    fn test_parse_last_write_wins() {
        let matrix = parse_matrix("rows=1\ncols=1\n(0,0,4)\n(0,0,9)").unwrap();
        assert_eq!(matrix.get(0, 0), 9);
    }

    #[test]
    fn test_parse_zero_literal_clears_entry() {
        let matrix = parse_matrix("rows=2\ncols=2\n(0,0,4)\n(0,0,0)\n(1,1,0)").unwrap();
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(kind_of(""), ErrorKind::InsufficientData);
        assert_eq!(kind_of("rows=2\n\n  \n"), ErrorKind::InsufficientData);
    }

    #[test]
    fn test_malformed_headers() {
        assert_eq!(kind_of("2\ncols=2"), ErrorKind::MalformedHeader);
        assert_eq!(kind_of("rows=two\ncols=2"), ErrorKind::MalformedHeader);
        assert_eq!(kind_of("rows=2\nrows=2"), ErrorKind::MalformedHeader);
        assert_eq!(kind_of("rows=-1\ncols=2"), ErrorKind::MalformedHeader);
        assert_eq!(kind_of("rowsx=1\ncols=2"), ErrorKind::MalformedHeader);
    }

    #[test]
    fn test_malformed_elements() {
        assert_eq!(kind_of("rows=2\ncols=2\n0,0,1"), ErrorKind::MalformedElement);
        assert_eq!(kind_of("rows=2\ncols=2\n(0,0,1"), ErrorKind::MalformedElement);
        assert_eq!(kind_of("rows=2\ncols=2\n(1,2)"), ErrorKind::MalformedElement);
        assert_eq!(kind_of("rows=2\ncols=2\n(1,1,1,1)"), ErrorKind::MalformedElement);
        assert_eq!(kind_of("rows=2\ncols=2\n(1,1,x)"), ErrorKind::MalformedElement);
        assert_eq!(kind_of("rows=2\ncols=2\n(1,1,1.5)"), ErrorKind::MalformedElement);
    }

    #[test]
    fn test_out_of_bounds_reports_line() {
        let err = parse_matrix("rows=2\n\ncols=2\n(0,0,1)\n(5,0,3)").unwrap_err();
        match err {
            MatrixError::OutOfBounds { line, row, col, rows, cols } => {
                assert_eq!((line, row, col, rows, cols), (5, 5, 0, 2, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(kind_of("rows=2\ncols=2\n(-1,0,3)"), ErrorKind::OutOfBounds);
        assert_eq!(kind_of("rows=2\ncols=2\n(0,2,3)"), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_huge_index_is_out_of_bounds() {
        let err = parse_matrix("rows=2\ncols=2\n(99999999999999999999,0,1)").unwrap_err();
        match err {
            MatrixError::OutOfBounds { line, row, col, .. } => {
                assert_eq!((line, row, col), (3, 99_999_999_999_999_999_999, 0));
            }
            other => panic!("unexpected error: {other}"),
        }

        let far = format!("rows=2\ncols=2\n(0,-{},1)", "9".repeat(60));
        assert_eq!(kind_of(&far), ErrorKind::OutOfBounds);
        // Values have no bounds check; one that does not fit i64 cannot be stored
        assert_eq!(
            kind_of("rows=2\ncols=2\n(0,0,99999999999999999999)"),
            ErrorKind::MalformedElement
        );
    }

    #[test]
    fn test_write_matrix_sorted() {
        let mut matrix = SparseMatrix::new(3, 3);
        matrix.set(2, 1, 5);
        matrix.set(0, 2, -1);
        assert_eq!(write_matrix(&matrix), "rows=3\ncols=3\n(0,2,-1)\n(2,1,5)\n");
    }

    #[test]
    fn test_from_str() {
        let matrix: SparseMatrix = "rows=1\ncols=3\n(0,2,8)".parse().unwrap();
        assert_eq!(matrix.get(0, 2), 8);
    }
}
