//! Property-based tests for sparse matrix arithmetic
//!
//! Matrices are generated as random `(row, col, value)` triples inside a
//! random shape, with small values so no operation can overflow.

use proptest::prelude::*;
use sparse_calc::matrix::{parse_matrix, write_matrix};
use sparse_calc::{ErrorKind, SparseMatrix};

fn build(rows: usize, cols: usize, entries: &[(usize, usize, i64)]) -> SparseMatrix {
    let mut matrix = SparseMatrix::new(rows, cols);
    for &(row, col, value) in entries {
        matrix.set(row, col, value);
    }
    matrix
}

/// Random matrix of exactly the given shape
fn matrix_with_shape(rows: usize, cols: usize) -> impl Strategy<Value = SparseMatrix> {
    let max_nnz = (rows * cols).min(30);
    if max_nnz == 0 {
        return Just(SparseMatrix::new(rows, cols)).boxed();
    }
    prop::collection::vec((0..rows, 0..cols, -50i64..50), 0..=max_nnz)
        .prop_map(move |entries| build(rows, cols, &entries))
        .boxed()
}

/// Two random matrices sharing one random shape
fn same_shape_pair() -> impl Strategy<Value = (SparseMatrix, SparseMatrix)> {
    (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| {
        (matrix_with_shape(rows, cols), matrix_with_shape(rows, cols))
    })
}

/// Reference product computed position by position
fn dense_product(a: &SparseMatrix, b: &SparseMatrix) -> SparseMatrix {
    let mut result = SparseMatrix::new(a.rows(), b.cols());
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let value = (0..a.cols()).map(|k| a.get(i, k) * b.get(k, j)).sum();
            result.set(i, j, value);
        }
    }
    result
}

proptest! {
    /// Property: (A + B) - B == A
    #[test]
    fn prop_add_then_subtract_restores((a, b) in same_shape_pair()) {
        let restored = a.add(&b).unwrap().subtract(&b).unwrap();
        prop_assert_eq!(restored, a);
    }

    /// Property: A + B == B + A
    #[test]
    fn prop_add_commutes((a, b) in same_shape_pair()) {
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    /// Property: no stored entry is ever zero
    #[test]
    fn prop_results_hold_no_zeros((a, b) in same_shape_pair()) {
        for result in [a.add(&b).unwrap(), a.subtract(&b).unwrap()] {
            prop_assert!(result.entries().all(|(_, value)| value != 0));
        }
    }

    /// Property: set(r, c, 0) always leaves (r, c) unset
    #[test]
    fn prop_set_zero_removes(
        (a, _) in same_shape_pair(),
        row in 0usize..8,
        col in 0usize..8,
    ) {
        let mut cleared = a.clone();
        cleared.set(row, col, 0);
        prop_assert_eq!(cleared.get(row, col), 0);
        prop_assert!(cleared.entries().all(|(key, _)| key != (row, col)));
        let expected = a.nnz() - usize::from(a.get(row, col) != 0);
        prop_assert_eq!(cleared.nnz(), expected);
    }

    /// Property: multiply is rejected exactly when A.cols != B.rows,
    /// zero-sized dimensions included
    #[test]
    fn prop_multiply_shape_check(
        a_rows in 0usize..4,
        a_cols in 0usize..4,
        b_rows in 0usize..4,
        b_cols in 0usize..4,
    ) {
        let a = SparseMatrix::new(a_rows, a_cols);
        let b = SparseMatrix::new(b_rows, b_cols);
        match a.multiply(&b) {
            Ok(product) => {
                prop_assert_eq!(a_cols, b_rows);
                prop_assert_eq!(product.shape(), (a_rows, b_cols));
            }
            Err(err) => {
                prop_assert_ne!(a_cols, b_rows);
                prop_assert_eq!(err.kind(), ErrorKind::IncompatibleShape);
            }
        }
    }

    /// Property: sparse multiply agrees with the position-by-position product
    #[test]
    fn prop_multiply_matches_dense(
        (a, b) in (1usize..6, 1usize..6, 1usize..6).prop_flat_map(|(n, k, m)| {
            (matrix_with_shape(n, k), matrix_with_shape(k, m))
        })
    ) {
        prop_assert_eq!(a.multiply(&b).unwrap(), dense_product(&a, &b));
    }

    /// Property: writing and re-parsing keeps shape and entries
    #[test]
    fn prop_text_round_trip((a, _) in same_shape_pair()) {
        let reparsed = parse_matrix(&write_matrix(&a)).unwrap();
        prop_assert_eq!(reparsed, a);
    }
}
