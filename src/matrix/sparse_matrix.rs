//! Sparse integer matrix with dictionary-of-keys storage
//!
//! Only non-zero entries are stored, keyed by `(row, col)`. Every arithmetic
//! operation touches stored entries only:
//!
//! - `get()` / `set()`: O(1) average case (HashMap lookup/insert/remove)
//! - `add()` / `subtract()`: O(nnz(A) + nnz(B))
//! - `multiply()`: O(number of (A-entry, matching B-entry) pairs), never
//!   O(rows * cols)
//!
//! # Invariant
//!
//! No stored entry ever holds 0. `set()` removes the key instead of writing a
//! zero, and add/subtract/multiply route every result entry through the same
//! rule, so cancelled entries disappear from the result.

use std::collections::HashMap;

use log::debug;

use crate::error::{MatrixError, Result, Shape};

/// Sparse matrix of `i64` values
///
/// # Examples
///
/// ```
/// use sparse_calc::matrix::SparseMatrix;
///
/// let mut matrix = SparseMatrix::new(100, 100);
/// matrix.set(0, 0, 7);
/// matrix.set(0, 50, -2);
/// assert_eq!(matrix.get(0, 0), 7);
/// assert_eq!(matrix.get(0, 1), 0); // Unset entries are implicitly zero
/// assert_eq!(matrix.nnz(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    /// (row, col) -> value, never holding a zero
    elements: HashMap<(usize, usize), i64>,
}

impl SparseMatrix {
    /// Creates an empty matrix with the given logical extent
    ///
    /// `SparseMatrix::default()` is the 0x0 matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        SparseMatrix {
            rows,
            cols,
            elements: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as `(rows, cols)`
    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    /// Sets the value at the specified position
    ///
    /// A non-zero value inserts or overwrites the entry. Zero removes any
    /// existing entry, and is a no-op when the key is absent.
    ///
    /// No bounds check is done here; bounds are enforced when parsing.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        if value != 0 {
            self.elements.insert((row, col), value);
        } else {
            self.elements.remove(&(row, col));
        }
    }

    /// Gets the value at the specified position
    ///
    /// Returns 0 for any key without a stored entry, including keys outside
    /// the logical extent.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.elements.get(&(row, col)).copied().unwrap_or(0)
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.elements.len()
    }

    /// True when no entry is stored (the all-zero matrix)
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over stored entries in no particular order
    pub fn entries(&self) -> impl Iterator<Item = ((usize, usize), i64)> + '_ {
        self.elements.iter().map(|(&key, &value)| (key, value))
    }

    /// Stored entries in row-major order of their `(row, col)` key
    pub fn sorted_entries(&self) -> Vec<((usize, usize), i64)> {
        let mut entries: Vec<_> = self.entries().collect();
        entries.sort_unstable_by_key(|&(key, _)| key);
        entries
    }

    /// Percentage of logical positions that hold zero
    ///
    /// A matrix with no positions at all (a zero dimension) counts as 100%
    /// sparse.
    pub fn sparsity_percentage(&self) -> f64 {
        let total_entries = self.rows as f64 * self.cols as f64;
        if total_entries == 0.0 {
            return 100.0;
        }
        let zero_entries = total_entries - self.nnz() as f64;
        (zero_entries / total_entries) * 100.0
    }

    /// Returns `self + other` as a new matrix
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when the shapes differ, `Overflow` when an entry
    /// leaves the `i64` range.
    pub fn add(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        self.combine(other, "add", i64::checked_add)
    }

    /// Returns `self - other` as a new matrix
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when the shapes differ, `Overflow` when an entry
    /// leaves the `i64` range.
    pub fn subtract(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        self.combine(other, "subtract", i64::checked_sub)
    }

    /// Entry-wise combination shared by add and subtract
    ///
    /// Starts from a copy of `self` and folds every entry of `other` into it,
    /// dropping entries that cancel to zero.
    fn combine(
        &self,
        other: &SparseMatrix,
        op: &str,
        apply: fn(i64, i64) -> Option<i64>,
    ) -> Result<SparseMatrix> {
        if self.shape() != other.shape() {
            return Err(MatrixError::DimensionMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }

        let mut result = self.clone();
        for (&(row, col), &value) in &other.elements {
            let combined = apply(result.get(row, col), value)
                .ok_or(MatrixError::Overflow { row, col })?;
            result.set(row, col, combined);
        }

        debug!(
            "{} {}x{}: nnz {} and {} -> {}",
            op,
            self.rows,
            self.cols,
            self.nnz(),
            other.nnz(),
            result.nnz()
        );
        Ok(result)
    }

    /// Returns the matrix product `self * other` as a new matrix
    ///
    /// # Algorithm
    ///
    /// `other` is first indexed by row into `(col, value)` lists. Each stored
    /// entry `(r1, c1) -> v1` of `self` is then paired with every entry of row
    /// `c1` in `other`, accumulating `v1 * v2` into `(r1, c2)`. Positions whose
    /// contributions sum to zero are not stored.
    ///
    /// # Errors
    ///
    /// `IncompatibleShape` when `self.cols() != other.rows()`, `Overflow` when
    /// a single product or a finished entry leaves the `i64` range. Partial
    /// sums may leave it as long as the final value fits.
    pub fn multiply(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        if self.cols != other.rows {
            return Err(MatrixError::IncompatibleShape {
                left: self.shape(),
                right: other.shape(),
            });
        }

        let mut other_rows: HashMap<usize, Vec<(usize, i64)>> = HashMap::new();
        for (&(row, col), &value) in &other.elements {
            other_rows.entry(row).or_default().push((col, value));
        }

        // Row-major walk so the reported overflow position does not depend on
        // hash order. Partial sums are i128: a sum of i64 products cannot
        // overflow it, so only the final value is range-checked.
        let mut sums: HashMap<(usize, usize), i128> = HashMap::new();
        for ((r1, c1), v1) in self.sorted_entries() {
            let Some(matching) = other_rows.get(&c1) else {
                continue;
            };
            for &(c2, v2) in matching {
                let product = v1
                    .checked_mul(v2)
                    .ok_or(MatrixError::Overflow { row: r1, col: c2 })?;
                *sums.entry((r1, c2)).or_insert(0) += i128::from(product);
            }
        }

        let mut sums: Vec<_> = sums.into_iter().collect();
        sums.sort_unstable_by_key(|&(key, _)| key);

        let mut result = SparseMatrix::new(self.rows, other.cols);
        for ((row, col), sum) in sums {
            let value = i64::try_from(sum).map_err(|_| MatrixError::Overflow { row, col })?;
            result.set(row, col, value);
        }

        debug!(
            "multiply {}x{} * {}x{}: nnz {} and {} -> {}",
            self.rows,
            self.cols,
            other.rows,
            other.cols,
            self.nnz(),
            other.nnz(),
            result.nnz()
        );
        Ok(result)
    }
}
