// src/matrix/operation.rs

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::Result;
use crate::matrix::sparse_matrix::SparseMatrix;

/// The three arithmetic operations offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    /// Lowercase name, also used in output filenames
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        }
    }

    /// Human readable description of the result, e.g. `Matrix A + Matrix B`
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Add => "Matrix A + Matrix B",
            Operation::Subtract => "Matrix A - Matrix B",
            Operation::Multiply => "Matrix A * Matrix B",
        }
    }

    pub fn apply(&self, a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
        match self {
            Operation::Add => a.add(b),
            Operation::Subtract => a.subtract(b),
            Operation::Multiply => a.multiply(b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Unknown operation name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operation `{0}` (expected add, subtract or multiply)")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}
