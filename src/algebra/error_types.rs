use thiserror::Error;

/// Error type returned by dense matrix construction and shape checks.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum MatrixError {
    /// Indicates inputs have incompatible dimension
    #[error("Incompatible dimensions")]
    IncompatibleDimension,
    /// Operation requires a square matrix
    #[error("Matrix must be square (found {0} x {1})")]
    NotSquare(usize, usize),
}

/// Error type returned by dense factorization routines.
#[allow(clippy::upper_case_acronyms)]
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DenseFactorizationError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Matrix is numerically singular")]
    Singular,
    #[error("SVD error")]
    SVD,
}
