use crate::algebra::DenseFactorizationError;
use crate::threads::TaskError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad field")]
    BadField(&'static str),
    /// A field holding a value outside its legal range
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq)]
/// Error type returned by grid construction, matrix assembly and
/// the eigenvalue search
pub enum SolverError {
    /// An argument was rejected before any work was done
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A matrix does not have the size implied by the grid and field layout
    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A pooled kernel evaluation failed
    #[error(transparent)]
    TaskFailure(#[from] TaskError),
    /// A dense factorization failed
    #[error("factorization failed: {0}")]
    Factorization(#[from] DenseFactorizationError),
    /// The solver settings are not valid
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
}
