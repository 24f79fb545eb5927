use thiserror::Error;

/// Error type returned by the dense factorization routines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenseFactorizationError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Matrix is not positive definite")]
    NotPositiveDefinite,
}
