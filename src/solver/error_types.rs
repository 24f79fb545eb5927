use crate::algebra::DenseFactorizationError;
use thiserror::Error;

/// Fatal errors returned by [`Solver::solve`](crate::solver::Solver::solve).
///
/// These indicate malformed input or a violated internal invariant, as
/// opposed to infeasibility and iteration-limit outcomes which are
/// reported through [`SolverStatus`](crate::solver::SolverStatus).
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem dimension fields are incompatible: {0}")]
    IncompatibleDimension(&'static str),

    #[error("Inconsistent bounds for general constraint {0}")]
    InconsistentBounds(usize),

    #[error("Hessian factorization failed: {0}")]
    Factorization(#[from] DenseFactorizationError),

    #[error("Settings validation failed: {0}")]
    BadSettings(String),

    #[error("Failed to add {0} constraint to the factorization")]
    UnexpectedUpdateFailure(&'static str),
}
