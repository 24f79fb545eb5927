#![allow(non_snake_case)]

use super::SolverError;
use crate::algebra::*;

pub(crate) struct ProblemDims {
    pub n: usize,
    pub m: usize,
}

/// Validate the shapes of the problem data before any numerical work.
///
/// The gradient may be empty (zero gradient) and the constraint block may
/// be empty (unconstrained problem); everything else must be consistent
/// with the Hessian order.
pub(crate) fn check_dimensions<T>(
    H: &Matrix<T>,
    h: &[T],
    A: &Matrix<T>,
    alb: &[T],
    aub: &[T],
) -> Result<ProblemDims, SolverError>
where
    T: FloatT,
{
    if !H.is_square() || H.nrows() == 0 {
        return Err(SolverError::IncompatibleDimension(
            "Hessian must be square and nonempty",
        ));
    }
    let n = H.nrows();

    if !(h.is_empty() || h.len() == n) {
        return Err(SolverError::IncompatibleDimension(
            "gradient length must match the Hessian order",
        ));
    }

    let m = A.nrows();
    if m > 0 && A.ncols() != n {
        return Err(SolverError::IncompatibleDimension(
            "constraint columns must match the Hessian order",
        ));
    }

    if alb.len() != m || aub.len() != m {
        return Err(SolverError::IncompatibleDimension(
            "constraint bounds must match the constraint row count",
        ));
    }

    Ok(ProblemDims { n, m })
}
