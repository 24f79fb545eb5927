use super::{ConstraintStatus, SolverStatus};
use crate::algebra::*;

/// Solver result.
#[derive(Debug)]
pub struct Solution<T = f64> {
    /// primal solution; meaningful only when `status` is
    /// [`Solved`](SolverStatus::Solved), best iterate on
    /// [`MaxIterations`](SolverStatus::MaxIterations)
    pub x: Vec<T>,
    /// per-constraint Lagrange multipliers; zero for constraints that are
    /// not active at termination
    pub dual: Vec<T>,
    /// final per-constraint states
    pub constraint_status: Vec<ConstraintStatus>,
    /// final solver status
    pub status: SolverStatus,
    /// number of active-set iterations
    pub iterations: u32,
    /// primal objective value, NaN when infeasible
    pub obj_val: T,
    /// solve time in seconds
    pub solve_time: f64,
}

impl<T> Solution<T>
where
    T: FloatT,
{
    pub(crate) fn new(n: usize, m: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            dual: vec![T::zero(); m],
            constraint_status: vec![ConstraintStatus::Inactive; m],
            status: SolverStatus::Unsolved,
            iterations: 0,
            obj_val: T::nan(),
            solve_time: 0f64,
        }
    }
}
