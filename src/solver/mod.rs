//! qpdas solver module.
//!
//! The driver in [`Solver`](crate::solver::Solver) orchestrates the dual
//! active-set iteration: an unconstrained Cholesky solve, forced
//! activation of equality constraints, then the main loop that activates
//! the most violated inequality per iteration and drops blocking
//! constraints along the way.  The incremental factorization machinery
//! lives in `factorization`, active-set bookkeeping in `active_set`.

mod active_set;
mod constraints;
mod error_types;
mod factorization;
mod problem;
mod settings;
mod solution;
#[allow(clippy::module_inception)]
mod solver;
mod status;

pub(crate) use active_set::*;
pub use constraints::ConstraintStatus;
pub(crate) use constraints::*;
pub use error_types::*;
pub(crate) use factorization::*;
pub(crate) use problem::*;
pub use settings::*;
pub use solution::*;
pub use solver::*;
pub use status::*;
