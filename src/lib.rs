//! <h1 align="center" margin=0px>
//! qpdas
//! </h1>
//! <p align="center">
//! Dense dual active-set solver for strictly convex quadratic programs.
//! </p>
//!
//! Solves problems of the form
//!
//! ```text
//! minimize    1/2 x'Hx + h'x
//! subject to  Alb ≤ Ax ≤ Aub
//! ```
//!
//! with H symmetric positive definite, using the dual active-set method of
//! Goldfarb and Idnani.  The solver maintains a factorization of the active
//! constraint normals in the metric of H and revises it with plane rotations
//! as constraints are activated and dropped, so each outer iteration costs
//! O(n²) regardless of how the active set evolves.
//!
//! See [`Solver`](crate::solver::Solver) for the entry point and
//! [`Settings`](crate::solver::Settings) for configuration.

pub mod algebra;
pub mod solver;

pub use crate::algebra::Matrix;
pub use crate::solver::{
    ConstraintStatus, HessianType, Settings, SettingsBuilder, Solution, Solver, SolverError,
    SolverStatus,
};
