/// Final solver status.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum SolverStatus {
    /// Solver has not yet run
    #[default]
    Unsolved,
    /// KKT optimum found
    Solved,
    /// The equality-constrained subsystem is inconsistent
    InfeasibleEquality,
    /// No multiplier step exists that admits the chosen constraint
    InfeasibleInequality,
    /// Iteration limit reached before convergence
    MaxIterations,
}

impl SolverStatus {
    /// `true` for either of the infeasibility outcomes.  The primal
    /// iterate is not meaningful in that case.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            SolverStatus::InfeasibleEquality | SolverStatus::InfeasibleInequality
        )
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[test]
fn test_status_helpers() {
    assert_eq!(SolverStatus::default(), SolverStatus::Unsolved);
    assert!(SolverStatus::InfeasibleEquality.is_infeasible());
    assert!(SolverStatus::InfeasibleInequality.is_infeasible());
    assert!(!SolverStatus::Solved.is_infeasible());
    assert_eq!(format!("{}", SolverStatus::Solved), "Solved");
}
