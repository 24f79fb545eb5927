use crate::algebra::*;
use itertools::izip;

/// Per-constraint state.
///
/// Constraints with equal lower and upper bounds are classified as
/// `Equality` during initialization and stay active for the whole solve.
/// The remaining constraints cycle between `Inactive`, `Violated` and one
/// of the two active states as the active set evolves.  `Inconsistent` is
/// a failure terminal reached only when a constraint's lower bound
/// exceeds its upper bound.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum ConstraintStatus {
    #[default]
    Inactive,
    Violated,
    Equality,
    ActiveLowerBound,
    ActiveUpperBound,
    Inconsistent,
}

impl ConstraintStatus {
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ConstraintStatus::Equality
                | ConstraintStatus::ActiveLowerBound
                | ConstraintStatus::ActiveUpperBound
        )
    }
}

/// The inequality candidate currently being activated.
///
/// Its violation and accumulated multiplier are carried across partial
/// steps until the candidate is fully activated or declared infeasible.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChosenConstraint<T> {
    pub index: usize,
    /// which bound is violated; `ActiveLowerBound` or `ActiveUpperBound`
    /// whenever `violation` is nonzero
    pub bound: ConstraintStatus,
    pub violation: T,
    pub dual: T,
}

impl<T> Default for ChosenConstraint<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self {
            index: 0,
            bound: ConstraintStatus::Inactive,
            violation: T::zero(),
            dual: T::zero(),
        }
    }
}

/// Scan all general constraints not currently active and return the one
/// with the largest absolute violation, ties broken by the lower index.
/// A zero violation in the result means the iterate is feasible.
///
/// Statuses are refreshed as a side effect: constraints found satisfied
/// are downgraded to `Inactive`, newly violated ones are flagged.
#[allow(non_snake_case)]
pub(crate) fn choose_constraint<T>(
    primal: &[T],
    A: &Matrix<T>,
    alb: &[T],
    aub: &[T],
    statuses: &mut [ConstraintStatus],
    tolerance: T,
) -> ChosenConstraint<T>
where
    T: FloatT,
{
    let mut chosen = ChosenConstraint::default();

    for (i, status, &lb, &ub) in izip!(0..statuses.len(), statuses.iter_mut(), alb, aub) {
        if !matches!(
            status,
            ConstraintStatus::Inactive | ConstraintStatus::Violated
        ) {
            continue;
        }

        let value = A.row_dot(i, primal);

        if lb - tolerance > value {
            *status = ConstraintStatus::Violated;
            let violation = value - lb;
            if T::abs(violation) > T::abs(chosen.violation) {
                chosen.bound = ConstraintStatus::ActiveLowerBound;
                chosen.violation = violation;
                chosen.index = i;
            }
        } else if ub + tolerance < value {
            *status = ConstraintStatus::Violated;
            let violation = value - ub;
            if T::abs(violation) > T::abs(chosen.violation) {
                chosen.bound = ConstraintStatus::ActiveUpperBound;
                chosen.violation = violation;
                chosen.index = i;
            }
        } else {
            *status = ConstraintStatus::Inactive;
        }
    }
    chosen
}
