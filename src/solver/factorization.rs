#![allow(non_snake_case)]

use super::{ActiveSet, ConstraintStatus};
use crate::algebra::*;

/// Incrementally maintained factorization of the active constraint
/// normals in the metric of the Hessian.
///
/// J satisfies J'HJ = I; its leading `q` columns span the range of the
/// active constraint normals after orthogonalization and the trailing
/// columns span the null space, where `q` is the active-set size.  R is
/// upper triangular in its leading q×q block and holds the reflected
/// normals; column `q` doubles as scratch for the next candidate.
///
/// Activation appends a reflected normal and re-triangularizes with plane
/// rotations (`update`); deactivation chases the resulting bulge back out
/// (`downdate`).  Both keep the product identity intact by mirroring the
/// rotations onto the columns of J.
#[derive(Debug)]
pub(crate) struct FactorizationData<T> {
    pub J: Matrix<T>,
    pub R: Matrix<T>,
    primal_size: usize,
}

impl<T> FactorizationData<T>
where
    T: FloatT,
{
    /// Build from the lower Cholesky factor of the Hessian: J := L⁻ᵀ.
    pub fn new(L: &Matrix<T>, primal_size: usize) -> Self {
        let mut J = Matrix::zeros((primal_size, primal_size));
        triangular_inverse_transpose(L, &mut J);
        let R = Matrix::zeros((primal_size, primal_size));
        Self { J, R, primal_size }
    }

    /// Re-triangularize after a candidate normal was reflected into
    /// column `r_col`, which must equal the active-set size.
    ///
    /// Returns false iff the new diagonal entry is below `tolerance`,
    /// i.e. the candidate is linearly dependent on the active normals.
    pub fn update(&mut self, r_col: usize, tolerance: T) -> bool {
        for i in ((r_col + 1)..self.primal_size).rev() {
            let givens = GivensRotation::compute(self.R[(i - 1, r_col)], self.R[(i, r_col)]);
            self.R[(i - 1, r_col)] = givens.r;
            self.R[(i, r_col)] = T::zero();
            givens.apply_column_wise(&mut self.J, 0, self.primal_size, i - 1, i);
        }

        T::abs(self.R[(r_col, r_col)]) >= tolerance
    }

    /// Remove the active constraint at position `r_col_index` from the
    /// leading `r_cols` columns of R, sliding the later columns left and
    /// mirroring the rotations onto J.
    pub fn downdate(&mut self, r_col_index: usize, r_cols: usize) {
        for i in (r_col_index + 1)..r_cols {
            let givens = GivensRotation::compute(self.R[(i - 1, i)], self.R[(i, i)]);
            self.R[(i - 1, i)] = givens.r;
            self.R[(i, i)] = T::zero();

            givens.apply_column_wise(&mut self.J, 0, self.primal_size, i - 1, i);
            givens.apply_row_wise(&mut self.R, i + 1, r_cols, i - 1, i);

            //slide column i into the vacated position
            for row in 0..i {
                self.R[(row, i - 1)] = self.R[(row, i)];
            }
        }
    }

    /// Primal step direction for activating an equality constraint with
    /// normal `ctr` when `active_set_size` constraints are active:
    /// reflect d := J'ctr into R[:, q], then p := −J[:, q..n]·d[q..n].
    pub fn compute_equality_primal_step(
        &mut self,
        step_direction: &mut [T],
        ctr: &[T],
        active_set_size: usize,
    ) {
        self.reflect_constraint(ctr, active_set_size, false);
        self.null_space_step(step_direction, active_set_size);
    }

    /// Primal and dual step directions for activating an inequality.
    ///
    /// The normal is negated for a lower-bound activation so that the
    /// same update machinery serves both bound types.
    pub fn compute_inequality_steps(
        &mut self,
        primal_step_direction: &mut [T],
        dual_step_direction: &mut [T],
        ctr: &[T],
        ctr_bound: ConstraintStatus,
        active_set: &ActiveSet,
    ) {
        let q = active_set.size;
        let flip = ctr_bound == ConstraintStatus::ActiveLowerBound;

        self.reflect_constraint(ctr, q, flip);
        self.null_space_step(primal_step_direction, q);

        //z[nE..q] = −R[nE..q, nE..q]⁻¹ d[nE..q]
        let num_eq = active_set.num_equalities;
        for i in num_eq..q {
            dual_step_direction[i] = -self.R[(i, q)];
        }
        upper_triangular_solve_in_place(&self.R, num_eq, &mut dual_step_direction[num_eq..q]);
    }

    /// Dual step direction only, for when the primal iterate cannot move
    /// until an active constraint is dropped.
    pub fn compute_inequality_dual_step(
        &mut self,
        dual_step_direction: &mut [T],
        ctr: &[T],
        ctr_bound: ConstraintStatus,
        active_set: &ActiveSet,
    ) {
        let q = active_set.size;
        let num_eq = active_set.num_equalities;
        let flip = ctr_bound != ConstraintStatus::ActiveLowerBound;

        for i in num_eq..q {
            let d = self.J.col_slice(i).dot(ctr);
            dual_step_direction[i] = if flip { -d } else { d };
        }
        upper_triangular_solve_in_place(&self.R, num_eq, &mut dual_step_direction[num_eq..q]);
    }

    //write d := ±J'ctr into column `col` of R
    fn reflect_constraint(&mut self, ctr: &[T], col: usize, flip_sign: bool) {
        for j in 0..self.primal_size {
            let d = self.J.col_slice(j).dot(ctr);
            self.R[(j, col)] = if flip_sign { -d } else { d };
        }
    }

    //p := −J[:, q..n]·d[q..n] with d read from R[:, q]
    fn null_space_step(&self, step_direction: &mut [T], q: usize) {
        step_direction.set(T::zero());
        for j in q..self.primal_size {
            step_direction.axpby(-self.R[(j, q)], self.J.col_slice(j), T::one());
        }
    }
}
