#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use std::time::Instant;

/// Dense dual active-set QP solver.
///
/// Minimizes `1/2 x'Hx + h'x` subject to `Alb ≤ Ax ≤ Aub` for a symmetric
/// positive definite H.  Per-variable box constraints are passed as
/// identity rows of A.
///
/// ```
/// use qpdas::{Matrix, Settings, Solver, SolverStatus};
///
/// //minimize 1/2 (x₁² + x₂²) subject to x₁ + x₂ = 1
/// let mut H: Matrix<f64> = Matrix::identity(2);
/// let A = Matrix::from(&[[1.0, 1.0]]);
///
/// let mut solver = Solver::new(Settings::default());
/// let solution = solver.solve(&mut H, &[], &A, &[1.0], &[1.0]).unwrap();
///
/// assert_eq!(solution.status, SolverStatus::Solved);
/// assert!((solution.x[0] - 0.5).abs() < 1e-12);
/// assert!((solution.x[1] - 0.5).abs() < 1e-12);
/// ```
pub struct Solver<T: FloatT = f64> {
    pub settings: Settings<T>,
}

//working state of the active-set iteration, constructed lazily so that
//trivially unconstrained solves never pay for it
struct Machinery<T> {
    active_set: ActiveSet,
    factorization: FactorizationData<T>,
    primal_step_direction: Vec<T>,
    //gather buffer for one (strided) row of the constraint matrix
    ctr: Vec<T>,
}

impl<T> Machinery<T>
where
    T: FloatT,
{
    fn new(L: &Matrix<T>, n: usize) -> Self {
        Self {
            active_set: ActiveSet::new(n),
            factorization: FactorizationData::new(L, n),
            primal_step_direction: vec![T::zero(); n],
            ctr: vec![T::zero(); n],
        }
    }
}

impl<T> Solver<T>
where
    T: FloatT,
{
    pub fn new(settings: Settings<T>) -> Self {
        Self { settings }
    }

    /// Solve the QP defined by `(H, h, A, alb, aub)`.
    ///
    /// `H` is factored in place according to
    /// [`hessian_type`](crate::solver::Settings::hessian_type) and holds
    /// the lower Cholesky factor on return.  `h` may be empty (zero
    /// gradient) and `A` may be empty (unconstrained).
    ///
    /// Infeasibility and the iteration cap are reported through
    /// [`SolverStatus`](crate::solver::SolverStatus) in the returned
    /// [`Solution`](crate::solver::Solution); `Err` is reserved for
    /// malformed inputs and violated internal invariants.
    pub fn solve(
        &mut self,
        H: &mut Matrix<T>,
        h: &[T],
        A: &Matrix<T>,
        alb: &[T],
        aub: &[T],
    ) -> Result<Solution<T>, SolverError> {
        let start = Instant::now();
        self.settings.validate().map_err(SolverError::BadSettings)?;

        let dims = check_dimensions(H, h, A, alb, aub)?;
        let (n, m) = (dims.n, dims.m);
        let tol = self.settings.tolerance;

        match self.settings.hessian_type {
            HessianType::LowerTriangular => cholesky_factor(H)?,
            HessianType::CholeskyFactor => {}
        }

        //unconstrained optimum
        let mut x = vec![T::zero(); n];
        if !h.is_empty() {
            x.copy_from(h).negate();
            cholesky_solve(H, &mut x);
        }

        self.print_configuration(n, m);

        if m == 0 {
            //exit early, the machinery is never needed
            return Ok(self.finalize(
                Solution::new(n, 0),
                x,
                Vec::new(),
                SolverStatus::Solved,
                0,
                H,
                h,
                start,
            ));
        }

        //check consistency of the general constraints and activate the
        //equality constraints in order
        let mut statuses = vec![ConstraintStatus::Inactive; m];
        let mut machinery: Option<Machinery<T>> = None;
        let mut num_equalities = 0;

        for i in 0..m {
            if alb[i] - tol > aub[i] {
                statuses[i] = ConstraintStatus::Inconsistent;
                return Err(SolverError::InconsistentBounds(i));
            }

            if T::abs(alb[i] - aub[i]) > tol {
                statuses[i] = ConstraintStatus::Inactive;
                continue;
            }

            statuses[i] = ConstraintStatus::Equality;
            num_equalities += 1;

            let violation = alb[i] - A.row_dot(i, &x);
            let mach = machinery.get_or_insert_with(|| Machinery::new(H, n));

            //once n constraints are active all further candidates are
            //linearly dependent
            if mach.active_set.has_empty_space() {
                A.copy_row_into(i, &mut mach.ctr);
                mach.factorization.compute_equality_primal_step(
                    &mut mach.primal_step_direction,
                    &mach.ctr,
                    mach.active_set.size,
                );

                //a zero step direction means the constraint is linearly
                //dependent on the ones already activated
                let ctr_dot_step = mach.ctr.dot(&mach.primal_step_direction);
                if ctr_dot_step < -tol {
                    let step_length = violation / ctr_dot_step;
                    x.axpby(step_length, &mach.primal_step_direction, T::one());

                    if !mach.factorization.update(mach.active_set.size, tol) {
                        return Err(SolverError::UnexpectedUpdateFailure("an equality"));
                    }
                    mach.active_set.add_equality(i);
                    continue;
                }
            }

            //linearly dependent; feasible only if already satisfied
            if T::abs(violation) > tol {
                return Ok(self.finalize(
                    Solution::new(n, m),
                    x,
                    statuses,
                    SolverStatus::InfeasibleEquality,
                    0,
                    H,
                    h,
                    start,
                ));
            }
        }

        if num_equalities == m {
            //exit early, no inequalities to iterate over
            let solution = Solution::new(n, m);
            return Ok(self.finalize(solution, x, statuses, SolverStatus::Solved, 0, H, h, start));
        }

        let mut dual = vec![T::zero(); n];
        let mut dual_step_direction = vec![T::zero(); n];

        let mut chosen = choose_constraint(&x, A, alb, aub, &mut statuses, tol);
        let mut status = SolverStatus::MaxIterations;
        let mut iter: i32 = 0;

        self.print_status_header();

        while self.settings.max_iter < 0 || iter < self.settings.max_iter {
            iter += 1;

            if T::abs(chosen.violation) < tol {
                //all constraints are satisfied
                status = SolverStatus::Solved;
                break;
            }

            let mach = machinery.get_or_insert_with(|| Machinery::new(H, n));
            A.copy_row_into(chosen.index, &mut mach.ctr);

            let has_space = mach.active_set.has_empty_space();
            if has_space {
                //step directions in primal and dual space
                mach.factorization.compute_inequality_steps(
                    &mut mach.primal_step_direction,
                    &mut dual_step_direction,
                    &mach.ctr,
                    chosen.bound,
                    &mach.active_set,
                );
            } else {
                //dual space only; the primal iterate cannot move until
                //something is deactivated
                mach.factorization.compute_inequality_dual_step(
                    &mut dual_step_direction,
                    &mach.ctr,
                    chosen.bound,
                    &mach.active_set,
                );
            }

            //longest multiplier step that keeps all active inequalities
            //dual feasible, and the blocking position attaining it
            let (num_eq, q) = (mach.active_set.num_equalities, mach.active_set.size);
            let mut dual_blocking: Option<usize> = None;
            let mut dual_step_length = T::infinity();
            for i in num_eq..q {
                if dual_step_direction[i] < -tol {
                    let candidate = -dual[i] / dual_step_direction[i];
                    if candidate < dual_step_length {
                        dual_step_length = candidate;
                        dual_blocking = Some(i);
                    }
                }
            }

            let ctr_dot_step = if has_space {
                mach.ctr.dot(&mach.primal_step_direction)
            } else {
                T::zero()
            };

            if has_space && T::abs(ctr_dot_step) > tol {
                let mut step_length = -chosen.violation / ctr_dot_step;
                debug_assert!(
                    step_length >= T::zero() && dual_step_length >= T::zero(),
                    "non-negative step lengths expected"
                );

                let partial_step = dual_step_length <= step_length;
                if partial_step {
                    step_length = dual_step_length;
                }

                x.axpby(step_length, &mach.primal_step_direction, T::one());
                dual[num_eq..q].axpby(step_length, &dual_step_direction[num_eq..q], T::one());
                chosen.dual += step_length;
                chosen.violation += step_length * ctr_dot_step;

                if !mach.factorization.update(q, tol) {
                    return Err(SolverError::UnexpectedUpdateFailure("an inequality"));
                }

                //a partial step with violation left over means the
                //blocking constraint must go before the candidate can be
                //activated; the candidate is kept for the next pass
                if partial_step && T::abs(chosen.violation) > tol {
                    let blocking = dual_blocking.unwrap();
                    self.print_iteration(iter, &chosen, q, "partial");

                    statuses[mach.active_set.index(blocking)] = ConstraintStatus::Inactive;
                    dual[blocking..q].rotate_left(1);
                    mach.factorization.downdate(blocking, q);
                    mach.active_set.remove_inequality(blocking);
                } else {
                    self.print_iteration(iter, &chosen, q, "full");

                    statuses[chosen.index] = chosen.bound;
                    dual[q] = chosen.dual;
                    mach.active_set.add_inequality(chosen.index);

                    chosen = choose_constraint(&x, A, alb, aub, &mut statuses, tol);
                }
            } else {
                //the candidate is linearly dependent in the current null
                //space; only a multiplier exchange is possible
                let Some(blocking) = dual_blocking else {
                    status = SolverStatus::InfeasibleInequality;
                    break;
                };
                self.print_iteration(iter, &chosen, q, "dual");

                dual[num_eq..q].axpby(dual_step_length, &dual_step_direction[num_eq..q], T::one());
                chosen.dual += dual_step_length;

                statuses[mach.active_set.index(blocking)] = ConstraintStatus::Inactive;
                dual[blocking..q].rotate_left(1);
                mach.factorization.downdate(blocking, q);
                mach.active_set.remove_inequality(blocking);
            }
        }

        let mut solution = Solution::new(n, m);
        if let Some(mach) = &machinery {
            for pos in mach.active_set.num_equalities..mach.active_set.size {
                solution.dual[mach.active_set.index(pos)] = dual[pos];
            }
        }
        Ok(self.finalize(solution, x, statuses, status, iter as u32, H, h, start))
    }

    #[allow(clippy::too_many_arguments)]
    fn finalize(
        &self,
        mut solution: Solution<T>,
        x: Vec<T>,
        statuses: Vec<ConstraintStatus>,
        status: SolverStatus,
        iterations: u32,
        L: &Matrix<T>,
        h: &[T],
        start: Instant,
    ) -> Solution<T> {
        solution.obj_val = if status.is_infeasible() {
            T::nan()
        } else {
            let half: T = (0.5).as_T();
            let linear = if h.is_empty() { T::zero() } else { h.dot(&x) };
            half * quad_form_factored(L, &x) + linear
        };

        solution.x = x;
        solution.constraint_status = statuses;
        solution.status = status;
        solution.iterations = iterations;
        solution.solve_time = start.elapsed().as_secs_f64();

        self.print_footer(&solution);
        solution
    }

    fn print_configuration(&self, n: usize, m: usize) {
        if !self.settings.verbose {
            return;
        }
        println!("-------------------------------------------------------------");
        println!(
            "       qpdas v{}  -  dense dual active-set QP solver",
            env!("CARGO_PKG_VERSION")
        );
        println!("-------------------------------------------------------------");
        println!("problem:");
        println!("  variables   = {}", n);
        println!("  constraints = {}", m);
        println!("settings:");
        println!(
            "  hessian_type = {:?}, max_iter = {}, tolerance = {:e}",
            self.settings.hessian_type, self.settings.max_iter, self.settings.tolerance
        );
    }

    fn print_status_header(&self) {
        if !self.settings.verbose {
            return;
        }
        println!(
            "\n{:>5}  {:>6}  {:>13}  {:>6}  {:>7}",
            "iter", "chosen", "violation", "active", "step"
        );
    }

    fn print_iteration(&self, iter: i32, chosen: &ChosenConstraint<T>, active: usize, kind: &str) {
        if !self.settings.verbose {
            return;
        }
        println!(
            "{:>5}  {:>6}  {:>13.6e}  {:>6}  {:>7}",
            iter, chosen.index, chosen.violation, active, kind
        );
    }

    fn print_footer(&self, solution: &Solution<T>) {
        if !self.settings.verbose {
            return;
        }
        println!("-------------------------------------------------------------");
        println!(
            "status = {}, iterations = {}, objective = {}",
            solution.status, solution.iterations, solution.obj_val
        );
        println!("solve time = {:.2e}s", solution.solve_time);
    }
}

impl<T> Default for Solver<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
