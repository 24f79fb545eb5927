#![allow(non_snake_case)]

use qpdas::algebra::MultiplyGEMV;
use qpdas::{ConstraintStatus, Matrix, Settings, SettingsBuilder, Solver, SolverStatus};

fn assert_near(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "expected {} ≈ {}", a, b);
}

//residual of H·x + h + A'(s∘μ) with s = +1 for an active upper bound
//and −1 for an active lower bound
fn stationarity_residual(
    H: &Matrix<f64>,
    h: &[f64],
    A: &Matrix<f64>,
    solution: &qpdas::Solution<f64>,
) -> f64 {
    let n = H.nrows();
    let mut residual = vec![0.0; n];
    H.gemv(&solution.x, &mut residual, 1.0, 0.0);
    if !h.is_empty() {
        for (r, &hi) in residual.iter_mut().zip(h) {
            *r += hi;
        }
    }

    let signed_dual: Vec<f64> = solution
        .constraint_status
        .iter()
        .zip(&solution.dual)
        .map(|(status, &mu)| match status {
            ConstraintStatus::ActiveUpperBound => mu,
            ConstraintStatus::ActiveLowerBound => -mu,
            _ => 0.0,
        })
        .collect();
    A.t().gemv(&signed_dual, &mut residual, 1.0, 1.0);

    residual.iter().fold(0.0, |acc, r| acc.max(r.abs()))
}

fn primal_feasibility_violation(
    A: &Matrix<f64>,
    alb: &[f64],
    aub: &[f64],
    x: &[f64],
) -> f64 {
    let mut worst = 0.0f64;
    for i in 0..A.nrows() {
        let y = A.row_dot(i, x);
        worst = worst.max(alb[i] - y).max(y - aub[i]);
    }
    worst
}

#[test]
fn unconstrained() {
    let mut H = Matrix::from(&[[2.0, 0.0], [0.0, 2.0]]);
    let h = [-2.0, -4.0];

    let mut solver = Solver::new(Settings::default());
    let solution = solver
        .solve(&mut H, &h, &Matrix::empty(), &[], &[])
        .unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert_near(solution.x[0], 1.0);
    assert_near(solution.x[1], 2.0);
    assert_near(solution.obj_val, -5.0);
    assert!(solution.dual.is_empty());
    assert_eq!(solution.iterations, 0);
}

#[test]
fn single_active_lower_bound() {
    let mut H = Matrix::from(&[[1.0]]);
    let A = Matrix::from(&[[1.0]]);
    let alb = [1.0];
    let aub = [f64::INFINITY];

    let mut solver = Solver::new(Settings::default());
    let solution = solver.solve(&mut H, &[0.0], &A, &alb, &aub).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert_near(solution.x[0], 1.0);
    assert_near(solution.dual[0], 1.0);
    assert_eq!(
        solution.constraint_status[0],
        ConstraintStatus::ActiveLowerBound
    );
}

#[test]
fn box_constraints_as_identity_rows() {
    //minimize 1/2‖x − (2,−3)‖² inside the unit box
    let mut H = Matrix::identity(2);
    let h = [-2.0, 3.0];
    let A = Matrix::from(&[[1.0, 0.0], [0.0, 1.0]]);
    let alb = [-1.0, -1.0];
    let aub = [1.0, 1.0];

    let mut solver = Solver::new(Settings::default());
    let solution = solver.solve(&mut H, &h, &A, &alb, &aub).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert_near(solution.x[0], 1.0);
    assert_near(solution.x[1], -1.0);
    assert_near(solution.dual[0], 1.0);
    assert_near(solution.dual[1], 2.0);
    assert_eq!(
        solution.constraint_status[0],
        ConstraintStatus::ActiveUpperBound
    );
    assert_eq!(
        solution.constraint_status[1],
        ConstraintStatus::ActiveLowerBound
    );

    assert!(solution.constraint_status.iter().all(|s| s.is_active()));

    let H_orig = Matrix::identity(2);
    assert!(stationarity_residual(&H_orig, &h, &A, &solution) < 1e-9);
    assert!(primal_feasibility_violation(&A, &alb, &aub, &solution.x) < 1e-9);
}

#[test]
fn partial_step_drops_blocking_constraint() {
    //the first activated constraint must be dropped again on the way to
    //the optimum, exercising a partial step and a downdate
    let mut H = Matrix::identity(2);
    let A = Matrix::from(&[[1.0, 0.0], [0.1, 0.05]]);
    let alb = [1.0, 0.9];
    let aub = [f64::INFINITY, f64::INFINITY];

    let mut solver = Solver::new(Settings::default());
    let solution = solver.solve(&mut H, &[], &A, &alb, &aub).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert_near(solution.x[0], 7.2);
    assert_near(solution.x[1], 3.6);

    //the blocker went inactive, the shallow constraint carries the dual
    assert_eq!(solution.constraint_status[0], ConstraintStatus::Inactive);
    assert_eq!(
        solution.constraint_status[1],
        ConstraintStatus::ActiveLowerBound
    );
    assert_near(solution.dual[0], 0.0);
    assert_near(solution.dual[1], 72.0);

    let H_orig = Matrix::identity(2);
    assert!(stationarity_residual(&H_orig, &[], &A, &solution) < 1e-8);
    assert!(primal_feasibility_violation(&A, &alb, &aub, &solution.x) < 1e-8);

    //dual feasibility of every reported multiplier
    assert!(solution.dual.iter().all(|&d| d >= -1e-9));
}

#[test]
fn satisfied_inequalities_stay_inactive() {
    let mut H = Matrix::identity(2);
    let A = Matrix::from(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    let alb = [f64::NEG_INFINITY; 3];
    let aub = [1.0, 1.0, 1.0];

    let mut solver = Solver::new(Settings::default());
    let solution = solver.solve(&mut H, &[], &A, &alb, &aub).unwrap();

    assert_eq!(solution.status, SolverStatus::Solved);
    assert_near(solution.x[0], 0.0);
    assert_near(solution.x[1], 0.0);
    assert!(solution
        .constraint_status
        .iter()
        .all(|s| *s == ConstraintStatus::Inactive));
    assert!(solution.dual.iter().all(|&d| d == 0.0));
}

#[test]
fn infeasible_inequalities() {
    //x ≤ 1 and x ≥ 2 cannot both hold
    let mut H = Matrix::from(&[[1.0]]);
    let A = Matrix::from(&[[1.0], [1.0]]);
    let alb = [f64::NEG_INFINITY, 2.0];
    let aub = [1.0, f64::INFINITY];

    let mut solver = Solver::new(Settings::default());
    let solution = solver.solve(&mut H, &[], &A, &alb, &aub).unwrap();

    assert_eq!(solution.status, SolverStatus::InfeasibleInequality);
    assert!(solution.status.is_infeasible());
    assert!(solution.obj_val.is_nan());
}

#[test]
fn iteration_cap() {
    let mut H = Matrix::from(&[[1.0]]);
    let A = Matrix::from(&[[1.0]]);

    let settings = SettingsBuilder::<f64>::default()
        .max_iter(0)
        .build()
        .unwrap();
    let mut solver = Solver::new(settings);
    let solution = solver
        .solve(&mut H, &[0.0], &A, &[1.0], &[f64::INFINITY])
        .unwrap();

    assert_eq!(solution.status, SolverStatus::MaxIterations);
    assert_eq!(solution.iterations, 0);
}

#[test]
fn objective_matches_direct_evaluation() {
    let mut H = Matrix::from(&[[4.0, 1.0], [1.0, 3.0]]);
    let H_orig = H.clone();
    let h = [1.0, -2.0];
    let A = Matrix::from(&[[1.0, 1.0]]);
    let alb = [1.0];
    let aub = [f64::INFINITY];

    let mut solver = Solver::new(Settings::default());
    let solution = solver.solve(&mut H, &h, &A, &alb, &aub).unwrap();
    assert_eq!(solution.status, SolverStatus::Solved);

    let x = &solution.x;
    let mut direct = h[0] * x[0] + h[1] * x[1];
    for i in 0..2 {
        for j in 0..2 {
            direct += 0.5 * x[i] * H_orig[(i, j)] * x[j];
        }
    }
    assert_near(solution.obj_val, direct);
    assert!(stationarity_residual(&H_orig, &h, &A, &solution) < 1e-9);
}

#[test]
fn prefactored_hessian() {
    //solve once to obtain the factor, then reuse it
    let mut H = Matrix::from(&[[4.0, 1.0], [1.0, 3.0]]);
    let h = [1.0, -2.0];

    let mut solver = Solver::new(Settings::default());
    let first = solver
        .solve(&mut H, &h, &Matrix::empty(), &[], &[])
        .unwrap();

    let settings = SettingsBuilder::<f64>::default()
        .hessian_type(qpdas::HessianType::CholeskyFactor)
        .build()
        .unwrap();
    let mut solver = Solver::new(settings);
    let second = solver
        .solve(&mut H, &h, &Matrix::empty(), &[], &[])
        .unwrap();

    assert_eq!(second.status, SolverStatus::Solved);
    assert_near(first.x[0], second.x[0]);
    assert_near(first.x[1], second.x[1]);
}

#[test]
fn malformed_inputs_are_rejected() {
    let mut H = Matrix::identity(2);
    let A = Matrix::from(&[[1.0, 1.0]]);
    let mut solver = Solver::<f64>::default();

    //gradient length mismatch
    assert!(solver.solve(&mut H, &[1.0], &A, &[0.0], &[1.0]).is_err());

    //bounds length mismatch
    assert!(solver.solve(&mut H, &[], &A, &[0.0, 0.0], &[1.0]).is_err());

    //indefinite Hessian
    let mut Hbad = Matrix::from(&[[1.0, 2.0], [2.0, 1.0]]);
    assert!(solver
        .solve(&mut Hbad, &[], &Matrix::empty(), &[], &[])
        .is_err());
}

#[test]
fn hand_built_settings_are_revalidated() {
    //the settings fields are public, so solve re-checks them
    let settings = Settings::<f64> {
        hessian_type: qpdas::HessianType::LowerTriangular,
        max_iter: -1,
        tolerance: -1.0,
        verbose: false,
    };

    let mut H = Matrix::identity(2);
    let mut solver = Solver::new(settings);
    let result = solver.solve(&mut H, &[], &Matrix::empty(), &[], &[]);
    assert!(matches!(result, Err(qpdas::SolverError::BadSettings(_))));
}
