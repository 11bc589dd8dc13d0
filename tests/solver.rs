#![allow(non_snake_case)]

use emme::{algebra::*, physics::*, solver::*, threads::TaskPool};
use std::sync::Arc;

// M(λ) = [[2, -(λ - i)], [-(λ - i), 2]] is singular at λ = ±2 + i
// with null vector (1, ±1)/√2
fn two_point_params() -> ModelParameters<f64> {
    ModelParameters {
        tau: 1.0,
        length: 2.0,
        npoints: 2,
        ..ModelParameters::default()
    }
}

fn shifted_kernel(
    _: &ModelParameters<f64>,
    _: KernelBlock,
    _: f64,
    _: f64,
    lambda: Complex<f64>,
) -> Complex<f64> {
    lambda - Complex::new(0.0, 1.0)
}

fn no_bi(_: &ModelParameters<f64>, _: f64) -> f64 {
    0.0
}

fn two_point_solver(settings: DefaultSettings<f64>) -> DefaultSolver<impl PhysicsModel<f64> + 'static> {
    let params = two_point_params();
    let grid = params.grid().unwrap();
    let model = ClosureModel::new(params, shifted_kernel, no_bi);
    let coeff = Matrix::from_fn((2, 2), |_, _| 1.0);
    DefaultSolver::new(model, coeff, grid, settings).unwrap()
}

fn quiet() -> DefaultSettings<f64> {
    DefaultSettingsBuilder::default()
        .verbose(false)
        .build()
        .unwrap()
}

#[test]
fn test_solver_converges() {
    let root = Complex::new(2.0, 1.0);

    for method in [
        IndicatorMethod::InverseTrace,
        IndicatorMethod::Determinant,
        IndicatorMethod::ScaledDeterminant,
    ] {
        let settings = DefaultSettings {
            indicator: method,
            ..quiet()
        };
        let mut solver = two_point_solver(settings);
        let status = solver.solve(Complex::new(1.5, 0.5)).unwrap();

        assert_eq!(status, SolverStatus::Converged, "{method}");
        assert_eq!(solver.solution.status, SolverStatus::Converged);
        assert!((solver.solution.eigenvalue - root).norm() < 1e-5, "{method}");
        assert_eq!(solver.info.status, SolverStatus::Converged);
        assert!(solver.solution.iterations > 0);

        // the matrix is the one assembled at the final eigenvalue
        let expected = solver.assembler().assemble(solver.solution.eigenvalue).unwrap();
        assert_eq!(solver.solution.matrix, expected);

        // eigenvector is (1,1)/√2 up to a phase
        let v = &solver.solution.eigenvector;
        assert_eq!(v.len(), 2);
        let overlap = (v[0] + v[1]).norm() / f64::sqrt(2.0);
        assert!((overlap - 1.0).abs() < 1e-5);
        assert!(solver.solution.smallest_singular_value < 1e-4);
        assert!(solver.solution.residual < 1e-4);
        assert!(solver.solution.nullspace.ncols() <= 1);
    }
}

#[test]
fn test_solve_with_guesses() {
    let mut solver = two_point_solver(quiet());
    let status = solver
        .solve_with_guesses(Complex::new(-1.5, 0.5), Complex::new(-1.6, 0.6))
        .unwrap();
    assert_eq!(status, SolverStatus::Converged);
    assert!((solver.solution.eigenvalue - Complex::new(-2.0, 1.0)).norm() < 1e-5);

    // history starts with the two guesses and ends at the eigenvalue
    let history = &solver.solution.history;
    assert_eq!(history[0].0, Complex::new(-1.5, 0.5));
    assert_eq!(history[1].0, Complex::new(-1.6, 0.6));
    assert_eq!(history.last().unwrap().0, solver.solution.eigenvalue);
}

#[test]
fn test_iteration_limit() {
    let settings = DefaultSettings {
        max_iter: 0,
        ..quiet()
    };
    let mut solver = two_point_solver(settings);
    let status = solver.solve(Complex::new(1.5, 0.5)).unwrap();
    assert_eq!(status, SolverStatus::IterationLimitExceeded);
    assert!(!status.is_converged());
    assert_eq!(solver.solution.iterations, 0);
    assert_eq!(solver.solution.history.len(), 2);
}

#[test]
fn test_invalid_settings_rejected() {
    let params = two_point_params();
    let grid = params.grid().unwrap();
    let model = ClosureModel::new(params, shifted_kernel, no_bi);
    let settings = DefaultSettings {
        tol: -1.0,
        ..quiet()
    };
    let result = DefaultSolver::new(model, Matrix::zeros((2, 2)), grid, settings);
    assert!(matches!(result, Err(SolverError::Settings(_))));
}

#[test]
fn test_coefficient_mismatch_rejected() {
    let params = two_point_params();
    let grid = params.grid().unwrap();
    let model = ClosureModel::new(params, shifted_kernel, no_bi);
    let result = DefaultSolver::new(model, Matrix::zeros((3, 3)), grid, quiet());
    assert!(matches!(
        result,
        Err(SolverError::DimensionMismatch {
            expected: (2, 2),
            found: (3, 3)
        })
    ));
}

#[test]
fn test_dedicated_pool() {
    let pool = Arc::new(TaskPool::new(2));
    let params = two_point_params();
    let grid = params.grid().unwrap();
    let model = ClosureModel::new(params, shifted_kernel, no_bi);
    let coeff = Matrix::from_fn((2, 2), |_, _| 1.0);
    let mut solver = DefaultSolver::with_pool(Arc::clone(&pool), model, coeff, grid, quiet()).unwrap();

    let before = pool.tasks_completed();
    solver.solve(Complex::new(1.5, 0.5)).unwrap();
    // one pair per assembly
    assert_eq!(pool.tasks_completed() - before, solver.solution.history.len());
}

#[test]
fn test_kernel_failure_is_returned() {
    let params = two_point_params();
    let grid = params.grid().unwrap();
    let model = ClosureModel::new(
        params,
        |_: &ModelParameters<f64>, _, _, _, lambda: Complex<f64>| {
            if lambda.re > 1.7 {
                panic!("kernel out of range");
            }
            lambda
        },
        no_bi,
    );
    let coeff = Matrix::from_fn((2, 2), |_, _| 1.0);
    let mut solver = DefaultSolver::new(model, coeff, grid, quiet()).unwrap();

    let err = solver.solve(Complex::new(1.5, 0.5)).unwrap_err();
    assert!(matches!(err, SolverError::TaskFailure(_)));
    assert_eq!(solver.solution.status, SolverStatus::Failed);
    assert_eq!(solver.info.status, SolverStatus::Failed);

    // both starting points were evaluated before the first update failed
    let history = &solver.solution.history;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].0, Complex::new(1.5, 0.5));
    assert_eq!(solver.solution.eigenvalue, history[1].0);
    assert_eq!(solver.solution.indicator, history[1].1);
    assert!(solver.solution.eigenvalue.is_finite());
    assert_eq!(solver.solution.iterations, 0);
}

#[test]
fn test_timers_recorded() {
    let mut solver = two_point_solver(quiet());
    solver.solve(Complex::new(1.5, 0.5)).unwrap();

    let timers = solver.timers().unwrap();
    assert!(timers.elapsed(&["setup"]).is_some());
    assert!(timers.elapsed(&["solve", "secant", "assembly"]).is_some());
    assert!(timers.elapsed(&["solve", "secant", "indicator"]).is_some());
    assert!(timers.elapsed(&["solve", "nullspace"]).is_some());
    assert!(solver.solution.solve_time > 0.0);
}

fn electromagnetic_solver(settings: DefaultSettings<f64>) -> DefaultSolver<impl PhysicsModel<f64> + 'static> {
    // the Apar block is diagonal and nonsingular, so the eigenvalue
    // is set by the potential block alone
    let params = ModelParameters {
        field_layout: FieldLayout::Electromagnetic,
        beta_e: 2.0,
        ..two_point_params()
    };
    let grid = params.grid().unwrap();
    let model = ClosureModel::new(
        params,
        |p: &ModelParameters<f64>, block, x, xp, lambda| match block {
            KernelBlock::Phi => shifted_kernel(p, block, x, xp, lambda),
            _ => Complex::new(0.0, 0.0),
        },
        |_: &ModelParameters<f64>, _| 1.0,
    );
    let coeff = Matrix::from_fn((2, 2), |_, _| 1.0);
    DefaultSolver::new(model, coeff, grid, settings).unwrap()
}

#[test]
fn test_electromagnetic_solve() {
    let mut solver = electromagnetic_solver(quiet());

    assert_eq!(solver.assembler().dim(), 4);
    let status = solver.solve(Complex::new(1.5, 0.5)).unwrap();
    assert_eq!(status, SolverStatus::Converged);
    assert!((solver.solution.eigenvalue - Complex::new(2.0, 1.0)).norm() < 1e-5);
    assert_eq!(solver.solution.eigenvector.len(), 4);
}

#[test]
fn test_electromagnetic_default_indicator() {
    // tr(M⁻¹) picks up a constant from the Apar block, so the
    // default indicator must be one that still vanishes at the root
    let settings = DefaultSettings {
        verbose: false,
        ..DefaultSettings::default()
    };
    assert_eq!(settings.indicator, IndicatorMethod::ScaledDeterminant);

    for method in [IndicatorMethod::ScaledDeterminant, IndicatorMethod::Determinant] {
        let mut solver = electromagnetic_solver(DefaultSettings {
            indicator: method,
            ..settings.clone()
        });
        let status = solver.solve(Complex::new(1.5, 0.5)).unwrap();
        assert_eq!(status, SolverStatus::Converged, "{method}");
        assert!(solver.solution.eigenvalue.is_finite());
        assert!((solver.solution.eigenvalue - Complex::new(2.0, 1.0)).norm() < 1e-5);
        assert!(solver.solution.iterations < 20);
    }
}
