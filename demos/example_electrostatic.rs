#![allow(non_snake_case)]

use emme::algebra::*;
use emme::physics::*;
use emme::solver::*;

fn main() {
    let params = ModelParameters {
        npoints: 16,
        length: 8.0,
        ..ModelParameters::default()
    };

    // a smooth kernel decaying with the distance along the field line
    let model = ClosureModel::new(
        params.clone(),
        |p: &ModelParameters<f64>, _block, x, xp, lambda: Complex<f64>| {
            let decay = (-(x - xp).abs() / p.q).exp();
            lambda * (p.shat * decay) - Complex::new(0.0, p.epsilon_n * decay)
        },
        |_: &ModelParameters<f64>, _x| 0.0,
    );

    let grid = params.grid().unwrap();
    let coeff = Matrix::from_fn((params.npoints, params.npoints), |_, _| 1.0);

    let mut settings = DefaultSettingsBuilder::default()
        .tol(1e-8)
        .indicator(IndicatorMethod::InverseTrace)
        .build()
        .unwrap();
    params.apply_to(&mut settings);

    let mut solver = DefaultSolver::new(model, coeff, grid, settings).unwrap();

    solver.solve(Complex::new(1.0, 1.0)).unwrap();

    println!("eigenvalue = {}", solver.solution.eigenvalue);
    println!("status     = {}", solver.solution.status);
}
