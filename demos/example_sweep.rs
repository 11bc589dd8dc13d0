#![allow(non_snake_case)]

use emme::algebra::*;
use emme::physics::*;
use emme::solver::*;

fn main() {
    let params = ModelParameters {
        npoints: 12,
        length: 6.0,
        ..ModelParameters::default()
    };

    let model = ClosureModel::new(
        params.clone(),
        |p: &ModelParameters<f64>, _block, x, xp, lambda: Complex<f64>| {
            let decay = (-(x - xp).abs()).exp();
            (lambda - Complex::new(p.eta_i, 0.5)) * (p.shat * decay)
        },
        |_: &ModelParameters<f64>, _x| 0.0,
    );

    let grid = params.grid().unwrap();
    let coeff = Matrix::from_fn((params.npoints, params.npoints), |_, _| 1.0);

    let settings = DefaultSettingsBuilder::default()
        .verbose(false)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(model, coeff, grid, settings).unwrap();

    // follow the eigenvalue as the ion temperature gradient grows
    let eta_i: Vec<f64> = (0..6).map(|k| 1.0 + 0.5 * k as f64).collect();

    let points = solver
        .sweep(&eta_i, Complex::new(1.0, 1.0), |model, &eta| {
            model.parameters_mut().eta_i = eta;
        })
        .unwrap();

    println!("{:>8}  {:>24}  {:>6}  status", "eta_i", "eigenvalue", "iter");
    for p in points {
        println!(
            "{:>8.3}  {:>24.6}  {:>6}  {}",
            p.value, p.eigenvalue, p.iterations, p.status
        );
    }
}
