#![allow(non_snake_case)]

use emme::algebra::*;
use emme::physics::*;
use emme::solver::*;
use std::env;
use std::fs::File;

// usage: cargo run --example json [config.json] [solution.json]
fn main() {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => {
            let mut file = File::open(path).unwrap();
            RunConfig::<f64>::read_from_file(&mut file).unwrap()
        }
        None => RunConfig::default(),
    };

    let (params, settings) = config.resolve().unwrap();

    let model = ClosureModel::new(
        params.clone(),
        |p: &ModelParameters<f64>, _block, x, xp, lambda: Complex<f64>| {
            let decay = (-(x - xp).abs() * p.b_theta).exp();
            (lambda - Complex::new(p.tau, p.epsilon_n)) * decay
        },
        |p: &ModelParameters<f64>, x| 1.0 + p.shat * x * x,
    );

    let grid = params.grid().unwrap();
    let coeff = Matrix::from_fn((params.npoints, params.npoints), |_, _| 1.0);

    let mut solver = DefaultSolver::new(model, coeff, grid, settings).unwrap();
    solver.solve(Complex::new(1.0, 1.0)).unwrap();

    let record = SolutionRecord::from(&solver.solution);
    match args.get(2) {
        Some(path) => {
            let mut file = File::create(path).unwrap();
            record.write_to_file(&mut file).unwrap();
        }
        None => println!("{}", record.eigenvalue),
    }
}
