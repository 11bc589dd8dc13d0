#![allow(non_snake_case)]

use emme::{algebra::*, io::ConfigurablePrintTarget, physics::*, solver::*};

fn test_print_solver() -> DefaultSolver<impl PhysicsModel<f64> + 'static> {
    let params = ModelParameters {
        tau: 1.0,
        length: 2.0,
        npoints: 2,
        ..ModelParameters::default()
    };
    let grid = params.grid().unwrap();
    let model = ClosureModel::new(
        params,
        |_: &ModelParameters<f64>, _, _, _, lambda: Complex<f64>| lambda - Complex::new(0.0, 1.0),
        |_: &ModelParameters<f64>, _| 0.0,
    );
    let coeff = Matrix::from_fn((2, 2), |_, _| 1.0);
    DefaultSolver::new(model, coeff, grid, DefaultSettings::default()).unwrap()
}

fn guess() -> Complex<f64> {
    Complex::new(1.5, 0.5)
}

#[test]
fn test_print_to_stdout() {
    let mut solver = test_print_solver();
    solver.print_to_stdout();
    solver.solve(guess()).unwrap();
}

#[test]
fn test_print_to_buffer() {
    let mut solver = test_print_solver();
    solver.print_to_buffer();
    solver.solve(guess()).unwrap();
    let result = solver.get_print_buffer().unwrap();
    assert!(result.contains("emme v"));
    assert!(result.contains("Terminated with status = Converged"));
    assert!(result.contains("iter"));
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let mut solver = test_print_solver();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    solver.print_to_file(file.into_file());
    solver.solve(guess()).unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("emme v"));
    assert!(result.contains("eigenvalue ="));
}

#[test]
fn test_print_to_stream() {
    use std::io::{Read, Seek};

    let mut solver = test_print_solver();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    let stream = Box::new(file.into_file());

    solver.print_to_stream(stream);
    solver.solve(guess()).unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("emme v"));
}

#[test]
fn test_print_to_sink() {
    let mut solver = test_print_solver();
    solver.print_to_sink();
    solver.solve(guess()).unwrap();
    // no output
}

#[test]
fn test_not_verbose() {
    let mut solver = test_print_solver();
    solver.settings.verbose = false;
    solver.print_to_buffer();
    solver.solve(guess()).unwrap();
    assert!(solver.get_print_buffer().unwrap().is_empty());
}

#[test]
fn test_empty_null_space_warning() {
    let mut solver = test_print_solver();
    // stop well before the matrix becomes singular
    solver.settings.max_iter = 0;
    solver.print_to_buffer();
    solver.solve(guess()).unwrap();
    let result = solver.get_print_buffer().unwrap();
    assert!(result.contains("null space dimension = 0"));
    assert!(result.contains("warning"));
}
