#![allow(non_snake_case)]

#[cfg(test)]
mod callback_test {

    use emme::solver::DefaultInfo;
    use emme::{algebra::*, physics::*, solver::*};

    // setup a custom termination function
    fn callback_r(info: &DefaultInfo<f64>) -> bool {
        if info.iterations < 2 {
            println!("tick");
            false //continue
        } else {
            println!("BOOM!\n");
            true // stop
        }
    }

    // singular at λ = ±2 + i
    fn shifted(_: &ModelParameters<f64>, _: KernelBlock, _: f64, _: f64, lambda: Complex<f64>) -> Complex<f64> {
        lambda - Complex::new(0.0, 1.0)
    }

    #[test]
    fn test_callbacks() {
        let params = ModelParameters {
            tau: 1.0,
            length: 2.0,
            npoints: 2,
            ..ModelParameters::default()
        };
        let grid = params.grid().unwrap();
        let model = ClosureModel::new(params, shifted, |_: &ModelParameters<f64>, _| 0.0);
        let coeff = Matrix::from_fn((2, 2), |_, _| 1.0);

        let settings = DefaultSettings {
            verbose: false,
            ..DefaultSettings::default()
        };
        let mut solver = DefaultSolver::new(model, coeff, grid, settings).unwrap();

        solver.set_termination_callback(callback_r);
        let status = solver.solve(Complex::new(1.5, 0.5)).unwrap();
        assert_eq!(status, SolverStatus::CallbackTerminated);
        assert_eq!(solver.solution.status, SolverStatus::CallbackTerminated);
        assert_eq!(solver.solution.iterations, 2);

        // turn it off and run again
        solver.unset_termination_callback();
        let status = solver.solve(Complex::new(1.5, 0.5)).unwrap();
        assert_eq!(status, SolverStatus::Converged);
        assert!(solver.solution.iterations > 2);
    }
}
