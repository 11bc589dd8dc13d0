use super::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::core::{
    assembly::QuadratureAssembler,
    callbacks::{Callback, SolverCallbacks},
    grid::Grid,
    indicator::{Indicator, SupportedIndicator},
    nullspace::{null_space_with_tol, smallest_singular_vector},
    secant::{secant_search, SecantOutcome},
    traits::PhysicsModel,
    SolverError, SolverStatus,
};
use crate::threads::TaskPool;
use crate::timers::*;
use nalgebra::RealField;
use std::io::Write;
use std::sync::Arc;

/// Secant search for the eigenvalue of a [`PhysicsModel`] dispersion relation.
///
/// The solver owns the physics model, the singularity coefficient
/// matrix and the grid.  Each call to [`solve`](Self::solve) runs the
/// secant iteration from a new starting guess and leaves the results
/// in [`solution`](Self::solution).
pub struct DefaultSolver<M, T = f64>
where
    T: FloatT + RealField,
    M: PhysicsModel<T>,
{
    pub(crate) assembler: QuadratureAssembler<T, M>,
    pub(crate) indicator: SupportedIndicator<T>,
    pub info: DefaultInfo<T>,
    pub solution: DefaultSolution<T>,
    pub settings: DefaultSettings<T>,
    pub(crate) timers: Option<Timers>,
    pub(crate) callbacks: SolverCallbacks<DefaultInfo<T>>,
}

/// Outcome of one point of a parameter sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint<T, V> {
    pub value: V,
    pub status: SolverStatus,
    pub eigenvalue: Complex<T>,
    pub iterations: u32,
}

impl<M, T> DefaultSolver<M, T>
where
    T: FloatT + RealField,
    M: PhysicsModel<T> + 'static,
{
    /// Create a solver.  With `settings.max_threads == 0` assembly runs
    /// on the shared pool, otherwise on a dedicated pool of that size.
    pub fn new(
        model: M,
        coeff: Matrix<T>,
        grid: Grid<T>,
        settings: DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        let pool = match settings.max_threads {
            0 => TaskPool::shared(),
            n => Arc::new(TaskPool::new(n as usize)),
        };
        Self::with_pool(pool, model, coeff, grid, settings)
    }

    /// Create a solver assembling on an explicitly provided pool.
    pub fn with_pool(
        pool: Arc<TaskPool>,
        model: M,
        coeff: Matrix<T>,
        grid: Grid<T>,
        settings: DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        settings.validate()?;

        let mut timers = Timers::default();
        let output;

        timeit! {timers => "setup"; {
            let assembler = QuadratureAssembler::new(pool, model, coeff, grid);
            output = assembler.map(|assembler| {
                let dim = assembler.dim();
                Self {
                    indicator: SupportedIndicator::new(settings.indicator, dim),
                    info: DefaultInfo::new(),
                    solution: DefaultSolution::new(dim),
                    settings,
                    assembler,
                    timers: None,
                    callbacks: SolverCallbacks::default(),
                }
            });
        }}

        let mut output = output?;
        output.timers.replace(timers);
        Ok(output)
    }

    /// Run the secant search from `lambda0`, deriving the second starting
    /// point from `settings.initial_perturbation`.
    pub fn solve(&mut self, lambda0: Complex<T>) -> Result<SolverStatus, SolverError> {
        self.run(lambda0, None)
    }

    /// Run the secant search from the starting pair `lambda0`, `lambda1`.
    pub fn solve_with_guesses(
        &mut self,
        lambda0: Complex<T>,
        lambda1: Complex<T>,
    ) -> Result<SolverStatus, SolverError> {
        self.run(lambda0, Some(lambda1))
    }

    /// Modify the physics model in place, then reinitialize it.
    pub fn update_model<F>(&mut self, f: F) -> Result<(), SolverError>
    where
        F: FnOnce(&mut M),
    {
        let model = self.assembler.model_mut().ok_or_else(|| {
            SolverError::InvalidArgument("model is in use by outstanding tasks".to_string())
        })?;
        f(model);
        model.reinitialize();
        Ok(())
    }

    /// Solve once per entry of `values`.  Before each solve `update` is
    /// applied to the model with the current value.  Every converged
    /// eigenvalue becomes the starting guess of the next solve.
    pub fn sweep<V, F>(
        &mut self,
        values: &[V],
        lambda0: Complex<T>,
        mut update: F,
    ) -> Result<Vec<SweepPoint<T, V>>, SolverError>
    where
        V: Clone,
        F: FnMut(&mut M, &V),
    {
        let mut guess = lambda0;
        let mut points = Vec::with_capacity(values.len());

        for value in values {
            self.update_model(|model| update(model, value))?;
            let status = self.solve(guess)?;
            if status.is_converged() {
                guess = self.solution.eigenvalue;
            }
            points.push(SweepPoint {
                value: value.clone(),
                status,
                eigenvalue: self.solution.eigenvalue,
                iterations: self.solution.iterations,
            });
        }
        Ok(points)
    }

    /// Stop the search whenever `callback` returns `true`.  It is called
    /// after every secant update with the current progress information.
    pub fn set_termination_callback(&mut self, callback: fn(&DefaultInfo<T>) -> bool) {
        self.callbacks.termination_callback = Callback::Rust(callback);
    }

    pub fn unset_termination_callback(&mut self) {
        self.callbacks.termination_callback = Callback::None;
    }

    pub fn assembler(&self) -> &QuadratureAssembler<T, M> {
        &self.assembler
    }

    pub fn model(&self) -> &M {
        self.assembler.model()
    }

    /// timing information from setup and the most recent solve
    pub fn timers(&self) -> Option<&Timers> {
        self.timers.as_ref()
    }

    fn run(
        &mut self,
        lambda0: Complex<T>,
        lambda1: Option<Complex<T>>,
    ) -> Result<SolverStatus, SolverError> {
        let mut timers = self.timers.take().unwrap_or_default();

        self.info.reset(&mut timers);
        self.solution.reset();

        let summary = ProblemSummary {
            layout: self.assembler.layout(),
            npoints: self.assembler.grid().npoints(),
            length: self.assembler.grid().length(),
            dim: self.assembler.dim(),
            nthreads: self.assembler.pool().nthreads(),
        };
        // print failures are not solver failures
        let _ = self.info.print_banner(&self.settings);
        let _ = self.info.print_configuration(&self.settings, &summary);
        let _ = self.info.print_status_header(&self.settings);

        let result;
        timeit! {timers => "solve"; {
            result = self.search(&mut timers, lambda0, lambda1);
        }}

        let status = match result {
            Ok(status) => status,
            Err(e) => {
                self.info.finalize(SolverStatus::Failed, &timers);
                self.solution.status = SolverStatus::Failed;
                self.solution.solve_time = self.info.solve_time;
                let _ = self.info.print_footer(&self.settings, &timers);
                self.timers.replace(timers);
                return Err(e);
            }
        };

        self.info.finalize(status, &timers);
        self.solution.solve_time = self.info.solve_time;
        let _ = self.info.print_footer(&self.settings, &timers);

        self.timers.replace(timers);
        Ok(status)
    }

    fn search(
        &mut self,
        timers: &mut Timers,
        lambda0: Complex<T>,
        lambda1: Option<Complex<T>>,
    ) -> Result<SolverStatus, SolverError> {
        let options = self.settings.secant_options();
        let mut last_matrix = None;
        let mut evaluated = Vec::new();

        let Self {
            assembler,
            indicator,
            info,
            settings,
            callbacks,
            ..
        } = self;

        let outcome: Result<SecantOutcome<T>, SolverError>;
        timeit! {timers => "secant"; {
            outcome = secant_search(
                |lambda| {
                    let assembled;
                    timeit! {timers => "assembly"; {
                        assembled = assembler.assemble(lambda);
                    }}
                    let matrix = assembled?;

                    let g;
                    timeit! {timers => "indicator"; {
                        g = indicator.evaluate(&matrix);
                    }}
                    last_matrix = Some(matrix);
                    if let Ok(value) = &g {
                        evaluated.push((lambda, *value));
                    }
                    g
                },
                lambda0,
                lambda1,
                &options,
                |iterate, k| {
                    info.update(iterate, k);
                    let _ = info.print_status(settings);
                    callbacks.check_termination(info)
                },
            );
        }}
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                // keep the points evaluated before the failure
                if let Some(&(lambda, g)) = evaluated.last() {
                    self.solution.eigenvalue = lambda;
                    self.solution.indicator = g;
                }
                self.solution.iterations = self.info.iterations;
                self.solution.history = evaluated;
                return Err(e);
            }
        };

        let status = outcome.status;
        self.info.update(&outcome.iterate, outcome.iterations);

        // the secant loop always evaluates at least once, so
        // a matrix exists whenever the search returned normally
        let Some(matrix) = last_matrix else {
            return Ok(status);
        };

        if self.settings.compute_eigenvector && matrix.data().iter().all(|&z| is_finite_complex(z)) {
            let nullspace;
            let smallest;
            timeit! {timers => "nullspace"; {
                nullspace = null_space_with_tol(&matrix, self.settings.nullspace_tol);
                smallest = smallest_singular_vector(&matrix);
            }}
            let (sigma, v) = smallest?;
            let zero = Complex::new(<T as num_traits::Zero>::zero(), <T as num_traits::Zero>::zero());
            let one = Complex::new(<T as num_traits::One>::one(), <T as num_traits::Zero>::zero());
            let mut Mv = vec![zero; v.len()];
            matrix.gemv(&v, &mut Mv, one, zero);
            self.solution.residual = Mv.norm();
            self.solution.nullspace = nullspace?;
            self.solution.eigenvector = v;
            self.solution.smallest_singular_value = sigma;
            self.info.nullspace_dim = self.solution.nullspace.ncols();
        }

        self.solution.finalize(outcome, matrix, self.info.solve_time);
        Ok(status)
    }
}

impl<M, T> ConfigurablePrintTarget for DefaultSolver<M, T>
where
    T: FloatT + RealField,
    M: PhysicsModel<T>,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.info.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}
