use crate::algebra::*;
use crate::io::PrintTarget;
use crate::solver::core::{secant::SecantIterate, SolverStatus};
use crate::timers::*;

/// Progress and summary information for the [`DefaultSolver`](super::DefaultSolver).
///
/// A reference to this struct is passed to the termination callback
/// after every secant update.

#[derive(Default, Debug)]
pub struct DefaultInfo<T> {
    /// current eigenvalue estimate
    pub lambda: Complex<T>,
    /// most recent change of the eigenvalue estimate
    pub d_lambda: Complex<T>,
    /// indicator value at `lambda`
    pub indicator: Complex<T>,
    /// number of secant updates so far
    pub iterations: u32,
    /// dimension of the null space found at termination
    pub nullspace_dim: usize,
    /// solve time in seconds
    pub solve_time: f64,
    pub status: SolverStatus,

    // target stream for printed output
    pub(crate) stream: PrintTarget,
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self, timers: &mut Timers) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.nullspace_dim = 0;
        self.solve_time = 0f64;

        timers.reset_timer("solve");
    }

    pub(crate) fn update(&mut self, iterate: &SecantIterate<T>, iterations: u32) {
        self.lambda = iterate.lambda_curr;
        self.d_lambda = iterate.d_eigen_value();
        self.indicator = iterate.g_curr;
        self.iterations = iterations;
    }

    pub(crate) fn finalize(&mut self, status: SolverStatus, timers: &Timers) {
        self.status = status;
        self.solve_time = timers
            .elapsed(&["solve"])
            .unwrap_or_default()
            .as_secs_f64();
    }
}
