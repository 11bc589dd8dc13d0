use crate::algebra::*;
use crate::solver::core::{secant::SecantOutcome, SolverStatus};

/// Results of a [`DefaultSolver`](super::DefaultSolver) run
#[derive(Debug, Clone)]
pub struct DefaultSolution<T> {
    /// final eigenvalue estimate
    pub eigenvalue: Complex<T>,
    /// dispersion matrix assembled at `eigenvalue`
    pub matrix: Matrix<Complex<T>>,
    /// indicator value at `eigenvalue`
    pub indicator: Complex<T>,
    /// final solver status
    pub status: SolverStatus,
    /// number of secant updates
    pub iterations: u32,
    /// solve time in seconds
    pub solve_time: f64,
    /// orthonormal null space basis of `matrix`, one vector per column
    pub nullspace: Matrix<Complex<T>>,
    /// right singular vector of the smallest singular value of `matrix`
    pub eigenvector: Vec<Complex<T>>,
    /// smallest singular value of `matrix`
    pub smallest_singular_value: T,
    /// ‖M v‖ for the matrix `M` and the eigenvector `v`
    pub residual: T,
    /// every (λ, g(λ)) evaluated during the search
    pub history: Vec<(Complex<T>, Complex<T>)>,
}

impl<T> DefaultSolution<T>
where
    T: FloatT,
{
    /// Create a new `DefaultSolution` for `dim × dim` matrices
    pub fn new(dim: usize) -> Self {
        let nan = Complex::new(T::nan(), T::nan());
        Self {
            eigenvalue: nan,
            matrix: Matrix::zeros((dim, dim)),
            indicator: nan,
            status: SolverStatus::Unsolved,
            iterations: 0,
            solve_time: 0f64,
            nullspace: Matrix::zeros((dim, 0)),
            eigenvector: Vec::new(),
            smallest_singular_value: T::nan(),
            residual: T::nan(),
            history: Vec::new(),
        }
    }

    pub(crate) fn reset(&mut self) {
        let dim = self.matrix.nrows();
        *self = Self::new(dim);
    }

    pub(crate) fn finalize(
        &mut self,
        outcome: SecantOutcome<T>,
        matrix: Matrix<Complex<T>>,
        solve_time: f64,
    ) {
        self.eigenvalue = outcome.lambda();
        self.indicator = outcome.iterate.g_curr;
        self.status = outcome.status;
        self.iterations = outcome.iterations;
        self.history = outcome.history;
        self.matrix = matrix;
        self.solve_time = solve_time;
    }
}
