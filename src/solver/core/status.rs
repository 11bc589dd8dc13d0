#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Status of the eigenvalue search at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverStatus {
    /// Solver has not run
    #[default]
    Unsolved,
    /// The eigenvalue update fell below the relative tolerance
    Converged,
    /// Iteration limit reached before convergence
    IterationLimitExceeded,
    /// The indicator stopped changing, so the secant update is undefined
    Stagnated,
    /// The indicator evaluated to a non-finite value
    NumericalError,
    /// Matrix assembly or a pooled task failed
    Failed,
    /// Stopped by a user supplied termination callback
    CallbackTerminated,
}

impl SolverStatus {
    /// true only for `Converged`
    pub fn is_converged(&self) -> bool {
        matches!(*self, SolverStatus::Converged)
    }

    /// true for the statuses that indicate a numerical breakdown
    pub fn is_errored(&self) -> bool {
        matches!(
            *self,
            SolverStatus::Stagnated | SolverStatus::NumericalError | SolverStatus::Failed
        )
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
