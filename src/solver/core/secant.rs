//! Complex secant iteration for the root of a scalar indicator.
//!
//! Starting from two guesses `λ₀, λ₁` the update
//!
//! ```text
//!   λ_{k+1} = λ_k - g_k (λ_k - λ_{k-1}) / (g_k - g_{k-1})
//! ```
//!
//! is applied until the relative change in λ drops below a tolerance.
//! The indicator is any fallible function of λ, so the same loop drives
//! both the full dispersion matrix and simple synthetic functions.

use super::SolverStatus;
use crate::algebra::*;

/// Options controlling the secant loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantOptions<T> {
    /// maximum number of secant updates
    pub max_iter: u32,
    /// relative tolerance on |λ_{k+1} - λ_k|
    pub tol: T,
    /// relative threshold on |g_k - g_{k-1}| below which
    /// the iteration is declared stagnant
    pub stagnation_tol: T,
    /// relative perturbation used to derive λ₁ from λ₀
    pub initial_perturbation: T,
}

impl<T> Default for SecantOptions<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self {
            max_iter: 100,
            tol: (1e-6).as_T(),
            stagnation_tol: T::epsilon(),
            initial_perturbation: (1e-3).as_T(),
        }
    }
}

/// The two most recent eigenvalue guesses and their indicator values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantIterate<T> {
    pub lambda_prev: Complex<T>,
    pub lambda_curr: Complex<T>,
    pub g_prev: Complex<T>,
    pub g_curr: Complex<T>,
}

impl<T> SecantIterate<T>
where
    T: FloatT,
{
    /// most recent change of the eigenvalue guess
    pub fn d_eigen_value(&self) -> Complex<T> {
        self.lambda_curr - self.lambda_prev
    }

    /// Secant update from the current pair, or `None` when the
    /// indicator values are too close for the update to be meaningful.
    pub fn next_lambda(&self, stagnation_tol: T) -> Option<Complex<T>> {
        let dg = self.g_curr - self.g_prev;
        let gmax = T::max(self.g_curr.norm(), self.g_prev.norm());
        if dg.norm() <= stagnation_tol * gmax {
            return None;
        }
        let next = self.lambda_curr - self.g_curr * self.d_eigen_value() / dg;
        is_finite_complex(next).then_some(next)
    }

    fn advance(&mut self, lambda: Complex<T>, g: Complex<T>) {
        self.lambda_prev = self.lambda_curr;
        self.g_prev = self.g_curr;
        self.lambda_curr = lambda;
        self.g_curr = g;
    }

    fn is_converged(&self, tol: T) -> bool {
        self.g_curr.norm() == T::zero()
            || self.d_eigen_value().norm() < tol * self.lambda_curr.norm()
    }
}

/// Result of a secant search.
#[derive(Debug, Clone, PartialEq)]
pub struct SecantOutcome<T> {
    pub status: SolverStatus,
    /// final iterate.  `lambda_curr` is the last point evaluated.
    pub iterate: SecantIterate<T>,
    /// number of secant updates performed
    pub iterations: u32,
    /// every (λ, g(λ)) evaluated, in order
    pub history: Vec<(Complex<T>, Complex<T>)>,
}

impl<T> SecantOutcome<T>
where
    T: FloatT,
{
    /// final eigenvalue estimate
    pub fn lambda(&self) -> Complex<T> {
        self.iterate.lambda_curr
    }
}

/// Second starting point derived from `lambda0`: a relative
/// perturbation, or an additive one when `lambda0` is zero.
pub fn perturbed_guess<T: FloatT>(lambda0: Complex<T>, perturbation: T) -> Complex<T> {
    if lambda0.norm() == T::zero() {
        Complex::new(perturbation, T::zero())
    } else {
        lambda0 * (T::one() + perturbation)
    }
}

/// Run the secant iteration on `g` starting at `lambda0` and `lambda1`
/// (derived from `lambda0` when not given).
///
/// `observe` is called after the two starting evaluations and after every
/// update with the current iterate and update count.  Returning `true`
/// from it stops the loop with [`SolverStatus::CallbackTerminated`].
///
/// The last call made to `g` is always at the returned `lambda()`.  An
/// error from `g` ends the search immediately and is returned unchanged.
pub fn secant_search<T, E, G, O>(
    mut g: G,
    lambda0: Complex<T>,
    lambda1: Option<Complex<T>>,
    options: &SecantOptions<T>,
    mut observe: O,
) -> Result<SecantOutcome<T>, E>
where
    T: FloatT,
    G: FnMut(Complex<T>) -> Result<Complex<T>, E>,
    O: FnMut(&SecantIterate<T>, u32) -> bool,
{
    let mut history = Vec::new();
    let mut evaluate = |lambda: Complex<T>| -> Result<Complex<T>, E> {
        let value = g(lambda)?;
        history.push((lambda, value));
        Ok(value)
    };

    let g0 = evaluate(lambda0)?;
    let mut iterate = SecantIterate {
        lambda_prev: lambda0,
        lambda_curr: lambda0,
        g_prev: g0,
        g_curr: g0,
    };

    let mut status = check_value(g0);
    if status == SolverStatus::Unsolved {
        let lambda1 = lambda1.unwrap_or_else(|| perturbed_guess(lambda0, options.initial_perturbation));
        let g1 = evaluate(lambda1)?;
        iterate.advance(lambda1, g1);
        status = check_value(g1);
    }

    let mut iterations = 0u32;
    if status == SolverStatus::Unsolved && observe(&iterate, iterations) {
        status = SolverStatus::CallbackTerminated;
    }

    while status == SolverStatus::Unsolved {
        if iterations >= options.max_iter {
            status = SolverStatus::IterationLimitExceeded;
            break;
        }

        let Some(next) = iterate.next_lambda(options.stagnation_tol) else {
            status = SolverStatus::Stagnated;
            break;
        };

        let g_next = evaluate(next)?;
        iterate.advance(next, g_next);
        iterations += 1;

        if !is_finite_complex(g_next) {
            status = SolverStatus::NumericalError;
        } else if iterate.is_converged(options.tol) {
            status = SolverStatus::Converged;
        }

        if observe(&iterate, iterations) && status == SolverStatus::Unsolved {
            status = SolverStatus::CallbackTerminated;
        }
    }

    Ok(SecantOutcome {
        status,
        iterate,
        iterations,
        history,
    })
}

// status implied by a single starting evaluation
fn check_value<T: FloatT>(g: Complex<T>) -> SolverStatus {
    if !is_finite_complex(g) {
        SolverStatus::NumericalError
    } else if g.norm() == T::zero() {
        SolverStatus::Converged
    } else {
        SolverStatus::Unsolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    fn quiet(_: &SecantIterate<f64>, _: u32) -> bool {
        false
    }

    #[test]
    fn test_linear_root() {
        let root = c(3., 4.);
        let opts = SecantOptions::default();
        let out = secant_search(|l| Ok::<_, Infallible>(l - root), c(1., 0.), None, &opts, quiet)
            .unwrap();

        assert_eq!(out.status, SolverStatus::Converged);
        assert!((out.lambda() - root).norm() <= 1e-6 * root.norm());
        // a linear function is solved by the first update
        assert!(out.iterations <= 2);
        assert_eq!(out.history.last().unwrap().0, out.lambda());
    }

    #[test]
    fn test_quadratic_root() {
        // roots at ±(1+2i); start near the positive one
        let f = |l: Complex<f64>| Ok::<_, Infallible>(l * l - c(1., 2.) * c(1., 2.));
        let opts = SecantOptions::default();
        let out = secant_search(f, c(1.2, 1.8), Some(c(1.1, 2.1)), &opts, quiet).unwrap();
        assert_eq!(out.status, SolverStatus::Converged);
        assert!((out.lambda() - c(1., 2.)).norm() < 1e-6);
    }

    #[test]
    fn test_zero_iterations() {
        let opts = SecantOptions {
            max_iter: 0,
            ..SecantOptions::default()
        };
        let out = secant_search(
            |l| Ok::<_, Infallible>(l - c(3., 4.)),
            c(1., 0.),
            Some(c(2., 0.)),
            &opts,
            quiet,
        )
        .unwrap();
        assert_eq!(out.status, SolverStatus::IterationLimitExceeded);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.lambda(), c(2., 0.));
    }

    #[test]
    fn test_stagnation() {
        let opts = SecantOptions::default();
        let out =
            secant_search(|_| Ok::<_, Infallible>(c(1., 1.)), c(1., 0.), None, &opts, quiet)
                .unwrap();
        assert_eq!(out.status, SolverStatus::Stagnated);
        assert!(out.lambda().is_finite());
    }

    #[test]
    fn test_exact_root_at_start() {
        let opts = SecantOptions::default();
        let out = secant_search(|l| Ok::<_, Infallible>(l - c(2., 0.)), c(2., 0.), None, &opts, quiet)
            .unwrap();
        assert_eq!(out.status, SolverStatus::Converged);
        assert_eq!(out.history.len(), 1);
    }

    #[test]
    fn test_nonfinite_indicator() {
        let opts = SecantOptions::default();
        let out = secant_search(
            |l: Complex<f64>| Ok::<_, Infallible>(if l.re > 1.5 { c(f64::NAN, 0.) } else { l }),
            c(1., 0.),
            Some(c(2., 0.)),
            &opts,
            quiet,
        )
        .unwrap();
        assert_eq!(out.status, SolverStatus::NumericalError);
    }

    #[test]
    fn test_error_propagates() {
        let opts = SecantOptions::default();
        let mut calls = 0;
        let out = secant_search(
            |l: Complex<f64>| {
                calls += 1;
                if calls == 3 {
                    Err("assembly failed")
                } else {
                    Ok(l * l + c(1., 0.))
                }
            },
            c(1., 0.),
            None,
            &opts,
            quiet,
        );
        assert_eq!(out, Err("assembly failed"));
    }

    #[test]
    fn test_observer_stops() {
        let opts = SecantOptions::default();
        let mut seen = Vec::new();
        let out = secant_search(
            |l: Complex<f64>| Ok::<_, Infallible>(l * l * l - c(8., 0.)),
            c(1., 1.),
            None,
            &opts,
            |it, k| {
                seen.push((k, it.lambda_curr));
                k == 2
            },
        )
        .unwrap();
        assert_eq!(out.status, SolverStatus::CallbackTerminated);
        assert_eq!(out.iterations, 2);
        assert_eq!(seen.iter().map(|s| s.0).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_single_precision() {
        let root = Complex::new(3.0f32, 4.0);
        let opts = SecantOptions::<f32> {
            tol: 1e-4,
            ..SecantOptions::default()
        };
        let out = secant_search(
            |l| Ok::<_, Infallible>(l - root),
            Complex::new(1.0f32, 0.0),
            None,
            &opts,
            |_, _| false,
        )
        .unwrap();
        assert_eq!(out.status, SolverStatus::Converged);
        assert!((out.lambda() - root).norm() < 1e-3);

        // a non-finite update stops the search
        let nan = Complex::new(f32::NAN, 0.0);
        let out = secant_search(|_| Ok::<_, Infallible>(nan), root, None, &opts, |_, _| false)
            .unwrap();
        assert_eq!(out.status, SolverStatus::NumericalError);
    }

    #[test]
    fn test_perturbed_guess() {
        assert_eq!(perturbed_guess(c(0., 0.), 1e-3), c(1e-3, 0.));
        assert_eq!(perturbed_guess(c(2., -4.), 0.5), c(3., -6.));
    }
}
