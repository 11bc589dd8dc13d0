#![allow(non_snake_case)]

use super::SolverError;
use crate::algebra::*;
use enum_dispatch::*;
use nalgebra::RealField;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scalar function of the dispersion matrix that vanishes exactly when
/// the matrix is singular.  The secant driver searches for its root.
#[enum_dispatch]
pub trait Indicator<T>
where
    T: FloatT + RealField,
{
    /// evaluate the indicator on a square matrix
    fn evaluate(&mut self, A: &Matrix<Complex<T>>) -> Result<Complex<T>, SolverError>;

    /// short display name
    fn name(&self) -> &'static str;
}

/// User selectable indicator method
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndicatorMethod {
    /// g = 1 / tr(M⁻¹).
    ///
    /// A well conditioned block adds a constant to tr(M⁻¹), so g tends
    /// to a nonzero limit for large |λ| and the secant steps can run
    /// away.  Use only for single field layouts.
    InverseTrace,
    /// g = det(M)
    Determinant,
    /// g = det(D⁻¹M) with D = diag(M)
    #[default]
    ScaledDeterminant,
}

impl std::fmt::Display for IndicatorMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[enum_dispatch(Indicator<T>)]
pub enum SupportedIndicator<T>
where
    T: FloatT + RealField,
{
    InverseTraceIndicator(InverseTraceIndicator<T>),
    DeterminantIndicator(DeterminantIndicator<T>),
    ScaledDeterminantIndicator(ScaledDeterminantIndicator<T>),
}

impl<T> SupportedIndicator<T>
where
    T: FloatT + RealField,
{
    /// indicator of type `method` for `n × n` matrices
    pub fn new(method: IndicatorMethod, n: usize) -> Self {
        match method {
            IndicatorMethod::InverseTrace => InverseTraceIndicator::new(n).into(),
            IndicatorMethod::Determinant => DeterminantIndicator::new(n).into(),
            IndicatorMethod::ScaledDeterminant => ScaledDeterminantIndicator::new(n).into(),
        }
    }
}

fn zero<T: FloatT>() -> Complex<T> {
    Complex::new(<T as num_traits::Zero>::zero(), <T as num_traits::Zero>::zero())
}

fn one<T: FloatT>() -> Complex<T> {
    Complex::new(<T as num_traits::One>::one(), <T as num_traits::Zero>::zero())
}

// -------------------------------------
// 1 / tr(M⁻¹)
// -------------------------------------

pub struct InverseTraceIndicator<T>
where
    T: FloatT + RealField,
{
    lu: LUEngine<T>,
}

impl<T> InverseTraceIndicator<T>
where
    T: FloatT + RealField,
{
    pub fn new(n: usize) -> Self {
        Self {
            lu: LUEngine::new(n),
        }
    }
}

impl<T> Indicator<T> for InverseTraceIndicator<T>
where
    T: FloatT + RealField,
{
    fn evaluate(&mut self, A: &Matrix<Complex<T>>) -> Result<Complex<T>, SolverError> {
        self.lu.factor(A)?;
        match self.lu.inverse_trace() {
            Ok(tr) => Ok(one::<T>() / tr),
            // an exactly singular matrix is an exact root
            Err(DenseFactorizationError::Singular) => Ok(zero()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "inverse trace"
    }
}

// -------------------------------------
// det(M)
// -------------------------------------

pub struct DeterminantIndicator<T>
where
    T: FloatT + RealField,
{
    lu: LUEngine<T>,
}

impl<T> DeterminantIndicator<T>
where
    T: FloatT + RealField,
{
    pub fn new(n: usize) -> Self {
        Self {
            lu: LUEngine::new(n),
        }
    }
}

impl<T> Indicator<T> for DeterminantIndicator<T>
where
    T: FloatT + RealField,
{
    fn evaluate(&mut self, A: &Matrix<Complex<T>>) -> Result<Complex<T>, SolverError> {
        self.lu.factor(A)?;
        Ok(self.lu.determinant()?)
    }

    fn name(&self) -> &'static str {
        "determinant"
    }
}

// -------------------------------------
// det(D⁻¹M), D = diag(M)
// -------------------------------------

pub struct ScaledDeterminantIndicator<T>
where
    T: FloatT + RealField,
{
    lu: LUEngine<T>,
    work: Matrix<Complex<T>>,
}

impl<T> ScaledDeterminantIndicator<T>
where
    T: FloatT + RealField,
{
    pub fn new(n: usize) -> Self {
        Self {
            lu: LUEngine::new(n),
            work: Matrix::zeros((n, n)),
        }
    }
}

impl<T> Indicator<T> for ScaledDeterminantIndicator<T>
where
    T: FloatT + RealField,
{
    fn evaluate(&mut self, A: &Matrix<Complex<T>>) -> Result<Complex<T>, SolverError> {
        if A.size() != self.work.size() {
            return Err(DenseFactorizationError::IncompatibleDimension.into());
        }

        // scale row i by 1/M(i,i).  A zero diagonal gives a
        // non-finite indicator, reported by the driver.
        let dinv: Vec<Complex<T>> = A.diag().iter().map(|&d| one::<T>() / d).collect();
        for col in 0..A.ncols() {
            let src = A.col_slice(col);
            let dst = self.work.col_slice_mut(col);
            for ((w, &a), &s) in dst.iter_mut().zip(src).zip(dinv.iter()) {
                *w = a * s;
            }
        }

        self.lu.factor(&self.work)?;
        Ok(self.lu.determinant()?)
    }

    fn name(&self) -> &'static str {
        "scaled determinant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn test_indicators_on_regular_matrix() {
        // det = 5, tr(M⁻¹) = 1, diag product = 6
        let A = Matrix::from(&[[c(2., 0.), c(0., 1.)], [c(0., -1.), c(3., 0.)]]);

        let mut g = SupportedIndicator::<f64>::new(IndicatorMethod::InverseTrace, 2);
        assert!((g.evaluate(&A).unwrap() - c(1., 0.)).norm() < 1e-12);
        assert_eq!(g.name(), "inverse trace");

        let mut g = SupportedIndicator::<f64>::new(IndicatorMethod::Determinant, 2);
        assert!((g.evaluate(&A).unwrap() - c(5., 0.)).norm() < 1e-12);

        let mut g = SupportedIndicator::<f64>::new(IndicatorMethod::ScaledDeterminant, 2);
        assert!((g.evaluate(&A).unwrap() - c(5. / 6., 0.)).norm() < 1e-12);
    }

    #[test]
    fn test_indicators_vanish_when_singular() {
        let A = Matrix::from(&[[c(1., 1.), c(2., 2.)], [c(2., 0.), c(4., 0.)]]);

        for method in [
            IndicatorMethod::InverseTrace,
            IndicatorMethod::Determinant,
            IndicatorMethod::ScaledDeterminant,
        ] {
            let mut g = SupportedIndicator::<f64>::new(method, 2);
            assert!(g.evaluate(&A).unwrap().norm() < 1e-12, "{method}");
        }
    }

    #[test]
    fn test_indicator_bad_size() {
        let A = Matrix::<Complex<f64>>::identity(3);
        let mut g = SupportedIndicator::<f64>::new(IndicatorMethod::ScaledDeterminant, 2);
        assert_eq!(
            g.evaluate(&A),
            Err(SolverError::Factorization(
                DenseFactorizationError::IncompatibleDimension
            ))
        );
    }
}
