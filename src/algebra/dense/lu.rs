#![allow(non_snake_case)]

use crate::algebra::*;
use nalgebra::{DMatrix, RealField};
use num_complex::Complex;

/// Partially pivoted LU factorization of a square complex matrix.
///
/// The factors are held internally and queried for the determinant and
/// for the trace of the inverse, which are the building blocks of the
/// convergence indicators.
pub struct LUEngine<T>
where
    T: FloatT + RealField,
{
    n: usize,
    lu: Option<nalgebra::linalg::LU<Complex<T>, nalgebra::Dyn, nalgebra::Dyn>>,
}

impl<T> LUEngine<T>
where
    T: FloatT + RealField,
{
    pub fn new(n: usize) -> Self {
        Self { n, lu: None }
    }

    /// factor A, replacing any previous factorization
    pub fn factor<S>(
        &mut self, A: &DenseStorageMatrix<S, Complex<T>>
    ) -> Result<(), DenseFactorizationError>
    where
        S: AsRef<[Complex<T>]>,
    {
        let (m, n) = A.size();
        if m != n || n != self.n {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }
        self.lu = Some(to_dmatrix(A).lu());
        Ok(())
    }

    fn factors(
        &self,
    ) -> Result<&nalgebra::linalg::LU<Complex<T>, nalgebra::Dyn, nalgebra::Dyn>, DenseFactorizationError>
    {
        self.lu
            .as_ref()
            .ok_or(DenseFactorizationError::IncompatibleDimension)
    }

    /// determinant of the most recently factored matrix
    pub fn determinant(&self) -> Result<Complex<T>, DenseFactorizationError> {
        Ok(self.factors()?.determinant())
    }

    /// trace of the inverse of the most recently factored matrix
    pub fn inverse_trace(&self) -> Result<Complex<T>, DenseFactorizationError> {
        let inv = self
            .factors()?
            .try_inverse()
            .ok_or(DenseFactorizationError::Singular)?;
        Ok(inv.trace())
    }
}

// nalgebra is column major, as are our own dense types
pub(crate) fn to_dmatrix<S, T>(A: &DenseStorageMatrix<S, T>) -> DMatrix<T>
where
    S: AsRef<[T]>,
    T: ScalarT,
{
    let (m, n) = A.size();
    DMatrix::from_column_slice(m, n, A.data())
}
