#![allow(non_snake_case)]

use super::SolverError;
use crate::algebra::*;
use nalgebra::RealField;
use num_traits::Float;

fn factor_square<S, T>(A: &DenseStorageMatrix<S, Complex<T>>) -> Result<SVDEngine<T>, SolverError>
where
    S: AsRef<[Complex<T>]>,
    T: FloatT + RealField,
{
    if !A.is_square() {
        let (m, n) = A.size();
        return Err(SolverError::InvalidArgument(
            MatrixError::NotSquare(m, n).to_string(),
        ));
    }
    if A.nrows() == 0 {
        return Err(SolverError::InvalidArgument("empty matrix".to_string()));
    }
    let mut svd = SVDEngine::new(A.size());
    svd.factor(A)?;
    Ok(svd)
}

/// Orthonormal basis for the numerical null space of a square matrix,
/// using a threshold of machine epsilon relative to the largest
/// singular value.  See [`null_space_with_tol`].
pub fn null_space<S, T>(A: &DenseStorageMatrix<S, Complex<T>>) -> Result<Matrix<Complex<T>>, SolverError>
where
    S: AsRef<[Complex<T>]>,
    T: FloatT + RealField,
{
    null_space_with_tol(A, <T as Float>::epsilon())
}

/// Orthonormal basis for the numerical null space of a square matrix.
///
/// Returns the right singular vectors whose singular value is at most
/// `tol · σ_max`, one per column and ordered by increasing singular value.
/// A matrix with no such singular value gives a result with zero columns.
pub fn null_space_with_tol<S, T>(
    A: &DenseStorageMatrix<S, Complex<T>>,
    tol: T,
) -> Result<Matrix<Complex<T>>, SolverError>
where
    S: AsRef<[Complex<T>]>,
    T: FloatT + RealField,
{
    let svd = factor_square(A)?;
    let threshold = tol * svd.max_singular_value();

    let mut keep: Vec<usize> = (0..svd.s.len()).filter(|&k| svd.s[k] <= threshold).collect();
    keep.sort_by(|&a, &b| svd.s[a].partial_cmp(&svd.s[b]).unwrap_or(std::cmp::Ordering::Equal));

    let mut N = Matrix::zeros((A.nrows(), keep.len()));
    for (col, &k) in keep.iter().enumerate() {
        N.set_col(col, &svd.right_singular_vector(k));
    }
    Ok(N)
}

/// The smallest singular value of a square matrix and its right singular
/// vector, i.e. the best available approximation of an eigenmode when the
/// matrix is only close to singular.
pub fn smallest_singular_vector<S, T>(
    A: &DenseStorageMatrix<S, Complex<T>>,
) -> Result<(T, Vec<Complex<T>>), SolverError>
where
    S: AsRef<[Complex<T>]>,
    T: FloatT + RealField,
{
    let svd = factor_square(A)?;
    let k = svd.argmin_singular_value().unwrap_or(0);
    Ok((svd.s[k], svd.right_singular_vector(k)))
}
