#![allow(non_snake_case)]

use super::lu::to_dmatrix;
use crate::algebra::*;
use nalgebra::RealField;
use num_complex::Complex;
use num_traits::Float;

/// Singular value decomposition A = U Σ Vᴴ of a complex matrix.
pub struct SVDEngine<T> {
    /// Computed singular values.  These are *not* sorted.
    pub s: Vec<T>,

    /// Left and right SVD matrices, each containing
    /// min(m,n) vectors.  Note right singular vectors
    /// are stored in conjugate transposed form.
    pub U: Matrix<Complex<T>>,
    pub Vt: Matrix<Complex<T>>,

    /// Limit on implicit QR sweeps.  Exceeding it
    /// fails with [`DenseFactorizationError::SVD`].
    pub max_iter: usize,
}

impl<T> SVDEngine<T>
where
    T: FloatT + RealField,
{
    pub fn new(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let k = usize::min(m, n);
        Self {
            s: vec![<T as num_traits::Zero>::zero(); k],
            U: Matrix::zeros((m, k)),
            Vt: Matrix::zeros((k, n)),
            max_iter: usize::max(100, 6 * k * k),
        }
    }

    /// compute the (economy size) SVD of A
    pub fn factor<S>(
        &mut self, A: &DenseStorageMatrix<S, Complex<T>>
    ) -> Result<(), DenseFactorizationError>
    where
        S: AsRef<[Complex<T>]>,
    {
        let (m, n) = A.size();
        if self.U.nrows() != m || self.Vt.ncols() != n {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        // same zero threshold as nalgebra's infallible svd()
        let eps = <T as Float>::epsilon() * (5.0).as_T();
        let svd = to_dmatrix(A)
            .try_svd(true, true, eps, self.max_iter)
            .ok_or(DenseFactorizationError::SVD)?;

        let (u, vt) = match (svd.u, svd.v_t) {
            (Some(u), Some(vt)) => (u, vt),
            _ => return Err(DenseFactorizationError::SVD),
        };

        self.s.copy_from_slice(svd.singular_values.as_slice());
        self.U.data_mut().copy_from_slice(u.as_slice());
        self.Vt.data_mut().copy_from_slice(vt.as_slice());
        Ok(())
    }

    /// the k-th right singular vector, i.e. column k of V
    pub fn right_singular_vector(&self, k: usize) -> Vec<Complex<T>> {
        self.Vt.get_row(k).iter().map(|z| z.conj()).collect()
    }

    /// largest singular value
    pub fn max_singular_value(&self) -> T {
        self.s
            .iter()
            .fold(<T as num_traits::Zero>::zero(), |acc, &x| <T as Float>::max(acc, x))
    }

    /// index of the smallest singular value
    pub fn argmin_singular_value(&self) -> Option<usize> {
        self.s
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn test_svd_reconstruct() {
        let A = Matrix::from(&[
            [c(1., 1.), c(2., 0.), c(0., -1.)],
            [c(0., 0.), c(3., 2.), c(1., 0.)],
            [c(-1., 0.), c(0., 1.), c(4., 0.)],
        ]);
        let mut eng = SVDEngine::<f64>::new((3, 3));
        eng.factor(&A).unwrap();

        // A = Σ_k s_k u_k v_kᴴ
        for i in 0..3 {
            for j in 0..3 {
                let mut aij = c(0., 0.);
                for k in 0..3 {
                    aij += eng.U[(i, k)] * eng.s[k] * eng.Vt[(k, j)];
                }
                assert!((aij - A[(i, j)]).norm() < 1e-10);
            }
        }
    }

    #[test]
    fn test_svd_singular_vectors() {
        // rank one in the first coordinate only
        let A = Matrix::from(&[
            [c(2., 0.), c(0., 0.)],
            [c(0., 0.), c(0., 0.)],
        ]);
        let mut eng = SVDEngine::<f64>::new((2, 2));
        eng.factor(&A).unwrap();
        assert!((eng.max_singular_value() - 2.0).abs() < 1e-12);

        let k = eng.argmin_singular_value().unwrap();
        assert!(eng.s[k].abs() < 1e-12);
        let v = eng.right_singular_vector(k);
        assert!(v[0].norm() < 1e-12);
        assert!((v[1].norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_svd_iteration_limit() {
        let A = Matrix::from(&[
            [c(4., 1.), c(1., 0.), c(0., 2.), c(1., 1.)],
            [c(1., 0.), c(3., 0.), c(1., -1.), c(0., 0.)],
            [c(0., -2.), c(1., 1.), c(2., 0.), c(1., 0.)],
            [c(1., -1.), c(0., 0.), c(1., 0.), c(5., 3.)],
        ]);
        let mut eng = SVDEngine::<f64>::new((4, 4));
        assert_eq!(eng.max_iter, 100);
        eng.factor(&A).unwrap();

        eng.max_iter = 1;
        assert_eq!(eng.factor(&A), Err(DenseFactorizationError::SVD));
    }

    #[test]
    fn test_svd_bad_dims() {
        let A = Matrix::<Complex<f64>>::zeros((3, 3));
        let mut eng = SVDEngine::<f64>::new((2, 2));
        assert_eq!(
            eng.factor(&A),
            Err(DenseFactorizationError::IncompatibleDimension)
        );
    }
}
