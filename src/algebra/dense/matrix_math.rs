#![allow(non_snake_case)]
use crate::algebra::*;
use num_complex::Complex;

impl<S, T> MultiplyGEMV for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: ScalarT,
{
    type T = T;
    // implements y = αA*x + βy, column by column so that
    // the inner loop runs over contiguous storage
    fn gemv(&self, x: &[T], y: &mut [T], α: T, β: T) {
        let (m, n) = self.size();
        assert!(n == x.len() && m == y.len());

        y.iter_mut().for_each(|yi| *yi = β * *yi);
        for (col, &xj) in x.iter().enumerate() {
            let αxj = α * xj;
            for (yi, &aij) in y.iter_mut().zip(self.col_slice(col)) {
                *yi += aij * αxj;
            }
        }
    }
}

/// Norms on slices of complex values.
pub trait ComplexVectorMath<T> {
    /// Euclidean norm
    fn norm(&self) -> T;
    /// Largest modulus
    fn norm_inf(&self) -> T;
}

impl<T> ComplexVectorMath<T> for [Complex<T>]
where
    T: FloatT,
{
    fn norm(&self) -> T {
        self.iter()
            .fold(T::zero(), |acc, z| acc + z.norm_sqr())
            .sqrt()
    }
    fn norm_inf(&self) -> T {
        self.iter().fold(T::zero(), |acc, z| T::max(acc, z.norm()))
    }
}

#[test]
fn test_gemv() {
    let (m, n) = (2, 3);
    let a = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
    let A = Matrix::new_from_slice((m, n), &a);

    let x = vec![1., 2., 3.];
    let mut y = vec![-1., -2.];
    A.gemv(&x, &mut y, 2.0, 3.0);
    assert!(y == [25.0, 58.0]);
}

#[test]
fn test_gemv_complex() {
    let i = Complex::new(0.0, 1.0);
    let one = Complex::new(1.0, 0.0);
    let zero = Complex::new(0.0, 0.0);
    // A = [1 i; 0 1]
    let A = Matrix::from(&[[one, i], [zero, one]]);
    let x = vec![i, one];
    let mut y = vec![zero; 2];
    A.gemv(&x, &mut y, one, zero);
    assert_eq!(y, vec![i + i, one]);
    assert!((y.norm() - f64::sqrt(5.0)).abs() < 1e-14);
    assert_eq!(y.norm_inf(), 2.0);
}
