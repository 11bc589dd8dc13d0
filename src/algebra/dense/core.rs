use crate::algebra::*;
use num_complex::Complex;
use std::ops::{Index, IndexMut};

// core dense matrix type for owned, aligned and borrowed matrices
#[derive(Debug, Clone, PartialEq)]
pub struct DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: Sized,
{
    /// dimensions
    pub size: (usize, usize),
    /// vector of data in column major format
    pub data: S,
    pub(crate) phantom: std::marker::PhantomData<T>,
}

/// Dense matrix with heap (`Vec`) storage
pub type Matrix<T> = DenseStorageMatrix<Vec<T>, T>;
/// Dense matrix with storage aligned to [`MATRIX_ALIGNMENT`] bytes
pub type AlignedMatrix<T> = DenseStorageMatrix<AlignedVec<T>, T>;
/// Read only dense matrix view over a slice
pub type BorrowedMatrix<'a, T> = DenseStorageMatrix<&'a [T], T>;

impl<S, T> ShapedMatrix for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
{
    fn size(&self) -> (usize, usize) {
        self.size
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
{
    #[inline]
    pub fn index_linear(&self, idx: (usize, usize)) -> usize {
        debug_assert!(idx.0 < self.size.0 && idx.1 < self.size.1);
        idx.0 + self.size.0 * idx.1
    }

    pub fn data(&self) -> &[T] {
        self.data.as_ref()
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        let (m, n) = self.size;
        assert!(col < n);
        &self.data()[(col * m)..(col + 1) * m]
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: Copy,
{
    /// copy of column `col` as an independent vector
    pub fn get_col(&self, col: usize) -> Vec<T> {
        self.col_slice(col).to_vec()
    }

    /// copy of row `row` as an independent vector
    pub fn get_row(&self, row: usize) -> Vec<T> {
        let (m, n) = self.size;
        assert!(row < m);
        (0..n).map(|col| self.data()[row + m * col]).collect()
    }

    /// the main diagonal
    pub fn diag(&self) -> Vec<T> {
        let k = usize::min(self.size.0, self.size.1);
        (0..k).map(|i| self[(i, i)]).collect()
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsMut<[T]> + AsRef<[T]>,
{
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data.as_mut()
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        let (m, n) = self.size;
        assert!(col < n);
        &mut self.data_mut()[(col * m)..(col + 1) * m]
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsMut<[T]> + AsRef<[T]>,
    T: Copy,
{
    /// overwrite column `col` with the entries of `v`
    pub fn set_col(&mut self, col: usize, v: &[T]) {
        assert!(v.len() == self.size.0);
        self.col_slice_mut(col).copy_from_slice(v);
    }

    pub fn fill(&mut self, value: T) {
        self.data_mut().iter_mut().for_each(|x| *x = value);
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: DenseStorage<T>,
    T: ScalarT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        Self {
            size,
            data: S::from_elem(T::zero(), m * n),
            phantom: std::marker::PhantomData::<T>,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Self::zeros((n, n));
        for i in 0..n {
            mat[(i, i)] = T::one();
        }
        mat
    }

    /// construct from column major data
    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            size,
            data: S::from_slice(src),
            phantom: std::marker::PhantomData::<T>,
        }
    }

    /// construct by evaluating `f(row, col)` at every entry
    pub fn from_fn(size: (usize, usize), mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut mat = Self::zeros(size);
        for col in 0..size.1 {
            for row in 0..size.0 {
                mat[(row, col)] = f(row, col);
            }
        }
        mat
    }

    /// sum of the diagonal entries
    pub fn trace(&self) -> T {
        assert!(self.is_square());
        (0..self.size.0).fold(T::zero(), |acc, i| acc + self[(i, i)])
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: FloatT,
{
    /// complex copy of a real matrix
    pub fn to_complex(&self) -> Matrix<Complex<T>> {
        let data: Vec<Complex<T>> = self.data().iter().map(|&x| Complex::new(x, T::zero())).collect();
        Matrix::<Complex<T>>::new_from_slice(self.size, &data)
    }
}

impl<'a, T> BorrowedMatrix<'a, T> {
    pub fn from_slice(data: &'a [T], m: usize, n: usize) -> Self {
        assert!(m * n == data.len());
        Self {
            size: (m, n),
            data,
            phantom: std::marker::PhantomData::<T>,
        }
    }
}

impl<S, T> Index<(usize, usize)> for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: Sized,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &T {
        let lidx = self.index_linear(idx);
        &self.data()[lidx]
    }
}

impl<S, T> IndexMut<(usize, usize)> for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]> + AsMut<[T]>,
    T: Sized,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data_mut()[lidx]
    }
}

// nested arrays are taken as rows, so that the
// source code reads like the matrix it produces
impl<S, T, const M: usize, const N: usize> From<&[[T; N]; M]> for DenseStorageMatrix<S, T>
where
    S: DenseStorage<T>,
    T: ScalarT,
{
    fn from(rows: &[[T; N]; M]) -> Self {
        Self::from_fn((M, N), |r, c| rows[r][c])
    }
}

impl<S, T> std::fmt::Display for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.nrows() {
            write!(f, "[ ")?;
            for j in 0..self.ncols() {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_indexing_matrix() -> Matrix<f64> {
        // Create a 3x3 matrix in column-major order:
        // [ 1.0  4.0  7.0 ]
        // [ 2.0  5.0  8.0 ]
        // [ 3.0  6.0  9.0 ]
        Matrix::from(&[[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]])
    }

    #[test]
    fn test_matrix_indexing() {
        let matrix = create_indexing_matrix();

        assert_eq!(matrix[(0, 0)], 1.0);
        assert_eq!(matrix[(1, 0)], 2.0);
        assert_eq!(matrix[(2, 0)], 3.0);
        assert_eq!(matrix[(0, 1)], 4.0);
        assert_eq!(matrix[(2, 2)], 9.0);

        assert_eq!(matrix.index_linear((0, 0)), 0);
        assert_eq!(matrix.index_linear((2, 0)), 2);
        assert_eq!(matrix.index_linear((0, 1)), 3);
        assert_eq!(matrix.index_linear((1, 2)), 7);
    }

    #[test]
    fn test_rows_and_cols() {
        let mut matrix = create_indexing_matrix();

        assert_eq!(matrix.get_row(1), vec![2.0, 5.0, 8.0]);
        assert_eq!(matrix.get_col(2), vec![7.0, 8.0, 9.0]);
        assert_eq!(matrix.diag(), vec![1.0, 5.0, 9.0]);
        assert_eq!(matrix.trace(), 15.0);

        matrix.set_col(0, &[-1.0, -2.0, -3.0]);
        assert_eq!(matrix.get_col(0), vec![-1.0, -2.0, -3.0]);
        assert_eq!(matrix.get_row(0), vec![-1.0, 4.0, 7.0]);
    }

    #[test]
    fn test_zeros_identity() {
        let z = Matrix::<f64>::zeros((2, 3));
        assert_eq!(z.size(), (2, 3));
        assert!(!z.is_square());
        assert!(z.data().iter().all(|&x| x == 0.0));

        let eye = Matrix::<Complex<f64>>::identity(3);
        assert_eq!(eye.trace(), Complex::new(3.0, 0.0));
        assert_eq!(eye[(0, 1)], Complex::new(0.0, 0.0));
    }

    #[test]
    fn test_aligned_matches_owned() {
        let a = create_indexing_matrix();
        let b = AlignedMatrix::<f64>::new_from_slice(a.size, a.data());
        assert!(b.data.is_aligned());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(a[(i, j)], b[(i, j)]);
            }
        }
    }

    #[test]
    fn test_deep_copy_and_equality() {
        let a = create_indexing_matrix();
        let mut b = a.clone();
        assert_eq!(a, b);
        b[(1, 1)] = 0.0;
        assert_ne!(a, b);
        assert_eq!(a[(1, 1)], 5.0);
    }

    #[test]
    fn test_to_complex() {
        let a = create_indexing_matrix();
        let c = a.to_complex();
        assert_eq!(c[(2, 1)], Complex::new(6.0, 0.0));
    }

    #[test]
    fn test_borrowed() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let b = BorrowedMatrix::from_slice(&data, 2, 2);
        assert_eq!(b[(0, 1)], 3.0);
        assert_eq!(b.get_row(1), vec![2.0, 4.0]);
    }
}
