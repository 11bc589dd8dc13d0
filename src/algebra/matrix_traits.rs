/// Dimension queries shared by all dense matrix types.
pub trait ShapedMatrix {
    fn size(&self) -> (usize, usize);
    fn nrows(&self) -> usize {
        self.size().0
    }
    fn ncols(&self) -> usize {
        self.size().1
    }
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}

/// Matrix-vector products.
pub trait MultiplyGEMV {
    type T;
    /// implements y = αA*x + βy
    fn gemv(&self, x: &[Self::T], y: &mut [Self::T], α: Self::T, β: Self::T);
}
