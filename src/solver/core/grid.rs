use super::SolverError;
use crate::algebra::*;

/// Uniform one dimensional grid along the field line.
///
/// A grid is immutable once built.  Points are spaced by
/// `dx = length / npoints`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    length: T,
    npoints: usize,
    dx: T,
    points: Vec<T>,
}

impl<T> Grid<T>
where
    T: FloatT,
{
    /// Grid with points `x_i = i dx` covering `[0, length)`.
    pub fn new(length: T, npoints: usize) -> Result<Self, SolverError> {
        Self::build(length, npoints, T::zero())
    }

    /// Grid with points `x_i = -length/2 + (i + 1/2) dx`, i.e. cell
    /// centres of a domain symmetric about zero.
    pub fn centered(length: T, npoints: usize) -> Result<Self, SolverError> {
        let half: T = (0.5).as_T();
        let dx = length / npoints.as_T();
        Self::build(length, npoints, -length * half + dx * half)
    }

    fn build(length: T, npoints: usize, origin: T) -> Result<Self, SolverError> {
        if npoints == 0 {
            return Err(SolverError::InvalidArgument(
                "grid must have at least one point".to_string(),
            ));
        }
        if !length.is_finite() || length <= T::zero() {
            return Err(SolverError::InvalidArgument(format!(
                "grid length must be positive and finite, got {length}"
            )));
        }

        let dx = length / npoints.as_T();
        let points = (0..npoints).map(|i| origin + dx * i.as_T()).collect();

        Ok(Self {
            length,
            npoints,
            dx,
            points,
        })
    }

    pub fn length(&self) -> T {
        self.length
    }

    pub fn npoints(&self) -> usize {
        self.npoints
    }

    /// point spacing
    pub fn dx(&self) -> T {
        self.dx
    }

    pub fn points(&self) -> &[T] {
        &self.points
    }
}
