#![allow(non_snake_case)]

//! Quadrature assembly of the dispersion matrix.
//!
//! For a grid of `n` points the electrostatic operator is `n × n` and the
//! electromagnetic operator is `2n × 2n` with blocks
//!
//! ```text
//!   [ Φ   C ]
//!   [ Cᵀ  A ]
//! ```
//!
//! The `Φ` and `A` blocks are symmetric and the cross blocks are
//! antisymmetric off the diagonal.  Each unordered pair `i < j` of grid
//! points therefore needs one evaluation of each kernel block, after which
//! its values are mirrored into every cell derived from that pair.  Pairs
//! are dispatched to a [`TaskPool`] as independent tasks.  Since no two
//! pairs share a cell the result does not depend on scheduling.

use super::grid::Grid;
use super::traits::{FieldLayout, KernelBlock, PhysicsModel};
use super::SolverError;
use crate::algebra::*;
use crate::threads::{TaskHandle, TaskPool};
use itertools::Itertools;
use std::sync::Arc;

// scaled kernel values for one pair (i,j) with i < j
#[derive(Debug, Clone, Copy)]
struct PairValues<T> {
    phi: Complex<T>,
    coupling: Complex<T>,
    apar: Complex<T>,
}

fn pair_values<T, M>(
    model: &M,
    layout: FieldLayout,
    xi: T,
    xj: T,
    cij: T,
    dx: T,
    lambda: Complex<T>,
) -> PairValues<T>
where
    T: FloatT,
    M: PhysicsModel<T> + ?Sized,
{
    let phi = -model.kernel(KernelBlock::Phi, xi, xj, lambda) * (cij * dx);
    match layout {
        FieldLayout::Electrostatic => PairValues {
            phi,
            coupling: Complex::new(T::zero(), T::zero()),
            apar: Complex::new(T::zero(), T::zero()),
        },
        FieldLayout::Electromagnetic => PairValues {
            phi,
            coupling: model.kernel(KernelBlock::Coupling, xi, xj, lambda) * dx,
            apar: model.kernel(KernelBlock::Apar, xi, xj, lambda) * dx,
        },
    }
}

fn scatter<S, T>(
    M: &mut DenseStorageMatrix<S, Complex<T>>,
    layout: FieldLayout,
    n: usize,
    (i, j): (usize, usize),
    v: &PairValues<T>,
) where
    S: AsRef<[Complex<T>]> + AsMut<[Complex<T>]>,
    T: FloatT,
{
    M[(i, j)] = v.phi;
    M[(j, i)] = v.phi;

    if layout == FieldLayout::Electromagnetic {
        M[(i, j + n)] = v.coupling;
        M[(j + n, i)] = v.coupling;
        M[(j, i + n)] = -v.coupling;
        M[(i + n, j)] = -v.coupling;

        M[(i + n, j + n)] = v.apar;
        M[(j + n, i + n)] = v.apar;
    }
}

fn fill_diagonal<S, T, M>(
    A: &mut DenseStorageMatrix<S, Complex<T>>,
    model: &M,
    grid: &Grid<T>,
    layout: FieldLayout,
) where
    S: AsRef<[Complex<T>]> + AsMut<[Complex<T>]>,
    T: FloatT,
    M: PhysicsModel<T> + ?Sized,
{
    let n = grid.npoints();
    let zero = Complex::new(T::zero(), T::zero());
    let dphi = Complex::new(T::one() + T::recip(model.tau()), T::zero());

    for i in 0..n {
        A[(i, i)] = dphi;
    }

    if layout == FieldLayout::Electromagnetic {
        let scale = model.tau() * (2.0).as_T() / model.beta_e();
        for (i, &x) in grid.points().iter().enumerate() {
            A[(i, i + n)] = zero;
            A[(i + n, i)] = zero;
            A[(i + n, i + n)] = Complex::new(scale * model.bi(x), T::zero());
        }
    }
}

fn check_size(expected: (usize, usize), found: (usize, usize)) -> Result<(), SolverError> {
    if expected != found {
        return Err(SolverError::DimensionMismatch { expected, found });
    }
    Ok(())
}

fn check_inputs<S, T>(
    layout: FieldLayout,
    coeff: &Matrix<T>,
    grid: &Grid<T>,
    target: &DenseStorageMatrix<S, Complex<T>>,
) -> Result<(), SolverError>
where
    S: AsRef<[Complex<T>]>,
    T: FloatT,
{
    let n = grid.npoints();
    let dim = layout.dim(n);
    check_size((n, n), coeff.size())?;
    check_size((dim, dim), target.size())
}

/// Assemble the dispersion matrix at `lambda`, evaluating the kernel of
/// every grid point pair as a separate task on `pool`.
pub fn assemble<T, M>(
    pool: &TaskPool,
    lambda: Complex<T>,
    model: &Arc<M>,
    coeff: &Matrix<T>,
    grid: &Grid<T>,
) -> Result<Matrix<Complex<T>>, SolverError>
where
    T: FloatT,
    M: PhysicsModel<T> + ?Sized + 'static,
{
    let dim = model.field_layout().dim(grid.npoints());
    let mut A = Matrix::zeros((dim, dim));
    assemble_into(pool, lambda, model, coeff, grid, &mut A)?;
    Ok(A)
}

/// As [`assemble`], but writing into a caller provided matrix of any storage.
///
/// Every queued task is joined before this returns, including when one
/// of them fails.  The first failure is reported.
pub fn assemble_into<S, T, M>(
    pool: &TaskPool,
    lambda: Complex<T>,
    model: &Arc<M>,
    coeff: &Matrix<T>,
    grid: &Grid<T>,
    target: &mut DenseStorageMatrix<S, Complex<T>>,
) -> Result<(), SolverError>
where
    S: AsRef<[Complex<T>]> + AsMut<[Complex<T>]>,
    T: FloatT,
    M: PhysicsModel<T> + ?Sized + 'static,
{
    let layout = model.field_layout();
    check_inputs(layout, coeff, grid, target)?;

    fill_diagonal(target, &**model, grid, layout);

    let n = grid.npoints();
    let x = grid.points();
    let dx = grid.dx();

    let handles: Vec<((usize, usize), TaskHandle<PairValues<T>>)> = (0..n)
        .tuple_combinations()
        .map(|(i, j)| {
            let model = Arc::clone(model);
            let (xi, xj, cij) = (x[i], x[j], coeff[(i, j)]);
            let handle =
                pool.queue_task(move || pair_values(&*model, layout, xi, xj, cij, dx, lambda));
            ((i, j), handle)
        })
        .collect();

    let mut failure = None;
    for (ij, handle) in handles {
        match handle.join() {
            Ok(values) => scatter(target, layout, n, ij, &values),
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Single threaded reference assembly.  Produces exactly the
/// matrix returned by [`assemble`].
pub fn assemble_serial<T, M>(
    lambda: Complex<T>,
    model: &M,
    coeff: &Matrix<T>,
    grid: &Grid<T>,
) -> Result<Matrix<Complex<T>>, SolverError>
where
    T: FloatT,
    M: PhysicsModel<T> + ?Sized,
{
    let layout = model.field_layout();
    let dim = layout.dim(grid.npoints());
    let mut A = Matrix::zeros((dim, dim));
    check_inputs(layout, coeff, grid, &A)?;

    fill_diagonal(&mut A, model, grid, layout);

    let n = grid.npoints();
    let x = grid.points();
    for (i, j) in (0..n).tuple_combinations() {
        let values = pair_values(model, layout, x[i], x[j], coeff[(i, j)], grid.dx(), lambda);
        scatter(&mut A, layout, n, (i, j), &values);
    }
    Ok(A)
}

/// Owns everything needed to assemble the dispersion matrix repeatedly
/// at different eigenvalue guesses.
pub struct QuadratureAssembler<T, M>
where
    T: FloatT,
    M: PhysicsModel<T> + ?Sized,
{
    pool: Arc<TaskPool>,
    model: Arc<M>,
    coeff: Matrix<T>,
    grid: Grid<T>,
}

impl<T, M> QuadratureAssembler<T, M>
where
    T: FloatT,
    M: PhysicsModel<T> + 'static,
{
    /// Fails with [`SolverError::DimensionMismatch`] unless `coeff`
    /// is `npoints × npoints`.
    pub fn new(
        pool: Arc<TaskPool>,
        model: M,
        coeff: Matrix<T>,
        grid: Grid<T>,
    ) -> Result<Self, SolverError> {
        let n = grid.npoints();
        check_size((n, n), coeff.size())?;
        Ok(Self {
            pool,
            model: Arc::new(model),
            coeff,
            grid,
        })
    }
}

impl<T, M> QuadratureAssembler<T, M>
where
    T: FloatT,
    M: PhysicsModel<T> + ?Sized + 'static,
{
    /// assemble the dispersion matrix at `lambda`
    pub fn assemble(&self, lambda: Complex<T>) -> Result<Matrix<Complex<T>>, SolverError> {
        assemble(&self.pool, lambda, &self.model, &self.coeff, &self.grid)
    }

    /// assemble the dispersion matrix at `lambda` into `target`
    pub fn assemble_into<S>(
        &self,
        lambda: Complex<T>,
        target: &mut DenseStorageMatrix<S, Complex<T>>,
    ) -> Result<(), SolverError>
    where
        S: AsRef<[Complex<T>]> + AsMut<[Complex<T>]>,
    {
        assemble_into(&self.pool, lambda, &self.model, &self.coeff, &self.grid, target)
    }

    /// single threaded assembly of the same matrix
    pub fn assemble_serial(&self, lambda: Complex<T>) -> Result<Matrix<Complex<T>>, SolverError> {
        assemble_serial(lambda, &*self.model, &self.coeff, &self.grid)
    }

    /// dimension of the assembled (square) matrix
    pub fn dim(&self) -> usize {
        self.layout().dim(self.grid.npoints())
    }

    pub fn layout(&self) -> FieldLayout {
        self.model.field_layout()
    }

    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn coeff(&self) -> &Matrix<T> {
        &self.coeff
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model.  Only available while no
    /// assembly tasks are outstanding, which is always the case
    /// between calls to [`assemble`](Self::assemble).
    pub fn model_mut(&mut self) -> Option<&mut M> {
        Arc::get_mut(&mut self.model)
    }

    pub fn pool(&self) -> &Arc<TaskPool> {
        &self.pool
    }
}
