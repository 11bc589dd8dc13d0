//! Capability traits for physics models driven by the solver.
//!
//! The solver knows nothing about the plasma physics behind a dispersion
//! relation.  It only asks a [`PhysicsModel`] for kernel values between
//! pairs of grid points, for the magnetic diagonal term `bi`, and for the
//! handful of scalar parameters that enter the matrix diagonal.

use crate::algebra::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of coupled fields in the assembled operator.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldLayout {
    /// single field (electrostatic potential), `n × n`
    #[default]
    Electrostatic,
    /// electrostatic potential plus parallel vector potential, `2n × 2n`
    Electromagnetic,
}

impl FieldLayout {
    pub fn nfields(&self) -> usize {
        match self {
            FieldLayout::Electrostatic => 1,
            FieldLayout::Electromagnetic => 2,
        }
    }

    /// dimension of the assembled matrix for a grid of `npoints`
    pub fn dim(&self, npoints: usize) -> usize {
        self.nfields() * npoints
    }
}

/// Identifies which block of the operator a kernel value belongs to.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum KernelBlock {
    /// potential / potential block
    Phi,
    /// potential / vector potential cross block
    Coupling,
    /// vector potential / vector potential block
    Apar,
}

/// A physics model providing the integral kernel of the dispersion relation.
///
/// Kernels are evaluated concurrently from the worker threads of a
/// [`TaskPool`](crate::threads::TaskPool), so implementations must be
/// `Send + Sync` and `kernel` and `bi` must not mutate shared state.
pub trait PhysicsModel<T: FloatT>: Send + Sync {
    /// field layout of the operator this model produces
    fn field_layout(&self) -> FieldLayout;

    /// temperature ratio entering the `1 + 1/tau` diagonal
    fn tau(&self) -> T;

    /// electron beta entering the magnetic diagonal
    fn beta_e(&self) -> T;

    /// kernel value of `block` between points `x` and `xp` at eigenvalue `lambda`
    fn kernel(&self, block: KernelBlock, x: T, xp: T, lambda: Complex<T>) -> Complex<T>;

    /// magnetic diagonal term at `x`.  Only used by
    /// [`FieldLayout::Electromagnetic`] models.
    fn bi(&self, x: T) -> T;

    /// Recompute any cached state after the model parameters changed.
    fn reinitialize(&mut self) {}
}
