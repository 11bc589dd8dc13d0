//! Eigenvalue solver main module.
//!
//! The building blocks of the search (grid, parallel quadrature assembly,
//! convergence indicators, the secant loop and null space extraction) live
//! in [`core`] and can be used on their own.  The
//! [default implementation](crate::solver::implementations::default)
//! combines them into a [`DefaultSolver`] with settings, progress printing
//! and timing.

// internal module structure
pub mod core;
pub mod implementations;

//user facing pieces of the core, partially flattened
pub use crate::solver::core::assembly::{
    assemble, assemble_into, assemble_serial, QuadratureAssembler,
};
pub use crate::solver::core::grid::Grid;
pub use crate::solver::core::indicator::{Indicator, IndicatorMethod, SupportedIndicator};
pub use crate::solver::core::nullspace::{null_space, null_space_with_tol, smallest_singular_vector};
pub use crate::solver::core::secant::{
    perturbed_guess, secant_search, SecantIterate, SecantOptions, SecantOutcome,
};
pub use crate::solver::core::{SettingsError, SolverError, SolverStatus};

//user facing traits required to define new physics models
pub use crate::solver::core::traits;
pub use crate::solver::core::traits::{FieldLayout, KernelBlock, PhysicsModel};

//Since we only have the default implementation, it is
//exposed at the top level as well
pub use crate::solver::implementations::default;
pub use crate::solver::implementations::default::*;
