//! Physical parameters and a closure based [`PhysicsModel`](crate::solver::traits::PhysicsModel).
//!
//! The kernels themselves are supplied by the caller.

mod model;
mod parameters;

pub use model::*;
pub use parameters::*;
