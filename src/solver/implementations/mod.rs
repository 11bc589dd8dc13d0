//! Solver implementations.
//!
//! Only a [default](crate::solver::implementations::default) implementation
//! exists.  It drives the secant search over a dense dispersion matrix
//! assembled on a [`TaskPool`](crate::threads::TaskPool).

pub mod default;
