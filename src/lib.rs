//! __emme__ computes complex eigenvalues of the nonlinear dispersion
//! relation of a linearized plasma micro-instability.
//!
//! For a trial eigenvalue $\lambda$ a dense complex matrix $M(\lambda)$ is
//! assembled from an integral kernel evaluated between every pair of grid
//! points along the field line.  The physical eigenvalue is the value of
//! $\lambda$ at which $M(\lambda)$ is singular.  It is located by a complex
//! secant iteration on a scalar indicator of $M$, by default the
//! diagonally scaled determinant $\det(D^{-1} M(\lambda))$, and the associated
//! eigenmode is recovered from the null space of the final matrix.
//!
//! ## Features
//!
//! * __Parallel assembly__: every pair of grid points is evaluated as one
//!   task on a fixed size [`TaskPool`](threads::TaskPool).  Symmetric and
//!   antisymmetric block structure is exploited so that each kernel block is
//!   evaluated once per pair.
//!
//! * __Electrostatic and electromagnetic__ operators, with one or two coupled
//!   fields.
//!
//! * __Pluggable physics__: any type implementing
//!   [`PhysicsModel`](solver::PhysicsModel) can be solved.  The
//!   [`ClosureModel`](physics::ClosureModel) wraps a parameter record and
//!   user supplied kernel closures.
//!
//! * __Parameter sweeps__ that reuse each converged eigenvalue as the
//!   starting guess of the next solve.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod physics;
pub mod solver;
pub mod threads;
pub mod timers;
