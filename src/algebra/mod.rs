//! Dense linear algebra used by the assembly, the convergence indicators
//! and the null space extraction.
//!
//! Matrices are stored in column major format and are generic over their
//! element type (real [`FloatT`] values or [`Complex`] values over a `FloatT`)
//! and over their backing storage.

mod error_types;
mod floats;
mod matrix_traits;
pub use error_types::*;
pub use floats::*;
pub use matrix_traits::*;

mod dense;
pub use dense::*;

pub use num_complex::Complex;
