// package together the building blocks of the eigenvalue search:
// : grid and physics model traits
// : parallel quadrature assembly
// : convergence indicators and the secant loop
// : null space extraction
// : error and status types

pub mod assembly;
pub(crate) mod callbacks;
pub mod grid;
pub mod indicator;
pub mod nullspace;
pub mod secant;
pub mod traits;

//partially flatten top level pieces

mod errors;
mod status;
pub use errors::*;
pub use status::*;
