mod core;
pub use self::core::*;
mod storage;
pub use self::storage::*;
mod matrix_math;
pub use self::matrix_math::*;

// dense factorizations, backed by nalgebra
mod lu;
pub use self::lu::*;
mod svd;
pub use self::svd::*;
