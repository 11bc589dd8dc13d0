#![allow(non_snake_case)]

mod info;
mod info_print;
mod settings;
mod solution;
mod solver;

#[cfg(feature = "serde")]
mod json;

//export flattened
pub use info::*;
pub(crate) use info_print::*;
pub use settings::*;
pub use solution::*;
pub use solver::*;

#[cfg(feature = "serde")]
pub use json::*;
