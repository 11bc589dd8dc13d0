#![allow(non_snake_case)]
use num_traits::{Float, FloatConst, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Core traits for internal floating point values.
///
/// This trait defines the bounds for `FloatT`, which is used
/// throughout for real scalars in the assembly and the secant
/// driver.  Values must be shareable across the worker threads
/// of a [`TaskPool`](crate::threads::TaskPool).
pub trait CoreFloatT:
    'static
    + Send
    + Sync
    + Float
    + FloatConst
    + NumAssign
    + Default
    + FromPrimitive
    + Display
    + LowerExp
    + Debug
    + Sized
{
}

impl<T> CoreFloatT for T where
    T: 'static
        + Send
        + Sync
        + Float
        + FloatConst
        + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
        + Sized
{
}

cfg_if::cfg_if! {
    if #[cfg(feature="serde")] {
    /// Main trait for floating point types used in the solver.
    ///
    /// All real valued calculations are represented internally on values
    /// implementing the `FloatT` trait, with implementations provided for
    /// the f32 and f64 native types.  Complex values are carried as
    /// [`Complex<T>`](num_complex::Complex) over a `FloatT`.
    ///
    /// `FloatT` relies on [`num_traits`](num_traits) for most of its constituent trait bounds.
        pub trait FloatT: CoreFloatT + serde::Serialize + serde::de::DeserializeOwned {}
    } else{
        pub trait FloatT: CoreFloatT {}
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature="serde")] {
        impl<T> FloatT for T where T: CoreFloatT + serde::Serialize + serde::de::DeserializeOwned {}
    } else{
        impl<T> FloatT for T where T: CoreFloatT {}
    }
}

/// Element type of a dense [`Matrix`](crate::algebra::Matrix).
///
/// Implemented for both the real `FloatT` types and their
/// complex counterparts.
pub trait ScalarT: 'static + Copy + Send + Sync + NumAssign + Debug + PartialEq {}

impl<T> ScalarT for T where T: 'static + Copy + Send + Sync + NumAssign + Debug + PartialEq {}

/// Trait for convering Rust primitives to [`FloatT`](crate::algebra::FloatT)
///
/// This convenience trait implemented on f32/64 and u32/64.  It is used
/// by the [user settings](crate::solver::DefaultSettings) for converting
/// defaults of primitive type to [`FloatT`](crate::algebra::FloatT).

// NB: `AsFloatT` is a convenience trait for f32/64 and u32/64
// so that we can do things like (2.0).as_T() everywhere on
// constants, rather than the awful T::from_f32(2.0).unwrap()
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_FloatT {
    ($ty:ty, $ident:ident) => {
        impl<T> AsFloatT<T> for $ty
        where
            T: std::ops::Mul<T, Output = T> + FromPrimitive + 'static,
        {
            #[inline]
            fn as_T(&self) -> T {
                T::$ident(*self).unwrap()
            }
        }
    };
}
impl_as_FloatT!(u32, from_u32);
impl_as_FloatT!(u64, from_u64);
impl_as_FloatT!(usize, from_usize);
impl_as_FloatT!(f32, from_f32);
impl_as_FloatT!(f64, from_f64);

/// True when both parts of `z` are finite.
///
/// `Complex::is_finite` needs `FloatCore`, which `FloatT` does not carry.
#[inline]
pub fn is_finite_complex<T: FloatT>(z: num_complex::Complex<T>) -> bool {
    z.re.is_finite() && z.im.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    fn all_finite<T: FloatT>(zs: &[Complex<T>]) -> bool {
        zs.iter().all(|&z| is_finite_complex(z))
    }

    #[test]
    fn test_is_finite_complex() {
        assert!(all_finite(&[Complex::new(1.0f64, -2.0), Complex::new(0.0, 0.0)]));
        assert!(!all_finite(&[Complex::new(1.0f64, f64::NAN)]));
        assert!(!all_finite(&[Complex::new(f32::INFINITY, 0.0f32)]));
    }
}
