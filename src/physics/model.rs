use super::ModelParameters;
use crate::algebra::*;
use crate::solver::core::traits::{FieldLayout, KernelBlock, PhysicsModel};

/// A [`PhysicsModel`] built from a parameter record and two closures.
///
/// `kernel` is called as `kernel(&params, block, x, xp, lambda)` and `bi`
/// as `bi(&params, x)`, so that a closure always sees the current
/// parameters after they have been modified during a sweep.
pub struct ClosureModel<T, K, B>
where
    T: FloatT,
{
    params: ModelParameters<T>,
    kernel: K,
    bi: B,
}

impl<T, K, B> ClosureModel<T, K, B>
where
    T: FloatT,
    K: Fn(&ModelParameters<T>, KernelBlock, T, T, Complex<T>) -> Complex<T> + Send + Sync,
    B: Fn(&ModelParameters<T>, T) -> T + Send + Sync,
{
    pub fn new(params: ModelParameters<T>, kernel: K, bi: B) -> Self {
        Self { params, kernel, bi }
    }

    pub fn parameters(&self) -> &ModelParameters<T> {
        &self.params
    }

    pub fn parameters_mut(&mut self) -> &mut ModelParameters<T> {
        &mut self.params
    }
}

impl<T, K, B> PhysicsModel<T> for ClosureModel<T, K, B>
where
    T: FloatT,
    K: Fn(&ModelParameters<T>, KernelBlock, T, T, Complex<T>) -> Complex<T> + Send + Sync,
    B: Fn(&ModelParameters<T>, T) -> T + Send + Sync,
{
    fn field_layout(&self) -> FieldLayout {
        self.params.field_layout
    }

    fn tau(&self) -> T {
        self.params.tau
    }

    fn beta_e(&self) -> T {
        self.params.beta_e
    }

    fn kernel(&self, block: KernelBlock, x: T, xp: T, lambda: Complex<T>) -> Complex<T> {
        (self.kernel)(&self.params, block, x, xp, lambda)
    }

    fn bi(&self, x: T) -> T {
        (self.bi)(&self.params, x)
    }
}
