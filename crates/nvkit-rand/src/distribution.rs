//! Discrete distributions for device-side sampling.

use nvkit_core::{check, release_on_drop, Handle, Lifecycle, NativeResource};
use std::ptr;
use tracing::debug;

use crate::error::{RandError, RandResult};
use crate::generator::{Generator, Location, Output};
use crate::library::Curand;
use crate::status::RandStatus;
use crate::sys::{FnCreatePoisson, FnDestroyDistribution, RawDistribution};

/// A Poisson distribution histogram built by cuRAND.
///
/// The raw distribution is what device kernels pass to `curand_discrete`.
/// [`generate`](Self::generate) fills a buffer through the generator with the
/// same lambda.
#[derive(Debug)]
pub struct PoissonDistribution {
    curand: Curand,
    handle: Handle<RawDistribution>,
    lambda: f64,
}

impl PoissonDistribution {
    /// `curandCreatePoissonDistribution`.
    pub fn new(curand: &Curand, lambda: f64) -> RandResult<Self> {
        let f: FnCreatePoisson = unsafe { curand.symbol("curandCreatePoissonDistribution")? };
        let mut raw = RawDistribution(ptr::null_mut());
        check::<RandStatus>("curandCreatePoissonDistribution", unsafe { f(lambda, &mut raw) })?;
        debug!(lambda, "poisson distribution created");
        Ok(Self { curand: curand.clone(), handle: Handle::new("curand poisson distribution", raw), lambda })
    }

    /// Fills `out` with Poisson samples of this distribution's lambda.
    pub fn generate<L, O>(&self, generator: &mut Generator<L>, out: &mut O) -> RandResult<()>
    where
        L: Location,
        O: Output<L, u32> + ?Sized,
    {
        self.handle.get()?;
        generator.poisson(out, self.lambda)
    }

    /// Mean of the distribution.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Raw `curandDiscreteDistribution_t`.
    pub fn raw(&self) -> RandResult<RawDistribution> {
        Ok(self.handle.get()?)
    }

    /// Lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    /// `curandDestroyDistribution`. Further calls are no-ops.
    pub fn release(&mut self) -> RandResult<()> {
        if !self.handle.is_live() {
            return Ok(());
        }
        let f: FnDestroyDistribution = unsafe { self.curand.symbol("curandDestroyDistribution")? };
        let Some(raw) = self.handle.take() else {
            return Ok(());
        };
        check::<RandStatus>("curandDestroyDistribution", unsafe { f(raw) })?;
        Ok(())
    }
}

impl NativeResource for PoissonDistribution {
    type Error = RandError;

    fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    fn release(&mut self) -> RandResult<()> {
        PoissonDistribution::release(self)
    }
}

impl Drop for PoissonDistribution {
    fn drop(&mut self) {
        release_on_drop(self);
    }
}
