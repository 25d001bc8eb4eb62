//! cuRAND generators.
//!
//! A [`Generator`] owns one `curandGenerator_t`. The location parameter
//! decides where results are written:
//!
//! - [`Device`] - created with `curandCreateGenerator`, writes into
//!   [`DeviceSlice`] buffers
//! - [`Host`] - created with `curandCreateGeneratorHost`, writes into host
//!   slices
//!
//! Each method is a single cuRAND call. Counts are taken from the output
//! buffer, so a host generator can never write past its slice.

use std::ffi::{c_uint, c_ulonglong};
use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use nvkit_core::{check, release_after_error, release_on_drop, DeviceSlice, Handle, Lifecycle, NativeResource, Stream};
use tracing::debug;

use crate::error::{RandError, RandResult};
use crate::library::Curand;
use crate::status::RandStatus;
use crate::sys::*;

mod private {
    pub trait Sealed {}
}

/// Where a generator writes its results.
pub trait Location: private::Sealed + Send + 'static {
    /// Native constructor.
    const CREATE: &'static str;
    /// Short name for logs.
    const NAME: &'static str;
}

/// Results are written to device memory.
#[derive(Debug, Clone, Copy)]
pub enum Device {}

/// Results are written to host memory.
#[derive(Debug, Clone, Copy)]
pub enum Host {}

impl private::Sealed for Device {}
impl private::Sealed for Host {}

impl Location for Device {
    const CREATE: &'static str = "curandCreateGenerator";
    const NAME: &'static str = "device";
}

impl Location for Host {
    const CREATE: &'static str = "curandCreateGeneratorHost";
    const NAME: &'static str = "host";
}

/// A buffer a generator at location `L` can fill with `T`.
pub trait Output<L: Location, T> {
    /// Destination pointer handed to cuRAND.
    fn out_ptr(&mut self) -> *mut T;
    /// Number of values to generate.
    fn out_len(&self) -> usize;
}

impl<T> Output<Device, T> for DeviceSlice<T> {
    fn out_ptr(&mut self) -> *mut T {
        self.as_raw()
    }

    fn out_len(&self) -> usize {
        self.len()
    }
}

impl<T> Output<Host, T> for [T] {
    fn out_ptr(&mut self) -> *mut T {
        self.as_mut_ptr()
    }

    fn out_len(&self) -> usize {
        self.len()
    }
}

impl<T> Output<Host, T> for Vec<T> {
    fn out_ptr(&mut self) -> *mut T {
        self.as_mut_ptr()
    }

    fn out_len(&self) -> usize {
        self.len()
    }
}

/// Device-side generator.
pub type DeviceGenerator = Generator<Device>;
/// Host-side generator.
pub type HostGenerator = Generator<Host>;

/// An owned cuRAND generator.
pub struct Generator<L: Location> {
    curand: Curand,
    handle: Handle<RawGenerator>,
    kind: RngKind,
    _location: PhantomData<L>,
}

const KIND: &str = "curand generator";

impl<L: Location> Generator<L> {
    /// Creates a generator of `kind`.
    pub fn new(curand: &Curand, kind: RngKind) -> RandResult<Self> {
        let create: FnCreateGenerator = unsafe { curand.symbol(L::CREATE)? };
        let mut raw = RawGenerator(ptr::null_mut());
        check::<RandStatus>(L::CREATE, unsafe { create(&mut raw, kind.raw()) })?;
        debug!(?kind, location = L::NAME, "curand generator created");
        Ok(Self { curand: curand.clone(), handle: Handle::new(KIND, raw), kind, _location: PhantomData })
    }

    /// Creates a pseudorandom generator and seeds it.
    pub fn seeded(curand: &Curand, kind: RngKind, seed: u64) -> RandResult<Self> {
        let mut generator = Self::new(curand, kind)?;
        if let Err(err) = generator.set_seed(seed) {
            release_after_error(&mut generator);
            return Err(err);
        }
        Ok(generator)
    }

    fn call_u64(&mut self, name: &str, value: u64) -> RandResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetU64 = unsafe { self.curand.symbol(name)? };
        check::<RandStatus>(name, unsafe { f(raw, value as c_ulonglong) })?;
        Ok(())
    }

    /// `curandSetPseudoRandomGeneratorSeed`.
    pub fn set_seed(&mut self, seed: u64) -> RandResult<()> {
        self.call_u64("curandSetPseudoRandomGeneratorSeed", seed)
    }

    /// `curandSetGeneratorOffset`.
    pub fn set_offset(&mut self, offset: u64) -> RandResult<()> {
        self.call_u64("curandSetGeneratorOffset", offset)
    }

    /// `curandSetGeneratorOrdering`.
    pub fn set_ordering(&mut self, ordering: Ordering) -> RandResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetI32 = unsafe { self.curand.symbol("curandSetGeneratorOrdering")? };
        check::<RandStatus>("curandSetGeneratorOrdering", unsafe { f(raw, ordering.raw()) })?;
        Ok(())
    }

    /// `curandSetQuasiRandomGeneratorDimensions`.
    pub fn set_quasi_dimensions(&mut self, dimensions: u32) -> RandResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetU32 = unsafe { self.curand.symbol("curandSetQuasiRandomGeneratorDimensions")? };
        check::<RandStatus>("curandSetQuasiRandomGeneratorDimensions", unsafe {
            f(raw, dimensions as c_uint)
        })?;
        Ok(())
    }

    /// `curandSetStream`.
    pub fn set_stream(&mut self, stream: Stream) -> RandResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetStream = unsafe { self.curand.symbol("curandSetStream")? };
        check::<RandStatus>("curandSetStream", unsafe { f(raw, stream) })?;
        Ok(())
    }

    /// `curandGenerateSeeds`: sets up the generator's starting state.
    pub fn generate_seeds(&mut self) -> RandResult<()> {
        let raw = self.handle.get()?;
        let f: FnGenerateSeeds = unsafe { self.curand.symbol("curandGenerateSeeds")? };
        check::<RandStatus>("curandGenerateSeeds", unsafe { f(raw) })?;
        Ok(())
    }

    fn fill<T, O: Output<L, T> + ?Sized>(&mut self, name: &str, out: &mut O) -> RandResult<()> {
        let raw = self.handle.get()?;
        let f: FnGenerate<T> = unsafe { self.curand.symbol(name)? };
        let n = out.out_len();
        check::<RandStatus>(name, unsafe { f(raw, out.out_ptr(), n) })?;
        Ok(())
    }

    fn fill_with<T, P, O: Output<L, T> + ?Sized>(&mut self, name: &str, out: &mut O, a: P, b: P) -> RandResult<()> {
        let raw = self.handle.get()?;
        let f: FnGenerateParams<T, P> = unsafe { self.curand.symbol(name)? };
        let n = out.out_len();
        check::<RandStatus>(name, unsafe { f(raw, out.out_ptr(), n, a, b) })?;
        Ok(())
    }

    /// 32-bit values (`curandGenerate`).
    pub fn generate_u32<O: Output<L, u32> + ?Sized>(&mut self, out: &mut O) -> RandResult<()> {
        self.fill("curandGenerate", out)
    }

    /// 64-bit values from 64-bit quasirandom generators (`curandGenerateLongLong`).
    pub fn generate_u64<O: Output<L, u64> + ?Sized>(&mut self, out: &mut O) -> RandResult<()> {
        self.fill("curandGenerateLongLong", out)
    }

    /// Uniform floats in `(0, 1]`.
    pub fn uniform_f32<O: Output<L, f32> + ?Sized>(&mut self, out: &mut O) -> RandResult<()> {
        self.fill("curandGenerateUniform", out)
    }

    /// Uniform doubles in `(0, 1]`.
    pub fn uniform_f64<O: Output<L, f64> + ?Sized>(&mut self, out: &mut O) -> RandResult<()> {
        self.fill("curandGenerateUniformDouble", out)
    }

    /// Normally distributed floats.
    pub fn normal_f32<O: Output<L, f32> + ?Sized>(&mut self, out: &mut O, mean: f32, stddev: f32) -> RandResult<()> {
        self.fill_with("curandGenerateNormal", out, mean, stddev)
    }

    /// Normally distributed doubles.
    pub fn normal_f64<O: Output<L, f64> + ?Sized>(&mut self, out: &mut O, mean: f64, stddev: f64) -> RandResult<()> {
        self.fill_with("curandGenerateNormalDouble", out, mean, stddev)
    }

    /// Log-normally distributed floats.
    pub fn log_normal_f32<O: Output<L, f32> + ?Sized>(
        &mut self,
        out: &mut O,
        mean: f32,
        stddev: f32,
    ) -> RandResult<()> {
        self.fill_with("curandGenerateLogNormal", out, mean, stddev)
    }

    /// Log-normally distributed doubles.
    pub fn log_normal_f64<O: Output<L, f64> + ?Sized>(
        &mut self,
        out: &mut O,
        mean: f64,
        stddev: f64,
    ) -> RandResult<()> {
        self.fill_with("curandGenerateLogNormalDouble", out, mean, stddev)
    }

    /// Poisson distributed integers with mean `lambda` (`curandGeneratePoisson`).
    pub fn poisson<O: Output<L, u32> + ?Sized>(&mut self, out: &mut O, lambda: f64) -> RandResult<()> {
        let raw = self.handle.get()?;
        let f: FnGeneratePoisson = unsafe { self.curand.symbol("curandGeneratePoisson")? };
        let n = out.out_len();
        check::<RandStatus>("curandGeneratePoisson", unsafe { f(raw, out.out_ptr(), n, lambda) })?;
        Ok(())
    }

    /// Generator algorithm.
    pub fn kind(&self) -> RngKind {
        self.kind
    }

    /// Raw `curandGenerator_t`.
    pub fn raw(&self) -> RandResult<RawGenerator> {
        Ok(self.handle.get()?)
    }

    /// Lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    /// Destroys the generator. Further calls are no-ops.
    pub fn release(&mut self) -> RandResult<()> {
        if !self.handle.is_live() {
            return Ok(());
        }
        let f: FnDestroyGenerator = unsafe { self.curand.symbol("curandDestroyGenerator")? };
        let Some(raw) = self.handle.take() else {
            return Ok(());
        };
        check::<RandStatus>("curandDestroyGenerator", unsafe { f(raw) })?;
        Ok(())
    }
}

impl<L: Location> fmt::Debug for Generator<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("location", &L::NAME)
            .field("kind", &self.kind)
            .field("handle", &self.handle)
            .finish()
    }
}

impl<L: Location> NativeResource for Generator<L> {
    type Error = RandError;

    fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    fn release(&mut self) -> RandResult<()> {
        Generator::release(self)
    }
}

impl<L: Location> Drop for Generator<L> {
    fn drop(&mut self) {
        release_on_drop(self);
    }
}
