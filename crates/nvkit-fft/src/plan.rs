//! cuFFT plans.
//!
//! [`FftPlan`] owns one `cufftHandle`. The shape parameter picks the native
//! entry points (see [`crate::shape`]); everything else is shared.
//!
//! # Creation
//!
//! - [`FftPlan::create`] - legacy API, one `cufftPlan*` call.
//! - [`FftPlan::make`] - extensible API: `cufftCreate`, then optional
//!   `cufftSetAutoAllocation`, `cufftMakePlan*`, optional `cufftSetStream`.
//!   If any step after `cufftCreate` fails the handle is destroyed before the
//!   error is returned.
//!
//! # Execution
//!
//! [`FftPlan::exec`] dispatches on the plan's [`TransformType`] to one of the
//! six `cufftExec*` functions. The direction only reaches C2C and Z2Z.
//! [`FftPlan::exec_real`] is the direction-less form and refuses C2C/Z2Z
//! plans without calling cuFFT.
//!
//! # Example
//!
//! ```ignore
//! use nvkit_fft::{Cufft, Direction, FftPlan, Shape1d, TransformType};
//!
//! let cufft = Cufft::load()?;
//! let mut plan = FftPlan::create(&cufft, Shape1d::new(1024, 16), TransformType::C2C)?;
//! plan.exec_inplace(signal, Direction::Forward)?;
//! plan.release()?;
//! ```

use std::ffi::c_int;

use nvkit_core::{check, release_after_error, release_on_drop, DevicePtr, Handle, Lifecycle, NativeResource, Stream};
use tracing::debug;

use crate::error::{FftError, FftResult};
use crate::library::Cufft;
use crate::shape::{PlanShape, Shape1d, Shape2d, Shape3d, ShapeMany};
use crate::status::FftStatus;
use crate::sys::*;

/// 1D plan.
pub type FftPlan1d = FftPlan<Shape1d>;
/// 2D plan.
pub type FftPlan2d = FftPlan<Shape2d>;
/// 3D plan.
pub type FftPlan3d = FftPlan<Shape3d>;
/// Batched plan with advanced layout.
pub type FftPlanMany = FftPlan<ShapeMany>;

/// Settings for [`FftPlan::make`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Stream to associate after plan generation.
    pub stream: Option<Stream>,
    /// `Some(false)` makes the caller responsible for the work area
    /// (see [`FftPlan::set_work_area`]).
    pub auto_allocation: Option<bool>,
}

impl PlanOptions {
    /// Sets the stream.
    pub fn stream(mut self, stream: Stream) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Sets work area auto-allocation.
    pub fn auto_allocation(mut self, auto: bool) -> Self {
        self.auto_allocation = Some(auto);
        self
    }
}

/// An owned cuFFT plan.
#[derive(Debug)]
pub struct FftPlan<S: PlanShape> {
    cufft: Cufft,
    handle: Handle<CufftHandle>,
    shape: S,
    ty: TransformType,
    work_size: Option<usize>,
}

const KIND: &str = "cufft plan";

impl<S: PlanShape> FftPlan<S> {
    /// Creates a plan with the legacy API.
    pub fn create(cufft: &Cufft, shape: S, ty: TransformType) -> FftResult<Self> {
        shape.validate()?;
        let mut raw: CufftHandle = 0;
        shape.plan(cufft, &mut raw, ty)?;
        debug!(?shape, ?ty, handle = raw, "cufft plan created");
        Ok(Self { cufft: cufft.clone(), handle: Handle::new(KIND, raw), shape, ty, work_size: None })
    }

    /// Creates a legacy plan and associates `stream` with it.
    pub fn create_on_stream(cufft: &Cufft, shape: S, ty: TransformType, stream: Stream) -> FftResult<Self> {
        let mut plan = Self::create(cufft, shape, ty)?;
        if let Err(err) = plan.set_stream(stream) {
            release_after_error(&mut plan);
            return Err(err);
        }
        Ok(plan)
    }

    /// Creates a plan with the extensible API.
    pub fn make(cufft: &Cufft, shape: S, ty: TransformType, options: PlanOptions) -> FftResult<Self> {
        shape.validate()?;
        let create: FnCreate = unsafe { cufft.symbol("cufftCreate")? };
        let mut raw: CufftHandle = 0;
        check::<FftStatus>("cufftCreate", unsafe { create(&mut raw) })?;

        let mut plan = Self { cufft: cufft.clone(), handle: Handle::new(KIND, raw), shape, ty, work_size: None };
        match plan.configure(options) {
            Ok(()) => Ok(plan),
            Err(err) => {
                release_after_error(&mut plan);
                Err(err)
            }
        }
    }

    fn configure(&mut self, options: PlanOptions) -> FftResult<()> {
        if let Some(auto) = options.auto_allocation {
            self.set_auto_allocation(auto)?;
        }
        let raw = self.handle.get()?;
        let mut work = 0usize;
        self.shape.make_plan(&self.cufft, raw, self.ty, &mut work)?;
        self.work_size = Some(work);
        debug!(shape = ?self.shape, ty = ?self.ty, handle = raw, work, "cufft plan made");
        if let Some(stream) = options.stream {
            self.set_stream(stream)?;
        }
        Ok(())
    }

    /// Estimated work area size for `shape`, without creating a plan.
    pub fn estimate(cufft: &Cufft, shape: &S, ty: TransformType) -> FftResult<usize> {
        shape.validate()?;
        let mut work = 0usize;
        shape.estimate(cufft, ty, &mut work)?;
        Ok(work)
    }

    /// Refined work area estimate for this plan's parameters (`cufftGetSize*`).
    pub fn size(&self) -> FftResult<usize> {
        let raw = self.handle.get()?;
        let mut work = 0usize;
        self.shape.get_size(&self.cufft, raw, self.ty, &mut work)?;
        Ok(work)
    }

    /// Actual work area size after generation and any `set_*` calls (`cufftGetSize`).
    pub fn actual_size(&self) -> FftResult<usize> {
        let raw = self.handle.get()?;
        let f: FnGetSize = unsafe { self.cufft.symbol("cufftGetSize")? };
        let mut work = 0usize;
        check::<FftStatus>("cufftGetSize", unsafe { f(raw, &mut work) })?;
        Ok(work)
    }

    /// Hands cuFFT a caller-owned work area.
    ///
    /// The area must stay valid for every later execution of this plan.
    pub fn set_work_area(&mut self, area: DevicePtr) -> FftResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetWorkArea = unsafe { self.cufft.symbol("cufftSetWorkArea")? };
        check::<FftStatus>("cufftSetWorkArea", unsafe { f(raw, area.as_raw()) })?;
        Ok(())
    }

    /// Enables or disables work area allocation at plan generation.
    pub fn set_auto_allocation(&mut self, auto: bool) -> FftResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetAutoAllocation = unsafe { self.cufft.symbol("cufftSetAutoAllocation")? };
        check::<FftStatus>("cufftSetAutoAllocation", unsafe { f(raw, c_int::from(auto)) })?;
        Ok(())
    }

    /// Associates a stream with all later executions.
    pub fn set_stream(&mut self, stream: Stream) -> FftResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetStream = unsafe { self.cufft.symbol("cufftSetStream")? };
        check::<FftStatus>("cufftSetStream", unsafe { f(raw, stream) })?;
        Ok(())
    }

    /// Executes the transform from `input` to `output`.
    ///
    /// `direction` is ignored by the real transform types.
    pub fn exec(&mut self, input: DevicePtr, output: DevicePtr, direction: Direction) -> FftResult<()> {
        self.dispatch(input, output, Some(direction))
    }

    /// Executes the transform in place.
    pub fn exec_inplace(&mut self, data: DevicePtr, direction: Direction) -> FftResult<()> {
        self.dispatch(data, data, Some(direction))
    }

    /// Executes a real transform (R2C, C2R, D2Z, Z2D).
    ///
    /// Complex-to-complex plans return [`FftError::DirectionRequired`].
    pub fn exec_real(&mut self, input: DevicePtr, output: DevicePtr) -> FftResult<()> {
        self.dispatch(input, output, None)
    }

    /// In-place form of [`exec_real`](Self::exec_real).
    pub fn exec_real_inplace(&mut self, data: DevicePtr) -> FftResult<()> {
        self.dispatch(data, data, None)
    }

    fn dispatch(&mut self, input: DevicePtr, output: DevicePtr, direction: Option<Direction>) -> FftResult<()> {
        let raw = self.handle.get()?;
        let name = self.ty.exec_symbol();
        let result = if self.ty.needs_direction() {
            let direction = direction.ok_or(FftError::DirectionRequired(self.ty))?;
            let f: FnExecComplex = unsafe { self.cufft.symbol(name)? };
            unsafe { f(raw, input.as_raw(), output.as_raw(), direction.raw()) }
        } else {
            let f: FnExecReal = unsafe { self.cufft.symbol(name)? };
            unsafe { f(raw, input.as_raw(), output.as_raw()) }
        };
        check::<FftStatus>(name, result)?;
        Ok(())
    }

    /// Plan shape.
    pub fn shape(&self) -> &S {
        &self.shape
    }

    /// Transform type.
    pub fn transform_type(&self) -> TransformType {
        self.ty
    }

    /// Work size reported by `cufftMakePlan*`, `None` for legacy plans.
    pub fn work_size(&self) -> Option<usize> {
        self.work_size
    }

    /// Raw `cufftHandle`.
    pub fn raw(&self) -> FftResult<CufftHandle> {
        Ok(self.handle.get()?)
    }

    /// Lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    /// Destroys the plan. Further calls are no-ops.
    pub fn release(&mut self) -> FftResult<()> {
        if !self.handle.is_live() {
            return Ok(());
        }
        let f: FnDestroy = unsafe { self.cufft.symbol("cufftDestroy")? };
        let Some(raw) = self.handle.take() else {
            return Ok(());
        };
        check::<FftStatus>("cufftDestroy", unsafe { f(raw) })?;
        Ok(())
    }
}

impl FftPlan1d {
    /// Transform size.
    pub fn nx(&self) -> i32 {
        self.shape.nx
    }

    /// Number of transforms.
    pub fn batch(&self) -> i32 {
        self.shape.batch
    }
}

impl<S: PlanShape> NativeResource for FftPlan<S> {
    type Error = FftError;

    fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    fn release(&mut self) -> FftResult<()> {
        FftPlan::release(self)
    }
}

impl<S: PlanShape> Drop for FftPlan<S> {
    fn drop(&mut self) {
        release_on_drop(self);
    }
}
