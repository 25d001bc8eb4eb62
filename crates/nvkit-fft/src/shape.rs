//! Transform shapes.
//!
//! A shape selects which family of cuFFT entry points a plan uses:
//!
//! | shape | legacy | extensible | estimate | size query |
//! |-------|--------|------------|----------|------------|
//! | [`Shape1d`] | `cufftPlan1d` | `cufftMakePlan1d` | `cufftEstimate1d` | `cufftGetSize1d` |
//! | [`Shape2d`] | `cufftPlan2d` | `cufftMakePlan2d` | `cufftEstimate2d` | `cufftGetSize2d` |
//! | [`Shape3d`] | `cufftPlan3d` | `cufftMakePlan3d` | `cufftEstimate3d` | `cufftGetSize3d` |
//! | [`ShapeMany`] | `cufftPlanMany` | `cufftMakePlanMany` | `cufftEstimateMany` | `cufftGetSizeMany` |

use std::ffi::c_int;
use std::fmt;
use std::ptr;

use nvkit_core::check;

use crate::error::{FftError, FftResult};
use crate::library::Cufft;
use crate::status::FftStatus;
use crate::sys::*;

mod private {
    pub trait Sealed {}
}

/// Dimensions of a plan.
///
/// Implemented by [`Shape1d`], [`Shape2d`], [`Shape3d`] and [`ShapeMany`].
pub trait PlanShape: private::Sealed + Clone + fmt::Debug + Send + 'static {
    /// Rank of the transform.
    fn rank(&self) -> usize;

    /// Rejects shapes that cannot be marshaled.
    fn validate(&self) -> FftResult<()> {
        Ok(())
    }

    /// Legacy plan creation (`cufftPlan*`).
    fn plan(&self, cufft: &Cufft, handle: &mut CufftHandle, ty: TransformType) -> FftResult<()>;

    /// Plan generation on a created handle (`cufftMakePlan*`).
    fn make_plan(
        &self,
        cufft: &Cufft,
        handle: CufftHandle,
        ty: TransformType,
        work: &mut usize,
    ) -> FftResult<()>;

    /// Work size estimate without a handle (`cufftEstimate*`).
    fn estimate(&self, cufft: &Cufft, ty: TransformType, work: &mut usize) -> FftResult<()>;

    /// Refined work size for a handle (`cufftGetSize*`).
    fn get_size(
        &self,
        cufft: &Cufft,
        handle: CufftHandle,
        ty: TransformType,
        work: &mut usize,
    ) -> FftResult<()>;
}

fn status(call: &str, raw: c_int) -> FftResult<()> {
    check::<FftStatus>(call, raw)?;
    Ok(())
}

// =============================================================================
// 1D
// =============================================================================

/// `batch` one-dimensional transforms of `nx` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape1d {
    /// Transform size.
    pub nx: i32,
    /// Number of transforms.
    pub batch: i32,
}

impl Shape1d {
    /// Creates a 1D shape.
    pub fn new(nx: i32, batch: i32) -> Self {
        Self { nx, batch }
    }
}

impl private::Sealed for Shape1d {}

impl PlanShape for Shape1d {
    fn rank(&self) -> usize {
        1
    }

    fn plan(&self, cufft: &Cufft, handle: &mut CufftHandle, ty: TransformType) -> FftResult<()> {
        let f: FnPlan1d = unsafe { cufft.symbol("cufftPlan1d")? };
        status("cufftPlan1d", unsafe { f(handle, self.nx, ty.raw(), self.batch) })
    }

    fn make_plan(&self, cufft: &Cufft, handle: CufftHandle, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnMakePlan1d = unsafe { cufft.symbol("cufftMakePlan1d")? };
        status("cufftMakePlan1d", unsafe { f(handle, self.nx, ty.raw(), self.batch, work) })
    }

    fn estimate(&self, cufft: &Cufft, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnEstimate1d = unsafe { cufft.symbol("cufftEstimate1d")? };
        status("cufftEstimate1d", unsafe { f(self.nx, ty.raw(), self.batch, work) })
    }

    fn get_size(&self, cufft: &Cufft, handle: CufftHandle, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnGetSize1d = unsafe { cufft.symbol("cufftGetSize1d")? };
        status("cufftGetSize1d", unsafe { f(handle, self.nx, ty.raw(), self.batch, work) })
    }
}

// =============================================================================
// 2D
// =============================================================================

/// One `nx` x `ny` transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape2d {
    /// Size of the slowest changing dimension.
    pub nx: i32,
    /// Size of the fastest changing dimension.
    pub ny: i32,
}

impl Shape2d {
    /// Creates a 2D shape.
    pub fn new(nx: i32, ny: i32) -> Self {
        Self { nx, ny }
    }
}

impl private::Sealed for Shape2d {}

impl PlanShape for Shape2d {
    fn rank(&self) -> usize {
        2
    }

    fn plan(&self, cufft: &Cufft, handle: &mut CufftHandle, ty: TransformType) -> FftResult<()> {
        let f: FnPlan2d = unsafe { cufft.symbol("cufftPlan2d")? };
        status("cufftPlan2d", unsafe { f(handle, self.nx, self.ny, ty.raw()) })
    }

    fn make_plan(&self, cufft: &Cufft, handle: CufftHandle, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnMakePlan2d = unsafe { cufft.symbol("cufftMakePlan2d")? };
        status("cufftMakePlan2d", unsafe { f(handle, self.nx, self.ny, ty.raw(), work) })
    }

    fn estimate(&self, cufft: &Cufft, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnEstimate2d = unsafe { cufft.symbol("cufftEstimate2d")? };
        status("cufftEstimate2d", unsafe { f(self.nx, self.ny, ty.raw(), work) })
    }

    fn get_size(&self, cufft: &Cufft, handle: CufftHandle, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnGetSize2d = unsafe { cufft.symbol("cufftGetSize2d")? };
        status("cufftGetSize2d", unsafe { f(handle, self.nx, self.ny, ty.raw(), work) })
    }
}

// =============================================================================
// 3D
// =============================================================================

/// One `nx` x `ny` x `nz` transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape3d {
    /// Size of the slowest changing dimension.
    pub nx: i32,
    /// Size of the middle dimension.
    pub ny: i32,
    /// Size of the fastest changing dimension.
    pub nz: i32,
}

impl Shape3d {
    /// Creates a 3D shape.
    pub fn new(nx: i32, ny: i32, nz: i32) -> Self {
        Self { nx, ny, nz }
    }
}

impl private::Sealed for Shape3d {}

impl PlanShape for Shape3d {
    fn rank(&self) -> usize {
        3
    }

    fn plan(&self, cufft: &Cufft, handle: &mut CufftHandle, ty: TransformType) -> FftResult<()> {
        let f: FnPlan3d = unsafe { cufft.symbol("cufftPlan3d")? };
        status("cufftPlan3d", unsafe { f(handle, self.nx, self.ny, self.nz, ty.raw()) })
    }

    fn make_plan(&self, cufft: &Cufft, handle: CufftHandle, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnMakePlan3d = unsafe { cufft.symbol("cufftMakePlan3d")? };
        status("cufftMakePlan3d", unsafe { f(handle, self.nx, self.ny, self.nz, ty.raw(), work) })
    }

    fn estimate(&self, cufft: &Cufft, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnEstimate3d = unsafe { cufft.symbol("cufftEstimate3d")? };
        status("cufftEstimate3d", unsafe { f(self.nx, self.ny, self.nz, ty.raw(), work) })
    }

    fn get_size(&self, cufft: &Cufft, handle: CufftHandle, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let f: FnGetSize3d = unsafe { cufft.symbol("cufftGetSize3d")? };
        status("cufftGetSize3d", unsafe { f(handle, self.nx, self.ny, self.nz, ty.raw(), work) })
    }
}

// =============================================================================
// Batched, advanced layout
// =============================================================================

/// Advanced data layout for one side of a [`ShapeMany`] transform.
///
/// Element `(x, y, z)` of batch `b` lives at
/// `b * dist + ((x * embed[1] + y) * embed[2] + z) * stride`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Storage dimensions, one per rank.
    pub embed: Vec<i32>,
    /// Distance between successive elements.
    pub stride: i32,
    /// Distance between the first elements of successive batches.
    pub dist: i32,
}

/// `batch` transforms of rank 1 to 3 with optional advanced layout.
///
/// Without a layout cuFFT uses the basic contiguous layout and ignores
/// stride and distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMany {
    /// Size of each dimension.
    pub n: Vec<i32>,
    /// Input layout.
    pub input: Option<Layout>,
    /// Output layout.
    pub output: Option<Layout>,
    /// Number of transforms.
    pub batch: i32,
}

impl ShapeMany {
    /// Basic-layout batched shape.
    pub fn new(n: impl Into<Vec<i32>>, batch: i32) -> Self {
        Self { n: n.into(), input: None, output: None, batch }
    }

    /// Sets the input layout.
    pub fn with_input(mut self, layout: Layout) -> Self {
        self.input = Some(layout);
        self
    }

    /// Sets the output layout.
    pub fn with_output(mut self, layout: Layout) -> Self {
        self.output = Some(layout);
        self
    }
}

/// Owned copies of the `ShapeMany` arrays, in the mutable form cuFFT takes.
struct ManyArgs {
    rank: c_int,
    n: Vec<c_int>,
    inembed: Option<Vec<c_int>>,
    istride: c_int,
    idist: c_int,
    onembed: Option<Vec<c_int>>,
    ostride: c_int,
    odist: c_int,
    batch: c_int,
}

fn layout_parts(layout: &Option<Layout>) -> (Option<Vec<c_int>>, c_int, c_int) {
    match layout {
        Some(l) => (Some(l.embed.clone()), l.stride, l.dist),
        None => (None, 1, 0),
    }
}

fn embed_ptr(embed: &mut Option<Vec<c_int>>) -> *mut c_int {
    embed.as_mut().map_or(ptr::null_mut(), |v| v.as_mut_ptr())
}

impl ShapeMany {
    fn args(&self) -> FftResult<ManyArgs> {
        self.validate()?;
        let (inembed, istride, idist) = layout_parts(&self.input);
        let (onembed, ostride, odist) = layout_parts(&self.output);
        Ok(ManyArgs {
            rank: self.n.len() as c_int,
            n: self.n.clone(),
            inembed,
            istride,
            idist,
            onembed,
            ostride,
            odist,
            batch: self.batch,
        })
    }
}

impl private::Sealed for ShapeMany {}

impl PlanShape for ShapeMany {
    fn rank(&self) -> usize {
        self.n.len()
    }

    fn validate(&self) -> FftResult<()> {
        let rank = self.n.len();
        if !(1..=3).contains(&rank) {
            return Err(FftError::InvalidShape(format!("rank must be 1..=3, got {rank}")));
        }
        for (side, layout) in [("input", &self.input), ("output", &self.output)] {
            if let Some(l) = layout {
                if l.embed.len() != rank {
                    return Err(FftError::InvalidShape(format!(
                        "{side} embed has {} dims for rank {rank}",
                        l.embed.len()
                    )));
                }
            }
        }
        Ok(())
    }

    fn plan(&self, cufft: &Cufft, handle: &mut CufftHandle, ty: TransformType) -> FftResult<()> {
        let mut a = self.args()?;
        let f: FnPlanMany = unsafe { cufft.symbol("cufftPlanMany")? };
        let raw = unsafe {
            f(
                handle,
                a.rank,
                a.n.as_mut_ptr(),
                embed_ptr(&mut a.inembed),
                a.istride,
                a.idist,
                embed_ptr(&mut a.onembed),
                a.ostride,
                a.odist,
                ty.raw(),
                a.batch,
            )
        };
        status("cufftPlanMany", raw)
    }

    fn make_plan(&self, cufft: &Cufft, handle: CufftHandle, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let mut a = self.args()?;
        let f: FnMakePlanMany = unsafe { cufft.symbol("cufftMakePlanMany")? };
        let raw = unsafe {
            f(
                handle,
                a.rank,
                a.n.as_mut_ptr(),
                embed_ptr(&mut a.inembed),
                a.istride,
                a.idist,
                embed_ptr(&mut a.onembed),
                a.ostride,
                a.odist,
                ty.raw(),
                a.batch,
                work,
            )
        };
        status("cufftMakePlanMany", raw)
    }

    fn estimate(&self, cufft: &Cufft, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let mut a = self.args()?;
        let f: FnEstimateMany = unsafe { cufft.symbol("cufftEstimateMany")? };
        let raw = unsafe {
            f(
                a.rank,
                a.n.as_mut_ptr(),
                embed_ptr(&mut a.inembed),
                a.istride,
                a.idist,
                embed_ptr(&mut a.onembed),
                a.ostride,
                a.odist,
                ty.raw(),
                a.batch,
                work,
            )
        };
        status("cufftEstimateMany", raw)
    }

    fn get_size(&self, cufft: &Cufft, handle: CufftHandle, ty: TransformType, work: &mut usize) -> FftResult<()> {
        let mut a = self.args()?;
        let f: FnGetSizeMany = unsafe { cufft.symbol("cufftGetSizeMany")? };
        let raw = unsafe {
            f(
                handle,
                a.rank,
                a.n.as_mut_ptr(),
                embed_ptr(&mut a.inembed),
                a.istride,
                a.idist,
                embed_ptr(&mut a.onembed),
                a.ostride,
                a.odist,
                ty.raw(),
                a.batch,
                work,
            )
        };
        status("cufftGetSizeMany", raw)
    }
}
