//! Raw cuFFT ABI: handle type, enums and entry point signatures.

use std::ffi::{c_int, c_void};

use nvkit_core::Stream;

/// `cufftHandle`.
pub type CufftHandle = c_int;

/// Transform kind (`cufftType`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformType {
    /// Real to complex, single precision.
    R2C = 0x2a,
    /// Complex to real, single precision.
    C2R = 0x2c,
    /// Complex to complex, single precision.
    C2C = 0x29,
    /// Real to complex, double precision.
    D2Z = 0x6a,
    /// Complex to real, double precision.
    Z2D = 0x6c,
    /// Complex to complex, double precision.
    Z2Z = 0x69,
}

impl TransformType {
    /// All transform types.
    pub const ALL: [TransformType; 6] = [
        TransformType::R2C,
        TransformType::C2R,
        TransformType::C2C,
        TransformType::D2Z,
        TransformType::Z2D,
        TransformType::Z2Z,
    ];

    /// Raw `cufftType` value.
    pub fn raw(self) -> c_int {
        self as c_int
    }

    /// True for C2C and Z2Z, whose execution takes a direction.
    pub fn needs_direction(self) -> bool {
        matches!(self, TransformType::C2C | TransformType::Z2Z)
    }

    /// True for double precision transforms.
    pub fn is_double(self) -> bool {
        matches!(self, TransformType::D2Z | TransformType::Z2D | TransformType::Z2Z)
    }

    /// Execute entry point for this transform type.
    pub fn exec_symbol(self) -> &'static str {
        match self {
            TransformType::R2C => "cufftExecR2C",
            TransformType::C2R => "cufftExecC2R",
            TransformType::C2C => "cufftExecC2C",
            TransformType::D2Z => "cufftExecD2Z",
            TransformType::Z2D => "cufftExecZ2D",
            TransformType::Z2Z => "cufftExecZ2Z",
        }
    }
}

impl std::str::FromStr for TransformType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r2c" => Ok(TransformType::R2C),
            "c2r" => Ok(TransformType::C2R),
            "c2c" => Ok(TransformType::C2C),
            "d2z" => Ok(TransformType::D2Z),
            "z2d" => Ok(TransformType::Z2D),
            "z2z" => Ok(TransformType::Z2Z),
            other => Err(format!("unknown transform type: {other}")),
        }
    }
}

/// Direction of a complex-to-complex transform.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `CUFFT_FORWARD`.
    Forward = -1,
    /// `CUFFT_INVERSE`.
    Inverse = 1,
}

impl Direction {
    /// Raw direction value.
    pub fn raw(self) -> c_int {
        self as c_int
    }
}

pub(crate) type FnPlan1d = unsafe extern "C" fn(*mut CufftHandle, c_int, c_int, c_int) -> c_int;
pub(crate) type FnPlan2d = unsafe extern "C" fn(*mut CufftHandle, c_int, c_int, c_int) -> c_int;
pub(crate) type FnPlan3d =
    unsafe extern "C" fn(*mut CufftHandle, c_int, c_int, c_int, c_int) -> c_int;
pub(crate) type FnPlanMany = unsafe extern "C" fn(
    *mut CufftHandle,
    c_int,
    *mut c_int,
    *mut c_int,
    c_int,
    c_int,
    *mut c_int,
    c_int,
    c_int,
    c_int,
    c_int,
) -> c_int;

pub(crate) type FnCreate = unsafe extern "C" fn(*mut CufftHandle) -> c_int;
pub(crate) type FnDestroy = unsafe extern "C" fn(CufftHandle) -> c_int;

pub(crate) type FnMakePlan1d =
    unsafe extern "C" fn(CufftHandle, c_int, c_int, c_int, *mut usize) -> c_int;
pub(crate) type FnMakePlan2d =
    unsafe extern "C" fn(CufftHandle, c_int, c_int, c_int, *mut usize) -> c_int;
pub(crate) type FnMakePlan3d =
    unsafe extern "C" fn(CufftHandle, c_int, c_int, c_int, c_int, *mut usize) -> c_int;
pub(crate) type FnMakePlanMany = unsafe extern "C" fn(
    CufftHandle,
    c_int,
    *mut c_int,
    *mut c_int,
    c_int,
    c_int,
    *mut c_int,
    c_int,
    c_int,
    c_int,
    c_int,
    *mut usize,
) -> c_int;

pub(crate) type FnEstimate1d = unsafe extern "C" fn(c_int, c_int, c_int, *mut usize) -> c_int;
pub(crate) type FnEstimate2d = unsafe extern "C" fn(c_int, c_int, c_int, *mut usize) -> c_int;
pub(crate) type FnEstimate3d =
    unsafe extern "C" fn(c_int, c_int, c_int, c_int, *mut usize) -> c_int;
pub(crate) type FnEstimateMany = unsafe extern "C" fn(
    c_int,
    *mut c_int,
    *mut c_int,
    c_int,
    c_int,
    *mut c_int,
    c_int,
    c_int,
    c_int,
    c_int,
    *mut usize,
) -> c_int;

pub(crate) type FnGetSize1d = FnMakePlan1d;
pub(crate) type FnGetSize2d = FnMakePlan2d;
pub(crate) type FnGetSize3d = FnMakePlan3d;
pub(crate) type FnGetSizeMany = FnMakePlanMany;

pub(crate) type FnGetSize = unsafe extern "C" fn(CufftHandle, *mut usize) -> c_int;
pub(crate) type FnSetWorkArea = unsafe extern "C" fn(CufftHandle, *mut c_void) -> c_int;
pub(crate) type FnSetAutoAllocation = unsafe extern "C" fn(CufftHandle, c_int) -> c_int;
pub(crate) type FnSetStream = unsafe extern "C" fn(CufftHandle, Stream) -> c_int;
pub(crate) type FnGetVersion = unsafe extern "C" fn(*mut c_int) -> c_int;

/// R2C, C2R, D2Z, Z2D: `(plan, idata, odata)`.
pub(crate) type FnExecReal = unsafe extern "C" fn(CufftHandle, *mut c_void, *mut c_void) -> c_int;
/// C2C, Z2Z: `(plan, idata, odata, direction)`.
pub(crate) type FnExecComplex =
    unsafe extern "C" fn(CufftHandle, *mut c_void, *mut c_void, c_int) -> c_int;
