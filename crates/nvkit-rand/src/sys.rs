//! Raw cuRAND ABI.

use std::ffi::{c_int, c_uint, c_ulonglong, c_void};
use std::fmt;

use nvkit_core::Stream;

/// `curandGenerator_t`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawGenerator(pub *mut c_void);

/// `curandDiscreteDistribution_t`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawDistribution(pub *mut c_void);

// Opaque library tokens; the owning wrapper serializes their use.
unsafe impl Send for RawGenerator {}
unsafe impl Send for RawDistribution {}
unsafe impl Sync for RawDistribution {}

impl fmt::Debug for RawGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.0)
    }
}

impl fmt::Debug for RawDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.0)
    }
}

/// Generator algorithm (`curandRngType_t`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RngKind {
    /// Default pseudorandom generator (XORWOW).
    PseudoDefault = 100,
    /// XORWOW pseudorandom generator.
    Xorwow = 101,
    /// Combined multiple recursive generator.
    Mrg32k3a = 121,
    /// Mersenne Twister, GPU-tuned variant.
    Mtgp32 = 141,
    /// Mersenne Twister MT19937.
    Mt19937 = 142,
    /// Philox 4x32 with 10 rounds.
    Philox4_32_10 = 161,
    /// Default quasirandom generator (Sobol32).
    QuasiDefault = 200,
    /// Sobol32 quasirandom generator.
    Sobol32 = 201,
    /// Scrambled Sobol32.
    ScrambledSobol32 = 202,
    /// Sobol64 quasirandom generator.
    Sobol64 = 203,
    /// Scrambled Sobol64.
    ScrambledSobol64 = 204,
}

impl RngKind {
    /// Raw `curandRngType_t`.
    pub fn raw(self) -> c_int {
        self as c_int
    }

    /// True for the Sobol family.
    pub fn is_quasi(self) -> bool {
        (self as i32) >= 200
    }
}

impl std::str::FromStr for RngKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "default" | "pseudo" => RngKind::PseudoDefault,
            "xorwow" => RngKind::Xorwow,
            "mrg32k3a" => RngKind::Mrg32k3a,
            "mtgp32" => RngKind::Mtgp32,
            "mt19937" => RngKind::Mt19937,
            "philox" | "philox4x3210" | "philox43210" => RngKind::Philox4_32_10,
            "quasi" => RngKind::QuasiDefault,
            "sobol32" => RngKind::Sobol32,
            "scrambledsobol32" => RngKind::ScrambledSobol32,
            "sobol64" => RngKind::Sobol64,
            "scrambledsobol64" => RngKind::ScrambledSobol64,
            _ => return Err(format!("unknown generator kind: {s}")),
        };
        Ok(kind)
    }
}

/// Result ordering (`curandOrdering_t`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordering {
    /// Best ordering for pseudorandom results.
    PseudoBest = 100,
    /// Default ordering for pseudorandom results.
    PseudoDefault = 101,
    /// Fast lower quality ordering.
    PseudoSeeded = 102,
    /// Legacy sequence ordering.
    PseudoLegacy = 103,
    /// Device-dependent ordering.
    PseudoDynamic = 104,
    /// Ordering for quasirandom results.
    QuasiDefault = 201,
}

impl Ordering {
    /// Raw `curandOrdering_t`.
    pub fn raw(self) -> c_int {
        self as c_int
    }
}

pub(crate) type FnCreateGenerator = unsafe extern "C" fn(*mut RawGenerator, c_int) -> c_int;
pub(crate) type FnDestroyGenerator = unsafe extern "C" fn(RawGenerator) -> c_int;
pub(crate) type FnSetU64 = unsafe extern "C" fn(RawGenerator, c_ulonglong) -> c_int;
pub(crate) type FnSetI32 = unsafe extern "C" fn(RawGenerator, c_int) -> c_int;
pub(crate) type FnSetU32 = unsafe extern "C" fn(RawGenerator, c_uint) -> c_int;
pub(crate) type FnSetStream = unsafe extern "C" fn(RawGenerator, Stream) -> c_int;
pub(crate) type FnGenerateSeeds = unsafe extern "C" fn(RawGenerator) -> c_int;
pub(crate) type FnGenerate<T> = unsafe extern "C" fn(RawGenerator, *mut T, usize) -> c_int;
pub(crate) type FnGenerateParams<T, P> = unsafe extern "C" fn(RawGenerator, *mut T, usize, P, P) -> c_int;
pub(crate) type FnGeneratePoisson = unsafe extern "C" fn(RawGenerator, *mut c_uint, usize, f64) -> c_int;
pub(crate) type FnCreatePoisson = unsafe extern "C" fn(f64, *mut RawDistribution) -> c_int;
pub(crate) type FnDestroyDistribution = unsafe extern "C" fn(RawDistribution) -> c_int;
pub(crate) type FnGetVersion = unsafe extern "C" fn(*mut c_int) -> c_int;
