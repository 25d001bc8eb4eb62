//! Element types accepted by the sparse solvers.
//!
//! cuSOLVER exports each routine four times, prefixed `S`, `D`, `C` and `Z`.
//! [`SolverScalar`] maps a Rust type to its prefix and to the real and complex
//! types the routine uses for tolerances, norms and eigenvalue bounds.

use std::fmt;

use bytemuck::Pod;
use nvkit_core::{Complex32, Complex64};

mod private {
    pub trait Sealed {}
}

/// `f32`, `f64`, [`Complex32`] or [`Complex64`].
pub trait SolverScalar: private::Sealed + Pod + fmt::Debug + Send + Sync + 'static {
    /// Tolerance and norm type.
    type Real: Pod + fmt::Debug + Default + PartialEq;
    /// Complex type of eigenvalue region corners.
    type Complex: Pod + fmt::Debug;
    /// Routine prefix.
    const PREFIX: &'static str;
}

impl private::Sealed for f32 {}
impl private::Sealed for f64 {}
impl private::Sealed for Complex32 {}
impl private::Sealed for Complex64 {}

impl SolverScalar for f32 {
    type Real = f32;
    type Complex = Complex32;
    const PREFIX: &'static str = "S";
}

impl SolverScalar for f64 {
    type Real = f64;
    type Complex = Complex64;
    const PREFIX: &'static str = "D";
}

impl SolverScalar for Complex32 {
    type Real = f32;
    type Complex = Complex32;
    const PREFIX: &'static str = "C";
}

impl SolverScalar for Complex64 {
    type Real = f64;
    type Complex = Complex64;
    const PREFIX: &'static str = "Z";
}

/// Full cuSOLVER sparse symbol for `op` at precision `T`, e.g. `cusolverSpDcsrlsvqr`.
pub fn symbol<T: SolverScalar>(op: &str) -> String {
    format!("cusolverSp{}{}", T::PREFIX, op)
}
