//! # nvkit-fft
//!
//! Safe wrappers over cuFFT plans.
//!
//! - [`Cufft`] - the loaded library
//! - [`FftPlan`] - an owned `cufftHandle`, generic over its [`PlanShape`]
//! - [`Shape1d`], [`Shape2d`], [`Shape3d`], [`ShapeMany`] - plan dimensions
//! - [`TransformType`], [`Direction`] - transform selection
//! - [`FftError`] - failures, including the native [`FftStatus`]
//!
//! Plans release their handle on drop. Call [`FftPlan::release`] to observe
//! destroy failures instead of having them logged.

#![warn(missing_docs)]

pub mod error;
pub mod library;
pub mod plan;
pub mod shape;
pub mod status;
pub mod sys;

pub use error::{FftError, FftResult};
pub use library::{Cufft, CUFFT_LIBRARY};
pub use plan::{FftPlan, FftPlan1d, FftPlan2d, FftPlan3d, FftPlanMany, PlanOptions};
pub use shape::{Layout, PlanShape, Shape1d, Shape2d, Shape3d, ShapeMany};
pub use status::FftStatus;
pub use sys::{CufftHandle, Direction, TransformType};
