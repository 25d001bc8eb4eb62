//! # nvkit-core
//!
//! Shared plumbing for the nvkit bindings to the CUDA math and imaging
//! libraries (cuFFT, cuRAND, cuSOLVER, cuSPARSE, NPP).
//!
//! - [`NativeLibrary`] - dynamically loaded or table-backed symbol set
//! - [`LibrarySpec`] - where to look for a library, with environment overrides
//! - [`NativeStatus`], [`check`], [`StatusError`] - status code handling
//! - [`Handle`], [`Lifecycle`], [`NativeResource`] - handle lifecycle
//! - [`DevicePtr`], [`DeviceSlice`], [`Stream`], [`Complex32`], [`Complex64`]
//!
//! ## Crate Structure
//!
//! ```text
//! nvkit-core (this crate)
//!    ^
//!    |
//!    +-- nvkit-fft (cuFFT plans)
//!    +-- nvkit-rand (cuRAND generators)
//!    +-- nvkit-solver (cuSOLVER sparse, cuSPARSE descriptors)
//!    +-- nvkit-npp (NPP images)
//!    +-- nvkit-cli
//! ```
//!
//! Native libraries are never linked at build time. Each binding crate opens
//! its library on first use, so the workspace builds and its tests run on
//! machines without the CUDA toolkit.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handle;
pub mod library;
pub mod status;
pub mod types;

pub use config::LibrarySpec;
pub use error::{Error, Result};
pub use handle::{release_after_error, release_on_drop, Handle, Lifecycle, NativeResource};
pub use library::{load_shared, NativeLibrary};
pub use status::{check, NativeStatus, StatusError};
pub use types::{Complex32, Complex64, DevicePtr, DeviceSlice, Stream};
