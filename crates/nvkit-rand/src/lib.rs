//! # nvkit-rand
//!
//! Safe wrappers over cuRAND.
//!
//! - [`Curand`] - the loaded library
//! - [`Generator`] - an owned generator writing to [`Device`] or [`Host`] memory
//! - [`PoissonDistribution`] - an owned discrete distribution
//! - [`RngKind`], [`Ordering`] - generator configuration
//!
//! ```ignore
//! use nvkit_rand::{Curand, HostGenerator, RngKind};
//!
//! let curand = Curand::load()?;
//! let mut generator = HostGenerator::seeded(&curand, RngKind::Philox4_32_10, 1234)?;
//! let mut values = vec![0f32; 16];
//! generator.uniform_f32(&mut values)?;
//! ```

#![warn(missing_docs)]

pub mod distribution;
pub mod error;
pub mod generator;
pub mod library;
pub mod status;
pub mod sys;

pub use distribution::PoissonDistribution;
pub use error::{RandError, RandResult};
pub use generator::{Device, DeviceGenerator, Generator, Host, HostGenerator, Location, Output};
pub use library::{Curand, CURAND_LIBRARY};
pub use status::RandStatus;
pub use sys::{Ordering, RawDistribution, RawGenerator, RngKind};
