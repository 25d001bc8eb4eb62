//! CLI command implementations

pub mod fft;
pub mod info;
pub mod rand;
