//! Error types for the NPP wrappers.
//!
//! # Overview
//!
//! [`NppError`] separates failures reported by NPP ([`NppError::Status`])
//! from those caught before any native call: short buffers, ROIs outside the
//! image and allocations that returned null.
//!
//! NPP warnings never reach this type. They are logged by
//! [`nvkit_core::check`] and the call returns `Ok`.

use nvkit_core::StatusError;
use thiserror::Error;

use crate::status::NppStatus;
use crate::sys::Size;

/// Result type for NPP operations.
pub type NppResult<T> = Result<T, NppError>;

/// Errors from NPP wrappers.
#[derive(Debug, Error)]
pub enum NppError {
    /// An NPP entry point returned an error status.
    #[error(transparent)]
    Status(#[from] StatusError<NppStatus>),

    /// Library loading or handle lifecycle failure.
    #[error(transparent)]
    Core(#[from] nvkit_core::Error),

    /// A caller buffer is smaller than the call needs.
    #[error("{name}: need {required}, got {actual}")]
    BufferTooSmall {
        /// Argument name.
        name: &'static str,
        /// Bytes or elements the call will touch.
        required: usize,
        /// Bytes or elements provided.
        actual: usize,
    },

    /// `nppiMalloc_*` or `nppsMalloc_*` returned null.
    #[error("{call}: allocation of {size:?} failed")]
    AllocationFailed {
        /// Allocation entry point.
        call: String,
        /// Requested size in pixels, or bytes as `width` for 1D buffers.
        size: Size,
    },

    /// A geometric argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl NppError {
    /// The NPP status, if this error came from NPP.
    pub fn status(&self) -> Option<NppStatus> {
        match self {
            NppError::Status(e) => Some(e.status),
            _ => None,
        }
    }
}

pub(crate) fn need(name: &'static str, required: usize, actual: usize) -> NppResult<()> {
    if actual < required {
        return Err(NppError::BufferTooSmall { name, required, actual });
    }
    Ok(())
}
