//! Error types for the sparse solver wrappers.

use nvkit_core::StatusError;
use thiserror::Error;

use crate::status::{SolverStatus, SparseStatus};

/// Result type for solver operations.
pub type SolverResult<T> = Result<T, SolverError>;

/// Errors from cuSOLVER and cuSPARSE wrappers.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A cuSOLVER entry point returned a failure status.
    #[error(transparent)]
    Status(#[from] StatusError<SolverStatus>),

    /// A cuSPARSE entry point returned a failure status.
    #[error(transparent)]
    Sparse(#[from] StatusError<SparseStatus>),

    /// Library loading or handle lifecycle failure.
    #[error(transparent)]
    Core(#[from] nvkit_core::Error),

    /// A buffer is shorter than the sizes passed to the native call.
    #[error("{name}: need {required} elements, got {actual}")]
    BufferTooSmall {
        /// Argument name.
        name: &'static str,
        /// Elements the call will touch.
        required: usize,
        /// Elements provided.
        actual: usize,
    },

    /// A dimension or count is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A native getter returned a value outside the known enum.
    #[error("unknown {what} value {value}")]
    UnknownValue {
        /// Enum name.
        what: &'static str,
        /// Raw value.
        value: i32,
    },
}

impl SolverError {
    /// The cuSOLVER status, if this error came from cuSOLVER.
    pub fn status(&self) -> Option<SolverStatus> {
        match self {
            SolverError::Status(e) => Some(e.status),
            _ => None,
        }
    }

    /// The cuSPARSE status, if this error came from cuSPARSE.
    pub fn sparse_status(&self) -> Option<SparseStatus> {
        match self {
            SolverError::Sparse(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Checks that `actual >= required`.
pub(crate) fn need(name: &'static str, required: usize, actual: usize) -> SolverResult<()> {
    if actual < required {
        return Err(SolverError::BufferTooSmall { name, required, actual });
    }
    Ok(())
}
