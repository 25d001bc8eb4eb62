//! Error types for cuRAND wrappers.

use nvkit_core::StatusError;
use thiserror::Error;

use crate::status::RandStatus;

/// Result type for cuRAND operations.
pub type RandResult<T> = Result<T, RandError>;

/// Errors from cuRAND generators and distributions.
#[derive(Debug, Error)]
pub enum RandError {
    /// A cuRAND entry point returned a failure status.
    #[error(transparent)]
    Status(#[from] StatusError<RandStatus>),

    /// Library loading or handle lifecycle failure.
    #[error(transparent)]
    Core(#[from] nvkit_core::Error),
}

impl RandError {
    /// The native status, if this error came from cuRAND.
    pub fn status(&self) -> Option<RandStatus> {
        match self {
            RandError::Status(e) => Some(e.status),
            RandError::Core(_) => None,
        }
    }
}
