//! Error types for cuFFT plans.

use nvkit_core::StatusError;
use thiserror::Error;

use crate::status::FftStatus;
use crate::sys::TransformType;

/// Result type for cuFFT operations.
pub type FftResult<T> = Result<T, FftError>;

/// Errors from cuFFT plan operations.
#[derive(Debug, Error)]
pub enum FftError {
    /// A cuFFT entry point returned a failure status.
    #[error(transparent)]
    Status(#[from] StatusError<FftStatus>),

    /// Library loading or handle lifecycle failure.
    #[error(transparent)]
    Core(#[from] nvkit_core::Error),

    /// A complex-to-complex plan was executed without a direction.
    #[error("{0:?} transforms need a direction")]
    DirectionRequired(TransformType),

    /// Shape parameters rejected before reaching cuFFT.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

impl FftError {
    /// The native status, if this error came from cuFFT.
    pub fn status(&self) -> Option<FftStatus> {
        match self {
            FftError::Status(e) => Some(e.status),
            _ => None,
        }
    }
}
