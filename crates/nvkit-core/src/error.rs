//! Error types shared by every nvkit binding crate.
//!
//! # Overview
//!
//! [`Error`] covers the failures that happen before a native entry point is
//! reached:
//! - the shared library could not be opened
//! - a symbol is missing from an opened library
//! - a wrapper was used after its native handle was released
//!
//! Failures reported by the native libraries themselves are carried by
//! [`crate::StatusError`], parameterised by the library's status enum.
//!
//! # Usage
//!
//! ```rust
//! use nvkit_core::{Error, Result};
//!
//! fn require_live(live: bool) -> Result<()> {
//!     if !live {
//!         return Err(Error::Released { kind: "cufft plan" });
//!     }
//!     Ok(())
//! }
//! assert!(require_live(false).is_err());
//! ```
//!
//! # Used By
//!
//! - `nvkit-fft`, `nvkit-rand`, `nvkit-solver`, `nvkit-npp` wrap this enum in
//!   their own error type via `#[from]`.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by library loading and handle bookkeeping.
#[derive(Debug, Error)]
pub enum Error {
    /// None of the candidate paths for a library could be opened.
    #[error("{library}: no loadable library among {tried:?}: {reason}")]
    LibraryNotFound {
        /// Logical library name (e.g. `cufft`).
        library: &'static str,
        /// Candidate names or paths that were attempted, in order.
        tried: Vec<String>,
        /// Loader message for the last attempt.
        reason: String,
    },

    /// The library was opened but does not export the requested symbol.
    #[error("{library}: symbol not found: {symbol}")]
    SymbolNotFound {
        /// Logical library name.
        library: &'static str,
        /// Exported symbol name.
        symbol: String,
    },

    /// The wrapper's native handle was already released.
    #[error("{kind} used after release")]
    Released {
        /// Kind of resource, e.g. `cufft plan`.
        kind: &'static str,
    },
}

impl Error {
    /// Returns true for [`Error::Released`].
    pub fn is_released(&self) -> bool {
        matches!(self, Error::Released { .. })
    }
}
