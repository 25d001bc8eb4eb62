//! Native status codes and the single result-checking helper.
//!
//! Every native entry point in the CUDA math libraries returns an integer
//! status. Each binding crate maps its library's codes onto an enum that
//! implements [`NativeStatus`], and routes every returned code through
//! [`check`]. Nothing else in the workspace inspects raw status integers.
//!
//! # Classification
//!
//! - `0` is success for every library.
//! - NPP reports warnings as positive codes. They are logged and the call is
//!   treated as successful.
//! - Everything else is a failure and becomes a [`StatusError`].

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace, warn};

/// A library-specific status enum.
pub trait NativeStatus: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Logical library name used in log records.
    const LIBRARY: &'static str;

    /// Maps a raw code, keeping unknown values.
    fn from_raw(raw: i32) -> Self;

    /// The raw code.
    fn raw(self) -> i32;

    /// True for the success code.
    fn is_success(self) -> bool {
        self.raw() == 0
    }

    /// True for codes that carry a diagnostic but do not fail the call.
    fn is_warning(self) -> bool {
        false
    }
}

/// A native call returned a failure status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{call} failed: {status} ({})", .status.raw())]
pub struct StatusError<S: NativeStatus> {
    /// Native entry point that returned the status.
    pub call: String,
    /// The status it returned.
    pub status: S,
}

impl<S: NativeStatus> StatusError<S> {
    /// Raw native code.
    pub fn code(&self) -> i32 {
        self.status.raw()
    }
}

/// Checks the status returned by `call`.
///
/// Returns the decoded status on success (including warnings) so callers
/// that care about warnings can still see them.
pub fn check<S: NativeStatus>(call: &str, raw: i32) -> Result<S, StatusError<S>> {
    let status = S::from_raw(raw);
    if status.is_success() {
        trace!(library = S::LIBRARY, call, "ok");
        Ok(status)
    } else if status.is_warning() {
        warn!(library = S::LIBRARY, call, code = raw, %status, "native warning");
        Ok(status)
    } else {
        debug!(library = S::LIBRARY, call, code = raw, %status, "native failure");
        Err(StatusError { call: call.to_owned(), status })
    }
}

/// Declares a status enum for one native library.
///
/// Generates the enum with an `Other(i32)` catch-all, `from_code`, `code`,
/// `name` and a `Display` impl printing the native constant name. The
/// [`NativeStatus`] impl stays with the caller so it can classify warnings.
#[macro_export]
macro_rules! native_status {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $text:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// A code this binding does not know.
            Other(i32),
        }

        impl $name {
            /// Maps a raw code.
            pub fn from_code(raw: i32) -> Self {
                match raw {
                    $( $code => $name::$variant, )*
                    other => $name::Other(other),
                }
            }

            /// Raw code.
            pub fn code(self) -> i32 {
                match self {
                    $( $name::$variant => $code, )*
                    $name::Other(raw) => raw,
                }
            }

            /// Native constant name.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )*
                    $name::Other(_) => "UNKNOWN",
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
