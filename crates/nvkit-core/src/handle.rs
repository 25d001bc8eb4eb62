//! Native handle lifecycle.
//!
//! Every wrapper owns one native handle and moves through two states:
//!
//! ```text
//! Live --release()--> Released
//! ```
//!
//! The transition happens once. [`Handle`] records it, and
//! [`release_on_drop`] gives every wrapper the same `Drop` behavior: release
//! if still live, log that the release was implicit, and log (never panic on)
//! a failing destroy.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Lifecycle state of a native resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// The native handle is valid.
    Live,
    /// The native handle was destroyed.
    Released,
}

/// Holder for a native handle value.
pub struct Handle<H: Copy> {
    raw: Option<H>,
    kind: &'static str,
}

impl<H: Copy + fmt::Debug> Handle<H> {
    /// Wraps a freshly created handle.
    pub fn new(kind: &'static str, raw: H) -> Self {
        debug!(kind, handle = ?raw, "created");
        Self { raw: Some(raw), kind }
    }

    /// The handle, or [`Error::Released`].
    pub fn get(&self) -> Result<H> {
        self.raw.ok_or(Error::Released { kind: self.kind })
    }

    /// Current state.
    pub fn state(&self) -> Lifecycle {
        if self.raw.is_some() { Lifecycle::Live } else { Lifecycle::Released }
    }

    /// True while the handle is live.
    pub fn is_live(&self) -> bool {
        self.raw.is_some()
    }

    /// Moves the handle out, leaving the holder released.
    ///
    /// Returns `None` if it was already released.
    pub fn take(&mut self) -> Option<H> {
        let raw = self.raw.take();
        if let Some(raw) = raw {
            debug!(kind = self.kind, handle = ?raw, "released");
        }
        raw
    }

    /// Resource kind used in errors and logs.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl<H: Copy + fmt::Debug> fmt::Debug for Handle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw {
            Some(raw) => write!(f, "{}({:?})", self.kind, raw),
            None => write!(f, "{}(released)", self.kind),
        }
    }
}

/// A wrapper that owns a native resource.
pub trait NativeResource {
    /// Error returned by the native destroy.
    type Error: fmt::Display;

    /// Current lifecycle state.
    fn state(&self) -> Lifecycle;

    /// Destroys the native resource. Idempotent.
    fn release(&mut self) -> std::result::Result<(), Self::Error>;
}

/// Shared `Drop` body for [`NativeResource`] implementors.
pub fn release_on_drop<R: NativeResource>(resource: &mut R) {
    if resource.state() == Lifecycle::Released {
        return;
    }
    let kind = std::any::type_name::<R>();
    debug!(kind, "implicit release on drop");
    if let Err(err) = resource.release() {
        warn!(kind, error = %err, "release on drop failed");
    }
}

/// Releases a resource whose setup failed after creation.
///
/// The caller returns the setup error; a destroy failure here is logged at
/// `warn` and dropped.
pub fn release_after_error<R: NativeResource>(resource: &mut R) {
    if let Err(err) = resource.release() {
        warn!(kind = std::any::type_name::<R>(), error = %err, "release after failed setup failed");
    }
}
