//! cuRAND library handle.

use std::ffi::c_int;
use std::sync::{Arc, OnceLock};

use nvkit_core::{check, load_shared, LibrarySpec, NativeLibrary};

use crate::error::RandResult;
use crate::status::RandStatus;
use crate::sys::FnGetVersion;

/// Where to find cuRAND.
pub const CURAND_LIBRARY: LibrarySpec = LibrarySpec {
    name: "curand",
    env_var: "NVKIT_CURAND_PATH",
    unix: &["libcurand.so", "libcurand.so.10"],
    windows: &["curand64_10.dll"],
};

static CURAND: OnceLock<Arc<NativeLibrary>> = OnceLock::new();

/// A loaded cuRAND library.
///
/// Cheap to clone. Generators keep a clone so the library outlives them.
#[derive(Debug, Clone)]
pub struct Curand {
    lib: Arc<NativeLibrary>,
}

impl Curand {
    /// Opens cuRAND once per process.
    pub fn load() -> RandResult<Self> {
        Ok(Self { lib: load_shared(&CURAND, &CURAND_LIBRARY)? })
    }

    /// Uses an already opened or table-backed library.
    pub fn from_library(lib: Arc<NativeLibrary>) -> Self {
        Self { lib }
    }

    /// The underlying symbol set.
    pub fn library(&self) -> &Arc<NativeLibrary> {
        &self.lib
    }

    /// `curandGetVersion`.
    pub fn version(&self) -> RandResult<i32> {
        let f: FnGetVersion = unsafe { self.symbol("curandGetVersion")? };
        let mut version: c_int = 0;
        check::<RandStatus>("curandGetVersion", unsafe { f(&mut version) })?;
        Ok(version)
    }

    /// Resolves a cuRAND entry point.
    ///
    /// # Safety
    ///
    /// `F` must match the native signature of `name`.
    pub(crate) unsafe fn symbol<F: Copy>(&self, name: &str) -> RandResult<F> {
        Ok(unsafe { self.lib.symbol(name)? })
    }
}
