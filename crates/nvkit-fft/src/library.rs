//! cuFFT library handle.

use std::ffi::c_int;
use std::sync::{Arc, OnceLock};

use nvkit_core::{check, load_shared, LibrarySpec, NativeLibrary};

use crate::error::FftResult;
use crate::status::FftStatus;
use crate::sys::FnGetVersion;

/// Where to find cuFFT.
pub const CUFFT_LIBRARY: LibrarySpec = LibrarySpec {
    name: "cufft",
    env_var: "NVKIT_CUFFT_PATH",
    unix: &["libcufft.so", "libcufft.so.12", "libcufft.so.11", "libcufft.so.10"],
    windows: &["cufft64_12.dll", "cufft64_11.dll", "cufft64_10.dll"],
};

static CUFFT: OnceLock<Arc<NativeLibrary>> = OnceLock::new();

/// A loaded cuFFT library.
///
/// Cheap to clone. Plans keep a clone so the library outlives them.
#[derive(Debug, Clone)]
pub struct Cufft {
    lib: Arc<NativeLibrary>,
}

impl Cufft {
    /// Opens cuFFT once per process.
    pub fn load() -> FftResult<Self> {
        Ok(Self { lib: load_shared(&CUFFT, &CUFFT_LIBRARY)? })
    }

    /// Uses an already opened or table-backed library.
    pub fn from_library(lib: Arc<NativeLibrary>) -> Self {
        Self { lib }
    }

    /// The underlying symbol set.
    pub fn library(&self) -> &Arc<NativeLibrary> {
        &self.lib
    }

    /// `cufftGetVersion`.
    pub fn version(&self) -> FftResult<i32> {
        let f: FnGetVersion = unsafe { self.symbol("cufftGetVersion")? };
        let mut version: c_int = 0;
        check::<FftStatus>("cufftGetVersion", unsafe { f(&mut version) })?;
        Ok(version)
    }

    /// Resolves a cuFFT entry point.
    ///
    /// # Safety
    ///
    /// `F` must match the native signature of `name`.
    pub(crate) unsafe fn symbol<F: Copy>(&self, name: &str) -> FftResult<F> {
        Ok(unsafe { self.lib.symbol(name)? })
    }
}
