//! cuSOLVER and cuSPARSE library handles.

use std::ffi::c_int;
use std::sync::{Arc, OnceLock};

use nvkit_core::{check, load_shared, LibrarySpec, NativeLibrary};

use crate::error::SolverResult;
use crate::status::{SolverStatus, SparseStatus};
use crate::sys::{FnGetProperty, FnGetVersion};

/// Where to find cuSOLVER.
pub const CUSOLVER_LIBRARY: LibrarySpec = LibrarySpec {
    name: "cusolver",
    env_var: "NVKIT_CUSOLVER_PATH",
    unix: &["libcusolver.so", "libcusolver.so.11", "libcusolver.so.10"],
    windows: &["cusolver64_11.dll", "cusolver64_10.dll"],
};

/// Where to find cuSPARSE.
pub const CUSPARSE_LIBRARY: LibrarySpec = LibrarySpec {
    name: "cusparse",
    env_var: "NVKIT_CUSPARSE_PATH",
    unix: &["libcusparse.so", "libcusparse.so.12", "libcusparse.so.11"],
    windows: &["cusparse64_12.dll", "cusparse64_11.dll"],
};

static CUSOLVER: OnceLock<Arc<NativeLibrary>> = OnceLock::new();
static CUSPARSE: OnceLock<Arc<NativeLibrary>> = OnceLock::new();

/// A loaded cuSOLVER library.
#[derive(Debug, Clone)]
pub struct Cusolver {
    lib: Arc<NativeLibrary>,
}

impl Cusolver {
    /// Opens cuSOLVER once per process.
    pub fn load() -> SolverResult<Self> {
        Ok(Self { lib: load_shared(&CUSOLVER, &CUSOLVER_LIBRARY)? })
    }

    /// Uses an already opened or table-backed library.
    pub fn from_library(lib: Arc<NativeLibrary>) -> Self {
        Self { lib }
    }

    /// The underlying symbol set.
    pub fn library(&self) -> &Arc<NativeLibrary> {
        &self.lib
    }

    /// `cusolverGetVersion`.
    pub fn version(&self) -> SolverResult<i32> {
        let f: FnGetVersion = unsafe { self.symbol("cusolverGetVersion")? };
        let mut version: c_int = 0;
        check::<SolverStatus>("cusolverGetVersion", unsafe { f(&mut version) })?;
        Ok(version)
    }

    pub(crate) unsafe fn symbol<F: Copy>(&self, name: &str) -> SolverResult<F> {
        Ok(unsafe { self.lib.symbol(name)? })
    }
}

/// A loaded cuSPARSE library.
#[derive(Debug, Clone)]
pub struct Cusparse {
    lib: Arc<NativeLibrary>,
}

impl Cusparse {
    /// Opens cuSPARSE once per process.
    pub fn load() -> SolverResult<Self> {
        Ok(Self { lib: load_shared(&CUSPARSE, &CUSPARSE_LIBRARY)? })
    }

    /// Uses an already opened or table-backed library.
    pub fn from_library(lib: Arc<NativeLibrary>) -> Self {
        Self { lib }
    }

    /// The underlying symbol set.
    pub fn library(&self) -> &Arc<NativeLibrary> {
        &self.lib
    }

    /// `(major, minor, patch)` from `cusparseGetProperty`.
    pub fn version(&self) -> SolverResult<(i32, i32, i32)> {
        let f: FnGetProperty = unsafe { self.symbol("cusparseGetProperty")? };
        let mut parts = [0 as c_int; 3];
        for (property, value) in parts.iter_mut().enumerate() {
            check::<SparseStatus>("cusparseGetProperty", unsafe { f(property as c_int, value) })?;
        }
        Ok((parts[0], parts[1], parts[2]))
    }

    pub(crate) unsafe fn symbol<F: Copy>(&self, name: &str) -> SolverResult<F> {
        Ok(unsafe { self.lib.symbol(name)? })
    }
}
