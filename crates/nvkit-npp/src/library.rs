//! The NPP library set.
//!
//! NPP ships as a core library plus one library per function group. [`Npp`]
//! holds whichever of them loaded and resolves a symbol from the first
//! library that exports it.

use std::sync::{Arc, OnceLock};

use nvkit_core::{check, load_shared, LibrarySpec, NativeLibrary, Stream};
use tracing::debug;

use crate::error::{NppError, NppResult};
use crate::status::NppStatus;
use crate::sys::{FnGetLibVersion, FnGetStream, FnGetStreamContext, FnSetStream, LibraryVersion, StreamContext};

macro_rules! npp_library {
    ($(#[$meta:meta])* $const:ident, $name:literal, $env:literal) => {
        $(#[$meta])*
        pub const $const: LibrarySpec = LibrarySpec {
            name: $name,
            env_var: $env,
            unix: &[concat!("lib", $name, ".so"), concat!("lib", $name, ".so.12"), concat!("lib", $name, ".so.11")],
            windows: &[concat!($name, "64_12.dll"), concat!($name, "64_11.dll")],
        };
    };
}

npp_library!(
    /// NPP core: version, stream, context.
    NPPC_LIBRARY, "nppc", "NVKIT_NPPC_PATH"
);
npp_library!(
    /// Image arithmetic and logic.
    NPPIAL_LIBRARY, "nppial", "NVKIT_NPPIAL_PATH"
);
npp_library!(
    /// Image data exchange and initialization.
    NPPIDEI_LIBRARY, "nppidei", "NVKIT_NPPIDEI_PATH"
);
npp_library!(
    /// Image geometry.
    NPPIG_LIBRARY, "nppig", "NVKIT_NPPIG_PATH"
);
npp_library!(
    /// Image filtering.
    NPPIF_LIBRARY, "nppif", "NVKIT_NPPIF_PATH"
);
npp_library!(
    /// Image statistics.
    NPPIST_LIBRARY, "nppist", "NVKIT_NPPIST_PATH"
);
npp_library!(
    /// Image color conversion.
    NPPICC_LIBRARY, "nppicc", "NVKIT_NPPICC_PATH"
);
npp_library!(
    /// Signal processing, used for scratch buffers.
    NPPS_LIBRARY, "npps", "NVKIT_NPPS_PATH"
);

/// Every library in the set, core first.
pub const NPP_LIBRARIES: [LibrarySpec; 8] = [
    NPPC_LIBRARY,
    NPPIAL_LIBRARY,
    NPPIDEI_LIBRARY,
    NPPIG_LIBRARY,
    NPPIF_LIBRARY,
    NPPIST_LIBRARY,
    NPPICC_LIBRARY,
    NPPS_LIBRARY,
];

static LOADED: [OnceLock<Arc<NativeLibrary>>; 8] = [const { OnceLock::new() }; 8];

/// A loaded NPP library set.
#[derive(Debug, Clone)]
pub struct Npp {
    libs: Arc<[Arc<NativeLibrary>]>,
}

impl Npp {
    /// Opens the NPP libraries once per process.
    ///
    /// `nppc` is required. A missing group library is logged and skipped;
    /// its entry points then fail with `SymbolNotFound`.
    pub fn load() -> NppResult<Self> {
        let mut libs = Vec::with_capacity(NPP_LIBRARIES.len());
        for (spec, cell) in NPP_LIBRARIES.iter().zip(&LOADED) {
            match load_shared(cell, spec) {
                Ok(lib) => libs.push(lib),
                Err(err) if spec.name == NPPC_LIBRARY.name => return Err(err.into()),
                Err(err) => debug!(library = spec.name, error = %err, "npp group library unavailable"),
            }
        }
        Ok(Self { libs: libs.into() })
    }

    /// Uses already opened or table-backed libraries, searched in order.
    pub fn from_libraries<I>(libs: I) -> Self
    where
        I: IntoIterator<Item = Arc<NativeLibrary>>,
    {
        Self { libs: libs.into_iter().collect() }
    }

    /// The libraries in search order.
    pub fn libraries(&self) -> &[Arc<NativeLibrary>] {
        &self.libs
    }

    /// `nppGetLibVersion`.
    pub fn version(&self) -> NppResult<LibraryVersion> {
        let f: FnGetLibVersion = unsafe { self.symbol("nppGetLibVersion")? };
        let version = unsafe { f() };
        if version.is_null() {
            return Err(NppError::InvalidArgument("nppGetLibVersion returned null".into()));
        }
        // SAFETY: NPP returns a pointer to static storage.
        Ok(unsafe { *version })
    }

    /// `nppSetStream`: the stream used by non-`_Ctx` entry points.
    pub fn set_stream(&self, stream: Stream) -> NppResult<()> {
        let f: FnSetStream = unsafe { self.symbol("nppSetStream")? };
        check::<NppStatus>("nppSetStream", unsafe { f(stream) })?;
        Ok(())
    }

    /// `nppGetStream`.
    pub fn stream(&self) -> NppResult<Stream> {
        let f: FnGetStream = unsafe { self.symbol("nppGetStream")? };
        Ok(unsafe { f() })
    }

    /// `nppGetStreamContext`: the current stream with its device properties.
    pub fn stream_context(&self) -> NppResult<StreamContext> {
        let f: FnGetStreamContext = unsafe { self.symbol("nppGetStreamContext")? };
        let mut ctx = StreamContext::default();
        check::<NppStatus>("nppGetStreamContext", unsafe { f(&mut ctx) })?;
        Ok(ctx)
    }

    /// Resolves `name` from the first library exporting it.
    ///
    /// # Safety
    ///
    /// `F` must match the symbol's native signature.
    pub(crate) unsafe fn symbol<F: Copy>(&self, name: &str) -> NppResult<F> {
        for lib in self.libs.iter() {
            if lib.contains(name) {
                return Ok(unsafe { lib.symbol(name)? });
            }
        }
        Err(nvkit_core::Error::SymbolNotFound { library: "npp", symbol: name.to_owned() }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_names() {
        assert!(NPPIG_LIBRARY.unix.contains(&"libnppig.so.12"));
        assert!(NPPS_LIBRARY.windows.contains(&"npps64_12.dll"));
        assert_eq!(NPP_LIBRARIES[0].name, "nppc");
        assert_eq!(NPPICC_LIBRARY.env_var, "NVKIT_NPPICC_PATH");
    }

    #[test]
    fn test_missing_symbol_names_npp() {
        let npp = Npp::from_libraries([Arc::new(NativeLibrary::from_table("nppc", Vec::<(String, *const ())>::new()))]);
        let err = npp.stream().unwrap_err();
        assert!(matches!(
            err,
            NppError::Core(nvkit_core::Error::SymbolNotFound { library: "npp", ref symbol }) if symbol == "nppGetStream"
        ));
    }
}
