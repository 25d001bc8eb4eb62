//! Resolvable native symbol sets.
//!
//! A [`NativeLibrary`] is where every binding crate gets its entry points.
//! It has two sources:
//!
//! - **Dynamic**: a shared library opened with [`libloading`] from the
//!   candidates produced by [`LibrarySpec::candidates`].
//! - **Table**: an in-process map from symbol name to function pointer. Used to
//!   embed alternative implementations and to intercept native calls in tests.
//!
//! Symbols are resolved on first use and cached by name, so a wrapper only
//! needs the entry points it actually calls.
//!
//! # Usage
//!
//! ```rust
//! use nvkit_core::NativeLibrary;
//!
//! unsafe extern "C" fn get_version(v: *mut i32) -> i32 {
//!     unsafe { *v = 11_000 };
//!     0
//! }
//!
//! let lib = NativeLibrary::from_table("cufft", [("cufftGetVersion", get_version as *const ())]);
//! let f: unsafe extern "C" fn(*mut i32) -> i32 = unsafe { lib.symbol("cufftGetVersion").unwrap() };
//! let mut v = 0;
//! assert_eq!(unsafe { f(&mut v) }, 0);
//! assert_eq!(v, 11_000);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use libloading::{Library, Symbol};
use tracing::{debug, trace};

use crate::config::LibrarySpec;
use crate::error::{Error, Result};

enum Source {
    Dynamic { library: Library, path: String },
    Table(HashMap<String, usize>),
}

/// A set of native entry points.
pub struct NativeLibrary {
    name: &'static str,
    source: Source,
    cache: Mutex<HashMap<String, usize>>,
}

impl NativeLibrary {
    /// Opens the first loadable candidate for `spec`.
    pub fn open(spec: &LibrarySpec) -> Result<Self> {
        Self::open_candidates(spec.name, &spec.candidates())
    }

    /// Opens the first loadable path among `candidates`.
    pub fn open_candidates(name: &'static str, candidates: &[String]) -> Result<Self> {
        let mut reason = String::from("no candidates");
        for path in candidates {
            // SAFETY: loading runs the library's initialisers. The CUDA toolkit
            // libraries only register their own state.
            match unsafe { Library::new(path) } {
                Ok(library) => {
                    debug!(library = name, path = %path, "loaded native library");
                    return Ok(Self {
                        name,
                        source: Source::Dynamic { library, path: path.clone() },
                        cache: Mutex::new(HashMap::new()),
                    });
                }
                Err(err) => {
                    trace!(library = name, path = %path, error = %err, "candidate rejected");
                    reason = err.to_string();
                }
            }
        }
        Err(Error::LibraryNotFound { library: name, tried: candidates.to_vec(), reason })
    }

    /// Builds a library from an in-process symbol table.
    ///
    /// Each pointer must be an `extern "C"` function whose signature matches
    /// the native entry point of the same name.
    pub fn from_table<I, S>(name: &'static str, symbols: I) -> Self
    where
        I: IntoIterator<Item = (S, *const ())>,
        S: Into<String>,
    {
        let table = symbols.into_iter().map(|(s, f)| (s.into(), f as usize)).collect();
        Self { name, source: Source::Table(table), cache: Mutex::new(HashMap::new()) }
    }

    /// Logical library name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Path the library was loaded from, `None` for table libraries.
    pub fn path(&self) -> Option<&str> {
        match &self.source {
            Source::Dynamic { path, .. } => Some(path),
            Source::Table(_) => None,
        }
    }

    /// True if `symbol` resolves.
    pub fn contains(&self, symbol: &str) -> bool {
        self.address(symbol).is_ok()
    }

    fn address(&self, symbol: &str) -> Result<usize> {
        let mut cache = self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(&addr) = cache.get(symbol) {
            return Ok(addr);
        }

        let addr = match &self.source {
            Source::Table(table) => table.get(symbol).copied(),
            Source::Dynamic { library, .. } => {
                // SAFETY: the symbol is read as an untyped address only.
                let sym: std::result::Result<Symbol<'_, *const ()>, _> =
                    unsafe { library.get(symbol.as_bytes()) };
                sym.ok().map(|s| *s as usize)
            }
        }
        .filter(|&addr| addr != 0)
        .ok_or_else(|| Error::SymbolNotFound { library: self.name, symbol: symbol.to_owned() })?;

        cache.insert(symbol.to_owned(), addr);
        Ok(addr)
    }

    /// Resolves `symbol` as a function pointer of type `F`.
    ///
    /// # Safety
    ///
    /// `F` must be an `unsafe extern "C" fn` type matching the exported
    /// symbol's real signature.
    pub unsafe fn symbol<F: Copy>(&self, symbol: &str) -> Result<F> {
        const { assert!(size_of::<F>() == size_of::<usize>()) };
        let addr = self.address(symbol)?;
        // SAFETY: size checked above, signature guaranteed by the caller.
        Ok(unsafe { std::mem::transmute_copy::<usize, F>(&addr) })
    }
}

impl fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Dynamic { path, .. } => path.as_str(),
            Source::Table(_) => "<table>",
        };
        f.debug_struct("NativeLibrary").field("name", &self.name).field("source", &source).finish()
    }
}

/// Opens `spec` once per process and hands out shared references.
///
/// Failures are not cached, so a later call can succeed after the
/// environment changes.
pub fn load_shared(
    cell: &'static OnceLock<Arc<NativeLibrary>>,
    spec: &LibrarySpec,
) -> Result<Arc<NativeLibrary>> {
    if let Some(lib) = cell.get() {
        return Ok(Arc::clone(lib));
    }
    let lib = Arc::new(NativeLibrary::open(spec)?);
    Ok(Arc::clone(cell.get_or_init(|| lib)))
}
