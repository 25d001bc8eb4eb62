//! Library discovery configuration.
//!
//! Each binding crate describes its shared library with a static
//! [`LibrarySpec`]. [`LibrarySpec::candidates`] turns that description into an
//! ordered list of paths to try, honoring the environment:
//!
//! | variable | effect |
//! |----------|--------|
//! | `NVKIT_<LIB>_PATH` | exact file to load, tried first |
//! | `CUDA_PATH` | toolkit root, searched in `lib64`, `lib`, `bin` |
//! | `CUDA_HOME` | same as `CUDA_PATH`, searched after it |
//!
//! After those, the bare file names are handed to the system loader.

use std::env;
use std::path::PathBuf;

/// Static description of one native library.
#[derive(Debug, Clone, Copy)]
pub struct LibrarySpec {
    /// Logical name, e.g. `cufft`.
    pub name: &'static str,
    /// Override variable, e.g. `NVKIT_CUFFT_PATH`.
    pub env_var: &'static str,
    /// File names on Unix-like systems, in preference order.
    pub unix: &'static [&'static str],
    /// File names on Windows.
    pub windows: &'static [&'static str],
}

/// Toolkit root variables, in search order.
pub const TOOLKIT_ROOT_VARS: [&str; 2] = ["CUDA_PATH", "CUDA_HOME"];

const TOOLKIT_SUBDIRS: [&str; 3] = ["lib64", "lib", "bin"];

impl LibrarySpec {
    /// File names for the running platform.
    pub fn file_names(&self) -> &'static [&'static str] {
        if cfg!(windows) { self.windows } else { self.unix }
    }

    /// Ordered load candidates using the process environment.
    pub fn candidates(&self) -> Vec<String> {
        self.candidates_with(|name| env::var(name).ok())
    }

    /// Ordered load candidates using `lookup` for environment variables.
    pub fn candidates_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut out = Vec::new();

        if let Some(path) = lookup(self.env_var).filter(|p| !p.is_empty()) {
            out.push(path);
        }

        for var in TOOLKIT_ROOT_VARS {
            let Some(root) = lookup(var).filter(|p| !p.is_empty()) else {
                continue;
            };
            for sub in TOOLKIT_SUBDIRS {
                for file in self.file_names() {
                    let path: PathBuf = [root.as_str(), sub, file].iter().collect();
                    out.push(path.to_string_lossy().into_owned());
                }
            }
        }

        out.extend(self.file_names().iter().map(|f| f.to_string()));
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SPEC: LibrarySpec = LibrarySpec {
        name: "cufft",
        env_var: "NVKIT_CUFFT_PATH",
        unix: &["libcufft.so", "libcufft.so.11"],
        windows: &["cufft64_11.dll"],
    };

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_bare_names_without_env() {
        let c = SPEC.candidates_with(lookup(&[]));
        assert_eq!(c.len(), SPEC.file_names().len());
        assert_eq!(c[0], SPEC.file_names()[0]);
    }

    #[test]
    fn test_override_first() {
        let c = SPEC.candidates_with(lookup(&[("NVKIT_CUFFT_PATH", "/opt/x/libcufft.so")]));
        assert_eq!(c[0], "/opt/x/libcufft.so");
    }

    #[test]
    fn test_toolkit_roots_searched_in_order() {
        let c = SPEC.candidates_with(lookup(&[("CUDA_PATH", "/cuda"), ("CUDA_HOME", "/home")]));
        let names = SPEC.file_names().len();
        // 2 roots x 3 subdirs x names, then bare names
        assert_eq!(c.len(), 2 * 3 * names + names);
        assert!(c[0].starts_with("/cuda"));
        assert!(c[3 * names].starts_with("/home"));
    }

    #[test]
    fn test_empty_override_ignored() {
        let c = SPEC.candidates_with(lookup(&[("NVKIT_CUFFT_PATH", "")]));
        assert_eq!(c.len(), SPEC.file_names().len());
    }
}
