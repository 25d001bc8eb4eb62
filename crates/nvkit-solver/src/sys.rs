//! Raw cuSOLVER sparse and cuSPARSE descriptor ABI.

use std::ffi::{c_int, c_void};
use std::fmt;

use nvkit_core::Stream;

/// `cusolverSpHandle_t`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawSolver(pub *mut c_void);

/// `cusparseMatDescr_t`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawMatDescr(pub *mut c_void);

// Opaque library tokens; the owning wrapper serializes their use.
unsafe impl Send for RawSolver {}
unsafe impl Send for RawMatDescr {}
unsafe impl Sync for RawMatDescr {}

impl fmt::Debug for RawSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.0)
    }
}

impl fmt::Debug for RawMatDescr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.0)
    }
}

macro_rules! raw_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )* }
    ) => {
        $(#[$meta])*
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )*
        }

        impl $name {
            /// Raw value.
            pub fn raw(self) -> c_int {
                self as c_int
            }

            /// Maps a raw value.
            pub fn from_raw(raw: c_int) -> Option<Self> {
                match raw {
                    $( $value => Some($name::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

raw_enum! {
    /// `cusparseMatrixType_t`.
    pub enum MatrixType {
        /// General matrix.
        General = 0,
        /// Symmetric matrix, one triangle stored.
        Symmetric = 1,
        /// Hermitian matrix, one triangle stored.
        Hermitian = 2,
        /// Triangular matrix.
        Triangular = 3,
    }
}

raw_enum! {
    /// `cusparseFillMode_t`.
    pub enum FillMode {
        /// Lower triangle stored.
        Lower = 0,
        /// Upper triangle stored.
        Upper = 1,
    }
}

raw_enum! {
    /// `cusparseDiagType_t`.
    pub enum DiagType {
        /// Diagonal stored.
        NonUnit = 0,
        /// Diagonal implicitly one.
        Unit = 1,
    }
}

raw_enum! {
    /// `cusparseIndexBase_t`.
    pub enum IndexBase {
        /// Zero-based indices.
        Zero = 0,
        /// One-based indices.
        One = 1,
    }
}

raw_enum! {
    /// Fill-in reducing reordering applied inside the linear solvers.
    pub enum Reorder {
        /// No reordering.
        None = 0,
        /// Symmetric reverse Cuthill-McKee.
        SymRcm = 1,
        /// Symmetric approximate minimum degree.
        SymAmd = 2,
        /// METIS nested dissection.
        MetisNd = 3,
    }
}

/// Entries in a METIS options array.
pub const METIS_NOPTIONS: usize = 40;

// cuSPARSE descriptor
pub(crate) type FnCreateMatDescr = unsafe extern "C" fn(*mut RawMatDescr) -> c_int;
pub(crate) type FnDestroyMatDescr = unsafe extern "C" fn(RawMatDescr) -> c_int;
pub(crate) type FnSetMatEnum = unsafe extern "C" fn(RawMatDescr, c_int) -> c_int;
pub(crate) type FnGetMatEnum = unsafe extern "C" fn(RawMatDescr) -> c_int;
pub(crate) type FnGetProperty = unsafe extern "C" fn(c_int, *mut c_int) -> c_int;

// cuSOLVER sparse handle
pub(crate) type FnCreate = unsafe extern "C" fn(*mut RawSolver) -> c_int;
pub(crate) type FnDestroy = unsafe extern "C" fn(RawSolver) -> c_int;
pub(crate) type FnSetStream = unsafe extern "C" fn(RawSolver, Stream) -> c_int;
pub(crate) type FnGetStream = unsafe extern "C" fn(RawSolver, *mut Stream) -> c_int;
pub(crate) type FnGetVersion = unsafe extern "C" fn(*mut c_int) -> c_int;

/// `cusolverSpXcsrissymHost`.
pub(crate) type FnCsrIsSym = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    RawMatDescr,
    *const c_int,
    *const c_int,
    *const c_int,
    *mut c_int,
) -> c_int;

/// `cusolverSp?csrlsv{lu,qr,chol}[Host]`.
pub(crate) type FnCsrLsv<T, R> = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    RawMatDescr,
    *const T,
    *const c_int,
    *const c_int,
    *const T,
    R,
    c_int,
    *mut T,
    *mut c_int,
) -> c_int;

/// `cusolverSp?csrlsqvqrHost`.
pub(crate) type FnCsrLsq<T, R> = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    c_int,
    RawMatDescr,
    *const T,
    *const c_int,
    *const c_int,
    *const T,
    R,
    *mut c_int,
    *mut T,
    *mut c_int,
    *mut R,
) -> c_int;

/// `cusolverSp?csreigvsi[Host]`.
pub(crate) type FnCsrEigVsi<T, R> = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    RawMatDescr,
    *const T,
    *const c_int,
    *const c_int,
    T,
    *const T,
    c_int,
    R,
    *mut T,
    *mut T,
) -> c_int;

/// `cusolverSp?csreigsHost`.
pub(crate) type FnCsrEigs<T, C> = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    RawMatDescr,
    *const T,
    *const c_int,
    *const c_int,
    C,
    C,
    *mut c_int,
) -> c_int;

/// `cusolverSpXcsrsym{rcm,mdq,amd}Host`.
pub(crate) type FnCsrSymPerm = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    RawMatDescr,
    *const c_int,
    *const c_int,
    *mut c_int,
) -> c_int;

/// `cusolverSpXcsrmetisndHost`.
pub(crate) type FnCsrMetisNd = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    RawMatDescr,
    *const c_int,
    *const c_int,
    *const i64,
    *mut c_int,
) -> c_int;

/// `cusolverSpXcsrperm_bufferSizeHost`.
pub(crate) type FnCsrPermBufferSize = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    c_int,
    RawMatDescr,
    *const c_int,
    *const c_int,
    *const c_int,
    *const c_int,
    *mut usize,
) -> c_int;

/// `cusolverSpXcsrpermHost`.
pub(crate) type FnCsrPerm = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    c_int,
    RawMatDescr,
    *mut c_int,
    *mut c_int,
    *const c_int,
    *const c_int,
    *mut c_int,
    *mut c_void,
) -> c_int;

/// `cusolverSp?csrzfdHost`.
pub(crate) type FnCsrZfd<T> = unsafe extern "C" fn(
    RawSolver,
    c_int,
    c_int,
    RawMatDescr,
    *const T,
    *const c_int,
    *const c_int,
    *mut c_int,
    *mut c_int,
) -> c_int;
