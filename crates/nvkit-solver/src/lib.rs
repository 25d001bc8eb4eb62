//! # nvkit-solver
//!
//! Safe wrappers over the cuSOLVER sparse API.
//!
//! - [`Cusolver`], [`Cusparse`] - the loaded libraries
//! - [`SparseSolver`] - an owned `cusolverSpHandle_t` with the CSR routines
//! - [`MatrixDescriptor`] - an owned cuSPARSE matrix descriptor
//! - [`CsrPattern`], [`CsrHost`], [`CsrDevice`] - borrowed CSR views
//! - [`SolverScalar`] - `f32`, `f64`, [`Complex32`](nvkit_core::Complex32), [`Complex64`](nvkit_core::Complex64)
//!
//! ```ignore
//! use nvkit_solver::{Cusolver, Cusparse, CsrHost, MatrixDescriptor, Reorder, SparseSolver};
//!
//! let solver = SparseSolver::new(&Cusolver::load()?)?;
//! let descr = MatrixDescriptor::new(&Cusparse::load()?)?;
//! let a = CsrHost::new(&descr, 2, 2, &[0, 1, 2], &[0, 1], &[2.0f64, 4.0]);
//! let mut x = [0.0; 2];
//! let singular = solver.csr_lsv_qr_host(&a, &[2.0, 8.0], 1e-12, Reorder::None, &mut x)?;
//! assert!(singular.is_none());
//! ```

#![warn(missing_docs)]

pub mod csr;
pub mod descriptor;
pub mod error;
pub mod library;
pub mod scalar;
pub mod sparse;
pub mod status;
pub mod sys;

pub use csr::{CsrDevice, CsrHost, CsrPattern};
pub use descriptor::MatrixDescriptor;
pub use error::{SolverError, SolverResult};
pub use library::{Cusolver, Cusparse, CUSOLVER_LIBRARY, CUSPARSE_LIBRARY};
pub use scalar::SolverScalar;
pub use sparse::{LeastSquares, SparseSolver};
pub use status::{SolverStatus, SparseStatus};
pub use sys::{DiagType, FillMode, IndexBase, MatrixType, RawMatDescr, RawSolver, Reorder, METIS_NOPTIONS};
