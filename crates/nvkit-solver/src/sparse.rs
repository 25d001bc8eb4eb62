//! cuSOLVER sparse handle and routines.
//!
//! [`SparseSolver`] owns one `cusolverSpHandle_t`. Each routine is one call to
//! `cusolverSp<P><op>` where `<P>` comes from [`SolverScalar::PREFIX`].
//! `*_host` routines read and write host slices; the others take device
//! buffers and run on the handle's stream.
//!
//! Singularity outputs use `None` where cuSOLVER reports `-1` (the matrix is
//! invertible under the given tolerance).

use std::ffi::c_int;
use std::ptr;

use bytemuck::Zeroable;
use nvkit_core::{check, release_after_error, release_on_drop, DeviceSlice, Handle, Lifecycle, NativeResource, Stream};
use tracing::debug;

use crate::csr::{to_i32, CsrDevice, CsrHost, CsrPattern};
use crate::descriptor::MatrixDescriptor;
use crate::error::{need, SolverError, SolverResult};
use crate::library::Cusolver;
use crate::scalar::{symbol, SolverScalar};
use crate::status::SolverStatus;
use crate::sys::*;

/// Result of a least-squares solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquares<R> {
    /// Numerical rank of `A`.
    pub rank: i32,
    /// `||A x - b||`.
    pub min_norm: R,
}

fn singularity(raw: c_int) -> Option<i32> {
    (raw >= 0).then_some(raw)
}

/// An owned cuSOLVER sparse handle.
#[derive(Debug)]
pub struct SparseSolver {
    cusolver: Cusolver,
    handle: Handle<RawSolver>,
}

impl SparseSolver {
    /// `cusolverSpCreate`.
    pub fn new(cusolver: &Cusolver) -> SolverResult<Self> {
        let f: FnCreate = unsafe { cusolver.symbol("cusolverSpCreate")? };
        let mut raw = RawSolver(ptr::null_mut());
        check::<SolverStatus>("cusolverSpCreate", unsafe { f(&mut raw) })?;
        Ok(Self { cusolver: cusolver.clone(), handle: Handle::new("cusolver sparse handle", raw) })
    }

    /// Creates a handle bound to `stream`.
    pub fn with_stream(cusolver: &Cusolver, stream: Stream) -> SolverResult<Self> {
        let mut solver = Self::new(cusolver)?;
        if let Err(err) = solver.set_stream(stream) {
            release_after_error(&mut solver);
            return Err(err);
        }
        Ok(solver)
    }

    /// `cusolverSpSetStream`.
    pub fn set_stream(&mut self, stream: Stream) -> SolverResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetStream = unsafe { self.cusolver.symbol("cusolverSpSetStream")? };
        check::<SolverStatus>("cusolverSpSetStream", unsafe { f(raw, stream) })?;
        Ok(())
    }

    /// `cusolverSpGetStream`.
    pub fn stream(&self) -> SolverResult<Stream> {
        let raw = self.handle.get()?;
        let f: FnGetStream = unsafe { self.cusolver.symbol("cusolverSpGetStream")? };
        let mut stream = Stream::DEFAULT;
        check::<SolverStatus>("cusolverSpGetStream", unsafe { f(raw, &mut stream) })?;
        Ok(stream)
    }

    fn sym<F: Copy>(&self, name: &str) -> SolverResult<(RawSolver, F)> {
        let raw = self.handle.get()?;
        let f = unsafe { self.cusolver.symbol(name)? };
        Ok((raw, f))
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// `cusolverSpXcsrissymHost`: true if the pattern is symmetric.
    pub fn csr_is_symmetric_host(&self, a: &CsrPattern<'_>) -> SolverResult<bool> {
        a.validate()?;
        let m = a.rows;
        let nnz = a.nnz()?;
        let descr = a.descr.raw()?;
        let (raw, f) = self.sym::<FnCsrIsSym>("cusolverSpXcsrissymHost")?;
        let start = a.row_ptr.as_ptr();
        // row ends are the next row's start
        let end = a.row_ptr[1..].as_ptr();
        let mut issym: c_int = 0;
        let status = unsafe { f(raw, m, nnz, descr, start, end, a.col_ind.as_ptr(), &mut issym) };
        check::<SolverStatus>("cusolverSpXcsrissymHost", status)?;
        Ok(issym != 0)
    }

    // =========================================================================
    // Linear solvers
    // =========================================================================

    fn lsv_host<T: SolverScalar>(
        &self,
        op: &str,
        a: &CsrHost<'_, T>,
        b: &[T],
        tol: T::Real,
        reorder: Reorder,
        x: &mut [T],
    ) -> SolverResult<Option<i32>> {
        a.validate()?;
        let n = a.pattern.rows;
        need("b", n as usize, b.len())?;
        need("x", n as usize, x.len())?;
        let nnz = a.pattern.nnz()?;
        let descr = a.pattern.descr.raw()?;
        let name = symbol::<T>(op);
        let (raw, f) = self.sym::<FnCsrLsv<T, T::Real>>(&name)?;
        let mut sing: c_int = -1;
        let status = unsafe {
            f(
                raw,
                n,
                nnz,
                descr,
                a.values.as_ptr(),
                a.pattern.row_ptr.as_ptr(),
                a.pattern.col_ind.as_ptr(),
                b.as_ptr(),
                tol,
                reorder.raw(),
                x.as_mut_ptr(),
                &mut sing,
            )
        };
        check::<SolverStatus>(&name, status)?;
        Ok(singularity(sing))
    }

    fn lsv_device<T: SolverScalar>(
        &self,
        op: &str,
        a: &CsrDevice<'_, T>,
        b: DeviceSlice<T>,
        tol: T::Real,
        reorder: Reorder,
        x: DeviceSlice<T>,
    ) -> SolverResult<Option<i32>> {
        a.validate()?;
        let n = a.rows;
        need("b", n as usize, b.len())?;
        need("x", n as usize, x.len())?;
        let nnz = a.nnz()?;
        let descr = a.descr.raw()?;
        let name = symbol::<T>(op);
        let (raw, f) = self.sym::<FnCsrLsv<T, T::Real>>(&name)?;
        let mut sing: c_int = -1;
        let status = unsafe {
            f(
                raw,
                n,
                nnz,
                descr,
                a.values.as_raw(),
                a.row_ptr.as_raw(),
                a.col_ind.as_raw(),
                b.as_raw(),
                tol,
                reorder.raw(),
                x.as_raw(),
                &mut sing,
            )
        };
        check::<SolverStatus>(&name, status)?;
        Ok(singularity(sing))
    }

    /// Solves `A x = b` by LU with partial pivoting on the host (`csrlsvluHost`).
    pub fn csr_lsv_lu_host<T: SolverScalar>(
        &self,
        a: &CsrHost<'_, T>,
        b: &[T],
        tol: T::Real,
        reorder: Reorder,
        x: &mut [T],
    ) -> SolverResult<Option<i32>> {
        self.lsv_host("csrlsvluHost", a, b, tol, reorder, x)
    }

    /// Solves `A x = b` by QR on the device (`csrlsvqr`).
    pub fn csr_lsv_qr<T: SolverScalar>(
        &self,
        a: &CsrDevice<'_, T>,
        b: DeviceSlice<T>,
        tol: T::Real,
        reorder: Reorder,
        x: DeviceSlice<T>,
    ) -> SolverResult<Option<i32>> {
        self.lsv_device("csrlsvqr", a, b, tol, reorder, x)
    }

    /// Solves `A x = b` by QR on the host (`csrlsvqrHost`).
    pub fn csr_lsv_qr_host<T: SolverScalar>(
        &self,
        a: &CsrHost<'_, T>,
        b: &[T],
        tol: T::Real,
        reorder: Reorder,
        x: &mut [T],
    ) -> SolverResult<Option<i32>> {
        self.lsv_host("csrlsvqrHost", a, b, tol, reorder, x)
    }

    /// Solves `A x = b` by Cholesky on the device (`csrlsvchol`).
    ///
    /// `A` must be symmetric positive definite; only the lower triangle is read.
    pub fn csr_lsv_chol<T: SolverScalar>(
        &self,
        a: &CsrDevice<'_, T>,
        b: DeviceSlice<T>,
        tol: T::Real,
        reorder: Reorder,
        x: DeviceSlice<T>,
    ) -> SolverResult<Option<i32>> {
        self.lsv_device("csrlsvchol", a, b, tol, reorder, x)
    }

    /// Solves `A x = b` by Cholesky on the host (`csrlsvcholHost`).
    pub fn csr_lsv_chol_host<T: SolverScalar>(
        &self,
        a: &CsrHost<'_, T>,
        b: &[T],
        tol: T::Real,
        reorder: Reorder,
        x: &mut [T],
    ) -> SolverResult<Option<i32>> {
        self.lsv_host("csrlsvcholHost", a, b, tol, reorder, x)
    }

    /// Least-squares `min ||A x - b||` by QR on the host (`csrlsqvqrHost`).
    ///
    /// `x` and `p` receive `cols` entries; `p` is the column permutation.
    pub fn csr_lsq_v_qr_host<T: SolverScalar>(
        &self,
        a: &CsrHost<'_, T>,
        b: &[T],
        tol: T::Real,
        x: &mut [T],
        p: &mut [i32],
    ) -> SolverResult<LeastSquares<T::Real>> {
        a.validate()?;
        let (m, n) = (a.pattern.rows, a.pattern.cols);
        need("b", m as usize, b.len())?;
        need("x", n as usize, x.len())?;
        need("p", n as usize, p.len())?;
        let nnz = a.pattern.nnz()?;
        let descr = a.pattern.descr.raw()?;
        let name = symbol::<T>("csrlsqvqrHost");
        let (raw, f) = self.sym::<FnCsrLsq<T, T::Real>>(&name)?;
        let mut rank: c_int = 0;
        let mut min_norm = T::Real::default();
        let status = unsafe {
            f(
                raw,
                m,
                n,
                nnz,
                descr,
                a.values.as_ptr(),
                a.pattern.row_ptr.as_ptr(),
                a.pattern.col_ind.as_ptr(),
                b.as_ptr(),
                tol,
                &mut rank,
                x.as_mut_ptr(),
                p.as_mut_ptr(),
                &mut min_norm,
            )
        };
        check::<SolverStatus>(&name, status)?;
        Ok(LeastSquares { rank, min_norm })
    }

    // =========================================================================
    // Eigenvalues
    // =========================================================================

    /// Shift-inverse power iteration on the host (`csreigvsiHost`).
    ///
    /// Returns the eigenvalue closest to `mu0`; `x` receives its eigenvector.
    #[allow(clippy::too_many_arguments)]
    pub fn csr_eig_vsi_host<T: SolverScalar>(
        &self,
        a: &CsrHost<'_, T>,
        mu0: T,
        x0: &[T],
        max_iterations: i32,
        eps: T::Real,
        x: &mut [T],
    ) -> SolverResult<T> {
        a.validate()?;
        let m = a.pattern.rows;
        need("x0", m as usize, x0.len())?;
        need("x", m as usize, x.len())?;
        let nnz = a.pattern.nnz()?;
        let descr = a.pattern.descr.raw()?;
        let name = symbol::<T>("csreigvsiHost");
        let (raw, f) = self.sym::<FnCsrEigVsi<T, T::Real>>(&name)?;
        let mut mu = T::zeroed();
        let status = unsafe {
            f(
                raw,
                m,
                nnz,
                descr,
                a.values.as_ptr(),
                a.pattern.row_ptr.as_ptr(),
                a.pattern.col_ind.as_ptr(),
                mu0,
                x0.as_ptr(),
                max_iterations,
                eps,
                &mut mu,
                x.as_mut_ptr(),
            )
        };
        check::<SolverStatus>(&name, status)?;
        Ok(mu)
    }

    /// Shift-inverse power iteration on the device (`csreigvsi`).
    ///
    /// `mu` is a one-element device buffer receiving the eigenvalue.
    #[allow(clippy::too_many_arguments)]
    pub fn csr_eig_vsi<T: SolverScalar>(
        &self,
        a: &CsrDevice<'_, T>,
        mu0: T,
        x0: DeviceSlice<T>,
        max_iterations: i32,
        eps: T::Real,
        mu: DeviceSlice<T>,
        x: DeviceSlice<T>,
    ) -> SolverResult<()> {
        a.validate()?;
        let m = a.rows;
        need("x0", m as usize, x0.len())?;
        need("x", m as usize, x.len())?;
        need("mu", 1, mu.len())?;
        let nnz = a.nnz()?;
        let descr = a.descr.raw()?;
        let name = symbol::<T>("csreigvsi");
        let (raw, f) = self.sym::<FnCsrEigVsi<T, T::Real>>(&name)?;
        let status = unsafe {
            f(
                raw,
                m,
                nnz,
                descr,
                a.values.as_raw(),
                a.row_ptr.as_raw(),
                a.col_ind.as_raw(),
                mu0,
                x0.as_raw(),
                max_iterations,
                eps,
                mu.as_raw(),
                x.as_raw(),
            )
        };
        check::<SolverStatus>(&name, status)?;
        Ok(())
    }

    /// Counts eigenvalues inside the box spanned by two complex corners (`csreigsHost`).
    pub fn csr_eigs_host<T: SolverScalar>(
        &self,
        a: &CsrHost<'_, T>,
        left_bottom: T::Complex,
        right_upper: T::Complex,
    ) -> SolverResult<i32> {
        a.validate()?;
        let nnz = a.pattern.nnz()?;
        let descr = a.pattern.descr.raw()?;
        let name = symbol::<T>("csreigsHost");
        let (raw, f) = self.sym::<FnCsrEigs<T, T::Complex>>(&name)?;
        let mut num_eigs: c_int = 0;
        let status = unsafe {
            f(
                raw,
                a.pattern.rows,
                nnz,
                descr,
                a.values.as_ptr(),
                a.pattern.row_ptr.as_ptr(),
                a.pattern.col_ind.as_ptr(),
                left_bottom,
                right_upper,
                &mut num_eigs,
            )
        };
        check::<SolverStatus>(&name, status)?;
        Ok(num_eigs)
    }

    // =========================================================================
    // Reordering
    // =========================================================================

    fn sym_perm(&self, name: &str, a: &CsrPattern<'_>, p: &mut [i32]) -> SolverResult<()> {
        a.validate()?;
        need("p", a.rows as usize, p.len())?;
        let nnz = a.nnz()?;
        let descr = a.descr.raw()?;
        let (raw, f) = self.sym::<FnCsrSymPerm>(name)?;
        let status =
            unsafe { f(raw, a.rows, nnz, descr, a.row_ptr.as_ptr(), a.col_ind.as_ptr(), p.as_mut_ptr()) };
        check::<SolverStatus>(name, status)?;
        Ok(())
    }

    /// Symmetric reverse Cuthill-McKee permutation (`XcsrsymrcmHost`).
    pub fn csr_sym_rcm_host(&self, a: &CsrPattern<'_>, p: &mut [i32]) -> SolverResult<()> {
        self.sym_perm("cusolverSpXcsrsymrcmHost", a, p)
    }

    /// Symmetric minimum degree permutation by quotient graph (`XcsrsymmdqHost`).
    pub fn csr_sym_mdq_host(&self, a: &CsrPattern<'_>, p: &mut [i32]) -> SolverResult<()> {
        self.sym_perm("cusolverSpXcsrsymmdqHost", a, p)
    }

    /// Symmetric approximate minimum degree permutation (`XcsrsymamdHost`).
    pub fn csr_sym_amd_host(&self, a: &CsrPattern<'_>, p: &mut [i32]) -> SolverResult<()> {
        self.sym_perm("cusolverSpXcsrsymamdHost", a, p)
    }

    /// METIS nested dissection permutation (`XcsrmetisndHost`).
    ///
    /// `options` holds [`METIS_NOPTIONS`] entries, or `None` for defaults.
    pub fn csr_metis_nd_host(&self, a: &CsrPattern<'_>, options: Option<&[i64]>, p: &mut [i32]) -> SolverResult<()> {
        a.validate()?;
        need("p", a.rows as usize, p.len())?;
        if let Some(options) = options {
            need("options", METIS_NOPTIONS, options.len())?;
        }
        let nnz = a.nnz()?;
        let descr = a.descr.raw()?;
        let (raw, f) = self.sym::<FnCsrMetisNd>("cusolverSpXcsrmetisndHost")?;
        let options = options.map_or(ptr::null(), |o| o.as_ptr());
        let status = unsafe {
            f(raw, a.rows, nnz, descr, a.row_ptr.as_ptr(), a.col_ind.as_ptr(), options, p.as_mut_ptr())
        };
        check::<SolverStatus>("cusolverSpXcsrmetisndHost", status)?;
        Ok(())
    }

    /// Host buffer size for [`csr_perm_host`](Self::csr_perm_host) (`Xcsrperm_bufferSizeHost`).
    pub fn csr_perm_buffer_size_host(&self, a: &CsrPattern<'_>, p: &[i32], q: &[i32]) -> SolverResult<usize> {
        a.validate()?;
        need("p", a.rows as usize, p.len())?;
        need("q", a.cols as usize, q.len())?;
        let nnz = a.nnz()?;
        let descr = a.descr.raw()?;
        let (raw, f) = self.sym::<FnCsrPermBufferSize>("cusolverSpXcsrperm_bufferSizeHost")?;
        let mut size = 0usize;
        let status = unsafe {
            f(
                raw,
                a.rows,
                a.cols,
                nnz,
                descr,
                a.row_ptr.as_ptr(),
                a.col_ind.as_ptr(),
                p.as_ptr(),
                q.as_ptr(),
                &mut size,
            )
        };
        check::<SolverStatus>("cusolverSpXcsrperm_bufferSizeHost", status)?;
        Ok(size)
    }

    /// Applies `B = P A Q^T` to the pattern in place (`XcsrpermHost`).
    ///
    /// Queries the scratch size first, then runs the permutation with an
    /// internally allocated buffer. The first `nnz` entries of `map` are
    /// reset to `0..nnz` and permuted alongside the pattern, so afterwards
    /// `map[k]` is the old position of new value `k`.
    #[allow(clippy::too_many_arguments)]
    pub fn csr_perm_host(
        &self,
        descr: &MatrixDescriptor,
        rows: i32,
        cols: i32,
        row_ptr: &mut [i32],
        col_ind: &mut [i32],
        p: &[i32],
        q: &[i32],
        map: &mut [i32],
    ) -> SolverResult<()> {
        let size = {
            let pattern = CsrPattern::new(descr, rows, cols, row_ptr, col_ind);
            self.csr_perm_buffer_size_host(&pattern, p, q)?
        };
        let nnz = to_i32("nnz", col_ind.len())?;
        need("map", col_ind.len(), map.len())?;
        let raw_descr = descr.raw()?;
        let (raw, f) = self.sym::<FnCsrPerm>("cusolverSpXcsrpermHost")?;
        for (k, slot) in map[..col_ind.len()].iter_mut().enumerate() {
            *slot = k as i32;
        }
        debug!(size, "csrperm scratch buffer");
        let mut buffer = vec![0u8; size];
        let status = unsafe {
            f(
                raw,
                rows,
                cols,
                nnz,
                raw_descr,
                row_ptr.as_mut_ptr(),
                col_ind.as_mut_ptr(),
                p.as_ptr(),
                q.as_ptr(),
                map.as_mut_ptr(),
                buffer.as_mut_ptr().cast(),
            )
        };
        check::<SolverStatus>("cusolverSpXcsrpermHost", status)?;
        Ok(())
    }

    /// Zero-free diagonal row permutation (`csrzfdHost`).
    ///
    /// Returns the number of nonzeros on the permuted diagonal.
    pub fn csr_zfd_host<T: SolverScalar>(&self, a: &CsrHost<'_, T>, p: &mut [i32]) -> SolverResult<i32> {
        a.validate()?;
        let n = a.pattern.rows;
        need("p", n as usize, p.len())?;
        let nnz = a.pattern.nnz()?;
        let descr = a.pattern.descr.raw()?;
        let name = symbol::<T>("csrzfdHost");
        let (raw, f) = self.sym::<FnCsrZfd<T>>(&name)?;
        let mut numnz: c_int = 0;
        let status = unsafe {
            f(
                raw,
                n,
                nnz,
                descr,
                a.values.as_ptr(),
                a.pattern.row_ptr.as_ptr(),
                a.pattern.col_ind.as_ptr(),
                p.as_mut_ptr(),
                &mut numnz,
            )
        };
        check::<SolverStatus>(&name, status)?;
        Ok(numnz)
    }

    /// Raw `cusolverSpHandle_t`.
    pub fn raw(&self) -> SolverResult<RawSolver> {
        Ok(self.handle.get()?)
    }

    /// Lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    /// `cusolverSpDestroy`. Further calls are no-ops.
    pub fn release(&mut self) -> SolverResult<()> {
        if !self.handle.is_live() {
            return Ok(());
        }
        let f: FnDestroy = unsafe { self.cusolver.symbol("cusolverSpDestroy")? };
        let Some(raw) = self.handle.take() else {
            return Ok(());
        };
        check::<SolverStatus>("cusolverSpDestroy", unsafe { f(raw) })?;
        Ok(())
    }
}

impl NativeResource for SparseSolver {
    type Error = SolverError;

    fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    fn release(&mut self) -> SolverResult<()> {
        SparseSolver::release(self)
    }
}

impl Drop for SparseSolver {
    fn drop(&mut self) {
        release_on_drop(self);
    }
}
