//! cuSPARSE matrix descriptors.
//!
//! A descriptor tells cuSOLVER how to read a CSR matrix: its structural type,
//! which triangle is stored, whether the diagonal is implicit and the index
//! base. A fresh descriptor is general, lower, non-unit and zero-based.

use std::ptr;

use nvkit_core::{check, release_on_drop, Handle, Lifecycle, NativeResource};

use crate::error::{SolverError, SolverResult};
use crate::library::Cusparse;
use crate::status::SparseStatus;
use crate::sys::*;

/// An owned `cusparseMatDescr_t`.
#[derive(Debug)]
pub struct MatrixDescriptor {
    cusparse: Cusparse,
    handle: Handle<RawMatDescr>,
}

impl MatrixDescriptor {
    /// `cusparseCreateMatDescr`.
    pub fn new(cusparse: &Cusparse) -> SolverResult<Self> {
        let f: FnCreateMatDescr = unsafe { cusparse.symbol("cusparseCreateMatDescr")? };
        let mut raw = RawMatDescr(ptr::null_mut());
        check::<SparseStatus>("cusparseCreateMatDescr", unsafe { f(&mut raw) })?;
        Ok(Self { cusparse: cusparse.clone(), handle: Handle::new("cusparse matrix descriptor", raw) })
    }

    fn set(&mut self, name: &str, value: i32) -> SolverResult<()> {
        let raw = self.handle.get()?;
        let f: FnSetMatEnum = unsafe { self.cusparse.symbol(name)? };
        check::<SparseStatus>(name, unsafe { f(raw, value) })?;
        Ok(())
    }

    fn get(&self, name: &str) -> SolverResult<i32> {
        let raw = self.handle.get()?;
        let f: FnGetMatEnum = unsafe { self.cusparse.symbol(name)? };
        Ok(unsafe { f(raw) })
    }

    /// `cusparseSetMatType`.
    pub fn set_matrix_type(&mut self, ty: MatrixType) -> SolverResult<()> {
        self.set("cusparseSetMatType", ty.raw())
    }

    /// `cusparseGetMatType`.
    pub fn matrix_type(&self) -> SolverResult<MatrixType> {
        let value = self.get("cusparseGetMatType")?;
        MatrixType::from_raw(value).ok_or(SolverError::UnknownValue { what: "matrix type", value })
    }

    /// `cusparseSetMatFillMode`.
    pub fn set_fill_mode(&mut self, mode: FillMode) -> SolverResult<()> {
        self.set("cusparseSetMatFillMode", mode.raw())
    }

    /// `cusparseGetMatFillMode`.
    pub fn fill_mode(&self) -> SolverResult<FillMode> {
        let value = self.get("cusparseGetMatFillMode")?;
        FillMode::from_raw(value).ok_or(SolverError::UnknownValue { what: "fill mode", value })
    }

    /// `cusparseSetMatDiagType`.
    pub fn set_diag_type(&mut self, diag: DiagType) -> SolverResult<()> {
        self.set("cusparseSetMatDiagType", diag.raw())
    }

    /// `cusparseGetMatDiagType`.
    pub fn diag_type(&self) -> SolverResult<DiagType> {
        let value = self.get("cusparseGetMatDiagType")?;
        DiagType::from_raw(value).ok_or(SolverError::UnknownValue { what: "diagonal type", value })
    }

    /// `cusparseSetMatIndexBase`.
    pub fn set_index_base(&mut self, base: IndexBase) -> SolverResult<()> {
        self.set("cusparseSetMatIndexBase", base.raw())
    }

    /// `cusparseGetMatIndexBase`.
    pub fn index_base(&self) -> SolverResult<IndexBase> {
        let value = self.get("cusparseGetMatIndexBase")?;
        IndexBase::from_raw(value).ok_or(SolverError::UnknownValue { what: "index base", value })
    }

    /// Raw `cusparseMatDescr_t`.
    pub fn raw(&self) -> SolverResult<RawMatDescr> {
        Ok(self.handle.get()?)
    }

    /// Lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    /// `cusparseDestroyMatDescr`. Further calls are no-ops.
    pub fn release(&mut self) -> SolverResult<()> {
        if !self.handle.is_live() {
            return Ok(());
        }
        let f: FnDestroyMatDescr = unsafe { self.cusparse.symbol("cusparseDestroyMatDescr")? };
        let Some(raw) = self.handle.take() else {
            return Ok(());
        };
        check::<SparseStatus>("cusparseDestroyMatDescr", unsafe { f(raw) })?;
        Ok(())
    }
}

impl NativeResource for MatrixDescriptor {
    type Error = SolverError;

    fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    fn release(&mut self) -> SolverResult<()> {
        MatrixDescriptor::release(self)
    }
}

impl Drop for MatrixDescriptor {
    fn drop(&mut self) {
        release_on_drop(self);
    }
}
