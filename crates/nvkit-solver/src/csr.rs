//! CSR matrix views passed to the solvers.
//!
//! The views borrow caller memory and carry the sizes cuSOLVER receives.
//! `nnz` is the length of the column index array. [`CsrPattern::validate`]
//! and friends reject arrays shorter than those sizes before any native call.

use nvkit_core::DeviceSlice;

use crate::descriptor::MatrixDescriptor;
use crate::error::{need, SolverError, SolverResult};

pub(crate) fn to_i32(name: &'static str, n: usize) -> SolverResult<i32> {
    i32::try_from(n).map_err(|_| SolverError::InvalidArgument(format!("{name} = {n} exceeds i32")))
}

fn check_dims(rows: i32, cols: i32) -> SolverResult<()> {
    if rows < 0 || cols < 0 {
        return Err(SolverError::InvalidArgument(format!("negative dimensions {rows}x{cols}")));
    }
    Ok(())
}

/// Sparsity structure of a host CSR matrix.
#[derive(Debug, Clone, Copy)]
pub struct CsrPattern<'a> {
    /// Matrix descriptor.
    pub descr: &'a MatrixDescriptor,
    /// Number of rows.
    pub rows: i32,
    /// Number of columns.
    pub cols: i32,
    /// Row offsets, `rows + 1` entries.
    pub row_ptr: &'a [i32],
    /// Column indices, `nnz` entries.
    pub col_ind: &'a [i32],
}

impl<'a> CsrPattern<'a> {
    /// Describes a `rows` x `cols` pattern.
    pub fn new(descr: &'a MatrixDescriptor, rows: i32, cols: i32, row_ptr: &'a [i32], col_ind: &'a [i32]) -> Self {
        Self { descr, rows, cols, row_ptr, col_ind }
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> SolverResult<i32> {
        to_i32("nnz", self.col_ind.len())
    }

    /// Checks array lengths against the dimensions.
    pub fn validate(&self) -> SolverResult<()> {
        check_dims(self.rows, self.cols)?;
        need("row_ptr", self.rows as usize + 1, self.row_ptr.len())?;
        self.nnz()?;
        Ok(())
    }
}

/// A host CSR matrix.
#[derive(Debug, Clone, Copy)]
pub struct CsrHost<'a, T> {
    /// Sparsity structure.
    pub pattern: CsrPattern<'a>,
    /// Nonzero values, `nnz` entries.
    pub values: &'a [T],
}

impl<'a, T> CsrHost<'a, T> {
    /// Describes a `rows` x `cols` matrix.
    pub fn new(
        descr: &'a MatrixDescriptor,
        rows: i32,
        cols: i32,
        row_ptr: &'a [i32],
        col_ind: &'a [i32],
        values: &'a [T],
    ) -> Self {
        Self { pattern: CsrPattern::new(descr, rows, cols, row_ptr, col_ind), values }
    }

    /// Checks array lengths against the dimensions.
    pub fn validate(&self) -> SolverResult<()> {
        self.pattern.validate()?;
        need("values", self.pattern.col_ind.len(), self.values.len())
    }
}

/// A CSR matrix in device memory.
#[derive(Debug, Clone, Copy)]
pub struct CsrDevice<'a, T> {
    /// Matrix descriptor.
    pub descr: &'a MatrixDescriptor,
    /// Number of rows.
    pub rows: i32,
    /// Number of columns.
    pub cols: i32,
    /// Row offsets, `rows + 1` entries.
    pub row_ptr: DeviceSlice<i32>,
    /// Column indices, `nnz` entries.
    pub col_ind: DeviceSlice<i32>,
    /// Nonzero values, `nnz` entries.
    pub values: DeviceSlice<T>,
}

impl<'a, T> CsrDevice<'a, T> {
    /// Describes a `rows` x `cols` device matrix.
    pub fn new(
        descr: &'a MatrixDescriptor,
        rows: i32,
        cols: i32,
        row_ptr: DeviceSlice<i32>,
        col_ind: DeviceSlice<i32>,
        values: DeviceSlice<T>,
    ) -> Self {
        Self { descr, rows, cols, row_ptr, col_ind, values }
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> SolverResult<i32> {
        to_i32("nnz", self.col_ind.len())
    }

    /// Checks buffer lengths against the dimensions.
    pub fn validate(&self) -> SolverResult<()> {
        check_dims(self.rows, self.cols)?;
        need("row_ptr", self.rows as usize + 1, self.row_ptr.len())?;
        need("values", self.col_ind.len(), self.values.len())?;
        self.nnz()?;
        Ok(())
    }
}
