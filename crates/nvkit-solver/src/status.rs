//! cuSOLVER and cuSPARSE status codes.

use nvkit_core::NativeStatus;

nvkit_core::native_status! {
    /// Status returned by cuSOLVER entry points (`cusolverStatus_t`).
    pub enum SolverStatus {
        /// The operation completed successfully.
        Success = 0 => "CUSOLVER_STATUS_SUCCESS",
        /// The library was not initialized.
        NotInitialized = 1 => "CUSOLVER_STATUS_NOT_INITIALIZED",
        /// Resource allocation failed.
        AllocFailed = 2 => "CUSOLVER_STATUS_ALLOC_FAILED",
        /// An unsupported value or parameter was passed.
        InvalidValue = 3 => "CUSOLVER_STATUS_INVALID_VALUE",
        /// The device does not support the feature.
        ArchMismatch = 4 => "CUSOLVER_STATUS_ARCH_MISMATCH",
        /// Access to GPU memory space failed.
        MappingError = 5 => "CUSOLVER_STATUS_MAPPING_ERROR",
        /// The GPU program failed to execute.
        ExecutionFailed = 6 => "CUSOLVER_STATUS_EXECUTION_FAILED",
        /// An internal operation failed.
        InternalError = 7 => "CUSOLVER_STATUS_INTERNAL_ERROR",
        /// The matrix type is not supported.
        MatrixTypeNotSupported = 8 => "CUSOLVER_STATUS_MATRIX_TYPE_NOT_SUPPORTED",
        /// The parameter combination is not supported.
        NotSupported = 9 => "CUSOLVER_STATUS_NOT_SUPPORTED",
        /// A zero pivot was encountered.
        ZeroPivot = 10 => "CUSOLVER_STATUS_ZERO_PIVOT",
        /// Invalid license.
        InvalidLicense = 11 => "CUSOLVER_STATUS_INVALID_LICENSE",
    }
}

impl NativeStatus for SolverStatus {
    const LIBRARY: &'static str = "cusolver";

    fn from_raw(raw: i32) -> Self {
        Self::from_code(raw)
    }

    fn raw(self) -> i32 {
        self.code()
    }
}

nvkit_core::native_status! {
    /// Status returned by cuSPARSE entry points (`cusparseStatus_t`).
    pub enum SparseStatus {
        /// The operation completed successfully.
        Success = 0 => "CUSPARSE_STATUS_SUCCESS",
        /// The library was not initialized.
        NotInitialized = 1 => "CUSPARSE_STATUS_NOT_INITIALIZED",
        /// Resource allocation failed.
        AllocFailed = 2 => "CUSPARSE_STATUS_ALLOC_FAILED",
        /// An unsupported value or parameter was passed.
        InvalidValue = 3 => "CUSPARSE_STATUS_INVALID_VALUE",
        /// The device does not support the feature.
        ArchMismatch = 4 => "CUSPARSE_STATUS_ARCH_MISMATCH",
        /// Access to GPU memory space failed.
        MappingError = 5 => "CUSPARSE_STATUS_MAPPING_ERROR",
        /// The GPU program failed to execute.
        ExecutionFailed = 6 => "CUSPARSE_STATUS_EXECUTION_FAILED",
        /// An internal operation failed.
        InternalError = 7 => "CUSPARSE_STATUS_INTERNAL_ERROR",
        /// The matrix type is not supported.
        MatrixTypeNotSupported = 8 => "CUSPARSE_STATUS_MATRIX_TYPE_NOT_SUPPORTED",
        /// A zero pivot was encountered.
        ZeroPivot = 9 => "CUSPARSE_STATUS_ZERO_PIVOT",
        /// The operation is not supported.
        NotSupported = 10 => "CUSPARSE_STATUS_NOT_SUPPORTED",
        /// Not enough resources for the computation.
        InsufficientResources = 11 => "CUSPARSE_STATUS_INSUFFICIENT_RESOURCES",
    }
}

impl NativeStatus for SparseStatus {
    const LIBRARY: &'static str = "cusparse";

    fn from_raw(raw: i32) -> Self {
        Self::from_code(raw)
    }

    fn raw(self) -> i32 {
        self.code()
    }
}
