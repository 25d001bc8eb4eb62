//! cuRAND status codes (`curandStatus_t`).

use nvkit_core::NativeStatus;

nvkit_core::native_status! {
    /// Status returned by every cuRAND entry point.
    pub enum RandStatus {
        /// No errors.
        Success = 0 => "CURAND_STATUS_SUCCESS",
        /// Header file and linked library version do not match.
        VersionMismatch = 100 => "CURAND_STATUS_VERSION_MISMATCH",
        /// Generator not initialized.
        NotInitialized = 101 => "CURAND_STATUS_NOT_INITIALIZED",
        /// Memory allocation failed.
        AllocationFailed = 102 => "CURAND_STATUS_ALLOCATION_FAILED",
        /// Generator is the wrong type.
        TypeError = 103 => "CURAND_STATUS_TYPE_ERROR",
        /// Argument out of range.
        OutOfRange = 104 => "CURAND_STATUS_OUT_OF_RANGE",
        /// Length requested is not a multiple of the dimension.
        LengthNotMultiple = 105 => "CURAND_STATUS_LENGTH_NOT_MULTIPLE",
        /// GPU does not have double precision.
        DoublePrecisionRequired = 106 => "CURAND_STATUS_DOUBLE_PRECISION_REQUIRED",
        /// Kernel launch failure.
        LaunchFailure = 201 => "CURAND_STATUS_LAUNCH_FAILURE",
        /// Preexisting failure on library entry.
        PreexistingFailure = 202 => "CURAND_STATUS_PREEXISTING_FAILURE",
        /// Initialization of CUDA failed.
        InitializationFailed = 203 => "CURAND_STATUS_INITIALIZATION_FAILED",
        /// Architecture mismatch, GPU does not support the requested feature.
        ArchMismatch = 204 => "CURAND_STATUS_ARCH_MISMATCH",
        /// Internal library error.
        InternalError = 999 => "CURAND_STATUS_INTERNAL_ERROR",
    }
}

impl NativeStatus for RandStatus {
    const LIBRARY: &'static str = "curand";

    fn from_raw(raw: i32) -> Self {
        Self::from_code(raw)
    }

    fn raw(self) -> i32 {
        self.code()
    }
}
