//! cuFFT status codes (`cufftResult`).

use nvkit_core::NativeStatus;

nvkit_core::native_status! {
    /// Status returned by every cuFFT entry point.
    pub enum FftStatus {
        /// The call succeeded.
        Success = 0 => "CUFFT_SUCCESS",
        /// The plan handle is not valid.
        InvalidPlan = 1 => "CUFFT_INVALID_PLAN",
        /// GPU or host memory allocation failed.
        AllocFailed = 2 => "CUFFT_ALLOC_FAILED",
        /// Unsupported transform type.
        InvalidType = 3 => "CUFFT_INVALID_TYPE",
        /// A pointer or parameter was invalid.
        InvalidValue = 4 => "CUFFT_INVALID_VALUE",
        /// Driver or library internal error.
        InternalError = 5 => "CUFFT_INTERNAL_ERROR",
        /// The transform failed to execute on the GPU.
        ExecFailed = 6 => "CUFFT_EXEC_FAILED",
        /// The library failed to initialize.
        SetupFailed = 7 => "CUFFT_SETUP_FAILED",
        /// Unsupported transform size.
        InvalidSize = 8 => "CUFFT_INVALID_SIZE",
        /// Input or output is not aligned.
        UnalignedData = 9 => "CUFFT_UNALIGNED_DATA",
        /// Missing parameters in the call.
        IncompleteParameterList = 10 => "CUFFT_INCOMPLETE_PARAMETER_LIST",
        /// Execution on a different GPU than plan creation.
        InvalidDevice = 11 => "CUFFT_INVALID_DEVICE",
        /// Internal plan database error.
        ParseError = 12 => "CUFFT_PARSE_ERROR",
        /// No work area provided before execution.
        NoWorkspace = 13 => "CUFFT_NO_WORKSPACE",
        /// Functionality not implemented.
        NotImplemented = 14 => "CUFFT_NOT_IMPLEMENTED",
        /// License error.
        LicenseError = 15 => "CUFFT_LICENSE_ERROR",
        /// Operation not supported for these parameters.
        NotSupported = 16 => "CUFFT_NOT_SUPPORTED",
    }
}

impl NativeStatus for FftStatus {
    const LIBRARY: &'static str = "cufft";

    fn from_raw(raw: i32) -> Self {
        Self::from_code(raw)
    }

    fn raw(self) -> i32 {
        self.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(FftStatus::from_raw(6), FftStatus::ExecFailed);
        assert_eq!(FftStatus::NoWorkspace.raw(), 13);
        assert_eq!(FftStatus::InvalidPlan.to_string(), "CUFFT_INVALID_PLAN");
        assert!(FftStatus::Success.is_success());
        assert!(!FftStatus::InvalidSize.is_warning());
    }

    proptest! {
        #[test]
        fn prop_round_trip(code in any::<i32>()) {
            prop_assert_eq!(FftStatus::from_raw(code).raw(), code);
        }

        #[test]
        fn prop_only_zero_succeeds(code in any::<i32>()) {
            prop_assert_eq!(FftStatus::from_raw(code).is_success(), code == 0);
        }
    }
}
