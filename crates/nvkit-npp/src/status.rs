//! NPP status codes.
//!
//! NPP is the only library in the set with warnings: negative codes are
//! errors, positive codes are warnings and the call still produced output.

use nvkit_core::NativeStatus;

nvkit_core::native_status! {
    /// Status returned by NPP entry points (`NppStatus`).
    pub enum NppStatus {
        /// Mode not supported.
        NotSupportedMode = -9999 => "NPP_NOT_SUPPORTED_MODE_ERROR",
        /// Invalid host pointer.
        InvalidHostPointer = -1032 => "NPP_INVALID_HOST_POINTER_ERROR",
        /// Invalid device pointer.
        InvalidDevicePointer = -1031 => "NPP_INVALID_DEVICE_POINTER_ERROR",
        /// Palette bit size out of range.
        LutPaletteBitsize = -1030 => "NPP_LUT_PALETTE_BITSIZE_ERROR",
        /// Zero-copy mode not supported.
        ZcModeNotSupported = -1028 => "NPP_ZC_MODE_NOT_SUPPORTED_ERROR",
        /// The device compute capability is too low.
        NotSufficientComputeCapability = -1027 => "NPP_NOT_SUFFICIENT_COMPUTE_CAPABILITY",
        /// Texture binding failed.
        TextureBind = -1024 => "NPP_TEXTURE_BIND_ERROR",
        /// ROIs do not intersect.
        WrongIntersectionRoi = -1020 => "NPP_WRONG_INTERSECTION_ROI_ERROR",
        /// Haar classifier pixel match failed.
        HaarClassifierPixelMatch = -1006 => "NPP_HAAR_CLASSIFIER_PIXEL_MATCH_ERROR",
        /// Device free failed.
        MemFree = -1005 => "NPP_MEMFREE_ERROR",
        /// Device memset failed.
        MemSet = -1004 => "NPP_MEMSET_ERROR",
        /// Device copy failed.
        MemCopy = -1003 => "NPP_MEMCPY_ERROR",
        /// Misaligned pointer or step.
        Alignment = -1002 => "NPP_ALIGNMENT_ERROR",
        /// A CUDA kernel failed to execute.
        CudaKernelExecution = -1000 => "NPP_CUDA_KERNEL_EXECUTION_ERROR",
        /// Rounding mode not supported.
        RoundModeNotSupported = -213 => "NPP_ROUND_MODE_NOT_SUPPORTED_ERROR",
        /// Quality index cannot be computed.
        QualityIndex = -210 => "NPP_QUALITY_INDEX_ERROR",
        /// Resize would produce no output.
        ResizeNoOperation = -201 => "NPP_RESIZE_NO_OPERATION_ERROR",
        /// Arithmetic overflow.
        Overflow = -109 => "NPP_OVERFLOW_ERROR",
        /// Step is not even.
        NotEvenStep = -108 => "NPP_NOT_EVEN_STEP_ERROR",
        /// Invalid number of histogram levels.
        HistogramNumberOfLevels = -107 => "NPP_HISTOGRAM_NUMBER_OF_LEVELS_ERROR",
        /// Invalid number of LUT levels.
        LutNumberOfLevels = -106 => "NPP_LUT_NUMBER_OF_LEVELS_ERROR",
        /// Corrupted input data.
        CorruptedData = -61 => "NPP_CORRUPTED_DATA_ERROR",
        /// Invalid channel order.
        ChannelOrder = -60 => "NPP_CHANNEL_ORDER_ERROR",
        /// All mask values are zero.
        ZeroMaskValue = -59 => "NPP_ZERO_MASK_VALUE_ERROR",
        /// Invalid quadrangle.
        Quadrangle = -58 => "NPP_QUADRANGLE_ERROR",
        /// Invalid rectangle.
        Rectangle = -57 => "NPP_RECTANGLE_ERROR",
        /// Invalid coefficients.
        Coefficient = -56 => "NPP_COEFFICIENT_ERROR",
        /// Invalid number of channels.
        NumberOfChannels = -53 => "NPP_NUMBER_OF_CHANNELS_ERROR",
        /// Invalid channel of interest.
        Coi = -52 => "NPP_COI_ERROR",
        /// Divisor is zero.
        Divisor = -51 => "NPP_DIVISOR_ERROR",
        /// Invalid channel.
        Channel = -47 => "NPP_CHANNEL_ERROR",
        /// Invalid stride.
        Stride = -37 => "NPP_STRIDE_ERROR",
        /// Anchor outside the mask.
        Anchor = -34 => "NPP_ANCHOR_ERROR",
        /// Invalid mask size.
        MaskSize = -33 => "NPP_MASK_SIZE_ERROR",
        /// Invalid resize factor.
        ResizeFactor = -23 => "NPP_RESIZE_FACTOR_ERROR",
        /// Invalid interpolation mode.
        Interpolation = -22 => "NPP_INTERPOLATION_ERROR",
        /// Invalid mirror axis.
        MirrorFlip = -21 => "NPP_MIRROR_FLIP_ERROR",
        /// Zero-order moment is zero.
        Moment00Zero = -20 => "NPP_MOMENT_00_ZERO_ERROR",
        /// Negative threshold level.
        ThresholdNegativeLevel = -19 => "NPP_THRESHOLD_NEGATIVE_LEVEL_ERROR",
        /// Invalid threshold.
        Threshold = -18 => "NPP_THRESHOLD_ERROR",
        /// Stream context does not match.
        ContextMatch = -17 => "NPP_CONTEXT_MATCH_ERROR",
        /// Invalid FFT flag.
        FftFlag = -16 => "NPP_FFT_FLAG_ERROR",
        /// Invalid FFT order.
        FftOrder = -15 => "NPP_FFT_ORDER_ERROR",
        /// Invalid step.
        Step = -14 => "NPP_STEP_ERROR",
        /// Scale factor out of range.
        ScaleRange = -13 => "NPP_SCALE_RANGE_ERROR",
        /// Unsupported data type.
        DataType = -12 => "NPP_DATA_TYPE_ERROR",
        /// Value out of range.
        OutOffRange = -11 => "NPP_OUT_OFF_RANGE_ERROR",
        /// Division by zero.
        DivideByZero = -10 => "NPP_DIVIDE_BY_ZERO_ERROR",
        /// Memory allocation failed.
        MemoryAllocation = -9 => "NPP_MEMORY_ALLOCATION_ERR",
        /// Null pointer argument.
        NullPointer = -8 => "NPP_NULL_POINTER_ERROR",
        /// Range error.
        Range = -7 => "NPP_RANGE_ERROR",
        /// Invalid size.
        Size = -6 => "NPP_SIZE_ERROR",
        /// Bad argument.
        BadArgument = -5 => "NPP_BAD_ARGUMENT_ERROR",
        /// Out of memory.
        NoMemory = -4 => "NPP_NO_MEMORY_ERROR",
        /// Not implemented.
        NotImplemented = -3 => "NPP_NOT_IMPLEMENTED_ERROR",
        /// Unspecified error.
        Error = -2 => "NPP_ERROR",
        /// Reserved error code.
        ErrorReserved = -1 => "NPP_ERROR_RESERVED",
        /// The operation completed successfully.
        Success = 0 => "NPP_SUCCESS",
        /// The call did nothing.
        NoOperationWarning = 1 => "NPP_NO_OPERATION_WARNING",
        /// Division by zero; results are saturated.
        DivideByZeroWarning = 6 => "NPP_DIVIDE_BY_ZERO_WARNING",
        /// Affine quadrangle is not a parallelogram.
        AffineQuadIncorrectWarning = 28 => "NPP_AFFINE_QUAD_INCORRECT_WARNING",
        /// ROIs do not intersect; nothing was written.
        WrongIntersectionRoiWarning = 29 => "NPP_WRONG_INTERSECTION_ROI_WARNING",
        /// Quadrangle does not intersect the image.
        WrongIntersectionQuadWarning = 30 => "NPP_WRONG_INTERSECTION_QUAD_WARNING",
        /// Image size is not a multiple of two; the last row or column is ignored.
        DoubleSizeWarning = 35 => "NPP_DOUBLE_SIZE_WARNING",
        /// Destination ROI is not aligned; the slower path was used.
        MisalignedDstRoiWarning = 10000 => "NPP_MISALIGNED_DST_ROI_WARNING",
    }
}

impl NativeStatus for NppStatus {
    const LIBRARY: &'static str = "npp";

    fn from_raw(raw: i32) -> Self {
        Self::from_code(raw)
    }

    fn raw(self) -> i32 {
        self.code()
    }

    fn is_warning(self) -> bool {
        self.code() > 0
    }
}
