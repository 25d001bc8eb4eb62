//! Raw NPP ABI: value types, enums and entry point signatures.
//!
//! Every image entry point used here is the `_Ctx` form, taking a
//! [`StreamContext`] by value as its last argument.

use std::ffi::{c_int, c_uint, c_void};

use bytemuck::{Pod, Zeroable};
use nvkit_core::Stream;

/// `NppiSize`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Size {
    /// Width in pixels.
    pub width: c_int,
    /// Height in pixels.
    pub height: c_int,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True if either side is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// `width * height`, zero for empty sizes.
    pub fn area(&self) -> usize {
        if self.is_empty() { 0 } else { self.width as usize * self.height as usize }
    }
}

/// `NppiPoint`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Point {
    /// Column.
    pub x: c_int,
    /// Row.
    pub y: c_int,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// `NppiRect`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Rect {
    /// Left column.
    pub x: c_int,
    /// Top row.
    pub y: c_int,
    /// Width in pixels.
    pub width: c_int,
    /// Height in pixels.
    pub height: c_int,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle at `origin` with `size`.
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    /// Top-left corner.
    pub const fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// Width and height.
    pub const fn size(&self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// True if the rectangle lies inside `0..size`.
    pub fn fits(&self, size: Size) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.width >= 0
            && self.height >= 0
            && self.x as i64 + self.width as i64 <= size.width as i64
            && self.y as i64 + self.height as i64 <= size.height as i64
    }
}

/// `NppStreamContext`: the stream plus the device properties NPP kernels need.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamContext {
    /// Stream the operation is queued on.
    pub stream: Stream,
    /// Device ordinal.
    pub device_id: c_int,
    /// Multiprocessor count.
    pub multi_processor_count: c_int,
    /// Maximum resident threads per multiprocessor.
    pub max_threads_per_multi_processor: c_int,
    /// Maximum threads per block.
    pub max_threads_per_block: c_int,
    /// Shared memory per block in bytes.
    pub shared_mem_per_block: usize,
    /// Compute capability major.
    pub compute_capability_major: c_int,
    /// Compute capability minor.
    pub compute_capability_minor: c_int,
    /// Flags the stream was created with.
    pub stream_flags: c_uint,
    reserved: c_int,
}

impl StreamContext {
    /// A context for `stream`; device fields stay zero.
    ///
    /// Prefer [`Npp::stream_context`](crate::Npp::stream_context), which fills
    /// in the device properties.
    pub fn for_stream(stream: Stream) -> Self {
        Self { stream, ..Self::default() }
    }
}

/// `NppLibraryVersion`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LibraryVersion {
    /// Major version.
    pub major: c_int,
    /// Minor version.
    pub minor: c_int,
    /// Build number.
    pub build: c_int,
}

macro_rules! npp_enum {
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
        }
    };
}

npp_enum! {
    /// `NppiInterpolationMode`.
    pub enum Interpolation {
        /// Nearest neighbour.
        NearestNeighbor = 1,
        /// Bilinear.
        Linear = 2,
        /// Bicubic.
        Cubic = 4,
        /// Cubic B-spline.
        Cubic2pBSpline = 5,
        /// Catmull-Rom spline.
        Cubic2pCatmullRom = 6,
        /// Cubic with B=1/2, C=3/10.
        Cubic2pB05C03 = 7,
        /// Super sampling, downscale only.
        Super = 8,
        /// Lanczos.
        Lanczos = 16,
        /// Three-lobe Lanczos.
        Lanczos3Advanced = 17,
    }
}

npp_enum! {
    /// `NppiAxis`.
    pub enum Axis {
        /// Flip top to bottom.
        Horizontal = 0,
        /// Flip left to right.
        Vertical = 1,
        /// Flip both.
        Both = 2,
    }
}

npp_enum! {
    /// `NppiBorderType`.
    pub enum BorderType {
        /// No border handling.
        None = 0,
        /// Constant value outside the image.
        Constant = 1,
        /// Edge pixels repeated.
        Replicate = 2,
        /// Image wraps around.
        Wrap = 3,
        /// Mirrored at the edge.
        Mirror = 4,
    }
}

npp_enum! {
    /// `NppiAlphaOp`.
    pub enum AlphaOp {
        /// A over B.
        Over = 0,
        /// A in B.
        In = 1,
        /// A out B.
        Out = 2,
        /// A atop B.
        Atop = 3,
        /// A xor B.
        Xor = 4,
        /// A plus B.
        Plus = 5,
        /// Over with premultiplied alpha.
        OverPremul = 6,
        /// In with premultiplied alpha.
        InPremul = 7,
        /// Out with premultiplied alpha.
        OutPremul = 8,
        /// Atop with premultiplied alpha.
        AtopPremul = 9,
        /// Xor with premultiplied alpha.
        XorPremul = 10,
        /// Plus with premultiplied alpha.
        PlusPremul = 11,
        /// Premultiply by alpha.
        Premul = 12,
    }
}

npp_enum! {
    /// `NppHintAlgorithm`.
    pub enum HintAlgorithm {
        /// Library default.
        None = 0,
        /// Favour speed.
        Fast = 1,
        /// Favour accuracy.
        Accurate = 2,
    }
}

npp_enum! {
    /// `NppRoundMode`.
    pub enum RoundMode {
        /// Round half away from zero.
        Near = 0,
        /// Round half to even.
        Financial = 1,
        /// Truncate toward zero.
        Zero = 2,
    }
}

// nppc / npps
pub(crate) type FnGetLibVersion = unsafe extern "C" fn() -> *const LibraryVersion;
pub(crate) type FnSetStream = unsafe extern "C" fn(Stream) -> c_int;
pub(crate) type FnGetStream = unsafe extern "C" fn() -> Stream;
pub(crate) type FnGetStreamContext = unsafe extern "C" fn(*mut StreamContext) -> c_int;
pub(crate) type FnMalloc = unsafe extern "C" fn(c_int, c_int, *mut c_int) -> *mut c_void;
pub(crate) type FnFree = unsafe extern "C" fn(*mut c_void);
pub(crate) type FnSignalMalloc = unsafe extern "C" fn(usize) -> *mut c_void;

/// `(src, step, dst, step, roi, ctx)`: copy, convert, sqr, sqrt, abs, transpose, magnitude.
pub(crate) type FnSrcDst<S, D> = unsafe extern "C" fn(*const S, c_int, *mut D, c_int, Size, StreamContext) -> c_int;
/// `(src, step, dst, step, roi, mode, ctx)`: mirror, rounded convert, hinted scale.
pub(crate) type FnSrcDstMode<S, D> =
    unsafe extern "C" fn(*const S, c_int, *mut D, c_int, Size, c_int, StreamContext) -> c_int;
/// `(src, step, dst, step, roi, min, max, ctx)`: range scale.
pub(crate) type FnSrcDstRange<S, D> =
    unsafe extern "C" fn(*const S, c_int, *mut D, c_int, Size, f32, f32, StreamContext) -> c_int;
/// `(src, step, dst, step, roi, mask, step, ctx)`: masked copy.
pub(crate) type FnSrcDstMask<T> =
    unsafe extern "C" fn(*const T, c_int, *mut T, c_int, Size, *const u8, c_int, StreamContext) -> c_int;
/// `(src, step, planes, step, roi, ctx)`: packed to planar copy.
pub(crate) type FnToPlanes<T> =
    unsafe extern "C" fn(*const T, c_int, *const *mut T, c_int, Size, StreamContext) -> c_int;
/// `(planes, step, dst, step, roi, ctx)`: planar to packed copy.
pub(crate) type FnFromPlanes<T> =
    unsafe extern "C" fn(*const *const T, c_int, *mut T, c_int, Size, StreamContext) -> c_int;
/// `(srcdst, step, roi, ctx)`: in-place sqr, sqrt, abs.
pub(crate) type FnInplace<T> = unsafe extern "C" fn(*mut T, c_int, Size, StreamContext) -> c_int;
/// `(srcdst, step, roi, mode, ctx)`: in-place mirror.
pub(crate) type FnInplaceMode<T> = unsafe extern "C" fn(*mut T, c_int, Size, c_int, StreamContext) -> c_int;

/// `(value, dst, step, roi, ctx)`: set, in-place constant ops on one channel.
pub(crate) type FnValueInplace<T, K> = unsafe extern "C" fn(K, *mut T, c_int, Size, StreamContext) -> c_int;
/// `(values, dst, step, roi, ctx)`: set, in-place constant ops on several channels.
pub(crate) type FnArrayInplace<T, K> = unsafe extern "C" fn(*const K, *mut T, c_int, Size, StreamContext) -> c_int;
pub(crate) type FnValueInplaceScaled<T, K> =
    unsafe extern "C" fn(K, *mut T, c_int, Size, c_int, StreamContext) -> c_int;
pub(crate) type FnArrayInplaceScaled<T, K> =
    unsafe extern "C" fn(*const K, *mut T, c_int, Size, c_int, StreamContext) -> c_int;

/// `(value, dst, step, roi, mask, step, ctx)`: masked set on one channel.
pub(crate) type FnValueMask<T, K> =
    unsafe extern "C" fn(K, *mut T, c_int, Size, *const u8, c_int, StreamContext) -> c_int;
/// `(values, dst, step, roi, mask, step, ctx)`: masked set on several channels.
pub(crate) type FnArrayMask<T, K> =
    unsafe extern "C" fn(*const K, *mut T, c_int, Size, *const u8, c_int, StreamContext) -> c_int;

/// `(src, step, value, dst, step, roi, ctx)`.
pub(crate) type FnValue<T, K> = unsafe extern "C" fn(*const T, c_int, K, *mut T, c_int, Size, StreamContext) -> c_int;
/// `(src, step, values, dst, step, roi, ctx)`.
pub(crate) type FnArray<T, K> =
    unsafe extern "C" fn(*const T, c_int, *const K, *mut T, c_int, Size, StreamContext) -> c_int;
pub(crate) type FnValueScaled<T, K> =
    unsafe extern "C" fn(*const T, c_int, K, *mut T, c_int, Size, c_int, StreamContext) -> c_int;
pub(crate) type FnArrayScaled<T, K> =
    unsafe extern "C" fn(*const T, c_int, *const K, *mut T, c_int, Size, c_int, StreamContext) -> c_int;

/// `(src1, step, src2, step, dst, step, roi, ctx)`.
pub(crate) type FnBinary<T> =
    unsafe extern "C" fn(*const T, c_int, *const T, c_int, *mut T, c_int, Size, StreamContext) -> c_int;
pub(crate) type FnBinaryScaled<T> =
    unsafe extern "C" fn(*const T, c_int, *const T, c_int, *mut T, c_int, Size, c_int, StreamContext) -> c_int;
/// `(src, step, srcdst, step, roi, ctx)`.
pub(crate) type FnBinaryInplace<T> = unsafe extern "C" fn(*const T, c_int, *mut T, c_int, Size, StreamContext) -> c_int;
pub(crate) type FnBinaryInplaceScaled<T> =
    unsafe extern "C" fn(*const T, c_int, *mut T, c_int, Size, c_int, StreamContext) -> c_int;

/// `nppiResize_*`.
pub(crate) type FnResize<T> =
    unsafe extern "C" fn(*const T, c_int, Size, Rect, *mut T, c_int, Size, Rect, c_int, StreamContext) -> c_int;
/// `nppiWarpAffine*_*` and `nppiWarpPerspective*_*`; coefficients are `double[N][3]`.
pub(crate) type FnWarp<T> = unsafe extern "C" fn(
    *const T,
    Size,
    c_int,
    Rect,
    *mut T,
    c_int,
    Rect,
    *const [f64; 3],
    c_int,
    StreamContext,
) -> c_int;

/// `nppiWarpAffineQuad_*` and `nppiWarpPerspectiveQuad_*`; quads are `double[4][2]`.
pub(crate) type FnWarpQuad<T> = unsafe extern "C" fn(
    *const T,
    Size,
    c_int,
    Rect,
    *const [f64; 2],
    *mut T,
    c_int,
    Rect,
    *const [f64; 2],
    c_int,
    StreamContext,
) -> c_int;

/// `nppiCopyConstBorder_*_C1R`.
pub(crate) type FnConstBorderValue<T> =
    unsafe extern "C" fn(*const T, c_int, Size, *mut T, c_int, Size, c_int, c_int, T, StreamContext) -> c_int;
/// `nppiCopyConstBorder_*_C{3,4}R`.
pub(crate) type FnConstBorderArray<T> =
    unsafe extern "C" fn(*const T, c_int, Size, *mut T, c_int, Size, c_int, c_int, *const T, StreamContext) -> c_int;
/// `nppiCopy{Replicate,Wrap}Border_*`.
pub(crate) type FnBorder<T> =
    unsafe extern "C" fn(*const T, c_int, Size, *mut T, c_int, Size, c_int, c_int, StreamContext) -> c_int;
/// `nppiCopySubpix_*`.
pub(crate) type FnSubpix<T> =
    unsafe extern "C" fn(*const T, c_int, *mut T, c_int, Size, f32, f32, StreamContext) -> c_int;
/// `nppiSwapChannels_*R`.
pub(crate) type FnSwap<T> =
    unsafe extern "C" fn(*const T, c_int, *mut T, c_int, Size, *const c_int, StreamContext) -> c_int;
/// `nppiSwapChannels_*IR`.
pub(crate) type FnSwapInplace<T> = unsafe extern "C" fn(*mut T, c_int, Size, *const c_int, StreamContext) -> c_int;

/// `nppiFilter*`.
pub(crate) type FnFilter<T, W> =
    unsafe extern "C" fn(*const T, c_int, *mut T, c_int, Size, *const W, Size, Point, StreamContext) -> c_int;
/// `nppiFilterBorder*`.
pub(crate) type FnFilterBorder<T, W> = unsafe extern "C" fn(
    *const T,
    c_int,
    Size,
    Point,
    *mut T,
    c_int,
    Size,
    *const W,
    Size,
    Point,
    c_int,
    StreamContext,
) -> c_int;

/// `nppiColorTwist*R`; the twist is `float[3][4]`.
pub(crate) type FnTwist<T> =
    unsafe extern "C" fn(*const T, c_int, *mut T, c_int, Size, *const [f32; 4], StreamContext) -> c_int;
/// `nppiColorTwist*IR`.
pub(crate) type FnTwistInplace<T> = unsafe extern "C" fn(*mut T, c_int, Size, *const [f32; 4], StreamContext) -> c_int;

/// `nppiColorTwist32fC_*R`; `float[4][4]` twist plus `float[4]` constants.
pub(crate) type FnTwistConst<T> =
    unsafe extern "C" fn(*const T, c_int, *mut T, c_int, Size, *const [f32; 4], *const f32, StreamContext) -> c_int;
/// `nppiColorTwist32fC_*IR`.
pub(crate) type FnTwistConstInplace<T> =
    unsafe extern "C" fn(*mut T, c_int, Size, *const [f32; 4], *const f32, StreamContext) -> c_int;

/// `nppiAlphaComp_*`.
pub(crate) type FnAlphaComp<T> =
    unsafe extern "C" fn(*const T, c_int, *const T, c_int, *mut T, c_int, Size, c_int, StreamContext) -> c_int;

/// Error metrics and dot product: `(src1, step, src2, step, roi, out, buffer, ctx)`.
pub(crate) type FnMetric<T> =
    unsafe extern "C" fn(*const T, c_int, *const T, c_int, Size, *mut f64, *mut u8, StreamContext) -> c_int;
/// `*GetBufferHostSize_*`.
pub(crate) type FnBufferSize = unsafe extern "C" fn(Size, *mut usize, StreamContext) -> c_int;
