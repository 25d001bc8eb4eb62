//! Value types passed across the native boundary.
//!
//! - [`DevicePtr`] - raw device address
//! - [`DeviceSlice`] - typed device address plus element count
//! - [`Stream`] - opaque stream token, forwarded unchanged
//! - [`Complex32`], [`Complex64`] - layout-compatible with `cuComplex` and
//!   `cuDoubleComplex`
//!
//! None of these own device memory. Allocation and lifetime of the memory
//! they point at belong to the caller.

use std::ffi::c_void;
use std::fmt;
use std::marker::PhantomData;

use bytemuck::{Pod, Zeroable};

/// A device address.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct DevicePtr(pub u64);

impl DevicePtr {
    /// The null device address.
    pub const NULL: DevicePtr = DevicePtr(0);

    /// True for address zero.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Address `bytes` past this one.
    pub fn offset(self, bytes: u64) -> Self {
        DevicePtr(self.0.wrapping_add(bytes))
    }

    /// The address as a C pointer.
    pub fn as_raw<T>(self) -> *mut T {
        self.0 as usize as *mut T
    }

    /// Wraps a C pointer.
    pub fn from_raw<T>(ptr: *const T) -> Self {
        DevicePtr(ptr as usize as u64)
    }
}

impl fmt::Debug for DevicePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DevicePtr({:#x})", self.0)
    }
}

/// `len` elements of `T` starting at a device address.
pub struct DeviceSlice<T> {
    ptr: DevicePtr,
    len: usize,
    _marker: PhantomData<*mut T>,
}

impl<T> DeviceSlice<T> {
    /// Describes `len` elements at `ptr`.
    ///
    /// The address is not validated. Native calls that receive it run on the
    /// device and report bad addresses through their status code.
    pub fn new(ptr: DevicePtr, len: usize) -> Self {
        Self { ptr, len, _marker: PhantomData }
    }

    /// Base address.
    pub fn ptr(&self) -> DevicePtr {
        self.ptr
    }

    /// Element count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when `len == 0`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size in bytes.
    pub fn byte_len(&self) -> usize {
        self.len * size_of::<T>()
    }

    /// Base address as a typed C pointer.
    pub fn as_raw(&self) -> *mut T {
        self.ptr.as_raw()
    }

    /// Sub-range `[start, start + len)`, or `None` if out of range.
    pub fn slice(&self, start: usize, len: usize) -> Option<Self> {
        let end = start.checked_add(len)?;
        (end <= self.len)
            .then(|| Self::new(self.ptr.offset((start * size_of::<T>()) as u64), len))
    }
}

impl<T> Clone for DeviceSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DeviceSlice<T> {}

impl<T> PartialEq for DeviceSlice<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && self.len == other.len
    }
}

impl<T> Eq for DeviceSlice<T> {}

impl<T> fmt::Debug for DeviceSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSlice")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("elem", &std::any::type_name::<T>())
            .finish()
    }
}

// Device addresses carry no host aliasing.
unsafe impl<T> Send for DeviceSlice<T> {}
unsafe impl<T> Sync for DeviceSlice<T> {}

/// A CUDA stream token (`cudaStream_t`).
///
/// [`Stream::DEFAULT`] is the null stream.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stream(*mut c_void);

// Streams are opaque driver tokens, usable from any thread.
unsafe impl Send for Stream {}
unsafe impl Sync for Stream {}

impl Stream {
    /// The default (null) stream.
    pub const DEFAULT: Stream = Stream(std::ptr::null_mut());

    /// Wraps a raw `cudaStream_t`.
    pub fn from_raw(raw: *mut c_void) -> Self {
        Stream(raw)
    }

    /// The raw `cudaStream_t`.
    pub fn as_raw(self) -> *mut c_void {
        self.0
    }

    /// True for the null stream.
    pub fn is_default(self) -> bool {
        self.0.is_null()
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() { write!(f, "Stream(default)") } else { write!(f, "Stream({:p})", self.0) }
    }
}

/// Single precision complex value (`cuComplex`, `cufftComplex`, `Npp32fc`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Complex32 {
    /// Real part.
    pub re: f32,
    /// Imaginary part.
    pub im: f32,
}

/// Double precision complex value (`cuDoubleComplex`, `Npp64fc`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Complex64 {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex32 {
    /// Creates `re + im*i`.
    pub const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

impl Complex64 {
    /// Creates `re + im*i`.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}
