//! Pitched device images.
//!
//! [`NppImage`] owns (or borrows) a 2D pitched allocation and a region of
//! interest. Operations address the ROI origin and pass the ROI size, so
//! narrowing the ROI restricts every later call to that rectangle.

use std::ffi::c_int;
use std::fmt;
use std::marker::PhantomData;

use nvkit_core::{check, release_on_drop, DevicePtr, Handle, Lifecycle, NativeResource};

use crate::element::{Ac4, Channels, Element, C4};
use crate::error::{NppError, NppResult};
use crate::library::Npp;
use crate::status::NppStatus;
use crate::sys::{FnFree, FnMalloc, Rect, Size};

/// A device image of `T` components in layout `C`.
pub struct NppImage<T: Element, C: Channels> {
    npp: Npp,
    handle: Handle<DevicePtr>,
    owned: bool,
    pitch: c_int,
    size: Size,
    roi: Rect,
    _marker: PhantomData<(T, C)>,
}

impl<T: Element, C: Channels> NppImage<T, C> {
    /// Bytes per pixel.
    pub const PIXEL_BYTES: usize = size_of::<T>() * C::COUNT;

    /// Allocates a `width x height` image with `nppiMalloc_*`.
    ///
    /// The pitch is chosen by NPP. The ROI starts as the full image.
    pub fn new(npp: &Npp, width: i32, height: i32) -> NppResult<Self> {
        let size = Size::new(width, height);
        if size.is_empty() {
            return Err(NppError::InvalidArgument(format!("image size {width}x{height}")));
        }
        let call = format!("nppiMalloc_{}_{}", T::ALLOC, C::ALLOC_TAG);
        let malloc: FnMalloc = unsafe { npp.symbol(&call)? };
        let mut pitch: c_int = 0;
        let ptr = unsafe { malloc(width, height, &mut pitch) };
        if ptr.is_null() {
            return Err(NppError::AllocationFailed { call, size });
        }
        Ok(Self::assemble(npp, DevicePtr::from_raw(ptr), size, pitch, true))
    }

    /// Wraps memory owned elsewhere. Dropping the image frees nothing.
    pub fn borrowed(npp: &Npp, ptr: DevicePtr, width: i32, height: i32, pitch: i32) -> NppResult<Self> {
        let size = Self::validate(ptr, width, height, pitch)?;
        Ok(Self::assemble(npp, ptr, size, pitch, false))
    }

    /// Takes ownership of memory from `nppiMalloc_*`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `nppiMalloc_*` with this geometry and must not be
    /// freed by anyone else.
    pub unsafe fn from_raw_owned(npp: &Npp, ptr: DevicePtr, width: i32, height: i32, pitch: i32) -> NppResult<Self> {
        let size = Self::validate(ptr, width, height, pitch)?;
        Ok(Self::assemble(npp, ptr, size, pitch, true))
    }

    fn validate(ptr: DevicePtr, width: i32, height: i32, pitch: i32) -> NppResult<Size> {
        let size = Size::new(width, height);
        if ptr.is_null() || size.is_empty() {
            return Err(NppError::InvalidArgument(format!("image {ptr:?} {width}x{height}")));
        }
        let row = width as usize * Self::PIXEL_BYTES;
        if pitch < 0 || (pitch as usize) < row {
            return Err(NppError::InvalidArgument(format!("pitch {pitch} below row size {row}")));
        }
        Ok(size)
    }

    fn assemble(npp: &Npp, ptr: DevicePtr, size: Size, pitch: c_int, owned: bool) -> Self {
        Self {
            npp: npp.clone(),
            handle: Handle::new("npp image", ptr),
            owned,
            pitch,
            size,
            roi: Rect::new(0, 0, size.width, size.height),
            _marker: PhantomData,
        }
    }

    /// A non-owning image over the same memory, keeping the current ROI.
    ///
    /// The view must not be used after the owning image is released.
    pub fn view(&self) -> NppResult<Self> {
        self.reinterpret()
    }

    fn reinterpret<D: Channels>(&self) -> NppResult<NppImage<T, D>> {
        let ptr = self.handle.get()?;
        let mut view = NppImage::<T, D>::assemble(&self.npp, ptr, self.size, self.pitch, false);
        view.roi = self.roi;
        Ok(view)
    }

    /// Full image size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Row pitch in bytes.
    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    /// Current region of interest.
    pub fn roi(&self) -> Rect {
        self.roi
    }

    /// True if dropping this image frees its memory.
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// The library set this image calls into.
    pub fn npp(&self) -> &Npp {
        &self.npp
    }

    /// Base address of the allocation.
    pub fn ptr(&self) -> NppResult<DevicePtr> {
        Ok(self.handle.get()?)
    }

    /// Address of the ROI origin.
    pub fn roi_ptr(&self) -> NppResult<DevicePtr> {
        let base = self.handle.get()?;
        let offset = self.roi.y as u64 * self.pitch as u64 + self.roi.x as u64 * Self::PIXEL_BYTES as u64;
        Ok(base.offset(offset))
    }

    /// Restricts later operations to `roi`, which must lie inside the image.
    pub fn set_roi(&mut self, roi: Rect) -> NppResult<()> {
        if !roi.fits(self.size) {
            return Err(NppError::InvalidArgument(format!("roi {roi:?} outside image {:?}", self.size)));
        }
        self.roi = roi;
        Ok(())
    }

    /// Resets the ROI to the full image.
    pub fn reset_roi(&mut self) {
        self.roi = Rect::new(0, 0, self.size.width, self.size.height);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    /// Frees the allocation if owned and marks the image released. Idempotent.
    pub fn release(&mut self) -> NppResult<()> {
        if !self.handle.is_live() {
            return Ok(());
        }
        if !self.owned {
            self.handle.take();
            return Ok(());
        }
        let free: FnFree = unsafe { self.npp.symbol("nppiFree")? };
        let Some(ptr) = self.handle.take() else { return Ok(()) };
        unsafe { free(ptr.as_raw()) };
        Ok(())
    }

    /// ROI origin and pitch for reading.
    pub(crate) fn src(&self) -> NppResult<(*const T, c_int)> {
        Ok((self.roi_ptr()?.as_raw::<T>() as *const T, self.pitch))
    }

    /// ROI origin and pitch for writing.
    pub(crate) fn dst(&mut self) -> NppResult<(*mut T, c_int)> {
        Ok((self.roi_ptr()?.as_raw::<T>(), self.pitch))
    }

    /// Base address and pitch, for ops taking an explicit ROI rectangle.
    pub(crate) fn base(&self) -> NppResult<(*mut T, c_int)> {
        Ok((self.handle.get()?.as_raw::<T>(), self.pitch))
    }

    /// Fails unless `other`'s ROI can hold this image's ROI.
    pub(crate) fn fits_roi<D: Element, E: Channels>(&self, other: &NppImage<D, E>) -> NppResult<Size> {
        let roi = self.roi.size();
        let theirs = other.roi.size();
        if theirs.width < roi.width || theirs.height < roi.height {
            return Err(NppError::InvalidArgument(format!("roi {theirs:?} smaller than {roi:?}")));
        }
        Ok(roi)
    }

    /// Fails unless `channel` names a stored component of `C`.
    pub(crate) fn channel(channel: usize) -> NppResult<usize> {
        if channel >= C::COUNT {
            return Err(NppError::InvalidArgument(format!("channel {channel} outside {}", C::TAG)));
        }
        Ok(channel)
    }

    /// Resolves an entry point from the image's library set.
    ///
    /// # Safety
    ///
    /// `F` must match the symbol's native signature.
    pub(crate) unsafe fn resolve<F: Copy>(&self, name: &str) -> NppResult<F> {
        unsafe { self.npp.symbol(name) }
    }
}

impl<T: Element> NppImage<T, C4> {
    /// A non-owning view that leaves the alpha channel untouched.
    pub fn alpha_view(&self) -> NppResult<NppImage<T, Ac4>> {
        self.reinterpret()
    }
}

/// Status-checks one NPP call. Warnings are logged and pass.
pub(crate) fn run(call: &str, raw: c_int) -> NppResult<()> {
    check::<NppStatus>(call, raw)?;
    Ok(())
}

impl<T: Element, C: Channels> fmt::Debug for NppImage<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NppImage")
            .field("layout", &format_args!("{}_{}", T::SUFFIX, C::TAG))
            .field("handle", &self.handle)
            .field("owned", &self.owned)
            .field("size", &self.size)
            .field("pitch", &self.pitch)
            .field("roi", &self.roi)
            .finish()
    }
}

impl<T: Element, C: Channels> NativeResource for NppImage<T, C> {
    type Error = NppError;

    fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    fn release(&mut self) -> NppResult<()> {
        NppImage::release(self)
    }
}

impl<T: Element, C: Channels> Drop for NppImage<T, C> {
    fn drop(&mut self) {
        release_on_drop(self);
    }
}
