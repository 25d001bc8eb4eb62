//! Device scratch buffers for NPP statistics.

use nvkit_core::{release_on_drop, DevicePtr, DeviceSlice, Handle, Lifecycle, NativeResource};

use crate::error::{NppError, NppResult};
use crate::library::Npp;
use crate::sys::{FnFree, FnSignalMalloc, Size};

/// A device byte buffer from `nppsMalloc_8u`, freed with `nppsFree`.
#[derive(Debug)]
pub struct ScratchBuffer {
    npp: Npp,
    handle: Handle<DevicePtr>,
    len: usize,
}

impl ScratchBuffer {
    /// Allocates `len` bytes; a zero length allocates one byte.
    pub fn new(npp: &Npp, len: usize) -> NppResult<Self> {
        let malloc: FnSignalMalloc = unsafe { npp.symbol("nppsMalloc_8u")? };
        let ptr = unsafe { malloc(len.max(1)) };
        if ptr.is_null() {
            let width = i32::try_from(len).unwrap_or(i32::MAX);
            return Err(NppError::AllocationFailed { call: "nppsMalloc_8u".into(), size: Size::new(width, 1) });
        }
        Ok(Self { npp: npp.clone(), handle: Handle::new("npp scratch buffer", DevicePtr::from_raw(ptr)), len })
    }

    /// The buffer as a device slice, or `Released`.
    pub fn as_slice(&self) -> NppResult<DeviceSlice<u8>> {
        Ok(DeviceSlice::new(self.handle.get()?, self.len))
    }

    /// Requested length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length request.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    /// Frees the buffer. Idempotent.
    pub fn release(&mut self) -> NppResult<()> {
        if !self.handle.is_live() {
            return Ok(());
        }
        let free: FnFree = unsafe { self.npp.symbol("nppsFree")? };
        let Some(ptr) = self.handle.take() else { return Ok(()) };
        unsafe { free(ptr.as_raw()) };
        Ok(())
    }
}

impl NativeResource for ScratchBuffer {
    type Error = NppError;

    fn state(&self) -> Lifecycle {
        self.handle.state()
    }

    fn release(&mut self) -> NppResult<()> {
        ScratchBuffer::release(self)
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        release_on_drop(self);
    }
}
