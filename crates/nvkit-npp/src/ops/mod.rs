//! Image operations, one native call each.
//!
//! Shared call shapes live here; each submodule adds one group of methods
//! to [`NppImage`]. Every call takes the [`StreamContext`] it runs on.

mod arithmetic;
mod color;
mod data;
mod filter;
mod geometry;
mod logic;
mod statistics;

pub use data::ComplexPart;
pub use filter::Kernel;

use bytemuck::Pod;
use nvkit_core::DeviceSlice;

use crate::element::{scaled_form, symbol, Channels, Element, IN_PLACE, OUT};
use crate::error::{need, NppResult};
use crate::image::{run, NppImage};
use crate::sys::{
    FnArray, FnArrayInplace, FnArrayInplaceScaled, FnArrayScaled, FnBinary, FnBinaryInplace, FnBinaryInplaceScaled,
    FnBinaryScaled, FnInplace, FnSrcDst, FnValue, FnValueInplace, FnValueInplaceScaled, FnValueScaled, StreamContext,
};

impl<T: Element, C: Channels> NppImage<T, C> {
    /// `(src, dst)` over this image's ROI.
    pub(crate) fn unary(&self, op: &str, dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>(op, OUT);
        let f: FnSrcDst<T, T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, *ctx) })
    }

    /// `(srcdst)` over this image's ROI.
    pub(crate) fn unary_inplace(&mut self, op: &str, ctx: &StreamContext) -> NppResult<()> {
        let (out, step) = self.dst()?;
        let name = symbol::<T, C>(op, IN_PLACE);
        let f: FnInplace<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(out, step, self.roi().size(), *ctx) })
    }

    /// `(src1, src2, dst)`, optionally scaled.
    ///
    /// With `swap` the operands are forwarded as `(other, self)`, for ops NPP
    /// defines as `src2 op src1`.
    pub(crate) fn binary(
        &self,
        op: &str,
        other: &Self,
        dst: &mut Self,
        swap: bool,
        scale: Option<i32>,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        let (a, a_step) = self.src()?;
        let (b, b_step) = other.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(other)?;
        self.fits_roi(&*dst)?;
        let ((s1, s1_step), (s2, s2_step)) = if swap { ((b, b_step), (a, a_step)) } else { ((a, a_step), (b, b_step)) };
        let name = symbol::<T, C>(op, &scaled_form(OUT, scale.is_some()));
        match scale {
            None => {
                let f: FnBinary<T> = unsafe { self.resolve(&name)? };
                run(&name, unsafe { f(s1, s1_step, s2, s2_step, out, out_step, roi, *ctx) })
            }
            Some(factor) => {
                let f: FnBinaryScaled<T> = unsafe { self.resolve(&name)? };
                run(&name, unsafe { f(s1, s1_step, s2, s2_step, out, out_step, roi, factor, *ctx) })
            }
        }
    }

    /// `srcdst = srcdst op src`, optionally scaled.
    pub(crate) fn binary_inplace(
        &mut self,
        op: &str,
        other: &Self,
        scale: Option<i32>,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        let (src, src_step) = other.src()?;
        let (out, out_step) = self.dst()?;
        let roi = self.fits_roi(other)?;
        let name = symbol::<T, C>(op, &scaled_form(IN_PLACE, scale.is_some()));
        match scale {
            None => {
                let f: FnBinaryInplace<T> = unsafe { self.resolve(&name)? };
                run(&name, unsafe { f(src, src_step, out, out_step, roi, *ctx) })
            }
            Some(factor) => {
                let f: FnBinaryInplaceScaled<T> = unsafe { self.resolve(&name)? };
                run(&name, unsafe { f(src, src_step, out, out_step, roi, factor, *ctx) })
            }
        }
    }

    /// `(src, constant, dst)`. One-value layouts pass the constant by value,
    /// the others pass a pointer to `C::VALUES` constants.
    pub(crate) fn with_constant<K: Pod>(
        &self,
        op: &str,
        values: &[K],
        dst: &mut Self,
        scale: Option<i32>,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        need("constants", C::VALUES, values.len())?;
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>(op, &scaled_form(OUT, scale.is_some()));
        let status = match (C::VALUES, scale) {
            (1, None) => {
                let f: FnValue<T, K> = unsafe { self.resolve(&name)? };
                unsafe { f(src, src_step, values[0], out, out_step, roi, *ctx) }
            }
            (1, Some(factor)) => {
                let f: FnValueScaled<T, K> = unsafe { self.resolve(&name)? };
                unsafe { f(src, src_step, values[0], out, out_step, roi, factor, *ctx) }
            }
            (_, None) => {
                let f: FnArray<T, K> = unsafe { self.resolve(&name)? };
                unsafe { f(src, src_step, values.as_ptr(), out, out_step, roi, *ctx) }
            }
            (_, Some(factor)) => {
                let f: FnArrayScaled<T, K> = unsafe { self.resolve(&name)? };
                unsafe { f(src, src_step, values.as_ptr(), out, out_step, roi, factor, *ctx) }
            }
        };
        run(&name, status)
    }

    /// `(constant, srcdst)` in the given form (`IR` for arithmetic, `R` for
    /// `Set`).
    pub(crate) fn with_constant_inplace<K: Pod>(
        &mut self,
        op: &str,
        form: &str,
        values: &[K],
        scale: Option<i32>,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        need("constants", C::VALUES, values.len())?;
        let (out, step) = self.dst()?;
        let roi = self.roi().size();
        let name = symbol::<T, C>(op, &scaled_form(form, scale.is_some()));
        let status = match (C::VALUES, scale) {
            (1, None) => {
                let f: FnValueInplace<T, K> = unsafe { self.resolve(&name)? };
                unsafe { f(values[0], out, step, roi, *ctx) }
            }
            (1, Some(factor)) => {
                let f: FnValueInplaceScaled<T, K> = unsafe { self.resolve(&name)? };
                unsafe { f(values[0], out, step, roi, factor, *ctx) }
            }
            (_, None) => {
                let f: FnArrayInplace<T, K> = unsafe { self.resolve(&name)? };
                unsafe { f(values.as_ptr(), out, step, roi, *ctx) }
            }
            (_, Some(factor)) => {
                let f: FnArrayInplaceScaled<T, K> = unsafe { self.resolve(&name)? };
                unsafe { f(values.as_ptr(), out, step, roi, factor, *ctx) }
            }
        };
        run(&name, status)
    }

    /// `(src, device constants, dst)`. Every layout passes a device pointer.
    pub(crate) fn with_device_constant<K: Pod>(
        &self,
        op: &str,
        values: DeviceSlice<K>,
        dst: &mut Self,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        need("device constants", C::VALUES, values.len())?;
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>(op, OUT);
        let f: FnArray<T, K> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, values.as_raw(), out, out_step, roi, *ctx) })
    }

    /// `(device constants, srcdst)`.
    pub(crate) fn with_device_constant_inplace<K: Pod>(
        &mut self,
        op: &str,
        values: DeviceSlice<K>,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        need("device constants", C::VALUES, values.len())?;
        let (out, step) = self.dst()?;
        let name = symbol::<T, C>(op, IN_PLACE);
        let f: FnArrayInplace<T, K> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(values.as_raw(), out, step, self.roi().size(), *ctx) })
    }
}
