//! Geometry transforms and border copies.

use std::ffi::c_int;

use crate::element::{symbol, Channels, Element, IN_PLACE, OUT};
use crate::error::{need, NppError, NppResult};
use crate::image::{run, NppImage};
use crate::sys::{
    Axis, FnBorder, FnConstBorderArray, FnConstBorderValue, FnInplaceMode, FnResize, FnSrcDst, FnSrcDstMode, FnSubpix,
    FnSwap, FnSwapInplace, FnWarp, FnWarpQuad, Interpolation, StreamContext,
};

impl<T: Element, C: Channels> NppImage<T, C> {
    /// `nppiMirror` into `dst`.
    pub fn mirror(&self, dst: &mut Self, axis: Axis, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>("Mirror", OUT);
        let f: FnSrcDstMode<T, T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, axis.raw(), *ctx) })
    }

    /// `nppiMirror` in place.
    pub fn mirror_inplace(&mut self, axis: Axis, ctx: &StreamContext) -> NppResult<()> {
        let (out, step) = self.dst()?;
        let name = symbol::<T, C>("Mirror", IN_PLACE);
        let f: FnInplaceMode<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(out, step, self.roi().size(), axis.raw(), *ctx) })
    }

    /// `nppiTranspose`. `dst`'s ROI must hold the transposed ROI.
    pub fn transpose(&self, dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.roi().size();
        let theirs = dst.roi().size();
        if theirs.width < roi.height || theirs.height < roi.width {
            return Err(NppError::InvalidArgument(format!("roi {theirs:?} cannot hold transpose of {roi:?}")));
        }
        let name = symbol::<T, C>("Transpose", OUT);
        let f: FnSrcDst<T, T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, *ctx) })
    }

    /// `nppiResize`: resamples this ROI onto `dst`'s ROI.
    pub fn resize(&self, dst: &mut Self, interpolation: Interpolation, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.base()?;
        let (out, out_step) = dst.base()?;
        let name = symbol::<T, C>("Resize", OUT);
        let f: FnResize<T> = unsafe { self.resolve(&name)? };
        let status = unsafe {
            f(src, src_step, self.size(), self.roi(), out, out_step, dst.size(), dst.roi(), interpolation.raw(), *ctx)
        };
        run(&name, status)
    }

    fn warp(
        &self,
        op: &str,
        dst: &mut Self,
        coeffs: &[[f64; 3]],
        interpolation: Interpolation,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        let (src, src_step) = self.base()?;
        let (out, out_step) = dst.base()?;
        let name = symbol::<T, C>(op, OUT);
        let f: FnWarp<T> = unsafe { self.resolve(&name)? };
        let status = unsafe {
            f(
                src,
                self.size(),
                src_step,
                self.roi(),
                out,
                out_step,
                dst.roi(),
                coeffs.as_ptr(),
                interpolation.raw(),
                *ctx,
            )
        };
        run(&name, status)
    }

    /// `nppiWarpAffine`: `dst(x', y') = src(x, y)` with `x' = c00 x + c01 y + c02`.
    pub fn warp_affine(
        &self,
        dst: &mut Self,
        coeffs: &[[f64; 3]; 2],
        interpolation: Interpolation,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        self.warp("WarpAffine", dst, coeffs, interpolation, ctx)
    }

    /// `nppiWarpAffineBack`: `coeffs` map destination to source.
    pub fn warp_affine_back(
        &self,
        dst: &mut Self,
        coeffs: &[[f64; 3]; 2],
        interpolation: Interpolation,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        self.warp("WarpAffineBack", dst, coeffs, interpolation, ctx)
    }

    /// `nppiWarpPerspective` with a 3x3 homography.
    pub fn warp_perspective(
        &self,
        dst: &mut Self,
        coeffs: &[[f64; 3]; 3],
        interpolation: Interpolation,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        self.warp("WarpPerspective", dst, coeffs, interpolation, ctx)
    }

    /// `nppiWarpPerspectiveBack`.
    pub fn warp_perspective_back(
        &self,
        dst: &mut Self,
        coeffs: &[[f64; 3]; 3],
        interpolation: Interpolation,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        self.warp("WarpPerspectiveBack", dst, coeffs, interpolation, ctx)
    }

    fn warp_quad(
        &self,
        op: &str,
        src_quad: &[[f64; 2]; 4],
        dst: &mut Self,
        dst_quad: &[[f64; 2]; 4],
        interpolation: Interpolation,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        let (src, src_step) = self.base()?;
        let (out, out_step) = dst.base()?;
        let name = symbol::<T, C>(op, OUT);
        let f: FnWarpQuad<T> = unsafe { self.resolve(&name)? };
        let status = unsafe {
            f(
                src,
                self.size(),
                src_step,
                self.roi(),
                src_quad.as_ptr(),
                out,
                out_step,
                dst.roi(),
                dst_quad.as_ptr(),
                interpolation.raw(),
                *ctx,
            )
        };
        run(&name, status)
    }

    /// `nppiWarpAffineQuad`: the affine transform taking `src_quad` to
    /// `dst_quad`, corners as `[x, y]`.
    ///
    /// Three corners define the transform; NPP rejects a fourth that does
    /// not fit it.
    pub fn warp_affine_quad(
        &self,
        src_quad: &[[f64; 2]; 4],
        dst: &mut Self,
        dst_quad: &[[f64; 2]; 4],
        interpolation: Interpolation,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        self.warp_quad("WarpAffineQuad", src_quad, dst, dst_quad, interpolation, ctx)
    }

    /// `nppiWarpPerspectiveQuad`: the homography taking `src_quad` to
    /// `dst_quad`.
    pub fn warp_perspective_quad(
        &self,
        src_quad: &[[f64; 2]; 4],
        dst: &mut Self,
        dst_quad: &[[f64; 2]; 4],
        interpolation: Interpolation,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        self.warp_quad("WarpPerspectiveQuad", src_quad, dst, dst_quad, interpolation, ctx)
    }

    /// `nppiCopyConstBorder`: copies this ROI into `dst` at `(top, left)`
    /// and fills the rest of `dst`'s ROI with `value`.
    pub fn copy_const_border(
        &self,
        dst: &mut Self,
        top: i32,
        left: i32,
        value: &[T],
        ctx: &StreamContext,
    ) -> NppResult<()> {
        need("border value", C::VALUES, value.len())?;
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let (roi, out_roi) = (self.roi().size(), dst.roi().size());
        let name = symbol::<T, C>("CopyConstBorder", OUT);
        let status = if C::VALUES == 1 {
            let f: FnConstBorderValue<T> = unsafe { self.resolve(&name)? };
            unsafe { f(src, src_step, roi, out, out_step, out_roi, top, left, value[0], *ctx) }
        } else {
            let f: FnConstBorderArray<T> = unsafe { self.resolve(&name)? };
            unsafe { f(src, src_step, roi, out, out_step, out_roi, top, left, value.as_ptr(), *ctx) }
        };
        run(&name, status)
    }

    fn border(&self, op: &str, dst: &mut Self, top: i32, left: i32, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let (roi, out_roi) = (self.roi().size(), dst.roi().size());
        let name = symbol::<T, C>(op, OUT);
        let f: FnBorder<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, roi, out, out_step, out_roi, top, left, *ctx) })
    }

    /// `nppiCopyReplicateBorder`: border pixels repeat the nearest edge.
    pub fn copy_replicate_border(&self, dst: &mut Self, top: i32, left: i32, ctx: &StreamContext) -> NppResult<()> {
        self.border("CopyReplicateBorder", dst, top, left, ctx)
    }

    /// `nppiCopyWrapBorder`: border pixels wrap around the image.
    pub fn copy_wrap_border(&self, dst: &mut Self, top: i32, left: i32, ctx: &StreamContext) -> NppResult<()> {
        self.border("CopyWrapBorder", dst, top, left, ctx)
    }

    /// `nppiCopySubpix`: copy with a bilinear subpixel shift.
    pub fn copy_subpix(&self, dst: &mut Self, dx: f32, dy: f32, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>("CopySubpix", OUT);
        let f: FnSubpix<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, dx, dy, *ctx) })
    }

    /// `nppiSwapChannels`: `dst` channel `i` takes source channel `order[i]`.
    pub fn swap_channels(&self, dst: &mut Self, order: &[i32], ctx: &StreamContext) -> NppResult<()> {
        need("channel order", C::VALUES, order.len())?;
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>("SwapChannels", OUT);
        let f: FnSwap<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, order.as_ptr() as *const c_int, *ctx) })
    }

    /// `nppiSwapChannels` in place.
    pub fn swap_channels_inplace(&mut self, order: &[i32], ctx: &StreamContext) -> NppResult<()> {
        need("channel order", C::VALUES, order.len())?;
        let (out, step) = self.dst()?;
        let name = symbol::<T, C>("SwapChannels", IN_PLACE);
        let f: FnSwapInplace<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(out, step, self.roi().size(), order.as_ptr() as *const c_int, *ctx) })
    }
}
