//! Color twist, alpha compositing and complex magnitude.

use nvkit_core::Complex32;

use crate::element::{symbol, symbol_types, Ac4, Channels, Element, C1, C4, IN_PLACE, OUT};
use crate::error::NppResult;
use crate::image::{run, NppImage};
use crate::sys::{
    AlphaOp, FnAlphaComp, FnSrcDst, FnTwist, FnTwistConst, FnTwistConstInplace, FnTwistInplace, StreamContext,
};

impl<T: Element, C: Channels> NppImage<T, C> {
    /// `nppiColorTwist`: each output channel `i` is
    /// `twist[i][0] r + twist[i][1] g + twist[i][2] b + twist[i][3]`.
    pub fn color_twist(&self, dst: &mut Self, twist: &[[f32; 4]; 3], ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>(&format!("ColorTwist{}", T::WEIGHTED), OUT);
        let f: FnTwist<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, twist.as_ptr(), *ctx) })
    }

    /// `nppiColorTwist` in place.
    pub fn color_twist_inplace(&mut self, twist: &[[f32; 4]; 3], ctx: &StreamContext) -> NppResult<()> {
        let (out, step) = self.dst()?;
        let name = symbol::<T, C>(&format!("ColorTwist{}", T::WEIGHTED), IN_PLACE);
        let f: FnTwistInplace<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(out, step, self.roi().size(), twist.as_ptr(), *ctx) })
    }
}

impl<T: Element> NppImage<T, C4> {
    /// `nppiColorTwist32fC`: a 4x4 twist over all four channels plus a
    /// constant per channel, `dst[i] = sum_j twist[i][j] src[j] + constants[i]`.
    pub fn color_twist_const(
        &self,
        dst: &mut Self,
        twist: &[[f32; 4]; 4],
        constants: &[f32; 4],
        ctx: &StreamContext,
    ) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C4>("ColorTwist32fC", OUT);
        let f: FnTwistConst<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, twist.as_ptr(), constants.as_ptr(), *ctx) })
    }

    /// `nppiColorTwist32fC` in place.
    pub fn color_twist_const_inplace(
        &mut self,
        twist: &[[f32; 4]; 4],
        constants: &[f32; 4],
        ctx: &StreamContext,
    ) -> NppResult<()> {
        let (out, step) = self.dst()?;
        let name = symbol::<T, C4>("ColorTwist32fC", IN_PLACE);
        let f: FnTwistConstInplace<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(out, step, self.roi().size(), twist.as_ptr(), constants.as_ptr(), *ctx) })
    }
}

impl<T: Element> NppImage<T, Ac4> {
    /// `nppiAlphaComp`: composites `self` and `other` using their alpha
    /// channels.
    pub fn alpha_comp(&self, other: &Self, dst: &mut Self, op: AlphaOp, ctx: &StreamContext) -> NppResult<()> {
        let (a, a_step) = self.src()?;
        let (b, b_step) = other.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(other)?;
        self.fits_roi(&*dst)?;
        let name = symbol::<T, Ac4>("AlphaComp", OUT);
        let f: FnAlphaComp<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(a, a_step, b, b_step, out, out_step, roi, op.raw(), *ctx) })
    }
}

impl NppImage<Complex32, C1> {
    fn magnitude_op(&self, op: &str, dst: &mut NppImage<f32, C1>, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol_types::<C1>(op, "32fc32f", OUT);
        let f: FnSrcDst<Complex32, f32> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, *ctx) })
    }

    /// `nppiMagnitude_32fc32f`: `|z|` per pixel.
    pub fn magnitude(&self, dst: &mut NppImage<f32, C1>, ctx: &StreamContext) -> NppResult<()> {
        self.magnitude_op("Magnitude", dst, ctx)
    }

    /// `nppiMagnitudeSqr_32fc32f`: `|z|^2`, cheaper when only ordering matters.
    pub fn magnitude_sqr(&self, dst: &mut NppImage<f32, C1>, ctx: &StreamContext) -> NppResult<()> {
        self.magnitude_op("MagnitudeSqr", dst, ctx)
    }
}
