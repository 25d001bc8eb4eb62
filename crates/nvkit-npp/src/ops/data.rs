//! Data exchange: copy, set, element type conversion and scaling.
//!
//! Conversions between element types are bounded on the pair traits in
//! [`crate::element`], so each method only accepts pairs whose native entry
//! point has the argument list it passes.

use nvkit_core::Complex32;

use crate::element::{
    symbol, symbol_pair, symbol_types, Channels, ConvertRounded, ConvertTo, Element, Planar, ScaleHinted, ScaleRange,
    ScaleTo, C1, C2, OUT,
};
use crate::error::{need, NppError, NppResult};
use crate::image::{run, NppImage};
use crate::sys::{
    FnArrayMask, FnFromPlanes, FnSrcDst, FnSrcDstMask, FnSrcDstMode, FnSrcDstRange, FnToPlanes, FnValueInplace,
    FnValueMask, HintAlgorithm, RoundMode, Size, StreamContext,
};

/// Masked forms.
const MASKED: &str = "MR";
/// Single channel of a multichannel image.
const CHANNEL: &str = "CR";

/// Component of a complex pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexPart {
    /// Real component.
    Real,
    /// Imaginary component.
    Imaginary,
}

impl<T: Element, C: Channels> NppImage<T, C> {
    /// `nppiCopy`: copies this ROI into `dst`'s ROI.
    pub fn copy(&self, dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
        self.unary("Copy", dst, ctx)
    }

    /// `nppiCopy_*MR`: copies pixels whose `mask` value is non-zero.
    pub fn copy_masked(&self, dst: &mut Self, mask: &NppImage<u8, C1>, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let (m, m_step) = mask.src()?;
        let roi = self.fits_roi(&*dst)?;
        self.fits_roi(mask)?;
        let name = symbol::<T, C>("Copy", MASKED);
        let f: FnSrcDstMask<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out, out_step, roi, m, m_step, *ctx) })
    }

    /// `nppiCopy_*CR`: copies channel `from` of this image into channel `to`
    /// of `dst`.
    pub fn copy_channel(&self, from: usize, dst: &mut Self, to: usize, ctx: &StreamContext) -> NppResult<()> {
        let (from, to) = (Self::channel(from)?, Self::channel(to)?);
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>("Copy", CHANNEL);
        let f: FnSrcDst<T, T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src.wrapping_add(from), src_step, out.wrapping_add(to), out_step, roi, *ctx) })
    }

    /// `nppiCopy_*C1R` from a multichannel layout: extracts one channel.
    pub fn extract_channel(&self, channel: usize, dst: &mut NppImage<T, C1>, ctx: &StreamContext) -> NppResult<()> {
        let channel = Self::channel(channel)?;
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>("Copy", &format!("{}R", C1::TAG));
        let f: FnSrcDst<T, T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src.wrapping_add(channel), src_step, out, out_step, roi, *ctx) })
    }

    /// `nppiSet`: fills the ROI with one value per channel.
    pub fn set(&mut self, values: &[T::Constant], ctx: &StreamContext) -> NppResult<()> {
        self.with_constant_inplace("Set", OUT, values, None, ctx)
    }

    /// `nppiSet_*MR`: fills pixels whose `mask` value is non-zero.
    pub fn set_masked(&mut self, values: &[T::Constant], mask: &NppImage<u8, C1>, ctx: &StreamContext) -> NppResult<()> {
        need("constants", C::VALUES, values.len())?;
        let (out, step) = self.dst()?;
        let (m, m_step) = mask.src()?;
        let roi = self.fits_roi(mask)?;
        let name = symbol::<T, C>("Set", MASKED);
        let status = if C::VALUES == 1 {
            let f: FnValueMask<T, T::Constant> = unsafe { self.resolve(&name)? };
            unsafe { f(values[0], out, step, roi, m, m_step, *ctx) }
        } else {
            let f: FnArrayMask<T, T::Constant> = unsafe { self.resolve(&name)? };
            unsafe { f(values.as_ptr(), out, step, roi, m, m_step, *ctx) }
        };
        run(&name, status)
    }

    /// `nppiSet_*CR`: fills one channel of the ROI.
    pub fn set_channel(&mut self, value: T::Constant, channel: usize, ctx: &StreamContext) -> NppResult<()> {
        let channel = Self::channel(channel)?;
        let (out, step) = self.dst()?;
        let name = symbol::<T, C>("Set", CHANNEL);
        let f: FnValueInplace<T, T::Constant> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(value, out.wrapping_add(channel), step, self.roi().size(), *ctx) })
    }

    fn convert_pair<D: Element>(&self, op: &str, dst: &mut NppImage<D, C>) -> NppResult<PairCall<T, D>> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        Ok(PairCall { name: symbol_pair::<T, D, C>(op), src, src_step, out, out_step, roi })
    }

    /// `nppiConvert_{T}{D}`: converts to another element type.
    ///
    /// Narrowing integer conversions saturate.
    pub fn convert<D: Element>(&self, dst: &mut NppImage<D, C>, ctx: &StreamContext) -> NppResult<()>
    where
        T: ConvertTo<D>,
    {
        let c = self.convert_pair("Convert", dst)?;
        let f: FnSrcDst<T, D> = unsafe { self.resolve(&c.name)? };
        run(&c.name, unsafe { f(c.src, c.src_step, c.out, c.out_step, c.roi, *ctx) })
    }

    /// `nppiConvert_{T}{D}` with an explicit rounding mode, for float to
    /// integer conversions.
    pub fn convert_rounded<D: Element>(
        &self,
        dst: &mut NppImage<D, C>,
        mode: RoundMode,
        ctx: &StreamContext,
    ) -> NppResult<()>
    where
        T: ConvertRounded<D>,
    {
        let c = self.convert_pair("Convert", dst)?;
        let f: FnSrcDstMode<T, D> = unsafe { self.resolve(&c.name)? };
        run(&c.name, unsafe { f(c.src, c.src_step, c.out, c.out_step, c.roi, mode.raw(), *ctx) })
    }

    /// `nppiScale_{T}{D}`: stretches the full range of `T` onto `D`.
    pub fn scale<D: Element>(&self, dst: &mut NppImage<D, C>, ctx: &StreamContext) -> NppResult<()>
    where
        T: ScaleTo<D>,
    {
        let c = self.convert_pair("Scale", dst)?;
        let f: FnSrcDst<T, D> = unsafe { self.resolve(&c.name)? };
        run(&c.name, unsafe { f(c.src, c.src_step, c.out, c.out_step, c.roi, *ctx) })
    }

    /// `nppiScale_{T}8u`: compresses the full range of `T` into `u8`.
    pub fn scale_hinted<D: Element>(
        &self,
        dst: &mut NppImage<D, C>,
        hint: HintAlgorithm,
        ctx: &StreamContext,
    ) -> NppResult<()>
    where
        T: ScaleHinted<D>,
    {
        let c = self.convert_pair("Scale", dst)?;
        let f: FnSrcDstMode<T, D> = unsafe { self.resolve(&c.name)? };
        run(&c.name, unsafe { f(c.src, c.src_step, c.out, c.out_step, c.roi, hint.raw(), *ctx) })
    }

    /// `nppiScale` between `u8` and `f32`: maps `0..=255` onto
    /// `[min, max]`, or `[min, max]` onto `0..=255`.
    pub fn scale_range<D: Element>(
        &self,
        dst: &mut NppImage<D, C>,
        min: f32,
        max: f32,
        ctx: &StreamContext,
    ) -> NppResult<()>
    where
        T: ScaleRange<D>,
    {
        if min.is_nan() || max.is_nan() || min >= max {
            return Err(NppError::InvalidArgument(format!("scale range [{min}, {max}]")));
        }
        let c = self.convert_pair("Scale", dst)?;
        let f: FnSrcDstRange<T, D> = unsafe { self.resolve(&c.name)? };
        run(&c.name, unsafe { f(c.src, c.src_step, c.out, c.out_step, c.roi, min, max, *ctx) })
    }
}

/// Resolved arguments of a two-type call.
struct PairCall<S, D> {
    name: String,
    src: *const S,
    src_step: i32,
    out: *mut D,
    out_step: i32,
    roi: Size,
}

impl<T: Element> NppImage<T, C1> {
    /// `nppiCopy_*C1{C}R`: writes this plane into one channel of `dst`.
    pub fn insert_channel<C: Channels>(
        &self,
        dst: &mut NppImage<T, C>,
        channel: usize,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        let channel = NppImage::<T, C>::channel(channel)?;
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C1>("Copy", &format!("{}R", C::TAG));
        let f: FnSrcDst<T, T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, out.wrapping_add(channel), out_step, roi, *ctx) })
    }
}

impl NppImage<Complex32, C1> {
    /// `nppiCopy_32f_C2C1R`: copies one component into a real image.
    pub fn copy_component(&self, part: ComplexPart, dst: &mut NppImage<f32, C1>, ctx: &StreamContext) -> NppResult<()> {
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let offset = match part {
            ComplexPart::Real => 0,
            ComplexPart::Imaginary => 1,
        };
        let name = symbol_types::<C2>("Copy", f32::SUFFIX, &format!("{}R", C1::TAG));
        let f: FnSrcDst<f32, f32> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src.cast::<f32>().wrapping_add(offset), src_step, out, out_step, roi, *ctx) })
    }
}

impl<T: Element, C: Planar> NppImage<T, C> {
    /// Checks the plane count and that every plane shares one pitch and can
    /// hold this ROI.
    fn check_planes<'a>(&self, planes: impl IntoIterator<Item = &'a NppImage<T, C1>>) -> NppResult<i32> {
        let mut count = 0;
        let mut pitch = None;
        for plane in planes {
            self.fits_roi(plane)?;
            match pitch {
                None => pitch = Some(plane.pitch()),
                Some(p) if p != plane.pitch() => {
                    return Err(NppError::InvalidArgument(format!("plane pitch {} differs from {p}", plane.pitch())));
                }
                Some(_) => {}
            }
            count += 1;
        }
        if count != C::COUNT {
            return Err(NppError::InvalidArgument(format!("{count} planes for {} channels", C::COUNT)));
        }
        pitch.ok_or_else(|| NppError::InvalidArgument("no planes".into()))
    }

    /// `nppiCopy_*C{n}P{n}R`: splits the ROI into one plane per channel.
    ///
    /// `planes` holds exactly one image per channel, all with the same pitch.
    pub fn copy_to_planes(&self, planes: &mut [NppImage<T, C1>], ctx: &StreamContext) -> NppResult<()> {
        let plane_step = self.check_planes(planes.iter())?;
        let (src, src_step) = self.src()?;
        let ptrs = planes.iter_mut().map(|p| p.dst().map(|(ptr, _)| ptr)).collect::<NppResult<Vec<_>>>()?;
        let name = symbol::<T, C>("Copy", &format!("P{}R", C::COUNT));
        let f: FnToPlanes<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(src, src_step, ptrs.as_ptr(), plane_step, self.roi().size(), *ctx) })
    }

    /// `nppiCopy_*P{n}C{n}R`: interleaves one plane per channel into the ROI.
    pub fn copy_from_planes(&mut self, planes: &[NppImage<T, C1>], ctx: &StreamContext) -> NppResult<()> {
        let plane_step = self.check_planes(planes.iter())?;
        let ptrs = planes.iter().map(|p| p.src().map(|(ptr, _)| ptr)).collect::<NppResult<Vec<_>>>()?;
        let (out, out_step) = self.dst()?;
        let name = format!("nppiCopy_{}_P{}{}R_Ctx", T::SUFFIX, C::COUNT, C::TAG);
        let f: FnFromPlanes<T> = unsafe { self.resolve(&name)? };
        run(&name, unsafe { f(ptrs.as_ptr(), plane_step, out, out_step, self.roi().size(), *ctx) })
    }
}
