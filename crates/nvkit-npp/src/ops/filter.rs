//! Convolution with a device-resident kernel.

use nvkit_core::DeviceSlice;

use crate::element::{symbol, Channels, Element, OUT};
use crate::error::{need, NppResult};
use crate::image::{run, NppImage};
use crate::sys::{BorderType, FnFilter, FnFilterBorder, Point, Rect, Size, StreamContext};

/// A convolution kernel in device memory.
///
/// NPP reads the coefficients in reverse order, as in a true convolution.
#[derive(Debug, Clone, Copy)]
pub struct Kernel<W> {
    /// `size.width * size.height` coefficients, row major.
    pub coefficients: DeviceSlice<W>,
    /// Kernel width and height.
    pub size: Size,
    /// Kernel origin relative to its top-left coefficient.
    pub anchor: Point,
}

impl<W> Kernel<W> {
    /// A kernel centred on its middle coefficient.
    pub fn centered(coefficients: DeviceSlice<W>, size: Size) -> Self {
        Self { coefficients, size, anchor: Point::new(size.width / 2, size.height / 2) }
    }

    fn check(&self) -> NppResult<()> {
        need("kernel coefficients", self.size.area(), self.coefficients.len())
    }
}

impl<T: Element, C: Channels> NppImage<T, C> {
    /// `nppiFilter`: convolves the ROI. Source pixels outside the ROI are
    /// read, so the ROI must leave room for the kernel.
    pub fn filter(&self, dst: &mut Self, kernel: &Kernel<T::Weight>, ctx: &StreamContext) -> NppResult<()> {
        kernel.check()?;
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let roi = self.fits_roi(&*dst)?;
        let name = symbol::<T, C>(&format!("Filter{}", T::WEIGHTED), OUT);
        let f: FnFilter<T, T::Weight> = unsafe { self.resolve(&name)? };
        let status = unsafe {
            f(src, src_step, out, out_step, roi, kernel.coefficients.as_raw(), kernel.size, kernel.anchor, *ctx)
        };
        run(&name, status)
    }

    /// `nppiFilterBorder`: convolves with `border` handling outside `area`.
    ///
    /// `area` is the source extent relative to the ROI origin; `None` uses
    /// the ROI itself. Output covers `dst`'s ROI.
    pub fn filter_border(
        &self,
        dst: &mut Self,
        kernel: &Kernel<T::Weight>,
        border: BorderType,
        area: Option<Rect>,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        kernel.check()?;
        let (src, src_step) = self.src()?;
        let (out, out_step) = dst.dst()?;
        let area = area.unwrap_or(Rect::from_parts(Point::default(), self.roi().size()));
        let name = symbol::<T, C>(&format!("FilterBorder{}", T::WEIGHTED), OUT);
        let f: FnFilterBorder<T, T::Weight> = unsafe { self.resolve(&name)? };
        let status = unsafe {
            f(
                src,
                src_step,
                area.size(),
                area.origin(),
                out,
                out_step,
                dst.roi().size(),
                kernel.coefficients.as_raw(),
                kernel.size,
                kernel.anchor,
                border.raw(),
                *ctx,
            )
        };
        run(&name, status)
    }
}
