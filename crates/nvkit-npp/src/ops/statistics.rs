//! Image comparison metrics and dot product.
//!
//! Each metric needs a device scratch buffer whose size depends on the ROI.
//! The plain form allocates one per call; the `_with_buffer` form takes a
//! caller buffer and checks its size before calling NPP.

use nvkit_core::DeviceSlice;
use tracing::trace;

use crate::buffer::ScratchBuffer;
use crate::element::{symbol_types, Channels, Element, OUT};
use crate::error::{need, NppResult};
use crate::image::{run, NppImage};
use crate::sys::{FnBufferSize, FnMetric, StreamContext};

/// A metric entry point family.
struct Metric {
    op: &'static str,
    /// True if the name carries the `64f` output type after the element type.
    typed_output: bool,
    /// Output values per call: 1, or one per channel.
    per_channel: bool,
}

const MAXIMUM_ERROR: Metric = Metric { op: "MaximumError", typed_output: false, per_channel: false };
const AVERAGE_ERROR: Metric = Metric { op: "AverageError", typed_output: false, per_channel: false };
const MAXIMUM_RELATIVE_ERROR: Metric = Metric { op: "MaximumRelativeError", typed_output: false, per_channel: false };
const AVERAGE_RELATIVE_ERROR: Metric = Metric { op: "AverageRelativeError", typed_output: false, per_channel: false };
const DOT_PRODUCT: Metric = Metric { op: "DotProd", typed_output: true, per_channel: true };

impl Metric {
    fn types<T: Element>(&self) -> String {
        if self.typed_output && T::SUFFIX != "64f" { format!("{}64f", T::SUFFIX) } else { T::SUFFIX.to_owned() }
    }

    fn outputs<C: Channels>(&self) -> usize {
        if self.per_channel { C::VALUES } else { 1 }
    }
}

impl<T: Element, C: Channels> NppImage<T, C> {
    fn metric_buffer_size(&self, metric: &Metric, ctx: &StreamContext) -> NppResult<usize> {
        self.src()?;
        let name = symbol_types::<C>(&format!("{}GetBufferHostSize", metric.op), &metric.types::<T>(), OUT);
        let f: FnBufferSize = unsafe { self.resolve(&name)? };
        let mut size = 0usize;
        run(&name, unsafe { f(self.roi().size(), &mut size, *ctx) })?;
        Ok(size)
    }

    fn metric(
        &self,
        metric: &Metric,
        other: &Self,
        out: DeviceSlice<f64>,
        buffer: Option<DeviceSlice<u8>>,
        ctx: &StreamContext,
    ) -> NppResult<()> {
        need("output", metric.outputs::<C>(), out.len())?;
        let (a, a_step) = self.src()?;
        let (b, b_step) = other.src()?;
        let roi = self.fits_roi(other)?;
        let required = self.metric_buffer_size(metric, ctx)?;

        let mut owned = None;
        let scratch = match buffer {
            Some(buffer) => {
                need("scratch buffer", required, buffer.len())?;
                buffer
            }
            None => {
                trace!(op = metric.op, size = required, "allocating metric scratch buffer");
                owned.insert(ScratchBuffer::new(self.npp(), required)?).as_slice()?
            }
        };

        let name = symbol_types::<C>(metric.op, &metric.types::<T>(), OUT);
        let result = unsafe { self.resolve::<FnMetric<T>>(&name) }
            .and_then(|f| run(&name, unsafe { f(a, a_step, b, b_step, roi, out.as_raw(), scratch.as_raw(), *ctx) }));
        let released = match owned {
            Some(mut buffer) => buffer.release(),
            None => Ok(()),
        };
        result.and(released)
    }
}

macro_rules! metrics {
    ($($metric:ident => $doc:literal, $plain:ident, $with_buffer:ident, $size:ident;)*) => {
        impl<T: Element, C: Channels> NppImage<T, C> {
            $(
                #[doc = concat!($doc, " of `self` against `other`, written to `out` on the device.")]
                ///
                /// Allocates and frees a scratch buffer.
                pub fn $plain(&self, other: &Self, out: DeviceSlice<f64>, ctx: &StreamContext) -> NppResult<()> {
                    self.metric(&$metric, other, out, None, ctx)
                }

                #[doc = concat!($doc, " using a caller scratch buffer of at least `", stringify!($size), "` bytes.")]
                pub fn $with_buffer(
                    &self,
                    other: &Self,
                    out: DeviceSlice<f64>,
                    buffer: DeviceSlice<u8>,
                    ctx: &StreamContext,
                ) -> NppResult<()> {
                    self.metric(&$metric, other, out, Some(buffer), ctx)
                }

                #[doc = concat!("Scratch bytes needed by `", stringify!($plain), "` for the current ROI.")]
                pub fn $size(&self, ctx: &StreamContext) -> NppResult<usize> {
                    self.metric_buffer_size(&$metric, ctx)
                }
            )*
        }
    };
}

metrics! {
    MAXIMUM_ERROR => "Maximum absolute difference",
        max_error, max_error_with_buffer, max_error_buffer_size;
    AVERAGE_ERROR => "Mean absolute difference",
        average_error, average_error_with_buffer, average_error_buffer_size;
    MAXIMUM_RELATIVE_ERROR => "Maximum relative difference",
        max_relative_error, max_relative_error_with_buffer, max_relative_error_buffer_size;
    AVERAGE_RELATIVE_ERROR => "Mean relative difference",
        average_relative_error, average_relative_error_with_buffer, average_relative_error_buffer_size;
    DOT_PRODUCT => "Per-channel dot product",
        dot_product, dot_product_with_buffer, dot_product_buffer_size;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Ac4, C3, C4};

    #[test]
    fn test_metric_names() {
        assert_eq!(MAXIMUM_ERROR.types::<u8>(), "8u");
        assert_eq!(DOT_PRODUCT.types::<i16>(), "16s64f");
        assert_eq!(DOT_PRODUCT.types::<f64>(), "64f");
        assert_eq!(DOT_PRODUCT.outputs::<C4>(), 4);
        assert_eq!(DOT_PRODUCT.outputs::<Ac4>(), 3);
        assert_eq!(AVERAGE_ERROR.outputs::<C3>(), 1);
    }
}
