//! Bitwise logic and shifts on integer images.

use crate::element::{Channels, IntegerElement, IN_PLACE};
use crate::error::NppResult;
use crate::image::NppImage;
use crate::sys::StreamContext;

macro_rules! bitwise {
    ($($op:literal => $image:ident, $inplace:ident, $constant:ident, $constant_inplace:ident;)*) => {
        impl<T: IntegerElement, C: Channels> NppImage<T, C> {
            $(
                #[doc = concat!("`nppi", $op, "` of two images.")]
                pub fn $image(&self, other: &Self, dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
                    self.binary($op, other, dst, false, None, ctx)
                }

                #[doc = concat!("`nppi", $op, "` in place.")]
                pub fn $inplace(&mut self, other: &Self, ctx: &StreamContext) -> NppResult<()> {
                    self.binary_inplace($op, other, None, ctx)
                }

                #[doc = concat!("`nppi", $op, "C` with one constant per channel.")]
                pub fn $constant(&self, values: &[T::Constant], dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
                    self.with_constant(concat!($op, "C"), values, dst, None, ctx)
                }

                #[doc = concat!("`nppi", $op, "C` in place.")]
                pub fn $constant_inplace(&mut self, values: &[T::Constant], ctx: &StreamContext) -> NppResult<()> {
                    self.with_constant_inplace(concat!($op, "C"), IN_PLACE, values, None, ctx)
                }
            )*
        }
    };
}

bitwise! {
    "And" => and, and_inplace, and_const, and_const_inplace;
    "Or" => or, or_inplace, or_const, or_const_inplace;
    "Xor" => xor, xor_inplace, xor_const, xor_const_inplace;
}

impl<T: IntegerElement, C: Channels> NppImage<T, C> {
    /// `nppiLShiftC`: shift each channel left by its count.
    pub fn lshift(&self, counts: &[u32], dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
        self.with_constant("LShiftC", counts, dst, None, ctx)
    }

    /// `nppiLShiftC` in place.
    pub fn lshift_inplace(&mut self, counts: &[u32], ctx: &StreamContext) -> NppResult<()> {
        self.with_constant_inplace("LShiftC", IN_PLACE, counts, None, ctx)
    }

    /// `nppiRShiftC`: arithmetic shift for signed elements, logical otherwise.
    pub fn rshift(&self, counts: &[u32], dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
        self.with_constant("RShiftC", counts, dst, None, ctx)
    }

    /// `nppiRShiftC` in place.
    pub fn rshift_inplace(&mut self, counts: &[u32], ctx: &StreamContext) -> NppResult<()> {
        self.with_constant_inplace("RShiftC", IN_PLACE, counts, None, ctx)
    }
}
