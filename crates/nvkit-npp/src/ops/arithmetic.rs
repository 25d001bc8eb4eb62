//! Arithmetic: `Add`, `Sub`, `Mul`, `Div` and the unary `Sqr`, `Sqrt`, `Abs`.
//!
//! Float elements compute exactly; integer elements take a scale factor `n`
//! and store `result * 2^-n`, saturated. `sub` and `div` compute
//! `self - other` and `self / other` in every form. The `_device_const`
//! forms read their constants from device memory.

use nvkit_core::DeviceSlice;

use crate::element::{Channels, FloatElement, IntegerElement, IN_PLACE};
use crate::error::NppResult;
use crate::image::NppImage;
use crate::sys::StreamContext;

macro_rules! float_arithmetic {
    ($(
        $op:literal, $sym:literal, $swap:literal =>
            $image:ident, $inplace:ident, $constant:ident, $constant_inplace:ident,
            $device:ident, $device_inplace:ident;
    )*) => {
        impl<T: FloatElement, C: Channels> NppImage<T, C> {
            $(
                #[doc = concat!("`nppi", $op, "`: `dst = self ", $sym, " other` over the ROI.")]
                pub fn $image(&self, other: &Self, dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
                    self.binary($op, other, dst, $swap, None, ctx)
                }

                #[doc = concat!("`nppi", $op, "` in place: `self = self ", $sym, " other`.")]
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

                #[doc = concat!("`nppi", $op, "DeviceC` with the per-channel constants in device memory.")]
                pub fn $device(
                    &self,
                    values: DeviceSlice<T::Constant>,
                    dst: &mut Self,
                    ctx: &StreamContext,
                ) -> NppResult<()> {
                    self.with_device_constant(concat!($op, "DeviceC"), values, dst, ctx)
                }

                #[doc = concat!("`nppi", $op, "DeviceC` in place.")]
                pub fn $device_inplace(&mut self, values: DeviceSlice<T::Constant>, ctx: &StreamContext) -> NppResult<()> {
                    self.with_device_constant_inplace(concat!($op, "DeviceC"), values, ctx)
                }
            )*
        }
    };
}

float_arithmetic! {
    "Add", "+", false =>
        add, add_inplace, add_const, add_const_inplace, add_device_const, add_device_const_inplace;
    "Sub", "-", true =>
        sub, sub_inplace, sub_const, sub_const_inplace, sub_device_const, sub_device_const_inplace;
    "Mul", "*", false =>
        mul, mul_inplace, mul_const, mul_const_inplace, mul_device_const, mul_device_const_inplace;
    "Div", "/", true =>
        div, div_inplace, div_const, div_const_inplace, div_device_const, div_device_const_inplace;
}

macro_rules! integer_arithmetic {
    ($($op:literal, $sym:literal, $swap:literal => $image:ident, $inplace:ident, $constant:ident, $constant_inplace:ident;)*) => {
        impl<T: IntegerElement, C: Channels> NppImage<T, C> {
            $(
                #[doc = concat!("`nppi", $op, "_*Sfs`: scaled `dst = self ", $sym, " other`.")]
                pub fn $image(&self, other: &Self, dst: &mut Self, scale: i32, ctx: &StreamContext) -> NppResult<()> {
                    self.binary($op, other, dst, $swap, Some(scale), ctx)
                }

                #[doc = concat!("`nppi", $op, "_*ISfs`: scaled, in place.")]
                pub fn $inplace(&mut self, other: &Self, scale: i32, ctx: &StreamContext) -> NppResult<()> {
                    self.binary_inplace($op, other, Some(scale), ctx)
                }

                #[doc = concat!("`nppi", $op, "C_*Sfs` with one constant per channel.")]
                pub fn $constant(
                    &self,
                    values: &[T::Constant],
                    dst: &mut Self,
                    scale: i32,
                    ctx: &StreamContext,
                ) -> NppResult<()> {
                    self.with_constant(concat!($op, "C"), values, dst, Some(scale), ctx)
                }

                #[doc = concat!("`nppi", $op, "C_*ISfs`.")]
                pub fn $constant_inplace(&mut self, values: &[T::Constant], scale: i32, ctx: &StreamContext) -> NppResult<()> {
                    self.with_constant_inplace(concat!($op, "C"), IN_PLACE, values, Some(scale), ctx)
                }
            )*
        }
    };
}

integer_arithmetic! {
    "Add", "+", false => add_scaled, add_inplace_scaled, add_const_scaled, add_const_inplace_scaled;
    "Sub", "-", true => sub_scaled, sub_inplace_scaled, sub_const_scaled, sub_const_inplace_scaled;
    "Mul", "*", false => mul_scaled, mul_inplace_scaled, mul_const_scaled, mul_const_inplace_scaled;
    "Div", "/", true => div_scaled, div_inplace_scaled, div_const_scaled, div_const_inplace_scaled;
}

impl<T: FloatElement, C: Channels> NppImage<T, C> {
    /// `nppiSqr`: `dst = self * self`.
    pub fn sqr(&self, dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
        self.unary("Sqr", dst, ctx)
    }

    /// `nppiSqr` in place.
    pub fn sqr_inplace(&mut self, ctx: &StreamContext) -> NppResult<()> {
        self.unary_inplace("Sqr", ctx)
    }

    /// `nppiSqrt`.
    pub fn sqrt(&self, dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
        self.unary("Sqrt", dst, ctx)
    }

    /// `nppiSqrt` in place.
    pub fn sqrt_inplace(&mut self, ctx: &StreamContext) -> NppResult<()> {
        self.unary_inplace("Sqrt", ctx)
    }

    /// `nppiAbs`.
    pub fn abs(&self, dst: &mut Self, ctx: &StreamContext) -> NppResult<()> {
        self.unary("Abs", dst, ctx)
    }

    /// `nppiAbs` in place.
    pub fn abs_inplace(&mut self, ctx: &StreamContext) -> NppResult<()> {
        self.unary_inplace("Abs", ctx)
    }
}
