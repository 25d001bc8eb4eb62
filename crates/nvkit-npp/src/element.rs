//! Pixel element types and channel layouts.
//!
//! NPP names each entry point after its element type and channel layout,
//! e.g. `nppiAddC_32f_C3IR_Ctx`. [`Element`] and [`Channels`] carry those
//! name parts so one generic image type covers every combination. A
//! combination NPP does not export fails at call time with
//! `SymbolNotFound`.

use std::fmt;

use bytemuck::Pod;
use half::f16;
use nvkit_core::Complex32;

mod private {
    pub trait Sealed {}
}

/// A pixel component type.
pub trait Element: private::Sealed + Pod + fmt::Debug + Send + Sync + 'static {
    /// Type name part, e.g. `32f`.
    const SUFFIX: &'static str;
    /// `nppiMalloc_*` type with the same component width.
    const ALLOC: &'static str;
    /// Name part inserted after weighted ops (`Filter`, `ColorTwist`) when
    /// the weights are `f32` but the pixels are not.
    const WEIGHTED: &'static str;
    /// Constant argument type of `Set`, `AddC` and friends.
    type Constant: Pod + fmt::Debug;
    /// Filter kernel coefficient type.
    type Weight: Pod + fmt::Debug;
}

/// Elements with unscaled arithmetic.
pub trait FloatElement: Element {}

/// Elements with scale-factor arithmetic and bitwise logic.
pub trait IntegerElement: Element {}

macro_rules! element {
    ($ty:ty, $suffix:literal, $alloc:literal, $weighted:literal, $constant:ty, $weight:ty, $kind:ident) => {
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const SUFFIX: &'static str = $suffix;
            const ALLOC: &'static str = $alloc;
            const WEIGHTED: &'static str = $weighted;
            type Constant = $constant;
            type Weight = $weight;
        }

        impl $kind for $ty {}
    };
}

element!(u8, "8u", "8u", "32f", u8, f32, IntegerElement);
element!(i8, "8s", "8u", "32f", i8, f32, IntegerElement);
element!(u16, "16u", "16u", "32f", u16, f32, IntegerElement);
element!(i16, "16s", "16u", "32f", i16, f32, IntegerElement);
element!(u32, "32u", "32f", "32f", u32, f32, IntegerElement);
element!(i32, "32s", "32f", "32f", i32, f32, IntegerElement);
element!(f16, "16f", "16u", "32f", f32, f32, FloatElement);
element!(f32, "32f", "32f", "", f32, f32, FloatElement);
element!(Complex32, "32fc", "32fc", "", Complex32, f32, FloatElement);
element!(f64, "64f", "32fc", "", f64, f64, FloatElement);

/// Pairs with a plain `nppiConvert`: widening, or saturating integer
/// narrowing.
///
/// Only implemented for element pairs NPP exports in this form. Float to
/// integer goes through [`ConvertRounded`]:
///
/// ```compile_fail
/// use nvkit_npp::{NppImage, StreamContext, C1};
///
/// fn narrow(src: &NppImage<f32, C1>, dst: &mut NppImage<u8, C1>, ctx: &StreamContext) {
///     let _ = src.convert(dst, ctx);
/// }
/// ```
pub trait ConvertTo<D: Element>: Element {}

/// Float to integer pairs whose `nppiConvert` takes a rounding mode.
pub trait ConvertRounded<D: Element>: Element {}

/// Integer widening pairs with a plain `nppiScale` onto the full range.
pub trait ScaleTo<D: Element>: Element {}

/// Integer narrowing pairs whose `nppiScale` takes a hint.
pub trait ScaleHinted<D: Element>: Element {}

/// Pairs whose `nppiScale` maps `[min, max]` onto the other type.
pub trait ScaleRange<D: Element>: Element {}

macro_rules! pairs {
    ($trait:ident: $(($src:ty, $dst:ty)),* $(,)?) => {
        $(impl $trait<$dst> for $src {})*
    };
}

pairs!(ConvertTo:
    (u8, u16), (u8, i16), (u8, i32), (u8, f32),
    (i8, i32), (i8, f32),
    (u16, u8), (u16, i32), (u16, f32),
    (i16, u8), (i16, i32), (i16, f32),
    (i32, u8), (i32, i8),
    (f16, f32),
);
pairs!(ConvertRounded: (f32, u8), (f32, i8), (f32, u16), (f32, i16));
pairs!(ScaleTo: (u8, u16), (u8, i16), (u8, i32));
pairs!(ScaleHinted: (u16, u8), (i16, u8), (i32, u8));
pairs!(ScaleRange: (u8, f32), (f32, u8));

/// A channel layout.
pub trait Channels: private::Sealed + Copy + fmt::Debug + Default + Send + Sync + 'static {
    /// Components stored per pixel.
    const COUNT: usize;
    /// Components an operation reads and writes per pixel.
    const VALUES: usize;
    /// Layout name part, e.g. `C3`.
    const TAG: &'static str;
    /// `nppiMalloc_*` layout name part.
    const ALLOC_TAG: &'static str;
}

macro_rules! channels {
    ($(#[$meta:meta])* $name:ident, $count:literal, $values:literal, $tag:literal, $alloc:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl private::Sealed for $name {}

        impl Channels for $name {
            const COUNT: usize = $count;
            const VALUES: usize = $values;
            const TAG: &'static str = $tag;
            const ALLOC_TAG: &'static str = $alloc;
        }
    };
}

channels!(
    /// One channel.
    C1, 1, 1, "C1", "C1"
);
channels!(
    /// Two interleaved channels.
    C2, 2, 2, "C2", "C2"
);
channels!(
    /// Three interleaved channels.
    C3, 3, 3, "C3", "C3"
);
channels!(
    /// Four interleaved channels.
    C4, 4, 4, "C4", "C4"
);
channels!(
    /// Four interleaved channels, alpha left untouched.
    Ac4, 4, 3, "AC4", "C4"
);

/// Interleaved layouts NPP can split into planes and join back.
pub trait Planar: Channels {}

impl Planar for C3 {}
impl Planar for C4 {}

/// Operation form: out of place.
pub(crate) const OUT: &str = "R";
/// Operation form: in place.
pub(crate) const IN_PLACE: &str = "IR";

/// `nppi{op}_{T}_{C}{form}_Ctx`.
pub fn symbol<T: Element, C: Channels>(op: &str, form: &str) -> String {
    symbol_types::<C>(op, T::SUFFIX, form)
}

/// `nppi{op}_{types}_{C}{form}_Ctx` for ops naming two element types.
pub fn symbol_types<C: Channels>(op: &str, types: &str, form: &str) -> String {
    format!("nppi{op}_{types}_{}{form}_Ctx", C::TAG)
}

/// `nppi{op}_{T}{D}_{C}R_Ctx` for ops converting between element types.
pub fn symbol_pair<T: Element, D: Element, C: Channels>(op: &str) -> String {
    symbol_types::<C>(op, &format!("{}{}", T::SUFFIX, D::SUFFIX), OUT)
}

/// Appends the scale factor marker to `form` when `scaled`.
pub(crate) fn scaled_form(form: &str, scaled: bool) -> String {
    if scaled { format!("{form}Sfs") } else { form.to_owned() }
}
