//! # nvkit-npp
//!
//! Safe wrappers over NVIDIA Performance Primitives image processing.
//!
//! - [`Npp`] - the loaded library set, version and stream queries
//! - [`NppImage`] - a pitched device image generic over [`Element`] and
//!   [`Channels`], with a region of interest
//! - [`ScratchBuffer`] - device scratch memory for statistics
//! - [`StreamContext`] - the stream every `_Ctx` call runs on
//!
//! Operations resolve their entry point by name at call time, so one
//! generic method covers every element and layout NPP exports. An
//! unexported combination fails with `SymbolNotFound`.
//!
//! ```ignore
//! use nvkit_npp::{Npp, NppImage, C3};
//!
//! let npp = Npp::load()?;
//! let ctx = npp.stream_context()?;
//! let mut a = NppImage::<f32, C3>::new(&npp, 640, 480)?;
//! let mut b = NppImage::<f32, C3>::new(&npp, 640, 480)?;
//! a.set(&[0.25, 0.5, 0.75], &ctx)?;
//! a.mul_const(&[2.0, 2.0, 2.0], &mut b, &ctx)?;
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod element;
pub mod error;
pub mod image;
pub mod library;
pub mod ops;
pub mod status;
pub mod sys;

pub use buffer::ScratchBuffer;
pub use element::{
    Ac4, Channels, ConvertRounded, ConvertTo, Element, FloatElement, IntegerElement, Planar, ScaleHinted, ScaleRange,
    ScaleTo, C1, C2, C3, C4,
};
pub use error::{NppError, NppResult};
pub use image::NppImage;
pub use library::{
    Npp, NPPC_LIBRARY, NPPIAL_LIBRARY, NPPICC_LIBRARY, NPPIDEI_LIBRARY, NPPIF_LIBRARY, NPPIG_LIBRARY, NPPIST_LIBRARY,
    NPPS_LIBRARY, NPP_LIBRARIES,
};
pub use ops::{ComplexPart, Kernel};
pub use status::NppStatus;
pub use sys::{
    AlphaOp, Axis, BorderType, HintAlgorithm, Interpolation, LibraryVersion, Point, Rect, RoundMode, Size,
    StreamContext,
};
