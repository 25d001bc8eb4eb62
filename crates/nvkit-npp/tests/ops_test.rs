//! Operation forwarding tests: symbol names, argument order and the checks
//! made before each call, against a stubbed `nppi` table.
//!
//! Images here borrow fixed device addresses, so pointer arguments can be
//! compared against known values.

use std::cell::RefCell;
use std::ffi::{c_int, c_void};
use std::sync::Arc;

use half::f16;
use nvkit_core::{Complex32, DevicePtr, DeviceSlice, NativeLibrary, Stream};
use nvkit_npp::{
    Ac4, AlphaOp, BorderType, Channels, ComplexPart, Element, HintAlgorithm, Interpolation, Kernel, Npp, NppError,
    NppImage, Point, Rect, RoundMode, Size, StreamContext, C1, C3, C4,
};

thread_local! {
    static CALLS: RefCell<Vec<(&'static str, Vec<f64>)>> = const { RefCell::new(Vec::new()) };
}

fn record(name: &'static str, args: Vec<f64>) -> c_int {
    CALLS.with(|c| c.borrow_mut().push((name, args)));
    0
}

fn names() -> Vec<&'static str> {
    CALLS.with(|c| c.borrow().iter().map(|(n, _)| *n).collect())
}

fn last(name: &str) -> Vec<f64> {
    CALLS.with(|c| c.borrow().iter().rev().find(|(n, _)| *n == name).map(|(_, a)| a.clone()).unwrap_or_default())
}

fn addr(p: *const c_void) -> f64 {
    p as usize as f64
}

type P = *const c_void;
type M = *mut c_void;

// ---------------------------------------------------------------------------
// Data exchange
// ---------------------------------------------------------------------------

unsafe extern "C" fn convert_16f32f(s: P, ss: c_int, d: M, ds: c_int, roi: Size, _ctx: StreamContext) -> c_int {
    record(
        "nppiConvert_16f32f_C1R_Ctx",
        vec![addr(s), ss as f64, addr(d), ds as f64, roi.width as f64, roi.height as f64],
    )
}

unsafe extern "C" fn convert_32f8u(s: P, _ss: c_int, d: M, _ds: c_int, _roi: Size, mode: c_int, _ctx: StreamContext) -> c_int {
    record("nppiConvert_32f8u_C1R_Ctx", vec![addr(s), addr(d), mode as f64])
}

unsafe extern "C" fn scale_32s8u(s: P, _ss: c_int, d: M, _ds: c_int, _roi: Size, hint: c_int, _ctx: StreamContext) -> c_int {
    record("nppiScale_32s8u_C4R_Ctx", vec![addr(s), addr(d), hint as f64])
}

unsafe extern "C" fn scale_8u32f(
    _s: P,
    _ss: c_int,
    _d: M,
    _ds: c_int,
    _roi: Size,
    min: f32,
    max: f32,
    _ctx: StreamContext,
) -> c_int {
    record("nppiScale_8u32f_C1R_Ctx", vec![min as f64, max as f64])
}

unsafe extern "C" fn copy_masked(
    s: P,
    _ss: c_int,
    d: M,
    _ds: c_int,
    _roi: Size,
    mask: P,
    mask_step: c_int,
    _ctx: StreamContext,
) -> c_int {
    record("nppiCopy_32f_C4MR_Ctx", vec![addr(s), addr(d), addr(mask), mask_step as f64])
}

unsafe extern "C" fn set_masked_ac4(
    values: *const i32,
    d: M,
    _ds: c_int,
    _roi: Size,
    mask: P,
    _mask_step: c_int,
    _ctx: StreamContext,
) -> c_int {
    let v = unsafe { std::slice::from_raw_parts(values, 3) };
    record("nppiSet_32s_AC4MR_Ctx", vec![addr(d), v[0] as f64, v[1] as f64, v[2] as f64, addr(mask)])
}

unsafe extern "C" fn copy_channel(s: P, _ss: c_int, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiCopy_32s_C4CR_Ctx", vec![addr(s), addr(d)])
}

unsafe extern "C" fn extract_channel(s: P, _ss: c_int, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiCopy_32s_C4C1R_Ctx", vec![addr(s), addr(d)])
}

unsafe extern "C" fn insert_channel(s: P, _ss: c_int, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiCopy_32s_C1C4R_Ctx", vec![addr(s), addr(d)])
}

unsafe extern "C" fn set_channel(value: i32, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiSet_32s_C4CR_Ctx", vec![value as f64, addr(d)])
}

unsafe extern "C" fn copy_component(s: P, _ss: c_int, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiCopy_32f_C2C1R_Ctx", vec![addr(s), addr(d)])
}

unsafe extern "C" fn to_planes(s: P, _ss: c_int, planes: *const M, step: c_int, roi: Size, _ctx: StreamContext) -> c_int {
    let p = unsafe { std::slice::from_raw_parts(planes, 4) };
    let mut args = vec![addr(s)];
    args.extend(p.iter().map(|&x| addr(x)));
    args.extend([step as f64, roi.width as f64]);
    record("nppiCopy_32s_C4P4R_Ctx", args)
}

unsafe extern "C" fn from_planes(planes: *const P, step: c_int, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    let p = unsafe { std::slice::from_raw_parts(planes, 4) };
    let mut args: Vec<f64> = p.iter().map(|&x| addr(x)).collect();
    args.extend([step as f64, addr(d)]);
    record("nppiCopy_32s_P4C4R_Ctx", args)
}

// ---------------------------------------------------------------------------
// Arithmetic and logic
// ---------------------------------------------------------------------------

unsafe extern "C" fn sub_inplace(s: P, _ss: c_int, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiSub_32f_C1IR_Ctx", vec![addr(s), addr(d)])
}

unsafe extern "C" fn div_inplace_scaled(
    s: P,
    _ss: c_int,
    d: M,
    _ds: c_int,
    _roi: Size,
    scale: c_int,
    _ctx: StreamContext,
) -> c_int {
    record("nppiDiv_16s_C1IRSfs_Ctx", vec![addr(s), addr(d), scale as f64])
}

unsafe extern "C" fn div_scaled(
    s1: P,
    _s1s: c_int,
    s2: P,
    _s2s: c_int,
    d: M,
    _ds: c_int,
    _roi: Size,
    scale: c_int,
    _ctx: StreamContext,
) -> c_int {
    record("nppiDiv_32s_C4RSfs_Ctx", vec![addr(s1), addr(s2), addr(d), scale as f64])
}

unsafe extern "C" fn add_device_c(s: P, _ss: c_int, values: P, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiAddDeviceC_32f_C1R_Ctx", vec![addr(s), addr(values), addr(d)])
}

unsafe extern "C" fn mul_device_c_inplace(values: P, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiMulDeviceC_32f_C3IR_Ctx", vec![addr(values), addr(d)])
}

unsafe extern "C" fn and_c4(
    s1: P,
    _s1s: c_int,
    s2: P,
    _s2s: c_int,
    d: M,
    _ds: c_int,
    _roi: Size,
    _ctx: StreamContext,
) -> c_int {
    record("nppiAnd_32s_C4R_Ctx", vec![addr(s1), addr(s2), addr(d)])
}

unsafe extern "C" fn xor_c_inplace(value: u8, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiXorC_8u_C1IR_Ctx", vec![value as f64, addr(d)])
}

unsafe extern "C" fn lshift_c3(
    _s: P,
    _ss: c_int,
    counts: *const u32,
    _d: M,
    _ds: c_int,
    _roi: Size,
    _ctx: StreamContext,
) -> c_int {
    let c = unsafe { std::slice::from_raw_parts(counts, 3) };
    record("nppiLShiftC_16u_C3R_Ctx", c.iter().map(|&x| x as f64).collect())
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn warp_affine(
    s: P,
    size: Size,
    ss: c_int,
    src_roi: Rect,
    d: M,
    _ds: c_int,
    dst_roi: Rect,
    coeffs: *const [f64; 3],
    interpolation: c_int,
    _ctx: StreamContext,
) -> c_int {
    let c = unsafe { std::slice::from_raw_parts(coeffs, 2) };
    record(
        "nppiWarpAffine_32f_C1R_Ctx",
        vec![
            addr(s),
            size.width as f64,
            ss as f64,
            src_roi.x as f64,
            addr(d),
            dst_roi.width as f64,
            c[0][0],
            c[1][2],
            interpolation as f64,
        ],
    )
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn warp_perspective_back(
    _s: P,
    _size: Size,
    _ss: c_int,
    _src_roi: Rect,
    _d: M,
    _ds: c_int,
    _dst_roi: Rect,
    coeffs: *const [f64; 3],
    interpolation: c_int,
    _ctx: StreamContext,
) -> c_int {
    let c = unsafe { std::slice::from_raw_parts(coeffs, 3) };
    record("nppiWarpPerspectiveBack_32f_C1R_Ctx", vec![c[2][0], c[2][1], c[2][2], interpolation as f64])
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn warp_affine_quad(
    _s: P,
    _size: Size,
    _ss: c_int,
    _src_roi: Rect,
    src_quad: *const [f64; 2],
    _d: M,
    _ds: c_int,
    _dst_roi: Rect,
    dst_quad: *const [f64; 2],
    interpolation: c_int,
    _ctx: StreamContext,
) -> c_int {
    let (sq, dq) = unsafe { (std::slice::from_raw_parts(src_quad, 4), std::slice::from_raw_parts(dst_quad, 4)) };
    record("nppiWarpAffineQuad_32f_C1R_Ctx", vec![sq[3][0], sq[3][1], dq[1][0], interpolation as f64])
}

unsafe extern "C" fn transpose(_s: P, _ss: c_int, _d: M, _ds: c_int, roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiTranspose_32f_C1R_Ctx", vec![roi.width as f64, roi.height as f64])
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn const_border_c3(
    _s: P,
    _ss: c_int,
    size: Size,
    _d: M,
    _ds: c_int,
    dst_size: Size,
    top: c_int,
    left: c_int,
    value: *const f32,
    _ctx: StreamContext,
) -> c_int {
    let v = unsafe { std::slice::from_raw_parts(value, 3) };
    record(
        "nppiCopyConstBorder_32f_C3R_Ctx",
        vec![size.width as f64, dst_size.width as f64, top as f64, left as f64, v[0] as f64, v[1] as f64, v[2] as f64],
    )
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn wrap_border(
    _s: P,
    _ss: c_int,
    _size: Size,
    _d: M,
    _ds: c_int,
    _dst_size: Size,
    top: c_int,
    left: c_int,
    _ctx: StreamContext,
) -> c_int {
    record("nppiCopyWrapBorder_32f_C1R_Ctx", vec![top as f64, left as f64])
}

unsafe extern "C" fn subpix(_s: P, _ss: c_int, _d: M, _ds: c_int, _roi: Size, dx: f32, dy: f32, _ctx: StreamContext) -> c_int {
    record("nppiCopySubpix_32f_C1R_Ctx", vec![dx as f64, dy as f64])
}

unsafe extern "C" fn swap_c4(_s: P, _ss: c_int, _d: M, _ds: c_int, _roi: Size, order: *const c_int, _ctx: StreamContext) -> c_int {
    let o = unsafe { std::slice::from_raw_parts(order, 4) };
    record("nppiSwapChannels_32f_C4R_Ctx", o.iter().map(|&x| x as f64).collect())
}

unsafe extern "C" fn swap_c4_inplace(_d: M, _ds: c_int, _roi: Size, order: *const c_int, _ctx: StreamContext) -> c_int {
    let o = unsafe { std::slice::from_raw_parts(order, 4) };
    record("nppiSwapChannels_32f_C4IR_Ctx", o.iter().map(|&x| x as f64).collect())
}

// ---------------------------------------------------------------------------
// Filtering and color
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn filter_8u(
    s: P,
    _ss: c_int,
    d: M,
    _ds: c_int,
    _roi: Size,
    kernel: P,
    kernel_size: Size,
    anchor: Point,
    _ctx: StreamContext,
) -> c_int {
    record(
        "nppiFilter32f_8u_C1R_Ctx",
        vec![
            addr(s),
            addr(d),
            addr(kernel),
            kernel_size.width as f64,
            kernel_size.height as f64,
            anchor.x as f64,
            anchor.y as f64,
        ],
    )
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn filter_border(
    _s: P,
    _ss: c_int,
    src_size: Size,
    src_offset: Point,
    _d: M,
    _ds: c_int,
    dst_roi: Size,
    _kernel: P,
    _kernel_size: Size,
    _anchor: Point,
    border: c_int,
    _ctx: StreamContext,
) -> c_int {
    record(
        "nppiFilterBorder_32f_C1R_Ctx",
        vec![
            src_size.width as f64,
            src_size.height as f64,
            src_offset.x as f64,
            src_offset.y as f64,
            dst_roi.width as f64,
            border as f64,
        ],
    )
}

unsafe extern "C" fn twist_8u(
    _s: P,
    _ss: c_int,
    _d: M,
    _ds: c_int,
    _roi: Size,
    twist: *const [f32; 4],
    _ctx: StreamContext,
) -> c_int {
    let t = unsafe { std::slice::from_raw_parts(twist, 3) };
    record("nppiColorTwist32f_8u_C3R_Ctx", vec![t[0][0] as f64, t[2][3] as f64])
}

unsafe extern "C" fn twist_const_16f_inplace(
    _d: M,
    _ds: c_int,
    _roi: Size,
    twist: *const [f32; 4],
    constants: *const f32,
    _ctx: StreamContext,
) -> c_int {
    let (t, k) = unsafe { (std::slice::from_raw_parts(twist, 4), std::slice::from_raw_parts(constants, 4)) };
    record("nppiColorTwist32fC_16f_C4IR_Ctx", vec![t[3][3] as f64, k[3] as f64])
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn alpha_comp(
    s1: P,
    _s1s: c_int,
    s2: P,
    _s2s: c_int,
    d: M,
    _ds: c_int,
    _roi: Size,
    op: c_int,
    _ctx: StreamContext,
) -> c_int {
    record("nppiAlphaComp_32s_AC4R_Ctx", vec![addr(s1), addr(s2), addr(d), op as f64])
}

unsafe extern "C" fn magnitude(s: P, _ss: c_int, d: M, _ds: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    record("nppiMagnitude_32fc32f_C1R_Ctx", vec![addr(s), addr(d)])
}

fn npp() -> Npp {
    let lib = NativeLibrary::from_table(
        "nppi",
        [
            ("nppiConvert_16f32f_C1R_Ctx", convert_16f32f as *const ()),
            ("nppiConvert_32f8u_C1R_Ctx", convert_32f8u as *const ()),
            ("nppiScale_32s8u_C4R_Ctx", scale_32s8u as *const ()),
            ("nppiScale_8u32f_C1R_Ctx", scale_8u32f as *const ()),
            ("nppiCopy_32f_C4MR_Ctx", copy_masked as *const ()),
            ("nppiSet_32s_AC4MR_Ctx", set_masked_ac4 as *const ()),
            ("nppiCopy_32s_C4CR_Ctx", copy_channel as *const ()),
            ("nppiCopy_32s_C4C1R_Ctx", extract_channel as *const ()),
            ("nppiCopy_32s_C1C4R_Ctx", insert_channel as *const ()),
            ("nppiSet_32s_C4CR_Ctx", set_channel as *const ()),
            ("nppiCopy_32f_C2C1R_Ctx", copy_component as *const ()),
            ("nppiCopy_32s_C4P4R_Ctx", to_planes as *const ()),
            ("nppiCopy_32s_P4C4R_Ctx", from_planes as *const ()),
            ("nppiSub_32f_C1IR_Ctx", sub_inplace as *const ()),
            ("nppiDiv_16s_C1IRSfs_Ctx", div_inplace_scaled as *const ()),
            ("nppiDiv_32s_C4RSfs_Ctx", div_scaled as *const ()),
            ("nppiAddDeviceC_32f_C1R_Ctx", add_device_c as *const ()),
            ("nppiMulDeviceC_32f_C3IR_Ctx", mul_device_c_inplace as *const ()),
            ("nppiAnd_32s_C4R_Ctx", and_c4 as *const ()),
            ("nppiXorC_8u_C1IR_Ctx", xor_c_inplace as *const ()),
            ("nppiLShiftC_16u_C3R_Ctx", lshift_c3 as *const ()),
            ("nppiWarpAffine_32f_C1R_Ctx", warp_affine as *const ()),
            ("nppiWarpPerspectiveBack_32f_C1R_Ctx", warp_perspective_back as *const ()),
            ("nppiWarpAffineQuad_32f_C1R_Ctx", warp_affine_quad as *const ()),
            ("nppiTranspose_32f_C1R_Ctx", transpose as *const ()),
            ("nppiCopyConstBorder_32f_C3R_Ctx", const_border_c3 as *const ()),
            ("nppiCopyWrapBorder_32f_C1R_Ctx", wrap_border as *const ()),
            ("nppiCopySubpix_32f_C1R_Ctx", subpix as *const ()),
            ("nppiSwapChannels_32f_C4R_Ctx", swap_c4 as *const ()),
            ("nppiSwapChannels_32f_C4IR_Ctx", swap_c4_inplace as *const ()),
            ("nppiFilter32f_8u_C1R_Ctx", filter_8u as *const ()),
            ("nppiFilterBorder_32f_C1R_Ctx", filter_border as *const ()),
            ("nppiColorTwist32f_8u_C3R_Ctx", twist_8u as *const ()),
            ("nppiColorTwist32fC_16f_C4IR_Ctx", twist_const_16f_inplace as *const ()),
            ("nppiAlphaComp_32s_AC4R_Ctx", alpha_comp as *const ()),
            ("nppiMagnitude_32fc32f_C1R_Ctx", magnitude as *const ()),
        ],
    );
    Npp::from_libraries([Arc::new(lib)])
}

fn ctx() -> StreamContext {
    StreamContext::for_stream(Stream::DEFAULT)
}

/// A tightly pitched borrowed image at `base`.
fn image<T: Element, C: Channels>(npp: &Npp, base: u64, width: i32, height: i32) -> NppImage<T, C> {
    let pitch = width * NppImage::<T, C>::PIXEL_BYTES as i32;
    NppImage::borrowed(npp, DevicePtr(base), width, height, pitch).unwrap()
}

const A: u64 = 0x10_0000;
const B: u64 = 0x20_0000;
const D: u64 = 0x30_0000;
const MASK: u64 = 0x40_0000;

// ---------------------------------------------------------------------------
// Data exchange
// ---------------------------------------------------------------------------

#[test]
fn test_convert_plain_pair() {
    let npp = npp();
    let src = image::<f16, C1>(&npp, A, 16, 8);
    let mut dst = image::<f32, C1>(&npp, D, 16, 8);
    src.convert(&mut dst, &ctx()).unwrap();
    assert_eq!(last("nppiConvert_16f32f_C1R_Ctx"), vec![A as f64, 32.0, D as f64, 64.0, 16.0, 8.0]);
}

#[test]
fn test_convert_rounded_passes_mode() {
    let npp = npp();
    let src = image::<f32, C1>(&npp, A, 16, 8);
    let mut dst = image::<u8, C1>(&npp, D, 16, 8);
    src.convert_rounded(&mut dst, RoundMode::Zero, &ctx()).unwrap();
    assert_eq!(last("nppiConvert_32f8u_C1R_Ctx"), vec![A as f64, D as f64, 2.0]);
}

#[test]
fn test_convert_checks_destination_roi() {
    let npp = npp();
    let src = image::<f16, C1>(&npp, A, 16, 8);
    let mut dst = image::<f32, C1>(&npp, D, 8, 8);
    assert!(matches!(src.convert(&mut dst, &ctx()), Err(NppError::InvalidArgument(_))));
    assert!(names().is_empty());
}

#[test]
fn test_scale_forms() {
    let npp = npp();
    let src = image::<i32, C4>(&npp, A, 4, 4);
    let mut dst = image::<u8, C4>(&npp, D, 4, 4);
    src.scale_hinted(&mut dst, HintAlgorithm::Accurate, &ctx()).unwrap();
    assert_eq!(last("nppiScale_32s8u_C4R_Ctx"), vec![A as f64, D as f64, 2.0]);

    let src = image::<u8, C1>(&npp, A, 4, 4);
    let mut dst = image::<f32, C1>(&npp, D, 4, 4);
    src.scale_range(&mut dst, -1.0, 1.0, &ctx()).unwrap();
    assert_eq!(last("nppiScale_8u32f_C1R_Ctx"), vec![-1.0, 1.0]);

    let err = src.scale_range(&mut dst, 1.0, 1.0, &ctx()).unwrap_err();
    assert!(matches!(err, NppError::InvalidArgument(_)));
    assert_eq!(names().len(), 2);
}

#[test]
fn test_masked_copy_and_set() {
    let npp = npp();
    let src = image::<f32, C4>(&npp, A, 8, 8);
    let mut dst = image::<f32, C4>(&npp, D, 8, 8);
    let mask = image::<u8, C1>(&npp, MASK, 8, 8);
    src.copy_masked(&mut dst, &mask, &ctx()).unwrap();
    assert_eq!(last("nppiCopy_32f_C4MR_Ctx"), vec![A as f64, D as f64, MASK as f64, 8.0]);

    let mut alpha = image::<i32, Ac4>(&npp, D, 8, 8);
    alpha.set_masked(&[1, 2, 3], &mask, &ctx()).unwrap();
    assert_eq!(last("nppiSet_32s_AC4MR_Ctx"), vec![D as f64, 1.0, 2.0, 3.0, MASK as f64]);

    let small = image::<u8, C1>(&npp, MASK, 4, 4);
    assert!(matches!(src.copy_masked(&mut dst, &small, &ctx()), Err(NppError::InvalidArgument(_))));
}

#[test]
fn test_channel_copies_offset_pointers() {
    let npp = npp();
    let src = image::<i32, C4>(&npp, A, 8, 8);
    let mut dst = image::<i32, C4>(&npp, D, 8, 8);
    src.copy_channel(1, &mut dst, 3, &ctx()).unwrap();
    assert_eq!(last("nppiCopy_32s_C4CR_Ctx"), vec![(A + 4) as f64, (D + 12) as f64]);

    let mut plane = image::<i32, C1>(&npp, B, 8, 8);
    src.extract_channel(2, &mut plane, &ctx()).unwrap();
    assert_eq!(last("nppiCopy_32s_C4C1R_Ctx"), vec![(A + 8) as f64, B as f64]);

    plane.insert_channel(&mut dst, 1, &ctx()).unwrap();
    assert_eq!(last("nppiCopy_32s_C1C4R_Ctx"), vec![B as f64, (D + 4) as f64]);

    dst.set_channel(-5, 3, &ctx()).unwrap();
    assert_eq!(last("nppiSet_32s_C4CR_Ctx"), vec![-5.0, (D + 12) as f64]);

    let calls = names().len();
    assert!(matches!(src.copy_channel(4, &mut dst, 0, &ctx()), Err(NppError::InvalidArgument(_))));
    assert!(matches!(dst.set_channel(0, 4, &ctx()), Err(NppError::InvalidArgument(_))));
    assert_eq!(names().len(), calls);
}

#[test]
fn test_complex_component_copy() {
    let npp = npp();
    let src = image::<Complex32, C1>(&npp, A, 8, 8);
    let mut dst = image::<f32, C1>(&npp, D, 8, 8);
    src.copy_component(ComplexPart::Imaginary, &mut dst, &ctx()).unwrap();
    assert_eq!(last("nppiCopy_32f_C2C1R_Ctx"), vec![(A + 4) as f64, D as f64]);
    src.copy_component(ComplexPart::Real, &mut dst, &ctx()).unwrap();
    assert_eq!(last("nppiCopy_32f_C2C1R_Ctx"), vec![A as f64, D as f64]);
}

#[test]
fn test_planar_round_trip() {
    let npp = npp();
    let mut packed = image::<i32, C4>(&npp, A, 8, 4);
    let mut planes: Vec<NppImage<i32, C1>> = (0..4).map(|i| image(&npp, B + i * 0x1000, 8, 4)).collect();

    packed.copy_to_planes(&mut planes, &ctx()).unwrap();
    assert_eq!(
        last("nppiCopy_32s_C4P4R_Ctx"),
        vec![A as f64, B as f64, (B + 0x1000) as f64, (B + 0x2000) as f64, (B + 0x3000) as f64, 32.0, 8.0]
    );

    packed.copy_from_planes(&planes, &ctx()).unwrap();
    assert_eq!(
        last("nppiCopy_32s_P4C4R_Ctx"),
        vec![B as f64, (B + 0x1000) as f64, (B + 0x2000) as f64, (B + 0x3000) as f64, 32.0, A as f64]
    );
}

#[test]
fn test_planar_checks_planes() {
    let npp = npp();
    let packed = image::<i32, C4>(&npp, A, 8, 4);
    let mut three: Vec<NppImage<i32, C1>> = (0..3).map(|i| image(&npp, B + i * 0x1000, 8, 4)).collect();
    assert!(matches!(packed.copy_to_planes(&mut three, &ctx()), Err(NppError::InvalidArgument(_))));

    let mut mixed: Vec<NppImage<i32, C1>> = (0..3).map(|i| image(&npp, B + i * 0x1000, 8, 4)).collect();
    mixed.push(NppImage::borrowed(&npp, DevicePtr(D), 8, 4, 64).unwrap());
    assert!(matches!(packed.copy_to_planes(&mut mixed, &ctx()), Err(NppError::InvalidArgument(_))));
    assert!(names().is_empty());
}

// ---------------------------------------------------------------------------
// Arithmetic and logic
// ---------------------------------------------------------------------------

#[test]
fn test_inplace_sub_div_take_other_as_source() {
    let npp = npp();
    let mut a = image::<f32, C1>(&npp, A, 8, 8);
    let b = image::<f32, C1>(&npp, B, 8, 8);
    // srcdst = srcdst - src
    a.sub_inplace(&b, &ctx()).unwrap();
    assert_eq!(last("nppiSub_32f_C1IR_Ctx"), vec![B as f64, A as f64]);

    let mut a = image::<i16, C1>(&npp, A, 8, 8);
    let b = image::<i16, C1>(&npp, B, 8, 8);
    a.div_inplace_scaled(&b, 3, &ctx()).unwrap();
    assert_eq!(last("nppiDiv_16s_C1IRSfs_Ctx"), vec![B as f64, A as f64, 3.0]);
}

#[test]
fn test_scaled_div_swaps_operands() {
    let npp = npp();
    let a = image::<i32, C4>(&npp, A, 8, 8);
    let b = image::<i32, C4>(&npp, B, 8, 8);
    let mut dst = image::<i32, C4>(&npp, D, 8, 8);
    a.div_scaled(&b, &mut dst, 1, &ctx()).unwrap();
    // NPP divides src2 by src1
    assert_eq!(last("nppiDiv_32s_C4RSfs_Ctx"), vec![B as f64, A as f64, D as f64, 1.0]);
}

#[test]
fn test_device_constants_stay_on_device() {
    let npp = npp();
    let src = image::<f32, C1>(&npp, A, 8, 8);
    let mut dst = image::<f32, C1>(&npp, D, 8, 8);
    let one = DeviceSlice::<f32>::new(DevicePtr(0x5000), 1);
    src.add_device_const(one, &mut dst, &ctx()).unwrap();
    assert_eq!(last("nppiAddDeviceC_32f_C1R_Ctx"), vec![A as f64, 0x5000 as f64, D as f64]);

    let mut rgb = image::<f32, C3>(&npp, A, 8, 8);
    let three = DeviceSlice::<f32>::new(DevicePtr(0x6000), 3);
    rgb.mul_device_const_inplace(three, &ctx()).unwrap();
    assert_eq!(last("nppiMulDeviceC_32f_C3IR_Ctx"), vec![0x6000 as f64, A as f64]);

    let err = rgb.mul_device_const_inplace(one, &ctx()).unwrap_err();
    assert!(matches!(err, NppError::BufferTooSmall { required: 3, actual: 1, .. }));
}

#[test]
fn test_logic_forms() {
    let npp = npp();
    let a = image::<i32, C4>(&npp, A, 8, 8);
    let b = image::<i32, C4>(&npp, B, 8, 8);
    let mut dst = image::<i32, C4>(&npp, D, 8, 8);
    a.and(&b, &mut dst, &ctx()).unwrap();
    assert_eq!(last("nppiAnd_32s_C4R_Ctx"), vec![A as f64, B as f64, D as f64]);

    let mut bytes = image::<u8, C1>(&npp, A, 8, 8);
    bytes.xor_const_inplace(&[0x5a], &ctx()).unwrap();
    assert_eq!(last("nppiXorC_8u_C1IR_Ctx"), vec![90.0, A as f64]);

    let words = image::<u16, C3>(&npp, A, 8, 8);
    let mut out = image::<u16, C3>(&npp, D, 8, 8);
    words.lshift(&[1, 2, 3], &mut out, &ctx()).unwrap();
    assert_eq!(last("nppiLShiftC_16u_C3R_Ctx"), vec![1.0, 2.0, 3.0]);
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn test_warp_affine_forwards_roi_and_coefficients() {
    let npp = npp();
    let mut src = image::<f32, C1>(&npp, A, 32, 16);
    src.set_roi(Rect::new(2, 0, 30, 16)).unwrap();
    let mut dst = image::<f32, C1>(&npp, D, 24, 16);
    let coeffs = [[1.0, 0.0, 5.0], [0.0, 1.0, 7.0]];
    src.warp_affine(&mut dst, &coeffs, Interpolation::Cubic, &ctx()).unwrap();
    // base pointers, full size and ROI rectangles
    assert_eq!(
        last("nppiWarpAffine_32f_C1R_Ctx"),
        vec![A as f64, 32.0, 128.0, 2.0, D as f64, 24.0, 1.0, 7.0, 4.0]
    );
}

#[test]
fn test_warp_perspective_back_passes_three_rows() {
    let npp = npp();
    let src = image::<f32, C1>(&npp, A, 16, 16);
    let mut dst = image::<f32, C1>(&npp, D, 16, 16);
    let coeffs = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.25, 0.5, 1.0]];
    src.warp_perspective_back(&mut dst, &coeffs, Interpolation::Linear, &ctx()).unwrap();
    assert_eq!(last("nppiWarpPerspectiveBack_32f_C1R_Ctx"), vec![0.25, 0.5, 1.0, 2.0]);
}

#[test]
fn test_warp_affine_quad_passes_both_quads() {
    let npp = npp();
    let src = image::<f32, C1>(&npp, A, 16, 16);
    let mut dst = image::<f32, C1>(&npp, D, 16, 16);
    let src_quad = [[0.0, 0.0], [15.0, 0.0], [15.0, 15.0], [0.0, 15.0]];
    let dst_quad = [[1.0, 1.0], [14.0, 2.0], [13.0, 13.0], [0.0, 12.0]];
    src.warp_affine_quad(&src_quad, &mut dst, &dst_quad, Interpolation::NearestNeighbor, &ctx()).unwrap();
    assert_eq!(last("nppiWarpAffineQuad_32f_C1R_Ctx"), vec![0.0, 15.0, 14.0, 1.0]);
}

#[test]
fn test_transpose_checks_swapped_roi() {
    let npp = npp();
    let src = image::<f32, C1>(&npp, A, 16, 8);
    let mut tall = image::<f32, C1>(&npp, D, 8, 16);
    src.transpose(&mut tall, &ctx()).unwrap();
    assert_eq!(last("nppiTranspose_32f_C1R_Ctx"), vec![16.0, 8.0]);

    let mut wide = image::<f32, C1>(&npp, D, 16, 8);
    assert!(matches!(src.transpose(&mut wide, &ctx()), Err(NppError::InvalidArgument(_))));
    assert_eq!(names().len(), 1);
}

#[test]
fn test_border_copies() {
    let npp = npp();
    let src = image::<f32, C3>(&npp, A, 8, 8);
    let mut dst = image::<f32, C3>(&npp, D, 12, 12);
    src.copy_const_border(&mut dst, 2, 3, &[0.5, 0.25, 0.125], &ctx()).unwrap();
    assert_eq!(last("nppiCopyConstBorder_32f_C3R_Ctx"), vec![8.0, 12.0, 2.0, 3.0, 0.5, 0.25, 0.125]);
    let err = src.copy_const_border(&mut dst, 2, 3, &[0.5], &ctx()).unwrap_err();
    assert!(matches!(err, NppError::BufferTooSmall { name: "border value", .. }));

    let src = image::<f32, C1>(&npp, A, 8, 8);
    let mut dst = image::<f32, C1>(&npp, D, 10, 10);
    src.copy_wrap_border(&mut dst, 1, 1, &ctx()).unwrap();
    assert_eq!(last("nppiCopyWrapBorder_32f_C1R_Ctx"), vec![1.0, 1.0]);

    src.copy_subpix(&mut dst, 0.25, 0.75, &ctx()).unwrap();
    assert_eq!(last("nppiCopySubpix_32f_C1R_Ctx"), vec![0.25, 0.75]);
}

#[test]
fn test_swap_channels_order() {
    let npp = npp();
    let mut src = image::<f32, C4>(&npp, A, 8, 8);
    let mut dst = image::<f32, C4>(&npp, D, 8, 8);
    src.swap_channels(&mut dst, &[2, 1, 0, 3], &ctx()).unwrap();
    assert_eq!(last("nppiSwapChannels_32f_C4R_Ctx"), vec![2.0, 1.0, 0.0, 3.0]);
    src.swap_channels_inplace(&[3, 2, 1, 0], &ctx()).unwrap();
    assert_eq!(last("nppiSwapChannels_32f_C4IR_Ctx"), vec![3.0, 2.0, 1.0, 0.0]);
    assert!(matches!(src.swap_channels_inplace(&[0, 1, 2], &ctx()), Err(NppError::BufferTooSmall { .. })));
}

// ---------------------------------------------------------------------------
// Filtering and color
// ---------------------------------------------------------------------------

#[test]
fn test_filter_uses_weighted_name_and_kernel() {
    let npp = npp();
    let src = image::<u8, C1>(&npp, A, 16, 16);
    let mut dst = image::<u8, C1>(&npp, D, 16, 16);
    let kernel = Kernel::centered(DeviceSlice::<f32>::new(DevicePtr(0x5000), 9), Size::new(3, 3));
    src.filter(&mut dst, &kernel, &ctx()).unwrap();
    assert_eq!(last("nppiFilter32f_8u_C1R_Ctx"), vec![A as f64, D as f64, 0x5000 as f64, 3.0, 3.0, 1.0, 1.0]);

    let short = Kernel::centered(DeviceSlice::<f32>::new(DevicePtr(0x5000), 8), Size::new(3, 3));
    let err = src.filter(&mut dst, &short, &ctx()).unwrap_err();
    assert!(matches!(err, NppError::BufferTooSmall { required: 9, actual: 8, .. }));
    assert_eq!(names().len(), 1);
}

#[test]
fn test_filter_border_area() {
    let npp = npp();
    let mut src = image::<f32, C1>(&npp, A, 32, 32);
    src.set_roi(Rect::new(4, 4, 20, 10)).unwrap();
    let mut dst = image::<f32, C1>(&npp, D, 20, 10);
    let kernel = Kernel::centered(DeviceSlice::<f32>::new(DevicePtr(0x5000), 25), Size::new(5, 5));

    src.filter_border(&mut dst, &kernel, BorderType::Replicate, None, &ctx()).unwrap();
    assert_eq!(last("nppiFilterBorder_32f_C1R_Ctx"), vec![20.0, 10.0, 0.0, 0.0, 20.0, 2.0]);

    let area = Rect::new(-4, -4, 32, 32);
    src.filter_border(&mut dst, &kernel, BorderType::Replicate, Some(area), &ctx()).unwrap();
    assert_eq!(last("nppiFilterBorder_32f_C1R_Ctx"), vec![32.0, 32.0, -4.0, -4.0, 20.0, 2.0]);
}

#[test]
fn test_color_twist_forms() {
    let npp = npp();
    let src = image::<u8, C3>(&npp, A, 8, 8);
    let mut dst = image::<u8, C3>(&npp, D, 8, 8);
    let twist = [[0.5, 0.0, 0.0, 1.0], [0.0, 0.5, 0.0, 2.0], [0.0, 0.0, 0.5, 3.0]];
    src.color_twist(&mut dst, &twist, &ctx()).unwrap();
    assert_eq!(last("nppiColorTwist32f_8u_C3R_Ctx"), vec![0.5, 3.0]);

    let mut hdr = image::<f16, C4>(&npp, A, 8, 8);
    let twist4 = [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 0.75]];
    hdr.color_twist_const_inplace(&twist4, &[0.0, 0.0, 0.0, 0.125], &ctx()).unwrap();
    assert_eq!(last("nppiColorTwist32fC_16f_C4IR_Ctx"), vec![0.75, 0.125]);
}

#[test]
fn test_alpha_comp_and_magnitude() {
    let npp = npp();
    let a = image::<i32, Ac4>(&npp, A, 8, 8);
    let b = image::<i32, Ac4>(&npp, B, 8, 8);
    let mut dst = image::<i32, Ac4>(&npp, D, 8, 8);
    a.alpha_comp(&b, &mut dst, AlphaOp::Over, &ctx()).unwrap();
    assert_eq!(last("nppiAlphaComp_32s_AC4R_Ctx"), vec![A as f64, B as f64, D as f64, 0.0]);

    let z = image::<Complex32, C1>(&npp, A, 8, 8);
    let mut mag = image::<f32, C1>(&npp, D, 8, 8);
    z.magnitude(&mut mag, &ctx()).unwrap();
    assert_eq!(last("nppiMagnitude_32fc32f_C1R_Ctx"), vec![A as f64, D as f64]);
}
