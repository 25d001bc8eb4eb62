//! NPP image tests against stubbed `nppc`, `nppi*` and `npps` tables.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::{c_int, c_void};
use std::sync::Arc;

use nvkit_core::{DevicePtr, DeviceSlice, Lifecycle, NativeLibrary, Stream};
use nvkit_npp::{
    Ac4, Axis, Interpolation, LibraryVersion, Npp, NppError, NppImage, NppStatus, Rect, ScratchBuffer, Size,
    StreamContext, C1, C3, C4,
};

thread_local! {
    static CALLS: RefCell<Vec<(&'static str, Vec<f64>)>> = const { RefCell::new(Vec::new()) };
    static FAIL: RefCell<HashMap<&'static str, c_int>> = RefCell::new(HashMap::new());
    static NEXT: Cell<usize> = const { Cell::new(0x10_0000) };
}

const SCRATCH: usize = 0x9_0000;
const METRIC_BUFFER: usize = 256;

fn record(name: &'static str, args: Vec<f64>) -> c_int {
    CALLS.with(|c| c.borrow_mut().push((name, args)));
    FAIL.with(|f| f.borrow().get(name).copied().unwrap_or(0))
}

fn fail(name: &'static str, code: c_int) {
    FAIL.with(|f| f.borrow_mut().insert(name, code));
}

fn calls() -> Vec<(&'static str, Vec<f64>)> {
    CALLS.with(|c| c.borrow().clone())
}

fn count(name: &str) -> usize {
    calls().iter().filter(|(n, _)| *n == name).count()
}

fn last(name: &str) -> Vec<f64> {
    calls().into_iter().rev().find(|(n, _)| *n == name).map(|(_, a)| a).unwrap_or_default()
}

fn addr<T>(p: *const T) -> f64 {
    p as usize as f64
}

fn next_ptr() -> *mut c_void {
    NEXT.with(|n| {
        let p = n.get();
        n.set(p + 0x10_0000);
        p as *mut c_void
    })
}

// ---------------------------------------------------------------------------
// nppc / npps stubs
// ---------------------------------------------------------------------------

static VERSION: LibraryVersion = LibraryVersion { major: 12, minor: 3, build: 1 };

unsafe extern "C" fn get_version() -> *const LibraryVersion {
    record("nppGetLibVersion", vec![]);
    &VERSION
}

unsafe extern "C" fn get_stream_context(ctx: *mut StreamContext) -> c_int {
    unsafe {
        (*ctx).device_id = 0;
        (*ctx).multi_processor_count = 108;
        (*ctx).compute_capability_major = 8;
    }
    record("nppGetStreamContext", vec![])
}

unsafe extern "C" fn s_malloc(len: usize) -> *mut c_void {
    record("nppsMalloc_8u", vec![len as f64]);
    SCRATCH as *mut c_void
}

unsafe extern "C" fn s_free(p: *mut c_void) {
    record("nppsFree", vec![addr(p)]);
}

// ---------------------------------------------------------------------------
// nppi stubs
// ---------------------------------------------------------------------------

unsafe extern "C" fn malloc_32f_c1(w: c_int, h: c_int, pitch: *mut c_int) -> *mut c_void {
    unsafe { *pitch = w * 4 };
    record("nppiMalloc_32f_C1", vec![w as f64, h as f64]);
    next_ptr()
}

unsafe extern "C" fn malloc_32f_c3(w: c_int, h: c_int, pitch: *mut c_int) -> *mut c_void {
    unsafe { *pitch = w * 12 };
    record("nppiMalloc_32f_C3", vec![w as f64, h as f64]);
    next_ptr()
}

unsafe extern "C" fn malloc_32f_c4(w: c_int, h: c_int, pitch: *mut c_int) -> *mut c_void {
    unsafe { *pitch = w * 16 };
    record("nppiMalloc_32f_C4", vec![w as f64, h as f64]);
    next_ptr()
}

unsafe extern "C" fn malloc_8u_c1(w: c_int, h: c_int, _pitch: *mut c_int) -> *mut c_void {
    record("nppiMalloc_8u_C1", vec![w as f64, h as f64]);
    std::ptr::null_mut()
}

unsafe extern "C" fn free(p: *mut c_void) {
    record("nppiFree", vec![addr(p)]);
}

unsafe extern "C" fn add_c_c1(
    src: *const f32,
    src_step: c_int,
    value: f32,
    dst: *mut f32,
    dst_step: c_int,
    roi: Size,
    _ctx: StreamContext,
) -> c_int {
    record(
        "nppiAddC_32f_C1R_Ctx",
        vec![addr(src), src_step as f64, value as f64, addr(dst), dst_step as f64, roi.width as f64, roi.height as f64],
    )
}

unsafe extern "C" fn add_c_c3(
    src: *const f32,
    _src_step: c_int,
    values: *const f32,
    dst: *mut f32,
    _dst_step: c_int,
    _roi: Size,
    _ctx: StreamContext,
) -> c_int {
    let v = unsafe { std::slice::from_raw_parts(values, 3) };
    record("nppiAddC_32f_C3R_Ctx", vec![addr(src), addr(dst), v[0] as f64, v[1] as f64, v[2] as f64])
}

unsafe extern "C" fn set_ac4(values: *const f32, dst: *mut f32, _step: c_int, _roi: Size, _ctx: StreamContext) -> c_int {
    let v = unsafe { std::slice::from_raw_parts(values, 3) };
    record("nppiSet_32f_AC4R_Ctx", vec![addr(dst), v[0] as f64, v[1] as f64, v[2] as f64])
}

unsafe extern "C" fn sub_c1(
    src1: *const f32,
    _s1: c_int,
    src2: *const f32,
    _s2: c_int,
    dst: *mut f32,
    _d: c_int,
    _roi: Size,
    _ctx: StreamContext,
) -> c_int {
    record("nppiSub_32f_C1R_Ctx", vec![addr(src1), addr(src2), addr(dst)])
}

unsafe extern "C" fn mirror_c1(
    _src: *const f32,
    _s: c_int,
    _dst: *mut f32,
    _d: c_int,
    _roi: Size,
    axis: c_int,
    _ctx: StreamContext,
) -> c_int {
    record("nppiMirror_32f_C1R_Ctx", vec![axis as f64])
}

unsafe extern "C" fn resize_c1(
    _src: *const f32,
    _s: c_int,
    src_size: Size,
    src_roi: Rect,
    _dst: *mut f32,
    _d: c_int,
    dst_size: Size,
    _dst_roi: Rect,
    interpolation: c_int,
    _ctx: StreamContext,
) -> c_int {
    record(
        "nppiResize_32f_C1R_Ctx",
        vec![src_size.width as f64, src_roi.x as f64, dst_size.width as f64, interpolation as f64],
    )
}

unsafe extern "C" fn max_error_size(_roi: Size, size: *mut usize, _ctx: StreamContext) -> c_int {
    unsafe { *size = METRIC_BUFFER };
    record("nppiMaximumErrorGetBufferHostSize_32f_C1R_Ctx", vec![])
}

unsafe extern "C" fn max_error(
    _src1: *const f32,
    _s1: c_int,
    _src2: *const f32,
    _s2: c_int,
    _roi: Size,
    out: *mut f64,
    buffer: *mut u8,
    _ctx: StreamContext,
) -> c_int {
    record("nppiMaximumError_32f_C1R_Ctx", vec![addr(out), addr(buffer)])
}

/// Core symbols in one library, image and signal symbols in another.
fn npp() -> Npp {
    let core = NativeLibrary::from_table(
        "nppc",
        [
            ("nppGetLibVersion", get_version as *const ()),
            ("nppGetStreamContext", get_stream_context as *const ()),
        ],
    );
    let image = NativeLibrary::from_table(
        "nppi",
        [
            ("nppiMalloc_32f_C1", malloc_32f_c1 as *const ()),
            ("nppiMalloc_32f_C3", malloc_32f_c3 as *const ()),
            ("nppiMalloc_32f_C4", malloc_32f_c4 as *const ()),
            ("nppiMalloc_8u_C1", malloc_8u_c1 as *const ()),
            ("nppiFree", free as *const ()),
            ("nppiAddC_32f_C1R_Ctx", add_c_c1 as *const ()),
            ("nppiAddC_32f_C3R_Ctx", add_c_c3 as *const ()),
            ("nppiSet_32f_AC4R_Ctx", set_ac4 as *const ()),
            ("nppiSub_32f_C1R_Ctx", sub_c1 as *const ()),
            ("nppiMirror_32f_C1R_Ctx", mirror_c1 as *const ()),
            ("nppiResize_32f_C1R_Ctx", resize_c1 as *const ()),
            ("nppiMaximumErrorGetBufferHostSize_32f_C1R_Ctx", max_error_size as *const ()),
            ("nppiMaximumError_32f_C1R_Ctx", max_error as *const ()),
            ("nppsMalloc_8u", s_malloc as *const ()),
            ("nppsFree", s_free as *const ()),
        ],
    );
    Npp::from_libraries([Arc::new(core), Arc::new(image)])
}

fn ctx() -> StreamContext {
    StreamContext::for_stream(Stream::DEFAULT)
}

// ---------------------------------------------------------------------------
// Library set
// ---------------------------------------------------------------------------

#[test]
fn test_version_and_context_resolve_across_libraries() {
    let npp = npp();
    assert_eq!(npp.version().unwrap(), LibraryVersion { major: 12, minor: 3, build: 1 });
    let ctx = npp.stream_context().unwrap();
    assert_eq!(ctx.multi_processor_count, 108);
    assert_eq!(ctx.compute_capability_major, 8);
    assert_eq!(ctx.stream, Stream::DEFAULT);
    assert_eq!(npp.libraries().len(), 2);
}

// ---------------------------------------------------------------------------
// Allocation and lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_image_alloc_release_once() {
    let npp = npp();
    let mut img = NppImage::<f32, C1>::new(&npp, 64, 32).unwrap();
    assert_eq!(last("nppiMalloc_32f_C1"), vec![64.0, 32.0]);
    assert_eq!(img.pitch(), 256);
    assert_eq!(img.size(), Size::new(64, 32));
    assert_eq!(img.roi(), Rect::new(0, 0, 64, 32));
    assert!(img.is_owned());

    let base = img.ptr().unwrap();
    img.release().unwrap();
    img.release().unwrap();
    assert_eq!(count("nppiFree"), 1);
    assert_eq!(last("nppiFree"), vec![base.0 as f64]);
    assert_eq!(img.state(), Lifecycle::Released);
    drop(img);
    assert_eq!(count("nppiFree"), 1);
}

#[test]
fn test_released_image_makes_no_call() {
    let npp = npp();
    let mut img = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let mut dst = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    img.release().unwrap();
    let err = img.add_const(&[1.0], &mut dst, &ctx()).unwrap_err();
    assert!(matches!(err, NppError::Core(ref e) if e.is_released()));
    assert_eq!(count("nppiAddC_32f_C1R_Ctx"), 0);
}

#[test]
fn test_null_allocation_is_an_error() {
    let npp = npp();
    let err = NppImage::<u8, C1>::new(&npp, 16, 16).unwrap_err();
    assert!(matches!(
        err,
        NppError::AllocationFailed { ref call, size } if call == "nppiMalloc_8u_C1" && size == Size::new(16, 16)
    ));
}

#[test]
fn test_empty_image_rejected_before_allocation() {
    let npp = npp();
    let err = NppImage::<f32, C1>::new(&npp, 0, 16).unwrap_err();
    assert!(matches!(err, NppError::InvalidArgument(_)));
    assert_eq!(count("nppiMalloc_32f_C1"), 0);
}

#[test]
fn test_unexported_layout_is_symbol_not_found() {
    let npp = npp();
    let err = NppImage::<u16, nvkit_npp::C2>::new(&npp, 4, 4).unwrap_err();
    assert!(matches!(
        err,
        NppError::Core(nvkit_core::Error::SymbolNotFound { ref symbol, .. }) if symbol == "nppiMalloc_16u_C2"
    ));
}

#[test]
fn test_borrowed_image_never_frees() {
    let npp = npp();
    let img = NppImage::<f32, C1>::borrowed(&npp, DevicePtr(0x4000), 16, 4, 64).unwrap();
    assert!(!img.is_owned());
    drop(img);
    assert_eq!(count("nppiFree"), 0);

    let err = NppImage::<f32, C1>::borrowed(&npp, DevicePtr(0x4000), 16, 4, 32).unwrap_err();
    assert!(matches!(err, NppError::InvalidArgument(_)));
}

// ---------------------------------------------------------------------------
// ROI and argument forwarding
// ---------------------------------------------------------------------------

#[test]
fn test_roi_offsets_pointer_and_size() {
    let npp = npp();
    let mut src = NppImage::<f32, C1>::new(&npp, 64, 32).unwrap();
    let mut dst = NppImage::<f32, C1>::new(&npp, 64, 32).unwrap();
    src.set_roi(Rect::new(4, 2, 10, 5)).unwrap();
    let base = src.ptr().unwrap().0;
    assert_eq!(src.roi_ptr().unwrap().0, base + 2 * 256 + 4 * 4);

    src.add_const(&[1.5], &mut dst, &ctx()).unwrap();
    let args = last("nppiAddC_32f_C1R_Ctx");
    assert_eq!(args[0], (base + 2 * 256 + 16) as f64);
    assert_eq!(args[1], 256.0);
    assert_eq!(args[2], 1.5);
    assert_eq!(args[3], dst.ptr().unwrap().0 as f64);
    assert_eq!(&args[5..], &[10.0, 5.0]);

    src.reset_roi();
    assert_eq!(src.roi(), Rect::new(0, 0, 64, 32));
}

#[test]
fn test_roi_outside_image_rejected() {
    let npp = npp();
    let mut img = NppImage::<f32, C1>::new(&npp, 64, 32).unwrap();
    let err = img.set_roi(Rect::new(60, 0, 8, 8)).unwrap_err();
    assert!(matches!(err, NppError::InvalidArgument(_)));
    assert_eq!(img.roi(), Rect::new(0, 0, 64, 32));
}

#[test]
fn test_small_destination_roi_rejected() {
    let npp = npp();
    let src = NppImage::<f32, C1>::new(&npp, 64, 32).unwrap();
    let mut dst = NppImage::<f32, C1>::new(&npp, 32, 32).unwrap();
    let err = src.add_const(&[1.0], &mut dst, &ctx()).unwrap_err();
    assert!(matches!(err, NppError::InvalidArgument(_)));
    assert_eq!(count("nppiAddC_32f_C1R_Ctx"), 0);
}

#[test]
fn test_multichannel_constants_passed_as_array() {
    let npp = npp();
    let src = NppImage::<f32, C3>::new(&npp, 8, 8).unwrap();
    let mut dst = NppImage::<f32, C3>::new(&npp, 8, 8).unwrap();
    src.add_const(&[1.0, 2.0, 3.0], &mut dst, &ctx()).unwrap();
    assert_eq!(&last("nppiAddC_32f_C3R_Ctx")[2..], &[1.0, 2.0, 3.0]);

    let err = src.add_const(&[1.0, 2.0], &mut dst, &ctx()).unwrap_err();
    assert!(matches!(err, NppError::BufferTooSmall { required: 3, actual: 2, .. }));
    assert_eq!(count("nppiAddC_32f_C3R_Ctx"), 1);
}

#[test]
fn test_alpha_view_uses_ac4_symbols() {
    let npp = npp();
    let img = NppImage::<f32, C4>::new(&npp, 8, 8).unwrap();
    let mut view: NppImage<f32, Ac4> = img.alpha_view().unwrap();
    assert!(!view.is_owned());
    view.set(&[0.1, 0.2, 0.3], &ctx()).unwrap();
    let args = last("nppiSet_32f_AC4R_Ctx");
    assert_eq!(args[0], img.ptr().unwrap().0 as f64);
    assert_eq!(args.len(), 4);
    drop(view);
    assert_eq!(count("nppiFree"), 0);
}

#[test]
fn test_sub_is_self_minus_other() {
    let npp = npp();
    let a = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let b = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let mut dst = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    a.sub(&b, &mut dst, &ctx()).unwrap();
    // NPP computes src2 - src1
    let args = last("nppiSub_32f_C1R_Ctx");
    assert_eq!(args[0], b.ptr().unwrap().0 as f64);
    assert_eq!(args[1], a.ptr().unwrap().0 as f64);
}

// ---------------------------------------------------------------------------
// Status handling
// ---------------------------------------------------------------------------

#[test]
fn test_error_status_surfaces() {
    let npp = npp();
    let src = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let mut dst = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    fail("nppiMirror_32f_C1R_Ctx", -21);
    let err = src.mirror(&mut dst, Axis::Both, &ctx()).unwrap_err();
    assert_eq!(err.status(), Some(NppStatus::MirrorFlip));
    assert!(err.to_string().contains("nppiMirror_32f_C1R_Ctx"));
    assert_eq!(last("nppiMirror_32f_C1R_Ctx"), vec![2.0]);
}

#[test]
fn test_warning_status_passes() {
    let npp = npp();
    let src = NppImage::<f32, C1>::new(&npp, 64, 32).unwrap();
    let mut dst = NppImage::<f32, C1>::new(&npp, 32, 16).unwrap();
    fail("nppiResize_32f_C1R_Ctx", 35);
    src.resize(&mut dst, Interpolation::Linear, &ctx()).unwrap();
    assert_eq!(last("nppiResize_32f_C1R_Ctx"), vec![64.0, 0.0, 32.0, 2.0]);
}

// ---------------------------------------------------------------------------
// Statistics and scratch buffers
// ---------------------------------------------------------------------------

#[test]
fn test_metric_allocates_and_frees_scratch() {
    let npp = npp();
    let a = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let b = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let out = DeviceSlice::<f64>::new(DevicePtr(0x7000), 1);
    assert_eq!(a.max_error_buffer_size(&ctx()).unwrap(), METRIC_BUFFER);

    a.max_error(&b, out, &ctx()).unwrap();
    assert_eq!(last("nppsMalloc_8u"), vec![METRIC_BUFFER as f64]);
    assert_eq!(last("nppiMaximumError_32f_C1R_Ctx"), vec![0x7000 as f64, SCRATCH as f64]);
    assert_eq!(count("nppsFree"), 1);
}

#[test]
fn test_metric_caller_buffer_checked() {
    let npp = npp();
    let a = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let b = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let out = DeviceSlice::<f64>::new(DevicePtr(0x7000), 1);

    let small = DeviceSlice::<u8>::new(DevicePtr(0x8000), METRIC_BUFFER - 1);
    let err = a.max_error_with_buffer(&b, out, small, &ctx()).unwrap_err();
    assert!(matches!(err, NppError::BufferTooSmall { required: METRIC_BUFFER, .. }));
    assert_eq!(count("nppiMaximumError_32f_C1R_Ctx"), 0);

    let buffer = DeviceSlice::<u8>::new(DevicePtr(0x8000), METRIC_BUFFER);
    a.max_error_with_buffer(&b, out, buffer, &ctx()).unwrap();
    assert_eq!(last("nppiMaximumError_32f_C1R_Ctx"), vec![0x7000 as f64, 0x8000 as f64]);
    assert_eq!(count("nppsMalloc_8u"), 0);
}

#[test]
fn test_metric_output_length_checked() {
    let npp = npp();
    let a = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let b = NppImage::<f32, C1>::new(&npp, 8, 8).unwrap();
    let empty = DeviceSlice::<f64>::new(DevicePtr(0x7000), 0);
    let err = a.max_error(&b, empty, &ctx()).unwrap_err();
    assert!(matches!(err, NppError::BufferTooSmall { name: "output", .. }));
}

#[test]
fn test_scratch_buffer_lifecycle() {
    let npp = npp();
    let mut buffer = ScratchBuffer::new(&npp, 0).unwrap();
    assert_eq!(last("nppsMalloc_8u"), vec![1.0]);
    assert!(buffer.is_empty());
    assert_eq!(buffer.as_slice().unwrap().ptr(), DevicePtr(SCRATCH as u64));
    buffer.release().unwrap();
    buffer.release().unwrap();
    assert_eq!(count("nppsFree"), 1);
    assert!(buffer.as_slice().unwrap_err().to_string().contains("after release"));
}
