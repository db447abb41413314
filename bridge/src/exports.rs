//! Exported C functions.
//!
//! One process-wide session lives behind a read-write lock, created on
//! first use. Lifecycle calls (`startCamera`, `stopCamera`,
//! `loadFaceCascade`) take the lock exclusively; queries share it, so
//! any number of host threads may query concurrently.
//!
//! Every fallible export returns a C `bool`. A false return means the
//! call did nothing observable: output structs and pixel buffers stay
//! untouched, except `detectEdges` which reports frame dimensions even
//! when the pixel buffer is too small. Failure details go to the bridge
//! log file, never across the ABI.

use crate::types::{DetectionResult, FrameInfo, MultiDetectionResult};
use logging::{LogLevel, Logger};
use std::ffi::{CStr, c_char};
use std::path::PathBuf;
use std::slice;
use std::sync::{OnceLock, PoisonError, RwLock};
use vision::{CameraConfig, Detection, VisionError, VisionSession};

const LOG_FILE: &str = "vision_bridge.log";
const LOG_LEVEL_VAR: &str = "VISION_BRIDGE_LOG_LEVEL";

/// The process-wide session behind the handleless exports.
static SESSION: RwLock<Option<VisionSession>> = RwLock::new(None);

/// Logger shared by the exports and the session they drive.
///
/// The C surface has no configuration parameters, so the minimum level
/// comes from the `VISION_BRIDGE_LOG_LEVEL` environment variable (Info
/// when unset). Tries the working directory first, then the OS temp
/// directory. A host must never fail to use the library because a log
/// file cannot be opened, so the last resort discards messages.
fn bridge_logger() -> &'static Logger {
    static LOGGER: OnceLock<Logger> = OnceLock::new();
    LOGGER.get_or_init(|| {
        let level = std::env::var(LOG_LEVEL_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(LogLevel::Info);

        Logger::with_component(PathBuf::from(LOG_FILE), level, "bridge".to_string(), false)
            .or_else(|_| {
                Logger::with_component(
                    std::env::temp_dir().join(LOG_FILE),
                    level,
                    "bridge".to_string(),
                    false,
                )
            })
            .unwrap_or_else(|_| Logger::sink())
    })
}

/// Runs `f` with exclusive access, creating a stopped session on first use.
fn write_session<T>(f: impl FnOnce(&mut VisionSession) -> T) -> T {
    let mut guard = SESSION.write().unwrap_or_else(PoisonError::into_inner);
    let session = guard.get_or_insert_with(|| {
        VisionSession::new(CameraConfig::default(), bridge_logger().clone())
    });
    f(session)
}

/// Runs a query under the shared lock.
///
/// Queries never create the session: without a `startCamera` or
/// `loadFaceCascade` call no frame can exist, so an absent session
/// reports [`VisionError::NoFrame`].
fn read_session<T>(f: impl FnOnce(&VisionSession) -> vision::Result<T>) -> vision::Result<T> {
    let guard = SESSION.read().unwrap_or_else(PoisonError::into_inner);
    match guard.as_ref() {
        Some(session) => f(session),
        None => Err(VisionError::NoFrame),
    }
}

fn log_failure(name: &str, err: &VisionError) {
    let message = format!("{} failed: {}", name, err);
    // Hosts poll queries before the first frame arrives; keep that quiet.
    if matches!(err, VisionError::NoFrame) {
        bridge_logger().debug(&message);
    } else {
        bridge_logger().error(&message);
    }
}

/// Opens the default camera and starts background capture.
///
/// Returns without waiting for a first frame; queries fail until one
/// arrives. Calling again while capture runs is a no-op returning true.
#[unsafe(no_mangle)]
pub extern "C" fn startCamera() -> bool {
    write_session(|session| match session.start() {
        Ok(()) => true,
        Err(e) => {
            bridge_logger().error(&format!("startCamera failed: {}", e));
            false
        }
    })
}

/// Stops background capture and releases the camera.
///
/// Blocks until the capture thread exits. The last captured frame stays
/// readable. Calling with no camera running is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn stopCamera() {
    let mut guard = SESSION.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(session) = guard.as_mut() {
        session.stop();
    }
}

/// Runs color-region detection on the current frame.
///
/// Returns true whenever a frame exists; `detected` inside the result
/// says whether a region matched. Returns false with `result` untouched
/// when no frame is available or `result` is null.
#[unsafe(no_mangle)]
pub extern "C" fn getFrame(result: *mut DetectionResult) -> bool {
    if result.is_null() {
        return false;
    }
    match read_session(|session| session.detect_color_region()) {
        Ok(region) => {
            let value = region.map_or(DetectionResult::MISS, DetectionResult::hit);
            unsafe { *result = value };
            true
        }
        Err(e) => {
            log_failure("getFrame", &e);
            false
        }
    }
}

/// Writes the current frame's shape metadata through `info`.
#[unsafe(no_mangle)]
pub extern "C" fn getFrameInfo(info: *mut FrameInfo) -> bool {
    if info.is_null() {
        return false;
    }
    match read_session(|session| session.frame_info()) {
        Ok(value) => {
            unsafe { *info = FrameInfo::from(value) };
            true
        }
        Err(e) => {
            log_failure("getFrameInfo", &e);
            false
        }
    }
}

/// Copies the current frame's raw BGR bytes into `buffer`.
///
/// `buffer` must hold at least `total_bytes` from `getFrameInfo`. A
/// short buffer returns false with nothing written.
#[unsafe(no_mangle)]
pub extern "C" fn getFrameBytes(buffer: *mut u8, buffer_size: i32) -> bool {
    copy_into_buffer("getFrameBytes", buffer, buffer_size, |session, buf| {
        session.read_frame_bgr(buf)
    })
}

/// Copies the current frame into `buffer` as tightly packed RGB.
///
/// `buffer` must hold at least `width * height * 3` bytes, which is less
/// than `total_bytes` whenever rows carry padding.
#[unsafe(no_mangle)]
pub extern "C" fn getFrameBytesRgb(buffer: *mut u8, buffer_size: i32) -> bool {
    copy_into_buffer("getFrameBytesRgb", buffer, buffer_size, |session, buf| {
        session.read_frame_rgb(buf)
    })
}

/// Loads the cascade definition used by `detectFaces`.
///
/// `cascade_path` must be a NUL-terminated UTF-8 path. May be called
/// before the camera ever starts. Replaces any previously loaded
/// cascade; on failure the previous cascade, if any, stays active.
#[unsafe(no_mangle)]
pub extern "C" fn loadFaceCascade(cascade_path: *const c_char) -> bool {
    if cascade_path.is_null() {
        return false;
    }
    let result = || -> vision::Result<()> {
        let path = unsafe { CStr::from_ptr(cascade_path) }
            .to_str()
            .map_err(|_| VisionError::Cascade("Cascade path is not valid UTF-8".to_string()))?;
        write_session(|session| session.load_face_cascade(path))
    }();

    match result {
        Ok(()) => true,
        Err(e) => {
            bridge_logger().error(&format!("loadFaceCascade failed: {}", e));
            false
        }
    }
}

/// Detects faces in the current frame.
///
/// Fails until a cascade has been loaded. Detections beyond the result's
/// capacity are dropped.
#[unsafe(no_mangle)]
pub extern "C" fn detectFaces(result: *mut MultiDetectionResult) -> bool {
    fill_multi("detectFaces", result, |session| session.detect_faces())
}

/// Extracts the edge map of the current frame as single-channel bytes.
///
/// Frame dimensions are written through `out_width`/`out_height`
/// whenever a frame exists, even when `buffer` is too small for the
/// `width * height` payload. The pixel buffer is written only on
/// success.
#[unsafe(no_mangle)]
pub extern "C" fn detectEdges(
    buffer: *mut u8,
    buffer_size: i32,
    out_width: *mut i32,
    out_height: *mut i32,
) -> bool {
    if buffer.is_null() || out_width.is_null() || out_height.is_null() || buffer_size < 0 {
        return false;
    }

    let map = match read_session(|session| session.detect_edges()) {
        Ok(map) => map,
        Err(e) => {
            log_failure("detectEdges", &e);
            return false;
        }
    };

    unsafe {
        *out_width = map.width();
        *out_height = map.height();
    }

    let needed = map.len();
    if (buffer_size as usize) < needed {
        log_failure(
            "detectEdges",
            &VisionError::BufferTooSmall {
                needed,
                got: buffer_size as usize,
            },
        );
        return false;
    }

    match map.bytes() {
        Ok(bytes) => {
            let buf = unsafe { slice::from_raw_parts_mut(buffer, needed) };
            buf.copy_from_slice(&bytes[..needed]);
            true
        }
        Err(e) => {
            log_failure("detectEdges", &e);
            false
        }
    }
}

/// Detects circles in the current frame, reported as enclosing squares.
///
/// Detections beyond the result's capacity are dropped.
#[unsafe(no_mangle)]
pub extern "C" fn detectCircles(result: *mut MultiDetectionResult) -> bool {
    fill_multi("detectCircles", result, |session| session.detect_circles())
}

fn copy_into_buffer(
    name: &str,
    buffer: *mut u8,
    buffer_size: i32,
    read: impl FnOnce(&VisionSession, &mut [u8]) -> vision::Result<usize>,
) -> bool {
    if buffer.is_null() || buffer_size < 0 {
        return false;
    }
    let buf = unsafe { slice::from_raw_parts_mut(buffer, buffer_size as usize) };
    match read_session(|session| read(session, buf)) {
        Ok(_) => true,
        Err(e) => {
            log_failure(name, &e);
            false
        }
    }
}

fn fill_multi(
    name: &str,
    result: *mut MultiDetectionResult,
    detect: impl FnOnce(&VisionSession) -> vision::Result<Vec<Detection>>,
) -> bool {
    if result.is_null() {
        return false;
    }
    match read_session(detect) {
        Ok(detections) => {
            unsafe { *result = MultiDetectionResult::from_detections(&detections) };
            true
        }
        Err(e) => {
            log_failure(name, &e);
            false
        }
    }
}
