//! Capture session lifecycle and query surface.
//!
//! [`VisionSession`] ties the pieces together: it owns the frame store,
//! the running flag and capture thread handle, and the optionally loaded
//! face detector. All queries are synchronous, take `&self`, and answer
//! from the most recent frame; the capture loop keeps that frame current
//! in the background.

use crate::camera::worker::spawn_capture_loop;
use crate::camera::{Camera, CameraConfig};
use crate::convert;
use crate::detect::{self, Detection, EdgeMap, FaceDetector};
use crate::error::{Result, VisionError};
use crate::frame::{FrameInfo, VideoFrame};
use crate::store::FrameStore;
use logging::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

/// A camera capture session with synchronous detection queries.
///
/// While running, exactly one background thread reads the device and
/// publishes into the store. Queries never touch the device; they read
/// the store, so they keep answering from the last frame even after
/// [`stop`](Self::stop). Queries may run concurrently from any number of
/// threads.
pub struct VisionSession {
    config: CameraConfig,
    store: Arc<FrameStore>,
    running: Arc<AtomicBool>,
    capture_handle: Option<JoinHandle<()>>,
    face_detector: Mutex<Option<FaceDetector>>,
    logger: Logger,
}

impl VisionSession {
    /// Creates a stopped session for the given camera configuration.
    pub fn new(config: CameraConfig, logger: Logger) -> Self {
        VisionSession {
            config,
            store: Arc::new(FrameStore::new()),
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: None,
            face_detector: Mutex::new(None),
            logger,
        }
    }

    /// Starts the capture loop.
    ///
    /// Opens the camera and spawns the background thread. Returns without
    /// waiting for a first frame; queries fail with
    /// [`VisionError::NoFrame`] until one arrives. Calling start on a
    /// running session is a no-op, the existing loop keeps its device.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            self.logger.info("Capture already running, ignoring start");
            return Ok(());
        }

        let camera = Camera::new(self.config.clone(), self.logger.clone())?;

        self.running.store(true, Ordering::Release);
        match spawn_capture_loop(
            camera,
            Arc::clone(&self.store),
            Arc::clone(&self.running),
            self.logger.clone(),
        ) {
            Ok(handle) => {
                self.capture_handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Stops the capture loop and waits for it to exit.
    ///
    /// The camera is released inside the capture thread, so when this
    /// returns the device is free to be reopened. The last captured frame
    /// stays in the store. Stopping a stopped session is a no-op.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);

        if let Some(handle) = self.capture_handle.take() {
            if handle.join().is_err() {
                self.logger.error("Capture thread panicked during shutdown");
            }
            self.logger.info("Capture stopped");
        }
    }

    /// Returns true while the capture loop is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Direct access to the frame store.
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Returns the shape metadata of the current frame.
    pub fn frame_info(&self) -> Result<FrameInfo> {
        self.store
            .with_frame(FrameInfo::from_frame)
            .ok_or(VisionError::NoFrame)
    }

    /// Copies the current frame's raw BGR bytes into `buf`.
    ///
    /// Requires `buf.len() >= stride * height` for the current frame; on a
    /// short buffer nothing is written and the needed size is reported in
    /// the error. Returns the number of bytes written.
    pub fn read_frame_bgr(&self, buf: &mut [u8]) -> Result<usize> {
        self.store
            .with_frame(|frame| Self::copy_frame_bytes(frame, buf))
            .ok_or(VisionError::NoFrame)?
    }

    /// Converts the current frame to tightly packed RGB and copies it into `buf`.
    ///
    /// Requires `buf.len() >= width * height * 3` for the current frame;
    /// on a short buffer nothing is written. Returns the number of bytes
    /// written. Note the needed size differs from
    /// [`read_frame_bgr`](Self::read_frame_bgr) whenever rows carry
    /// padding.
    pub fn read_frame_rgb(&self, buf: &mut [u8]) -> Result<usize> {
        let frame = self.snapshot()?;

        let needed = frame.width() as usize * frame.height() as usize * 3;
        if buf.len() < needed {
            return Err(VisionError::BufferTooSmall {
                needed,
                got: buf.len(),
            });
        }

        let (_, _, rgb) = convert::frame_to_rgb(&frame)?;
        buf[..needed].copy_from_slice(&rgb);
        Ok(needed)
    }

    /// Finds the largest reddish region in the current frame.
    ///
    /// `Ok(None)` means the frame held no matching region.
    pub fn detect_color_region(&self) -> Result<Option<Detection>> {
        let frame = self.snapshot()?;
        detect::find_red_region(&frame)
    }

    /// Loads the cascade definition used by [`detect_faces`](Self::detect_faces).
    ///
    /// May be called before the camera ever starts. Replaces any
    /// previously loaded cascade; load failures leave the previous
    /// cascade in place.
    pub fn load_face_cascade(&self, path: &str) -> Result<()> {
        let detector = FaceDetector::load(path, &self.logger)?;
        let mut guard = self.lock_detector();
        *guard = Some(detector);
        Ok(())
    }

    /// Detects faces in the current frame.
    ///
    /// Fails with a cascade error until a cascade has been loaded.
    pub fn detect_faces(&self) -> Result<Vec<Detection>> {
        let frame = self.snapshot()?;
        let mut guard = self.lock_detector();
        let detector = guard
            .as_mut()
            .ok_or_else(|| VisionError::Cascade("No cascade loaded".to_string()))?;
        detector.detect(&frame)
    }

    /// Extracts the edge map of the current frame.
    pub fn detect_edges(&self) -> Result<EdgeMap> {
        let frame = self.snapshot()?;
        detect::edge_map(&frame)
    }

    /// Detects circles in the current frame.
    pub fn detect_circles(&self) -> Result<Vec<Detection>> {
        let frame = self.snapshot()?;
        detect::find_circles(&frame)
    }

    /// Clones the current frame so analysis runs outside the store lock.
    fn snapshot(&self) -> Result<VideoFrame> {
        self.store.snapshot().ok_or(VisionError::NoFrame)
    }

    fn lock_detector(&self) -> std::sync::MutexGuard<'_, Option<FaceDetector>> {
        self.face_detector
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn copy_frame_bytes(frame: &VideoFrame, buf: &mut [u8]) -> Result<usize> {
        let needed = frame.total_bytes();
        if buf.len() < needed {
            return Err(VisionError::BufferTooSmall {
                needed,
                got: buf.len(),
            });
        }

        let bytes = frame.bytes()?;
        buf[..needed].copy_from_slice(&bytes[..needed]);
        Ok(needed)
    }
}

impl Drop for VisionSession {
    /// Stops the capture loop when the session goes away.
    fn drop(&mut self) {
        self.stop();
    }
}
