//! Camera device management.
//!
//! Core camera capture functionality including initialization,
//! configuration, and frame capture operations.

use crate::error::{Result, VisionError};
use crate::frame::VideoFrame;
use logging::Logger;
use opencv::prelude::*;
use opencv::videoio::{CAP_ANY, VideoCapture};

use super::config::CameraConfig;

/// Log capture progress every N frames
const CAPTURE_LOG_INTERVAL: u64 = 300;

/// Video capture device
///
/// Manages camera initialization, configuration, frame capture, and cleanup.
/// Uses OpenCV VideoCapture for cross-platform camera access.
pub struct Camera {
    capture: VideoCapture,
    config: CameraConfig,
    logger: Logger,
    frame_count: u64,
    actual_width: u32,
    actual_height: u32,
    actual_fps: f64,
}

/// Camera settings read back after initialization
struct CameraSettings {
    width: u32,
    height: u32,
    fps: f64,
}

impl Camera {
    /// Creates a new camera with the given configuration
    ///
    /// Opens the device, applies resolution/FPS settings, and reads back
    /// the values the driver actually accepted. Logs warnings when the
    /// requested settings could not be applied exactly.
    ///
    /// # Arguments
    /// * `config` - Camera configuration (device ID, resolution, FPS)
    /// * `logger` - Logger instance for monitoring
    ///
    /// # Returns
    /// * `Ok(Camera)` - Successfully initialized camera
    /// * `Err(VisionError)` - If the camera cannot be opened or configured
    pub fn new(config: CameraConfig, logger: Logger) -> Result<Self> {
        logger.info(&format!(
            "Initializing camera ID {} @ {} fps",
            config.device_id, config.fps
        ));

        let mut capture = VideoCapture::new(config.device_id, CAP_ANY)
            .map_err(|e| VisionError::Camera(format!("Failed to open camera: {}", e)))?;

        if !Self::is_opened(&capture)? {
            return Err(VisionError::Camera("Camera is not available".to_string()));
        }

        let settings = Self::configure(&mut capture, &config, &logger)?;

        logger.info("Camera initialized successfully");

        Ok(Camera {
            capture,
            config,
            logger,
            frame_count: 0,
            actual_width: settings.width,
            actual_height: settings.height,
            actual_fps: settings.fps,
        })
    }

    /// Captures a single frame from the camera
    ///
    /// Reads one frame from the device and wraps it into a VideoFrame.
    /// Empty or zero-sized reads are rejected.
    ///
    /// # Returns
    /// * `Ok(VideoFrame)` - Successfully captured frame
    /// * `Err(VisionError)` - If capture fails or the frame is empty
    pub fn capture_frame(&mut self) -> Result<VideoFrame> {
        let mut mat = Mat::default();

        let success = self
            .capture
            .read(&mut mat)
            .map_err(|e| VisionError::Camera(format!("Failed to read frame: {}", e)))?;

        if !success || mat.empty() {
            return Err(VisionError::Camera("Empty or invalid frame".to_string()));
        }

        if mat.cols() == 0 || mat.rows() == 0 {
            return Err(VisionError::Camera("Invalid frame dimensions".to_string()));
        }

        self.frame_count += 1;

        if self.frame_count.is_multiple_of(CAPTURE_LOG_INTERVAL) {
            self.logger
                .debug(&format!("Frames captured: {}", self.frame_count));
        }

        Ok(VideoFrame::new(mat))
    }

    /// Returns the total number of frames captured
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the camera configuration
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Returns the resolution the device actually delivers
    pub fn actual_resolution(&self) -> (u32, u32) {
        (self.actual_width, self.actual_height)
    }

    /// Returns the framerate the device actually delivers
    pub fn actual_fps(&self) -> f64 {
        self.actual_fps
    }

    /// Applies settings, reads back actual values, and logs mismatches
    fn configure(
        capture: &mut VideoCapture,
        config: &CameraConfig,
        logger: &Logger,
    ) -> Result<CameraSettings> {
        Self::apply_camera_settings(capture, config);
        let settings = Self::read_actual_settings(capture)?;
        Self::log_configuration(&settings, config, logger);
        Ok(settings)
    }

    /// Applies requested settings to the device; drivers may ignore them
    fn apply_camera_settings(capture: &mut VideoCapture, config: &CameraConfig) {
        use opencv::videoio::{CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH};

        if let Some((width, height)) = config.resolution() {
            let _ = capture.set(CAP_PROP_FRAME_WIDTH, f64::from(width));
            let _ = capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(height));
        }
        let _ = capture.set(CAP_PROP_FPS, config.fps);
    }

    /// Reads the settings the driver actually accepted
    fn read_actual_settings(capture: &VideoCapture) -> Result<CameraSettings> {
        use opencv::videoio::{CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH};

        let width = Self::get_property(capture, CAP_PROP_FRAME_WIDTH)? as u32;
        let height = Self::get_property(capture, CAP_PROP_FRAME_HEIGHT)? as u32;
        let fps = Self::get_property(capture, CAP_PROP_FPS)?;

        Ok(CameraSettings { width, height, fps })
    }

    /// Logs configuration results and warnings for mismatches
    fn log_configuration(settings: &CameraSettings, config: &CameraConfig, logger: &Logger) {
        logger.info(&format!(
            "Camera configured: {}x{} @ {:.1} FPS",
            settings.width, settings.height, settings.fps
        ));

        if let Some((req_w, req_h)) = config.resolution() {
            if settings.width != req_w || settings.height != req_h {
                logger.warn(&format!(
                    "Resolution mismatch (got: {}x{}, requested: {}x{})",
                    settings.width, settings.height, req_w, req_h
                ));
            }
        }

        if (settings.fps - config.fps).abs() > 1.0 {
            logger.warn(&format!(
                "FPS mismatch (got: {:.1}, requested: {:.1})",
                settings.fps, config.fps
            ));
        }
    }

    /// Safely gets a camera property
    fn get_property(capture: &VideoCapture, prop: i32) -> Result<f64> {
        capture
            .get(prop)
            .map_err(|e| VisionError::Camera(format!("Error getting property: {}", e)))
    }

    /// Verifies if the camera is opened and ready
    fn is_opened(capture: &VideoCapture) -> Result<bool> {
        capture
            .is_opened()
            .map_err(|e| VisionError::Camera(format!("Error verifying camera status: {}", e)))
    }
}

impl Drop for Camera {
    /// Releases camera resources when dropped
    ///
    /// Logs final statistics and ensures proper cleanup of the device handle.
    fn drop(&mut self) {
        self.logger.info(&format!(
            "Closing camera. Total frames captured: {}",
            self.frame_count
        ));

        if let Err(e) = self.capture.release() {
            self.logger.error(&format!("Error releasing camera: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::Logger;

    #[test]
    fn test_camera_invalid_id() {
        let config = CameraConfig::new(999, 30.0).unwrap();
        let result = Camera::new(config, Logger::sink());
        assert!(result.is_err());
    }
}
