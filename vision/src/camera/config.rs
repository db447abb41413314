//! Camera configuration types.
//!
//! Internal configuration for the capture device: device selection,
//! optional forced resolution, and target framerate.

use crate::error::{Result, VisionError};

/// Camera capture configuration
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Camera device ID (0 for the default camera)
    pub device_id: i32,
    /// Frame width in pixels (None = device native)
    pub width: Option<u32>,
    /// Frame height in pixels (None = device native)
    pub height: Option<u32>,
    /// Target frames per second
    pub fps: f64,
}

impl CameraConfig {
    /// Minimum valid FPS value
    const MIN_FPS: f64 = 1.0;
    /// Maximum valid FPS value
    const MAX_FPS: f64 = 240.0;
    /// Minimum valid resolution dimension
    const MIN_DIMENSION: u32 = 1;
    /// Maximum valid resolution dimension (8K)
    const MAX_DIMENSION: u32 = 7680;

    /// Creates a configuration with validation
    ///
    /// # Arguments
    /// * `device_id` - Camera device identifier
    /// * `fps` - Target frames per second (clamped to 1.0-240.0)
    ///
    /// # Errors
    ///
    /// Returns `VisionError::Config` if fps is NaN or infinite.
    pub fn new(device_id: i32, fps: f64) -> Result<Self> {
        if !fps.is_finite() {
            return Err(VisionError::Config(
                "FPS must be a finite number".to_string(),
            ));
        }

        Ok(Self {
            device_id,
            width: None,
            height: None,
            fps: fps.clamp(Self::MIN_FPS, Self::MAX_FPS),
        })
    }

    /// Requests a specific capture resolution
    ///
    /// # Errors
    ///
    /// Returns `VisionError::Config` if either dimension is 0 or above 7680.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Result<Self> {
        Self::validate_dimension("Width", width)?;
        Self::validate_dimension("Height", height)?;

        self.width = Some(width);
        self.height = Some(height);
        Ok(self)
    }

    /// Returns the requested resolution, if one was set
    pub fn resolution(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }

    fn validate_dimension(name: &str, value: u32) -> Result<()> {
        if !(Self::MIN_DIMENSION..=Self::MAX_DIMENSION).contains(&value) {
            return Err(VisionError::Config(format!(
                "{} must be between {} and {}, got {}",
                name,
                Self::MIN_DIMENSION,
                Self::MAX_DIMENSION,
                value
            )));
        }
        Ok(())
    }
}

/// Default configuration (device 0, native resolution, 30 FPS)
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: None,
            height: None,
            fps: 30.0,
        }
    }
}
