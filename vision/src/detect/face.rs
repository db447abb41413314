//! Face detection backed by a pretrained cascade classifier.

use crate::detect::result::Detection;
use crate::error::{Result, VisionError};
use crate::frame::VideoFrame;
use logging::Logger;
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::imgproc::{COLOR_BGR2GRAY, cvt_color_def, equalize_hist};
use opencv::objdetect::{CASCADE_SCALE_IMAGE, CascadeClassifier};
use opencv::prelude::*;

/// Pyramid scale step between detection passes
const SCALE_FACTOR: f64 = 1.1;
/// Neighboring detections required to accept a face
const MIN_NEIGHBORS: i32 = 5;
/// Smallest face size considered, in pixels
const MIN_FACE_SIZE: i32 = 30;

/// Multi-scale face detector over a loaded cascade definition.
#[derive(Debug)]
pub struct FaceDetector {
    classifier: CascadeClassifier,
}

impl FaceDetector {
    /// Loads a cascade definition file.
    ///
    /// # Arguments
    /// * `path` - Path to the cascade XML file
    /// * `logger` - Logger instance for monitoring
    ///
    /// # Errors
    ///
    /// Returns `VisionError::Cascade` when the file is missing, malformed,
    /// or loads empty.
    pub fn load(path: &str, logger: &Logger) -> Result<Self> {
        let mut classifier = CascadeClassifier::default()
            .map_err(|e| VisionError::Cascade(format!("Failed to create classifier: {}", e)))?;

        let loaded = classifier
            .load(path)
            .map_err(|e| VisionError::Cascade(format!("Failed to load cascade '{}': {}", path, e)))?;

        if !loaded || classifier.empty()? {
            return Err(VisionError::Cascade(format!(
                "Cascade file '{}' could not be loaded",
                path
            )));
        }

        logger.info(&format!("Cascade loaded from {}", path));
        Ok(Self { classifier })
    }

    /// Detects faces in the frame.
    ///
    /// The frame is converted to grayscale and histogram-equalized before
    /// the multi-scale pass. Returns every detection in classifier order;
    /// an empty vector means no faces, which is a successful result.
    pub fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<Detection>> {
        let mut gray = Mat::default();
        cvt_color_def(frame.data(), &mut gray, COLOR_BGR2GRAY)?;

        let mut equalized = Mat::default();
        equalize_hist(&gray, &mut equalized)?;

        let mut faces: Vector<Rect> = Vector::new();
        self.classifier.detect_multi_scale(
            &equalized,
            &mut faces,
            SCALE_FACTOR,
            MIN_NEIGHBORS,
            CASCADE_SCALE_IMAGE,
            Size::new(MIN_FACE_SIZE, MIN_FACE_SIZE),
            Size::new(0, 0),
        )?;

        Ok(faces.iter().map(Detection::from).collect())
    }
}
