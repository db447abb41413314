//! Video frame representation.
//!
//! Provides the core `VideoFrame` type wrapping a captured image and the
//! plain-data `FrameInfo` snapshot of its shape metadata.

use crate::error::Result;
use opencv::core::Mat;
use opencv::prelude::*;

/// Raw video frame
///
/// Wraps an OpenCV Mat in BGR layout with cached shape metadata and a
/// capture timestamp. Frames are 8-bit, so the mat's row step equals the
/// stride in bytes.
#[derive(Clone)]
pub struct VideoFrame {
    data: Mat,
    width: i32,
    height: i32,
    channels: i32,
    stride: usize,
    timestamp: std::time::Instant,
}

impl VideoFrame {
    /// Creates a new video frame from an OpenCV Mat
    ///
    /// Captures dimensions, stride and timestamp at creation time.
    ///
    /// # Arguments
    /// * `mat` - OpenCV matrix containing the frame data (BGR format)
    pub fn new(mat: Mat) -> Self {
        let width = mat.cols();
        let height = mat.rows();
        let channels = mat.channels();
        // step1 of an 8-bit mat is the row length in bytes
        let stride = mat.step1(0).unwrap_or(0);

        VideoFrame {
            data: mat,
            width,
            height,
            channels,
            stride,
            timestamp: std::time::Instant::now(),
        }
    }

    /// Returns frame width in pixels
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns frame height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the number of color channels per pixel
    pub fn channels(&self) -> i32 {
        self.channels
    }

    /// Returns the row stride in bytes
    ///
    /// At least `width * channels`; may be larger when rows carry
    /// alignment padding.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the total size of the pixel buffer in bytes (`stride * height`)
    pub fn total_bytes(&self) -> usize {
        self.stride * self.height as usize
    }

    /// Returns true when the frame holds no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns capture timestamp
    pub fn timestamp(&self) -> std::time::Instant {
        self.timestamp
    }

    /// Returns reference to the internal OpenCV matrix
    ///
    /// Allows analysis without cloning.
    pub fn data(&self) -> &Mat {
        &self.data
    }

    /// Returns the raw pixel bytes in native BGR order
    ///
    /// # Errors
    ///
    /// Fails for frames whose storage is not a single continuous block.
    pub fn bytes(&self) -> Result<&[u8]> {
        Ok(self.data.data_bytes()?)
    }
}

/// Shape metadata of a frame, without the pixels.
///
/// Field values describe one observed frame; a later frame may differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Frame width in pixels
    pub width: i32,
    /// Frame height in pixels
    pub height: i32,
    /// Color channels per pixel (3 for BGR)
    pub channels: i32,
    /// Row stride in bytes
    pub stride: i32,
    /// Pixel buffer size in bytes (`stride * height`)
    pub total_bytes: i32,
}

impl FrameInfo {
    /// Captures the shape metadata of a frame.
    pub fn from_frame(frame: &VideoFrame) -> Self {
        FrameInfo {
            width: frame.width(),
            height: frame.height(),
            channels: frame.channels(),
            stride: frame.stride() as i32,
            total_bytes: frame.total_bytes() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Scalar};

    #[test]
    fn test_frame_creation_empty() {
        let mat = Mat::default();
        let frame = VideoFrame::new(mat);

        assert_eq!(frame.width(), 0);
        assert_eq!(frame.height(), 0);
        assert!(frame.is_empty());
        assert_eq!(frame.total_bytes(), 0);
    }

    #[test]
    fn test_frame_with_data() {
        let mat = Mat::new_rows_cols_with_default(
            480,
            640,
            CV_8UC3,
            Scalar::new(100.0, 150.0, 200.0, 0.0),
        )
        .unwrap();
        let frame = VideoFrame::new(mat);

        assert_eq!(frame.width(), 640);
        assert_eq!(frame.height(), 480);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.stride(), 640 * 3);
        assert_eq!(frame.total_bytes(), 640 * 3 * 480);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_frame_bytes_length() {
        let mat =
            Mat::new_rows_cols_with_default(10, 20, CV_8UC3, Scalar::all(7.0)).unwrap();
        let frame = VideoFrame::new(mat);

        let bytes = frame.bytes().unwrap();
        assert_eq!(bytes.len(), frame.total_bytes());
        assert!(bytes.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_frame_clone_is_deep() {
        let mat =
            Mat::new_rows_cols_with_default(4, 4, CV_8UC3, Scalar::all(1.0)).unwrap();
        let frame = VideoFrame::new(mat);
        let copy = frame.clone();

        assert_eq!(copy.width(), frame.width());
        assert_eq!(copy.height(), frame.height());
        assert_ne!(
            frame.data().data_bytes().unwrap().as_ptr(),
            copy.data().data_bytes().unwrap().as_ptr(),
            "clone must not share pixel storage"
        );
    }

    #[test]
    fn test_frame_info_from_frame() {
        let mat =
            Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0)).unwrap();
        let frame = VideoFrame::new(mat);
        let info = FrameInfo::from_frame(&frame);

        assert_eq!(info.width, 640);
        assert_eq!(info.height, 480);
        assert_eq!(info.channels, 3);
        assert_eq!(info.stride, 640 * 3);
        assert_eq!(info.total_bytes, 640 * 3 * 480);
    }

    #[test]
    fn test_frame_timestamp() {
        let before = std::time::Instant::now();
        let frame = VideoFrame::new(Mat::default());
        let after = std::time::Instant::now();

        assert!(frame.timestamp() >= before && frame.timestamp() <= after);
    }
}
