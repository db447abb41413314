//! Edge-map extraction.
//!
//! Produces a binary Canny edge map at the frame's native resolution.

use crate::error::Result;
use crate::frame::VideoFrame;
use opencv::core::{Mat, Size};
use opencv::imgproc::{COLOR_BGR2GRAY, canny_def, cvt_color_def, gaussian_blur_def};

/// Blur kernel applied before edge extraction
const BLUR_KERNEL: i32 = 5;
const BLUR_SIGMA: f64 = 1.4;
/// Canny hysteresis thresholds
const LOW_THRESHOLD: f64 = 50.0;
const HIGH_THRESHOLD: f64 = 150.0;

/// Binary edge map produced by [`edge_map`].
///
/// One byte per pixel at the source frame's resolution: 255 on edge
/// pixels, 0 elsewhere.
pub struct EdgeMap {
    width: i32,
    height: i32,
    data: Mat,
}

impl EdgeMap {
    /// Returns map width in pixels
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns map height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the number of bytes in the map (`width * height`)
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns true for a zero-sized map
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the raw map bytes, row-major
    pub fn bytes(&self) -> Result<&[u8]> {
        use opencv::prelude::*;
        Ok(self.data.data_bytes()?)
    }
}

/// Extracts the edge map of a frame.
///
/// Grayscale conversion, a 5x5 Gaussian blur, then Canny with 50/150
/// hysteresis thresholds.
pub fn edge_map(frame: &VideoFrame) -> Result<EdgeMap> {
    let mut gray = Mat::default();
    cvt_color_def(frame.data(), &mut gray, COLOR_BGR2GRAY)?;

    let mut blurred = Mat::default();
    gaussian_blur_def(
        &gray,
        &mut blurred,
        Size::new(BLUR_KERNEL, BLUR_KERNEL),
        BLUR_SIGMA,
    )?;

    let mut edges = Mat::default();
    canny_def(&blurred, &mut edges, LOW_THRESHOLD, HIGH_THRESHOLD)?;

    Ok(EdgeMap {
        width: frame.width(),
        height: frame.height(),
        data: edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Scalar};

    #[test]
    fn test_uniform_frame_has_no_edges() {
        let mat =
            Mat::new_rows_cols_with_default(60, 80, CV_8UC3, Scalar::all(128.0)).unwrap();
        let frame = VideoFrame::new(mat);

        let map = edge_map(&frame).unwrap();

        assert_eq!(map.width(), 80);
        assert_eq!(map.height(), 60);
        assert_eq!(map.len(), 80 * 60);
        assert!(map.bytes().unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_map_keeps_native_resolution() {
        let mat =
            Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0)).unwrap();
        let frame = VideoFrame::new(mat);

        let map = edge_map(&frame).unwrap();

        assert_eq!(map.width(), frame.width());
        assert_eq!(map.height(), frame.height());
        assert_eq!(map.bytes().unwrap().len(), map.len());
    }
}
