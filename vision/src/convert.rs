//! BGR to RGB conversion
//!
//! High-performance conversion from OpenCV's BGR format to tightly packed
//! RGB suitable for handing to a host application.

use crate::error::Result;
use crate::frame::VideoFrame;

const PIXEL_SIZE: usize = 3;
const CHUNK_SIZE: usize = 12; // 4 pixels

/// Converts a BGR frame to RGB pixel data
///
/// The output is tightly packed at `width * height * 3` bytes; any row
/// padding in the source stride is dropped.
///
/// # Arguments
/// * `frame` - VideoFrame with BGR data (from OpenCV)
///
/// # Returns
/// * `Ok((width, height, rgb_pixels))` - Frame dimensions and RGB pixel data
/// * `Err` - If frame data cannot be accessed
pub fn frame_to_rgb(frame: &VideoFrame) -> Result<(usize, usize, Vec<u8>)> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let stride = frame.stride();
    let bgr = frame.bytes()?;

    let row_len = width * PIXEL_SIZE;
    let mut rgb = vec![0u8; row_len * height];

    for row in 0..height {
        let src = &bgr[row * stride..row * stride + row_len];
        let dst = &mut rgb[row * row_len..(row + 1) * row_len];
        swap_row(src, dst);
    }

    Ok((width, height, rgb))
}

/// Reorders one row of BGR bytes into RGB.
///
/// Processes 4 pixels (12 bytes) per iteration, then the remainder.
fn swap_row(bgr: &[u8], rgb: &mut [u8]) {
    let full_chunks = bgr.len() / CHUNK_SIZE;

    for i in 0..full_chunks {
        let base = i * CHUNK_SIZE;
        // Pixel 1
        rgb[base] = bgr[base + 2];
        rgb[base + 1] = bgr[base + 1];
        rgb[base + 2] = bgr[base];
        // Pixel 2
        rgb[base + 3] = bgr[base + 5];
        rgb[base + 4] = bgr[base + 4];
        rgb[base + 5] = bgr[base + 3];
        // Pixel 3
        rgb[base + 6] = bgr[base + 8];
        rgb[base + 7] = bgr[base + 7];
        rgb[base + 8] = bgr[base + 6];
        // Pixel 4
        rgb[base + 9] = bgr[base + 11];
        rgb[base + 10] = bgr[base + 10];
        rgb[base + 11] = bgr[base + 9];
    }

    let remainder_base = full_chunks * CHUNK_SIZE;
    let remainder_pixels = (bgr.len() - remainder_base) / PIXEL_SIZE;
    for i in 0..remainder_pixels {
        let base = remainder_base + i * PIXEL_SIZE;
        rgb[base] = bgr[base + 2];
        rgb[base + 1] = bgr[base + 1];
        rgb[base + 2] = bgr[base];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Mat, Scalar};

    fn solid_frame(width: i32, height: i32, b: f64, g: f64, r: f64) -> VideoFrame {
        let mat =
            Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::new(b, g, r, 0.0))
                .unwrap();
        VideoFrame::new(mat)
    }

    #[test]
    fn test_single_pixel() {
        let frame = solid_frame(1, 1, 100.0, 150.0, 200.0);

        let (width, height, rgb) = frame_to_rgb(&frame).unwrap();

        assert_eq!(width, 1);
        assert_eq!(height, 1);
        assert_eq!(rgb, vec![200, 150, 100]);
    }

    #[test]
    fn test_output_is_tightly_packed() {
        let frame = solid_frame(2, 2, 50.0, 100.0, 150.0);

        let (width, height, rgb) = frame_to_rgb(&frame).unwrap();

        assert_eq!(width, 2);
        assert_eq!(height, 2);
        assert_eq!(rgb.len(), 2 * 2 * 3);
    }

    #[test]
    fn test_black_and_white_frames() {
        let (_, _, black) = frame_to_rgb(&solid_frame(10, 10, 0.0, 0.0, 0.0)).unwrap();
        assert!(black.iter().all(|&p| p == 0));

        let (_, _, white) = frame_to_rgb(&solid_frame(10, 10, 255.0, 255.0, 255.0)).unwrap();
        assert!(white.iter().all(|&p| p == 255));
    }

    #[test]
    fn test_color_accuracy() {
        let cases = vec![
            (0.0, 0.0, 255.0, [255, 0, 0]),     // pure red
            (0.0, 255.0, 0.0, [0, 255, 0]),     // pure green
            (255.0, 0.0, 0.0, [0, 0, 255]),     // pure blue
            (255.0, 255.0, 0.0, [0, 255, 255]), // cyan
            (255.0, 0.0, 255.0, [255, 0, 255]), // magenta
            (0.0, 255.0, 255.0, [255, 255, 0]), // yellow
        ];

        for (b, g, r, expected) in cases {
            let (_, _, rgb) = frame_to_rgb(&solid_frame(1, 1, b, g, r)).unwrap();
            assert_eq!(rgb, expected, "mismatch for BGR({},{},{})", b, g, r);
        }
    }

    #[test]
    fn test_exact_chunk_row() {
        // 4 pixels per row, exactly one chunk
        let frame = solid_frame(4, 1, 10.0, 20.0, 30.0);

        let (width, height, rgb) = frame_to_rgb(&frame).unwrap();

        assert_eq!(width, 4);
        assert_eq!(height, 1);
        for px in rgb.chunks_exact(3) {
            assert_eq!(px, [30, 20, 10]);
        }
    }

    #[test]
    fn test_remainder_pixels_after_chunk() {
        // 5 pixels per row: one chunk plus one remainder pixel
        let frame = solid_frame(5, 1, 40.0, 50.0, 60.0);

        let (_, _, rgb) = frame_to_rgb(&frame).unwrap();

        assert_eq!(rgb.len(), 15);
        assert_eq!(&rgb[12..], [60, 50, 40]);
    }

    #[test]
    fn test_various_dimensions() {
        for (width, height) in [(1, 1), (10, 10), (100, 50), (640, 480)] {
            let frame = solid_frame(width, height, 128.0, 128.0, 128.0);

            let (w, h, rgb) = frame_to_rgb(&frame).unwrap();

            assert_eq!(w, width as usize);
            assert_eq!(h, height as usize);
            assert_eq!(rgb.len(), (width * height * 3) as usize);
        }
    }
}
