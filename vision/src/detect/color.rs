//! Color-region detection.
//!
//! Finds the dominant reddish region in a frame by HSV thresholding and
//! contour extraction.

use crate::detect::result::Detection;
use crate::error::Result;
use crate::frame::VideoFrame;
use opencv::core::{self, Mat, Point, Scalar, Vector};
use opencv::imgproc::{
    self, CHAIN_APPROX_SIMPLE, COLOR_BGR2HSV, RETR_EXTERNAL, cvt_color_def, find_contours_def,
};

/// Finds the bounding box of the largest reddish region in the frame.
///
/// The frame is converted to HSV and thresholded against a low-hue red
/// band (H 0-10, S >= 120, V >= 70). Among the external contours of the
/// resulting mask, the one with the largest bounding box wins, so the
/// answer is deterministic when several regions match.
///
/// Returns `Ok(None)` when nothing in the frame matches the band; that is
/// a successful empty result, not an error.
pub fn find_red_region(frame: &VideoFrame) -> Result<Option<Detection>> {
    let mut hsv = Mat::default();
    cvt_color_def(frame.data(), &mut hsv, COLOR_BGR2HSV)?;

    let lower = Scalar::new(0.0, 120.0, 70.0, 0.0);
    let upper = Scalar::new(10.0, 255.0, 255.0, 0.0);
    let mut mask = Mat::default();
    core::in_range(&hsv, &lower, &upper, &mut mask)?;

    let mut contours: Vector<Vector<Point>> = Vector::new();
    find_contours_def(&mask, &mut contours, RETR_EXTERNAL, CHAIN_APPROX_SIMPLE)?;

    let mut best: Option<Detection> = None;
    for contour in contours.iter() {
        let candidate = Detection::from(imgproc::bounding_rect(&contour)?);
        if best.is_none_or(|b| candidate.area() > b.area()) {
            best = Some(candidate);
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Rect};
    use opencv::imgproc::{FILLED, LINE_8};

    fn black_frame(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    fn draw_red_rect(mat: &mut Mat, rect: Rect) {
        imgproc::rectangle(
            mat,
            rect,
            Scalar::new(0.0, 0.0, 255.0, 0.0),
            FILLED,
            LINE_8,
            0,
        )
        .unwrap();
    }

    #[test]
    fn test_black_frame_has_no_region() {
        let frame = VideoFrame::new(black_frame(100, 100));
        let result = find_red_region(&frame).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_red_block_is_found_with_correct_box() {
        let mut mat = black_frame(200, 150);
        draw_red_rect(&mut mat, Rect::new(20, 30, 40, 25));
        let frame = VideoFrame::new(mat);

        let detection = find_red_region(&frame).unwrap().expect("region expected");

        assert_eq!(detection.x, 20);
        assert_eq!(detection.y, 30);
        assert_eq!(detection.width, 40);
        assert_eq!(detection.height, 25);
    }

    #[test]
    fn test_largest_of_two_regions_wins() {
        let mut mat = black_frame(300, 200);
        draw_red_rect(&mut mat, Rect::new(10, 10, 8, 8));
        draw_red_rect(&mut mat, Rect::new(100, 50, 80, 60));
        let frame = VideoFrame::new(mat);

        let detection = find_red_region(&frame).unwrap().expect("region expected");

        assert_eq!(detection.x, 100);
        assert_eq!(detection.y, 50);
        assert_eq!(detection.width, 80);
        assert_eq!(detection.height, 60);
    }

    #[test]
    fn test_blue_block_is_not_a_red_region() {
        let mut mat = black_frame(100, 100);
        imgproc::rectangle(
            &mut mat,
            Rect::new(20, 20, 40, 40),
            Scalar::new(255.0, 0.0, 0.0, 0.0),
            FILLED,
            LINE_8,
            0,
        )
        .unwrap();
        let frame = VideoFrame::new(mat);

        assert!(find_red_region(&frame).unwrap().is_none());
    }
}
