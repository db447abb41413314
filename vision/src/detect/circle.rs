//! Circle detection via the Hough transform.

use crate::detect::result::Detection;
use crate::error::Result;
use crate::frame::VideoFrame;
use opencv::core::{Mat, Size, Vec3f, Vector};
use opencv::imgproc::{
    COLOR_BGR2GRAY, HOUGH_GRADIENT, cvt_color_def, gaussian_blur_def, hough_circles,
};

/// Blur kernel applied before the transform
const BLUR_KERNEL: i32 = 9;
const BLUR_SIGMA: f64 = 2.0;
/// Inverse accumulator resolution ratio (dp)
const ACCUMULATOR_RATIO: f64 = 1.0;
/// Upper threshold of the internal Canny pass
const EDGE_THRESHOLD: f64 = 100.0;
/// Accumulator votes required to accept a circle
const VOTE_THRESHOLD: f64 = 40.0;
/// Accepted radius range, in pixels
const MIN_RADIUS: i32 = 20;
const MAX_RADIUS: i32 = 200;

/// Detects circular shapes in the frame.
///
/// Each circle is reported as the bounding box of its enclosing square;
/// the circular geometry itself is not preserved. Circles closer together
/// than an eighth of the frame height merge into one detection. An empty
/// vector is a successful result.
pub fn find_circles(frame: &VideoFrame) -> Result<Vec<Detection>> {
    let mut gray = Mat::default();
    cvt_color_def(frame.data(), &mut gray, COLOR_BGR2GRAY)?;

    let mut blurred = Mat::default();
    gaussian_blur_def(
        &gray,
        &mut blurred,
        Size::new(BLUR_KERNEL, BLUR_KERNEL),
        BLUR_SIGMA,
    )?;

    let min_dist = f64::from(frame.height()) / 8.0;
    let mut circles: Vector<Vec3f> = Vector::new();
    hough_circles(
        &blurred,
        &mut circles,
        HOUGH_GRADIENT,
        ACCUMULATOR_RATIO,
        min_dist,
        EDGE_THRESHOLD,
        VOTE_THRESHOLD,
        MIN_RADIUS,
        MAX_RADIUS,
    )?;

    Ok(circles.iter().map(enclosing_square).collect())
}

/// Converts a `(cx, cy, radius)` circle into its enclosing square box.
fn enclosing_square(circle: Vec3f) -> Detection {
    let cx = circle[0].round() as i32;
    let cy = circle[1].round() as i32;
    let radius = circle[2].round() as i32;

    Detection {
        x: cx - radius,
        y: cy - radius,
        width: radius * 2,
        height: radius * 2,
    }
}
