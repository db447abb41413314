//! Detection result types.

use opencv::core::Rect;

/// Largest number of detections reported through the binary surface.
///
/// Library queries return every detection; the ABI layer truncates to
/// this many entries.
pub const MAX_DETECTIONS: usize = 32;

/// Axis-aligned bounding box of a detected region, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Detection {
    /// Returns the box area in pixels.
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

impl From<Rect> for Detection {
    fn from(rect: Rect) -> Self {
        Detection {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}
