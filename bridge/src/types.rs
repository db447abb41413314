//! Binary-stable structures shared with host applications.
//!
//! Every type here is `#[repr(C)]` and mirrored by a struct declaration
//! on the host side, so field order and types must not change. Sizes are
//! pinned by the layout tests below.

use vision::Detection;

/// Number of slots in a [`MultiDetectionResult`].
///
/// Detection queries inside the library are unbounded; results beyond
/// this capacity are dropped at the boundary.
pub const MAX_RESULTS: usize = vision::MAX_DETECTIONS;

/// Outcome of a single-object detection query.
///
/// `x`/`y` is the top-left corner of the bounding box in pixel
/// coordinates. When `detected` is false the box fields are zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionResult {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub detected: bool,
}

impl DetectionResult {
    /// An all-zero result whose `detected` flag is clear.
    pub const MISS: DetectionResult = DetectionResult {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
        detected: false,
    };

    pub(crate) fn hit(detection: Detection) -> Self {
        DetectionResult {
            x: detection.x,
            y: detection.y,
            width: detection.width,
            height: detection.height,
            detected: true,
        }
    }
}

/// Fixed-capacity batch of detections.
///
/// Only the first `count` entries are meaningful; the rest are
/// [`DetectionResult::MISS`].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MultiDetectionResult {
    pub items: [DetectionResult; MAX_RESULTS],
    pub count: i32,
}

impl MultiDetectionResult {
    /// A batch with zero detections.
    pub fn empty() -> Self {
        MultiDetectionResult {
            items: [DetectionResult::MISS; MAX_RESULTS],
            count: 0,
        }
    }

    /// Copies detections into the fixed slots, dropping any past capacity.
    pub(crate) fn from_detections(detections: &[Detection]) -> Self {
        let mut out = Self::empty();
        for (slot, detection) in out.items.iter_mut().zip(detections) {
            *slot = DetectionResult::hit(*detection);
        }
        out.count = detections.len().min(MAX_RESULTS) as i32;
        out
    }
}

/// Shape metadata of the current frame.
///
/// `stride` is the length of one row in bytes, including any padding;
/// `total_bytes` is `stride * height`, the buffer size `getFrameBytes`
/// needs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub width: i32,
    pub height: i32,
    pub channels: i32,
    pub stride: i32,
    pub total_bytes: i32,
}

impl From<vision::FrameInfo> for FrameInfo {
    fn from(info: vision::FrameInfo) -> Self {
        FrameInfo {
            width: info.width,
            height: info.height,
            channels: info.channels,
            stride: info.stride,
            total_bytes: info.total_bytes,
        }
    }
}

/// Stable numbering of the detection queries.
///
/// No export takes this directly; it is published so hosts that
/// multiplex the queries behind one code path share the numbering with
/// this library.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    Color = 0,
    Face = 1,
    Edge = 2,
    Circle = 3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn test_detection_result_layout() {
        assert_eq!(size_of::<DetectionResult>(), 20);
        assert_eq!(align_of::<DetectionResult>(), 4);
        assert_eq!(offset_of!(DetectionResult, x), 0);
        assert_eq!(offset_of!(DetectionResult, y), 4);
        assert_eq!(offset_of!(DetectionResult, width), 8);
        assert_eq!(offset_of!(DetectionResult, height), 12);
        assert_eq!(offset_of!(DetectionResult, detected), 16);
    }

    #[test]
    fn test_multi_detection_result_layout() {
        assert_eq!(size_of::<MultiDetectionResult>(), 32 * 20 + 4);
        assert_eq!(align_of::<MultiDetectionResult>(), 4);
        assert_eq!(offset_of!(MultiDetectionResult, items), 0);
        assert_eq!(offset_of!(MultiDetectionResult, count), 640);
    }

    #[test]
    fn test_frame_info_layout() {
        assert_eq!(size_of::<FrameInfo>(), 20);
        assert_eq!(offset_of!(FrameInfo, width), 0);
        assert_eq!(offset_of!(FrameInfo, height), 4);
        assert_eq!(offset_of!(FrameInfo, channels), 8);
        assert_eq!(offset_of!(FrameInfo, stride), 12);
        assert_eq!(offset_of!(FrameInfo, total_bytes), 16);
    }

    #[test]
    fn test_detection_mode_numbering() {
        assert_eq!(DetectionMode::Color as i32, 0);
        assert_eq!(DetectionMode::Face as i32, 1);
        assert_eq!(DetectionMode::Edge as i32, 2);
        assert_eq!(DetectionMode::Circle as i32, 3);
    }

    #[test]
    fn test_from_detections_marks_hits() {
        let detections = [Detection {
            x: 5,
            y: 6,
            width: 7,
            height: 8,
        }];
        let result = MultiDetectionResult::from_detections(&detections);

        assert_eq!(result.count, 1);
        assert!(result.items[0].detected);
        assert_eq!(result.items[0].x, 5);
        assert_eq!(result.items[0].height, 8);
        assert!(!result.items[1].detected);
    }

    #[test]
    fn test_from_detections_truncates_at_capacity() {
        let detections: Vec<Detection> = (0..40)
            .map(|i| Detection {
                x: i,
                y: i,
                width: 10,
                height: 10,
            })
            .collect();
        let result = MultiDetectionResult::from_detections(&detections);

        assert_eq!(result.count, MAX_RESULTS as i32);
        assert_eq!(result.items[MAX_RESULTS - 1].x, 31);
    }

    #[test]
    fn test_frame_info_conversion_keeps_fields() {
        let info = FrameInfo::from(vision::FrameInfo {
            width: 6,
            height: 4,
            channels: 3,
            stride: 18,
            total_bytes: 72,
        });

        assert_eq!(info.width, 6);
        assert_eq!(info.height, 4);
        assert_eq!(info.channels, 3);
        assert_eq!(info.stride, 18);
        assert_eq!(info.total_bytes, 72);
    }
}
