//! Detection queries over captured frames.
//!
//! Each submodule is a pure transform from a frame to detection output.
//! The session runs them against a snapshot of the latest frame, outside
//! the store lock.

pub mod circle;
pub mod color;
pub mod edge;
pub mod face;
pub mod result;

pub use circle::find_circles;
pub use color::find_red_region;
pub use edge::{EdgeMap, edge_map};
pub use face::FaceDetector;
pub use result::{Detection, MAX_DETECTIONS};
