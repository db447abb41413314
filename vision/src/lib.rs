//! Camera capture and image analysis pipeline.
//!
//! A background thread continuously reads frames from a camera device and
//! publishes each one into a single-slot [`store::FrameStore`], overwriting
//! whatever was there before. Synchronous queries answer from the most
//! recent frame: raw BGR/RGB pixel access, color-region search, face
//! detection through a pretrained cascade, edge maps and circle detection.
//!
//! [`session::VisionSession`] ties lifecycle and queries together and is
//! the type the C ABI layer drives.

pub mod camera;
pub mod convert;
pub mod detect;
pub mod error;
pub mod frame;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use camera::{Camera, CameraConfig};
pub use detect::{Detection, EdgeMap, FaceDetector, MAX_DETECTIONS};
pub use error::{Result, VisionError};
pub use frame::{FrameInfo, VideoFrame};
pub use session::VisionSession;
pub use store::FrameStore;
