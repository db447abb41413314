//! Camera capture module
//!
//! Provides camera device configuration, capture, and the background
//! capture loop that feeds the frame store.

pub mod config;
pub mod device;
pub(crate) mod worker;

pub use config::CameraConfig;
pub use device::Camera;
