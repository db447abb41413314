//! C ABI bridge over the capture and detection pipeline.
//!
//! Builds as a `cdylib` for host applications that load the library and
//! call its exported functions directly. The exports follow C
//! conventions throughout: fixed-layout result structs, caller-allocated
//! pixel buffers, and `bool` success codes instead of unwinding errors.
//!
//! The surface is handleless. One process-wide [`vision::VisionSession`]
//! sits behind the exports; `startCamera` spins up its capture thread
//! and every query answers from the most recent frame.

mod exports;
mod types;

pub use types::{DetectionMode, DetectionResult, FrameInfo, MultiDetectionResult};
