//! Error types for capture and detection operations.
//!
//! This module defines all possible errors that can occur while running
//! the capture pipeline and its query surface.

use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, VisionError>;

/// Error type for capture and detection operations
#[derive(Debug)]
pub enum VisionError {
    /// Configuration error
    Config(String),
    /// I/O error
    Io(io::Error),
    /// Camera error
    Camera(String),
    /// Cascade classifier error
    Cascade(String),
    /// No frame has been captured yet
    NoFrame,
    /// Caller-provided buffer is too small for the requested data
    BufferTooSmall { needed: usize, got: usize },
    /// OpenCV error
    OpenCv(opencv::Error),
}

impl fmt::Display for VisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionError::Config(msg) => write!(f, "Config error: {}", msg),
            VisionError::Io(err) => write!(f, "I/O error: {}", err),
            VisionError::Camera(msg) => write!(f, "Camera error: {}", msg),
            VisionError::Cascade(msg) => write!(f, "Cascade error: {}", msg),
            VisionError::NoFrame => write!(f, "No frame captured yet"),
            VisionError::BufferTooSmall { needed, got } => {
                write!(f, "Buffer too small: needed {} bytes, got {}", needed, got)
            }
            VisionError::OpenCv(err) => write!(f, "OpenCV error: {}", err),
        }
    }
}

impl std::error::Error for VisionError {}

impl From<io::Error> for VisionError {
    fn from(err: io::Error) -> Self {
        VisionError::Io(err)
    }
}

impl From<opencv::Error> for VisionError {
    fn from(err: opencv::Error) -> Self {
        VisionError::OpenCv(err)
    }
}
