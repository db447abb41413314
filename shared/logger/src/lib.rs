//! Thread-safe asynchronous logging library.
//!
//! Messages are handed to a dedicated writer thread over a channel, so
//! callers never block on file I/O. Loggers are cheap to clone and can be
//! tagged with a component name for attribution in shared log files.

pub mod error;
mod log_level;
mod log_message;
mod log_writer;
mod logger;

pub use error::{LoggingError, Result};
pub use log_level::LogLevel;
pub use logger::Logger;
