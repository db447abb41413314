//! Thread-safe asynchronous logger implementation.
//!
//! This module provides the main [`Logger`] interface for logging messages
//! to a file without blocking the caller.

use crate::error::Result;
use crate::log_level::LogLevel;
use crate::log_message::LogMessage;
use crate::log_writer::spawn_writer_thread;
use std::path::PathBuf;
use std::sync::mpsc::{Sender, channel};

/// Thread-safe, non-blocking logger.
///
/// Cloneable instances share the same channel to a dedicated writer thread.
///
/// # Examples
///
/// ```
/// use logging::{Logger, LogLevel};
///
/// let logger = Logger::new("vision.log".into(), LogLevel::Info).unwrap();
/// logger.info("Capture started");
/// logger.error("Device lost");
/// ```
#[derive(Clone)]
pub struct Logger {
    sender: Sender<LogMessage>,
    level: LogLevel,
    component: Option<String>,
    log_path: PathBuf,
    console_output: bool,
}

impl Logger {
    /// Creates a new logger with a dedicated writer thread.
    ///
    /// # Arguments
    ///
    /// * `log_path` - Path to log file (created if it doesn't exist)
    /// * `level` - Minimum log level to record
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created or opened.
    pub fn new(log_path: PathBuf, level: LogLevel) -> Result<Self> {
        let (sender, receiver) = channel();
        spawn_writer_thread(log_path.clone(), receiver)?;
        Ok(Logger {
            sender,
            level,
            component: None,
            log_path,
            console_output: false,
        })
    }

    /// Creates a new logger tagged with a component name.
    ///
    /// # Arguments
    ///
    /// * `log_path` - Path to log file (created if it doesn't exist)
    /// * `level` - Minimum log level to record
    /// * `component` - Component name written with every entry (e.g. "camera")
    /// * `console_output` - Echo entries to stdout as well
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created or opened.
    pub fn with_component(
        log_path: PathBuf,
        level: LogLevel,
        component: String,
        console_output: bool,
    ) -> Result<Self> {
        let (sender, receiver) = channel();
        spawn_writer_thread(log_path.clone(), receiver)?;
        Ok(Logger {
            sender,
            level,
            component: Some(component),
            log_path,
            console_output,
        })
    }

    /// Creates a logger with a different component sharing this one's configuration.
    pub fn for_component(&self, component: &str) -> Result<Self> {
        Self::with_component(
            self.log_path.clone(),
            self.level,
            component.to_string(),
            self.console_output,
        )
    }

    /// Creates a logger that silently discards every message.
    ///
    /// Useful where logging must never cause a failure, such as inside a
    /// shared library loaded by a host process that gives it nowhere to
    /// write. Cannot fail and never touches the filesystem.
    pub fn sink() -> Self {
        let (sender, _) = channel();
        Logger {
            sender,
            level: LogLevel::Error,
            component: None,
            log_path: PathBuf::new(),
            console_output: false,
        }
    }

    /// Logs a debug message (only if level is Debug or lower).
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Logs an info message (only if level is Info or lower).
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Logs a warning message (only if level is Warn or lower).
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Logs an error message (always recorded).
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Filters by level and hands the message to the writer thread.
    fn log(&self, level: LogLevel, message: &str) {
        if level < self.level {
            return;
        }

        let msg = LogMessage::new(level, self.component.clone(), message.to_string());

        if self.console_output {
            print!("{}", msg.format());
        }

        // A closed channel means the writer is gone; nothing useful to do.
        let _ = self.sender.send(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    fn wait_for_write() {
        thread::sleep(Duration::from_millis(50));
    }

    #[test]
    fn test_logger_creates_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");

        let logger = Logger::new(log_path.clone(), LogLevel::Debug).unwrap();
        logger.info("Test message");
        wait_for_write();

        assert!(log_path.exists());
        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Test message"));
    }

    #[test]
    fn test_logger_respects_level() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");

        let logger = Logger::new(log_path.clone(), LogLevel::Warn).unwrap();
        logger.debug("Debug message");
        logger.info("Info message");
        logger.warn("Warn message");
        wait_for_write();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(!content.contains("Debug message"));
        assert!(!content.contains("Info message"));
        assert!(content.contains("Warn message"));
    }

    #[test]
    fn test_logger_tags_component() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");

        let logger =
            Logger::with_component(log_path.clone(), LogLevel::Info, "camera".to_string(), false)
                .unwrap();
        logger.info("Device opened");
        wait_for_write();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("[component: camera]"));
    }

    #[test]
    fn test_for_component_shares_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");

        let logger = Logger::new(log_path.clone(), LogLevel::Info).unwrap();
        let tagged = logger.for_component("store").unwrap();
        logger.info("untagged entry");
        tagged.info("tagged entry");
        wait_for_write();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("untagged entry"));
        assert!(content.contains("[component: store]: tagged entry"));
    }

    #[test]
    fn test_logger_clone_across_threads() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");

        let logger = Logger::new(log_path.clone(), LogLevel::Info).unwrap();
        let logger_clone = logger.clone();

        let handle = thread::spawn(move || {
            logger_clone.info("Message from thread");
        });
        handle.join().unwrap();

        logger.info("Message from main");
        wait_for_write();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Message from thread"));
        assert!(content.contains("Message from main"));
    }

    #[test]
    fn test_sink_discards_silently() {
        let logger = Logger::sink();
        logger.debug("dropped");
        logger.info("dropped");
        logger.warn("dropped");
        logger.error("dropped");

        let clone = logger.clone();
        clone.error("also dropped");
    }
}
