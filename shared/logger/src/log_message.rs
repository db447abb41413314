//! Internal log message structure.

use crate::log_level::LogLevel;
use chrono::Local;

/// A single log entry, timestamped at creation.
#[derive(Debug, Clone)]
pub(crate) struct LogMessage {
    pub timestamp: String,
    pub level: LogLevel,
    pub component: Option<String>,
    pub message: String,
}

impl LogMessage {
    /// Creates a message stamped with the current local time.
    pub fn new(level: LogLevel, component: Option<String>, message: String) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            level,
            component,
            message,
        }
    }

    /// Renders the entry as a log line: `[timestamp] LEVEL [component: X]: message\n`
    pub fn format(&self) -> String {
        match &self.component {
            Some(component) => format!(
                "[{}] {} [component: {}]: {}\n",
                self.timestamp,
                self.level.as_str(),
                component,
                self.message
            ),
            None => format!(
                "[{}] {}: {}\n",
                self.timestamp,
                self.level.as_str(),
                self.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_carries_fields() {
        let msg = LogMessage::new(LogLevel::Warn, None, "low disk space".to_string());

        assert_eq!(msg.level, LogLevel::Warn);
        assert_eq!(msg.message, "low disk space");
        assert!(msg.component.is_none());
        assert!(!msg.timestamp.is_empty());
    }

    #[test]
    fn test_format_without_component() {
        let msg = LogMessage::new(LogLevel::Error, None, "capture failed".to_string());
        let line = msg.format();

        assert!(line.contains("ERROR"));
        assert!(line.contains("capture failed"));
        assert!(!line.contains("component"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_format_with_component() {
        let msg = LogMessage::new(
            LogLevel::Info,
            Some("camera".to_string()),
            "device opened".to_string(),
        );
        let line = msg.format();

        assert!(line.contains("[component: camera]"));
        assert!(line.contains("device opened"));
    }

    #[test]
    fn test_timestamp_shape() {
        let msg = LogMessage::new(LogLevel::Debug, None, "x".to_string());
        let ts = &msg.timestamp;

        // YYYY-MM-DD HH:MM:SS.mmm
        assert!(ts.len() >= 23);
        assert!(ts.contains('-'));
        assert!(ts.contains(':'));
        assert!(ts.contains('.'));
    }
}
