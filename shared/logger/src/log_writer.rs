//! Asynchronous log file writer.

use crate::error::Result;
use crate::log_message::LogMessage;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::thread;

/// Owns the open log file and drains the message channel on its own thread.
pub(crate) struct LogWriter {
    file: File,
}

impl LogWriter {
    /// Opens or creates the log file in append mode.
    pub fn new(log_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        Ok(Self { file })
    }

    /// Writes one entry and flushes so crashes lose at most the current line.
    fn write_message(&mut self, message: &LogMessage) {
        if let Err(e) = self.file.write_all(message.format().as_bytes()) {
            eprintln!("Error writing log: {}", e);
            return;
        }
        if let Err(e) = self.file.flush() {
            eprintln!("Error flushing log: {}", e);
        }
    }

    /// Drains the channel until every sender is gone.
    pub fn run(mut self, receiver: Receiver<LogMessage>) {
        for message in receiver {
            self.write_message(&message);
        }
    }
}

/// Spawns the dedicated writer thread for a log file.
pub(crate) fn spawn_writer_thread(
    log_path: std::path::PathBuf,
    receiver: Receiver<LogMessage>,
) -> Result<()> {
    let writer = LogWriter::new(&log_path)?;
    thread::Builder::new()
        .name("log-writer".to_string())
        .spawn(move || writer.run(receiver))?;
    Ok(())
}
