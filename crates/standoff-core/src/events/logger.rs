//! History Logger
//!
//! Append-only JSONL log of every resolved action, one `ActionResult` per line.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use standoff_events::ActionResult;

/// Writes action results to a JSONL file
pub struct HistoryLogger {
    writer: Option<BufWriter<File>>,
    result_count: u64,
}

impl HistoryLogger {
    /// Create a new logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            result_count: 0,
        })
    }

    /// Create a logger that discards results
    pub fn null() -> Self {
        Self {
            writer: None,
            result_count: 0,
        }
    }

    /// Number of results logged so far
    pub fn result_count(&self) -> u64 {
        self.result_count
    }

    /// Log one result
    pub fn log(&mut self, result: &ActionResult) -> std::io::Result<()> {
        self.result_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(result)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Log multiple results
    pub fn log_batch(&mut self, results: &[ActionResult]) -> std::io::Result<()> {
        for result in results {
            self.log(result)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for HistoryLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("Warning: Failed to flush history logger: {}", e);
        }
    }
}
