//! Newline-delimited JSON event file
//!
//! One JSON object per line. An existing file is appended to, a missing one
//! is created.

use crate::model::Event;
use crate::output::traits::{EventSink, PersistenceError, PersistenceResult};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends events to a `.json` lines file
pub struct JsonLinesSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl JsonLinesSink {
    /// Opens `path` for appending, creating it if needed
    ///
    /// # Arguments
    ///
    /// * `path` - Events file; its parent directory must already exist
    ///
    /// # Returns
    ///
    /// * `Ok(JsonLinesSink)` - Sink positioned at the end of the file
    /// * `Err(PersistenceError::Open)` - The file could not be created or opened
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gig_crawler::output::JsonLinesSink;
    /// use std::path::Path;
    ///
    /// let sink = JsonLinesSink::open(Path::new("./events.json")).unwrap();
    /// assert_eq!(sink.written(), 0);
    /// ```
    pub fn open(path: &Path) -> PersistenceResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| PersistenceError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("Appending events to {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of events written through this sink
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl EventSink for JsonLinesSink {
    fn write_event(&mut self, event: &Event) -> PersistenceResult<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> PersistenceResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
