//! Event sink trait and errors
//!
//! A sink receives every completed event exactly once, from the single
//! persisting step of the crawl loop.

use crate::model::Event;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting events. Always fatal to the crawl.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Append-only destination for crawled events
pub trait EventSink {
    /// Appends one event
    fn write_event(&mut self, event: &Event) -> PersistenceResult<()>;

    /// Pushes buffered events to the underlying storage
    fn flush(&mut self) -> PersistenceResult<()>;
}

/// In-memory sink, mostly useful for tests and embedding
impl EventSink for Vec<Event> {
    fn write_event(&mut self, event: &Event) -> PersistenceResult<()> {
        self.push(event.clone());
        Ok(())
    }

    fn flush(&mut self) -> PersistenceResult<()> {
        Ok(())
    }
}
