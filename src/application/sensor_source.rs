// Source trait for sensor line streams
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::AsyncBufRead;

/// An open, buffered byte stream of newline-terminated sensor lines.
/// Dropping it releases the underlying handle.
pub type LineReader = Box<dyn AsyncBufRead + Send + Unpin>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source {0} not found")]
    NotFound(PathBuf),

    #[error("failed to open source {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait SensorSource: Send + Sync {
    /// Human-readable location shown in the dashboard footer
    fn describe(&self) -> String;

    /// Open the source for reading. May wait until a producer appears.
    async fn open(&self) -> Result<LineReader, SourceError>;
}
