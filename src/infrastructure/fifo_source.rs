// Named pipe implementation of SensorSource
use crate::application::sensor_source::{LineReader, SensorSource, SourceError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::BufReader;

#[derive(Debug, Clone)]
pub struct FifoSource {
    path: PathBuf,
}

impl FifoSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SensorSource for FifoSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    /// Opening a FIFO for reading blocks until a writer opens the other end;
    /// `tokio::fs` parks that wait on the blocking pool.
    async fn open(&self) -> Result<LineReader, SourceError> {
        match tokio::fs::File::open(&self.path).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SourceError::NotFound(self.path.clone())),
            Err(e) => Err(SourceError::Open {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}
