// Connection manager - Lifecycle of the sensor source
use crate::application::extractor::Extractor;
use crate::application::sensor_source::{LineReader, SensorSource, SourceError};
use crate::application::shutdown::Shutdown;
use crate::domain::monitor::{ConnectionStatus, MonitorState};
use chrono::Local;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Longest accepted line, newline included. Longer lines are skipped.
pub const MAX_LINE_BYTES: usize = 4096;

/// How long an open may block before the screen says we are waiting for a writer
const OPEN_NOTICE_DELAY: Duration = Duration::from_millis(250);

type PendingOpen = Pin<Box<dyn Future<Output = Result<LineReader, SourceError>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Waiting out the retry interval before the next open attempt
    Disconnected,
    Connecting,
    Connected,
    ShuttingDown,
}

/// What a single `step` did, so the caller can decide whether to redraw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionEvent {
    /// The open is still blocked, typically on a FIFO without a writer
    Connecting,
    SourceUnavailable,
    Connected,
    LineRead { value: Option<f64> },
    Lost,
    RetryElapsed,
    ShutDown,
}

enum OpenOutcome {
    Opened(Result<LineReader, SourceError>),
    StillWaiting,
    ShutDown,
}

/// Bytes taken off the reader for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoundedRead {
    consumed: usize,
    oversized: bool,
}

/// Read through the next `\n` into `line`, keeping at most `max` bytes.
/// A longer line is consumed in full but leaves `line` empty.
async fn read_bounded_line<R>(reader: &mut R, line: &mut Vec<u8>, max: usize) -> io::Result<BoundedRead>
where
    R: AsyncBufRead + Unpin,
{
    let mut read = BoundedRead {
        consumed: 0,
        oversized: false,
    };

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(read);
        }

        let (chunk, complete) = match available.iter().position(|b| *b == b'\n') {
            Some(i) => (&available[..=i], true),
            None => (available, false),
        };
        let len = chunk.len();

        if !read.oversized {
            if line.len() + len <= max {
                line.extend_from_slice(chunk);
            } else {
                read.oversized = true;
                line.clear();
            }
        }

        reader.consume(len);
        read.consumed += len;
        if complete {
            return Ok(read);
        }
    }
}

pub struct ConnectionManager {
    source: Arc<dyn SensorSource>,
    extractor: Extractor,
    retry_interval: Duration,
    state: ConnectionState,
    pending_open: Option<PendingOpen>,
    reader: Option<LineReader>,
    line: Vec<u8>,
}

impl ConnectionManager {
    pub fn new(source: Arc<dyn SensorSource>, extractor: Extractor, retry_interval: Duration) -> Self {
        Self {
            source,
            extractor,
            retry_interval,
            state: ConnectionState::Connecting,
            pending_open: None,
            reader: None,
            line: Vec::with_capacity(MAX_LINE_BYTES),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Advance the state machine by one transition or one line.
    ///
    /// Nothing here is fatal: open failures, EOF and read errors all end up
    /// in `Disconnected` and are retried after `retry_interval`. Only a
    /// shutdown request leaves the cycle.
    pub async fn step(&mut self, monitor: &mut MonitorState, shutdown: &mut Shutdown) -> ConnectionEvent {
        if shutdown.is_requested() {
            return self.shut_down(monitor);
        }

        match self.state {
            ConnectionState::Connecting => self.connect(monitor, shutdown).await,
            ConnectionState::Connected => self.read_line(monitor, shutdown).await,
            ConnectionState::Disconnected => self.wait_retry(monitor, shutdown).await,
            ConnectionState::ShuttingDown => ConnectionEvent::ShutDown,
        }
    }

    /// The open future outlives a single step so that a long wait for a
    /// writer can be reported once and then resumed.
    async fn connect(&mut self, monitor: &mut MonitorState, shutdown: &mut Shutdown) -> ConnectionEvent {
        let first_attempt = self.pending_open.is_none();
        let pending = self.pending_open.get_or_insert_with(|| {
            let source = Arc::clone(&self.source);
            let open: PendingOpen = Box::pin(async move { source.open().await });
            open
        });

        let outcome = tokio::select! {
            opened = pending.as_mut() => OpenOutcome::Opened(opened),
            _ = tokio::time::sleep(OPEN_NOTICE_DELAY), if first_attempt => OpenOutcome::StillWaiting,
            _ = shutdown.requested() => OpenOutcome::ShutDown,
        };

        let opened = match outcome {
            OpenOutcome::ShutDown => return self.shut_down(monitor),
            OpenOutcome::StillWaiting => {
                tracing::debug!("Waiting for a writer on {}", self.source.describe());
                monitor.set_status(ConnectionStatus::Connecting);
                return ConnectionEvent::Connecting;
            }
            OpenOutcome::Opened(opened) => opened,
        };
        self.pending_open = None;

        match opened {
            Ok(reader) => {
                tracing::info!("Connected to {}", self.source.describe());
                self.reader = Some(reader);
                self.state = ConnectionState::Connected;
                monitor.set_status(ConnectionStatus::Connected);
                ConnectionEvent::Connected
            }
            Err(e) => {
                match &e {
                    SourceError::NotFound(_) => tracing::debug!("{}", e),
                    SourceError::Open { .. } => tracing::warn!("{}", e),
                }
                self.state = ConnectionState::Disconnected;
                monitor.set_status(ConnectionStatus::NotFound);
                ConnectionEvent::SourceUnavailable
            }
        }
    }

    async fn read_line(&mut self, monitor: &mut MonitorState, shutdown: &mut Shutdown) -> ConnectionEvent {
        let Some(reader) = self.reader.as_mut() else {
            self.state = ConnectionState::Connecting;
            return ConnectionEvent::Lost;
        };

        self.line.clear();
        let read = tokio::select! {
            read = read_bounded_line(reader, &mut self.line, MAX_LINE_BYTES) => Some(read),
            _ = shutdown.requested() => None,
        };

        match read {
            None => self.shut_down(monitor),
            Some(Ok(BoundedRead { consumed: 0, .. })) => {
                tracing::info!("Source {} closed", self.source.describe());
                self.disconnect(monitor)
            }
            Some(Ok(BoundedRead { oversized: true, consumed })) => {
                tracing::debug!("Skipping {} byte line", consumed);
                ConnectionEvent::LineRead { value: None }
            }
            Some(Ok(_)) => {
                let text = String::from_utf8_lossy(&self.line);
                let value = self.extractor.extract(text.trim_end_matches(['\n', '\r']));
                match value {
                    Some(v) => monitor.record(v, Local::now()),
                    None => tracing::trace!("Ignoring line without a temperature"),
                }
                ConnectionEvent::LineRead { value }
            }
            Some(Err(e)) => {
                tracing::warn!("Read from {} failed: {}", self.source.describe(), e);
                self.disconnect(monitor)
            }
        }
    }

    async fn wait_retry(&mut self, monitor: &mut MonitorState, shutdown: &mut Shutdown) -> ConnectionEvent {
        let elapsed = tokio::select! {
            _ = tokio::time::sleep(self.retry_interval) => true,
            _ = shutdown.requested() => false,
        };

        if !elapsed {
            return self.shut_down(monitor);
        }
        self.state = ConnectionState::Connecting;
        ConnectionEvent::RetryElapsed
    }

    fn disconnect(&mut self, monitor: &mut MonitorState) -> ConnectionEvent {
        self.reader = None;
        self.state = ConnectionState::Disconnected;
        monitor.set_status(ConnectionStatus::Lost);
        ConnectionEvent::Lost
    }

    fn shut_down(&mut self, monitor: &mut MonitorState) -> ConnectionEvent {
        self.pending_open = None;
        if self.reader.take().is_some() {
            tracing::debug!("Released {} on shutdown", self.source.describe());
        }
        self.state = ConnectionState::ShuttingDown;
        monitor.set_status(ConnectionStatus::ShuttingDown);
        ConnectionEvent::ShutDown
    }
}
