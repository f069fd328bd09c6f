// Monitor state domain model
use super::history::{HistoryRing, Statistics};
use super::observation::Observation;
use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionStatus {
    Starting,
    Connecting,
    NotFound,
    Connected,
    Receiving(f64),
    Lost,
    ShuttingDown,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Starting => write!(f, "Starting..."),
            ConnectionStatus::Connecting => write!(f, "Opening pipe - waiting for writer..."),
            ConnectionStatus::NotFound => write!(f, "Pipe not found - waiting..."),
            ConnectionStatus::Connected => write!(f, "Connected - reading data..."),
            ConnectionStatus::Receiving(value) => write!(f, "Connected ✓ ({:.1}°C)", value),
            ConnectionStatus::Lost => write!(f, "Connection lost - reconnecting..."),
            ConnectionStatus::ShuttingDown => write!(f, "Shutting down..."),
        }
    }
}

/// Everything one frame needs, copied out of the live state
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub latest: Option<f64>,
    pub status: String,
    pub history: Vec<Observation>,
    pub statistics: Option<Statistics>,
    pub source_label: String,
}

/// Single owner of the ingest state: latest reading, status and history
#[derive(Debug, Clone)]
pub struct MonitorState {
    latest: Option<f64>,
    status: ConnectionStatus,
    history: HistoryRing,
}

impl MonitorState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            latest: None,
            status: ConnectionStatus::Starting,
            history: HistoryRing::new(history_capacity),
        }
    }

    pub fn record(&mut self, value: f64, observed_at: DateTime<Local>) {
        self.history.push(value, observed_at);
        self.latest = Some(value);
        self.status = ConnectionStatus::Receiving(value);
    }

    pub fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
    }

    #[cfg(test)]
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<f64> {
        self.latest
    }

    #[cfg(test)]
    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn snapshot(&self, source_label: &str) -> RenderSnapshot {
        RenderSnapshot {
            latest: self.latest,
            status: self.status.to_string(),
            history: self.history.snapshot(),
            statistics: self.history.statistics(),
            source_label: source_label.to_string(),
        }
    }
}
