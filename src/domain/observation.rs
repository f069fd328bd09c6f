// Observation domain model
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub observed_at: DateTime<Local>,
}

impl Observation {
    pub fn new(value: f64, observed_at: DateTime<Local>) -> Self {
        Self { value, observed_at }
    }

    /// Wall-clock time of day, e.g. "14:03:27"
    pub fn time_label(&self) -> String {
        self.observed_at.format("%H:%M:%S").to_string()
    }
}
