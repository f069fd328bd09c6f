use crate::application::extractor::DEFAULT_MARKER;
use crate::domain::history::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PIPE_PATH: &str = "/tmp/temp_pipe";
const ENV_PREFIX: &str = "TEMP_MONITOR";

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    pub pipe_path: PathBuf,
    pub marker: String,
    pub history_capacity: usize,
    pub retry_interval_ms: u64,
    pub startup_delay_ms: u64,
}

impl MonitorConfig {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    fn validate(self) -> anyhow::Result<Self> {
        anyhow::ensure!(self.history_capacity >= 1, "history_capacity must be at least 1");
        anyhow::ensure!(!self.marker.is_empty(), "marker must not be empty");
        Ok(self)
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("pipe_path", DEFAULT_PIPE_PATH)?
        .set_default("marker", DEFAULT_MARKER)?
        .set_default("history_capacity", DEFAULT_CAPACITY as u64)?
        .set_default("retry_interval_ms", 2000)?
        .set_default("startup_delay_ms", 2000)?)
}

/// Defaults, then `config/monitor.*` if present, then `TEMP_MONITOR_*`
pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/monitor").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;

    settings.try_deserialize::<MonitorConfig>()?.validate()
}
