// Main entry point - Dependency injection and monitor loop
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::application::connection_manager::ConnectionManager;
use crate::application::driver::Driver;
use crate::application::extractor::Extractor;
use crate::application::sensor_source::SensorSource;
use crate::application::shutdown;
use crate::domain::monitor::MonitorState;
use crate::infrastructure::config::{MonitorConfig, load_monitor_config};
use crate::infrastructure::fifo_source::FifoSource;
use crate::infrastructure::signals::spawn_signal_listener;
use crate::infrastructure::terminal::TerminalSink;

/// How long exit may wait on a pipe open still parked in the blocking pool
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout belongs to the dashboard
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_monitor_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(config));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    result
}

async fn run(config: MonitorConfig) -> anyhow::Result<()> {
    // Create source (infrastructure layer)
    let source: Arc<dyn SensorSource> = Arc::new(FifoSource::new(config.pipe_path.clone()));
    let source_label = source.describe();

    // Create connection manager and driver (application layer)
    let manager = ConnectionManager::new(
        source,
        Extractor::new(config.marker.clone()),
        config.retry_interval(),
    );
    let driver = Driver::new(
        manager,
        MonitorState::new(config.history_capacity),
        Box::new(TerminalSink::stdout()),
        source_label,
        config.startup_delay(),
    );

    let (trigger, shutdown) = shutdown::channel();
    spawn_signal_listener(trigger);

    tracing::info!("Monitoring {}", config.pipe_path.display());
    driver.run(shutdown).await?;

    Ok(())
}
