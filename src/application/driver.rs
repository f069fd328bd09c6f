// Driver - Top-level loop coordinating ingest and redraws
use crate::application::connection_manager::{ConnectionEvent, ConnectionManager};
use crate::application::frame_sink::FrameSink;
use crate::application::shutdown::Shutdown;
use crate::domain::monitor::MonitorState;
use crate::presentation::renderer::{farewell_frame, render, splash_frame};
use anyhow::{Context, Result};
use std::time::Duration;

/// Allows at most one redraw per wall-clock second
#[derive(Debug, Default)]
pub struct RenderGate {
    last_second: Option<i64>,
}

impl RenderGate {
    pub fn is_due(&self, second: i64) -> bool {
        self.last_second != Some(second)
    }

    pub fn mark(&mut self, second: i64) {
        self.last_second = Some(second);
    }
}

/// Source of the current wall-clock second
pub type Clock = fn() -> i64;

fn wall_clock_second() -> i64 {
    chrono::Utc::now().timestamp()
}

pub struct Driver {
    manager: ConnectionManager,
    state: MonitorState,
    sink: Box<dyn FrameSink>,
    gate: RenderGate,
    clock: Clock,
    source_label: String,
    startup_delay: Duration,
}

impl Driver {
    pub fn new(
        manager: ConnectionManager,
        state: MonitorState,
        sink: Box<dyn FrameSink>,
        source_label: String,
        startup_delay: Duration,
    ) -> Self {
        Self {
            manager,
            state,
            sink,
            gate: RenderGate::default(),
            clock: wall_clock_second,
            source_label,
            startup_delay,
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Run until shutdown is requested, then draw the farewell frame and
    /// restore the terminal. Returns the final state.
    pub async fn run(mut self, mut shutdown: Shutdown) -> Result<MonitorState> {
        let result = self.drive(&mut shutdown).await;
        let restored = self.sink.restore().context("Failed to restore terminal");
        result?;
        restored?;
        Ok(self.state)
    }

    async fn drive(&mut self, shutdown: &mut Shutdown) -> Result<()> {
        self.sink
            .draw(&splash_frame(&self.source_label))
            .context("Failed to draw splash screen")?;
        tokio::select! {
            _ = tokio::time::sleep(self.startup_delay) => {}
            _ = shutdown.requested() => {}
        }

        loop {
            match self.manager.step(&mut self.state, shutdown).await {
                // Status refresh on every backoff event and before a blocking open
                ConnectionEvent::Connecting
                | ConnectionEvent::SourceUnavailable
                | ConnectionEvent::Lost => self.render()?,
                ConnectionEvent::LineRead { value } => {
                    tracing::trace!(?value, "Line read");
                    self.render_if_due()?
                }
                ConnectionEvent::Connected | ConnectionEvent::RetryElapsed => self.render_if_due()?,
                ConnectionEvent::ShutDown => break,
            }
        }

        tracing::info!("Shutting down");
        self.sink
            .draw(&farewell_frame())
            .context("Failed to draw farewell screen")?;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let frame = render(&self.state.snapshot(&self.source_label));
        self.sink.draw(&frame).context("Failed to draw frame")?;
        self.gate.mark((self.clock)());
        Ok(())
    }

    fn render_if_due(&mut self) -> Result<()> {
        if self.gate.is_due((self.clock)()) {
            self.render()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::connection_manager::tests::{Script, ScriptedSource, lines};
    use crate::application::extractor::Extractor;
    use crate::application::frame_sink::tests::RecordingSink;
    use crate::application::shutdown;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn frozen_clock() -> i64 {
        1_700_000_000
    }

    static TICKS: AtomicI64 = AtomicI64::new(0);

    /// Every call lands in a new second
    fn ticking_clock() -> i64 {
        TICKS.fetch_add(1, Ordering::SeqCst)
    }

    fn burst(count: usize) -> String {
        (0..count)
            .map(|i| format!("{{\"temp_c\": {}.5}}\n", 15 + i % 20))
            .collect()
    }

    /// Frames drawn while readings were streaming in
    fn reading_frames(texts: &[String]) -> usize {
        texts.iter().filter(|t| t.contains("Status: Connected ✓")).count()
    }

    fn driver(source: Arc<ScriptedSource>, sink: RecordingSink) -> Driver {
        let manager = ConnectionManager::new(source, Extractor::default(), Duration::from_secs(2));
        Driver::new(
            manager,
            MonitorState::new(15),
            Box::new(sink),
            "/tmp/temp_pipe".to_string(),
            Duration::from_secs(2),
        )
    }

    #[test]
    fn test_render_gate() {
        let mut gate = RenderGate::default();
        assert!(gate.is_due(100));

        gate.mark(100);
        assert!(!gate.is_due(100));
        assert!(gate.is_due(101));

        gate.mark(101);
        assert!(!gate.is_due(101));
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_pipe_keeps_running_until_shutdown() {
        let source = ScriptedSource::new(vec![Script::Missing]);
        let sink = RecordingSink::default();
        let (trigger, shutdown) = shutdown::channel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(9)).await;
            trigger.trigger();
        });

        let state = driver(source.clone(), sink.clone()).run(shutdown).await.unwrap();

        let texts = sink.texts();
        assert!(texts[0].contains("Temperature Monitor starting..."));
        let not_found = texts
            .iter()
            .filter(|t| t.contains("Status: Pipe not found - waiting..."))
            .count();
        assert!(not_found >= 3);
        assert_eq!(texts.last().unwrap(), "Temperature Monitor shutting down.");
        assert!(*sink.restored.lock().unwrap());

        assert!(source.opens.load(Ordering::SeqCst) >= 3);
        assert!(state.history().is_empty());
        assert_eq!(state.latest(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reading_then_disconnect_is_rendered() {
        let source = ScriptedSource::new(vec![Script::Open(lines("{\"temp_c\": 21.0}\n"))]);
        let sink = RecordingSink::default();
        let (trigger, shutdown) = shutdown::channel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            trigger.trigger();
        });

        let state = driver(source, sink.clone()).run(shutdown).await.unwrap();

        let texts = sink.texts();
        let lost = texts
            .iter()
            .find(|t| t.contains("Status: Connection lost - reconnecting..."))
            .unwrap();
        assert!(lost.contains("STATISTICS (Last 1 readings):"));
        assert!(lost.contains("  21.0°C"));

        let values: Vec<f64> = state.history().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![21.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_during_splash() {
        let source = ScriptedSource::new(vec![]);
        let sink = RecordingSink::default();
        let (trigger, shutdown) = shutdown::channel();
        trigger.trigger();

        driver(source.clone(), sink.clone()).run(shutdown).await.unwrap();

        assert_eq!(sink.texts().len(), 2);
        assert_eq!(source.opens.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_within_one_second_draws_once() {
        let source = ScriptedSource::new(vec![Script::Open(lines(&burst(50)))]);
        let sink = RecordingSink::default();
        let (trigger, shutdown) = shutdown::channel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            trigger.trigger();
        });

        let state = driver(source, sink.clone())
            .with_clock(frozen_clock)
            .run(shutdown)
            .await
            .unwrap();

        let texts = sink.texts();
        let connected = texts
            .iter()
            .position(|t| t.contains("Status: Connected - reading data..."))
            .unwrap();
        let lost = texts
            .iter()
            .position(|t| t.contains("Status: Connection lost - reconnecting..."))
            .unwrap();
        assert!(connected < lost);
        assert!(lost - connected - 1 <= 2);
        assert_eq!(reading_frames(&texts), 0);
        assert!(texts[lost].contains("STATISTICS (Last 15 readings):"));
        assert_eq!(state.history().len(), 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_line_in_new_second_is_drawn() {
        let source = ScriptedSource::new(vec![Script::Open(lines(&burst(5)))]);
        let sink = RecordingSink::default();
        let (trigger, shutdown) = shutdown::channel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            trigger.trigger();
        });

        driver(source, sink.clone())
            .with_clock(ticking_clock)
            .run(shutdown)
            .await
            .unwrap();

        assert_eq!(reading_frames(&sink.texts()), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_for_writer_is_drawn() {
        let source = ScriptedSource::new(vec![Script::Delayed(
            Duration::from_secs(3),
            lines("{\"temp_c\": 22.0}\n"),
        )]);
        let sink = RecordingSink::default();
        let (trigger, shutdown) = shutdown::channel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(6)).await;
            trigger.trigger();
        });

        driver(source, sink.clone())
            .with_clock(frozen_clock)
            .run(shutdown)
            .await
            .unwrap();

        let texts = sink.texts();
        let waiting = texts
            .iter()
            .position(|t| t.contains("Status: Opening pipe - waiting for writer..."))
            .unwrap();
        let lost = texts
            .iter()
            .position(|t| t.contains("Status: Connection lost - reconnecting..."))
            .unwrap();
        assert!(waiting < lost);
        assert!(texts[lost].contains("  22.0°C"));
    }
}
