// Renderer - Snapshot to full-screen frame
use crate::domain::monitor::RenderSnapshot;
use crate::presentation::frame::{Frame, Line, Span};
use crate::presentation::theme::{self, temperature_color};

pub const GAUGE_MIN: f64 = 15.0;
pub const GAUGE_MAX: f64 = 35.0;
pub const GAUGE_WIDTH: usize = 40;
/// Cells between tick marks: 5 °C at 2 cells per degree
const GAUGE_TICK: usize = 10;

const RULE: &str = "===============================================";
const TABLE_RULE: &str = "─────────────────────────────";

/// Marker cell for `value`, clamped to the gauge
pub fn gauge_position(value: f64) -> usize {
    let scaled = (value - GAUGE_MIN) / (GAUGE_MAX - GAUGE_MIN) * GAUGE_WIDTH as f64;
    if scaled.is_nan() {
        return 0;
    }
    (scaled.floor().max(0.0) as usize).min(GAUGE_WIDTH - 1)
}

fn temperature(value: f64) -> Span {
    Span::colored(format!("{:.1}°C", value), temperature_color(value))
}

fn gauge(value: f64) -> Line {
    let marker = gauge_position(value);
    let mut spans = vec![Span::plain("15°C ")];
    let mut run = String::new();

    for cell in 0..GAUGE_WIDTH {
        if cell == marker {
            spans.push(Span::plain(std::mem::take(&mut run)));
            spans.push(Span::colored("|", temperature_color(value)));
        } else if cell % GAUGE_TICK == 0 {
            run.push(':');
        } else {
            run.push('-');
        }
    }
    run.push_str(" 35°C");
    spans.push(Span::plain(run));

    Line::new(spans)
}

pub fn render(snapshot: &RenderSnapshot) -> Frame {
    let mut frame = Frame::default();

    frame.push(Span::colored(RULE, theme::TITLE).bold());
    frame.push(Span::colored("       TEMPERATURE MONITOR", theme::TITLE).bold());
    frame.push(Span::colored(RULE, theme::TITLE).bold());
    frame.push(Line::blank());

    match snapshot.latest {
        Some(value) => {
            frame.push(Span::plain("CURRENT TEMPERATURE:").bold());
            frame.push(Span::colored(
                format!("          {:6.1}°C", value),
                temperature_color(value),
            ));
            frame.push(Line::blank());
            frame.push(Span::plain("Temperature Scale:"));
            frame.push(gauge(value));
            frame.push(Line::blank());
        }
        None => {
            frame.push(Span::colored("CURRENT TEMPERATURE:", theme::NO_DATA).bold());
            frame.push(Span::colored("        NO DATA", theme::NO_DATA).bold());
            frame.push(Line::blank());
        }
    }

    frame.push(Line::new(vec![
        Span::plain("Status: "),
        Span::colored(snapshot.status.clone(), theme::STATUS),
    ]));
    frame.push(Line::blank());

    if let Some(stats) = snapshot.statistics {
        frame.push(Span::plain(format!(
            "STATISTICS (Last {} readings):",
            stats.count
        )));
        frame.push(Line::new(vec![
            Span::plain("Min: "),
            temperature(stats.min),
            Span::plain("  Max: "),
            temperature(stats.max),
            Span::plain("  Avg: "),
            temperature(stats.avg),
        ]));
        frame.push(Line::blank());
    }

    frame.push(Span::plain("RECENT READINGS:"));
    frame.push(Span::plain(TABLE_RULE));
    frame.push(Span::plain("  Time    │ Temperature"));
    frame.push(Span::plain(TABLE_RULE));
    for observation in snapshot.history.iter().rev() {
        frame.push(Line::new(vec![
            Span::plain(format!("  {} │ ", observation.time_label())),
            Span::colored(
                format!("{:6.1}°C", observation.value),
                temperature_color(observation.value),
            ),
        ]));
    }
    if snapshot.history.is_empty() {
        frame.push(Span::plain("  No readings yet"));
    }
    frame.push(Span::plain(TABLE_RULE));
    frame.push(Line::blank());

    frame.push(Span::plain(format!("Reading from: {}", snapshot.source_label)));
    frame.push(Span::plain("Press Ctrl+C to exit"));

    frame
}

pub fn splash_frame(source_label: &str) -> Frame {
    let mut frame = Frame::default();
    frame.push(Span::plain("Temperature Monitor starting..."));
    frame.push(Span::plain(format!("Waiting for data from {}...", source_label)));
    frame
}

pub fn farewell_frame() -> Frame {
    let mut frame = Frame::default();
    frame.push(Span::plain("Temperature Monitor shutting down."));
    frame
}
