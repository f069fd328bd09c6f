// Terminal implementation of FrameSink
use crate::application::frame_sink::FrameSink;
use crate::presentation::frame::{Frame, Line};
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::{QueueableCommand, cursor, terminal};
use std::io::{self, Write};

/// Full-screen redraws to any writer; stdout in production
pub struct TerminalSink<W: Write> {
    out: W,
    cursor_hidden: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cursor_hidden: false,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn queue_line(&mut self, line: &Line) -> io::Result<()> {
        for span in &line.spans {
            if span.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if let Some(color) = span.color {
                self.out.queue(SetForegroundColor(color))?;
            }
            self.out.queue(Print(&span.text))?;
            if span.bold || span.color.is_some() {
                self.out.queue(SetAttribute(Attribute::Reset))?;
                self.out.queue(ResetColor)?;
            }
        }
        self.out.queue(Print("\n"))?;
        Ok(())
    }
}

impl<W: Write + Send> FrameSink for TerminalSink<W> {
    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        if !self.cursor_hidden {
            self.out.queue(cursor::Hide)?;
            self.cursor_hidden = true;
        }
        self.out
            .queue(terminal::Clear(terminal::ClearType::All))?
            .queue(cursor::MoveTo(0, 0))?;
        for line in &frame.lines {
            self.queue_line(line)?;
        }
        self.out.flush()
    }

    fn restore(&mut self) -> io::Result<()> {
        self.out.queue(ResetColor)?.queue(cursor::Show)?;
        self.cursor_hidden = false;
        self.out.flush()
    }
}
