// Output seam for rendered frames
use crate::presentation::frame::Frame;

pub trait FrameSink: Send {
    /// Replace whatever is on screen with `frame`
    fn draw(&mut self, frame: &Frame) -> std::io::Result<()>;

    /// Put the output device back the way it was found
    fn restore(&mut self) -> std::io::Result<()>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Keeps every drawn frame for inspection
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        pub(crate) frames: Arc<Mutex<Vec<Frame>>>,
        pub(crate) restored: Arc<Mutex<bool>>,
    }

    impl RecordingSink {
        pub(crate) fn texts(&self) -> Vec<String> {
            self.frames.lock().unwrap().iter().map(Frame::text).collect()
        }
    }

    impl FrameSink for RecordingSink {
        fn draw(&mut self, frame: &Frame) -> std::io::Result<()> {
            self.frames.lock().unwrap().push(frame.clone());
            Ok(())
        }

        fn restore(&mut self) -> std::io::Result<()> {
            *self.restored.lock().unwrap() = true;
            Ok(())
        }
    }
}
