//! Destinations for rendered lines and status text.
//!
//! [`SharedLineSink`] and [`ChatLog`] are cloneable handles over one buffer,
//! so a scheduled job can write while the host keeps a handle for drawing.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::DebugLine;

/// Receives debug lines; ownership moves to the sink.
pub trait LineSink {
    fn add_line(&mut self, line: DebugLine);
}

/// Receives human-readable status messages.
pub trait StatusChannel {
    fn send_message(&mut self, text: &str);
}

impl LineSink for Vec<DebugLine> {
    fn add_line(&mut self, line: DebugLine) {
        self.push(line);
    }
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn add_line(&mut self, line: DebugLine) {
        (**self).add_line(line);
    }
}

impl StatusChannel for Vec<String> {
    fn send_message(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

impl<S: StatusChannel + ?Sized> StatusChannel for &mut S {
    fn send_message(&mut self, text: &str) {
        (**self).send_message(text);
    }
}

/// Line buffer shared between a render job and the host that draws it.
#[derive(Debug, Clone, Default)]
pub struct SharedLineSink {
    lines: Arc<Mutex<Vec<DebugLine>>>,
}

impl SharedLineSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Copy of every line submitted so far.
    pub fn snapshot(&self) -> Vec<DebugLine> {
        self.lines.lock().clone()
    }

    /// Run `f` over the lines without copying them.
    pub fn with_lines<R>(&self, f: impl FnOnce(&[DebugLine]) -> R) -> R {
        f(&self.lines.lock())
    }

    /// Remove every line, returning them.
    pub fn take(&self) -> Vec<DebugLine> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl LineSink for SharedLineSink {
    fn add_line(&mut self, line: DebugLine) {
        self.lines.lock().push(line);
    }
}

/// Status messages shared between jobs and the host's message display.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Arc<Mutex<Vec<String>>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }
}

impl StatusChannel for ChatLog {
    fn send_message(&mut self, text: &str) {
        log::info!("{}", text);
        self.messages.lock().push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;
    use nalgebra::Point3;

    fn line() -> DebugLine {
        DebugLine::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0), Color::gray(0.5))
    }

    #[test]
    fn test_shared_sink_clones_share_buffer() {
        let sink = SharedLineSink::new();
        let mut writer = sink.clone();
        writer.add_line(line());
        writer.add_line(line());
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.with_lines(|lines| lines[0]), line());

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_chat_log() {
        let log = ChatLog::new();
        let mut writer = log.clone();
        writer.send_message("hello");
        assert_eq!(log.messages(), vec!["hello".to_string()]);
        assert_eq!(log.last().as_deref(), Some("hello"));
    }

    #[test]
    fn test_mut_ref_forwarding() {
        fn feed<S: LineSink, C: StatusChannel>(mut sink: S, mut status: C) {
            sink.add_line(line());
            status.send_message("done");
        }

        let mut lines: Vec<DebugLine> = Vec::new();
        let mut messages: Vec<String> = Vec::new();
        feed(&mut lines, &mut messages);
        assert_eq!(lines.len(), 1);
        assert_eq!(messages, vec!["done".to_string()]);
    }
}
