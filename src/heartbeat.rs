//! Main-loop heartbeat.

use crate::config::{HEARTBEAT_MESSAGE, HEARTBEAT_PERIOD_MS};
use embedded_hal::delay::DelayNs;

/// Destination for console lines.
pub trait LineSink {
    /// Emits one line of text. Must not fail.
    fn write_line(&mut self, line: &str);
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

/// Sleeps a fixed period, then emits a fixed line, forever.
///
/// The heartbeat owns no shared state and never touches the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    period_ms: u32,
    message: &'static str,
}

impl Heartbeat {
    /// Creates a heartbeat with a custom period and message.
    pub const fn new(period_ms: u32, message: &'static str) -> Self {
        Self { period_ms, message }
    }

    /// Sleep between lines.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Line emitted each period.
    #[inline]
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Runs one period: sleep, then emit.
    pub fn beat<D: DelayNs, S: LineSink>(&self, delay: &mut D, sink: &mut S) {
        delay.delay_ms(self.period_ms);
        sink.write_line(self.message);
    }

    /// Beats while `keep_running` returns `true`.
    ///
    /// `keep_running` is asked before every beat with the number of beats
    /// already emitted. Returns the number of beats emitted.
    pub fn run_while<D, S, F>(&self, delay: &mut D, sink: &mut S, mut keep_running: F) -> u32
    where
        D: DelayNs,
        S: LineSink,
        F: FnMut(u32) -> bool,
    {
        let mut beats = 0;
        while keep_running(beats) {
            self.beat(delay, sink);
            beats += 1;
        }
        beats
    }

    /// Beats forever. The continuation condition is always true.
    pub fn run<D: DelayNs, S: LineSink>(&self, delay: &mut D, sink: &mut S) -> ! {
        loop {
            self.beat(delay, sink);
        }
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(HEARTBEAT_PERIOD_MS, HEARTBEAT_MESSAGE)
    }
}
