//! Helpers shared by the in-module tests.

use std::string::String;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::report::Sink;

/// Delay that completes immediately, so test loops never idle.
pub struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}

/// Sink recording every emitted line.
pub struct RecordSink {
    pub lines: Vec<String>,
}

impl RecordSink {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }
}

impl Sink for RecordSink {
    fn emit(&mut self, label: &str, value: i32) {
        self.lines.push(format!("{label} {value}"));
    }
}
