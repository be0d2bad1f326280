//! Where task announcements end up.
//!
//! One [`Sink::emit`] call is one full line. Both tasks emit only while
//! holding the counter lock, so a sink shared between them sees at most one
//! caller at a time and lines never interleave mid-line.

use core::fmt::Write;

/// A line-oriented output for task reports.
pub trait Sink {
    /// Emit one full line: `label`, one space, `value`.
    fn emit(&mut self, label: &str, value: i32);
}

/// Sink writing lines through any [`core::fmt::Write`], e.g. a serial
/// console adapter.
///
/// Write errors are discarded; the walkthrough models no sink failures.
pub struct FmtSink<W> {
    /// Where the lines go.
    pub writer: W,
}

impl<W: Write> Sink for FmtSink<W> {
    fn emit(&mut self, label: &str, value: i32) {
        let _ = writeln!(self.writer, "{} {}", label, value);
    }
}

/// Sink forwarding each line to `defmt`.
#[cfg(feature = "defmt-03")]
pub struct DefmtSink;

#[cfg(feature = "defmt-03")]
impl Sink for DefmtSink {
    fn emit(&mut self, label: &str, value: i32) {
        defmt::info!("{=str} {=i32}", label, value);
    }
}
