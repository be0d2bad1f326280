//! The producing task: bump the counter, announce the new value, idle.

use embedded_hal_async::delay::DelayNs;

use crate::config::Config;
use crate::counter::CounterWriter;
use crate::report::Sink;

/// The producer half of the walkthrough.
///
/// Each cycle increments the shared counter by exactly one and announces
/// the stored value while the lock is still held, so the reported line
/// always matches what the consumer can observe next; no second producer
/// cycle or consumer poll can slip in between the store and its report.
/// The idle pause between cycles happens with the lock released, so idling
/// never blocks the consumer.
pub struct Producer<D, S> {
    writer: CounterWriter,
    delay: D,
    sink: S,
    period_ms: u32,
    label: &'static str,
}

impl<D, S> Producer<D, S> {
    pub(crate) fn new(writer: CounterWriter, delay: D, sink: S, config: &Config) -> Self {
        Self {
            writer,
            delay,
            sink,
            period_ms: config.produce_period.ticks(),
            label: config.producer_label,
        }
    }
}

impl<D, S> Producer<D, S>
where
    D: DelayNs,
    S: Sink,
{
    /// Drive produce cycles forever. Never returns.
    pub async fn run(mut self) {
        loop {
            self.step().await;
            self.delay.delay_ms(self.period_ms).await;
        }
    }

    /// One produce cycle: increment and announce under a single hold.
    async fn step(&mut self) -> i32 {
        let mut value = self.writer.lock().await;

        *value = value.wrapping_add(1);
        self.sink.emit(self.label, *value);

        *value
    }
}
