//! The observing task: poll for a change, then announce it under a
//! separate hold.

use embedded_hal_async::delay::DelayNs;

use crate::config::Config;
use crate::counter::CounterWatcher;
use crate::report::Sink;

/// Marks "nothing observed yet". Distinct from every value the counter
/// takes at realistic run lengths, so the first poll always detects a
/// change, including the initial 0 when no produce cycle has run yet.
const UNOBSERVED: i32 = -1;

/// The consumer half of the walkthrough.
///
/// Each poll runs up to two independent critical sections. The first one
/// only compares the counter against the last value this task observed and
/// captures it on change; no I/O happens under that hold. The second one,
/// entered only when something changed, re-acquires the lock just long
/// enough to announce the captured value, which is what keeps whole lines
/// from different tasks from interleaving on a shared sink.
///
/// Values stored between two polls are lost to this task: a poll compares
/// against the counter as it is now, so only the latest value is ever
/// announced.
pub struct Consumer<D, S> {
    watcher: CounterWatcher,
    delay: D,
    sink: S,
    poll_ms: u32,
    label: &'static str,
    last_seen: i32,
}

impl<D, S> Consumer<D, S> {
    pub(crate) fn new(watcher: CounterWatcher, delay: D, sink: S, config: &Config) -> Self {
        Self {
            watcher,
            delay,
            sink,
            poll_ms: config.poll_period.ticks(),
            label: config.consumer_label,
            last_seen: UNOBSERVED,
        }
    }
}

impl<D, S> Consumer<D, S>
where
    D: DelayNs,
    S: Sink,
{
    /// Drive polls forever. Never returns.
    pub async fn run(mut self) {
        loop {
            self.poll_once().await;
            self.delay.delay_ms(self.poll_ms).await;
        }
    }

    /// One poll: detect, then report if something changed. Returns the
    /// value announced, if any.
    async fn poll_once(&mut self) -> Option<i32> {
        let changed = self.detect().await;

        if let Some(value) = changed {
            self.announce(value).await;
        }

        changed
    }

    /// Detect step: a short hold with the comparison and nothing else.
    async fn detect(&mut self) -> Option<i32> {
        let held = self.watcher.lock().await;

        let current = *held;
        let changed = current != self.last_seen;
        if changed {
            self.last_seen = current;
        }

        drop(held);
        changed.then_some(current)
    }

    /// Report step: a second hold around the emission alone.
    async fn announce(&mut self, value: i32) {
        let _held = self.watcher.lock().await;

        self.sink.emit(self.label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::SharedCounter;
    use crate::test_support::{NoDelay, RecordSink};

    fn config() -> Config {
        Config {
            consumer_label: "observed",
            ..Config::new()
        }
    }

    #[tokio::test]
    async fn first_poll_announces_the_initial_value() {
        static COUNTER: SharedCounter = SharedCounter::new();

        let (_writer, watcher) = COUNTER.claim().unwrap();
        let mut consumer = Consumer::new(watcher, NoDelay, RecordSink::new(), &config());

        assert_eq!(consumer.poll_once().await, Some(0));
        assert_eq!(consumer.poll_once().await, None);
    }

    #[tokio::test]
    async fn detects_each_new_value_exactly_once() {
        static COUNTER: SharedCounter = SharedCounter::new();

        let (mut writer, watcher) = COUNTER.claim().unwrap();
        let mut consumer = Consumer::new(watcher, NoDelay, RecordSink::new(), &config());
        consumer.poll_once().await;

        *writer.lock().await = 1;
        assert_eq!(consumer.poll_once().await, Some(1));
        assert_eq!(consumer.poll_once().await, None);

        *writer.lock().await = 2;
        assert_eq!(consumer.poll_once().await, Some(2));
        assert_eq!(consumer.poll_once().await, None);
    }

    #[tokio::test]
    async fn only_the_latest_of_two_updates_is_observed() {
        static COUNTER: SharedCounter = SharedCounter::new();

        let (mut writer, watcher) = COUNTER.claim().unwrap();
        let mut consumer = Consumer::new(watcher, NoDelay, RecordSink::new(), &config());
        consumer.poll_once().await;

        *writer.lock().await = 1;
        *writer.lock().await = 2;

        assert_eq!(consumer.poll_once().await, Some(2));
        assert_eq!(consumer.poll_once().await, None);
        assert_eq!(consumer.sink.lines, ["observed 0", "observed 2"]);
    }

    #[tokio::test]
    async fn consecutive_announcements_always_differ() {
        static COUNTER: SharedCounter = SharedCounter::new();

        let (mut writer, watcher) = COUNTER.claim().unwrap();
        let mut consumer = Consumer::new(watcher, NoDelay, RecordSink::new(), &config());

        for value in [3, 3, 5, 5, 4] {
            *writer.lock().await = value;
            consumer.poll_once().await;
            consumer.poll_once().await;
        }

        let lines = &consumer.sink.lines;
        assert_eq!(*lines, ["observed 3", "observed 5", "observed 4"]);
        for pair in lines.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
