//! End-to-end run of both task loops on a host executor.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use embedded_hal_async::delay::DelayNs;
use fugit::MillisDurationU32;

use tandem::config::Config;
use tandem::counter::SharedCounter;
use tandem::report::Sink;
use tandem::startup::{self, Tasks};

/// Delay riding on the test executor's timer.
struct Pace;

impl DelayNs for Pace {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(Duration::from_nanos(u64::from(ns))).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(u64::from(ms))).await;
    }
}

/// One shared line buffer standing in for the console both tasks report to.
struct SharedSink(Arc<Mutex<Vec<String>>>);

impl Sink for SharedSink {
    fn emit(&mut self, label: &str, value: i32) {
        self.0.lock().unwrap().push(format!("{label} {value}"));
    }
}

static COUNTER: SharedCounter = SharedCounter::new();

#[tokio::test(flavor = "multi_thread")]
async fn the_two_loops_interleave_correctly() {
    let lines = Arc::new(Mutex::new(Vec::new()));

    let config = Config {
        produce_period: MillisDurationU32::from_ticks(30),
        poll_period: MillisDurationU32::from_ticks(5),
        producer_label: "produced",
        consumer_label: "observed",
        ..Config::new()
    };

    let tasks = startup::bring_up(
        &COUNTER,
        config,
        Pace,
        SharedSink(lines.clone()),
        Pace,
        SharedSink(lines.clone()),
    )
    .unwrap();
    let Tasks { producer, consumer } = tasks;

    let producing = tokio::spawn(producer.run());
    let observing = tokio::spawn(consumer.run());

    tokio::time::sleep(Duration::from_millis(200)).await;
    producing.abort();
    observing.abort();

    let lines = lines.lock().unwrap();

    let produced: Vec<i32> = lines
        .iter()
        .filter_map(|line| line.strip_prefix("produced "))
        .map(|value| value.parse().unwrap())
        .collect();
    let observed: Vec<i32> = lines
        .iter()
        .filter_map(|line| line.strip_prefix("observed "))
        .map(|value| value.parse().unwrap())
        .collect();

    // The producer counted 1, 2, 3, ... and announced every store.
    assert!(!produced.is_empty());
    let expected: Vec<i32> = (1..=produced.len() as i32).collect();
    assert_eq!(produced, expected);

    // The consumer announced something, never the same value twice in a
    // row, and never a value the counter did not hold.
    assert!(!observed.is_empty());
    for pair in observed.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    for &value in &observed {
        assert!(value == 0 || produced.contains(&value));
    }
}
