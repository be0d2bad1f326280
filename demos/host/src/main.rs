//! Host runner for the walkthrough.
//!
//! Two OS threads, each driving a single-task executor, stand in for the
//! two pinned cores of the original target. Placement and priority stay
//! advisory on a host OS; only the task names carry over.

use critical_section as _; // std critical-section implementation

use std::future::Future;
use std::thread;
use std::time::Duration;

use tandem::config::Config;
use tandem::counter::SharedCounter;
use tandem::report::Sink;
use tandem::startup::{self, Tasks};

/// Adapts the executor's timer to the `DelayNs` seam.
struct TokioDelay;

impl embedded_hal_async::delay::DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(Duration::from_nanos(u64::from(ns))).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(u64::from(ms))).await;
    }
}

/// Both tasks share stdout; per-line atomicity comes from the counter lock.
struct Stdout;

impl Sink for Stdout {
    fn emit(&mut self, label: &str, value: i32) {
        println!("{label} {value}");
    }
}

static COUNTER: SharedCounter = SharedCounter::new();

fn main() {
    println!("--- producer/consumer mutex walkthrough ---");

    let config = Config {
        producer_label: "<<<<< producer (core 0) set value to:",
        consumer_label: ">>>>> consumer (core 1) read new value:",
        ..Config::new()
    };
    let producer_name = config.producer_name;
    let consumer_name = config.consumer_name;

    let tasks = match startup::bring_up(&COUNTER, config, TokioDelay, Stdout, TokioDelay, Stdout) {
        Ok(tasks) => tasks,
        Err(err) => {
            eprintln!("bring-up failed, not starting any task: {err:?}");
            std::process::exit(1);
        }
    };
    let Tasks { producer, consumer } = tasks;

    // One thread per "core", one single-task executor per thread.
    let core0 = thread::Builder::new()
        .name(producer_name.into())
        .spawn(move || drive(producer.run()))
        .expect("spawning the producer thread");
    let core1 = thread::Builder::new()
        .name(consumer_name.into())
        .spawn(move || drive(consumer.run()))
        .expect("spawning the consumer thread");

    // The original parks its main loop forever; joining two never-returning
    // tasks is the host equivalent.
    let _ = core0.join();
    let _ = core1.join();
}

fn drive<F: Future>(task: F) {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("building a single-task runtime")
        .block_on(task);
}
