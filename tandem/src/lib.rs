//! Two tasks, one integer, one lock.
//!
//! A producer bumps a shared counter every couple of seconds; a consumer
//! polls it ten times a second and announces every value it has not seen
//! before. The counter is the only shared state, a [`tandem_sync::mutex::Mutex`]
//! is the only coordination between the two, and both tasks report only
//! while holding it, so their lines never tear on a shared console.
//!
//! The crate builds the two loops; running them is the scheduler
//! collaborator's business. Anything that can drive two never-returning
//! futures on two execution contexts will do: an RTOS port, one executor
//! per core, or the host runner in `demos/host`.
//!
//! ```rust
//! use tandem::config::Config;
//! use tandem::counter::SharedCounter;
//! use tandem::report::Sink;
//! use tandem::startup;
//!
//! struct Discard;
//!
//! impl Sink for Discard {
//!     fn emit(&mut self, _label: &str, _value: i32) {}
//! }
//!
//! struct Spin;
//!
//! impl embedded_hal_async::delay::DelayNs for Spin {
//!     async fn delay_ns(&mut self, _ns: u32) {}
//! }
//!
//! static COUNTER: SharedCounter = SharedCounter::new();
//!
//! let tasks = startup::bring_up(
//!     &COUNTER,
//!     Config::new(),
//!     Spin,
//!     Discard,
//!     Spin,
//!     Discard,
//! )
//! .unwrap();
//!
//! // Hand `tasks.producer.run()` and `tasks.consumer.run()` to a scheduler.
//! ```

#![no_std]
#![deny(missing_docs)]

pub mod config;
pub mod consumer;
pub mod counter;
pub mod producer;
pub mod report;
pub mod startup;

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(test)]
mod test_support;
