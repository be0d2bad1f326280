//! Tuning knobs for the walkthrough.
//!
//! Only the two idle periods shape observable behavior. Task names,
//! placement, priority, and stack reservations are requests passed through
//! to the scheduler collaborator; correctness rests on the lock alone,
//! whatever the scheduler does with them.

use fugit::MillisDurationU32;

/// Everything the walkthrough can be tuned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Pause after each produce cycle, spent with the lock released.
    pub produce_period: MillisDurationU32,
    /// Pause between consumer polls, spent with the lock released. This is
    /// a polling interval, not an event-driven wake.
    pub poll_period: MillisDurationU32,
    /// Name the scheduler should give the producer task.
    pub producer_name: &'static str,
    /// Name the scheduler should give the consumer task.
    pub consumer_name: &'static str,
    /// Execution context requested for the producer. Advisory.
    pub producer_core: u8,
    /// Execution context requested for the consumer. Advisory.
    pub consumer_core: u8,
    /// Priority requested for both tasks. Advisory.
    pub priority: u8,
    /// Stack words to reserve per task, for schedulers that take one.
    pub stack_words: usize,
    /// Line label for producer reports.
    pub producer_label: &'static str,
    /// Line label for consumer reports.
    pub consumer_label: &'static str,
}

impl Config {
    /// The defaults of the original walkthrough: produce every two seconds,
    /// poll ten times a second, one task per core, equal priority.
    pub const fn new() -> Self {
        Self {
            produce_period: MillisDurationU32::from_ticks(2_000),
            poll_period: MillisDurationU32::from_ticks(100),
            producer_name: "producer",
            consumer_name: "consumer",
            producer_core: 0,
            consumer_core: 1,
            priority: 1,
            stack_words: 10_000,
            producer_label: "<<<<< producer set value to:",
            consumer_label: ">>>>> consumer read new value:",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
