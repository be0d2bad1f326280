//! Bring-up: claim the shared state and wire both task loops.
//!
//! Nothing here starts a task. On success the caller hands the two loops to
//! its scheduler; on failure no task exists, and the caller must park the
//! process instead of proceeding with an unprotected value.

use crate::config::Config;
use crate::consumer::Consumer;
use crate::counter::{AlreadyClaimed, SharedCounter};
use crate::producer::Producer;

/// The two task loops, ready to be scheduled.
pub struct Tasks<PD, PS, CD, CS> {
    /// To run on `config.producer_core`.
    pub producer: Producer<PD, PS>,
    /// To run on `config.consumer_core`.
    pub consumer: Consumer<CD, CS>,
}

/// Errors that `bring_up` can have.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum StartupError {
    /// The shared counter could not be claimed.
    Counter(AlreadyClaimed),
}

/// Claim `counter` and build both task loops around it.
///
/// Each task gets its own delay provider and sink; in the usual wiring both
/// sinks feed the same console, and the lock keeps their lines whole.
pub fn bring_up<PD, PS, CD, CS>(
    counter: &'static SharedCounter,
    config: Config,
    producer_delay: PD,
    producer_sink: PS,
    consumer_delay: CD,
    consumer_sink: CS,
) -> Result<Tasks<PD, PS, CD, CS>, StartupError> {
    let (writer, watcher) = counter.claim().map_err(StartupError::Counter)?;

    Ok(Tasks {
        producer: Producer::new(writer, producer_delay, producer_sink, &config),
        consumer: Consumer::new(watcher, consumer_delay, consumer_sink, &config),
    })
}
