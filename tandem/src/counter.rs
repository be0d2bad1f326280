//! The shared counter: one integer behind one lock, claimed once and split
//! into the two task-side handles.
//!
//! There is exactly one way to reach the value: claim the counter at
//! bring-up and use the handles it returns. The writer side is the only
//! path that can store; the watcher side only loads. Nothing else in the
//! process can touch the integer, locked or not.

use core::ops::Deref;

use portable_atomic::{AtomicBool, Ordering};
use tandem_sync::mutex::{Mutex, MutexGuard};

/// The value the counter holds before the first produce cycle.
pub const INITIAL_VALUE: i32 = 0;

/// The integer the two tasks share, together with the lock serializing
/// every access to it. Lives for the whole process; never reset.
///
/// ```rust
/// use tandem::counter::SharedCounter;
///
/// static COUNTER: SharedCounter = SharedCounter::new();
///
/// let (writer, watcher) = COUNTER.claim().unwrap();
/// ```
pub struct SharedCounter {
    cell: Mutex<i32>,
    claimed: AtomicBool,
}

/// Error for a [`SharedCounter::claim`] of already-claimed state.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub struct AlreadyClaimed;

impl SharedCounter {
    /// Create an unclaimed counter holding [`INITIAL_VALUE`].
    pub const fn new() -> Self {
        Self {
            cell: Mutex::new(INITIAL_VALUE),
            claimed: AtomicBool::new(false),
        }
    }

    /// Split the counter into its producer-side and consumer-side handles.
    ///
    /// Succeeds exactly once per counter. A failed claim means the shared
    /// state could not be set up, and bring-up must stop there rather than
    /// proceed with an unprotected value.
    pub fn claim(&'static self) -> Result<(CounterWriter, CounterWatcher), AlreadyClaimed> {
        if self.claimed.swap(true, Ordering::AcqRel) {
            return Err(AlreadyClaimed);
        }

        Ok((
            CounterWriter { counter: self },
            CounterWatcher { counter: self },
        ))
    }
}

/// Producer-side handle: the only path that mutates the counter.
pub struct CounterWriter {
    counter: &'static SharedCounter,
}

impl core::fmt::Debug for CounterWriter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CounterWriter")
    }
}

#[cfg(feature = "defmt-03")]
impl defmt::Format for CounterWriter {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CounterWriter",)
    }
}

impl CounterWriter {
    /// Acquire the counter for update, waiting as long as it takes. Held
    /// until the guard drops.
    pub async fn lock(&mut self) -> MutexGuard<'static, i32> {
        self.counter.cell.lock().await
    }
}

/// Consumer-side handle: every acquire is read-only.
pub struct CounterWatcher {
    counter: &'static SharedCounter,
}

impl core::fmt::Debug for CounterWatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CounterWatcher")
    }
}

#[cfg(feature = "defmt-03")]
impl defmt::Format for CounterWatcher {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CounterWatcher",)
    }
}

impl CounterWatcher {
    /// Acquire the counter for reading, waiting as long as it takes. Held
    /// until the guard drops.
    pub async fn lock(&self) -> ReadGuard<'static> {
        ReadGuard(self.counter.cell.lock().await)
    }
}

/// A held, read-only view of the counter.
pub struct ReadGuard<'a>(MutexGuard<'a, i32>);

impl Deref for ReadGuard<'_> {
    type Target = i32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
