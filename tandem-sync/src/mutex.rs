//! An async mutex with unbounded-wait acquire.
//!
//! Example usage:
//!
//! ```rust
//! use tandem_sync::mutex::Mutex;
//!
//! // Instantiate a mutex with a static lifetime.
//! static VALUE: Mutex<u32> = Mutex::new(32);
//!
//! async fn bump() {
//!     *VALUE.lock().await += 1;
//! }
//! ```

use core::cell::UnsafeCell;
use core::future::poll_fn;
use core::ops::{Deref, DerefMut};
use core::task::{Poll, Waker};

use portable_atomic::{AtomicBool, Ordering};

/// A mutual-exclusion lock around a value, granting at most one concurrent
/// holder. [`lock`](Mutex::lock) waits indefinitely; releasing happens when
/// the returned [`MutexGuard`] drops, waking at most one blocked waiter.
///
/// The waiter store is a single slot, sized for the intended use of two
/// tasks contending over one value. A third simultaneous waiter displaces
/// the registered one; the displaced task is woken so it re-queues itself,
/// which keeps every waiter live at the cost of some churn. Ordering among
/// waiters is not guaranteed.
pub struct Mutex<T> {
    held: AtomicBool,
    waiter: UnsafeCell<Option<Waker>>,
    value: UnsafeCell<T>,
}

unsafe impl<T: Send> Send for Mutex<T> {}
unsafe impl<T: Send> Sync for Mutex<T> {}

impl<T> Mutex<T> {
    /// Create a new, unlocked mutex owning `value`.
    pub const fn new(value: T) -> Self {
        Self {
            held: AtomicBool::new(false),
            waiter: UnsafeCell::new(None),
            value: UnsafeCell::new(value),
        }
    }

    /// Acquire the mutex, waiting as long as it takes. The state check and
    /// the waker registration happen inside one critical section, so a
    /// release can never slip in between them.
    pub async fn lock(&self) -> MutexGuard<'_, T> {
        poll_fn(|cx| {
            critical_section::with(|_| {
                // Make sure all previous writes are visible
                core::sync::atomic::fence(Ordering::SeqCst);

                if !self.held.load(Ordering::Relaxed) {
                    self.held.store(true, Ordering::Relaxed);
                    return Poll::Ready(());
                }

                // SAFETY: the slot is only touched inside a critical section.
                let waiter = unsafe { &mut *self.waiter.get() };
                match waiter {
                    // Same task as the registered waiter, keep the old waker.
                    Some(w) if w.will_wake(cx.waker()) => {}
                    _ => {
                        if let Some(displaced) = waiter.replace(cx.waker().clone()) {
                            // Wake the task we pushed out so it can register
                            // itself again.
                            displaced.wake();
                        }
                    }
                }

                Poll::Pending
            })
        })
        .await;

        MutexGuard { lock: self }
    }

    /// Try to acquire the mutex without waiting.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        critical_section::with(|_| {
            // Make sure all previous writes are visible
            core::sync::atomic::fence(Ordering::SeqCst);

            if self.held.load(Ordering::Relaxed) {
                None
            } else {
                self.held.store(true, Ordering::Relaxed);
                Some(MutexGuard { lock: self })
            }
        })
    }
}

/// Witness of exclusive tenure of a [`Mutex`]. Grants access to the value;
/// dropping it is the release operation.
pub struct MutexGuard<'a, T> {
    lock: &'a Mutex<T>,
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        // SAFETY: the guard exists, so the holder is exclusive.
        unsafe { &*self.lock.value.get() }
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: the guard exists, so the holder is exclusive.
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<T> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        let blocked = critical_section::with(|_| {
            // Make sure all previous writes are visible
            core::sync::atomic::fence(Ordering::SeqCst);

            self.lock.held.store(false, Ordering::Relaxed);

            // SAFETY: the slot is only touched inside a critical section.
            unsafe { &mut *self.lock.waiter.get() }.take()
        });

        if let Some(waker) = blocked {
            waker.wake();
        }
    }
}
