//! Synchronization for asynchronous tasks that share one value.
//!
//! The only primitive here is [`mutex::Mutex`]: an unbounded-wait,
//! critical-section based lock that hands out exclusive access to the value
//! it owns. It is the sole coordination point between the two tasks of the
//! tandem walkthrough.

#![no_std]
#![deny(missing_docs)]

pub mod mutex;

#[cfg(test)]
#[macro_use]
extern crate std;
