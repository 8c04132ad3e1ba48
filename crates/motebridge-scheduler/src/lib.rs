//! Absolute-deadline tick scheduling for the report emission loop.
//!
//! [`TickScheduler`] wakes at `start + n * period` rather than sleeping a
//! fixed period after each tick, so processing time does not accumulate as
//! drift. [`JitterMetrics`] records how late or early each wake was.
//!
//! ```no_run
//! use motebridge_scheduler::TickScheduler;
//!
//! let mut scheduler = TickScheduler::with_period_ms(10);
//! loop {
//!     match scheduler.wait_for_tick() {
//!         Ok(_tick) => { /* emit reports */ }
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]

pub mod error;
pub mod jitter;
pub mod scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use jitter::JitterMetrics;
pub use scheduler::TickScheduler;

/// Report emission period in nanoseconds (10 ms).
pub const PERIOD_10MS_NS: u64 = 10_000_000;
