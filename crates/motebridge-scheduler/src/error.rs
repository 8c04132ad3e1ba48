//! Error types for the scheduler crate.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A wake came so late that whole periods were skipped.
    #[error("tick overran by {jitter_ns} ns, {skipped} period(s) skipped")]
    Overrun { jitter_ns: u64, skipped: u64 },
}

pub type SchedulerResult<T = ()> = Result<T, SchedulerError>;
