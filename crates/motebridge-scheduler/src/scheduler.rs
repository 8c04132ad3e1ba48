//! Absolute-deadline scheduler.

use std::time::{Duration, Instant};

use crate::error::{SchedulerError, SchedulerResult};
use crate::jitter::JitterMetrics;

/// Wakes at fixed absolute deadlines `start + n * period`.
///
/// A wake that comes more than a whole period late re-anchors the deadline
/// grid at the current time instead of firing the missed ticks back to back,
/// and reports [`SchedulerError::Overrun`].
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    next_tick: Instant,
    tick_count: u64,
    skipped_ticks: u64,
    metrics: JitterMetrics,
}

impl TickScheduler {
    /// Scheduler with a period of `period_ns` nanoseconds (at least 1).
    pub fn with_period(period_ns: u64) -> Self {
        let period = Duration::from_nanos(period_ns.max(1));
        Self {
            period,
            next_tick: Instant::now() + period,
            tick_count: 0,
            skipped_ticks: 0,
            metrics: JitterMetrics::new(),
        }
    }

    pub fn with_period_ms(period_ms: u64) -> Self {
        Self::with_period(period_ms.saturating_mul(1_000_000))
    }

    /// Sleep until the next deadline and return the tick number.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::Overrun`] when the caller arrived more than one
    /// period after the deadline. The scheduler is already re-anchored and
    /// the next call proceeds normally.
    pub fn wait_for_tick(&mut self) -> SchedulerResult<u64> {
        let now = Instant::now();
        if now < self.next_tick {
            std::thread::sleep(self.next_tick - now);
        }
        self.complete_tick(Instant::now())
    }

    /// Account for a wake at `woke` and advance the deadline.
    fn complete_tick(&mut self, woke: Instant) -> SchedulerResult<u64> {
        let deadline = self.next_tick;
        let missed = woke > deadline;
        let jitter = if missed {
            woke - deadline
        } else {
            deadline - woke
        };
        let jitter_ns = u64::try_from(jitter.as_nanos()).unwrap_or(u64::MAX);
        self.metrics.record_tick(jitter_ns, missed);
        self.tick_count += 1;

        if missed && jitter >= self.period {
            let skipped = u64::try_from(jitter.as_nanos() / self.period.as_nanos()).unwrap_or(u64::MAX);
            self.skipped_ticks = self.skipped_ticks.saturating_add(skipped);
            self.next_tick = woke + self.period;
            return Err(SchedulerError::Overrun { jitter_ns, skipped });
        }
        self.next_tick = deadline + self.period;
        Ok(self.tick_count)
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Periods dropped by re-anchoring after overruns.
    #[inline]
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn next_deadline(&self) -> Instant {
        self.next_tick
    }

    #[inline]
    pub fn metrics(&self) -> &JitterMetrics {
        &self.metrics
    }

    /// Restart the deadline grid one period from now.
    pub fn reset(&mut self) {
        self.next_tick = Instant::now() + self.period;
        self.tick_count = 0;
        self.skipped_ticks = 0;
        self.metrics.reset();
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::with_period(crate::PERIOD_10MS_NS)
    }
}
