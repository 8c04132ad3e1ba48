//! Jitter metrics collection.

/// Timing statistics over the lifetime of a scheduler plus a bounded window
/// of recent samples for percentiles.
#[derive(Debug, Clone)]
pub struct JitterMetrics {
    /// Total number of ticks recorded
    pub total_ticks: u64,

    /// Ticks that woke after their deadline
    pub missed_ticks: u64,

    /// Maximum observed jitter in nanoseconds
    pub max_jitter_ns: u64,

    /// Last observed jitter sample
    pub last_jitter_ns: u64,

    jitter_sum_ns: u128,

    /// Ring buffer of recent samples
    samples: Vec<u64>,
    max_samples: usize,
    next_index: usize,
}

impl Default for JitterMetrics {
    fn default() -> Self {
        // Ten seconds of 10 ms ticks.
        Self::with_capacity(1_000)
    }
}

impl JitterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics retaining at most `max_samples` recent samples.
    pub fn with_capacity(max_samples: usize) -> Self {
        Self {
            total_ticks: 0,
            missed_ticks: 0,
            max_jitter_ns: 0,
            last_jitter_ns: 0,
            jitter_sum_ns: 0,
            samples: Vec::with_capacity(max_samples),
            max_samples,
            next_index: 0,
        }
    }

    /// Record one wake. Allocation-free once the window is full.
    pub fn record_tick(&mut self, jitter_ns: u64, missed_deadline: bool) {
        self.total_ticks += 1;
        if missed_deadline {
            self.missed_ticks += 1;
        }
        self.max_jitter_ns = self.max_jitter_ns.max(jitter_ns);
        self.last_jitter_ns = jitter_ns;
        self.jitter_sum_ns += u128::from(jitter_ns);

        if self.max_samples == 0 {
            return;
        }
        if self.samples.len() < self.max_samples {
            self.samples.push(jitter_ns);
        } else {
            self.samples[self.next_index] = jitter_ns;
            self.next_index = (self.next_index + 1) % self.max_samples;
        }
    }

    /// Jitter at `percentile` (`0.0..=1.0`) over the sample window, 0 when
    /// empty.
    pub fn percentile_jitter_ns(&self, percentile: f64) -> u64 {
        if self.samples.is_empty() {
            return 0;
        }
        let mut sorted = self.samples.clone();
        sorted.sort_unstable();
        let len = sorted.len();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = ((len as f64 * percentile.clamp(0.0, 1.0)) as usize).min(len - 1);
        sorted[index]
    }

    pub fn p99_jitter_ns(&self) -> u64 {
        self.percentile_jitter_ns(0.99)
    }

    pub fn p50_jitter_ns(&self) -> u64 {
        self.percentile_jitter_ns(0.50)
    }

    /// Mean jitter over every recorded tick.
    pub fn average_jitter_ns(&self) -> u64 {
        if self.total_ticks == 0 {
            return 0;
        }
        u64::try_from(self.jitter_sum_ns / u128::from(self.total_ticks)).unwrap_or(u64::MAX)
    }

    /// Fraction of ticks that woke late.
    pub fn missed_tick_rate(&self) -> f64 {
        if self.total_ticks == 0 {
            0.0
        } else {
            self.missed_ticks as f64 / self.total_ticks as f64
        }
    }

    /// Samples currently held in the window.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn reset(&mut self) {
        *self = Self::with_capacity(self.max_samples);
    }
}
