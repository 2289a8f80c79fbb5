//! Per-run counters.

use std::fmt;
use std::time::Duration;

/// Comparison and swap counts plus wall-clock duration of one run.
///
/// Counters only ever grow during a run; the session replaces the whole value
/// with [`Metrics::default`] before the next one starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub comparisons: u64,
    pub swaps: u64,
    pub elapsed: Duration,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn record_comparison(&mut self) {
        self.comparisons += 1;
    }

    #[inline]
    pub fn record_swap(&mut self) {
        self.swaps += 1;
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "comparisons: {}  swaps: {}  time: {:.3}s",
            self.comparisons,
            self.swaps,
            self.elapsed_seconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reset_zeroes_everything() {
        let mut metrics = Metrics::new();
        metrics.record_comparison();
        metrics.record_swap();
        metrics.elapsed = Duration::from_millis(250);
        metrics.reset();
        assert_eq!(metrics, Metrics::default());
    }

    #[test]
    fn elapsed_seconds_converts_duration() {
        let metrics = Metrics {
            elapsed: Duration::from_millis(1500),
            ..Metrics::default()
        };
        assert_relative_eq!(metrics.elapsed_seconds(), 1.5);
    }

    #[test]
    fn display_formats_readout() {
        let metrics = Metrics {
            comparisons: 12,
            swaps: 3,
            elapsed: Duration::from_millis(20),
        };
        assert_eq!(metrics.to_string(), "comparisons: 12  swaps: 3  time: 0.020s");
    }
}
