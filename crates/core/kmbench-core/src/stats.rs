//! Summary statistics over benchmark runtimes.

use serde::{Deserialize, Serialize};

/// Computed statistics for a set of runtimes, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeSummary {
    /// Fastest runtime.
    pub min: f64,
    /// Slowest runtime.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median runtime.
    pub median: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub stddev: f64,
    /// Number of runtimes.
    pub count: usize,
}

impl RuntimeSummary {
    /// Compute statistics from a list of runtimes.
    ///
    /// Returns `None` if the list is empty.
    pub fn compute(runtimes: &[f64]) -> Option<Self> {
        let n = runtimes.len();
        if n == 0 {
            return None;
        }

        let mut sorted = runtimes.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let min = sorted[0];
        let max = sorted[n - 1];
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let sum: f64 = runtimes.iter().sum();
        let mean = sum / n as f64;

        let variance = if n > 1 {
            let var_sum: f64 = runtimes.iter().map(|&r| (r - mean) * (r - mean)).sum();
            var_sum / (n - 1) as f64
        } else {
            0.0
        };

        Some(Self {
            min,
            max,
            mean,
            median,
            stddev: variance.sqrt(),
            count: n,
        })
    }

    /// The `(minimum, average, maximum)` triple that gets charted.
    pub fn triple(&self) -> (f64, f64, f64) {
        (self.min, self.mean, self.max)
    }
}
