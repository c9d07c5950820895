//! Run records produced by the measurement harness

use std::time::Duration;

/// Timed durations from one harness invocation, in iteration order
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// Label the mean is reported under
    pub label: String,
    /// One entry per iteration
    pub durations: Vec<Duration>,
}

impl RunRecord {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            durations: Vec::new(),
        }
    }

    pub fn with_capacity(label: impl Into<String>, iterations: usize) -> Self {
        Self {
            label: label.into(),
            durations: Vec::with_capacity(iterations),
        }
    }

    pub fn push(&mut self, elapsed: Duration) {
        self.durations.push(elapsed);
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn total(&self) -> Duration {
        self.durations.iter().sum()
    }

    /// Arithmetic mean; zero for an empty record
    pub fn mean(&self) -> Duration {
        if self.durations.is_empty() {
            return Duration::ZERO;
        }
        let nanos = self.durations.iter().map(Duration::as_nanos).sum::<u128>()
            / self.durations.len() as u128;
        Duration::from_nanos(nanos as u64)
    }

    /// Mean in floating-point seconds, computed from the `f64` samples
    pub fn mean_secs(&self) -> f64 {
        if self.durations.is_empty() {
            return 0.0;
        }
        self.samples_secs().iter().sum::<f64>() / self.durations.len() as f64
    }

    pub fn samples_secs(&self) -> Vec<f64> {
        self.durations.iter().map(Duration::as_secs_f64).collect()
    }

    /// Report line for the console sink
    pub fn summary(&self) -> String {
        format!("{} took {} seconds.", self.label, self.mean_secs())
    }
}
