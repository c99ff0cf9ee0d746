//! Pass timing
//!
//! Keeps the durations of recent layout passes for diagnostics.

/// Number of recent passes kept
pub const MAX_SAMPLES: usize = 32;

/// Durations of the most recent layout passes
#[derive(Debug, Clone, Default)]
pub struct PassTimings {
    samples: Vec<f64>,
}

impl PassTimings {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    pub fn record(&mut self, duration_ms: f64) {
        if self.samples.len() == MAX_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push(duration_ms);
    }

    pub fn last(&self) -> Option<f64> {
        self.samples.last().copied()
    }

    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
        }
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_recorded_passes() {
        let mut timings = PassTimings::new();
        assert_eq!(timings.average(), None);

        timings.record(2.0);
        timings.record(4.0);
        assert_eq!(timings.average(), Some(3.0));
        assert_eq!(timings.last(), Some(4.0));
    }

    #[test]
    fn test_old_samples_dropped() {
        let mut timings = PassTimings::new();
        for i in 0..(MAX_SAMPLES + 8) {
            timings.record(i as f64);
        }
        assert_eq!(timings.count(), MAX_SAMPLES);
        assert_eq!(timings.last(), Some((MAX_SAMPLES + 7) as f64));
    }
}
