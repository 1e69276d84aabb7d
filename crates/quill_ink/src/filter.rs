//! Sample admission
//!
//! Touch digitizers report tiny position changes while the contact is
//! essentially still. Those jitter samples add nothing but noise (and
//! zero-length segments) to a stroke, so they are dropped before they reach
//! it.

use crate::sample::Sample;

/// Squared distance below which a sample counts as jitter
pub const DEFAULT_JITTER_QUADRANCE: f64 = 0.003;

/// Jitter suppressor applied before a sample is accepted into a stroke
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleFilter {
    epsilon: f64,
}

impl SampleFilter {
    pub const fn new() -> Self {
        Self {
            epsilon: DEFAULT_JITTER_QUADRANCE,
        }
    }

    /// Filter with a custom squared-distance threshold
    pub const fn with_epsilon(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Whether `candidate` should be accepted after `previous`
    pub fn admit(&self, candidate: &Sample, previous: Option<&Sample>) -> bool {
        match previous {
            Some(previous) => (candidate.location - previous.location).quadrance() >= self.epsilon,
            None => true,
        }
    }
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Point;

    fn at(x: f64, y: f64) -> Sample {
        Sample::new(0.0, Point::new(x, y))
    }

    #[test]
    fn test_first_sample_always_admitted() {
        assert!(SampleFilter::new().admit(&at(0.0, 0.0), None));
    }

    #[test]
    fn test_rejects_below_threshold() {
        let filter = SampleFilter::new();
        let previous = at(0.0, 0.0);

        // 0.05² = 0.0025 < 0.003
        assert!(!filter.admit(&at(0.05, 0.0), Some(&previous)));
        assert!(!filter.admit(&at(0.0, 0.0), Some(&previous)));
        // 0.03² + 0.04² = 0.0025
        assert!(!filter.admit(&at(0.03, 0.04), Some(&previous)));
    }

    #[test]
    fn test_admits_above_threshold() {
        let filter = SampleFilter::new();
        let previous = at(0.0, 0.0);

        assert!(filter.admit(&at(0.06, 0.0), Some(&previous)));
        assert!(filter.admit(&at(10.0, -4.0), Some(&previous)));
    }

    #[test]
    fn test_custom_epsilon() {
        let filter = SampleFilter::with_epsilon(1.0);
        let previous = at(0.0, 0.0);

        assert!(!filter.admit(&at(0.5, 0.5), Some(&previous)));
        // exactly on the threshold is admitted
        assert!(filter.admit(&at(1.0, 0.0), Some(&previous)));
        assert_eq!(filter.epsilon(), 1.0);
    }
}
