//! Thresholded change reporting over the filtered series.

use num_traits::float::FloatCore;

use crate::config::{ConfigError, check_threshold};

/// Reports the step between consecutive filtered values when it reaches the
/// threshold, and exactly `0.0` otherwise.
///
/// The baseline always follows the latest value, so slow drifts made of
/// sub-threshold steps are never reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeDetector {
    threshold: f32,
    previous: Option<f32>,
    changes: usize,
}

impl ChangeDetector {
    pub fn new(threshold: f32) -> Result<Self, ConfigError> {
        check_threshold(threshold)?;
        Ok(Self {
            threshold,
            previous: None,
            changes: 0,
        })
    }

    pub fn apply(&mut self, filtered: f32) -> f32 {
        let Some(previous) = self.previous.replace(filtered) else {
            return 0.0;
        };

        let delta = filtered - previous;
        if FloatCore::abs(delta) >= self.threshold {
            self.changes += 1;
            delta
        } else {
            0.0
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Last value seen, `None` before the first call.
    pub fn baseline(&self) -> Option<f32> {
        self.previous
    }

    /// Number of deltas that met the threshold.
    pub fn changes(&self) -> usize {
        self.changes
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.changes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_sets_baseline() {
        let mut detector = ChangeDetector::new(0.1).unwrap();
        assert_eq!(detector.apply(25.0), 0.0);
        assert_eq!(detector.baseline(), Some(25.0));
        assert_eq!(detector.changes(), 0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut detector = ChangeDetector::new(0.5).unwrap();
        detector.apply(20.0);
        assert_eq!(detector.apply(20.5), 0.5);
        assert_eq!(detector.apply(20.0), -0.5);
        assert_eq!(detector.changes(), 2);
    }

    #[test]
    fn baseline_follows_suppressed_values() {
        let mut detector = ChangeDetector::new(0.25).unwrap();
        detector.apply(20.0);

        assert_eq!(detector.apply(20.125), 0.0);
        assert_eq!(detector.apply(20.25), 0.0);
        assert_eq!(detector.apply(20.375), 0.0);
        assert_eq!(detector.baseline(), Some(20.375));
    }

    #[test]
    fn zero_threshold_reports_every_step() {
        let mut detector = ChangeDetector::new(0.0).unwrap();
        detector.apply(1.0);
        assert_eq!(detector.apply(1.0625), 0.0625);
    }

    #[test]
    fn rejects_negative_threshold() {
        assert!(ChangeDetector::new(-1.0).is_err());
    }

    #[test]
    fn reset_clears_baseline() {
        let mut detector = ChangeDetector::new(0.1).unwrap();
        detector.apply(10.0);
        detector.apply(12.0);

        detector.reset();

        assert_eq!(detector.apply(30.0), 0.0);
        assert_eq!(detector.changes(), 0);
    }
}
