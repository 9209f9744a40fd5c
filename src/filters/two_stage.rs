use super::ema::EmaFilter;
use super::median::MedianFilter;

/// Smoothing coefficient of the second stage.
pub const TWO_STAGE_ALPHA: f32 = 0.4;

/// Median filter followed by exponential smoothing.
///
/// The median stage strips isolated spikes, the smoothing stage is seeded by
/// the first median output. The stages share no state.
#[derive(Debug, Clone)]
pub struct TwoStageFilter {
    median: MedianFilter,
    smoother: EmaFilter,
}

impl TwoStageFilter {
    pub fn new(window_size: usize) -> Self {
        Self {
            median: MedianFilter::new(window_size),
            smoother: EmaFilter::new(TWO_STAGE_ALPHA),
        }
    }

    pub fn apply(&mut self, input: f32) -> f32 {
        let median = self.median.apply(input);
        self.smoother.apply(median)
    }

    pub fn median(&self) -> &MedianFilter {
        &self.median
    }

    pub fn reset(&mut self) {
        self.median.reset();
        self.smoother.reset();
    }
}
