use heapless::Vec;

use crate::config::MAX_WINDOW_SIZE;
use crate::ticks::{from_ticks, rounded_mean, to_ticks};

/// Fixed-point moving average filter state
///
/// Samples are held as sensor ticks (1/16 unit). While the window is still
/// filling, inputs pass through unfiltered. Once `window_size` ticks have been
/// collected the filter switches permanently to a sliding average, rounded to
/// the nearest tick.
#[derive(Debug, Clone)]
pub struct MovingAvgFilter {
    buffer: Vec<i32, MAX_WINDOW_SIZE>,
    window_size: usize,
    index: usize,
    sum: i64,
}

impl MovingAvgFilter {
    /// Create new moving average filter
    ///
    /// window_size must be > 0 and <= MAX_WINDOW_SIZE
    pub fn new(window_size: usize) -> Self {
        debug_assert!(window_size > 0 && window_size <= MAX_WINDOW_SIZE);

        Self {
            buffer: Vec::new(),
            window_size: window_size.clamp(1, MAX_WINDOW_SIZE),
            index: 0,
            sum: 0,
        }
    }

    pub fn apply(&mut self, input: f32) -> f32 {
        let tick = to_ticks(input);

        if !self.is_primed() {
            let _ = self.buffer.push(tick);
            self.sum += i64::from(tick);
            return input;
        }

        let oldest = core::mem::replace(&mut self.buffer[self.index], tick);
        self.sum += i64::from(tick) - i64::from(oldest);
        self.index = (self.index + 1) % self.window_size;

        from_ticks(rounded_mean(self.sum, self.window_size))
    }

    /// True once the window is full and outputs are averaged.
    pub fn is_primed(&self) -> bool {
        self.buffer.len() == self.window_size
    }

    /// Running sum of the window, in ticks.
    pub fn sum_ticks(&self) -> i64 {
        self.sum
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.index = 0;
        self.sum = 0;
    }
}
