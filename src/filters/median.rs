use heapless::Vec;

use crate::config::MAX_WINDOW_SIZE;

/// Running median filter state
///
/// The first sample seeds every slot of the window, so early outputs stay
/// pinned to that seed until enough new samples have overwritten it.
/// For even window sizes the upper median is returned; values are never
/// interpolated.
#[derive(Debug, Clone)]
pub struct MedianFilter {
    buffer: Vec<f32, MAX_WINDOW_SIZE>,
    window_size: usize,
    index: usize,
}

impl MedianFilter {
    /// Create new median filter
    ///
    /// window_size must be > 0 and <= MAX_WINDOW_SIZE
    pub fn new(window_size: usize) -> Self {
        debug_assert!(window_size > 0 && window_size <= MAX_WINDOW_SIZE);

        Self {
            buffer: Vec::new(),
            window_size: window_size.clamp(1, MAX_WINDOW_SIZE),
            index: 0,
        }
    }

    pub fn apply(&mut self, input: f32) -> f32 {
        if self.buffer.is_empty() {
            // Seeding leaves the insert position at the start of the window
            for _ in 0..self.window_size {
                let _ = self.buffer.push(input);
            }
        } else {
            self.buffer[self.index] = input;
            self.index = (self.index + 1) % self.window_size;
        }

        let mut scratch = self.buffer.clone();
        scratch.sort_unstable_by(f32::total_cmp);
        scratch[self.window_size / 2]
    }

    /// Current window contents in storage order.
    pub fn window(&self) -> &[f32] {
        &self.buffer
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.index = 0;
    }
}
