/// Smoothing coefficient used by the exponential smoothing strategy.
pub const EMA_ALPHA: f32 = 0.3;

/// Exponential smoothing filter state
#[derive(Debug, Clone, Copy)]
pub struct EmaFilter {
    alpha: f32,
    previous: f32,
    initialized: bool,
}

impl EmaFilter {
    /// Create new EMA filter with uninitialized state
    pub const fn new(alpha: f32) -> Self {
        Self {
            alpha,
            previous: 0.0,
            initialized: false,
        }
    }

    /// Apply EMA filter: output = alpha * input + (1 - alpha) * previous
    ///
    /// First call seeds the filter with the input value.
    pub fn apply(&mut self, input: f32) -> f32 {
        debug_assert!(
            self.alpha > 0.0 && self.alpha <= 1.0,
            "EMA alpha must be in range (0.0, 1.0], got {}",
            self.alpha
        );

        if !self.initialized {
            self.previous = input;
            self.initialized = true;
            return input;
        }

        let output = self.alpha * input + (1.0 - self.alpha) * self.previous;
        self.previous = output;
        output
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.initialized = false;
        self.previous = 0.0;
    }
}

impl Default for EmaFilter {
    fn default() -> Self {
        Self::new(EMA_ALPHA)
    }
}
