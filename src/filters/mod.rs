//! Signal conditioning strategies
//!
//! Every strategy owns its own state and shares the same `apply(value) -> value`
//! contract. The first call on a fresh instance always returns its input.

#[cfg(feature = "filter-ema")]
mod ema;

#[cfg(feature = "filter-median")]
mod median;

#[cfg(feature = "filter-moving-avg")]
mod moving_avg;

#[cfg(feature = "filter-two-stage")]
mod two_stage;

#[cfg(feature = "filter-ema")]
pub use ema::{EMA_ALPHA, EmaFilter};

#[cfg(feature = "filter-median")]
pub use median::MedianFilter;

#[cfg(feature = "filter-moving-avg")]
pub use moving_avg::MovingAvgFilter;

#[cfg(feature = "filter-two-stage")]
pub use two_stage::{TWO_STAGE_ALPHA, TwoStageFilter};

use crate::config::{ConfigError, check_window_size};

/// Filter strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterKind {
    /// No filtering applied
    None,

    /// Median over the window, seeded with the first sample
    #[cfg(feature = "filter-median")]
    Median,

    /// Fixed-point sliding average; raw passthrough until the window fills
    #[cfg(feature = "filter-moving-avg")]
    MovingAverage,

    /// Exponential smoothing with alpha = 0.3
    #[cfg(feature = "filter-ema")]
    ExponentialSmoothing,

    /// Median followed by exponential smoothing with alpha = 0.4
    #[cfg(feature = "filter-two-stage")]
    TwoStage,
}

impl Default for FilterKind {
    fn default() -> Self {
        #[cfg(feature = "filter-moving-avg")]
        {
            FilterKind::MovingAverage
        }
        #[cfg(not(feature = "filter-moving-avg"))]
        {
            FilterKind::None
        }
    }
}

/// Per-strategy filter state
#[derive(Debug, Clone)]
pub enum FilterState {
    None,

    #[cfg(feature = "filter-median")]
    Median(MedianFilter),

    #[cfg(feature = "filter-moving-avg")]
    MovingAverage(MovingAvgFilter),

    #[cfg(feature = "filter-ema")]
    ExponentialSmoothing(EmaFilter),

    #[cfg(feature = "filter-two-stage")]
    TwoStage(TwoStageFilter),
}

impl FilterState {
    #[allow(unused_variables)]
    fn new(kind: FilterKind, window_size: usize) -> Self {
        match kind {
            FilterKind::None => FilterState::None,

            #[cfg(feature = "filter-median")]
            FilterKind::Median => FilterState::Median(MedianFilter::new(window_size)),

            #[cfg(feature = "filter-moving-avg")]
            FilterKind::MovingAverage => {
                FilterState::MovingAverage(MovingAvgFilter::new(window_size))
            }

            #[cfg(feature = "filter-ema")]
            FilterKind::ExponentialSmoothing => {
                FilterState::ExponentialSmoothing(EmaFilter::new(EMA_ALPHA))
            }

            #[cfg(feature = "filter-two-stage")]
            FilterKind::TwoStage => FilterState::TwoStage(TwoStageFilter::new(window_size)),
        }
    }

    fn apply(&mut self, input: f32) -> f32 {
        match self {
            FilterState::None => input,

            #[cfg(feature = "filter-median")]
            FilterState::Median(filter) => filter.apply(input),

            #[cfg(feature = "filter-moving-avg")]
            FilterState::MovingAverage(filter) => filter.apply(input),

            #[cfg(feature = "filter-ema")]
            FilterState::ExponentialSmoothing(filter) => filter.apply(input),

            #[cfg(feature = "filter-two-stage")]
            FilterState::TwoStage(filter) => filter.apply(input),
        }
    }
}

/// Applies the configured strategy to each raw reading.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    kind: FilterKind,
    window_size: usize,
    state: FilterState,
}

impl FilterEngine {
    /// Window size is checked for every strategy, including those that ignore it.
    pub fn new(kind: FilterKind, window_size: usize) -> Result<Self, ConfigError> {
        check_window_size(window_size)?;
        Ok(Self {
            kind,
            window_size,
            state: FilterState::new(kind, window_size),
        })
    }

    #[inline]
    pub fn apply(&mut self, raw: f32) -> f32 {
        self.state.apply(raw)
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Discard all history; the next call seeds the filter again.
    pub fn reset(&mut self) {
        self.state = FilterState::new(self.kind, self.window_size);
    }
}
