//! Running aggregates and on-demand noise analysis.
//!
//! Running statistics are maintained per accepted record. Detrending and
//! autocorrelation are recomputed from the whole stored series on every call
//! and keep no state between calls.

mod autocorrelation;
mod detrend;

pub use autocorrelation::{
    AUTOCORRELATION_MIN_SAMPLES, Autocorrelation, MAX_LAGS, MIN_VARIANCE, SIGNIFICANT_CORRELATION,
    is_significant,
};
pub use detrend::{DETREND_MIN_SAMPLES, LinearTrend, NoiseStats};

use log::debug;
use thiserror::Error;

use crate::store::MeasurementStore;

/// The stored series cannot support the requested statistic yet.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateStatistics {
    #[error("need at least {required} samples, have {available}")]
    InsufficientSamples { required: usize, available: usize },

    #[error("series variance {variance} is too small to normalize")]
    NearZeroVariance { variance: f64 },

    #[error("regression denominator is zero")]
    SingularRegression,
}

/// Min, max and sum of the raw and filtered series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningStats {
    min_raw: f32,
    max_raw: f32,
    min_filtered: f32,
    max_filtered: f32,
    sum_raw: f64,
    sum_filtered: f64,
    count: usize,
}

impl RunningStats {
    pub const fn new() -> Self {
        Self {
            min_raw: f32::INFINITY,
            max_raw: f32::NEG_INFINITY,
            min_filtered: f32::INFINITY,
            max_filtered: f32::NEG_INFINITY,
            sum_raw: 0.0,
            sum_filtered: 0.0,
            count: 0,
        }
    }

    pub fn update(&mut self, raw: f32, filtered: f32) {
        self.min_raw = self.min_raw.min(raw);
        self.max_raw = self.max_raw.max(raw);
        self.min_filtered = self.min_filtered.min(filtered);
        self.max_filtered = self.max_filtered.max(filtered);
        self.sum_raw += f64::from(raw);
        self.sum_filtered += f64::from(filtered);
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn min_raw(&self) -> Option<f32> {
        self.any().then_some(self.min_raw)
    }

    pub fn max_raw(&self) -> Option<f32> {
        self.any().then_some(self.max_raw)
    }

    pub fn min_filtered(&self) -> Option<f32> {
        self.any().then_some(self.min_filtered)
    }

    pub fn max_filtered(&self) -> Option<f32> {
        self.any().then_some(self.max_filtered)
    }

    pub fn sum_raw(&self) -> f64 {
        self.sum_raw
    }

    pub fn sum_filtered(&self) -> f64 {
        self.sum_filtered
    }

    pub fn mean_raw(&self) -> Option<f64> {
        self.any().then(|| self.sum_raw / self.count as f64)
    }

    pub fn mean_filtered(&self) -> Option<f64> {
        self.any().then(|| self.sum_filtered / self.count as f64)
    }

    pub fn raw_span(&self) -> Option<f32> {
        self.any().then(|| self.max_raw - self.min_raw)
    }

    pub fn filtered_span(&self) -> Option<f32> {
        self.any().then(|| self.max_filtered - self.min_filtered)
    }

    /// `1 - filtered_span / raw_span`; `None` until the raw series has spread.
    pub fn noise_reduction(&self) -> Option<f32> {
        let raw = self.raw_span().filter(|&span| span > 0.0)?;
        let filtered = self.filtered_span()?;
        Some(1.0 - filtered / raw)
    }

    fn any(&self) -> bool {
        self.count > 0
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticsEngine {
    running: RunningStats,
}

impl StatisticsEngine {
    pub const fn new() -> Self {
        Self {
            running: RunningStats::new(),
        }
    }

    /// Call once per record accepted by the store.
    #[inline]
    pub fn update(&mut self, raw: f32, filtered: f32) {
        self.running.update(raw, filtered);
    }

    pub fn running(&self) -> &RunningStats {
        &self.running
    }

    /// Remove the least-squares line from the filtered series and summarize
    /// the residuals.
    pub fn detrend(&self, store: &MeasurementStore) -> Result<NoiseStats, DegenerateStatistics> {
        detrend::detrend(store.records()).inspect_err(|err| debug!("detrend skipped: {err}"))
    }

    /// Autocorrelation of the filtered series for lags `1..=min(max_lags, count / 4)`.
    pub fn autocorrelation(
        &self,
        store: &MeasurementStore,
        max_lags: usize,
    ) -> Result<Autocorrelation, DegenerateStatistics> {
        autocorrelation::autocorrelation(store.records(), max_lags)
            .inspect_err(|err| debug!("autocorrelation skipped: {err}"))
    }
}
