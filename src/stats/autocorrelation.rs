use heapless::Vec;
use num_traits::float::FloatCore;

use super::DegenerateStatistics;
use crate::config::MAX_STORE_CAPACITY;
use crate::store::MeasurementRecord;

/// Fewest records the autocorrelation is computed over.
pub const AUTOCORRELATION_MIN_SAMPLES: usize = 20;

/// Most lags ever produced; lags are capped at a quarter of the series.
pub const MAX_LAGS: usize = MAX_STORE_CAPACITY / 4;

/// Variance below which the series is treated as constant.
pub const MIN_VARIANCE: f64 = 1e-6;

/// Coefficients beyond this magnitude indicate non-white noise.
pub const SIGNIFICANT_CORRELATION: f64 = 0.3;

#[inline]
pub fn is_significant(coefficient: f64) -> bool {
    FloatCore::abs(coefficient) > SIGNIFICANT_CORRELATION
}

/// Normalized sample autocorrelation, lag 1 first.
#[derive(Debug, Clone, PartialEq)]
pub struct Autocorrelation {
    coefficients: Vec<f64, MAX_LAGS>,
    mean: f64,
    variance: f64,
}

impl Autocorrelation {
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficient at `lag`, counted from 1.
    pub fn lag(&self, lag: usize) -> Option<f64> {
        lag.checked_sub(1)
            .and_then(|i| self.coefficients.get(i))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Largest coefficient magnitude, `0.0` when no lags were computed.
    pub fn max_abs(&self) -> f64 {
        self.coefficients
            .iter()
            .fold(0.0_f64, |acc, &c| acc.max(FloatCore::abs(c)))
    }

    /// `(lag, coefficient)` pairs above the significance threshold.
    pub fn significant_lags(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.coefficients
            .iter()
            .enumerate()
            .filter(|&(_, &c)| is_significant(c))
            .map(|(i, &c)| (i + 1, c))
    }

    pub fn is_white_noise(&self) -> bool {
        self.significant_lags().next().is_none()
    }
}

pub(crate) fn autocorrelation(
    records: &[MeasurementRecord],
    max_lags: usize,
) -> Result<Autocorrelation, DegenerateStatistics> {
    let n = records.len();
    if n < AUTOCORRELATION_MIN_SAMPLES {
        return Err(DegenerateStatistics::InsufficientSamples {
            required: AUTOCORRELATION_MIN_SAMPLES,
            available: n,
        });
    }

    let y = |i: usize| f64::from(records[i].filtered);

    let mean = (0..n).map(y).sum::<f64>() / n as f64;
    let variance = (0..n).map(|i| (y(i) - mean) * (y(i) - mean)).sum::<f64>() / n as f64;
    if variance < MIN_VARIANCE {
        return Err(DegenerateStatistics::NearZeroVariance { variance });
    }

    let lags = max_lags.min(n / 4).min(MAX_LAGS);
    let mut coefficients = Vec::new();
    for k in 1..=lags {
        let covariance: f64 = (0..n - k).map(|i| (y(i) - mean) * (y(i + k) - mean)).sum();
        let _ = coefficients.push(covariance / ((n - k) as f64 * variance));
    }

    Ok(Autocorrelation {
        coefficients,
        mean,
        variance,
    })
}
