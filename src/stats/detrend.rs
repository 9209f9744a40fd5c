use num_traits::float::FloatCore;

use super::DegenerateStatistics;
use crate::store::MeasurementRecord;

/// Fewest records a linear fit is attempted on.
pub const DETREND_MIN_SAMPLES: usize = 10;

/// Least-squares line `intercept + slope * index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearTrend {
    /// Ordinary least squares of `series` against its index `0..n`.
    pub fn fit(series: impl Iterator<Item = f64>) -> Result<Self, DegenerateStatistics> {
        let mut n = 0.0_f64;
        let mut sum_x = 0.0_f64;
        let mut sum_y = 0.0_f64;
        let mut sum_xy = 0.0_f64;
        let mut sum_xx = 0.0_f64;

        for (i, y) in series.enumerate() {
            let x = i as f64;
            n += 1.0;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        if FloatCore::abs(denominator) < f64::EPSILON {
            return Err(DegenerateStatistics::SingularRegression);
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        Ok(Self { intercept, slope })
    }

    #[inline]
    pub fn predict(&self, index: usize) -> f64 {
        self.intercept + self.slope * index as f64
    }
}

/// Residual statistics of a detrended series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub sum_sq: f64,
    pub count: usize,
    /// The line that was removed
    pub trend: LinearTrend,
}

impl NoiseStats {
    fn new(trend: LinearTrend) -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            sum_sq: 0.0,
            count: 0,
            trend,
        }
    }

    fn push(&mut self, residual: f64) {
        self.min = self.min.min(residual);
        self.max = self.max.max(residual);
        self.sum += residual;
        self.sum_sq += residual * residual;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Population variance of the residuals.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        (self.sum_sq / self.count as f64 - mean * mean).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        libm::sqrt(self.variance())
    }

    pub fn rms(&self) -> f64 {
        libm::sqrt(self.sum_sq / self.count as f64)
    }

    /// Peak-to-peak residual spread.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

pub(crate) fn detrend(records: &[MeasurementRecord]) -> Result<NoiseStats, DegenerateStatistics> {
    if records.len() < DETREND_MIN_SAMPLES {
        return Err(DegenerateStatistics::InsufficientSamples {
            required: DETREND_MIN_SAMPLES,
            available: records.len(),
        });
    }

    let series = || records.iter().map(|record| f64::from(record.filtered));
    let trend = LinearTrend::fit(series())?;

    let mut noise = NoiseStats::new(trend);
    for (i, y) in series().enumerate() {
        noise.push(y - trend.predict(i));
    }
    Ok(noise)
}
