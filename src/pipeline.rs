use log::{debug, info, warn};
use thiserror::Error;

use crate::change_detector::ChangeDetector;
use crate::config::{Config, ConfigError};
use crate::filters::FilterEngine;
use crate::stats::{Autocorrelation, DegenerateStatistics, NoiseStats, RunningStats, StatisticsEngine};
use crate::store::{MeasurementRecord, MeasurementStore};

/// Value the sensor reports when it is not on the bus.
pub const DISCONNECTED_SENTINEL: f32 = -127.0;

/// A single sensor sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub raw: f32,
    /// Monotonic timestamp, in milliseconds
    pub timestamp_ms: u64,
}

impl Reading {
    pub const fn new(raw: f32, timestamp_ms: u64) -> Self {
        Self { raw, timestamp_ms }
    }

    pub const fn disconnected(timestamp_ms: u64) -> Self {
        Self::new(DISCONNECTED_SENTINEL, timestamp_ms)
    }

    fn checked_raw(&self) -> Result<f32, ReadError> {
        if self.raw == DISCONNECTED_SENTINEL {
            return Err(ReadError::Disconnected {
                timestamp_ms: self.timestamp_ms,
            });
        }
        if !self.raw.is_finite() {
            return Err(ReadError::NonFinite {
                timestamp_ms: self.timestamp_ms,
            });
        }
        Ok(self.raw)
    }
}

/// A reading that could not be used. The cycle is skipped; nothing is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("sensor disconnected at {timestamp_ms} ms")]
    Disconnected { timestamp_ms: u64 },

    #[error("sensor returned a non-finite value at {timestamp_ms} ms")]
    NonFinite { timestamp_ms: u64 },
}

/// Outcome of a usable reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Processed {
    Accepted(MeasurementRecord),
    /// The store was already at capacity; the run is over.
    StoreFull,
}

/// Filter, change detection, storage and statistics for one sensor stream.
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    filter: FilterEngine,
    detector: ChangeDetector,
    store: MeasurementStore,
    stats: StatisticsEngine,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config
            .validate()
            .inspect_err(|err| warn!("rejecting configuration: {err}"))?;

        Ok(Self {
            config,
            filter: FilterEngine::new(config.filter, config.window_size)?,
            detector: ChangeDetector::new(config.change_threshold)?,
            store: MeasurementStore::new(config.capacity)?,
            stats: StatisticsEngine::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one reading through filter, change detection, storage and running
    /// statistics, in that order.
    pub fn process(&mut self, reading: Reading) -> Result<Processed, ReadError> {
        let raw = reading
            .checked_raw()
            .inspect_err(|err| warn!("skipping sample: {err}"))?;

        if self.store.is_full() {
            return Ok(Processed::StoreFull);
        }

        let filtered = self.filter.apply(raw);
        let delta = self.detector.apply(filtered);
        let record = MeasurementRecord {
            timestamp_ms: reading.timestamp_ms,
            raw,
            filtered,
            delta,
        };

        if !self.store.append(record) {
            return Ok(Processed::StoreFull);
        }
        self.stats.update(raw, filtered);

        debug!(
            "sample {} at {} ms: raw={} filtered={} delta={}",
            self.store.count(),
            record.timestamp_ms,
            raw,
            filtered,
            delta
        );
        if self.store.is_full() {
            info!("measurement store full after {} samples", self.store.count());
        }

        Ok(Processed::Accepted(record))
    }

    /// True once the store has reached capacity.
    pub fn is_complete(&self) -> bool {
        self.store.is_full()
    }

    pub fn filter(&self) -> &FilterEngine {
        &self.filter
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    pub fn store(&self) -> &MeasurementStore {
        &self.store
    }

    pub fn running_stats(&self) -> &RunningStats {
        self.stats.running()
    }

    pub fn detrend(&self) -> Result<NoiseStats, DegenerateStatistics> {
        self.stats.detrend(&self.store)
    }

    pub fn autocorrelation(&self, max_lags: usize) -> Result<Autocorrelation, DegenerateStatistics> {
        self.stats.autocorrelation(&self.store, max_lags)
    }
}
