//! Bounded, arrival-ordered measurement history.

use heapless::Vec;

use crate::config::{ConfigError, MAX_STORE_CAPACITY, check_capacity};

/// One accepted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementRecord {
    /// Monotonic timestamp of the reading, in milliseconds
    pub timestamp_ms: u64,
    pub raw: f32,
    pub filtered: f32,
    /// Reported change, `0.0` when below the detection threshold
    pub delta: f32,
}

/// Append-only record store with a fixed capacity.
///
/// Once `capacity` records are held, further appends are rejected and the
/// store is left untouched.
#[derive(Debug, Clone)]
pub struct MeasurementStore {
    records: Vec<MeasurementRecord, MAX_STORE_CAPACITY>,
    capacity: usize,
}

impl MeasurementStore {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            records: Vec::new(),
            capacity,
        })
    }

    /// Returns `false` if the store is already full.
    pub fn append(&mut self, record: MeasurementRecord) -> bool {
        if self.is_full() {
            return false;
        }
        self.records.push(record).is_ok()
    }

    pub fn read(&self, index: usize) -> Option<&MeasurementRecord> {
        self.records.get(index)
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// The filtered series in arrival order.
    pub fn filtered(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.records.iter().map(|record| record.filtered)
    }
}
