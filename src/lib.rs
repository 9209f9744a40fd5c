#![no_std]

mod config;
mod pipeline;
pub mod change_detector;
pub mod filters;
pub mod stats;
pub mod store;
pub mod ticks;

pub use config::{Config, ConfigError, MAX_STORE_CAPACITY, MAX_WINDOW_SIZE};
pub use pipeline::{DISCONNECTED_SENTINEL, Pipeline, Processed, ReadError, Reading};
pub use change_detector::ChangeDetector;
pub use filters::{FilterEngine, FilterKind, FilterState};
pub use stats::{Autocorrelation, DegenerateStatistics, NoiseStats, RunningStats, StatisticsEngine};
pub use store::{MeasurementRecord, MeasurementStore};
