use thiserror::Error;

use crate::filters::FilterKind;

/// Largest filter window any strategy can be configured with.
pub const MAX_WINDOW_SIZE: usize = 15;

/// Largest number of records a measurement store can hold.
pub const MAX_STORE_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("window size {window_size} must be between 1 and {max}")]
    InvalidWindowSize { window_size: usize, max: usize },

    #[error("change threshold {threshold} must be finite and non-negative")]
    InvalidThreshold { threshold: f32 },

    #[error("store capacity {capacity} must be between 1 and {max}")]
    InvalidCapacity { capacity: usize, max: usize },
}

/// Pipeline configuration. Validated once, fixed for the lifetime of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub filter: FilterKind,
    pub window_size: usize,
    pub change_threshold: f32,
    pub capacity: usize,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_window_size(self.window_size)?;
        check_threshold(self.change_threshold)?;
        check_capacity(self.capacity)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: FilterKind::default(),
            window_size: 5,
            change_threshold: 0.1,
            capacity: 100,
        }
    }
}

pub(crate) fn check_window_size(window_size: usize) -> Result<(), ConfigError> {
    if window_size == 0 || window_size > MAX_WINDOW_SIZE {
        return Err(ConfigError::InvalidWindowSize {
            window_size,
            max: MAX_WINDOW_SIZE,
        });
    }
    Ok(())
}

pub(crate) fn check_threshold(threshold: f32) -> Result<(), ConfigError> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ConfigError::InvalidThreshold { threshold });
    }
    Ok(())
}

pub(crate) fn check_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 || capacity > MAX_STORE_CAPACITY {
        return Err(ConfigError::InvalidCapacity {
            capacity,
            max: MAX_STORE_CAPACITY,
        });
    }
    Ok(())
}
