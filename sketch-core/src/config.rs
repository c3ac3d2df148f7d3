//! History sizing configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshots kept before the oldest one is evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

fn default_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), HistoryConfigError> {
        if self.capacity == 0 {
            tracing::error!("history capacity must be at least 1");
            return Err(HistoryConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryConfigError {
    #[error("history capacity must be at least 1")]
    ZeroCapacity,
}
