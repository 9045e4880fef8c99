//! Game loop configuration.

use std::time::Duration;

use crate::types::GRAVITY_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Period of the gravity timer
    pub gravity_interval: Duration,
    /// Commands buffered before producers have to wait
    pub command_capacity: usize,
    /// Snapshots retained for a lagging subscriber before the oldest are dropped
    pub snapshot_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity_interval: Duration::from_millis(GRAVITY_MS),
            command_capacity: 16,
            snapshot_capacity: 64,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables, falling back to defaults
    ///
    /// - `BLOCKTRIS_GRAVITY_MS`
    /// - `BLOCKTRIS_COMMAND_CAPACITY`
    /// - `BLOCKTRIS_SNAPSHOT_CAPACITY`
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let gravity_interval = env::var("BLOCKTRIS_GRAVITY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.gravity_interval);

        let command_capacity = env::var("BLOCKTRIS_COMMAND_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.command_capacity);

        let snapshot_capacity = env::var("BLOCKTRIS_SNAPSHOT_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.snapshot_capacity);

        Self {
            gravity_interval,
            command_capacity,
            snapshot_capacity,
        }
    }

    pub fn with_gravity_interval(mut self, interval: Duration) -> Self {
        self.gravity_interval = interval;
        self
    }

    pub fn with_snapshot_capacity(mut self, capacity: usize) -> Self {
        self.snapshot_capacity = capacity;
        self
    }
}
