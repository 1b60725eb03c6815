//! Failover publisher and replayer configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Default number of records read per consume call.
pub const DEFAULT_FAILOVER_BATCH_SIZE: usize = 200;

const MAX_BATCH_SIZE: usize = 1000;

/// What consume does with a record that cannot be deserialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayFailurePolicy {
    /// Log the record, leave it stored and continue with the rest of the batch.
    #[default]
    Skip,
    /// Abort the batch with the deserialization error.
    Fail,
}

/// Failover configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FailoverConfig {
    /// Max records read per consume call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// What consume does with records that cannot be deserialized (`skip` or `fail`)
    #[serde(default)]
    pub replay_policy: ReplayFailurePolicy,

    /// Replayer poll interval in milliseconds
    #[serde(default = "default_replay_interval")]
    pub replay_interval_ms: u64,
}

impl FailoverConfig {
    /// Get replay interval as Duration
    pub fn replay_interval(&self) -> Duration {
        Duration::from_millis(self.replay_interval_ms)
    }

    /// Validate failover configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(ValidationError::InvalidBatchSize(self.batch_size));
        }
        if self.replay_interval_ms == 0 {
            return Err(ValidationError::InvalidReplayInterval);
        }
        Ok(())
    }
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            replay_policy: ReplayFailurePolicy::default(),
            replay_interval_ms: default_replay_interval(),
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_FAILOVER_BATCH_SIZE
}

fn default_replay_interval() -> u64 {
    1000
}
