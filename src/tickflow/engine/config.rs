//! Engine configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tickflow::error::EngineError;

/// Sizing and shutdown parameters for a [`StreamEngine`](super::StreamEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Capacity of the input queue and of the output queue.
    pub queue_capacity: usize,
    /// Number of concurrent worker tasks. Submissions beyond this run on the
    /// dispatch loop itself (caller-runs degradation).
    pub worker_count: usize,
    /// How long shutdown waits for in-flight tasks before abandoning them.
    pub shutdown_grace: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            worker_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            shutdown_grace: Duration::from_secs(8),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.queue_capacity == 0 {
            return Err(EngineError::invalid_config(
                "queue_capacity must be at least 1",
            ));
        }
        if self.worker_count == 0 {
            return Err(EngineError::invalid_config(
                "worker_count must be at least 1",
            ));
        }
        Ok(())
    }
}
