//! Error types for engine construction and lifecycle
//!
//! The runtime surface deliberately has very few failure modes: a full queue
//! is reported through a `bool`/`Option` return rather than an error, and a
//! contended state update is retried internally. What remains is
//! misconfiguration and lifecycle misuse.

/// Errors surfaced by the engine and the reference algorithm.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A configuration value is outside its valid range
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// `run` was invoked on an engine that already left the `Idle` state
    #[error("engine has already been started")]
    AlreadyStarted,
}

impl EngineError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
