//! Processing capability traits
//!
//! The engine is generic over its record types; inputs only need to expose
//! the shutdown flag that carries the sentinel convention, and algorithms are
//! plain synchronous functions from input to optional output.

/// Capability required of every engine input record.
pub trait StreamInput: Send + 'static {
    /// True for the sentinel record that asks the engine to shut down.
    fn is_shutdown(&self) -> bool;
}

/// A pluggable processing function applied to each input record.
///
/// Implementations must be safe to invoke concurrently from multiple workers,
/// including for inputs sharing the same stream key; any per-key state the
/// algorithm keeps is its own responsibility to keep consistent (see
/// [`WindowStore`](crate::tickflow::trading::WindowStore) for the reference
/// approach).
pub trait ProcessingAlgorithm<I, O>: Send + Sync + 'static {
    /// Build an output from the input, or `None` when the record produces no
    /// result.
    fn process(&self, input: &I) -> Option<O>;
}
