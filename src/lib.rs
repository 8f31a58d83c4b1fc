//! # tickflow
//!
//! An in-process concurrent stream processing engine. Typed input records are
//! accepted through a bounded queue, processed concurrently by a fixed-size
//! worker pool running a pluggable [`ProcessingAlgorithm`], and published to a
//! bounded output queue for later retrieval.
//!
//! ## Features
//!
//! - **Queue-Based Backpressure**: both queues are bounded; submission and
//!   retrieval are non-blocking and rejection is a normal, countable condition
//! - **Caller-Runs Degradation**: when every worker is busy, the dispatch loop
//!   runs the task itself instead of buffering it, throttling intake
//! - **Sentinel Shutdown**: a record whose shutdown flag is set stops the
//!   dispatch loop through the ordinary input path
//! - **Lock-Free Keyed State**: the reference trading algorithm keeps one
//!   immutable price window per symbol, updated via optimistic
//!   compare-and-swap with retry instead of mutual exclusion
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rust_decimal::Decimal;
//! use tickflow::{AveragingAlgorithm, EngineConfig, Price, StreamEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let algorithm = AveragingAlgorithm::new(4, 800)?;
//!     let engine = Arc::new(StreamEngine::new(EngineConfig::default(), algorithm)?);
//!
//!     engine.submit_input(Price::new("ACME", Decimal::from(42)));
//!     engine.submit_input(Price::shutdown_signal());
//!
//!     let runner = {
//!         let engine = Arc::clone(&engine);
//!         tokio::spawn(async move { engine.run().await })
//!     };
//!     let report = runner.await??;
//!     println!("in-flight tasks completed: {}", report.completed_in_flight);
//!
//!     while let Some(trade) = engine.retrieve_output() {
//!         println!("{:?}", trade);
//!     }
//!     Ok(())
//! }
//! ```

pub mod tickflow;

// Re-export the main API at the crate root for easy access
pub use tickflow::engine::algorithm::{ProcessingAlgorithm, StreamInput};
pub use tickflow::engine::config::EngineConfig;
pub use tickflow::engine::metrics::MetricsSnapshot;
pub use tickflow::engine::queue::BoundedQueue;
pub use tickflow::engine::{EngineState, ShutdownReport, StreamEngine};
pub use tickflow::error::EngineError;
pub use tickflow::trading::{
    AveragingAlgorithm, Price, PriceWindow, Trade, TradeSide, WindowStore, WindowUpdate,
};
