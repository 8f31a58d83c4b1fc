//! Reference trading algorithm and its value types
//!
//! A moving-average strategy over per-symbol price windows: once a symbol's
//! window is full, a buy signal fires whenever the rolling mean strictly
//! exceeds the value about to leave the window. Per-symbol state lives in a
//! [`WindowStore`] updated by optimistic compare-and-swap, so workers never
//! hold a lock while the algorithm runs.

pub mod averaging;
pub mod store;
pub mod types;
pub mod window;

pub use averaging::AveragingAlgorithm;
pub use store::{WindowStore, WindowUpdate};
pub use types::{Price, Trade, TradeSide};
pub use window::PriceWindow;
