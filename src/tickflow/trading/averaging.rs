//! Moving-average buy strategy
//!
//! The reference [`ProcessingAlgorithm`]: each price updates its symbol's
//! window through the store's compare-and-swap protocol, and a winning
//! snapshot whose rolling mean strictly exceeds the next-evicted value emits
//! a buy order at the just-observed price for a fixed quantity.

use log::trace;

use crate::tickflow::engine::algorithm::ProcessingAlgorithm;
use crate::tickflow::error::EngineError;

use super::store::{WindowStore, WindowUpdate};
use super::types::{Price, Trade, TradeSide};

/// Averaging strategy over per-symbol price windows.
pub struct AveragingAlgorithm {
    store: WindowStore,
    order_quantity: u32,
}

impl AveragingAlgorithm {
    /// `window_size` is the number of prices averaged per symbol;
    /// `order_quantity` the fixed size of every emitted order.
    pub fn new(window_size: usize, order_quantity: u32) -> Result<Self, EngineError> {
        Ok(Self {
            store: WindowStore::new(window_size)?,
            order_quantity,
        })
    }

    /// The per-symbol state store, for inspection.
    pub fn store(&self) -> &WindowStore {
        &self.store
    }
}

impl ProcessingAlgorithm<Price, Trade> for AveragingAlgorithm {
    fn process(&self, price: &Price) -> Option<Trade> {
        match self.store.update(price.symbol(), price.value()) {
            WindowUpdate::FirstObservation => None,
            WindowUpdate::Applied(window) => {
                if window.signal() {
                    trace!(
                        "buy signal for {}: mean {:?} above next-evicted {:?}",
                        price.symbol(),
                        window.average(),
                        window.oldest()
                    );
                    Some(Trade::new(
                        price.symbol(),
                        TradeSide::Buy,
                        price.value(),
                        self.order_quantity,
                    ))
                } else {
                    None
                }
            }
        }
    }
}
