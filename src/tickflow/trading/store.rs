//! Keyed window store with optimistic concurrency
//!
//! One entry per symbol, holding the symbol's current [`PriceWindow`]
//! snapshot behind an `Arc`. Updates follow a compare-and-swap protocol:
//! read the current snapshot, build its successor, then install it only if
//! the entry still holds the snapshot that was read. A concurrent update
//! that got there first makes the swap fail, and the loser re-reads and
//! retries. Exactly one update wins against any given predecessor, which
//! serializes the logical history of each symbol without any lock being held
//! while the successor is computed.
//!
//! Entries for different symbols live in different shards of the map and
//! never contend with each other.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::tickflow::error::EngineError;

use super::window::PriceWindow;

/// Result of a store update.
#[derive(Debug, Clone)]
pub enum WindowUpdate {
    /// The symbol had never been seen; a single-element window was seeded.
    /// The first observation never produces a result.
    FirstObservation,
    /// The update won its swap; this is the snapshot that was installed.
    Applied(Arc<PriceWindow>),
}

/// Mapping from symbol to its current window snapshot.
#[derive(Debug)]
pub struct WindowStore {
    windows: DashMap<String, Arc<PriceWindow>>,
    window_size: usize,
}

impl WindowStore {
    pub fn new(window_size: usize) -> Result<Self, EngineError> {
        if window_size == 0 {
            return Err(EngineError::invalid_config(
                "window_size must be at least 1",
            ));
        }
        Ok(Self {
            windows: DashMap::new(),
            window_size,
        })
    }

    /// Apply one price to the symbol's window, retrying until the swap wins.
    ///
    /// Retries are unbounded and carry no backoff: contention is per-symbol
    /// and transient, and the successor computation is cheap enough to
    /// simply redo against the fresh snapshot.
    pub fn update(&self, symbol: &str, price: Decimal) -> WindowUpdate {
        loop {
            let observed = match self.windows.get(symbol) {
                Some(current) => Arc::clone(current.value()),
                None => match self.windows.entry(symbol.to_string()) {
                    Entry::Vacant(slot) => {
                        slot.insert(Arc::new(PriceWindow::seed(self.window_size, price)));
                        return WindowUpdate::FirstObservation;
                    }
                    // Lost the seeding race; take the swap path against
                    // whatever the winner installed.
                    Entry::Occupied(_) => continue,
                },
            };

            // No guard is held here: the successor is computed against the
            // observed snapshot only, and the swap below re-checks identity.
            let candidate = Arc::new(observed.with_price(price));

            let won = match self.windows.get_mut(symbol) {
                Some(mut current) => {
                    if Arc::ptr_eq(current.value(), &observed) {
                        *current.value_mut() = Arc::clone(&candidate);
                        true
                    } else {
                        false
                    }
                }
                None => false,
            };
            if won {
                return WindowUpdate::Applied(candidate);
            }
        }
    }

    /// Current snapshot for a symbol, if it has been observed.
    pub fn snapshot(&self, symbol: &str) -> Option<Arc<PriceWindow>> {
        self.windows.get(symbol).map(|e| Arc::clone(e.value()))
    }

    /// Symbols with a tracked window, in no particular order.
    pub fn tracked_symbols(&self) -> Vec<String> {
        self.windows.iter().map(|e| e.key().clone()).collect()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}
