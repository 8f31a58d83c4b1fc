//! Immutable per-symbol price windows
//!
//! A window is a snapshot value: updating it builds a successor instead of
//! mutating in place, which is what lets [`WindowStore`](super::WindowStore)
//! swap windows atomically and retry on contention.

use std::collections::VecDeque;

use rust_decimal::Decimal;

/// Bounded recent price history for one symbol, with its derived aggregates.
///
/// The rolling `average` and the `oldest` retained value are only defined
/// once an insertion has evicted — that is, once the window has been full.
/// Until then the window cannot signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceWindow {
    prices: VecDeque<Decimal>,
    window_size: usize,
    average: Option<Decimal>,
    oldest: Option<Decimal>,
}

impl PriceWindow {
    /// Single-element window created on the first observation of a symbol.
    pub fn seed(window_size: usize, first: Decimal) -> Self {
        let mut prices = VecDeque::with_capacity(window_size + 1);
        prices.push_back(first);
        Self {
            prices,
            window_size,
            average: None,
            oldest: None,
        }
    }

    /// Successor snapshot with `price` appended.
    ///
    /// Once the sequence would exceed the window size, the front is evicted
    /// and the aggregates recomputed: `average` is the mean of the retained
    /// prices and `oldest` the value the *next* insertion will evict.
    ///
    /// The mean divides with `rust_decimal` semantics: exact up to 28
    /// significant digits, round-half-even on non-terminating quotients.
    /// No floating point is involved anywhere in the window.
    pub fn with_price(&self, price: Decimal) -> Self {
        let mut prices = self.prices.clone();
        prices.push_back(price);
        let mut average = None;
        let mut oldest = None;
        if prices.len() > self.window_size {
            prices.pop_front();
            let sum: Decimal = prices.iter().copied().sum();
            average = Some(sum / Decimal::from(self.window_size as u64));
            oldest = prices.front().copied();
        }
        Self {
            prices,
            window_size: self.window_size,
            average,
            oldest,
        }
    }

    /// True once the window has been full and its aggregates are defined.
    pub fn is_ready(&self) -> bool {
        self.average.is_some()
    }

    /// Whether the rolling mean strictly exceeds the next value to be
    /// evicted. Always false before the window is ready.
    pub fn signal(&self) -> bool {
        match (self.average, self.oldest) {
            (Some(average), Some(oldest)) => average > oldest,
            _ => false,
        }
    }

    pub fn average(&self) -> Option<Decimal> {
        self.average
    }

    pub fn oldest(&self) -> Option<Decimal> {
        self.oldest
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Retained prices, oldest first.
    pub fn prices(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.prices.iter().copied()
    }
}
