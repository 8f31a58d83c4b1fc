//! Price and trade value objects
//!
//! Plain immutable data carriers. `Price` is the engine input (and doubles
//! as the shutdown sentinel via its flag); `Trade` is the engine output.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tickflow::engine::algorithm::StreamInput;

/// A quoted price for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    symbol: String,
    value: Decimal,
    shutdown: bool,
}

impl Price {
    pub fn new(symbol: impl Into<String>, value: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            value,
            shutdown: false,
        }
    }

    /// The sentinel record that asks the engine to stop. It is never
    /// dispatched to the algorithm.
    pub fn shutdown_signal() -> Self {
        Self {
            symbol: String::new(),
            value: Decimal::ZERO,
            shutdown: true,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl StreamInput for Price {
    fn is_shutdown(&self) -> bool {
        self.shutdown
    }
}

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// An order produced by a processing algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    symbol: String,
    side: TradeSide,
    price: Decimal,
    quantity: u32,
}

impl Trade {
    pub fn new(symbol: impl Into<String>, side: TradeSide, price: Decimal, quantity: u32) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            price,
            quantity,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> TradeSide {
        self.side
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {}",
            self.side, self.quantity, self.symbol, self.price
        )
    }
}
