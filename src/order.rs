//! Orders, trades and listings.
//!
//! Orders are produced by the quoting engine only. Trades and listings arrive
//! with the tick snapshot and are carried through to diagnostics.

use crate::types::{Price, Side, Symbol, Timestamp, Volume};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A limit order. Positive quantity buys, negative sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Volume,
}

impl Order {
    pub fn new(symbol: impl Into<Symbol>, price: Price, quantity: Volume) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
        }
    }

    pub fn buy(symbol: impl Into<Symbol>, price: Price, quantity: Volume) -> Self {
        debug_assert!(quantity > 0, "buy quantity must be positive");
        Self::new(symbol, price, quantity)
    }

    pub fn sell(symbol: impl Into<Symbol>, price: Price, quantity: Volume) -> Self {
        debug_assert!(quantity > 0, "sell quantity is passed as a magnitude");
        Self::new(symbol, price, -quantity)
    }

    pub fn side(&self) -> Option<Side> {
        Side::of(self.quantity)
    }

    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_sell(&self) -> bool {
        self.quantity < 0
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.symbol, self.price, self.quantity)
    }
}

/// An executed trade, own or market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Volume,
    pub buyer: Option<String>,
    pub seller: Option<String>,
    pub timestamp: Timestamp,
}

impl Trade {
    pub fn new(symbol: impl Into<Symbol>, price: Price, quantity: Volume, timestamp: Timestamp) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
            buyer: None,
            seller: None,
            timestamp,
        }
    }

    pub fn with_counterparties(mut self, buyer: impl Into<String>, seller: impl Into<String>) -> Self {
        self.buyer = Some(buyer.into());
        self.seller = Some(seller.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: Symbol,
    pub product: String,
    pub denomination: String,
}

impl Listing {
    pub fn new(symbol: impl Into<Symbol>, product: impl Into<String>, denomination: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            product: product.into(),
            denomination: denomination.into(),
        }
    }
}
