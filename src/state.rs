//! Per-tick input snapshot.

use crate::book::OrderDepth;
use crate::observation::Observation;
use crate::order::{Listing, Trade};
use crate::types::{Symbol, Timestamp, Volume};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the engine sees on one tick. Built by the caller, never mutated
/// by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingState {
    pub timestamp: Timestamp,
    /// Context blob returned by the previous tick.
    pub trader_data: String,
    pub listings: BTreeMap<Symbol, Listing>,
    pub order_depths: BTreeMap<Symbol, OrderDepth>,
    pub own_trades: BTreeMap<Symbol, Vec<Trade>>,
    pub market_trades: BTreeMap<Symbol, Vec<Trade>>,
    /// Signed inventory per symbol at the start of the tick.
    pub position: BTreeMap<Symbol, Volume>,
    pub observations: Observation,
}

impl TradingState {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    pub fn with_book(mut self, symbol: impl Into<Symbol>, depth: OrderDepth) -> Self {
        self.order_depths.insert(symbol.into(), depth);
        self
    }

    pub fn with_position(mut self, symbol: impl Into<Symbol>, inventory: Volume) -> Self {
        self.position.insert(symbol.into(), inventory);
        self
    }

    pub fn with_trader_data(mut self, data: impl Into<String>) -> Self {
        self.trader_data = data.into();
        self
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listings.insert(listing.symbol.clone(), listing);
        self
    }

    /// Inventory for `symbol`, zero when flat or never traded.
    pub fn inventory(&self, symbol: &str) -> Volume {
        self.position.get(symbol).copied().unwrap_or(0)
    }
}
