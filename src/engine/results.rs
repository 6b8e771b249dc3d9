// 8.0.2: result types and errors for the tick entry point.

use crate::order::Order;
use crate::position::PositionError;
use crate::types::{Symbol, Volume};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What one tick hands back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutput {
    pub orders: BTreeMap<Symbol, Vec<Order>>,
    pub conversions: i64,
    /// Context blob the caller feeds back as next tick's `trader_data`.
    pub trader_data: String,
}

impl TickOutput {
    pub fn orders_for(&self, symbol: &str) -> &[Order] {
        self.orders.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order_count() == 0
    }

    /// Total signed quantity across one symbol's buys and sells, separately.
    pub fn exposure(&self, symbol: &str) -> (Volume, Volume) {
        self.orders_for(symbol).iter().fold((0, 0), |(b, s), o| {
            if o.is_buy() {
                (b + o.quantity, s)
            } else {
                (b, s + o.quantity)
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Product {0} is not configured")]
    UnknownProduct(Symbol),

    #[error("Order set rejected: {0}")]
    Position(#[from] PositionError),
}
