//! Order book view and cumulative-volume extraction.
//!
//! An `OrderDepth` is a read-only snapshot of one instrument's resting orders:
//! two price to volume maps. Sell volumes are stored negative, buy volumes
//! positive, so the sign of a level always says which way it trades.

use crate::types::{Price, Side, Volume};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Two-sided resting liquidity for one instrument at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    /// Bids: price -> positive volume available to sell into.
    pub buy_orders: BTreeMap<Price, Volume>,
    /// Asks: price -> negative volume available to buy from.
    pub sell_orders: BTreeMap<Price, Volume>,
}

impl OrderDepth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_levels(buys: &[(Price, Volume)], sells: &[(Price, Volume)]) -> Self {
        Self {
            buy_orders: buys.iter().copied().collect(),
            sell_orders: sells.iter().copied().collect(),
        }
    }

    /// Asks in price priority (cheapest first).
    pub fn sells_ascending(&self) -> impl Iterator<Item = (Price, Volume)> + '_ {
        self.sell_orders.iter().map(|(&p, &v)| (p, v))
    }

    /// Bids in price priority (highest first).
    pub fn buys_descending(&self) -> impl Iterator<Item = (Price, Volume)> + '_ {
        self.buy_orders.iter().rev().map(|(&p, &v)| (p, v))
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.buy_orders.keys().next_back().copied()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.sell_orders.keys().next().copied()
    }

    /// Top-of-book mid. Reference only.
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(Decimal::from(bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }
}

/// Output of [`extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted {
    /// Sum of all levels' volumes, sell side negated.
    pub cumulative_volume: Volume,
    /// Price at which the running total peaked. `None` for an empty side.
    pub best_price: Option<Price>,
}

// 2.1: walks one side in price priority. only a strictly greater running
// total moves the peak, so ties stay on the better-priced level.
pub fn extract<I>(levels: I, side: Side) -> Extracted
where
    I: IntoIterator<Item = (Price, Volume)>,
{
    let mut cumulative_volume: Volume = 0;
    let mut peak: Option<Volume> = None;
    let mut best_price = None;

    for (price, volume) in levels {
        let volume = match side {
            Side::Sell => -volume,
            Side::Buy => volume,
        };
        cumulative_volume += volume;
        if peak.map_or(true, |p| cumulative_volume > p) {
            peak = Some(cumulative_volume);
            best_price = Some(price);
        }
    }

    Extracted {
        cumulative_volume,
        best_price,
    }
}

/// Extract both sides of a book in their priority order: (sell, buy).
pub fn extract_book(book: &OrderDepth) -> (Extracted, Extracted) {
    (
        extract(book.sells_ascending(), Side::Sell),
        extract(book.buys_descending(), Side::Buy),
    )
}
