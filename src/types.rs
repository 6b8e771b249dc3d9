// 1.0: primitives shared by the book, the engine and the encoder.
// prices and volumes are integer ticks/lots. the sign of a volume carries the side.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instrument identifier, e.g. "RAINFOREST_RESIN".
pub type Symbol = String;

/// Price in integer ticks.
pub type Price = i64;

/// Signed quantity. Positive = buy / long, negative = sell / short.
pub type Volume = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn sign(&self) -> Volume {
        match self {
            Side::Buy => 1,
            Side::Sell => -1,
        }
    }

    pub fn of(quantity: Volume) -> Option<Self> {
        match quantity.signum() {
            1 => Some(Side::Buy),
            -1 => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

// 1.1: tick timestamp supplied by the caller. the engine never reads a clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub fn advance(&self, step: i64) -> Self {
        Self(self.0 + step)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: acceptable bid/ask. resting sells below the bid and bids above the ask
// are considered mispriced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairValue {
    pub acceptable_bid: Price,
    pub acceptable_ask: Price,
}

impl FairValue {
    pub fn new(acceptable_bid: Price, acceptable_ask: Price) -> Self {
        Self {
            acceptable_bid,
            acceptable_ask,
        }
    }

    /// Same price on both sides, for instruments anchored to a constant.
    pub fn constant(price: Price) -> Self {
        Self::new(price, price)
    }

    pub fn mid(&self) -> Decimal {
        Decimal::from(self.acceptable_bid + self.acceptable_ask) / Decimal::TWO
    }

    pub fn is_crossed(&self) -> bool {
        self.acceptable_bid > self.acceptable_ask
    }
}
