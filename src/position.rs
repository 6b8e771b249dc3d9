// 4.0: position ledger. signed inventory per symbol with a symmetric hard limit.
// owned by the caller across ticks; the engine only ever sees a copied value.
// 4.1 has the worst-case order set check at the bottom.

use crate::order::Order;
use crate::types::{Side, Symbol, Volume};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("No position limit configured for {0}")]
    UnknownSymbol(Symbol),

    #[error("{symbol}: inventory {resulting} would breach limit ±{limit}")]
    LimitExceeded {
        symbol: Symbol,
        resulting: Volume,
        limit: Volume,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionLedger {
    limits: BTreeMap<Symbol, Volume>,
    inventory: BTreeMap<Symbol, Volume>,
}

impl PositionLedger {
    pub fn new(limits: BTreeMap<Symbol, Volume>) -> Self {
        Self {
            limits,
            inventory: BTreeMap::new(),
        }
    }

    pub fn with_limit(mut self, symbol: impl Into<Symbol>, limit: Volume) -> Self {
        self.limits.insert(symbol.into(), limit.abs());
        self
    }

    pub fn limit(&self, symbol: &str) -> Option<Volume> {
        self.limits.get(symbol).copied()
    }

    pub fn inventory(&self, symbol: &str) -> Volume {
        self.inventory.get(symbol).copied().unwrap_or(0)
    }

    /// Snapshot for a `TradingState`. Flat symbols are omitted.
    pub fn snapshot(&self) -> BTreeMap<Symbol, Volume> {
        self.inventory
            .iter()
            .filter(|(_, v)| **v != 0)
            .map(|(s, &v)| (s.clone(), v))
            .collect()
    }

    /// Overwrite inventory with an externally reported position.
    pub fn sync(&mut self, positions: &BTreeMap<Symbol, Volume>) {
        self.inventory = positions.clone();
    }

    /// Units that can still be added on `side` before hitting the limit.
    /// Zero, never negative, once the limit is reached or passed.
    pub fn capacity(&self, symbol: &str, side: Side) -> Result<Volume, PositionError> {
        let limit = self
            .limit(symbol)
            .ok_or_else(|| PositionError::UnknownSymbol(symbol.to_string()))?;
        Ok(remaining_capacity(self.inventory(symbol), limit, side))
    }

    /// Apply an executed fill. Rejects, without mutating, any fill that would
    /// leave inventory outside the limit, unless it only moves an inventory
    /// already past the limit toward flat on the same side.
    pub fn apply_fill(&mut self, symbol: &str, quantity: Volume) -> Result<Volume, PositionError> {
        let limit = self
            .limit(symbol)
            .ok_or_else(|| PositionError::UnknownSymbol(symbol.to_string()))?;
        let current = self.inventory(symbol);
        let resulting = current + quantity;
        let unwinding = resulting.signum() == current.signum() && resulting.abs() <= current.abs();
        if resulting.abs() > limit && !unwinding {
            return Err(PositionError::LimitExceeded {
                symbol: symbol.to_string(),
                resulting,
                limit,
            });
        }
        self.inventory.insert(symbol.to_string(), resulting);
        Ok(resulting)
    }

    /// Check that `orders`, if every one of them filled completely, keep
    /// `inventory` within the limit on both sides.
    pub fn check_orders(&self, symbol: &str, inventory: Volume, orders: &[Order]) -> Result<(), PositionError> {
        let limit = self
            .limit(symbol)
            .ok_or_else(|| PositionError::UnknownSymbol(symbol.to_string()))?;
        check_worst_case(symbol, inventory, limit, orders)
    }
}

// 4.1: limit - inventory for buys, inventory + limit for sells, floored at zero
pub fn remaining_capacity(inventory: Volume, limit: Volume, side: Side) -> Volume {
    let room = match side {
        Side::Buy => limit - inventory,
        Side::Sell => inventory + limit,
    };
    room.max(0)
}

pub fn check_worst_case(symbol: &str, inventory: Volume, limit: Volume, orders: &[Order]) -> Result<(), PositionError> {
    let (bought, sold) = orders
        .iter()
        .filter(|o| o.symbol == symbol)
        .fold((0, 0), |(b, s), o| {
            if o.quantity > 0 {
                (b + o.quantity, s)
            } else {
                (b, s + o.quantity)
            }
        });

    // a side with no orders cannot make an existing breach worse
    for (delta, side) in [(bought, Side::Buy), (sold, Side::Sell)] {
        if delta == 0 {
            continue;
        }
        let resulting = inventory + delta;
        let breached = match side {
            Side::Buy => resulting > limit,
            Side::Sell => resulting < -limit,
        };
        if breached {
            return Err(PositionError::LimitExceeded {
                symbol: symbol.to_string(),
                resulting,
                limit,
            });
        }
    }
    Ok(())
}
