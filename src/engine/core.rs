// 8.0 engine/core.rs: tick entry point. quotes every configured product present in the book.

use super::quoting::quote;
use super::results::{EngineError, TickOutput};
use crate::book::{extract_book, OrderDepth};
use crate::config::TraderConfig;
use crate::order::Order;
use crate::position::check_worst_case;
use crate::state::TradingState;
use crate::types::Volume;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/** 8.1: stateless between ticks. inventory always comes from the snapshot */
#[derive(Debug, Clone)]
pub struct Trader {
    config: TraderConfig,
}

impl Trader {
    pub fn new(config: TraderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TraderConfig {
        &self.config
    }

    /// Run one tick. Products without a book this tick are skipped; a product
    /// whose order set fails the limit check is dropped and logged.
    pub fn run(&self, state: &TradingState) -> TickOutput {
        let mut orders = BTreeMap::new();

        for (symbol, book) in &state.order_depths {
            if self.config.product(symbol).is_none() {
                warn!(%symbol, "no config for product, skipping");
                continue;
            }

            match self.quote_product(symbol, book, state.inventory(symbol)) {
                Ok(product_orders) => {
                    orders.insert(symbol.clone(), product_orders);
                }
                Err(e) => {
                    error!(%symbol, timestamp = %state.timestamp, error = %e, "dropping order set");
                }
            }
        }

        TickOutput {
            orders,
            conversions: 0,
            trader_data: String::new(),
        }
    }

    /// Quote one product against `inventory`, read once and never refreshed.
    pub fn quote_product(&self, symbol: &str, book: &OrderDepth, inventory: Volume) -> Result<Vec<Order>, EngineError> {
        let product = self
            .config
            .product(symbol)
            .ok_or_else(|| EngineError::UnknownProduct(symbol.to_string()))?;

        let orders = quote(
            symbol,
            book,
            product.fair_value,
            inventory,
            product.position_limit,
            &product.quoting,
        );

        check_worst_case(symbol, inventory, product.position_limit, &orders)?;

        debug!(
            %symbol,
            inventory,
            orders = orders.len(),
            book_mid = ?reference_mid(book),
            fair_mid = %product.fair_value.mid(),
            "quoted"
        );

        Ok(orders)
    }
}

/// Mid of the extractor's peak prices. Diagnostic only.
pub fn reference_mid(book: &OrderDepth) -> Option<Decimal> {
    let (sell, buy) = extract_book(book);
    match (sell.best_price, buy.best_price) {
        (Some(ask), Some(bid)) => Some(Decimal::from(ask + bid) / Decimal::TWO),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProductConfig, RAINFOREST_RESIN};
    use crate::types::{FairValue, Timestamp};

    #[test]
    fn empty_book_flat_inventory() {
        let trader = Trader::new(TraderConfig::default());
        let state = TradingState::new(Timestamp::from_ticks(0)).with_book(RAINFOREST_RESIN, OrderDepth::new());

        let out = trader.run(&state);
        assert!(out.is_empty());
        assert_eq!(out.conversions, 0);
        assert!(out.trader_data.is_empty());
    }

    #[test]
    fn unconfigured_products_are_ignored() {
        let trader = Trader::new(TraderConfig::default());
        let depth = OrderDepth::from_levels(&[(2_010, 5)], &[(2_030, -5)]);
        let state = TradingState::new(Timestamp::from_ticks(0)).with_book("KELP", depth);

        let out = trader.run(&state);
        assert!(out.orders.is_empty());
        assert!(matches!(
            trader.quote_product("KELP", &OrderDepth::new(), 0),
            Err(EngineError::UnknownProduct(_))
        ));
    }

    #[test]
    fn each_product_uses_its_own_inventory() {
        let config = TraderConfig::default().with_product("KELP", ProductConfig::new(50, FairValue::constant(2_020)));
        let trader = Trader::new(config);
        let state = TradingState::new(Timestamp::from_ticks(100))
            .with_book(RAINFOREST_RESIN, OrderDepth::from_levels(&[(9_995, 20)], &[(10_005, -20)]))
            .with_book("KELP", OrderDepth::from_levels(&[(2_015, 20)], &[(2_025, -20)]))
            .with_position(RAINFOREST_RESIN, 50)
            .with_position("KELP", -50);

        let out = trader.run(&state);
        assert!(out.orders_for(RAINFOREST_RESIN).iter().all(Order::is_sell));
        assert!(out.orders_for("KELP").iter().all(Order::is_buy));
    }

    #[test]
    fn reference_mid_needs_both_sides() {
        let book = OrderDepth::from_levels(&[(9_996, 1)], &[(10_004, -1)]);
        assert_eq!(reference_mid(&book), Some(Decimal::from(10_000)));
        assert_eq!(reference_mid(&OrderDepth::from_levels(&[(9_996, 1)], &[])), None);
    }
}
