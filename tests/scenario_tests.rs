//! Scenario tests
//!
//! Literal books run through the full tick entry point, and multi-tick runs
//! where the caller's ledger absorbs fills between ticks.

use resin_quoter::*;
use std::collections::BTreeMap;

const RESIN: &str = RAINFOREST_RESIN;

fn resin_state(timestamp: i64, buys: &[(Price, Volume)], sells: &[(Price, Volume)], inventory: Volume) -> TradingState {
    TradingState::new(Timestamp::from_ticks(timestamp))
        .with_book(RESIN, OrderDepth::from_levels(buys, sells))
        .with_position(RESIN, inventory)
}

/// Single-tick decisions against hand-built books.
mod tick_tests {
    use super::*;

    #[test]
    fn mispriced_both_sides_from_flat() {
        let trader = Trader::new(TraderConfig::rainforest_resin());
        let state = resin_state(0, &[(10_002, 8)], &[(9_998, -10)], 0);

        let out = trader.run(&state);
        let orders = out.orders_for(RESIN);

        // takes all 10 offered at 9998
        assert_eq!(orders[0], Order::new(RESIN, 9_998, 10));
        // passive bid capped at fair - 1 with the remaining 40 of room
        assert_eq!(orders[1], Order::new(RESIN, 9_999, 40));
        // hits the 10002 bid for all 8
        assert_eq!(orders[2], Order::new(RESIN, 10_002, -8));
        // passive ask floored at fair + 1
        assert_eq!(orders[3], Order::new(RESIN, 10_001, -40));

        let (bought, sold) = out.exposure(RESIN);
        assert_eq!(bought, 50);
        assert_eq!(sold, -48);
    }

    #[test]
    fn empty_book_and_flat_inventory_is_quiet() {
        let trader = Trader::new(TraderConfig::rainforest_resin());
        let state = resin_state(0, &[], &[], 0);

        let out = trader.run(&state);
        assert!(out.is_empty());
        assert_eq!(out.orders_for(RESIN), &[] as &[Order]);
    }

    #[test]
    fn full_long_only_sells() {
        let trader = Trader::new(TraderConfig::rainforest_resin());
        let state = resin_state(0, &[(10_001, 5), (9_995, 20)], &[(9_997, -10), (10_005, -20)], 50);

        let out = trader.run(&state);
        let orders = out.orders_for(RESIN);
        assert!(orders.iter().all(Order::is_sell));
        // 10001 bid taken first, then skewed ask at deepest-ask undercut - 1
        assert_eq!(orders[0], Order::new(RESIN, 10_001, -5));
        assert_eq!(orders[1], Order::new(RESIN, 10_003, -40));
    }

    #[test]
    fn outgoing_context_is_empty() {
        let trader = Trader::new(TraderConfig::rainforest_resin());
        let state = resin_state(0, &[(9_995, 1)], &[(10_005, -1)], 0).with_trader_data("previous");

        let out = trader.run(&state);
        assert_eq!(out.trader_data, "");
        assert_eq!(out.conversions, 0);
    }

    #[test]
    fn custom_skew_parameters() {
        let mut product = ProductConfig::new(20, FairValue::constant(10_000));
        product.quoting = QuotingParams {
            passive_cap: 5,
            soft_inventory_threshold: 2,
        };
        let config = TraderConfig::rainforest_resin().with_product(RESIN, product);
        let trader = Trader::new(config);

        let out = trader.run(&resin_state(0, &[(9_995, 20)], &[(10_005, -20)], 3));
        let bids: Vec<_> = out.orders_for(RESIN).iter().filter(|o| o.is_buy()).cloned().collect();
        // above the soft threshold: backed-off bid first, then the regular one
        assert_eq!(bids, vec![Order::new(RESIN, 9_995, 5), Order::new(RESIN, 9_996, 5)]);
    }
}

/// Multi-tick runs with a caller-owned ledger.
mod ledger_tests {
    use super::*;

    // fill every order that meets resting size at its own price
    fn fill_takes(ledger: &mut PositionLedger, book: &OrderDepth, orders: &[Order]) {
        for order in orders {
            let resting = if order.is_buy() {
                book.sell_orders.get(&order.price).map(|v| -v)
            } else {
                book.buy_orders.get(&order.price).copied()
            };
            if let Some(available) = resting {
                let filled = order.quantity.signum() * order.quantity.abs().min(available);
                ledger.apply_fill(&order.symbol, filled).unwrap();
            }
        }
    }

    #[test]
    fn repeated_cheap_asks_stop_at_limit() {
        let config = TraderConfig::rainforest_resin();
        let trader = Trader::new(config.clone());
        let mut ledger = config.ledger();

        let book = OrderDepth::from_levels(&[(9_995, 20)], &[(9_998, -15), (10_005, -20)]);
        for tick in 0..10 {
            let mut state = TradingState::new(Timestamp::from_ticks(tick * 100)).with_book(RESIN, book.clone());
            state.position = ledger.snapshot();

            let out = trader.run(&state);
            fill_takes(&mut ledger, &book, out.orders_for(RESIN));

            let inventory = ledger.inventory(RESIN);
            assert!(inventory.abs() <= 50, "tick {tick}: inventory {inventory}");
        }
        assert_eq!(ledger.inventory(RESIN), 50);
    }

    #[test]
    fn alternating_mispricing_mean_reverts() {
        let config = TraderConfig::rainforest_resin();
        let trader = Trader::new(config.clone());
        let mut ledger = config.ledger();

        let cheap = OrderDepth::from_levels(&[(9_995, 20)], &[(9_998, -30), (10_005, -20)]);
        let rich = OrderDepth::from_levels(&[(10_002, 30), (9_995, 20)], &[(10_005, -20)]);

        for tick in 0..6 {
            let book = if tick % 2 == 0 { &cheap } else { &rich };
            let mut state = TradingState::new(Timestamp::from_ticks(tick * 100)).with_book(RESIN, book.clone());
            state.position = ledger.snapshot();

            let out = trader.run(&state);
            assert!(ledger.check_orders(RESIN, ledger.inventory(RESIN), out.orders_for(RESIN)).is_ok());
            fill_takes(&mut ledger, book, out.orders_for(RESIN));
        }
        // buys 30, sells 30 back each round trip
        assert_eq!(ledger.inventory(RESIN), 0);
    }

    #[test]
    fn reported_breach_unwinds_through_ledger() {
        let config = TraderConfig::rainforest_resin();
        let trader = Trader::new(config.clone());
        let mut ledger = config.ledger();
        let mut reported = BTreeMap::new();
        reported.insert(RESIN.to_string(), 60);
        ledger.sync(&reported);

        let book = OrderDepth::from_levels(&[(10_002, 8), (9_995, 20)], &[(10_005, -20)]);
        for tick in 0..2 {
            let mut state = TradingState::new(Timestamp::from_ticks(tick * 100)).with_book(RESIN, book.clone());
            state.position = ledger.snapshot();

            let out = trader.run(&state);
            assert!(out.orders_for(RESIN).iter().all(Order::is_sell));
            fill_takes(&mut ledger, &book, out.orders_for(RESIN));
        }
        assert_eq!(ledger.inventory(RESIN), 44);
    }

    #[test]
    fn records_flush_each_tick() {
        let config = TraderConfig::rainforest_resin();
        let trader = Trader::new(config.clone());
        let mut logger = Logger::new(config.log_budget);

        let mut records = Vec::new();
        for tick in 0..3 {
            let state = resin_state(tick * 100, &[(9_995, 20)], &[(10_005, -20)], 0);
            let out = trader.run(&state);
            logger.print(&[&"tick", &tick]);
            records.push(logger.flush(&state, &out.orders, out.conversions, &out.trader_data).unwrap());
        }

        // no log text carries over between ticks
        assert!(records[2].ends_with(r#","tick 2\n"]"#));
        assert!(!records[2].contains("tick 1"));
        assert!(records.iter().all(|r| r.chars().count() <= DEFAULT_LOG_BUDGET));
    }

    #[test]
    fn encoding_failure_leaves_orders_usable() {
        let trader = Trader::new(TraderConfig::rainforest_resin());
        let state = resin_state(0, &[(9_995, 20)], &[(10_005, -20)], 0);
        let out = trader.run(&state);

        let mut logger = Logger::new(10);
        assert!(logger.flush(&state, &out.orders, out.conversions, &out.trader_data).is_err());
        assert_eq!(out.order_count(), 2);
    }

    #[test]
    fn unknown_symbol_in_snapshot_is_ignored() {
        let trader = Trader::new(TraderConfig::rainforest_resin());
        let mut positions = BTreeMap::new();
        positions.insert("KELP".to_string(), 12);
        let mut state = resin_state(0, &[(9_995, 20)], &[(10_005, -20)], 0);
        state.position.extend(positions);

        let out = trader.run(&state);
        assert_eq!(out.orders.len(), 1);
    }
}
