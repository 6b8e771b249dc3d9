//! Resin quoting simulation.
//!
//! Plays a deterministic sequence of resin books through the trader. The
//! simulator owns the position ledger, fills orders against the book, and
//! prints one bounded diagnostic record per tick.
//!
//! Usage: `resin-sim [ticks]` (default 20). Set `RUST_LOG=debug` for engine
//! decisions on stderr.

use resin_quoter::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const TICK_STEP: i64 = 100;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let ticks: i64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(20);

    let config = TraderConfig::rainforest_resin();
    let trader = Trader::new(config.clone());
    let mut ledger = config.ledger();
    let mut logger = Logger::new(config.log_budget);

    let mut trader_data = String::new();
    let mut own_trades: Vec<Trade> = Vec::new();
    let mut timestamp = Timestamp::default();

    for tick in 0..ticks {
        let book = resin_book(tick);
        debug!(%timestamp, book_mid = ?book.mid_price(), "book");
        let mut state = TradingState::new(timestamp)
            .with_listing(Listing::new(RAINFOREST_RESIN, RAINFOREST_RESIN, "SEASHELLS"))
            .with_book(RAINFOREST_RESIN, book.clone())
            .with_trader_data(trader_data.clone());
        state.position = ledger.snapshot();
        if !own_trades.is_empty() {
            state.own_trades.insert(RAINFOREST_RESIN.to_string(), std::mem::take(&mut own_trades));
        }

        let output = trader.run(&state);

        logger.print(&[&"inventory", &ledger.inventory(RAINFOREST_RESIN)]);
        for order in output.orders_for(RAINFOREST_RESIN) {
            logger.print(&[&"order", order]);
            let filled = simulate_fill(&book, order, tick);
            if filled == 0 {
                continue;
            }
            match ledger.apply_fill(&order.symbol, filled) {
                Ok(_) => own_trades.push(fill_trade(order, filled, timestamp)),
                Err(e) => warn!(error = %e, "fill rejected"),
            }
        }
        if let (Ok(buy_room), Ok(sell_room)) = (
            ledger.capacity(RAINFOREST_RESIN, Side::Buy),
            ledger.capacity(RAINFOREST_RESIN, Side::Sell),
        ) {
            logger.print(&[&"room", &buy_room, &sell_room]);
        }

        match logger.flush(&state, &output.orders, output.conversions, &output.trader_data) {
            Ok(record) => println!("{record}"),
            Err(e) => warn!(%timestamp, error = %e, "diagnostic record dropped"),
        }

        trader_data = output.trader_data;
        timestamp = timestamp.advance(TICK_STEP);
    }

    info!(
        ticks,
        final_inventory = ledger.inventory(RAINFOREST_RESIN),
        "simulation complete"
    );
}

/// Resting book around 10,000 with periodic mispriced levels.
fn resin_book(tick: i64) -> OrderDepth {
    let mut depth = OrderDepth::from_levels(
        &[(9_995, 20 + tick % 5), (9_992, 10)],
        &[(10_005, -(20 + tick % 7)), (10_008, -10)],
    );
    if tick % 5 == 0 {
        depth.sell_orders.insert(9_998, -(4 + tick % 3));
    }
    if tick % 7 == 3 {
        depth.buy_orders.insert(10_002, 6);
    }
    if tick % 11 == 6 {
        depth.sell_orders.insert(10_000, -3);
    }
    depth
}

// takes fill against resting size at their price; passive quotes trade a few
// lots every third tick
fn simulate_fill(book: &OrderDepth, order: &Order, tick: i64) -> Volume {
    let resting = match order.side() {
        Some(Side::Buy) => book.sell_orders.get(&order.price).map(|v| -v),
        Some(Side::Sell) => book.buy_orders.get(&order.price).copied(),
        None => return 0,
    };
    let magnitude = match resting {
        Some(available) => order.quantity.abs().min(available),
        None if tick % 3 == 0 => order.quantity.abs().min(5),
        None => 0,
    };
    magnitude * order.quantity.signum()
}

fn fill_trade(order: &Order, filled: Volume, timestamp: Timestamp) -> Trade {
    let trade = Trade::new(order.symbol.clone(), order.price, filled.abs(), timestamp);
    if filled > 0 {
        trade.with_counterparties("SUBMISSION", "")
    } else {
        trade.with_counterparties("", "SUBMISSION")
    }
}
