//! Quoting: the per-instrument order decision.
//!
//! Two mirrored passes. Each first takes resting liquidity priced through fair
//! value, then posts passive quotes just inside the book, skewed by inventory.
//! Every order is clamped so that, filled in full together with every earlier
//! order on the same side, inventory stays within the limit.

use crate::book::{extract_book, OrderDepth};
use crate::config::QuotingParams;
use crate::order::Order;
use crate::position::remaining_capacity;
use crate::types::{FairValue, Price, Side, Volume};

/// Orders for one instrument on one tick: bids first, then asks.
pub fn quote(
    symbol: &str,
    book: &OrderDepth,
    fair: FairValue,
    inventory: Volume,
    limit: Volume,
    params: &QuotingParams,
) -> Vec<Order> {
    let (sell_side, buy_side) = extract_book(book);

    let mut quoter = Quoter {
        symbol,
        fair,
        inventory,
        limit,
        params: *params,
        orders: Vec::new(),
    };

    quoter.quote_bids(book, buy_side.best_price);
    quoter.quote_asks(book, sell_side.best_price);
    quoter.orders
}

struct Quoter<'a> {
    symbol: &'a str,
    fair: FairValue,
    // start-of-tick inventory. only the local cursor moves.
    inventory: Volume,
    limit: Volume,
    params: QuotingParams,
    orders: Vec<Order>,
}

impl Quoter<'_> {
    fn quote_bids(&mut self, book: &OrderDepth, best_buy: Option<Price>) {
        let mut cpos = self.inventory;
        let acc_bid = self.fair.acceptable_bid;

        for (ask, volume) in book.sells_ascending() {
            let mispriced = ask < acc_bid || (self.inventory < 0 && ask == acc_bid);
            if mispriced {
                self.post(Side::Buy, &mut cpos, ask, -volume);
            }
        }

        let Some(best_buy) = best_buy else {
            return;
        };
        let undercut = best_buy + 1;
        let ceiling = acc_bid - 1;
        let cap = self.params.passive_cap;

        if self.inventory < 0 {
            // short: bid one tick sharper to cover
            self.post(Side::Buy, &mut cpos, (undercut + 1).min(ceiling), cap);
        } else if self.inventory > self.params.soft_inventory_threshold {
            self.post(Side::Buy, &mut cpos, (undercut - 1).min(ceiling), cap);
        }
        self.post(Side::Buy, &mut cpos, undercut.min(ceiling), cap);
    }

    fn quote_asks(&mut self, book: &OrderDepth, best_sell: Option<Price>) {
        let mut cpos = self.inventory;
        let acc_ask = self.fair.acceptable_ask;

        for (bid, volume) in book.buys_descending() {
            let mispriced = bid > acc_ask || (self.inventory > 0 && bid == acc_ask);
            if mispriced {
                self.post(Side::Sell, &mut cpos, bid, volume);
            }
        }

        let Some(best_sell) = best_sell else {
            return;
        };
        let undercut = best_sell - 1;
        let floor = acc_ask + 1;
        let cap = self.params.passive_cap;

        if self.inventory > 0 {
            // long: offer one tick sharper to unload
            self.post(Side::Sell, &mut cpos, (undercut - 1).max(floor), cap);
        } else if self.inventory < -self.params.soft_inventory_threshold {
            self.post(Side::Sell, &mut cpos, (undercut + 1).max(floor), cap);
        }
        self.post(Side::Sell, &mut cpos, undercut.max(floor), cap);
    }

    // `wanted` is a magnitude. nothing is emitted once the side has no room.
    fn post(&mut self, side: Side, cpos: &mut Volume, price: Price, wanted: Volume) {
        let quantity = wanted.min(remaining_capacity(*cpos, self.limit, side));
        if quantity <= 0 {
            return;
        }
        let signed = side.sign() * quantity;
        self.orders.push(Order::new(self.symbol, price, signed));
        *cpos += signed;
    }
}
