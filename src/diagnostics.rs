//! Budgeted diagnostic records.
//!
//! Each tick is compressed into one compact JSON array:
//!
//! ```text
//! [state, orders, conversions, trader_data, logs]
//! state = [timestamp, trader_data, listings, order_depths,
//!          own_trades, market_trades, position, observations]
//! ```
//!
//! Three fields are free text: the incoming `trader_data` inside `state`, the
//! outgoing `trader_data`, and the buffered logs. Whatever room the fixed
//! fields leave under the budget is split evenly between those three, and any
//! field longer than its share is cut and marked with an ellipsis.
//!
//! Lengths are counted in characters of the serialized output. A field's
//! length is its escaped JSON length, so a newline counts as two.

use crate::config::DEFAULT_LOG_BUDGET;
use crate::observation::Observation;
use crate::order::{Listing, Order, Trade};
use crate::state::TradingState;
use crate::types::{Price, Symbol, Timestamp, Volume};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

pub const ELLIPSIS: &str = "...";

/// Number of free-text fields sharing the leftover budget.
const TEXT_FIELDS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Diagnostic record is {length} chars, budget is {budget}")]
    BudgetExceeded { length: usize, budget: usize },

    #[error("Diagnostic serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Encode one tick. Fails only if the record cannot fit even after truncation
/// or cannot be serialized; neither affects the tick's orders.
pub fn encode_diagnostic(
    state: &TradingState,
    orders: &BTreeMap<Symbol, Vec<Order>>,
    conversions: i64,
    trader_data: &str,
    logs: &str,
    max_length: usize,
) -> Result<String, EncodeError> {
    let frame = Frame::new(state, orders, conversions);

    let base_length = char_len(&frame.render("", "", "")?);
    let budget = field_budget(max_length, base_length);

    let record = frame.render(
        &truncate(&state.trader_data, budget),
        &truncate(trader_data, budget),
        &truncate(logs, budget),
    )?;

    let length = char_len(&record);
    if length > max_length {
        warn!(length, budget = max_length, base_length, "diagnostic record over budget");
        return Err(EncodeError::BudgetExceeded {
            length,
            budget: max_length,
        });
    }

    Ok(record)
}

/// Equal share of the leftover budget for each free-text field.
pub fn field_budget(max_length: usize, base_length: usize) -> usize {
    max_length.saturating_sub(base_length) / TEXT_FIELDS
}

/// Cut `value` so its escaped length is at most `max_length`, ending in
/// [`ELLIPSIS`] when anything was removed.
pub fn truncate(value: &str, max_length: usize) -> Cow<'_, str> {
    if json_len(value) <= max_length {
        return Cow::Borrowed(value);
    }
    if max_length < ELLIPSIS.len() {
        return Cow::Borrowed(&ELLIPSIS[..max_length]);
    }

    let keep = max_length - ELLIPSIS.len();
    let mut used = 0;
    let mut end = 0;
    for (i, c) in value.char_indices() {
        let width = escaped_len(c);
        if used + width > keep {
            break;
        }
        used += width;
        end = i + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &value[..end], ELLIPSIS))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Characters `value` occupies inside a JSON string literal.
pub fn json_len(value: &str) -> usize {
    value.chars().map(escaped_len).sum()
}

// mirrors serde_json's escape table
fn escaped_len(c: char) -> usize {
    match c {
        '"' | '\\' | '\n' | '\r' | '\t' | '\u{08}' | '\u{0c}' => 2,
        c if (c as u32) < 0x20 => 6,
        _ => 1,
    }
}

#[derive(Serialize)]
struct CompressedListing<'a>(&'a str, &'a str, &'a str);

#[derive(Serialize)]
struct CompressedDepth<'a>(&'a BTreeMap<Price, Volume>, &'a BTreeMap<Price, Volume>);

#[derive(Serialize)]
struct CompressedTrade<'a>(&'a str, Price, Volume, Option<&'a str>, Option<&'a str>, Timestamp);

#[derive(Serialize)]
struct CompressedOrder<'a>(&'a str, Price, Volume);

#[derive(Serialize)]
struct CompressedObservations<'a>(
    &'a BTreeMap<String, i64>,
    BTreeMap<&'a str, [Option<f64>; 7]>,
);

#[derive(Serialize)]
struct StateRow<'a>(
    Timestamp,
    &'a str,
    &'a [CompressedListing<'a>],
    &'a BTreeMap<&'a str, CompressedDepth<'a>>,
    &'a [CompressedTrade<'a>],
    &'a [CompressedTrade<'a>],
    &'a BTreeMap<Symbol, Volume>,
    &'a CompressedObservations<'a>,
);

// the fixed-shape part of a record, compressed once and rendered twice
struct Frame<'a> {
    timestamp: Timestamp,
    listings: Vec<CompressedListing<'a>>,
    depths: BTreeMap<&'a str, CompressedDepth<'a>>,
    own_trades: Vec<CompressedTrade<'a>>,
    market_trades: Vec<CompressedTrade<'a>>,
    position: &'a BTreeMap<Symbol, Volume>,
    observations: CompressedObservations<'a>,
    orders: Vec<CompressedOrder<'a>>,
    conversions: i64,
}

impl<'a> Frame<'a> {
    fn new(state: &'a TradingState, orders: &'a BTreeMap<Symbol, Vec<Order>>, conversions: i64) -> Self {
        Self {
            timestamp: state.timestamp,
            listings: state.listings.values().map(compress_listing).collect(),
            depths: state
                .order_depths
                .iter()
                .map(|(symbol, depth)| (symbol.as_str(), CompressedDepth(&depth.buy_orders, &depth.sell_orders)))
                .collect(),
            own_trades: compress_trades(&state.own_trades),
            market_trades: compress_trades(&state.market_trades),
            position: &state.position,
            observations: compress_observations(&state.observations),
            orders: orders
                .values()
                .flatten()
                .map(|o| CompressedOrder(&o.symbol, o.price, o.quantity))
                .collect(),
            conversions,
        }
    }

    fn render(&self, state_data: &str, trader_data: &str, logs: &str) -> Result<String, serde_json::Error> {
        let state = StateRow(
            self.timestamp,
            state_data,
            &self.listings,
            &self.depths,
            &self.own_trades,
            &self.market_trades,
            self.position,
            &self.observations,
        );
        serde_json::to_string(&(state, &self.orders, self.conversions, trader_data, logs))
    }
}

fn compress_listing(listing: &Listing) -> CompressedListing<'_> {
    CompressedListing(&listing.symbol, &listing.product, &listing.denomination)
}

fn compress_trades(trades: &BTreeMap<Symbol, Vec<Trade>>) -> Vec<CompressedTrade<'_>> {
    trades
        .values()
        .flatten()
        .map(|t| {
            CompressedTrade(
                &t.symbol,
                t.price,
                t.quantity,
                t.buyer.as_deref(),
                t.seller.as_deref(),
                t.timestamp,
            )
        })
        .collect()
}

fn compress_observations(observations: &Observation) -> CompressedObservations<'_> {
    let conversions = observations
        .conversion_observations
        .iter()
        .map(|(product, obs)| (product.as_str(), obs.fields().map(|d| d.to_f64())))
        .collect();
    CompressedObservations(&observations.plain_value_observations, conversions)
}

/// Free-text buffer flushed into one record per tick.
#[derive(Debug, Clone)]
pub struct Logger {
    logs: String,
    max_length: usize,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_BUDGET)
    }
}

impl Logger {
    pub fn new(max_length: usize) -> Self {
        Self {
            logs: String::new(),
            max_length,
        }
    }

    /// Append `objects` joined by a space, then a newline.
    pub fn print(&mut self, objects: &[&dyn fmt::Display]) {
        self.print_with(objects, " ", "\n");
    }

    pub fn print_with(&mut self, objects: &[&dyn fmt::Display], sep: &str, end: &str) {
        for (i, object) in objects.iter().enumerate() {
            if i > 0 {
                self.logs.push_str(sep);
            }
            self.logs.push_str(&object.to_string());
        }
        self.logs.push_str(end);
    }

    pub fn logs(&self) -> &str {
        &self.logs
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Encode the tick with everything buffered so far. The buffer is emptied
    /// whether or not encoding succeeds.
    pub fn flush(
        &mut self,
        state: &TradingState,
        orders: &BTreeMap<Symbol, Vec<Order>>,
        conversions: i64,
        trader_data: &str,
    ) -> Result<String, EncodeError> {
        let logs = std::mem::take(&mut self.logs);
        encode_diagnostic(state, orders, conversions, trader_data, &logs, self.max_length)
    }
}

impl fmt::Write for Logger {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.logs.push_str(s);
        Ok(())
    }
}
