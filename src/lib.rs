// resin-quoter: per-tick market-making engine.
// position-limit-first: no returned order set can push inventory past its limit.
// all computation is deterministic with no external I/O and no clock.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Symbol, Price, Volume, Side, Timestamp, FairValue
//   2.x  book.rs: order book view and cumulative-volume extractor
//   2.2  order.rs: orders, trades, listings
//   3.x  observation.rs: conversion + plain observations
//   3.1  state.rs: per-tick TradingState snapshot
//   4.x  position.rs: position ledger, capacity, worst-case limit check
//   7.x  config.rs: product limits, fair values, skew tuning
//   8.x  engine/: quoting passes and the tick entry point
//   9.x  diagnostics.rs: budgeted record encoder and log buffer

pub mod book;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod observation;
pub mod order;
pub mod position;
pub mod state;
pub mod types;

// re exports for convenience
pub use book::*;
pub use config::*;
pub use diagnostics::{encode_diagnostic, field_budget, truncate, EncodeError, Logger, ELLIPSIS};
pub use engine::*;
pub use observation::*;
pub use order::*;
pub use position::*;
pub use state::*;
pub use types::*;
