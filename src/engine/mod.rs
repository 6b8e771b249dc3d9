// 8.0: quoting engine. takes mispriced liquidity, posts skewed passive quotes,
// and never returns an order set that could breach a position limit.
// deterministic with no external I/O.

mod core;
mod quoting;
mod results;

pub use self::core::{reference_mid, Trader};
pub use quoting::quote;
pub use results::{EngineError, TickOutput};
