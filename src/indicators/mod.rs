// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the
// fast-scalp evaluator. Every series spans the full input length (the EMA is
// seeded on the first observation), and undefined points resolve to neutral
// defaults rather than NaN so downstream comparisons are always well-defined.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use rsi::{rsi, RSI_NEUTRAL};
