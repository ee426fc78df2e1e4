// =============================================================================
// fastscalp — fast-scalp signal evaluator
// =============================================================================
//
// Evaluates a short rolling window of OHLCV candles for one instrument and
// emits a buy/sell/hold recommendation with a bounded confidence score,
// stop/target prices and a human-readable reason.
//
// The evaluator is pure and synchronous: no shared mutable state, no I/O.
// Exchange connectivity, order placement and alert delivery live outside
// this crate and consume [`SignalResult`].
//
// ```no_run
// use fastscalp::{SignalEvaluator, StrategyParams};
//
// let params = StrategyParams::default();
// let candles = Vec::new(); // supplied by the market-data layer
// let signal = SignalEvaluator::evaluate(&candles, &params);
// println!("{}: {}", signal.action, signal.reason);
// ```
// =============================================================================

pub mod config;
pub mod evaluator;
pub mod features;
pub mod indicators;
pub mod logging;
pub mod types;
pub mod window;

pub use config::StrategyParams;
pub use evaluator::{EvalError, SignalEvaluator};
pub use features::FeatureSet;
pub use types::{Action, Candle, SignalResult, DEFAULT_MAX_HOLD_SECS, MIN_SAMPLES};
pub use window::CandleWindow;
