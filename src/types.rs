// =============================================================================
// Shared types used across the fastscalp evaluator
// =============================================================================

use serde::{Deserialize, Serialize};

/// Minimum number of candles required for a real evaluation.
///
/// Anything shorter is a defined degraded outcome (see
/// [`SignalResult::empty`]), not an error the caller has to handle.
pub const MIN_SAMPLES: usize = 15;

/// Advisory holding-time ceiling used by the degraded empty-signal path.
pub const DEFAULT_MAX_HOLD_SECS: u64 = 900;

/// A single OHLCV sample.
///
/// Only `close` and `volume` are read by the evaluator; `open`, `high` and
/// `low` are carried for interface symmetry with sibling strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// The discrete recommendation emitted by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Default for Action {
    fn default() -> Self {
        Self::Hold
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
            Self::Hold => write!(f, "hold"),
        }
    }
}

/// Full evaluation output, created fresh per call and owned by the caller.
///
/// `confidence` is always in `[0.0, 0.9]`. For `hold` results the stop and
/// target equal the entry price (a neutral placeholder, not a tradable
/// order). The struct deliberately carries no identity or timestamp so that
/// evaluating the same window twice yields an identical value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalResult {
    pub action: Action,
    pub confidence: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub reason: String,
    /// Advisory maximum holding duration in seconds.
    pub max_hold_secs: u64,

    // --- Diagnostics -------------------------------------------------------
    pub rsi: f64,
    pub rsi_slope: f64,
    pub price_change_2m: f64,
    /// MACD line minus signal line at the latest point.
    pub macd_strength: f64,
    pub volume_surge: bool,
    pub macd_crossover: bool,
}

impl SignalResult {
    /// The degraded empty-signal shape: hold with zeroed prices and
    /// diagnostics, a fixed 900-second hold ceiling, and the supplied reason.
    pub fn empty(reason: impl Into<String>) -> Self {
        Self {
            action: Action::Hold,
            confidence: 0.0,
            entry_price: 0.0,
            stop_loss: 0.0,
            take_profit: 0.0,
            reason: reason.into(),
            max_hold_secs: DEFAULT_MAX_HOLD_SECS,
            rsi: 0.0,
            rsi_slope: 0.0,
            price_change_2m: 0.0,
            macd_strength: 0.0,
            volume_surge: false,
            macd_crossover: false,
        }
    }
}
