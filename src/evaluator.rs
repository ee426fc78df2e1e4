// =============================================================================
// Signal Evaluator — fast-scalp decision policy
// =============================================================================
//
// Turns a rolling OHLCV window plus an explicit parameter bundle into a
// buy/sell/hold recommendation.
//
// Pipeline:
//   1. Validate the window (length, finite positive closes)
//   2. Compute indicators (EMA-based RSI, scaled-period MACD)
//   3. Extract features (slope, momentum, volume surge, crossover)
//   4. Apply the conjunction gates — buy branch first, then sell
//   5. Build confidence from threshold distance + momentum/volume/MACD bonuses
//   6. Derive stop-loss / take-profit from the entry price
//
// A directional action requires EVERY gate of its branch to pass; partial
// matches always fall through to hold. Confidence is clamped to [0, 0.9].
//
// The evaluator is a pure function over its inputs: no shared state, no I/O,
// safe to call concurrently for different symbols.
// =============================================================================

use thiserror::Error;
use tracing::{debug, info};

use crate::config::StrategyParams;
use crate::features::{self, FeatureSet};
use crate::indicators::{macd, rsi};
use crate::types::{Action, Candle, SignalResult, MIN_SAMPLES};
use crate::window::CandleWindow;

/// Typed evaluation failures. Both tiers are recoverable: the public
/// [`SignalEvaluator::evaluate`] folds them into the empty-signal shape, but
/// callers that want to distinguish them can use
/// [`SignalEvaluator::evaluate_checked`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The window is shorter than the minimum evaluation length.
    #[error("Insufficient data: {len} of {MIN_SAMPLES} samples")]
    InsufficientData { len: usize },

    /// A sample failed validation (non-finite or non-positive close,
    /// non-finite or negative volume).
    #[error("Invalid sample at index {index}: {detail}")]
    BadInput { index: usize, detail: String },
}

pub struct SignalEvaluator;

impl SignalEvaluator {
    /// Evaluate a window of candles. Never panics and never returns an
    /// error: degraded outcomes surface as the empty-signal shape with the
    /// failure description as the reason.
    pub fn evaluate(candles: &[Candle], params: &StrategyParams) -> SignalResult {
        match Self::evaluate_checked(candles, params) {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "evaluation degraded to empty signal");
                SignalResult::empty(e.to_string())
            }
        }
    }

    /// Evaluate with the failure tier visible in the type. Prefer
    /// [`SignalEvaluator::evaluate`] unless the caller needs to distinguish
    /// insufficient data from malformed input.
    pub fn evaluate_checked(
        candles: &[Candle],
        params: &StrategyParams,
    ) -> Result<SignalResult, EvalError> {
        // ── 1. Validate ──────────────────────────────────────────────────
        if candles.len() < MIN_SAMPLES {
            return Err(EvalError::InsufficientData { len: candles.len() });
        }
        for (index, c) in candles.iter().enumerate() {
            if !c.close.is_finite() || c.close <= 0.0 {
                return Err(EvalError::BadInput {
                    index,
                    detail: format!("close {} is not a positive finite number", c.close),
                });
            }
            if !c.volume.is_finite() || c.volume < 0.0 {
                return Err(EvalError::BadInput {
                    index,
                    detail: format!("volume {} is not a non-negative finite number", c.volume),
                });
            }
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let current_price = *closes.last().expect("validated non-empty window");

        // ── 2. Indicators ────────────────────────────────────────────────
        let rsi_series = rsi(&closes, params.rsi_period as usize);
        let (fast, slow, signal) = params.macd_periods();
        let macd_series = macd(&closes, fast, slow, signal);

        // ── 3. Features ──────────────────────────────────────────────────
        let fs = features::extract(candles, &rsi_series, &macd_series, params);

        // ── 4/5. Decision + confidence ───────────────────────────────────
        let (action, confidence, reason) = Self::decide(&fs, params);

        // ── 6. Stop-loss / take-profit ───────────────────────────────────
        let (stop_loss, take_profit) = match action {
            Action::Buy => (
                current_price * (1.0 - params.stop_loss_pct),
                current_price * (1.0 + params.profit_target_pct),
            ),
            Action::Sell => (
                current_price * (1.0 + params.stop_loss_pct),
                current_price * (1.0 - params.profit_target_pct),
            ),
            Action::Hold => (current_price, current_price),
        };

        let result = SignalResult {
            action,
            confidence,
            entry_price: current_price,
            stop_loss,
            take_profit,
            reason,
            max_hold_secs: params.max_hold_secs,
            rsi: fs.rsi,
            rsi_slope: fs.rsi_slope,
            price_change_2m: fs.price_change_2m,
            macd_strength: fs.macd_line - fs.signal_line,
            volume_surge: fs.volume_surge,
            macd_crossover: fs.macd_crossover,
        };

        match result.action {
            Action::Hold => debug!(
                rsi = result.rsi,
                rsi_slope = result.rsi_slope,
                price_change_2m = result.price_change_2m,
                volume_surge = result.volume_surge,
                macd_crossover = result.macd_crossover,
                "no signal"
            ),
            _ => info!(
                action = %result.action,
                confidence = result.confidence,
                entry_price = result.entry_price,
                stop_loss = result.stop_loss,
                take_profit = result.take_profit,
                rsi = result.rsi,
                "signal generated"
            ),
        }

        Ok(result)
    }

    /// Evaluate the current window held for `symbol`, reading a consistent
    /// snapshot from the shared rolling window.
    pub fn evaluate_symbol(
        window: &CandleWindow,
        symbol: &str,
        params: &StrategyParams,
    ) -> SignalResult {
        let candles = window.snapshot(symbol);
        Self::evaluate(&candles, params)
    }

    /// Apply the ordered threshold rules. Buy is checked before sell; the
    /// two branches are mutually exclusive for sensibly ordered thresholds
    /// since RSI cannot be below the buy cutoff and above the sell cutoff at
    /// once.
    fn decide(fs: &FeatureSet, params: &StrategyParams) -> (Action, f64, String) {
        let buy = fs.rsi < params.rsi_buy_threshold
            && fs.macd_crossover
            && fs.volume_surge
            && fs.rsi_slope > params.rsi_slope_min
            && fs.price_change_2m > params.price_change_min;

        if buy {
            let rsi_distance = params.rsi_buy_threshold - fs.rsi;
            let momentum_bonus = ((fs.rsi_slope - params.rsi_slope_min) / 10.0
                + (fs.price_change_2m - params.price_change_min) / 30.0)
                .clamp(0.0, 0.3);
            let macd_bonus = macd_strength_bonus(fs.macd_line - fs.signal_line, fs.signal_line);

            let confidence = (params.base_confidence
                + rsi_distance / 25.0
                + momentum_bonus
                + params.volume_confidence_bonus
                + macd_bonus)
                .clamp(0.0, 0.9);

            let reason = format!(
                "Fast-scalp BUY: RSI={:.1} (slope {:.1}), MACD crossover, momentum {:.2}%",
                fs.rsi, fs.rsi_slope, fs.price_change_2m
            );
            return (Action::Buy, confidence, reason);
        }

        let sell = fs.rsi > params.rsi_sell_threshold
            && !fs.macd_crossover
            && fs.volume_surge
            && fs.rsi_slope < -params.rsi_slope_min
            && fs.price_change_2m < -params.price_change_min;

        if sell {
            let rsi_distance = fs.rsi - params.rsi_sell_threshold;
            let momentum_bonus = ((-fs.rsi_slope - params.rsi_slope_min) / 10.0
                + (-fs.price_change_2m - params.price_change_min) / 30.0)
                .clamp(0.0, 0.3);
            let macd_bonus = macd_strength_bonus(fs.signal_line - fs.macd_line, fs.signal_line);

            let confidence = (params.base_confidence
                + rsi_distance / 25.0
                + momentum_bonus
                + params.volume_confidence_bonus
                + macd_bonus)
                .clamp(0.0, 0.9);

            let reason = format!(
                "Fast-scalp SELL: RSI={:.1} (slope {:.1}), no MACD crossover, momentum {:.2}%",
                fs.rsi, fs.rsi_slope, fs.price_change_2m
            );
            return (Action::Sell, confidence, reason);
        }

        (Action::Hold, 0.0, "No signal".to_string())
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Bonus for the favourable separation between MACD line and signal line,
/// normalised by the signal-line magnitude. Zero when the signal line is
/// zero (no meaningful scale to normalise against).
fn macd_strength_bonus(separation: f64, signal_line: f64) -> f64 {
    if signal_line == 0.0 {
        return 0.0;
    }
    (separation / signal_line.abs() * 0.1).clamp(0.0, 0.1)
}
