// =============================================================================
// Feature Extractor — momentum features derived from indicator output
// =============================================================================
//
// Reduces the full indicator series plus the raw window to the handful of
// scalars the decision policy compares against its thresholds. Every field
// is finite: undefined indicator points are substituted with their neutral
// defaults (RSI -> 50, MACD line/signal -> 0) before any comparison.
// =============================================================================

use crate::config::StrategyParams;
use crate::indicators::{MacdSeries, RSI_NEUTRAL};
use crate::types::Candle;

/// Derived scalars consumed by the decision policy.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// Latest RSI value, neutral-defaulted.
    pub rsi: f64,
    /// Latest MACD line value, zero-defaulted.
    pub macd_line: f64,
    /// Latest signal line value, zero-defaulted.
    pub signal_line: f64,
    /// Current RSI minus the RSI three samples back (0.0 with < 3 points).
    pub rsi_slope: f64,
    /// Percentage change of the current close vs. three samples back
    /// (0.0 with < 3 points).
    pub price_change_2m: f64,
    /// Current volume exceeds the trailing average scaled by the multiplier.
    pub volume_surge: bool,
    /// MACD line above signal line.
    pub macd_crossover: bool,
}

/// Take the last element of a series, substituting `default` when the series
/// is empty or the value is non-finite.
fn last_or(series: &[f64], default: f64) -> f64 {
    match series.last() {
        Some(&v) if v.is_finite() => v,
        _ => default,
    }
}

/// Build the feature set from the computed indicator series and the raw
/// candle window.
pub fn extract(
    candles: &[Candle],
    rsi_series: &[f64],
    macd_series: &MacdSeries,
    params: &StrategyParams,
) -> FeatureSet {
    let rsi = last_or(rsi_series, RSI_NEUTRAL);
    let macd_line = last_or(&macd_series.macd_line, 0.0);
    let signal_line = last_or(&macd_series.signal_line, 0.0);

    let macd_crossover = macd_line > signal_line;

    // RSI slope over a fixed 3-sample lookback.
    let rsi_slope = if rsi_series.len() >= 3 {
        let prev = rsi_series[rsi_series.len() - 3];
        if prev.is_finite() { rsi - prev } else { 0.0 }
    } else {
        0.0
    };

    // Short-horizon price momentum over the same lookback.
    let price_change_2m = if candles.len() >= 3 {
        let prev_close = candles[candles.len() - 3].close;
        if prev_close != 0.0 {
            (candles[candles.len() - 1].close / prev_close - 1.0) * 100.0
        } else {
            0.0
        }
    } else {
        0.0
    };

    // Trailing volume average; with too little history the latest volume
    // stands in for the average, which makes the surge comparison trivially
    // false for multipliers above 1.
    let current_volume = candles.last().map(|c| c.volume).unwrap_or(0.0);
    let volume_period = params.volume_period as usize;
    let volume_avg = if volume_period > 0 && candles.len() >= volume_period {
        let tail = &candles[candles.len() - volume_period..];
        tail.iter().map(|c| c.volume).sum::<f64>() / volume_period as f64
    } else {
        current_volume
    };
    let volume_surge = current_volume > volume_avg * params.volume_multiplier;

    FeatureSet {
        rsi,
        macd_line,
        signal_line,
        rsi_slope,
        price_change_2m,
        volume_surge,
        macd_crossover,
    }
}
