// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// Shows the relationship between two EMAs of price:
//   MACD line   = EMA(close, fast) - EMA(close, slow)
//   Signal line = EMA(MACD line, signal)
//   Histogram   = MACD line - Signal line
//
// All three series span the full input length because the underlying EMA is
// seeded on the first observation.
// =============================================================================

use crate::indicators::ema::ema;

/// The three MACD output series, each as long as the input.
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// Constant-zero fallback of the given length, used when the computation
    /// cannot produce trustworthy values.
    fn zeroed(len: usize) -> Self {
        Self {
            macd_line: vec![0.0; len],
            signal_line: vec![0.0; len],
            histogram: vec![0.0; len],
        }
    }
}

/// Compute the MACD line, signal line and histogram for `closes`.
///
/// # Edge cases
/// - Empty input => three empty series.
/// - A zero period on any leg => constant-zero fallback series.
/// - Non-finite values are replaced with 0.0 so the histogram identity
///   `histogram[i] == macd_line[i] - signal_line[i]` holds exactly for
///   every output point.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    if closes.is_empty() {
        return MacdSeries::default();
    }

    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    if fast_ema.len() != closes.len() || slow_ema.len() != closes.len() {
        return MacdSeries::zeroed(closes.len());
    }

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(&f, &s)| {
            let v = f - s;
            if v.is_finite() { v } else { 0.0 }
        })
        .collect();

    let signal_raw = ema(&macd_line, signal);
    if signal_raw.len() != closes.len() {
        return MacdSeries::zeroed(closes.len());
    }
    let signal_line: Vec<f64> = signal_raw
        .into_iter()
        .map(|v| if v.is_finite() { v } else { 0.0 })
        .collect();

    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(&m, &s)| m - s)
        .collect();

    MacdSeries {
        macd_line,
        signal_line,
        histogram,
    }
}
