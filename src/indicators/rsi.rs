// =============================================================================
// Relative Strength Index (RSI) — EMA smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes. The first
//          close has no delta; its gain and loss are both zero.
// Step 2 — Split into gains (positive deltas, else 0) and losses (negated
//          negative deltas, else 0).
// Step 3 — Smooth each side independently with the span EMA.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// The zero-loss case saturates to 100 rather than producing NaN/inf, and the
// zero-movement case resolves to the neutral 50.
// =============================================================================

use crate::indicators::ema::ema;

/// Neutral RSI value substituted wherever the computation is undefined.
pub const RSI_NEUTRAL: f64 = 50.0;

/// Compute the full RSI series for the given `closes` and smoothing `period`.
///
/// The output has the same length as the input: one value per close, with
/// the first point resolving to the neutral 50 (no delta exists yet).
///
/// # Edge cases
/// - `period == 0` or empty input => empty vec
/// - avg_loss == 0 with gains present => 100.0 (saturating, never NaN)
/// - avg_gain == avg_loss == 0 => 50.0 (no movement)
/// - Any non-finite intermediate resolves to the neutral 50; as a last
///   resort the whole series falls back to a constant 50.
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.is_empty() {
        return Vec::new();
    }

    // --- Split deltas into gain/loss series (index 0 carries no delta) ------
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    gains.push(0.0);
    losses.push(0.0);

    for w in closes.windows(2) {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            gains.push(delta);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-delta);
        }
    }

    // --- Smooth each side independently --------------------------------------
    let avg_gains = ema(&gains, period);
    let avg_losses = ema(&losses, period);

    if avg_gains.len() != closes.len() || avg_losses.len() != closes.len() {
        // Degenerate input: fall back to a constant neutral series.
        return vec![RSI_NEUTRAL; closes.len()];
    }

    avg_gains
        .iter()
        .zip(avg_losses.iter())
        .map(|(&g, &l)| rsi_from_averages(g, l))
        .collect()
}

/// Convert smoothed average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let value = if avg_loss == 0.0 && avg_gain == 0.0 {
        RSI_NEUTRAL // No movement at all.
    } else if avg_loss == 0.0 {
        100.0 // All gains, no losses.
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        RSI_NEUTRAL
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(rsi(&[], 9).is_empty());
    }

    #[test]
    fn rsi_period_zero() {
        assert!(rsi(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn rsi_output_matches_input_length() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        assert_eq!(rsi(&closes, 9).len(), 20);
    }

    #[test]
    fn rsi_first_point_neutral() {
        let closes = vec![100.0, 101.0, 102.0];
        let series = rsi(&closes, 9);
        assert!((series[0] - 50.0).abs() < 1e-12);
    }

    #[test]
    fn rsi_all_gains_saturates_to_100() {
        // Strictly ascending prices => zero average loss => RSI = 100,
        // never NaN.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let series = rsi(&closes, 9);
        for &v in &series[1..] {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
            assert!(v.is_finite());
        }
    }

    #[test]
    fn rsi_all_losses_near_zero() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let series = rsi(&closes, 9);
        for &v in &series[1..] {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_market_neutral() {
        // No price change at all => RSI = 50 everywhere.
        let closes = vec![100.0; 30];
        let series = rsi(&closes, 9);
        for &v in &series {
            assert!((v - 50.0).abs() < 1e-12, "expected 50.0, got {v}");
        }
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let series = rsi(&closes, 9);
        assert_eq!(series.len(), closes.len());
        for &v in &series {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn rsi_turns_up_after_dip() {
        // Fall then recover: the tail of the series must be rising.
        let mut closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        closes.extend((0..5).map(|i| 86.0 + i as f64 * 2.0));
        let series = rsi(&closes, 9);
        let n = series.len();
        assert!(series[n - 1] > series[n - 3]);
    }
}
