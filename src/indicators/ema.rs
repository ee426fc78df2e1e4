// =============================================================================
// Exponential Moving Average (EMA) — span smoothing
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = value_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The series is seeded with the very first observation (not an SMA warm-up),
// so there is one output per input and no leading undefined region.
// =============================================================================

/// Compute the EMA series for the given `values` slice and smoothing `period`.
///
/// The output has exactly the same length as the input; element `i` is the
/// EMA over `values[..=i]`.
///
/// # Edge cases
/// - `period == 0` => empty vec (division by zero guard)
/// - empty input => empty vec
/// - Non-finite inputs propagate through the recursion; callers that need
///   finite output must substitute defaults downstream.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.is_empty() {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for &value in &values[1..] {
        prev = value * multiplier + prev * (1.0 - multiplier);
        result.push(prev);
    }

    result
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_period_zero() {
        assert!(ema(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn ema_output_matches_input_length() {
        let values: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert_eq!(ema(&values, 5).len(), 10);
        assert_eq!(ema(&values, 50).len(), 10); // period longer than input is fine
    }

    #[test]
    fn ema_seeds_on_first_observation() {
        let values = vec![42.0, 42.0, 42.0];
        let series = ema(&values, 9);
        // A constant series stays constant under any smoothing.
        for &v in &series {
            assert!((v - 42.0).abs() < 1e-12);
        }
    }

    #[test]
    fn ema_known_values() {
        // 3-period EMA of [1, 2, 3, 4]: multiplier = 2/4 = 0.5, seed = 1.0
        //   ema[1] = 2*0.5 + 1*0.5 = 1.5
        //   ema[2] = 3*0.5 + 1.5*0.5 = 2.25
        //   ema[3] = 4*0.5 + 2.25*0.5 = 3.125
        let series = ema(&[1.0, 2.0, 3.0, 4.0], 3);
        let expected = [1.0, 1.5, 2.25, 3.125];
        for (a, b) in series.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "got {a}, expected {b}");
        }
    }

    #[test]
    fn ema_tracks_trend_with_lag() {
        let values: Vec<f64> = (1..=50).map(|x| x as f64).collect();
        let series = ema(&values, 10);
        let last = *series.last().unwrap();
        // EMA must lag below the latest value of a rising series but stay
        // well above the starting value.
        assert!(last < 50.0);
        assert!(last > 40.0);
    }
}
