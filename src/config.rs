// =============================================================================
// Strategy Parameters — externally supplied evaluator configuration
// =============================================================================
//
// Every tunable threshold, period and multiplier the evaluator reads lives
// here. The evaluator itself never mutates this struct and holds no defaults
// of its own: callers pass `&StrategyParams` explicitly into every call.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. All fields carry `#[serde(default = "...")]` so that adding new
// fields never breaks loading an older parameter file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_rsi_period() -> u32 {
    9
}

fn default_macd_fast() -> u32 {
    5
}

fn default_macd_slow() -> u32 {
    13
}

fn default_macd_signal() -> u32 {
    4
}

fn default_macd_period_scale() -> u32 {
    2
}

fn default_rsi_buy_threshold() -> f64 {
    40.0
}

fn default_rsi_sell_threshold() -> f64 {
    60.0
}

fn default_rsi_slope_min() -> f64 {
    0.5
}

fn default_price_change_min() -> f64 {
    0.1
}

fn default_volume_period() -> u32 {
    10
}

fn default_volume_multiplier() -> f64 {
    1.2
}

fn default_base_confidence() -> f64 {
    0.6
}

fn default_volume_confidence_bonus() -> f64 {
    0.1
}

fn default_stop_loss_pct() -> f64 {
    0.004
}

fn default_profit_target_pct() -> f64 {
    0.006
}

fn default_max_hold_secs() -> u64 {
    900
}

// =============================================================================
// StrategyParams
// =============================================================================

/// Tunable parameters for the fast-scalp evaluator.
///
/// The MACD periods are stored as the sibling-strategy base values together
/// with `macd_period_scale`; [`StrategyParams::macd_periods`] is the single
/// place the scale is applied, so the derived relationship stays visible in
/// the schema instead of being hardcoded at the call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyParams {
    /// RSI smoothing period.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: u32,

    /// Shared base MACD fast period (before scaling).
    #[serde(default = "default_macd_fast")]
    pub macd_fast: u32,

    /// Shared base MACD slow period (before scaling).
    #[serde(default = "default_macd_slow")]
    pub macd_slow: u32,

    /// Shared base MACD signal period (before scaling).
    #[serde(default = "default_macd_signal")]
    pub macd_signal: u32,

    /// Multiplier applied to the base MACD periods before use.
    #[serde(default = "default_macd_period_scale")]
    pub macd_period_scale: u32,

    /// Oversold cutoff: buys require RSI below this.
    #[serde(default = "default_rsi_buy_threshold")]
    pub rsi_buy_threshold: f64,

    /// Overbought cutoff: sells require RSI above this.
    #[serde(default = "default_rsi_sell_threshold")]
    pub rsi_sell_threshold: f64,

    /// Minimum RSI slope magnitude required in either direction.
    #[serde(default = "default_rsi_slope_min")]
    pub rsi_slope_min: f64,

    /// Minimum short-horizon momentum magnitude, in percent.
    #[serde(default = "default_price_change_min")]
    pub price_change_min: f64,

    /// Trailing window length for the volume average.
    #[serde(default = "default_volume_period")]
    pub volume_period: u32,

    /// Surge threshold multiplier applied to the volume average.
    #[serde(default = "default_volume_multiplier")]
    pub volume_multiplier: f64,

    /// Starting confidence before bonuses.
    #[serde(default = "default_base_confidence")]
    pub base_confidence: f64,

    /// Fixed bonus awarded once the volume-surge gate is met.
    #[serde(default = "default_volume_confidence_bonus")]
    pub volume_confidence_bonus: f64,

    /// Fractional stop-loss offset from the entry price.
    #[serde(default = "default_stop_loss_pct")]
    pub stop_loss_pct: f64,

    /// Fractional take-profit offset from the entry price.
    #[serde(default = "default_profit_target_pct")]
    pub profit_target_pct: f64,

    /// Advisory holding-time ceiling echoed in every directional result.
    #[serde(default = "default_max_hold_secs")]
    pub max_hold_secs: u64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            macd_period_scale: default_macd_period_scale(),
            rsi_buy_threshold: default_rsi_buy_threshold(),
            rsi_sell_threshold: default_rsi_sell_threshold(),
            rsi_slope_min: default_rsi_slope_min(),
            price_change_min: default_price_change_min(),
            volume_period: default_volume_period(),
            volume_multiplier: default_volume_multiplier(),
            base_confidence: default_base_confidence(),
            volume_confidence_bonus: default_volume_confidence_bonus(),
            stop_loss_pct: default_stop_loss_pct(),
            profit_target_pct: default_profit_target_pct(),
            max_hold_secs: default_max_hold_secs(),
        }
    }
}

impl StrategyParams {
    /// Effective MACD (fast, slow, signal) periods with the scale applied.
    pub fn macd_periods(&self) -> (usize, usize, usize) {
        let scale = self.macd_period_scale.max(1) as usize;
        (
            self.macd_fast as usize * scale,
            self.macd_slow as usize * scale,
            self.macd_signal as usize * scale,
        )
    }

    /// Load parameters from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read strategy params from {}", path.display()))?;

        let params: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse strategy params from {}", path.display()))?;

        info!(
            path = %path.display(),
            rsi_buy_threshold = params.rsi_buy_threshold,
            rsi_sell_threshold = params.rsi_sell_threshold,
            "strategy params loaded"
        );

        Ok(params)
    }

    /// Persist the current parameters to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    ///
    /// This prevents corruption if the process crashes mid-write.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise strategy params to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp params to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp params to {}", path.display()))?;

        info!(path = %path.display(), "strategy params saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_have_expected_values() {
        let p = StrategyParams::default();
        assert_eq!(p.rsi_period, 9);
        assert_eq!(p.volume_period, 10);
        assert!((p.rsi_buy_threshold - 40.0).abs() < f64::EPSILON);
        assert!((p.rsi_sell_threshold - 60.0).abs() < f64::EPSILON);
        assert!((p.base_confidence - 0.6).abs() < f64::EPSILON);
        assert!((p.volume_confidence_bonus - 0.1).abs() < f64::EPSILON);
        assert_eq!(p.max_hold_secs, 900);
    }

    #[test]
    fn macd_periods_apply_scale() {
        let p = StrategyParams::default();
        assert_eq!(p.macd_periods(), (10, 26, 8));

        let unscaled = StrategyParams {
            macd_period_scale: 1,
            ..StrategyParams::default()
        };
        assert_eq!(unscaled.macd_periods(), (5, 13, 4));
    }

    #[test]
    fn macd_scale_zero_treated_as_one() {
        let p = StrategyParams {
            macd_period_scale: 0,
            ..StrategyParams::default()
        };
        assert_eq!(p.macd_periods(), (5, 13, 4));
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let p: StrategyParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p.rsi_period, 9);
        assert_eq!(p.macd_period_scale, 2);
        assert!((p.volume_multiplier - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "rsi_buy_threshold": 35.0, "volume_period": 20 }"#;
        let p: StrategyParams = serde_json::from_str(json).unwrap();
        assert!((p.rsi_buy_threshold - 35.0).abs() < f64::EPSILON);
        assert_eq!(p.volume_period, 20);
        assert!((p.rsi_sell_threshold - 60.0).abs() < f64::EPSILON);
        assert_eq!(p.max_hold_secs, 900);
    }

    #[test]
    fn roundtrip_serialisation() {
        let p = StrategyParams::default();
        let json = serde_json::to_string(&p).unwrap();
        let p2: StrategyParams = serde_json::from_str(&json).unwrap();
        assert_eq!(p.rsi_period, p2.rsi_period);
        assert_eq!(p.macd_periods(), p2.macd_periods());
        assert!((p.stop_loss_pct - p2.stop_loss_pct).abs() < f64::EPSILON);
    }

    #[test]
    fn atomic_save_and_load() {
        let dir = std::env::temp_dir().join("fastscalp-params-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("params.json");

        let mut p = StrategyParams::default();
        p.rsi_buy_threshold = 33.0;
        p.save(&path).unwrap();

        let loaded = StrategyParams::load(&path).unwrap();
        assert!((loaded.rsi_buy_threshold - 33.0).abs() < f64::EPSILON);

        // The tmp sibling must not linger after a successful save.
        assert!(!path.with_extension("json.tmp").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_missing_file_errors() {
        let err = StrategyParams::load("/nonexistent/fastscalp/params.json");
        assert!(err.is_err());
    }
}
