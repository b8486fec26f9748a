use std::env;

use crate::types::{RiskTolerance, Timeframe};

/// Indicator lookback periods.
#[derive(Debug, Clone)]
pub struct IndicatorPeriods {
    /// Minimum bars before a timeframe is scored at all.
    pub min_bars: usize,
    pub sma: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi: usize,
    pub atr: usize,
    /// Trailing window for the volume z-score.
    pub volume_window: usize,
    /// Bars between the OBV values compared for trend.
    pub obv_lookback: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            min_bars: 20,
            sma: 20,
            ema_fast: 12,
            ema_slow: 26,
            rsi: 14,
            atr: 14,
            volume_window: 50,
            obv_lookback: 10,
        }
    }
}

/// Chart pattern windows and thresholds.
#[derive(Debug, Clone)]
pub struct PatternConfig {
    pub bull_flag_window: usize,
    /// Trailing bars excluded from the prior-high search.
    pub bull_flag_length: usize,
    /// Trailing bars averaged for the contracted volume.
    pub bull_flag_recent_volume: usize,
    pub bull_flag_min_pullback: f64,
    pub bull_flag_max_pullback: f64,
    pub bull_flag_min_volume_contraction: f64,
    pub double_bottom_window: usize,
    pub double_bottom_min_separation: usize,
    pub double_bottom_min_similarity: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            bull_flag_window: 40,
            bull_flag_length: 10,
            bull_flag_recent_volume: 20,
            bull_flag_min_pullback: 0.03,
            bull_flag_max_pullback: 0.18,
            bull_flag_min_volume_contraction: 0.20,
            double_bottom_window: 50,
            double_bottom_min_separation: 10,
            double_bottom_min_similarity: 0.95,
        }
    }
}

/// Point values and trigger thresholds for timeframe scoring.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub volume_spike_z: f64,
    pub volume_spike_multiplier: f64,
    pub volume_spike_cap: i32,
    pub macd_bullish_points: i32,
    pub macd_bearish_threshold: f64,
    pub macd_bearish_points: i32,
    pub rsi_oversold: f64,
    pub rsi_oversold_points: i32,
    pub rsi_overbought: f64,
    pub rsi_overbought_points: i32,
    pub rsi_neutral_low: f64,
    pub rsi_neutral_high: f64,
    pub rsi_neutral_points: i32,
    pub above_sma_ratio: f64,
    pub above_sma_points: i32,
    pub below_sma_ratio: f64,
    pub below_sma_points: i32,
    pub obv_rising_points: i32,
    pub bull_flag_factor: f64,
    pub double_bottom_factor: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            volume_spike_z: 2.0,
            volume_spike_multiplier: 8.0,
            volume_spike_cap: 25,
            macd_bullish_points: 12,
            macd_bearish_threshold: -0.5,
            macd_bearish_points: -8,
            rsi_oversold: 30.0,
            rsi_oversold_points: 15,
            rsi_overbought: 70.0,
            rsi_overbought_points: -10,
            rsi_neutral_low: 40.0,
            rsi_neutral_high: 60.0,
            rsi_neutral_points: 5,
            above_sma_ratio: 1.02,
            above_sma_points: 8,
            below_sma_ratio: 0.98,
            below_sma_points: -5,
            obv_rising_points: 7,
            bull_flag_factor: 0.15,
            double_bottom_factor: 0.12,
        }
    }
}

/// Cross-timeframe weights by bar duration.
#[derive(Debug, Clone)]
pub struct TimeframeWeights {
    pub fifteen_minutes: f64,
    pub thirty_minutes: f64,
    pub one_hour: f64,
    pub four_hours: f64,
    pub one_day: f64,
    pub one_week: f64,
    pub one_month: f64,
    /// Weight for labels outside the known set.
    pub default_weight: f64,
}

impl Default for TimeframeWeights {
    fn default() -> Self {
        Self {
            fifteen_minutes: 0.6,
            thirty_minutes: 0.8,
            one_hour: 1.0,
            four_hours: 1.2,
            one_day: 1.5,
            one_week: 1.8,
            one_month: 2.0,
            default_weight: 1.0,
        }
    }
}

impl TimeframeWeights {
    /// Weight for a timeframe label.
    pub fn weight_for(&self, label: &str) -> f64 {
        match Timeframe::from_label(label) {
            Some(Timeframe::FifteenMinutes) => self.fifteen_minutes,
            Some(Timeframe::ThirtyMinutes) => self.thirty_minutes,
            Some(Timeframe::OneHour) => self.one_hour,
            Some(Timeframe::FourHours) => self.four_hours,
            Some(Timeframe::OneDay) => self.one_day,
            Some(Timeframe::OneWeek) => self.one_week,
            Some(Timeframe::OneMonth) => self.one_month,
            None => self.default_weight,
        }
    }
}

/// Suggestion thresholds and position sizing.
#[derive(Debug, Clone)]
pub struct SizingConfig {
    pub buy_confidence: u8,
    pub sell_confidence: u8,
    /// Size in percent at 100% confidence and a 1.0 multiplier.
    pub base_size_pct: f64,
    pub conservative_multiplier: f64,
    pub moderate_multiplier: f64,
    pub aggressive_multiplier: f64,
    /// Remaining size below which the position counts as already filled.
    pub near_target_pct: f64,
    pub rationale_limit: usize,
    pub relevance_limit: usize,
    pub explanation_drivers: usize,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            buy_confidence: 65,
            sell_confidence: 35,
            base_size_pct: 5.0,
            conservative_multiplier: 0.5,
            moderate_multiplier: 1.0,
            aggressive_multiplier: 2.0,
            near_target_pct: 0.5,
            rationale_limit: 8,
            relevance_limit: 3,
            explanation_drivers: 3,
        }
    }
}

impl SizingConfig {
    pub fn risk_multiplier(&self, tolerance: RiskTolerance) -> f64 {
        match tolerance {
            RiskTolerance::Conservative => self.conservative_multiplier,
            RiskTolerance::Moderate => self.moderate_multiplier,
            RiskTolerance::Aggressive => self.aggressive_multiplier,
        }
    }
}

/// The complete heuristic model. Built once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub indicators: IndicatorPeriods,
    pub patterns: PatternConfig,
    pub scoring: ScoringWeights,
    pub timeframe_weights: TimeframeWeights,
    pub sizing: SizingConfig,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Whether the synthetic-data demo endpoint is served.
    pub demo_enabled: bool,
    /// Upper bound on bars accepted per timeframe.
    pub max_bars_per_timeframe: usize,
    /// Upper bound on timeframes per request.
    pub max_timeframes: usize,
    /// Scoring model.
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            demo_enabled: true,
            max_bars_per_timeframe: 5000,
            max_timeframes: 7,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            demo_enabled: env::var("DEMO_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.demo_enabled),
            max_bars_per_timeframe: env::var("MAX_BARS_PER_TIMEFRAME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_bars_per_timeframe),
            max_timeframes: env::var("MAX_TIMEFRAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_timeframes),
            engine: EngineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_weights() {
        let weights = TimeframeWeights::default();
        assert_eq!(weights.weight_for("1M"), 2.0);
        assert_eq!(weights.weight_for("1W"), 1.8);
        assert_eq!(weights.weight_for("1D"), 1.5);
        assert_eq!(weights.weight_for("4h"), 1.2);
        assert_eq!(weights.weight_for("1h"), 1.0);
        assert_eq!(weights.weight_for("30m"), 0.8);
        assert_eq!(weights.weight_for("15m"), 0.6);
        assert_eq!(weights.weight_for("3d"), 1.0);
    }

    #[test]
    fn test_risk_multipliers() {
        let sizing = SizingConfig::default();
        assert_eq!(sizing.risk_multiplier(RiskTolerance::Conservative), 0.5);
        assert_eq!(sizing.risk_multiplier(RiskTolerance::Moderate), 1.0);
        assert_eq!(sizing.risk_multiplier(RiskTolerance::Aggressive), 2.0);
    }

    #[test]
    fn test_server_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert!(config.demo_enabled);
        assert_eq!(config.max_timeframes, 7);
    }
}
