//! Per-timeframe scoring.

use tracing::debug;

use super::indicators::calculate_bundle;
use super::patterns::detect_patterns;
use crate::config::{EngineConfig, ScoringWeights};
use crate::types::{
    IndicatorBundle, IndicatorOutcome, ObvTrend, OhlcvBar, PatternSet, RationaleEntry,
    TimeframeAnalysis, TimeframeScore,
};

pub const VOLUME_SPIKE: &str = "Volume Spike";
pub const MACD_BULLISH: &str = "MACD Bullish";
pub const MACD_BEARISH: &str = "MACD Bearish";
pub const RSI_OVERSOLD: &str = "RSI Oversold";
pub const RSI_OVERBOUGHT: &str = "RSI Overbought";
pub const RSI_NEUTRAL: &str = "RSI Neutral";
pub const ABOVE_SMA20: &str = "Above SMA20";
pub const BELOW_SMA20: &str = "Below SMA20";
pub const OBV_RISING: &str = "OBV Rising";
pub const BULL_FLAG: &str = "Bull Flag Pattern";
pub const DOUBLE_BOTTOM: &str = "Double Bottom";

/// Score one timeframe.
///
/// Each rule triggers independently and adds its points; rationale entries
/// are emitted in rule order.
pub fn score_timeframe(
    timeframe: &str,
    bars: &[OhlcvBar],
    config: &EngineConfig,
) -> TimeframeAnalysis {
    let indicators = match calculate_bundle(bars, &config.indicators) {
        IndicatorOutcome::Ready(bundle) => bundle,
        IndicatorOutcome::InsufficientData { available, required } => {
            debug!(
                "Skipping {} timeframe: {} bars, {} required",
                timeframe, available, required
            );
            return TimeframeAnalysis::InsufficientData {
                timeframe: timeframe.to_string(),
                available,
                required,
            };
        }
    };

    let patterns = detect_patterns(bars, &config.patterns);
    let rationale = collect_rationale(timeframe, &indicators, &patterns, &config.scoring);
    let score: i32 = rationale.iter().map(|r| r.score).sum();

    debug!(
        "Scored {} timeframe: {} from {} signals",
        timeframe,
        score,
        rationale.len()
    );

    TimeframeAnalysis::Scored(TimeframeScore {
        timeframe: timeframe.to_string(),
        score,
        rationale,
        indicators,
        patterns,
        bars: bars.len(),
    })
}

fn collect_rationale(
    timeframe: &str,
    ind: &IndicatorBundle,
    patterns: &PatternSet,
    w: &ScoringWeights,
) -> Vec<RationaleEntry> {
    let mut entries = Vec::new();
    let mut push = |signal: &str, score: i32, explain: String| {
        entries.push(RationaleEntry {
            signal: signal.to_string(),
            timeframe: timeframe.to_string(),
            score,
            explain,
        });
    };

    if ind.volume_z > w.volume_spike_z {
        let points =
            ((ind.volume_z * w.volume_spike_multiplier).round() as i32).min(w.volume_spike_cap);
        push(
            VOLUME_SPIKE,
            points,
            format!(
                "Latest volume is {:.2} standard deviations above its trailing average",
                ind.volume_z
            ),
        );
    }

    if ind.macd > 0.0 {
        push(
            MACD_BULLISH,
            w.macd_bullish_points,
            format!("EMA12 is above EMA26 (MACD {:.4})", ind.macd),
        );
    } else if ind.macd < w.macd_bearish_threshold {
        push(
            MACD_BEARISH,
            w.macd_bearish_points,
            format!("EMA12 is below EMA26 (MACD {:.4})", ind.macd),
        );
    }

    if ind.rsi < w.rsi_oversold {
        push(
            RSI_OVERSOLD,
            w.rsi_oversold_points,
            format!(
                "RSI {:.1} is below {:.0}, the market looks oversold",
                ind.rsi, w.rsi_oversold
            ),
        );
    } else if ind.rsi > w.rsi_overbought {
        push(
            RSI_OVERBOUGHT,
            w.rsi_overbought_points,
            format!(
                "RSI {:.1} is above {:.0}, the market looks overbought",
                ind.rsi, w.rsi_overbought
            ),
        );
    } else if ind.rsi >= w.rsi_neutral_low && ind.rsi <= w.rsi_neutral_high {
        push(
            RSI_NEUTRAL,
            w.rsi_neutral_points,
            format!(
                "RSI {:.1} sits in the neutral {:.0}-{:.0} band",
                ind.rsi, w.rsi_neutral_low, w.rsi_neutral_high
            ),
        );
    }

    if ind.close > ind.sma20 * w.above_sma_ratio {
        push(
            ABOVE_SMA20,
            w.above_sma_points,
            format!("Close {:.2} is more than 2% above SMA20 {:.2}", ind.close, ind.sma20),
        );
    } else if ind.close < ind.sma20 * w.below_sma_ratio {
        push(
            BELOW_SMA20,
            w.below_sma_points,
            format!("Close {:.2} is more than 2% below SMA20 {:.2}", ind.close, ind.sma20),
        );
    }

    if ind.obv_trend == ObvTrend::Up {
        push(
            OBV_RISING,
            w.obv_rising_points,
            "On-balance volume is rising, buyers are accumulating".to_string(),
        );
    }

    if patterns.bull_flag.detected {
        push(
            BULL_FLAG,
            (patterns.bull_flag.confidence * w.bull_flag_factor).round() as i32,
            format!(
                "Bull flag continuation forming ({:.0}% pattern confidence)",
                patterns.bull_flag.confidence
            ),
        );
    }

    if patterns.double_bottom.detected {
        push(
            DOUBLE_BOTTOM,
            (patterns.double_bottom.confidence * w.double_bottom_factor).round() as i32,
            format!(
                "Double bottom reversal forming ({:.0}% pattern confidence)",
                patterns.double_bottom.confidence
            ),
        );
    }

    entries
}
