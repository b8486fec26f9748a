use serde::{Deserialize, Serialize};

/// Direction of on-balance volume over the lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObvTrend {
    Up,
    Down,
    Flat,
}

/// Scalar indicators derived from one timeframe's bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    /// Latest close.
    pub close: f64,
    pub sma20: f64,
    pub ema12: f64,
    pub ema26: f64,
    /// EMA(12) - EMA(26).
    pub macd: f64,
    /// 0-100.
    pub rsi: f64,
    pub atr: f64,
    /// Latest volume against the trailing volume window.
    pub volume_z: f64,
    pub obv_trend: ObvTrend,
    /// Latest bar-over-bar close change in percent.
    pub price_change_pct: f64,
}

/// Result of computing indicators for a series.
///
/// Short series are not an error; they surface as `InsufficientData` and
/// the timeframe is skipped downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutcome {
    Ready(IndicatorBundle),
    InsufficientData { available: usize, required: usize },
}

/// Outcome of a single chart pattern check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub detected: bool,
    /// 0-100. Zero when not detected.
    pub confidence: f64,
}

impl PatternMatch {
    pub fn none() -> Self {
        Self {
            detected: false,
            confidence: 0.0,
        }
    }

    pub fn detected(confidence: f64) -> Self {
        Self {
            detected: true,
            confidence: confidence.clamp(0.0, 100.0),
        }
    }
}

/// All pattern checks for one timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternSet {
    pub bull_flag: PatternMatch,
    pub double_bottom: PatternMatch,
}

/// One itemized contribution to a timeframe score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationaleEntry {
    /// Signal name, e.g. "RSI Oversold".
    pub signal: String,
    pub timeframe: String,
    /// Signed contribution: positive is bullish, negative bearish.
    pub score: i32,
    pub explain: String,
}

/// Score for a timeframe with enough data.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeframeScore {
    pub timeframe: String,
    pub score: i32,
    pub rationale: Vec<RationaleEntry>,
    pub indicators: IndicatorBundle,
    pub patterns: PatternSet,
    pub bars: usize,
}

/// Per-timeframe result of the scorer.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeframeAnalysis {
    Scored(TimeframeScore),
    InsufficientData {
        timeframe: String,
        available: usize,
        required: usize,
    },
}

impl TimeframeAnalysis {
    pub fn timeframe(&self) -> &str {
        match self {
            TimeframeAnalysis::Scored(s) => &s.timeframe,
            TimeframeAnalysis::InsufficientData { timeframe, .. } => timeframe,
        }
    }

    pub fn scored(&self) -> Option<&TimeframeScore> {
        match self {
            TimeframeAnalysis::Scored(s) => Some(s),
            TimeframeAnalysis::InsufficientData { .. } => None,
        }
    }
}
