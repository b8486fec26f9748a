use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{IndicatorBundle, OhlcvBar, PatternSet, RationaleEntry};

/// Caller risk appetite. Unknown labels fall back to `Moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Parse from string, defaulting to moderate.
    pub fn from_label(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "conservative" => Self::Conservative,
            "aggressive" => Self::Aggressive,
            _ => Self::Moderate,
        }
    }
}

impl From<String> for RiskTolerance {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

/// Caller-supplied sizing constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    #[serde(default = "default_max_allocation_pct")]
    pub max_allocation_pct: f64,
}

fn default_max_allocation_pct() -> f64 {
    10.0
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self {
            risk_tolerance: RiskTolerance::default(),
            max_allocation_pct: default_max_allocation_pct(),
        }
    }
}

/// A position the caller already holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingPosition {
    pub asset: String,
    pub size_pct: f64,
}

/// Portfolio context used to cap sizing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionContext {
    #[serde(default)]
    pub existing_positions: Vec<ExistingPosition>,
}

impl PredictionContext {
    /// Total size already held in `asset` (case-insensitive match).
    pub fn existing_size_pct(&self, asset: &str) -> Option<f64> {
        let mut matched = false;
        let mut total = 0.0;
        for position in &self.existing_positions {
            if position.asset.eq_ignore_ascii_case(asset) {
                matched = true;
                total += position.size_pct;
            }
        }
        matched.then_some(total)
    }
}

/// Input to the prediction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub asset: String,
    pub timeframes: Vec<String>,
    pub ohlcv: HashMap<String, Vec<OhlcvBar>>,
    #[serde(default)]
    pub user_profile: Option<RiskProfile>,
    #[serde(default)]
    pub context: Option<PredictionContext>,
}

/// Directional suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suggestion {
    Buy,
    Sell,
    Hold,
}

impl Suggestion {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Suggestion::Buy => "BUY",
            Suggestion::Sell => "SELL",
            Suggestion::Hold => "HOLD",
        }
    }
}

/// Whether a timeframe contributed to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeframeStatus {
    Analyzed,
    InsufficientData,
}

/// Per-timeframe detail reported in `meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSummary {
    pub timeframe: String,
    pub weight: f64,
    pub status: TimeframeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    pub bars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorBundle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternSet>,
}

/// Deterministic diagnostics attached to every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMeta {
    pub engine_version: String,
    /// Weighted mean of the analyzed timeframe scores.
    pub weighted_score: f64,
    pub risk_tolerance: RiskTolerance,
    /// Size before existing exposure was subtracted.
    pub raw_size_pct: f64,
    pub timeframes: Vec<TimeframeSummary>,
}

/// The engine's only output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub asset: String,
    pub suggestion: Suggestion,
    /// Always within 1-99.
    pub confidence: u8,
    pub size_recommendation_pct: f64,
    pub timeframe_relevance: Vec<String>,
    pub rationale: Vec<RationaleEntry>,
    pub risk_flags: Vec<String>,
    pub explainability: String,
    pub disclaimer: String,
    pub meta: PredictionMeta,
}
