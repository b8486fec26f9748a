//! Recommendation synthesis: suggestion, sizing and explanation.

use super::aggregator::AggregateScore;
use crate::config::{EngineConfig, SizingConfig};
use crate::types::{
    PredictionContext, PredictionMeta, PredictionResult, RationaleEntry, RiskProfile, Suggestion,
    TimeframeAnalysis, TimeframeStatus, TimeframeSummary,
};

/// Fixed disclaimer attached to every result.
pub const DISCLAIMER: &str = "This is an automated technical-analysis signal for informational \
purposes only and is not financial advice. Signals are heuristic, can be wrong, and past price \
behaviour does not guarantee future results.";

pub const NEAR_TARGET_FLAG: &str = "Already at or near target allocation";
pub const NO_DATA_FLAG: &str = "No timeframe had sufficient data; defaulting to neutral";

/// Map a weighted score onto the 1-99 confidence scale.
pub fn confidence_from_score(weighted_score: f64) -> u8 {
    (50.0 + weighted_score).round().clamp(1.0, 99.0) as u8
}

/// Directional suggestion for a confidence.
pub fn suggestion_for(confidence: u8, sizing: &SizingConfig) -> Suggestion {
    if confidence >= sizing.buy_confidence {
        Suggestion::Buy
    } else if confidence <= sizing.sell_confidence {
        Suggestion::Sell
    } else {
        Suggestion::Hold
    }
}

/// Outcome of position sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDecision {
    /// Risk-adjusted size before existing exposure.
    pub raw_pct: f64,
    pub recommended_pct: f64,
    /// Existing exposure leaves less than the near-target threshold.
    pub near_target: bool,
}

/// Risk-adjusted size, reduced by what is already held.
pub fn position_size(
    confidence: u8,
    profile: &RiskProfile,
    existing_pct: Option<f64>,
    sizing: &SizingConfig,
) -> SizeDecision {
    let max_allocation = profile.max_allocation_pct.max(0.0);
    let multiplier = sizing.risk_multiplier(profile.risk_tolerance);
    let raw_pct =
        (multiplier * (confidence as f64 / 100.0) * sizing.base_size_pct).min(max_allocation);

    let (remaining, near_target) = match existing_pct {
        Some(held) => {
            let remaining = (raw_pct - held).max(0.0);
            (remaining, remaining < sizing.near_target_pct)
        }
        None => (raw_pct, false),
    };

    SizeDecision {
        raw_pct,
        recommended_pct: round2(remaining).clamp(0.0, max_allocation),
        near_target,
    }
}

/// All rationale entries across timeframes, strongest first.
///
/// The sort is stable, so ties keep timeframe order and then rule order.
pub fn rank_rationale(analyses: &[TimeframeAnalysis], limit: usize) -> Vec<RationaleEntry> {
    let mut entries: Vec<RationaleEntry> = analyses
        .iter()
        .filter_map(TimeframeAnalysis::scored)
        .flat_map(|s| s.rationale.iter().cloned())
        .collect();
    entries.sort_by_key(|e| std::cmp::Reverse(e.score.abs()));
    entries.truncate(limit);
    entries
}

/// Analyzed timeframes with the largest absolute scores.
pub fn relevant_timeframes(analyses: &[TimeframeAnalysis], limit: usize) -> Vec<String> {
    let mut scored: Vec<_> = analyses
        .iter()
        .filter_map(TimeframeAnalysis::scored)
        .collect();
    scored.sort_by_key(|s| std::cmp::Reverse(s.score.abs()));
    scored
        .into_iter()
        .take(limit)
        .map(|s| s.timeframe.clone())
        .collect()
}

/// Plain-language summary built from the top rationale signals.
pub fn explain(
    suggestion: Suggestion,
    confidence: u8,
    rationale: &[RationaleEntry],
    drivers: usize,
) -> String {
    let names: Vec<String> = rationale
        .iter()
        .take(drivers)
        .map(|r| format!("{} ({})", r.signal, r.timeframe))
        .collect();

    match names.as_slice() {
        [] => format!(
            "{} at {}% confidence: no individual signal fired on the analyzed timeframes.",
            suggestion.label(),
            confidence
        ),
        [only] => format!(
            "{} at {}% confidence, driven mainly by {}.",
            suggestion.label(),
            confidence,
            only
        ),
        [init @ .., last] => format!(
            "{} at {}% confidence, driven mainly by {} and {}.",
            suggestion.label(),
            confidence,
            init.join(", "),
            last
        ),
    }
}

/// Assemble the final result.
pub fn synthesize(
    asset: &str,
    analyses: &[TimeframeAnalysis],
    aggregate: AggregateScore,
    profile: &RiskProfile,
    context: Option<&PredictionContext>,
    config: &EngineConfig,
) -> PredictionResult {
    let sizing = &config.sizing;
    let confidence = confidence_from_score(aggregate.weighted_score);
    let suggestion = suggestion_for(confidence, sizing);

    let existing = context.and_then(|c| c.existing_size_pct(asset));
    let size = position_size(confidence, profile, existing, sizing);

    let mut risk_flags = aggregate.risk_flags;
    if aggregate.analyzed == 0 {
        risk_flags.push(NO_DATA_FLAG.to_string());
    }
    if size.near_target {
        risk_flags.push(NEAR_TARGET_FLAG.to_string());
    }

    let rationale = rank_rationale(analyses, sizing.rationale_limit);
    let explainability = explain(suggestion, confidence, &rationale, sizing.explanation_drivers);

    PredictionResult {
        asset: asset.to_string(),
        suggestion,
        confidence,
        size_recommendation_pct: size.recommended_pct,
        timeframe_relevance: relevant_timeframes(analyses, sizing.relevance_limit),
        rationale,
        risk_flags,
        explainability,
        disclaimer: DISCLAIMER.to_string(),
        meta: PredictionMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            weighted_score: aggregate.weighted_score,
            risk_tolerance: profile.risk_tolerance,
            raw_size_pct: size.raw_pct,
            timeframes: summarize(analyses, config),
        },
    }
}

fn summarize(analyses: &[TimeframeAnalysis], config: &EngineConfig) -> Vec<TimeframeSummary> {
    analyses
        .iter()
        .map(|analysis| {
            let timeframe = analysis.timeframe().to_string();
            let weight = config.timeframe_weights.weight_for(&timeframe);
            match analysis {
                TimeframeAnalysis::Scored(s) => TimeframeSummary {
                    timeframe,
                    weight,
                    status: TimeframeStatus::Analyzed,
                    score: Some(s.score),
                    bars: s.bars,
                    indicators: Some(s.indicators.clone()),
                    patterns: Some(s.patterns),
                },
                TimeframeAnalysis::InsufficientData { available, .. } => TimeframeSummary {
                    timeframe,
                    weight,
                    status: TimeframeStatus::InsufficientData,
                    score: None,
                    bars: *available,
                    indicators: None,
                    patterns: None,
                },
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
