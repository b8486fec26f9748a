//! Cross-timeframe aggregation.

use crate::config::TimeframeWeights;
use crate::types::TimeframeAnalysis;

/// Weighted combination of per-timeframe scores.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateScore {
    /// Duration-weighted mean of analyzed scores, 0 when none were analyzed.
    pub weighted_score: f64,
    /// Number of timeframes that contributed.
    pub analyzed: usize,
    pub risk_flags: Vec<String>,
}

/// Combine timeframe scores by duration weight.
///
/// Timeframes without enough data are left out of both sides of the mean
/// and reported as risk flags, in request order.
pub fn aggregate(analyses: &[TimeframeAnalysis], weights: &TimeframeWeights) -> AggregateScore {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut analyzed = 0;
    let mut risk_flags = Vec::new();

    for analysis in analyses {
        match analysis {
            TimeframeAnalysis::Scored(scored) => {
                let weight = weights.weight_for(&scored.timeframe);
                weighted_sum += scored.score as f64 * weight;
                total_weight += weight;
                analyzed += 1;
            }
            TimeframeAnalysis::InsufficientData { timeframe, .. } => {
                risk_flags.push(insufficient_data_flag(timeframe));
            }
        }
    }

    let weighted_score = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };

    AggregateScore {
        weighted_score,
        analyzed,
        risk_flags,
    }
}

pub fn insufficient_data_flag(timeframe: &str) -> String {
    format!("Insufficient data for {} timeframe", timeframe)
}
