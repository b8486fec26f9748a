//! Prediction engine entry point.

use std::collections::HashSet;

use tracing::debug;

use super::aggregator::aggregate;
use super::recommendation::synthesize;
use super::scorer::score_timeframe;
use crate::config::EngineConfig;
use crate::types::{PredictionRequest, PredictionResult, TimeframeAnalysis};

/// Stateless multi-timeframe scoring engine.
///
/// Holds only the immutable model constants; every call is a pure function
/// of its request, so one engine can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    config: EngineConfig,
}

impl PredictionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Score every requested timeframe, combine them and build the result.
    ///
    /// Never fails: sparse or missing series show up in `risk_flags`.
    pub fn predict(&self, request: &PredictionRequest) -> PredictionResult {
        let analyses = self.analyze(request);
        let combined = aggregate(&analyses, &self.config.timeframe_weights);

        debug!(
            "{}: weighted score {:.2} from {}/{} timeframes",
            request.asset,
            combined.weighted_score,
            combined.analyzed,
            analyses.len()
        );

        let profile = request.user_profile.clone().unwrap_or_default();
        synthesize(
            &request.asset,
            &analyses,
            combined,
            &profile,
            request.context.as_ref(),
            &self.config,
        )
    }

    /// Per-timeframe analysis in request order, duplicates dropped.
    pub fn analyze(&self, request: &PredictionRequest) -> Vec<TimeframeAnalysis> {
        let mut seen = HashSet::new();
        request
            .timeframes
            .iter()
            .filter(|tf| seen.insert(tf.as_str()))
            .map(|tf| {
                let bars = request.ohlcv.get(tf).map(Vec::as_slice).unwrap_or_default();
                score_timeframe(tf, bars, &self.config)
            })
            .collect()
    }
}
