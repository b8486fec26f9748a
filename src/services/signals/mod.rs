//! Trading signals service module.
//!
//! The scoring pipeline: indicator calculation and pattern detection per
//! timeframe, timeframe scoring, cross-timeframe aggregation and the final
//! recommendation.

pub mod aggregator;
pub mod engine;
pub mod indicators;
pub mod patterns;
pub mod recommendation;
pub mod scorer;

pub use aggregator::{aggregate, AggregateScore};
pub use engine::PredictionEngine;
pub use scorer::score_timeframe;

use crate::types::OhlcvBar;

/// Trait for implementing technical indicators.
///
/// Implementations never fail: short series degrade to a neutral value.
pub trait Indicator {
    type Output;

    /// Number of bars needed for a full-window reading.
    fn min_periods(&self) -> usize;

    /// Calculate the indicator from OHLCV bars.
    fn calculate(&self, bars: &[OhlcvBar]) -> Self::Output;
}
