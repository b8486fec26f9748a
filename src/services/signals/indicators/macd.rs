//! MACD (Moving Average Convergence Divergence) indicator.

use super::Ema;
use crate::services::signals::Indicator;
use crate::types::OhlcvBar;

/// MACD line only: EMA(fast) - EMA(slow).
///
/// No signal-line smoothing; the scorer reads the sign of the line directly.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
        }
    }
}

impl Indicator for Macd {
    type Output = f64;

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, bars: &[OhlcvBar]) -> f64 {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        Ema::calculate_values(&closes, self.fast_period)
            - Ema::calculate_values(&closes, self.slow_period)
    }
}
