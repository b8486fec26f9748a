//! Simple Moving Average (SMA) indicator.

use crate::services::signals::Indicator;
use crate::types::OhlcvBar;

/// SMA (Simple Moving Average) indicator.
///
/// Arithmetic mean of the last `period` closes. With fewer bars than the
/// period it degrades to the latest close rather than failing.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[OhlcvBar]) -> f64 {
        let Some(last) = bars.last() else {
            return 0.0;
        };

        if self.period == 0 || bars.len() < self.period {
            return last.close;
        }

        bars.iter()
            .rev()
            .take(self.period)
            .map(|b| b.close)
            .sum::<f64>()
            / self.period as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| OhlcvBar::new(i as i64 * 60_000, c, c, c, c, 1000.0))
            .collect()
    }

    #[test]
    fn test_sma_averages_trailing_window() {
        let bars = bars_from_closes(&[100.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Sma::new(4).calculate(&bars), 2.5);
    }

    #[test]
    fn test_sma_short_series_falls_back_to_last_close() {
        let bars = bars_from_closes(&[1.0, 2.0, 7.0]);
        assert_eq!(Sma::new(20).calculate(&bars), 7.0);
    }

    #[test]
    fn test_sma_empty_series() {
        assert_eq!(Sma::new(20).calculate(&[]), 0.0);
    }
}
