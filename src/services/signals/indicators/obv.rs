//! On-Balance Volume (OBV) indicator.

use crate::services::signals::Indicator;
use crate::types::{ObvTrend, OhlcvBar};

/// OBV (On-Balance Volume) trend.
///
/// Cumulative volume indicator:
/// - If close > previous close: OBV += volume
/// - If close < previous close: OBV -= volume
///
/// The trend compares the latest cumulative value with the value
/// `lookback` bars earlier.
pub struct Obv {
    lookback: usize,
}

impl Default for Obv {
    fn default() -> Self {
        Self { lookback: 10 }
    }
}

impl Obv {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }

    /// Cumulative OBV series, starting at 0 for the first bar.
    pub fn series(bars: &[OhlcvBar]) -> Vec<f64> {
        let mut obv = 0.0;
        let mut values = Vec::with_capacity(bars.len());
        if !bars.is_empty() {
            values.push(0.0);
        }

        for pair in bars.windows(2) {
            if pair[1].close > pair[0].close {
                obv += pair[1].volume;
            } else if pair[1].close < pair[0].close {
                obv -= pair[1].volume;
            }
            values.push(obv);
        }

        values
    }
}

impl Indicator for Obv {
    type Output = ObvTrend;

    fn min_periods(&self) -> usize {
        self.lookback + 1
    }

    fn calculate(&self, bars: &[OhlcvBar]) -> ObvTrend {
        let values = Self::series(bars);
        if values.len() < self.min_periods() {
            return ObvTrend::Flat;
        }

        let latest = values[values.len() - 1];
        let earlier = values[values.len() - 1 - self.lookback];

        if latest > earlier {
            ObvTrend::Up
        } else if latest < earlier {
            ObvTrend::Down
        } else {
            ObvTrend::Flat
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend_bars(count: usize, step: f64) -> Vec<OhlcvBar> {
        (0..count)
            .map(|i| {
                let c = 100.0 + i as f64 * step;
                OhlcvBar::new(i as i64 * 60_000, c, c, c, c, 1000.0)
            })
            .collect()
    }

    #[test]
    fn test_obv_series() {
        let bars = vec![
            OhlcvBar::new(0, 10.0, 10.0, 10.0, 10.0, 100.0),
            OhlcvBar::new(1, 11.0, 11.0, 11.0, 11.0, 200.0),
            OhlcvBar::new(2, 9.0, 9.0, 9.0, 9.0, 50.0),
            OhlcvBar::new(3, 9.0, 9.0, 9.0, 9.0, 70.0),
        ];
        assert_eq!(Obv::series(&bars), vec![0.0, 200.0, 150.0, 150.0]);
    }

    #[test]
    fn test_obv_trend_up() {
        assert_eq!(Obv::default().calculate(&trend_bars(30, 1.0)), ObvTrend::Up);
    }

    #[test]
    fn test_obv_trend_down() {
        assert_eq!(Obv::default().calculate(&trend_bars(30, -1.0)), ObvTrend::Down);
    }

    #[test]
    fn test_obv_trend_flat() {
        assert_eq!(Obv::default().calculate(&trend_bars(30, 0.0)), ObvTrend::Flat);
    }

    #[test]
    fn test_obv_short_series() {
        assert_eq!(Obv::new(10).calculate(&trend_bars(5, 1.0)), ObvTrend::Flat);
    }
}
