//! Relative Strength Index (RSI) indicator.

use crate::services::signals::Indicator;
use crate::types::OhlcvBar;

/// RSI (Relative Strength Index) indicator.
///
/// Ratio of average gain to average loss over the trailing `period`
/// bar-to-bar close differences. Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// Returns 50 when fewer than `period + 1` closes exist and 100 when the
/// average loss is zero, including a completely flat window.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, bars: &[OhlcvBar]) -> f64 {
        if self.period == 0 || bars.len() < self.min_periods() {
            return 50.0;
        }

        let window = &bars[bars.len() - self.min_periods()..];
        let (gains, losses) = window
            .windows(2)
            .map(|pair| pair[1].close - pair[0].close)
            .fold((0.0, 0.0), |(gains, losses), change| {
                if change > 0.0 {
                    (gains + change, losses)
                } else {
                    (gains, losses - change)
                }
            });

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;

        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_uptrend_candles(count: usize) -> Vec<OhlcvBar> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                OhlcvBar::new(i as i64 * 60_000, base, base + 2.0, base - 1.0, base + 1.0, 1000.0)
            })
            .collect()
    }

    fn create_downtrend_candles(count: usize) -> Vec<OhlcvBar> {
        (0..count)
            .map(|i| {
                let base = 200.0 - i as f64 * 1.5;
                OhlcvBar::new(i as i64 * 60_000, base, base + 1.0, base - 2.0, base - 1.0, 1000.0)
            })
            .collect()
    }

    fn create_alternating_candles(count: usize) -> Vec<OhlcvBar> {
        (0..count)
            .map(|i| {
                let close = if i % 2 == 0 { 100.0 } else { 101.0 };
                OhlcvBar::new(i as i64 * 60_000, close, close, close, close, 1000.0)
            })
            .collect()
    }

    #[test]
    fn test_rsi_min_periods() {
        assert_eq!(Rsi::default().min_periods(), 15);
    }

    #[test]
    fn test_rsi_insufficient_data_is_neutral() {
        assert_eq!(Rsi::default().calculate(&create_uptrend_candles(10)), 50.0);
    }

    #[test]
    fn test_rsi_pure_uptrend_is_100() {
        assert_eq!(Rsi::default().calculate(&create_uptrend_candles(50)), 100.0);
    }

    #[test]
    fn test_rsi_downtrend_low_value() {
        let rsi = Rsi::default().calculate(&create_downtrend_candles(50));
        assert!(rsi < 30.0, "RSI in downtrend should be < 30, got {}", rsi);
    }

    #[test]
    fn test_rsi_flat_series_is_100() {
        let bars: Vec<OhlcvBar> = (0..30)
            .map(|i| OhlcvBar::new(i, 10.0, 10.0, 10.0, 10.0, 1.0))
            .collect();
        assert_eq!(Rsi::default().calculate(&bars), 100.0);
    }

    #[test]
    fn test_rsi_balanced_moves_near_50() {
        // 14 differences: 7 gains and 7 losses of equal size
        let rsi = Rsi::default().calculate(&create_alternating_candles(31));
        assert!((rsi - 50.0).abs() < 1e-9, "got {}", rsi);
    }

    #[test]
    fn test_rsi_custom_period() {
        let rsi = Rsi::new(7);
        assert_eq!(rsi.min_periods(), 8);
        assert!(rsi.calculate(&create_downtrend_candles(8)) < 50.0);
    }
}
