//! Average True Range (ATR) indicator.

use crate::services::signals::Indicator;
use crate::types::OhlcvBar;

/// ATR (Average True Range) indicator.
///
/// Simple average of the true ranges of the last `period` bars:
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
///
/// Uses as many true ranges as exist when the series is shorter than
/// `period + 1`, and 0 for a single bar.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Atr {
    type Output = f64;

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, bars: &[OhlcvBar]) -> f64 {
        let true_ranges: Vec<f64> = bars
            .windows(2)
            .rev()
            .take(self.period)
            .map(|pair| pair[1].true_range(pair[0].close))
            .collect();

        if true_ranges.is_empty() {
            return 0.0;
        }

        true_ranges.iter().sum::<f64>() / true_ranges.len() as f64
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

    #[test]
    fn test_atr_min_periods() {
        assert_eq!(Atr::default().min_periods(), 15);
    }

    #[test]
    fn test_atr_constant_range() {
        // high - low = 3.0; |high - prev close| = 2.5; |low - prev close| = 0.5
        let atr = Atr::default().calculate(&create_uptrend_candles(30));
        assert!((atr - 3.0).abs() < 1e-9, "got {}", atr);
    }

    #[test]
    fn test_atr_single_bar() {
        assert_eq!(Atr::default().calculate(&create_uptrend_candles(1)), 0.0);
    }

    #[test]
    fn test_atr_only_trailing_window() {
        let mut bars = create_uptrend_candles(30);
        // A wide bar well outside the trailing 14 must not affect the result
        bars[2].high += 500.0;
        let atr = Atr::new(14).calculate(&bars);
        assert!((atr - 3.0).abs() < 1e-9, "got {}", atr);
    }
}
