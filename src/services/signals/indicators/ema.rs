//! Exponential Moving Average (EMA) indicator.

use crate::services::signals::Indicator;
use crate::types::OhlcvBar;

/// EMA (Exponential Moving Average) indicator.
///
/// Seeded with the first close of the series, then
/// `ema = close * k + ema * (1 - k)` with `k = 2 / (period + 1)`,
/// evaluated as `(close - ema) * k + ema` so a constant series stays exact.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// EMA over raw values. Returns 0 for an empty slice.
    pub fn calculate_values(values: &[f64], period: usize) -> f64 {
        let Some((&first, rest)) = values.split_first() else {
            return 0.0;
        };

        let k = 2.0 / (period as f64 + 1.0);
        rest.iter().fold(first, |ema, &value| (value - ema) * k + ema)
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, bars: &[OhlcvBar]) -> f64 {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        Self::calculate_values(&closes, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seeded_with_first_value() {
        assert_eq!(Ema::calculate_values(&[10.0], 12), 10.0);
    }

    #[test]
    fn test_ema_recurrence() {
        // k = 2 / 4 = 0.5
        let ema = Ema::calculate_values(&[10.0, 20.0, 30.0], 3);
        assert!((ema - 22.5).abs() < 1e-12);
    }

    #[test]
    fn test_ema_constant_series() {
        let values = vec![42.0; 60];
        assert_eq!(Ema::calculate_values(&values, 26), 42.0);
    }
}
