//! Technical indicator implementations.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use atr::Atr;
pub use ema::Ema;
pub use macd::Macd;
pub use obv::Obv;
pub use rsi::Rsi;
pub use sma::Sma;
pub use volume::VolumeZScore;

use super::Indicator;
use crate::config::IndicatorPeriods;
use crate::types::{IndicatorBundle, IndicatorOutcome, OhlcvBar};

/// Compute every indicator for one timeframe.
///
/// Series shorter than `periods.min_bars` yield `InsufficientData`.
pub fn calculate_bundle(bars: &[OhlcvBar], periods: &IndicatorPeriods) -> IndicatorOutcome {
    let required = periods.min_bars.max(1);
    let Some(last) = bars.last().filter(|_| bars.len() >= required) else {
        return IndicatorOutcome::InsufficientData {
            available: bars.len(),
            required,
        };
    };

    IndicatorOutcome::Ready(IndicatorBundle {
        close: last.close,
        sma20: Sma::new(periods.sma).calculate(bars),
        ema12: Ema::new(periods.ema_fast).calculate(bars),
        ema26: Ema::new(periods.ema_slow).calculate(bars),
        macd: Macd::new(periods.ema_fast, periods.ema_slow).calculate(bars),
        rsi: Rsi::new(periods.rsi).calculate(bars),
        atr: Atr::new(periods.atr).calculate(bars),
        volume_z: VolumeZScore::new(periods.volume_window).calculate(bars),
        obv_trend: Obv::new(periods.obv_lookback).calculate(bars),
        price_change_pct: price_change_pct(bars),
    })
}

/// Latest bar-over-bar close change in percent.
fn price_change_pct(bars: &[OhlcvBar]) -> f64 {
    match bars {
        [.., prev, last] if prev.close != 0.0 => (last.close - prev.close) / prev.close * 100.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObvTrend;

    fn flat_bars(count: usize) -> Vec<OhlcvBar> {
        (0..count)
            .map(|i| OhlcvBar::new(i as i64 * 60_000, 50.0, 50.0, 50.0, 50.0, 1000.0))
            .collect()
    }

    #[test]
    fn test_bundle_requires_min_bars() {
        let outcome = calculate_bundle(&flat_bars(19), &IndicatorPeriods::default());
        assert_eq!(
            outcome,
            IndicatorOutcome::InsufficientData {
                available: 19,
                required: 20
            }
        );
    }

    #[test]
    fn test_bundle_on_flat_series() {
        let IndicatorOutcome::Ready(bundle) =
            calculate_bundle(&flat_bars(60), &IndicatorPeriods::default())
        else {
            panic!("expected indicators for 60 bars");
        };
        assert_eq!(bundle.close, 50.0);
        assert_eq!(bundle.sma20, 50.0);
        assert_eq!(bundle.macd, 0.0);
        assert_eq!(bundle.rsi, 100.0);
        assert_eq!(bundle.atr, 0.0);
        assert_eq!(bundle.volume_z, 0.0);
        assert_eq!(bundle.obv_trend, ObvTrend::Flat);
        assert_eq!(bundle.price_change_pct, 0.0);
    }

    #[test]
    fn test_bundle_macd_matches_ema_spread() {
        let bars: Vec<OhlcvBar> = (0..60)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.3;
                OhlcvBar::new(i as i64 * 60_000, c, c + 1.0, c - 1.0, c, 1000.0)
            })
            .collect();
        let periods = IndicatorPeriods::default();
        let IndicatorOutcome::Ready(bundle) = calculate_bundle(&bars, &periods) else {
            panic!("expected indicators for 60 bars");
        };
        assert_eq!(bundle.macd, bundle.ema12 - bundle.ema26);
        assert_eq!(bundle.macd, Macd::new(periods.ema_fast, periods.ema_slow).calculate(&bars));
    }

    #[test]
    fn test_price_change_pct() {
        let mut bars = flat_bars(20);
        bars[19].close = 55.0;
        assert!((price_change_pct(&bars) - 10.0).abs() < 1e-9);
        assert_eq!(price_change_pct(&bars[..1]), 0.0);
    }
}
