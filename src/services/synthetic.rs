//! Synthetic OHLCV generation for demo mode and self-tests.

use rand::Rng;

use crate::types::OhlcvBar;

/// Generate a random-walk bar series.
///
/// Each bar opens at the previous close and closes within `volatility`
/// (as a fraction) of its open. Highs and lows extend up to half the
/// volatility beyond the body, and volume is uniform in 1k-100k.
pub fn generate_bars<R: Rng + ?Sized>(
    rng: &mut R,
    base_price: f64,
    periods: usize,
    volatility: f64,
    start_time: i64,
    interval_ms: i64,
) -> Vec<OhlcvBar> {
    let volatility = volatility.abs();
    let wick = volatility / 2.0;
    let interval_ms = interval_ms.max(1);
    let mut price = base_price;
    let mut bars = Vec::with_capacity(periods);

    for i in 0..periods {
        let open = price;
        let change = rng.gen_range(-volatility..=volatility);
        let close = open * (1.0 + change);

        let high = open.max(close) * (1.0 + rng.gen_range(0.0..=wick));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..=wick));
        let volume = rng.gen_range(1_000.0..100_000.0);

        bars.push(OhlcvBar::new(
            start_time + i as i64 * interval_ms,
            open,
            high,
            low,
            close,
            volume,
        ));

        price = close;
    }

    bars
}

/// Generate bars whose last bar falls on the current time.
pub fn generate_recent_bars(
    base_price: f64,
    periods: usize,
    volatility: f64,
    interval_ms: i64,
) -> Vec<OhlcvBar> {
    let now = chrono::Utc::now().timestamp_millis();
    let start_time = now - periods.saturating_sub(1) as i64 * interval_ms;
    generate_bars(
        &mut rand::thread_rng(),
        base_price,
        periods,
        volatility,
        start_time,
        interval_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let bars = generate_bars(&mut rng, 91_000.0, 100, 0.015, 0, 3_600_000);
        assert_eq!(bars.len(), 100);
    }

    #[test]
    fn test_bars_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(42);
        let bars = generate_bars(&mut rng, 91_000.0, 100, 0.015, 1_700_000_000_000, 3_600_000);

        for pair in bars.windows(2) {
            assert!(pair[1].time > pair[0].time);
            assert_eq!(pair[1].open, pair[0].close);
        }
        for bar in &bars {
            assert!(bar.high >= bar.open.max(bar.close));
            assert!(bar.low <= bar.open.min(bar.close));
            assert!(bar.volume >= 1_000.0 && bar.volume < 100_000.0);
            let body = (bar.close - bar.open).abs() / bar.open;
            assert!(body <= 0.015 + 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = generate_bars(&mut StdRng::seed_from_u64(1), 100.0, 50, 0.02, 0, 60_000);
        let b = generate_bars(&mut StdRng::seed_from_u64(1), 100.0, 50, 0.02, 0, 60_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_volatility_is_flat() {
        let bars = generate_bars(&mut StdRng::seed_from_u64(3), 250.0, 30, 0.0, 0, 60_000);
        assert!(bars.iter().all(|b| b.close == 250.0 && b.high == 250.0 && b.low == 250.0));
    }

    #[test]
    fn test_recent_bars_end_now() {
        let before = chrono::Utc::now().timestamp_millis();
        let bars = generate_recent_bars(91_000.0, 100, 0.015, 900_000);
        let last = bars.last().expect("bars");
        assert_eq!(bars.len(), 100);
        assert!(last.time >= before);
    }
}
