//! Chart pattern heuristics.
//!
//! Both checks are deliberately loose: they bias direction, they do not
//! certify a pattern. False positives are expected.

use crate::config::PatternConfig;
use crate::types::{OhlcvBar, PatternMatch, PatternSet};

/// Run every pattern check over the trailing bars.
pub fn detect_patterns(bars: &[OhlcvBar], config: &PatternConfig) -> PatternSet {
    PatternSet {
        bull_flag: detect_bull_flag(bars, config),
        double_bottom: detect_double_bottom(bars, config),
    }
}

/// Bull flag: a shallow pullback from the pole high on contracting volume.
///
/// Within the trailing window, the pole high is the highest high before the
/// last `bull_flag_length` bars. Confidence falls linearly from 100 at the
/// shallow edge of the pullback band to 0 at the deep edge.
pub fn detect_bull_flag(bars: &[OhlcvBar], config: &PatternConfig) -> PatternMatch {
    let window_len = config.bull_flag_window;
    if window_len == 0 || bars.len() < window_len {
        return PatternMatch::none();
    }

    let window = &bars[bars.len() - window_len..];
    let pole_end = window_len.saturating_sub(config.bull_flag_length);
    let prior_high = window[..pole_end]
        .iter()
        .map(|b| b.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let close = window[window_len - 1].close;

    if !prior_high.is_finite() || prior_high <= 0.0 {
        return PatternMatch::none();
    }

    let pullback = (prior_high - close) / prior_high;
    let (min_pullback, max_pullback) = (config.bull_flag_min_pullback, config.bull_flag_max_pullback);
    if pullback <= min_pullback || pullback >= max_pullback {
        return PatternMatch::none();
    }

    let recent_len = config.bull_flag_recent_volume.min(window_len);
    let recent_volume = mean_volume(&window[window_len - recent_len..]);
    let baseline_volume = mean_volume(window);
    let contraction = if baseline_volume > 0.0 {
        1.0 - recent_volume / baseline_volume
    } else {
        0.0
    };

    if contraction < config.bull_flag_min_volume_contraction {
        return PatternMatch::none();
    }

    let depth = (pullback - min_pullback) / (max_pullback - min_pullback);
    PatternMatch::detected((1.0 - depth) * 100.0)
}

/// Double bottom: two similar lows, one in each half of the trailing window,
/// far enough apart.
pub fn detect_double_bottom(bars: &[OhlcvBar], config: &PatternConfig) -> PatternMatch {
    let window_len = config.double_bottom_window;
    if window_len < 2 || bars.len() < window_len {
        return PatternMatch::none();
    }

    let window = &bars[bars.len() - window_len..];
    let half = window_len / 2;
    let (first_idx, low1) = lowest_low(&window[..half]);
    let (second_offset, low2) = lowest_low(&window[half..]);
    let second_idx = half + second_offset;

    let mean_low = (low1 + low2) / 2.0;
    if mean_low <= 0.0 {
        return PatternMatch::none();
    }

    let similarity = 1.0 - (low1 - low2).abs() / mean_low;
    let separation = second_idx - first_idx;

    if similarity > config.double_bottom_min_similarity
        && separation > config.double_bottom_min_separation
    {
        PatternMatch::detected(similarity * 100.0)
    } else {
        PatternMatch::none()
    }
}

/// Index and value of the first lowest low.
fn lowest_low(bars: &[OhlcvBar]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, bar) in bars.iter().enumerate() {
        if bar.low < best.1 {
            best = (i, bar.low);
        }
    }
    best
}

fn mean_volume(bars: &[OhlcvBar]) -> f64 {
    if bars.is_empty() {
        return 0.0;
    }
    bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64
}
