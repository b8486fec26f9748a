//! Volume z-score indicator.

use crate::services::signals::Indicator;
use crate::types::OhlcvBar;

/// How unusual the latest volume is against the trailing window:
/// `(latest - mean) / stddev`, where the window includes the latest bar.
///
/// Population standard deviation. Returns 0 when the deviation is 0.
pub struct VolumeZScore {
    window: usize,
}

impl Default for VolumeZScore {
    fn default() -> Self {
        Self { window: 50 }
    }
}

impl VolumeZScore {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Indicator for VolumeZScore {
    type Output = f64;

    fn min_periods(&self) -> usize {
        self.window
    }

    fn calculate(&self, bars: &[OhlcvBar]) -> f64 {
        let Some(latest) = bars.last() else {
            return 0.0;
        };

        let start = bars.len().saturating_sub(self.window);
        let volumes: Vec<f64> = bars[start..].iter().map(|b| b.volume).collect();
        let n = volumes.len() as f64;

        let mean = volumes.iter().sum::<f64>() / n;
        let variance = volumes.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        if std_dev == 0.0 {
            return 0.0;
        }

        (latest.volume - mean) / std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars_from_volumes(volumes: &[f64]) -> Vec<OhlcvBar> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, &v)| OhlcvBar::new(i as i64, 10.0, 10.0, 10.0, 10.0, v))
            .collect()
    }

    #[test]
    fn test_constant_volume_is_zero() {
        let bars = bars_from_volumes(&[500.0; 60]);
        assert_eq!(VolumeZScore::default().calculate(&bars), 0.0);
    }

    #[test]
    fn test_spike_is_positive() {
        let mut volumes = vec![1000.0; 49];
        volumes.push(5000.0);
        let z = VolumeZScore::default().calculate(&bars_from_volumes(&volumes));
        // mean = 1080, stddev = 560 -> z = 7
        assert!((z - 7.0).abs() < 1e-9, "got {}", z);
    }

    #[test]
    fn test_only_trailing_window_counts() {
        let mut volumes = vec![1_000_000.0; 10];
        volumes.extend(vec![100.0; 50]);
        let bars = bars_from_volumes(&volumes);
        assert_eq!(VolumeZScore::new(50).calculate(&bars), 0.0);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(VolumeZScore::default().calculate(&[]), 0.0);
    }
}
