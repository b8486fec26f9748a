use serde::{Deserialize, Serialize};

/// Analysis timeframe label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl Timeframe {
    /// All known timeframes, shortest first.
    pub const ALL: [Timeframe; 7] = [
        Timeframe::FifteenMinutes,
        Timeframe::ThirtyMinutes,
        Timeframe::OneHour,
        Timeframe::FourHours,
        Timeframe::OneDay,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
    ];

    /// Parse a timeframe label. Labels are case-sensitive: `1M` is a month,
    /// minutes are always lower case.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "15m" => Some(Timeframe::FifteenMinutes),
            "30m" => Some(Timeframe::ThirtyMinutes),
            "1h" => Some(Timeframe::OneHour),
            "4h" => Some(Timeframe::FourHours),
            "1D" => Some(Timeframe::OneDay),
            "1W" => Some(Timeframe::OneWeek),
            "1M" => Some(Timeframe::OneMonth),
            _ => None,
        }
    }

    /// Get the label for this timeframe.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::FifteenMinutes => "15m",
            Timeframe::ThirtyMinutes => "30m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::OneDay => "1D",
            Timeframe::OneWeek => "1W",
            Timeframe::OneMonth => "1M",
        }
    }

    /// Get the duration of one bar in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        match self {
            Timeframe::FifteenMinutes => 900_000,
            Timeframe::ThirtyMinutes => 1_800_000,
            Timeframe::OneHour => 3_600_000,
            Timeframe::FourHours => 14_400_000,
            Timeframe::OneDay => 86_400_000,
            Timeframe::OneWeek => 604_800_000,
            Timeframe::OneMonth => 2_592_000_000, // 30 days
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// OHLCV (Open, High, Low, Close, Volume) bar.
///
/// Deserializes from either a six-element array
/// `[time, open, high, low, close, volume]` or an object with named fields.
/// Fractional millisecond timestamps are truncated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBar")]
pub struct OhlcvBar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// True range against the previous bar's close.
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Wire forms accepted for a bar.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBar {
    Tuple(f64, f64, f64, f64, f64, f64),
    Object {
        time: f64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    },
}

impl From<RawBar> for OhlcvBar {
    fn from(raw: RawBar) -> Self {
        match raw {
            RawBar::Tuple(time, open, high, low, close, volume) => {
                OhlcvBar::new(time.trunc() as i64, open, high, low, close, volume)
            }
            RawBar::Object {
                time,
                open,
                high,
                low,
                close,
                volume,
            } => OhlcvBar::new(time.trunc() as i64, open, high, low, close, volume),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_labels_round_trip() {
        for tf in Timeframe::ALL {
            assert_eq!(Timeframe::from_label(tf.label()), Some(tf));
        }
    }

    #[test]
    fn test_timeframe_labels_are_case_sensitive() {
        assert_eq!(Timeframe::from_label("1M"), Some(Timeframe::OneMonth));
        assert_eq!(Timeframe::from_label("1m"), None);
        assert_eq!(Timeframe::from_label("1d"), None);
    }

    #[test]
    fn test_bar_from_tuple() {
        let bar: OhlcvBar = serde_json::from_str("[1000, 1.0, 2.0, 0.5, 1.5, 300.0]").unwrap();
        assert_eq!(bar, OhlcvBar::new(1000, 1.0, 2.0, 0.5, 1.5, 300.0));
    }

    #[test]
    fn test_bar_from_object() {
        let bar: OhlcvBar = serde_json::from_str(
            r#"{"time":1000,"open":1,"high":2,"low":0.5,"close":1.5,"volume":300}"#,
        )
        .unwrap();
        assert_eq!(bar.close, 1.5);
        assert_eq!(bar.volume, 300.0);
    }

    #[test]
    fn test_bar_fractional_timestamp_truncated() {
        let tuple: OhlcvBar =
            serde_json::from_str("[1700000000000.7, 1.0, 2.0, 0.5, 1.5, 300.0]").unwrap();
        assert_eq!(tuple.time, 1_700_000_000_000);

        let object: OhlcvBar = serde_json::from_str(
            r#"{"time":1700000000000.0,"open":1,"high":2,"low":0.5,"close":1.5,"volume":300}"#,
        )
        .unwrap();
        assert_eq!(object.time, 1_700_000_000_000);
    }

    #[test]
    fn test_true_range_uses_gap() {
        let bar = OhlcvBar::new(0, 10.0, 11.0, 9.5, 10.5, 1.0);
        assert_eq!(bar.true_range(10.0), 1.5);
        assert_eq!(bar.true_range(13.0), 3.5);
    }
}
