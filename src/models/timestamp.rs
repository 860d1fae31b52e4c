use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// An absolute UTC instant at millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimestampUtc(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl TimestampUtc {
    pub const EPOCH: TimestampUtc = TimestampUtc(DateTime::<Utc>::UNIX_EPOCH);

    /// `None` when `ms` falls outside the range chrono can represent.
    pub fn from_utc_ms(ms: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(ms).map(Self)
    }

    /// Clamps `ms` into the representable range instead of failing.
    pub fn from_utc_ms_saturating(ms: i64) -> Self {
        let clamped = ms.clamp(Self::min_utc_ms(), Self::max_utc_ms());
        Self::from_utc_ms(clamped).expect("millisecond count clamped to chrono's range")
    }

    pub fn min_utc_ms() -> i64 {
        DateTime::<Utc>::MIN_UTC.timestamp_millis()
    }

    pub fn max_utc_ms() -> i64 {
        DateTime::<Utc>::MAX_UTC.timestamp_millis()
    }

    /// Sub-millisecond precision is dropped.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_utc_ms(dt.timestamp_millis())
            .expect("an in-range instant truncates to an in-range millisecond count")
    }

    pub fn to_utc_ms(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self::from_datetime)
    }

    /// Strictly later than `other`.
    pub fn is_after(&self, other: TimestampUtc) -> bool {
        self.0 > other.0
    }

    /// Time from `self` until `later`, or `None` if `later` is earlier.
    pub fn until(&self, later: TimestampUtc) -> Option<Duration> {
        let diff = later.0.signed_duration_since(self.0);
        if diff < Duration::zero() {
            None
        } else {
            Some(diff)
        }
    }
}

impl fmt::Display for TimestampUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<DateTime<Utc>> for TimestampUtc {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_round_trip() {
        let ts = TimestampUtc::from_utc_ms(1_060_000).unwrap();
        assert_eq!(ts.to_utc_ms(), 1_060_000);
        assert_eq!(ts.to_string(), "1970-01-01T00:17:40.000Z");

        let before_epoch = TimestampUtc::from_utc_ms(-1).unwrap();
        assert!(before_epoch < TimestampUtc::EPOCH);
    }

    #[test]
    fn test_out_of_range_ms() {
        assert!(TimestampUtc::from_utc_ms(i64::MAX).is_none());
        assert!(TimestampUtc::from_utc_ms(i64::MIN).is_none());
    }

    #[test]
    fn test_truncates_to_millis() {
        let dt = DateTime::<Utc>::from_timestamp(10, 123_456_789).unwrap();
        let ts = TimestampUtc::from_datetime(dt);
        assert_eq!(ts.to_utc_ms(), 10_123);
        assert_eq!(ts, TimestampUtc::from_utc_ms(10_123).unwrap());
    }

    #[test]
    fn test_checked_add() {
        let ts = TimestampUtc::from_utc_ms(1_000_000).unwrap();
        let later = ts.checked_add(Duration::milliseconds(60_000)).unwrap();
        assert_eq!(later.to_utc_ms(), 1_060_000);

        let far = TimestampUtc::from_utc_ms(1).unwrap();
        assert!(far.checked_add(Duration::milliseconds(i64::MAX)).is_none());
    }

    #[test]
    fn test_saturating_clamps_to_range() {
        let max = TimestampUtc::from_utc_ms_saturating(i64::MAX);
        assert_eq!(max.to_utc_ms(), TimestampUtc::max_utc_ms());
        assert!(max.is_after(TimestampUtc::EPOCH));

        let min = TimestampUtc::from_utc_ms_saturating(i64::MIN);
        assert_eq!(min.to_utc_ms(), TimestampUtc::min_utc_ms());

        assert_eq!(TimestampUtc::from_utc_ms_saturating(5).to_utc_ms(), 5);
    }

    #[test]
    fn test_is_after_is_strict() {
        let a = TimestampUtc::from_utc_ms(10_000).unwrap();
        let b = TimestampUtc::from_utc_ms(10_001).unwrap();
        assert!(b.is_after(a));
        assert!(!a.is_after(b));
        assert!(!a.is_after(a));
    }

    #[test]
    fn test_until() {
        let a = TimestampUtc::from_utc_ms(1_000).unwrap();
        let b = TimestampUtc::from_utc_ms(1_500).unwrap();
        assert_eq!(a.until(b), Some(Duration::milliseconds(500)));
        assert_eq!(b.until(a), None);
        assert_eq!(a.until(a), Some(Duration::zero()));
    }

    #[test]
    fn test_serde_as_millis() {
        let ts = TimestampUtc::from_utc_ms(5_000).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "5000");
        let back: TimestampUtc = serde_json::from_str("5000").unwrap();
        assert_eq!(back, ts);
    }
}
