use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Duration, Utc};

use crate::models::timestamp::TimestampUtc;

/// Source of the current wall-clock instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> TimestampUtc;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimestampUtc {
        TimestampUtc::from_datetime(Utc::now())
    }
}

/// A clock that only moves when told to. Readings are in UTC milliseconds.
#[derive(Debug, Default)]
pub struct ManualClock {
    ms: AtomicI64,
}

impl ManualClock {
    /// Panics if `ms` is outside the representable instant range.
    pub fn new(ms: i64) -> Self {
        assert!(
            TimestampUtc::from_utc_ms(ms).is_some(),
            "ManualClock start {ms} is not a representable instant"
        );
        Self {
            ms: AtomicI64::new(ms),
        }
    }

    /// Values past the representable range are clamped to its ends.
    pub fn set(&self, ms: i64) {
        self.ms.store(clamp_ms(ms), Ordering::SeqCst);
    }

    /// Saturates at the ends of the representable range.
    pub fn advance(&self, by: Duration) {
        let step = by.num_milliseconds();
        let _ = self
            .ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                Some(clamp_ms(cur.saturating_add(step)))
            });
    }

    pub fn millis(&self) -> i64 {
        self.ms.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimestampUtc {
        TimestampUtc::from_utc_ms_saturating(self.millis())
    }
}

fn clamp_ms(ms: i64) -> i64 {
    ms.clamp(TimestampUtc::min_utc_ms(), TimestampUtc::max_utc_ms())
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> TimestampUtc {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> TimestampUtc {
        (**self).now()
    }
}
