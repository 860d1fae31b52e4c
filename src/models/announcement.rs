use chrono::Duration;
use tracing::debug;

use crate::error::AnnouncementError;
use crate::models::payload::Payload;
use crate::models::timestamp::TimestampUtc;
use crate::models::uri_string::UriString;
use crate::services::clock::Clock;

const ENTRY_ID: &str = "i";
const ENTRY_TITLE: &str = "t";
const ENTRY_MESSAGE: &str = "m";
const ENTRY_URL: &str = "u";
const ENTRY_SHOW_UNTIL: &str = "until";

/// A time-limited message shown to the user until `show_until` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    id: String,
    title: String,
    message: Option<String>,
    url: UriString,
    show_until: TimestampUtc,
}

impl Announcement {
    /// Builds a fresh announcement that stays live for `duration` from now.
    pub fn create(
        id: impl Into<String>,
        title: impl Into<String>,
        message: Option<String>,
        url: &str,
        duration: Duration,
        clock: &dyn Clock,
    ) -> Result<Self, AnnouncementError> {
        let id = id.into();
        let title = title.into();

        if id.is_empty() {
            return Err(AnnouncementError::invalid("id must not be empty"));
        }
        if title.is_empty() {
            return Err(AnnouncementError::invalid("title must not be empty"));
        }
        if duration < Duration::zero() {
            return Err(AnnouncementError::invalid(format!(
                "duration must not be negative, got {}ms",
                duration.num_milliseconds()
            )));
        }

        let url = UriString::new(url).map_err(|e| AnnouncementError::invalid(e.to_string()))?;

        let now = clock.now();
        let show_until = now.checked_add(duration).ok_or_else(|| {
            AnnouncementError::invalid(format!(
                "{now} + {}ms overflows the timestamp range",
                duration.num_milliseconds()
            ))
        })?;

        debug!(%id, %show_until, "created announcement");

        Ok(Self {
            id,
            title,
            message,
            url,
            show_until,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn url(&self) -> &UriString {
        &self.url
    }

    pub fn show_until(&self) -> TimestampUtc {
        self.show_until
    }

    /// Live up to and including `show_until`; expired strictly after it.
    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        self.is_expired_at(clock.now())
    }

    pub fn is_expired_at(&self, now: TimestampUtc) -> bool {
        now.is_after(self.show_until)
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self, clock: &dyn Clock) -> Duration {
        clock
            .now()
            .until(self.show_until)
            .unwrap_or_else(Duration::zero)
    }

    pub fn to_payload(&self) -> Payload {
        let mut result = Payload::new();

        result.set_string(ENTRY_ID, self.id.as_str());
        result.set_string(ENTRY_TITLE, self.title.as_str());

        if let Some(message) = &self.message {
            result.set_string(ENTRY_MESSAGE, message.as_str());
        }

        result.set_string(ENTRY_URL, self.url.as_str());
        result.set_long(ENTRY_SHOW_UNTIL, self.show_until.to_utc_ms());

        result
    }

    /// Rebuilds an announcement from `payload`. Never reads the clock.
    ///
    /// `i` is optional: older payloads lack it and take the url as their id.
    /// A present but empty `i` also takes the url, so the id is never empty;
    /// older readers kept the empty string as the id. Unknown keys are ignored.
    pub fn from_payload(payload: &Payload) -> Result<Self, AnnouncementError> {
        let decoded = Self::decode(payload);
        if let Err(e) = &decoded {
            debug!(error = %e, "rejected announcement payload");
        }
        decoded
    }

    fn decode(payload: &Payload) -> Result<Self, AnnouncementError> {
        let title = payload
            .get_string(ENTRY_TITLE)
            .ok_or_else(|| AnnouncementError::missing("title"))?;
        let url = payload
            .get_string(ENTRY_URL)
            .ok_or_else(|| AnnouncementError::missing("url"))?;
        let show_until_ms = payload
            .get_long(ENTRY_SHOW_UNTIL)
            .ok_or_else(|| AnnouncementError::missing("until"))?;

        if title.is_empty() {
            return Err(AnnouncementError::malformed("title", "empty"));
        }

        let id = match payload.get_string(ENTRY_ID) {
            Some(id) if !id.is_empty() => id,
            _ => url,
        };

        let message = payload.get_string(ENTRY_MESSAGE).map(str::to_string);

        let show_until = TimestampUtc::from_utc_ms(show_until_ms).ok_or_else(|| {
            AnnouncementError::malformed("until", format!("{show_until_ms} is out of range"))
        })?;

        let url = UriString::new(url).map_err(|e| AnnouncementError::malformed("url", e.to_string()))?;

        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            message,
            url,
            show_until,
        })
    }
}
