// Library exports for the binary and tests
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use error::AnnouncementError;
pub use models::announcement::Announcement;
pub use models::payload::{Payload, PayloadValue};
pub use models::timestamp::TimestampUtc;
pub use models::uri_string::UriString;
pub use services::clock::{Clock, ManualClock, SystemClock};
