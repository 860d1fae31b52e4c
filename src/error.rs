use thiserror::Error;

/// Errors surfaced by the announcement codec and factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnouncementError {
    /// A required payload entry is missing or one of its fields is unusable.
    #[error("malformed payload: {field}: {reason}")]
    MalformedPayload { field: &'static str, reason: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl AnnouncementError {
    pub fn missing(field: &'static str) -> Self {
        AnnouncementError::MalformedPayload {
            field,
            reason: "required entry missing".into(),
        }
    }

    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        AnnouncementError::MalformedPayload {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        AnnouncementError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// The offending field for decode errors, `None` for argument errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AnnouncementError::MalformedPayload { field, .. } => Some(*field),
            AnnouncementError::InvalidArgument { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = AnnouncementError::missing("title");
        assert_eq!(err.to_string(), "malformed payload: title: required entry missing");
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn test_invalid_argument_has_no_field() {
        let err = AnnouncementError::invalid("duration overflows");
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("duration overflows"));
    }
}
