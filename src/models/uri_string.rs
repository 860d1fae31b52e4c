use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid url {input:?}: {reason}")]
pub struct UriStringError {
    pub input: String,
    pub reason: String,
}

/// An absolute URL, validated on construction.
///
/// The original text is kept as given (no normalisation), so it can be
/// written back out byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UriString(String);

impl UriString {
    pub fn new(value: impl Into<String>) -> Result<Self, UriStringError> {
        let value = value.into();
        match Url::parse(&value) {
            Ok(_) => Ok(Self(value)),
            Err(e) => Err(UriStringError {
                input: value,
                reason: e.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UriString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UriString {
    type Err = UriStringError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UriString {
    type Error = UriStringError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UriString> for String {
    fn from(value: UriString) -> Self {
        value.0
    }
}

impl AsRef<str> for UriString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
