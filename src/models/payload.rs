use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AnnouncementError;

/// A single typed entry. The set of variants is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    String(String),
    Long(i64),
    Bool(bool),
}

/// Key-addressed bag of primitive values used to persist and transport records.
///
/// Entries are kept in key order, so two payloads holding the same entries
/// compare equal and serialize identically whatever order they were set in.
/// Reading a key with the wrong typed getter answers `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    entries: BTreeMap<String, PayloadValue>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .insert(key.to_string(), PayloadValue::String(value.into()));
    }

    pub fn set_long(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), PayloadValue::Long(value));
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.entries.insert(key.to_string(), PayloadValue::Bool(value));
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            PayloadValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.entries.get(key)? {
            PayloadValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key)? {
            PayloadValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<PayloadValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Transport form: a flat JSON object of the entries.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.entries)
            .expect("string keys and primitive values always serialize to JSON")
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AnnouncementError> {
        serde_json::from_slice(bytes)
            .map_err(|e| AnnouncementError::malformed("payload", e.to_string()))
    }
}
