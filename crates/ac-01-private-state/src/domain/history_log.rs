//! # History Log
//!
//! The persisted modification history of one private key.
//!
//! ## Layout
//!
//! A JSON array, most-recent-first. Each entry uses one-letter field names
//! and omits empty fields:
//!
//! ```text
//! [{"i":"tx3","v":"7632","t":{"seconds":3,"nanos":0},"d":true},
//!  {"i":"tx2","v":"7632","t":{"seconds":2,"nanos":0}},
//!  {"i":"tx1","v":"7631","t":{"seconds":1,"nanos":0}}]
//! ```
//!
//! Values are hex so arbitrary bytes survive. Encoding is deterministic:
//! re-encoding a decoded log reproduces the original bytes.

use super::errors::HistoryLogError;
use serde::{Deserialize, Serialize};
use shared_types::{KeyModification, TxTimestamp};

/// One recorded modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryEntry {
    #[serde(rename = "i", default, skip_serializing_if = "String::is_empty")]
    pub tx_id: String,

    /// Written value; for deletes, the last value the key held.
    #[serde(rename = "v", default, skip_serializing_if = "Vec::is_empty", with = "hex_value")]
    pub value: Vec<u8>,

    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TxTimestamp>,

    #[serde(rename = "d", default, skip_serializing_if = "is_false")]
    pub is_delete: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Serde support for opaque values as hex strings
mod hex_value {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(&encoded).map_err(serde::de::Error::custom)
    }
}

impl HistoryEntry {
    pub fn write(tx_id: impl Into<String>, timestamp: TxTimestamp, value: Vec<u8>) -> Self {
        Self {
            tx_id: tx_id.into(),
            value,
            timestamp: Some(timestamp),
            is_delete: false,
        }
    }

    /// Deletion marker carrying the key's last known value.
    pub fn deletion(tx_id: impl Into<String>, timestamp: TxTimestamp, last_value: Vec<u8>) -> Self {
        Self {
            tx_id: tx_id.into(),
            value: last_value,
            timestamp: Some(timestamp),
            is_delete: true,
        }
    }
}

impl From<HistoryEntry> for KeyModification {
    fn from(entry: HistoryEntry) -> Self {
        KeyModification {
            tx_id: entry.tx_id,
            value: entry.value,
            timestamp: entry.timestamp,
            is_delete: entry.is_delete,
        }
    }
}

/// Ordered history of a single key, most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode stored bytes. Missing or empty bytes are an empty log.
    pub fn decode(bytes: Option<&[u8]>) -> Result<Self, HistoryLogError> {
        match bytes {
            None => Ok(Self::new()),
            Some(bytes) if bytes.is_empty() => Ok(Self::new()),
            Some(bytes) => serde_json::from_slice(bytes).map_err(HistoryLogError::Decode),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, HistoryLogError> {
        serde_json::to_vec(self).map_err(HistoryLogError::Encode)
    }

    /// Put `entry` in front as the most recent modification.
    pub fn prepend(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// Most recent non-empty value, scanning newest to oldest.
    pub fn last_known_value(&self) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| !entry.value.is_empty())
            .map(|entry| entry.value.as_slice())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Host-shaped records, most-recent-first.
    pub fn into_modifications(self) -> Vec<KeyModification> {
        self.entries.into_iter().map(KeyModification::from).collect()
    }
}
