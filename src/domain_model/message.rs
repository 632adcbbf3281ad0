use crate::domain_model::{DateRange, UserId, field};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stored message timestamps, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

#[derive(Debug, Clone)]
pub struct NewMessage<'a> {
    pub user_id: &'a UserId,
    pub text: &'a str,
    pub created_at: NaiveDateTime,
}

impl NewMessage<'_> {
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            (field::USER_ID.to_string(), self.user_id.to_string()),
            (field::TEXT.to_string(), self.text.to_string()),
            (field::TIMESTAMP.to_string(), format_timestamp(self.created_at)),
        ]
    }
}

/// A message hash as found in the store. Fields are kept raw because other
/// writers share the key space and nothing validates what they store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub key: String,
    pub user_id: String,
    pub text: String,
    pub timestamp: Option<String>,
}

impl MessageRecord {
    /// Returns `None` for hashes without an owner, including keys that
    /// vanished between the scan and the read.
    pub fn from_fields(key: &str, mut fields: HashMap<String, String>) -> Option<Self> {
        let user_id = fields.remove(field::USER_ID)?;
        Some(Self {
            key: key.to_string(),
            user_id,
            text: fields.remove(field::TEXT).unwrap_or_default(),
            timestamp: fields.remove(field::TIMESTAMP),
        })
    }

    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    /// Messages without a parseable timestamp are never filtered out.
    pub fn in_range(&self, range: &DateRange) -> bool {
        match self.parsed_timestamp() {
            Some(at) => range.contains(at),
            None => true,
        }
    }
}

impl fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.timestamp {
            Some(ts) => write!(f, "{}: {}", ts, self.text),
            None => write!(f, "{}", self.text),
        }
    }
}
