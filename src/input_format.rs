// src/input_format.rs - JSON lines from other producers into records

use crate::config::{
    LEVEL_FIELD, LEVEL_KEYS, MESSAGE_FIELD, MESSAGE_KEYS, TIMESTAMP_FIELD, TIMESTAMP_KEYS,
};
use crate::console::Record;
use crate::error::LogError;
use serde_json::Value;

pub trait LineParser {
    fn parse_line(&self, line: &str) -> Result<Record, LogError>;
}

/// Parses one JSON object per line and renames well-known timestamp, level
/// and message keys to the names the console writer renders as parts.
pub struct JsonlParser;

impl JsonlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for JsonlParser {
    fn parse_line(&self, line: &str) -> Result<Record, LogError> {
        match serde_json::from_str::<Value>(line.trim())? {
            Value::Object(record) => Ok(normalize_keys(record)),
            other => Err(LogError::NotAnObject(other.to_string())),
        }
    }
}

/// Move the first alias found for each part onto its canonical key.
///
/// A record that already uses the canonical key is left alone for that part.
pub fn normalize_keys(mut record: Record) -> Record {
    for (canonical, aliases) in [
        (TIMESTAMP_FIELD, TIMESTAMP_KEYS),
        (LEVEL_FIELD, LEVEL_KEYS),
        (MESSAGE_FIELD, MESSAGE_KEYS),
    ] {
        if record.contains_key(canonical) {
            continue;
        }
        if let Some(alias) = aliases.iter().find(|a| record.contains_key(**a)) {
            if let Some(value) = record.remove(*alias) {
                record.insert(canonical.to_string(), value);
            }
        }
    }

    if let Some(Value::String(level)) = record.get_mut(LEVEL_FIELD) {
        *level = level.to_lowercase();
    }

    record
}
