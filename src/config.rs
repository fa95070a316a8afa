use crate::colors::LevelColors;
use crate::error::LogError;
use chrono::{DateTime, Local, Utc};
use serde_json::Value;
use std::time::Duration;

pub const TIMESTAMP_FIELD: &str = "time";
pub const LEVEL_FIELD: &str = "level";
pub const MESSAGE_FIELD: &str = "message";
pub const ERROR_FIELD: &str = "error";
pub const APPLICATION_FIELD: &str = "application";
pub const FUNCTION_FIELD: &str = "function";

/// `2024-01-02T03:04:05.006`
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Keys other producers commonly use for the timestamp, level and message
pub const TIMESTAMP_KEYS: &[&str] = &[
    "time",
    "timestamp",
    "ts",
    "datetime",
    "date",
    "@timestamp",
    "@t",
];
pub const LEVEL_KEYS: &[&str] = &[
    "level",
    "loglevel",
    "log_level",
    "lvl",
    "severity",
    "levelname",
    "@l",
];
pub const MESSAGE_KEYS: &[&str] = &["message", "msg", "@m", "@message", "text", "content"];

/// Named slot of a console line, rendered before the free fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Timestamp,
    Level,
    Application,
    Function,
    Message,
    Custom(String),
}

impl Part {
    pub fn key(&self) -> &str {
        match self {
            Part::Timestamp => TIMESTAMP_FIELD,
            Part::Level => LEVEL_FIELD,
            Part::Application => APPLICATION_FIELD,
            Part::Function => FUNCTION_FIELD,
            Part::Message => MESSAGE_FIELD,
            Part::Custom(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZone {
    #[default]
    Local,
    Utc,
}

impl TimeZone {
    pub fn now(&self, format: &str) -> String {
        self.format(Utc::now(), format)
    }

    pub fn format(&self, time: DateTime<Utc>, format: &str) -> String {
        match self {
            TimeZone::Local => time.with_timezone(&Local).format(format).to_string(),
            TimeZone::Utc => time.format(format).to_string(),
        }
    }
}

/// Unit in which duration fields are serialized (as fractional numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationUnit {
    Nanoseconds,
    Microseconds,
    #[default]
    Milliseconds,
    Seconds,
}

impl DurationUnit {
    fn nanos_per_unit(&self) -> f64 {
        match self {
            DurationUnit::Nanoseconds => 1.0,
            DurationUnit::Microseconds => 1_000.0,
            DurationUnit::Milliseconds => 1_000_000.0,
            DurationUnit::Seconds => 1_000_000_000.0,
        }
    }

    pub fn to_value(&self, duration: Duration) -> Value {
        Value::from(duration.as_nanos() as f64 / self.nanos_per_unit())
    }
}

/// Configuration of the console writer and its format hooks
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub time_format: String,
    pub time_zone: TimeZone,
    pub parts_order: Vec<Part>,
    pub fields_exclude: Vec<String>,
    pub level_colors: LevelColors,
    pub duration_unit: DurationUnit,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            time_zone: TimeZone::Local,
            // application/function only hold positions; they are always empty
            parts_order: vec![
                Part::Timestamp,
                Part::Level,
                Part::Application,
                Part::Function,
                Part::Message,
            ],
            fields_exclude: vec![APPLICATION_FIELD.to_string(), FUNCTION_FIELD.to_string()],
            level_colors: LevelColors::default(),
            duration_unit: DurationUnit::Milliseconds,
        }
    }
}

impl ConsoleConfig {
    /// The level hook records the level read by the message and value hooks,
    /// so every part except the timestamp has to come after it.
    pub fn validate(&self) -> Result<(), LogError> {
        let level = self
            .parts_order
            .iter()
            .position(|p| *p == Part::Level)
            .ok_or_else(|| {
                LogError::ConfigError("parts order must contain the level part".to_string())
            })?;

        // Only the timestamp hook ignores the current level
        match self.parts_order[..level]
            .iter()
            .find(|p| **p != Part::Timestamp)
        {
            Some(part) => Err(LogError::ConfigError(format!(
                "part '{}' must come after the level part",
                part.key()
            ))),
            None => Ok(()),
        }
    }

    pub fn is_part_key(&self, key: &str) -> bool {
        self.parts_order.iter().any(|p| p.key() == key)
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        self.fields_exclude.iter().any(|k| k == key)
    }
}
