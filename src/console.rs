use crate::config::{
    ConsoleConfig, Part, ERROR_FIELD, LEVEL_FIELD, MESSAGE_FIELD, TIMESTAMP_FIELD,
};
use crate::error::LogError;
use crate::formatters::FormatHooks;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::io::Write;

/// A structured log event as the console writer sees it
pub type Record = serde_json::Map<String, Value>;

/// Render a record as one console line, newline included.
///
/// The timestamp is rendered as stored; records from other producers go
/// through [`normalize_record_timestamp`] first.
///
/// Parts are rendered first, in `config.parts_order`; a part whose hook
/// returns an empty string is dropped along with its separator. The
/// remaining fields follow, sorted by name with `error` moved to the front.
pub fn render_record<H: FormatHooks + ?Sized>(
    config: &ConsoleConfig,
    hooks: &mut H,
    record: &Record,
) -> String {
    let mut line = String::new();

    for part in &config.parts_order {
        let formatted = match part {
            Part::Timestamp => hooks.format_timestamp(&text_of(record, TIMESTAMP_FIELD)),
            Part::Level => hooks.format_level(&text_of(record, LEVEL_FIELD)),
            Part::Message => hooks.format_message(&text_of(record, MESSAGE_FIELD)),
            other => hooks.format_field_value(&text_of(record, other.key())),
        };
        push_part(&mut line, &formatted);
    }

    for key in field_order(config, record) {
        let value = value_to_text(&record[key]);
        let pair = if key == ERROR_FIELD {
            format!(
                "{}{}",
                hooks.format_err_field_name(key),
                hooks.format_err_field_value(&value)
            )
        } else {
            format!(
                "{}{}",
                hooks.format_field_name(key),
                hooks.format_field_value(&value)
            )
        };
        push_part(&mut line, &pair);
    }

    line.push('\n');
    line
}

fn push_part(line: &mut String, part: &str) {
    if part.is_empty() {
        return;
    }
    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str(part);
}

fn text_of(record: &Record, key: &str) -> String {
    record.get(key).map(value_to_text).unwrap_or_default()
}

/// Keys rendered as `name=value` pairs, in output order
fn field_order<'a>(config: &ConsoleConfig, record: &'a Record) -> Vec<&'a String> {
    let mut keys: Vec<&String> = record
        .keys()
        .filter(|k| !config.is_part_key(k) && !config.is_excluded(k))
        .collect();
    keys.sort_by(|a, b| {
        (a.as_str() != ERROR_FIELD)
            .cmp(&(b.as_str() != ERROR_FIELD))
            .then_with(|| a.cmp(b))
    });
    keys
}

/// Textual form of a field value
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Bring a timestamp value into `config.time_format`.
///
/// Values already in that format are kept as-is; other strings go through
/// `dateparser`, integers are Unix seconds. Anything else is left verbatim.
pub fn normalize_timestamp(value: &Value, config: &ConsoleConfig) -> String {
    match value {
        Value::String(s) => {
            if NaiveDateTime::parse_from_str(s, &config.time_format).is_ok() {
                return s.clone();
            }
            match dateparser::parse(s) {
                Ok(time) => config.time_zone.format(time, &config.time_format),
                Err(_) => s.clone(),
            }
        }
        Value::Number(n) => match n
            .as_i64()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        {
            Some(time) => config.time_zone.format(time, &config.time_format),
            None => n.to_string(),
        },
        other => value_to_text(other),
    }
}

/// Rewrite the `time` field of a foreign record into `config.time_format`
pub fn normalize_record_timestamp(record: &mut Record, config: &ConsoleConfig) {
    if let Some(value) = record.get(TIMESTAMP_FIELD) {
        let timestamp = normalize_timestamp(value, config);
        record.insert(TIMESTAMP_FIELD.to_string(), Value::String(timestamp));
    }
}

/// Renders records through format hooks onto a destination stream
pub struct ConsoleWriter<W: Write, H: FormatHooks> {
    out: W,
    hooks: H,
    config: ConsoleConfig,
}

impl<W: Write, H: FormatHooks> ConsoleWriter<W, H> {
    pub fn new(out: W, hooks: H, config: ConsoleConfig) -> Result<Self, LogError> {
        config.validate()?;
        Ok(Self { out, hooks, config })
    }

    pub fn with_defaults(out: W, hooks: H) -> Self {
        Self {
            out,
            hooks,
            config: ConsoleConfig::default(),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Render and write one line with a single write call
    pub fn write_record(&mut self, record: &Record) -> Result<(), LogError> {
        let line = render_record(&self.config, &mut self.hooks, record);
        self.out.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Parse one JSON object line, normalize its timestamp and write it
    pub fn write_json(&mut self, line: &str) -> Result<(), LogError> {
        match serde_json::from_str::<Value>(line.trim())? {
            Value::Object(mut record) => {
                normalize_record_timestamp(&mut record, &self.config);
                self.write_record(&record)
            }
            other => Err(LogError::NotAnObject(other.to_string())),
        }
    }

    /// Write a line that is not a record, unchanged
    pub fn write_raw(&mut self, line: &str) -> Result<(), LogError> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), LogError> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
