use crate::console::Record;
use crate::error::LogError;
use crate::level::Level;
use crate::logger::Logger;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// A log event under construction.
///
/// Fields are attached by value and the event is emitted by [`Event::msg`]
/// or [`Event::send`]. Dropping an event without either discards it.
/// Emitting a `Fatal` event exits the process with status 1 and emitting a
/// `Panic` event panics, both after the line has been written.
#[must_use = "an event is only written by msg() or send()"]
pub struct Event<'a> {
    logger: &'a Logger,
    level: Level,
    fields: Record,
    enabled: bool,
}

impl<'a> Event<'a> {
    pub(crate) fn new(logger: &'a Logger, level: Level, enabled: bool) -> Self {
        Event {
            logger,
            level,
            fields: Record::new(),
            enabled,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn put(mut self, key: &str, value: Value) -> Self {
        if self.enabled {
            self.fields.insert(key.to_string(), value);
        }
        self
    }

    pub fn str(self, key: &str, value: &str) -> Self {
        self.put(key, Value::String(value.to_string()))
    }

    pub fn int(self, key: &str, value: i64) -> Self {
        self.put(key, Value::from(value))
    }

    pub fn uint(self, key: &str, value: u64) -> Self {
        self.put(key, Value::from(value))
    }

    pub fn float(self, key: &str, value: f64) -> Self {
        self.put(key, Value::from(value))
    }

    pub fn bool(self, key: &str, value: bool) -> Self {
        self.put(key, Value::Bool(value))
    }

    /// Duration as a fractional number in the logger's duration unit
    pub fn dur(self, key: &str, value: Duration) -> Self {
        let value = self.logger.config().duration_unit.to_value(value);
        self.put(key, value)
    }

    /// Attach `err` under the reserved `error` field
    pub fn err<E: std::error::Error + ?Sized>(self, err: &E) -> Self {
        self.put(crate::config::ERROR_FIELD, Value::String(err.to_string()))
    }

    /// Any serializable value; a value that fails to serialize is recorded
    /// as its serialization error text.
    pub fn any<T: Serialize + ?Sized>(self, key: &str, value: &T) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| Value::String(e.to_string()));
        self.put(key, value)
    }

    pub fn fields(mut self, fields: Record) -> Self {
        if self.enabled {
            self.fields.extend(fields);
        }
        self
    }

    pub fn msg(self, message: &str) -> Result<(), LogError> {
        let result = if self.enabled {
            self.logger.emit(self.level, self.fields, message)
        } else {
            Ok(())
        };

        match self.level {
            Level::Fatal => std::process::exit(1),
            Level::Panic => panic!("{}", message),
            _ => result,
        }
    }

    pub fn send(self) -> Result<(), LogError> {
        self.msg("")
    }
}
