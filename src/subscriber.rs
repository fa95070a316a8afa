//! Bridge to `tracing`: renders `tracing` events with the same format hooks
//! as [`crate::Logger`].

use crate::config::{ConsoleConfig, LEVEL_FIELD, TIMESTAMP_FIELD};
use crate::console::{render_record, Record};
use crate::error::LogError;
use crate::formatters::ColorFormatter;
use crate::level::Level;
use serde_json::Value;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// `FormatEvent` implementation producing colorized console lines
pub struct FancyFormat {
    hooks: Mutex<ColorFormatter>,
    config: ConsoleConfig,
}

impl FancyFormat {
    pub fn new(color_enabled: bool) -> Self {
        Self {
            hooks: Mutex::new(ColorFormatter::new(color_enabled)),
            config: ConsoleConfig::default(),
        }
    }

    pub fn with_config(color_enabled: bool, config: ConsoleConfig) -> Result<Self, LogError> {
        config.validate()?;
        Ok(Self {
            hooks: Mutex::new(ColorFormatter::with_colors(
                color_enabled,
                config.level_colors.clone(),
            )),
            config,
        })
    }
}

/// Collects event fields into a record; `message` lands in the message slot
#[derive(Default)]
struct RecordVisitor {
    record: Record,
}

impl RecordVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.record.insert(field.name().to_string(), value);
    }
}

impl Visit for RecordVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::String(value.to_string()));
    }
}

impl<S, N> FormatEvent<S, N> for FancyFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = Level::from(*event.metadata().level());

        let mut visitor = RecordVisitor::default();
        visitor.record.insert(
            TIMESTAMP_FIELD.to_string(),
            Value::String(self.config.time_zone.now(&self.config.time_format)),
        );
        visitor
            .record
            .insert(LEVEL_FIELD.to_string(), Value::String(level.as_str().to_string()));
        event.record(&mut visitor);

        let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        let line = render_record(&self.config, &mut *hooks, &visitor.record);
        writer.write_str(&line)
    }
}

/// Install a global subscriber writing to stderr through [`FancyFormat`].
///
/// The filter comes from `RUST_LOG` when set, otherwise `default_filter`.
pub fn init_subscriber(color_enabled: bool, default_filter: &str) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| LogError::SubscriberError(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .event_format(FancyFormat::new(color_enabled))
        .try_init()
        .map_err(|e| LogError::SubscriberError(e.to_string()))
}
