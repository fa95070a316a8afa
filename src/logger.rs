use crate::config::{
    ConsoleConfig, APPLICATION_FIELD, FUNCTION_FIELD, LEVEL_FIELD, MESSAGE_FIELD,
    TIMESTAMP_FIELD,
};
use crate::console::{ConsoleWriter, Record};
use crate::error::LogError;
use crate::event::Event;
use crate::formatters::ColorFormatter;
use crate::level::Level;
use serde_json::Value;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

type SharedWriter = Arc<Mutex<ConsoleWriter<Box<dyn Write + Send>, ColorFormatter>>>;

/// Per-level logging facade over a colorizing console writer.
///
/// Clones and derived loggers ([`Logger::with_field`], [`Logger::with_level`])
/// share the destination and formatter state. Emission takes the writer's
/// lock, so one event's level is never used to color another's fields.
/// Independent loggers share nothing.
#[derive(Clone)]
pub struct Logger {
    writer: SharedWriter,
    config: Arc<ConsoleConfig>,
    context: Record,
    min_level: Level,
}

impl Logger {
    pub fn new<W: Write + Send + 'static>(writer: W, color_enabled: bool) -> Self {
        let config = ConsoleConfig::default();
        let hooks = ColorFormatter::with_colors(color_enabled, config.level_colors.clone());
        let out: Box<dyn Write + Send> = Box::new(writer);
        Self::from_parts(ConsoleWriter::with_defaults(out, hooks), config)
    }

    pub fn with_config<W: Write + Send + 'static>(
        writer: W,
        color_enabled: bool,
        config: ConsoleConfig,
    ) -> Result<Self, LogError> {
        let hooks = ColorFormatter::with_colors(color_enabled, config.level_colors.clone());
        let out: Box<dyn Write + Send> = Box::new(writer);
        let console = ConsoleWriter::new(out, hooks, config.clone())?;
        Ok(Self::from_parts(console, config))
    }

    /// Logger bound to standard output
    pub fn stdout(color_enabled: bool) -> Self {
        Self::new(std::io::stdout(), color_enabled)
    }

    fn from_parts(
        console: ConsoleWriter<Box<dyn Write + Send>, ColorFormatter>,
        config: ConsoleConfig,
    ) -> Self {
        let mut context = Record::new();
        context.insert(APPLICATION_FIELD.to_string(), Value::String(String::new()));
        context.insert(FUNCTION_FIELD.to_string(), Value::String(String::new()));

        Logger {
            writer: Arc::new(Mutex::new(console)),
            config: Arc::new(config),
            context,
            min_level: Level::Trace,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Derived logger that adds `key=value` to every event
    pub fn with_field(&self, key: &str, value: impl Into<Value>) -> Logger {
        let mut logger = self.clone();
        logger.context.insert(key.to_string(), value.into());
        logger
    }

    /// Derived logger that drops events below `level`
    pub fn with_level(&self, level: Level) -> Logger {
        Logger {
            min_level: level,
            ..self.clone()
        }
    }

    pub fn event(&self, level: Level) -> Event<'_> {
        Event::new(self, level, level >= self.min_level)
    }

    pub fn trace(&self) -> Event<'_> {
        self.event(Level::Trace)
    }

    pub fn debug(&self) -> Event<'_> {
        self.event(Level::Debug)
    }

    pub fn info(&self) -> Event<'_> {
        self.event(Level::Info)
    }

    pub fn warn(&self) -> Event<'_> {
        self.event(Level::Warn)
    }

    pub fn error(&self) -> Event<'_> {
        self.event(Level::Error)
    }

    /// Error-level event with `err` already attached
    pub fn err<E: std::error::Error + ?Sized>(&self, err: &E) -> Event<'_> {
        self.event(Level::Error).err(err)
    }

    pub fn fatal(&self) -> Event<'_> {
        self.event(Level::Fatal)
    }

    pub fn panic(&self) -> Event<'_> {
        self.event(Level::Panic)
    }

    pub(crate) fn emit(&self, level: Level, fields: Record, message: &str) -> Result<(), LogError> {
        let mut record = Record::new();
        record.insert(
            TIMESTAMP_FIELD.to_string(),
            Value::String(self.config.time_zone.now(&self.config.time_format)),
        );
        record.insert(LEVEL_FIELD.to_string(), Value::String(level.as_str().to_string()));
        for (key, value) in &self.context {
            record.insert(key.clone(), value.clone());
        }
        record.extend(fields);
        if !message.is_empty() {
            record.insert(MESSAGE_FIELD.to_string(), Value::String(message.to_string()));
        }

        // Flushed per event: fatal and panic events terminate right after this
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_record(&record)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_context_fields_stay_hidden() {
        let buffer = Buffer::default();
        let logger = Logger::new(buffer.clone(), false);
        logger.info().str("Param", "String value").msg("Here you are:").unwrap();

        let line = buffer.contents();
        assert!(line.ends_with(" INFO | Here you are: Param=String value\n"));
        assert!(!line.contains("application"));
        assert!(!line.contains("function"));
    }

    #[test]
    fn test_min_level_drops_events() {
        let buffer = Buffer::default();
        let logger = Logger::new(buffer.clone(), false).with_level(Level::Warn);
        logger.debug().str("k", "v").msg("hidden").unwrap();
        logger.info().msg("hidden").unwrap();
        assert_eq!(buffer.contents(), "");

        logger.warn().msg("shown").unwrap();
        assert!(buffer.contents().contains("WARN | shown"));
    }

    #[test]
    fn test_with_field_adds_context() {
        let buffer = Buffer::default();
        let logger = Logger::new(buffer.clone(), false).with_field("svc", "api");
        logger.info().uint("n", 3).send().unwrap();
        assert!(buffer.contents().ends_with("INFO | n=3 svc=api\n"));
    }

    #[test]
    fn test_typed_fields() {
        let buffer = Buffer::default();
        let logger = Logger::new(buffer.clone(), false);
        logger
            .info()
            .int("i", -2)
            .float("f", 0.5)
            .bool("b", true)
            .dur("d", Duration::from_nanos(1_234_567))
            .any("list", &vec![1, 2])
            .send()
            .unwrap();
        assert!(buffer
            .contents()
            .ends_with("INFO | b=true d=1.234567 f=0.5 i=-2 list=[1,2]\n"));
    }

    #[test]
    fn test_write_failure_propagates() {
        let logger = Logger::new(BrokenPipe, false);
        let result = logger.info().msg("lost");
        assert!(matches!(result, Err(LogError::IoError(_))));
    }

    #[test]
    fn test_buffered_destination_is_flushed_per_event() {
        let buffer = Buffer::default();
        let logger = Logger::new(io::BufWriter::new(buffer.clone()), false);
        logger.warn().msg("visible").unwrap();
        assert!(buffer.contents().ends_with("WARN | visible\n"));
    }

    #[test]
    fn test_utc_time_only_format_is_not_shifted() {
        let config = ConsoleConfig {
            time_format: "%H:%M:%S".to_string(),
            time_zone: crate::config::TimeZone::Utc,
            ..ConsoleConfig::default()
        };
        let buffer = Buffer::default();
        let logger = Logger::with_config(buffer.clone(), false, config).unwrap();

        let before = chrono::Utc::now().format("%H:%M").to_string();
        logger.info().msg("x").unwrap();
        let after = chrono::Utc::now().format("%H:%M").to_string();

        let line = buffer.contents();
        assert!(
            line.starts_with(&before) || line.starts_with(&after),
            "expected UTC {} or {}, got {:?}",
            before,
            after,
            line
        );
        assert!(line.ends_with(" INFO | x\n"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ConsoleConfig {
            parts_order: vec![crate::config::Part::Message, crate::config::Part::Level],
            ..ConsoleConfig::default()
        };
        assert!(Logger::with_config(Vec::new(), false, config).is_err());
    }
}
