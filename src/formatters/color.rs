use crate::colors::{colorize, Color, LevelColors};
use crate::formatters::FormatHooks;

/// Level-keyed colorizing format hooks.
///
/// `current_level` has a single writer, [`FormatHooks::format_level`], and is
/// read by the message and field hooks of the same event. The console writer
/// guarantees the level part is rendered before the message part and before
/// any field, so readers always see the level of the event being rendered.
///
/// One instance must not render two events at once; wrap it in a mutex (as
/// [`crate::Logger`] does) or give each thread its own.
#[derive(Debug, Clone)]
pub struct ColorFormatter {
    current_level: String,
    color_enabled: bool,
    colors: LevelColors,
}

impl ColorFormatter {
    pub fn new(color_enabled: bool) -> Self {
        Self::with_colors(color_enabled, LevelColors::default())
    }

    pub fn with_colors(color_enabled: bool, colors: LevelColors) -> Self {
        Self {
            current_level: String::new(),
            color_enabled,
            colors,
        }
    }

    pub fn current_level(&self) -> &str {
        &self.current_level
    }

    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    fn current_color(&self) -> Color {
        self.colors.color_for(&self.current_level)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        colorize(text, color, self.color_enabled)
    }
}

impl FormatHooks for ColorFormatter {
    fn format_timestamp(&mut self, timestamp: &str) -> String {
        self.paint(timestamp, self.colors.color_for(""))
    }

    fn format_level(&mut self, level: &str) -> String {
        self.current_level = level.to_string();
        let padded = format!("{:<5}|", level).to_uppercase();
        self.paint(&padded, self.current_color())
    }

    fn format_message(&mut self, message: &str) -> String {
        self.paint(message, self.current_color())
    }

    fn format_field_name(&mut self, name: &str) -> String {
        self.paint(&format!("{}=", name), self.current_color())
    }

    fn format_field_value(&mut self, value: &str) -> String {
        self.paint(value, self.current_color())
    }
}
