/// Hooks the console writer calls to render each part of a line.
///
/// Hooks take `&mut self` so an implementation may carry per-event state;
/// the writer calls them in part order and then once per field.
pub trait FormatHooks {
    fn format_timestamp(&mut self, timestamp: &str) -> String;
    fn format_level(&mut self, level: &str) -> String;
    fn format_message(&mut self, message: &str) -> String;
    fn format_field_name(&mut self, name: &str) -> String;
    fn format_field_value(&mut self, value: &str) -> String;

    fn format_err_field_name(&mut self, name: &str) -> String {
        self.format_field_name(name)
    }

    fn format_err_field_value(&mut self, value: &str) -> String {
        self.format_field_value(value)
    }
}

pub mod color;

pub use color::ColorFormatter;
