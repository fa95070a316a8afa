use crate::level::Level;

/// Reset sequence written after every colorized fragment
pub const RESET: &str = "\x1b[0m";

/// ANSI SGR foreground colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    White = 37,
}

impl Color {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Level-to-color table used by the console formatter
#[derive(Debug, Clone, PartialEq)]
pub struct LevelColors {
    pub trace: Color,
    pub debug: Color,
    pub info: Color,
    pub warn: Color,
    pub error: Color,
    pub fatal: Color,
    pub panic: Color,
    pub default: Color, // Anything that is not a known level, including ""
}

impl Default for LevelColors {
    fn default() -> Self {
        Self {
            trace: Color::Black,
            debug: Color::Black,
            info: Color::Green,
            warn: Color::Yellow,
            error: Color::Red,
            fatal: Color::Red,
            panic: Color::Red,
            default: Color::Black,
        }
    }
}

impl LevelColors {
    pub fn color(&self, level: Level) -> Color {
        match level {
            Level::Trace => self.trace,
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::Fatal => self.fatal,
            Level::Panic => self.panic,
        }
    }

    /// Resolve a raw level token, falling back to the default color
    pub fn color_for(&self, token: &str) -> Color {
        match token.parse::<Level>() {
            Ok(level) => self.color(level),
            Err(_) => self.default,
        }
    }
}

/// Color for a raw level token using the default table
pub fn level_to_color(token: &str) -> Color {
    LevelColors::default().color_for(token)
}

/// Wrap `text` in the escape sequence for `color`.
///
/// Empty input is never wrapped, so no empty escape pairs reach the output.
pub fn colorize(text: &str, color: Color, enabled: bool) -> String {
    if !enabled || text.is_empty() {
        return text.to_string();
    }
    format!("\x1b[{}m{}{}", color.code(), text, RESET)
}
