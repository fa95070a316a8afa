// src/lib.rs
pub mod colors;
pub mod config;
pub mod console;
pub mod error;
pub mod event;
pub mod formatters;
pub mod input_format;
pub mod level;
pub mod logger;
pub mod subscriber;

pub use error::*;

pub use colors::{colorize, level_to_color, Color, LevelColors};
pub use config::{ConsoleConfig, DurationUnit, Part, TimeZone};
pub use console::{normalize_record_timestamp, render_record, ConsoleWriter, Record};
pub use event::Event;
pub use formatters::{ColorFormatter, FormatHooks};
pub use input_format::{JsonlParser, LineParser};
pub use level::Level;
pub use logger::Logger;
pub use subscriber::{init_subscriber, FancyFormat};
