#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

pub const TS_REGEX: &str = r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}";

pub const RESET_MARKER: &[u8] = &[27, 91, 48, 109];
pub const BLACK_MARKER: &[u8] = &[27, 91, 51, 48, 109];
pub const GREEN_MARKER: &[u8] = &[27, 91, 51, 50, 109];
pub const YELLOW_MARKER: &[u8] = &[27, 91, 51, 51, 109];
pub const RED_MARKER: &[u8] = &[27, 91, 51, 49, 109];

/// Destination that keeps only the last write, like a single-line display
#[derive(Clone, Default)]
pub struct LastWrite(Arc<Mutex<String>>);

impl LastWrite {
    pub fn msg(&self) -> String {
        self.0.lock().unwrap().clone()
    }
}

impl Write for LastWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        *self.0.lock().unwrap() = String::from_utf8_lossy(buf).into_owned();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Destination that accumulates every write
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn contains_bytes(haystack: &str, needle: &[u8]) -> bool {
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window == needle)
}
