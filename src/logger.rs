use core::{
    fmt::{self, Display, Formatter, Write},
    str::from_utf8,
    time::Duration,
};

use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;

/// Keeps the most recent log text in a fixed RAM area, oldest bytes overwritten first.
pub struct LogBuffer {
    buffer: &'static mut [u8],
    index: usize,
}

impl LogBuffer {
    pub fn new(buffer: &'static mut [u8]) -> Self {
        Self { buffer, index: 0 }
    }
}

impl Write for LogBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let size = self.buffer.len();
        if size == 0 {
            return Ok(());
        }
        for &byte in s.as_bytes() {
            self.buffer[self.index % size] = byte;
            self.index = self.index.wrapping_add(1);
        }
        Ok(())
    }
}

// Wrapping may cut a multi-byte char at the oldest end, such leftovers are skipped
fn write_bytes(f: &mut Formatter, bytes: impl Iterator<Item = u8>) -> fmt::Result {
    let mut pending = [0u8; 4];
    let mut length = 0;
    for byte in bytes {
        let continuation = byte & 0xC0 == 0x80;
        if continuation && length == 0 {
            continue;
        }
        if !continuation {
            length = 0;
        }
        pending[length] = byte;
        length += 1;
        match from_utf8(&pending[..length]) {
            Ok(text) => {
                f.write_str(text)?;
                length = 0;
            }
            Err(_) if length == pending.len() => length = 0,
            Err(_) => (),
        }
    }
    Ok(())
}

impl Display for LogBuffer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let size = self.buffer.len();
        if self.index <= size {
            return write_bytes(f, self.buffer[..self.index].iter().copied());
        }
        let index = self.index % size;
        write_bytes(f, self.buffer[index..].iter().chain(self.buffer[..index].iter()).copied())
    }
}

static LOG_BUFFER: Mutex<Option<LogBuffer>> = Mutex::new(None);
static UPTIME: Mutex<Option<fn() -> Duration>> = Mutex::new(None);

pub struct Logger;

static LOGGER: Logger = Logger;

impl Log for Logger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let uptime = *UPTIME.lock();
        let millis = uptime.map(|uptime| uptime().as_millis() as u32).unwrap_or(0);
        if let Some(buffer) = LOG_BUFFER.lock().as_mut() {
            let (secs, millis) = (millis / 1000, millis % 1000);
            writeln!(buffer, "[{:5}.{:03}] {}", secs, millis, record.args()).ok();
        }
    }

    fn flush(&self) {}
}

/// Writes the buffered log text, oldest first
pub fn dump(w: &mut impl Write) -> fmt::Result {
    match LOG_BUFFER.lock().as_ref() {
        Some(buffer) => write!(w, "{}", buffer),
        None => Ok(()),
    }
}

pub fn init(buffer: &'static mut [u8], uptime: fn() -> Duration, level: LevelFilter) {
    *LOG_BUFFER.lock() = Some(LogBuffer::new(buffer));
    *UPTIME.lock() = Some(uptime);
    log::set_max_level(level);
    log::set_logger(&LOGGER).ok();
}

mod test {
    #[test]
    fn test_log_buffer() {
        use core::fmt::Write;
        use std::boxed::Box;
        use std::string::ToString;
        use std::vec;

        use super::LogBuffer;

        let mut buffer = LogBuffer::new(Box::leak(vec![0u8; 16].into_boxed_slice()));
        write!(buffer, "hello").unwrap();
        assert_eq!(buffer.to_string(), "hello");

        write!(buffer, " world, motion").unwrap();
        assert_eq!(buffer.to_string(), "lo world, motion");

        write!(buffer, "-lab!").unwrap();
        assert_eq!(buffer.to_string(), "rld, motion-lab!");
    }

    #[test]
    fn test_logger_dump() {
        use core::time::Duration;
        use std::boxed::Box;
        use std::string::String;
        use std::vec;

        use log::LevelFilter;

        use super::{dump, init};

        fn uptime() -> Duration {
            Duration::from_millis(1234)
        }

        let mut text = String::new();
        dump(&mut text).unwrap();
        assert_eq!(text, "");

        // Other tests may log concurrently once installed, so leave plenty of room
        let buffer = Box::leak(vec![0u8; 65536].into_boxed_slice());
        init(buffer, uptime, LevelFilter::Info);
        info!("Mode {} -> {}", "Splash", "Menu");
        debug!("filtered out");

        let mut text = String::new();
        dump(&mut text).unwrap();
        assert!(text.contains("[    1.234] Mode Splash -> Menu\n"));
        assert!(!text.contains("filtered out"));
    }

    #[test]
    fn test_wrapped_multibyte() {
        use core::fmt::Write;
        use std::boxed::Box;
        use std::string::ToString;
        use std::vec;

        use super::LogBuffer;

        let mut buffer = LogBuffer::new(Box::leak(vec![0u8; 4].into_boxed_slice()));
        write!(buffer, "abc°").unwrap();
        assert_eq!(buffer.to_string(), "bc°");
        write!(buffer, "d").unwrap();
        assert_eq!(buffer.to_string(), "c°d");
        write!(buffer, "e").unwrap();
        assert_eq!(buffer.to_string(), "°de");
        write!(buffer, "f").unwrap();
        assert_eq!(buffer.to_string(), "def");
    }
}
