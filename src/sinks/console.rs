//! Console sink shared by all workers
//!
//! The console stream is the one resource every worker touches, so all writes
//! and flushes go through a single output lock. Color bracketing, payload,
//! and color reset are emitted inside the same critical section; bytes from
//! concurrent workers can never interleave.

use colored::{Color, Colorize};
use parking_lot::Mutex;
use std::io::{self, Write};

pub struct ConsoleSink {
    /// The global output lock; holding it is the only way to reach the stream
    target: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Console sink backed by the process stdout stream
    pub fn stdout() -> Self {
        Self::with_target(Box::new(io::stdout()))
    }

    /// Console sink backed by an arbitrary target, used by tests to capture
    /// the exact write and flush sequence
    pub fn with_target(target: Box<dyn Write + Send>) -> Self {
        Self {
            target: Mutex::new(target),
        }
    }

    /// Write one record's bytes, optionally bracketed in `color`.
    ///
    /// Write failures are absorbed: the producer already returned when this
    /// runs, so there is nobody left to notify.
    pub fn write(&self, bytes: &[u8], color: Option<Color>) {
        let mut target = self.target.lock();
        match color {
            Some(color) => {
                let text = String::from_utf8_lossy(bytes).color(color).to_string();
                let _ = target.write_all(text.as_bytes());
            }
            None => {
                let _ = target.write_all(bytes);
            }
        }
    }

    /// Flush the stream under the output lock
    pub fn flush(&self) {
        let _ = self.target.lock().flush();
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Write target that appends into a shared buffer
    #[derive(Clone, Default)]
    struct Capture {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_plain_write_is_verbatim() {
        let capture = Capture::default();
        let sink = ConsoleSink::with_target(Box::new(capture.clone()));

        sink.write(b"one\n", None);
        sink.write(b"two\n", None);

        assert_eq!(&*capture.buffer.lock(), b"one\ntwo\n");
    }

    #[test]
    fn test_colored_write_contains_payload() {
        let capture = Capture::default();
        let sink = ConsoleSink::with_target(Box::new(capture.clone()));

        sink.write(b"warning text", Some(Color::Yellow));

        // Whether or not escape codes are emitted depends on the environment;
        // the payload itself must always be present.
        let written = capture.buffer.lock().clone();
        let written = String::from_utf8_lossy(&written).to_string();
        assert!(written.contains("warning text"));
    }
}
