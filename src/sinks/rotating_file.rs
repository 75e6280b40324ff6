//! Per-logger rotating file writer
//!
//! Each logger owns one writer, registered in the pool's sink registry under
//! the logger's sender id. The writer holds at most one open file handle and
//! applies size- and count-based rollover: once the current file's byte
//! budget is exhausted it moves to the next 1-based index, and at the last
//! index it either wraps back to index 1 (truncating it) or stops accepting
//! writes.
//!
//! Files are named `<directory>/<tag>-<index>.log`. The directory listing is
//! the only persisted state; no manifest is kept.

use crate::core::error::{LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Rotating file writer, shareable across the registry and its owning logger.
///
/// A writer starts in the closed state and is a no-op until [`init`] opens
/// it. [`terminate`] returns it to closed; a later `init` starts over at
/// file index 1. All methods take `&self`; state lives behind an interior
/// mutex so `Arc<RotatingFileWriter>` handles can be used from any thread.
///
/// [`init`]: RotatingFileWriter::init
/// [`terminate`]: RotatingFileWriter::terminate
pub struct RotatingFileWriter {
    inner: Mutex<WriterInner>,
}

struct WriterInner {
    directory: PathBuf,
    tag: String,
    /// Byte budget per file; 0 disables size-based rotation
    bytes_per_file: u64,
    /// File count bound; 0 disables rotation entirely
    max_files: u32,
    /// At the last index: wrap back to 1 (true) or stop writing (false)
    rotate: bool,
    /// 1-based index of the open file
    file_index: u32,
    current_bytes: u64,
    file: Option<BufWriter<File>>,
    /// False only while the most recent open attempt failed
    healthy: bool,
}

impl WriterInner {
    fn current_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}-{}.log", self.tag, self.file_index))
    }

    /// Close any open handle and open (truncating) the file at the current
    /// index. Sets the health flag from the outcome.
    fn open_current(&mut self) -> Result<()> {
        if let Some(mut writer) = self.file.take() {
            let _ = writer.flush();
        }

        let path = self.current_path();
        match File::create(&path) {
            Ok(file) => {
                self.file = Some(BufWriter::new(file));
                self.healthy = true;
                Ok(())
            }
            Err(e) => {
                self.healthy = false;
                Err(LoggerError::file_open(
                    path.display().to_string(),
                    e.to_string(),
                ))
            }
        }
    }

    /// Whether appending `len` more bytes requires moving to the next file
    fn needs_rollover(&self, len: u64) -> bool {
        self.bytes_per_file > 0
            && self.max_files > 0
            && self.current_bytes + len > self.bytes_per_file
    }
}

impl RotatingFileWriter {
    /// Create a writer in the closed state.
    ///
    /// Loggers construct and register their writer before (or without ever)
    /// calling [`init`]; writes in that window are silently dropped.
    ///
    /// [`init`]: RotatingFileWriter::init
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(WriterInner {
                directory: PathBuf::new(),
                tag: String::new(),
                bytes_per_file: 0,
                max_files: 0,
                rotate: false,
                file_index: 1,
                current_bytes: 0,
                file: None,
                healthy: true,
            }),
        }
    }

    /// Open the writer: reset counters, set file index to 1, and open the
    /// first file (creating the directory if needed).
    ///
    /// `bytes_per_file == 0` disables size-based rotation (one ever-growing
    /// file); `max_files == 0` disables rotation entirely regardless of
    /// `rotate`. Re-initializing an open writer closes the old handle first.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or first file cannot be created;
    /// the health flag mirrors the outcome either way.
    pub fn init(
        &self,
        directory: impl AsRef<Path>,
        tag: impl Into<String>,
        bytes_per_file: u64,
        max_files: u32,
        rotate: bool,
    ) -> Result<()> {
        let mut inner = self.inner.lock();

        inner.directory = directory.as_ref().to_path_buf();
        inner.tag = tag.into();
        inner.bytes_per_file = bytes_per_file;
        inner.max_files = max_files;
        inner.rotate = rotate;
        inner.file_index = 1;
        inner.current_bytes = 0;

        if let Err(e) = fs::create_dir_all(&inner.directory) {
            inner.healthy = false;
            if let Some(mut writer) = inner.file.take() {
                let _ = writer.flush();
            }
            return Err(LoggerError::io_operation(
                "creating log directory",
                inner.directory.display().to_string(),
                e,
            ));
        }

        inner.open_current()
    }

    /// Append one record's bytes, rotating first if the budget is exhausted.
    ///
    /// No-op when the writer is closed. A single record larger than the
    /// per-file budget is rejected outright, with no partial write and no
    /// counter change. At the last file index with `rotate` disabled, writes
    /// are dropped until a new `init`. Failures are silent: the producing
    /// logger has long since returned.
    pub fn write(&self, bytes: &[u8]) {
        let mut inner = self.inner.lock();

        if inner.file.is_none() {
            return;
        }

        let len = bytes.len() as u64;
        if inner.bytes_per_file > 0 && len > inner.bytes_per_file {
            return;
        }

        if inner.needs_rollover(len) {
            if inner.file_index == inner.max_files {
                if !inner.rotate {
                    return;
                }
                inner.file_index = 1;
            } else {
                inner.file_index += 1;
            }
            inner.current_bytes = 0;

            if inner.open_current().is_err() {
                return;
            }
        }

        if let Some(writer) = inner.file.as_mut() {
            if writer.write_all(bytes).is_ok() {
                inner.current_bytes += len;
            }
        }
    }

    /// Flush buffered bytes to the open file, if any
    pub fn flush(&self) {
        if let Some(writer) = self.inner.lock().file.as_mut() {
            let _ = writer.flush();
        }
    }

    /// Update the filename stem used by future file opens.
    ///
    /// Already-written files keep their names; the next rotation or `init`
    /// picks up the new tag.
    pub fn set_tag(&self, tag: impl Into<String>) {
        self.inner.lock().tag = tag.into();
    }

    /// Close the file handle. Subsequent writes are no-ops until the writer
    /// is re-initialized.
    pub fn terminate(&self) {
        let mut inner = self.inner.lock();
        if let Some(mut writer) = inner.file.take() {
            let _ = writer.flush();
        }
    }

    /// True unless the most recent open attempt failed
    pub fn healthy(&self) -> bool {
        self.inner.lock().healthy
    }

    /// Whether a file handle is currently open
    pub fn is_open(&self) -> bool {
        self.inner.lock().file.is_some()
    }

    /// 1-based index of the file currently being written
    pub fn file_index(&self) -> u32 {
        self.inner.lock().file_index
    }

    /// Bytes written to the current file so far
    pub fn current_bytes(&self) -> u64 {
        self.inner.lock().current_bytes
    }
}

impl Default for RotatingFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RotatingFileWriter {
    fn drop(&mut self) {
        // Best effort flush; the handle is released with the BufWriter
        if let Some(mut writer) = self.inner.lock().file.take() {
            let _ = writer.flush();
        }
    }
}
