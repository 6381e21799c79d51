//! Append sinks behind the session log and the channel logs.
//!
//! Every line a sink receives is already formatted; sinks only append and
//! flush. Closing a sink is dropping it.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::timestamp;

/// Characters left as-is in channel log filenames. Everything else,
/// `/` and `#` included, is percent-escaped.
const FILENAME_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b':')
    .remove(b'+')
    .remove(b'=')
    .remove(b',');

/// A growable append target.
pub trait LogSink: Send {
    /// Append one line and flush it.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Opens channel log sinks by channel name.
pub trait SinkOpener: Send {
    /// Where the log for `channel` lives.
    fn path_for(&self, channel: &str) -> PathBuf;

    /// Open `path` for appending, creating it if needed.
    fn open(&self, path: &Path) -> io::Result<Box<dyn LogSink>>;
}

/// Filename for a channel's log: the escaped name plus `.txt`.
pub fn log_filename(channel: &str) -> String {
    format!("{}.txt", utf8_percent_encode(channel, FILENAME_SAFE))
}

/// Append-mode file sink.
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed.
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl LogSink for FileSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{line}")?;
        self.file.flush()
    }
}

/// Sink writing to the process's standard error.
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{line}")?;
        stderr.flush()
    }
}

/// Opens channel logs as files under a base directory.
pub struct FileSinkOpener {
    directory: PathBuf,
}

impl FileSinkOpener {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl SinkOpener for FileSinkOpener {
    fn path_for(&self, channel: &str) -> PathBuf {
        self.directory.join(log_filename(channel))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn LogSink>> {
        Ok(Box::new(FileSink::append(path)?))
    }
}

/// Open the session log: the given file, or standard error.
pub fn open_meta(path: Option<&Path>) -> io::Result<Box<dyn LogSink>> {
    match path {
        Some(path) => Ok(Box::new(FileSink::append(path)?)),
        None => Ok(Box::new(StderrSink)),
    }
}

/// The session-level log: everything that does not belong to a channel.
pub struct SessionLog {
    sink: Box<dyn LogSink>,
}

impl SessionLog {
    pub fn new(sink: Box<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Append a timestamped line.
    pub fn log(&mut self, text: impl AsRef<str>) {
        let line = format!("{}\t{}", timestamp(), text.as_ref());
        if let Err(e) = self.sink.write_line(&line) {
            warn!(error = %e, "Failed to write session log");
        }
    }
}
