//! In-memory sinks for unit tests.

use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::sink::{LogSink, SinkOpener, log_filename};

type Lines = Arc<Mutex<Vec<String>>>;

fn untimestamped(lines: &Lines) -> Vec<String> {
    lines
        .lock()
        .unwrap()
        .iter()
        .map(|l| l.split_once('\t').map_or(l.as_str(), |(_, text)| text).to_string())
        .collect()
}

/// A sink whose lines stay readable through its clones.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Lines,
}

impl MemorySink {
    /// Lines written so far, timestamps removed.
    pub fn lines(&self) -> Vec<String> {
        untimestamped(&self.lines)
    }

    /// Lines written so far, as written.
    pub fn raw(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// Opens [`MemorySink`]s keyed by log filename. Channels marked failing
/// refuse to open.
#[derive(Clone, Default)]
pub struct MemoryOpener {
    files: Arc<Mutex<BTreeMap<PathBuf, Lines>>>,
    failing: HashSet<PathBuf>,
}

impl MemoryOpener {
    pub fn failing(mut self, channel: &str) -> Self {
        self.failing.insert(self.path_for(channel));
        self
    }

    /// Everything written to `channel`'s log across opens, timestamps
    /// removed.
    pub fn lines(&self, channel: &str) -> Vec<String> {
        let files = self.files.lock().unwrap();
        files
            .get(&self.path_for(channel))
            .map(untimestamped)
            .unwrap_or_default()
    }
}

impl SinkOpener for MemoryOpener {
    fn path_for(&self, channel: &str) -> PathBuf {
        PathBuf::from(log_filename(channel))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn LogSink>> {
        if self.failing.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }
        let lines = self
            .files
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_default()
            .clone();
        Ok(Box::new(MemorySink { lines }))
    }
}
