//! Recording doubles for the logger and process replacer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::log::Logger;
use crate::replace::Replace;

#[derive(Clone, Default)]
pub(crate) struct RecordingLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn count_containing(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push(args.to_string());
    }
}

/// Records each replacement with the (tokio) time it happened, then returns.
pub(crate) struct RecordingReplacer {
    tx: mpsc::UnboundedSender<(PathBuf, Instant)>,
}

impl RecordingReplacer {
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<(PathBuf, Instant)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Replace for RecordingReplacer {
    fn replace(&self, bin: &Path) {
        let _ = self.tx.send((bin.to_path_buf(), Instant::now()));
    }
}
