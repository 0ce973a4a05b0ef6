use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ReloadError, Result};
use crate::target;
use crate::watcher::event::ChangeEvent;

pub type Callback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// An extra directory registered next to the binary's own directory.
///
/// Watches are not recursive: only changes to direct entries of `dir` match.
#[derive(Clone)]
pub struct Watch {
    dir: PathBuf,
    pub(crate) action: Action,
}

#[derive(Clone)]
pub(crate) enum Action {
    Callback(Callback),
    /// Re-exec the running binary, after the usual debounce.
    Restart,
}

impl Watch {
    /// Run `callback` for every change inside `dir`.
    ///
    /// The callback runs on the dispatch task; a slow callback delays all
    /// later events.
    pub fn new<F>(dir: impl Into<PathBuf>, callback: F) -> Self
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        Self {
            dir: dir.into(),
            action: Action::Callback(Arc::new(callback)),
        }
    }

    /// Restart the running binary whenever anything inside `dir` changes.
    pub fn restart(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            action: Action::Restart,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn matches(&self, event: &ChangeEvent) -> bool {
        event.path.parent() == Some(self.dir.as_path())
    }

    /// Make `dir` absolute, with symlinks resolved, so it compares equal to
    /// the paths the watcher reports.
    pub(crate) fn resolved(mut self) -> Result<Self> {
        let dir = std::path::absolute(&self.dir).map_err(|source| ReloadError::Resolve {
            path: self.dir.clone(),
            source,
        })?;
        self.dir = target::real_dir(&dir).unwrap_or(dir);
        Ok(self)
    }
}

impl fmt::Debug for Watch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            Action::Callback(_) => "callback",
            Action::Restart => "restart",
        };
        f.debug_struct("Watch")
            .field("dir", &self.dir)
            .field("action", &action)
            .finish()
    }
}
