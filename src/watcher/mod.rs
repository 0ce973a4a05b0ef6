pub mod dispatch;
pub mod event;

use std::path::Path;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::error::{ReloadError, Result};
use event::ChangeEvent;

/// Owns the OS watcher. Dropping it stops watching and closes both [`Streams`].
pub struct EventSource {
    watcher: RecommendedWatcher,
}

/// The two output streams of an [`EventSource`].
///
/// notify delivers events and errors through one callback; they are split here
/// so the dispatch loop can wait on both independently.
pub struct Streams {
    pub events: UnboundedReceiver<ChangeEvent>,
    pub errors: UnboundedReceiver<notify::Error>,
}

impl EventSource {
    pub fn new() -> Result<(Self, Streams)> {
        let (events_tx, events) = mpsc::unbounded_channel();
        let (errors_tx, errors) = mpsc::unbounded_channel();

        let watcher = notify::recommended_watcher(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    for change in ChangeEvent::from_notify(event) {
                        // Receiver gone means the loop has stopped.
                        let _ = events_tx.send(change);
                    }
                }
                Err(err) => {
                    let _ = errors_tx.send(err);
                }
            },
        )
        .map_err(ReloadError::Watcher)?;

        Ok((Self { watcher }, Streams { events, errors }))
    }

    /// Watch `dir` (non-recursively) for changes to its entries.
    pub fn add(&mut self, dir: &Path) -> Result<()> {
        self.watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| ReloadError::Register {
                dir: dir.to_path_buf(),
                source,
            })?;
        tracing::debug!(dir = %dir.display(), "watching directory");
        Ok(())
    }
}
