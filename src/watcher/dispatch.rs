use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, trace};

use super::Streams;
use super::event::ChangeEvent;
use crate::log::Logger;
use crate::platform::Rule;
use crate::replace::Replace;
use crate::watch::{Action, Watch};

/// Turns change events into restarts and callbacks.
pub(crate) struct Dispatcher {
    /// Absolute path of the running binary.
    pub(crate) target: PathBuf,
    pub(crate) rule: Rule,
    pub(crate) watches: Vec<Watch>,
    pub(crate) debounce: Duration,
    pub(crate) logger: Arc<dyn Logger>,
    pub(crate) replacer: Arc<dyn Replace>,
}

impl Dispatcher {
    /// Process events and errors until `shutdown` fires (or its sender is
    /// dropped) or the event stream closes.
    ///
    /// Items from each stream are handled one at a time, in delivery order;
    /// pending errors are logged before the next event is looked at. Errors
    /// never end the loop.
    pub(crate) async fn run(self, mut streams: Streams, mut shutdown: oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    debug!("dispatch loop stopped");
                    return;
                }
                Some(err) = streams.errors.recv() => {
                    self.logger.log(format_args!("reload error: {err}"));
                }
                event = streams.events.recv() => match event {
                    Some(event) => self.dispatch(event).await,
                    None => {
                        debug!("event source closed");
                        return;
                    }
                },
            }
        }
    }

    async fn dispatch(&self, event: ChangeEvent) {
        for watch in self.watches.iter().filter(|w| w.matches(&event)) {
            match &watch.action {
                Action::Callback(callback) => callback(&event),
                Action::Restart => self.restart(&event).await,
            }
        }

        if self.classify(&event) {
            self.restart(&event).await;
        } else {
            trace!(path = %event.path.display(), op = ?event.op, "ignoring event");
        }
    }

    /// Whether `event` means the binary has just been rebuilt.
    pub(crate) fn classify(&self, event: &ChangeEvent) -> bool {
        if !self.rule.tested {
            self.logger
                .log(format_args!("reload: untested OS; this may not work"));
        }
        event.op == self.rule.trigger && event.path == self.target
    }

    /// Give the writer a moment to finish, then replace the process.
    ///
    /// The file is not re-checked after the sleep; a build that takes longer
    /// than the debounce to finish writing can still be caught half-written.
    async fn restart(&self, event: &ChangeEvent) {
        debug!(
            path = %event.path.display(),
            op = ?event.op,
            delay = ?self.debounce,
            "restart triggered"
        );
        tokio::time::sleep(self.debounce).await;
        self.replacer.replace(&self.target);
    }
}
