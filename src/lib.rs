//! Restart the running process whenever its own binary changes on disk.
//!
//! Call [`run`] (or build a [`Reloader`]) early in `main`. After a rebuild
//! replaces the binary, the process is replaced in place with a fresh
//! invocation of the new binary: same PID, same environment, but none of the
//! original command-line arguments.
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> Result<(), reload::ReloadError> {
//!     // Start the real work in background tasks, then:
//!     match reload::run(reload::StderrLogger, []).await? {}
//! }
//! ```
//!
//! A rebuild is detected by watching the binary's directory and waiting
//! [`DEFAULT_DEBOUNCE`] after the triggering event. Whether the new file is
//! complete after that delay is not verified.

pub mod error;
pub mod log;
pub mod platform;
pub mod replace;
pub mod target;
pub mod watch;
pub mod watcher;

#[cfg(test)]
mod test_support;

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub use error::{ReloadError, Result};
pub use log::{Logger, StderrLogger, TracingLogger};
pub use platform::Platform;
pub use replace::{Exec, Replace, exec};
pub use watch::Watch;
pub use watcher::event::{ChangeEvent, Op};

use watcher::EventSource;
use watcher::dispatch::Dispatcher;

/// Time between noticing a rebuilt binary and exec'ing it.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Watch the running binary (and any extra `watches`) and restart on change.
///
/// Only returns on startup failure.
pub async fn run(
    logger: impl Logger,
    watches: impl IntoIterator<Item = Watch>,
) -> Result<Infallible> {
    Reloader::new(logger).watches(watches).run().await
}

/// Builder for a reload watch.
pub struct Reloader {
    logger: Arc<dyn Logger>,
    watches: Vec<Watch>,
    debounce: Duration,
    target: Option<PathBuf>,
    platform: Platform,
    replacer: Option<Arc<dyn Replace>>,
}

impl Reloader {
    pub fn new(logger: impl Logger) -> Self {
        Self {
            logger: Arc::new(logger),
            watches: Vec::new(),
            debounce: DEFAULT_DEBOUNCE,
            target: None,
            platform: Platform::current(),
            replacer: None,
        }
    }

    pub fn watch(mut self, watch: Watch) -> Self {
        self.watches.push(watch);
        self
    }

    pub fn watches(mut self, watches: impl IntoIterator<Item = Watch>) -> Self {
        self.watches.extend(watches);
        self
    }

    /// Override [`DEFAULT_DEBOUNCE`].
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Watch `path` instead of the binary named by argv[0].
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Some(path.into());
        self
    }

    /// Classify events as if running on `platform`.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Use `replacer` instead of [`Exec`].
    pub fn replacer(mut self, replacer: impl Replace) -> Self {
        self.replacer = Some(Arc::new(replacer));
        self
    }

    /// Start watching and block forever. Only returns on startup failure.
    pub async fn run(self) -> Result<Infallible> {
        let _handle = self.spawn()?;
        Ok(std::future::pending::<Infallible>().await)
    }

    /// Start watching in a background task.
    ///
    /// Must be called from within a tokio runtime. Watching stops when the
    /// returned handle is dropped or [`ReloadHandle::stop`]ped.
    pub fn spawn(self) -> Result<ReloadHandle> {
        let Reloader {
            logger,
            watches,
            debounce,
            target,
            platform,
            replacer,
        } = self;

        let (source, streams) = EventSource::new()?;
        let target = match target {
            Some(path) => target::absolute(&path)?,
            None => target::current()?,
        };
        let (target, dir) = target::resolve(&target)?;
        let watches = watches
            .into_iter()
            .map(Watch::resolved)
            .collect::<Result<Vec<_>>>()?;
        let extra_dirs: Vec<PathBuf> = watches.iter().map(|w| w.dir().to_path_buf()).collect();

        let dispatcher = Dispatcher {
            target: target.clone(),
            rule: platform.rule(),
            watches,
            debounce,
            logger: Arc::clone(&logger),
            replacer: replacer
                .unwrap_or_else(|| Arc::new(Exec::new(Arc::clone(&logger))) as Arc<dyn Replace>),
        };
        let (stop, shutdown) = oneshot::channel();
        let task = tokio::spawn(dispatcher.run(streams, shutdown));

        // From here on, an early return drops the handle, which releases the
        // watcher and ends the task.
        let mut handle = ReloadHandle {
            target,
            stop: Some(stop),
            task,
            source,
        };
        handle.source.add(&dir)?;
        for dir in &extra_dirs {
            handle.source.add(dir)?;
        }

        logger.log(format_args!("restarting {:?} when it changes", handle.target));
        Ok(handle)
    }
}

/// A running watch started by [`Reloader::spawn`].
pub struct ReloadHandle {
    target: PathBuf,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
    source: EventSource,
}

impl ReloadHandle {
    /// The binary being watched.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Stop the dispatch loop and release the watcher.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(err) = self.task.await {
            tracing::warn!("dispatch task ended abnormally: {err}");
        }
    }
}
