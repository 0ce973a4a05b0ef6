use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReloadError>;

/// Errors that prevent the reloader from starting.
///
/// Anything that goes wrong after the watch is in place is reported through
/// the [`Logger`](crate::Logger) instead.
#[derive(Error, Debug)]
pub enum ReloadError {
    #[error("cannot setup watcher: {0}")]
    Watcher(#[source] notify::Error),

    #[error("cannot determine the running binary: argv[0] is empty")]
    MissingArg0,

    #[error("cannot get absolute path of {path:?}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} has no parent directory to watch")]
    NoParent { path: PathBuf },

    #[error("cannot add {dir:?} to watcher: {source}")]
    Register {
        dir: PathBuf,
        #[source]
        source: notify::Error,
    },
}
