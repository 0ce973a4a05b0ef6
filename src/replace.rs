use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use crate::log::Logger;

/// Replaces the running process with a new invocation of a binary.
pub trait Replace: Send + Sync + 'static {
    /// Production implementations never return: either the new image takes
    /// over, or the process is terminated.
    fn replace(&self, bin: &Path);
}

/// [`Replace`] backed by [`exec`]. Aborts the process if the exec fails.
pub struct Exec {
    logger: Arc<dyn Logger>,
}

impl Exec {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Replace for Exec {
    fn replace(&self, bin: &Path) {
        tracing::debug!(bin = %bin.display(), "replacing process image");
        let err = exec(bin);
        // The old image may already be half torn down; there is nothing sane to return to.
        self.logger
            .log(format_args!("cannot restart {}: {err}", bin.display()));
        std::process::abort();
    }
}

/// The invocation used for a restart: `bin` as the only argument, inheriting
/// the full environment. Original command-line arguments are not kept.
pub(crate) fn command(bin: &Path) -> Command {
    Command::new(bin)
}

/// Replace the current process with `bin`. Only returns if that failed.
#[cfg(unix)]
pub fn exec(bin: &Path) -> io::Error {
    use std::os::unix::process::CommandExt;

    command(bin).exec()
}

/// Without `execve` the new image gets a fresh process: spawn it with the
/// inherited stdio and environment, then exit. Only returns if the spawn failed.
#[cfg(not(unix))]
pub fn exec(bin: &Path) -> io::Error {
    match command(bin).spawn() {
        Ok(_) => std::process::exit(0),
        Err(err) => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_passes_only_the_binary_path() {
        let cmd = command(Path::new("/opt/app/server"));

        assert_eq!(cmd.get_program(), "/opt/app/server");
        assert_eq!(cmd.get_args().count(), 0);
        // No overrides: the child sees the full current environment.
        assert_eq!(cmd.get_envs().count(), 0);
        assert_eq!(cmd.get_current_dir(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_missing_binary_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = exec(&tmp.path().join("no-such-binary"));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
