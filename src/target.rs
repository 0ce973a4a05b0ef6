//! Locating the running binary and the directory to watch for it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{ReloadError, Result};

/// Absolute path of the running binary, taken from argv[0].
pub fn current() -> Result<PathBuf> {
    from_arg0(std::env::args_os().next().as_deref())
}

/// Resolve an argv[0] value to an absolute path.
///
/// A bare program name was looked up through `PATH`, so the cwd says nothing
/// about where it lives; ask the OS for the executable instead.
pub fn from_arg0(arg0: Option<&OsStr>) -> Result<PathBuf> {
    let arg0 = arg0
        .filter(|a| !a.is_empty())
        .ok_or(ReloadError::MissingArg0)?;
    let path = Path::new(arg0);

    if path.parent().is_some_and(|p| p.as_os_str().is_empty()) {
        return std::env::current_exe().map_err(|source| ReloadError::Resolve {
            path: path.to_path_buf(),
            source,
        });
    }
    absolute(path)
}

/// Make `path` absolute against the cwd without touching the filesystem.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| ReloadError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

/// The directory whose entries are watched for `target`.
///
/// Rebuilds usually rename a new file over the old one, which a watch on the
/// file itself would lose track of.
pub fn watch_dir(target: &Path) -> Result<PathBuf> {
    target
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| ReloadError::NoParent {
            path: target.to_path_buf(),
        })
}

/// The target and its watch directory, with symlinks in the directory resolved.
///
/// Backends such as FSEvents report real paths (`/private/tmp/..` for a watch
/// on `/tmp`), so comparisons must use the resolved form. The file name itself
/// is kept: the binary at that name is what gets replaced. A directory that
/// cannot be resolved is returned as-is and fails at registration instead.
pub fn resolve(target: &Path) -> Result<(PathBuf, PathBuf)> {
    let dir = watch_dir(target)?;
    let name = target.file_name().ok_or_else(|| ReloadError::NoParent {
        path: target.to_path_buf(),
    })?;
    Ok(match real_dir(&dir) {
        Some(real) => (real.join(name), real),
        None => (target.to_path_buf(), dir),
    })
}

/// `dir` with symlinks resolved, or `None` if it does not exist.
pub(crate) fn real_dir(dir: &Path) -> Option<PathBuf> {
    match dir.canonicalize() {
        Ok(real) => Some(real),
        Err(err) => {
            tracing::debug!(dir = %dir.display(), "cannot canonicalize: {err}");
            None
        }
    }
}
