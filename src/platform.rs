//! Which operation kind signals "the binary was rebuilt" on each OS.
//!
//! Rebuilds show up differently depending on the notification backend: inotify
//! reports the new contents as writes, while kqueue and FSEvents report the
//! replaced file as a fresh create.

use crate::watcher::event::Op;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Only an in-place rewrite of the binary (unlink and write a new file
    /// under the same name, or truncate and write) triggers a restart. A
    /// binary swapped in by rename or hard link, as `cargo build` does for
    /// `target/debug/<bin>`, produces no write event and is not noticed.
    Linux,
    /// FreeBSD, OpenBSD, NetBSD and DragonFly.
    Bsd,
    /// macOS and iOS.
    Darwin,
    /// Anything else. Treated like the BSDs, with a warning.
    Unknown,
}

/// The classification rule for a [`Platform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Operation on the binary's path that triggers a restart.
    pub trigger: Op,
    /// `false` for best-effort fallbacks; every matching event logs a warning.
    pub tested: bool,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform family.
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Self::Bsd,
            "macos" | "ios" => Self::Darwin,
            _ => Self::Unknown,
        }
    }

    pub fn rule(self) -> Rule {
        match self {
            Self::Linux => Rule {
                trigger: Op::Write,
                tested: true,
            },
            Self::Bsd | Self::Darwin => Rule {
                trigger: Op::Create,
                tested: true,
            },
            Self::Unknown => Rule {
                trigger: Op::Create,
                tested: false,
            },
        }
    }
}
