use std::path::PathBuf;

use notify::event::{EventKind, ModifyKind, RenameMode};

/// Operation kind of a filesystem change, collapsed from notify's detailed kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// A new entry appeared, including the destination side of a rename.
    Create,
    /// File contents changed.
    Write,
    Remove,
    /// The source side of a rename, or a rename the backend could not pair up.
    Rename,
    /// Permissions or other metadata changed.
    Chmod,
    /// Accesses, close notifications and anything unclassified.
    Other,
}

impl From<&EventKind> for Op {
    fn from(kind: &EventKind) -> Self {
        match kind {
            EventKind::Create(_) => Op::Create,
            EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any) => Op::Write,
            // Renaming into place looks like the file being created under its new name.
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Op::Create,
            EventKind::Modify(ModifyKind::Name(_)) => Op::Rename,
            EventKind::Modify(ModifyKind::Metadata(_)) => Op::Chmod,
            EventKind::Remove(_) => Op::Remove,
            EventKind::Modify(ModifyKind::Other)
            | EventKind::Access(_)
            | EventKind::Any
            | EventKind::Other => Op::Other,
        }
    }
}

/// A single change notification: one path and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub op: Op,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, op: Op) -> Self {
        Self {
            path: path.into(),
            op,
        }
    }

    /// Split a notify event into one `ChangeEvent` per path it carries.
    pub fn from_notify(event: notify::Event) -> impl Iterator<Item = ChangeEvent> {
        let op = Op::from(&event.kind);
        event
            .paths
            .into_iter()
            .map(move |path| ChangeEvent { path, op })
    }
}
