// SPDX-License-Identifier: AGPL-3.0-or-later
//! Directory entries and operation outcomes

use serde::{Deserialize, Serialize};

use crate::error::JkError;
use crate::path::KeeperPath;

/// Entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Unknown,
}

impl From<std::fs::FileType> for EntryKind {
    fn from(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Unknown
        }
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInfo {
    pub name: String,
    pub kind: EntryKind,
    pub size: Option<u64>,
}

impl EntryInfo {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Result of a mutation that succeeded on the namespace.
///
/// `backup_error` carries a best-effort backup that did not land; the
/// mutation itself and its journal entry are in place.
#[derive(Debug)]
pub struct Outcome {
    pub path: KeeperPath,
    pub backup_error: Option<JkError>,
}

impl Outcome {
    pub fn done(path: KeeperPath) -> Self {
        Self { path, backup_error: None }
    }

    pub fn with_backup(path: KeeperPath, backup: Result<(), JkError>) -> Self {
        Self { path, backup_error: backup.err() }
    }

    pub fn is_degraded(&self) -> bool {
        self.backup_error.is_some()
    }
}
