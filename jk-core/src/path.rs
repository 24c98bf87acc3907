// SPDX-License-Identifier: AGPL-3.0-or-later
//! Normalized absolute paths
//!
//! Every path the keeper stores (cache keys, the namespace cursor) is an
//! absolute path with `.` and `..` folded away lexically, so that two
//! spellings of the same location map to the same cache entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::error::{JkError, JkResult};

/// Absolute, lexically normalized path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeeperPath(PathBuf);

impl KeeperPath {
    /// Wrap an absolute path, normalizing it. Relative paths are rejected.
    pub fn new(path: impl AsRef<Path>) -> JkResult<Self> {
        let path = path.as_ref();
        if !path.is_absolute() {
            return Err(JkError::InvalidPath(path.display().to_string()));
        }
        Ok(Self(normalize(path)))
    }

    /// Resolve `name` against this path. An absolute `name` replaces it.
    pub fn resolve(&self, name: impl AsRef<Path>) -> Self {
        Self(normalize(&self.0.join(name)))
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| Self(p.to_path_buf()))
    }

    /// Final component, if it is valid UTF-8
    pub fn name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }

    /// Final component, or `InvalidPath` for the root
    pub fn basename(&self) -> JkResult<&str> {
        self.name()
            .ok_or_else(|| JkError::InvalidPath(self.0.display().to_string()))
    }

    pub fn is_root(&self) -> bool {
        self.0.parent().is_none()
    }

    /// Component-wise prefix test; `/a/bc` is not under `/a/b`.
    pub fn starts_with(&self, base: &KeeperPath) -> bool {
        self.0.starts_with(&base.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// String form used as the cache and journal key
    pub fn to_key(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl AsRef<Path> for KeeperPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<KeeperPath> for PathBuf {
    fn from(path: KeeperPath) -> Self {
        path.0
    }
}

impl fmt::Display for KeeperPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Fold `.` and `..` without touching the filesystem.
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
