// SPDX-License-Identifier: AGPL-3.0-or-later
//! Keeper configuration
//!
//! Where the journal and the backup directory live. Both default to the
//! historical locations under the working root and may be overridden
//! from a TOML file:
//!
//! ```toml
//! root = "/srv/files"
//! journal_path = "state/journal.json"
//! backup_dir = "/var/backups/jk"
//! corruption_len = 256
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{JkError, JkResult};
use crate::path::KeeperPath;

/// Journal file name used when none is configured
pub const DEFAULT_JOURNAL_FILE: &str = "filesystem_journal.log";

/// Backup directory name used when none is configured
pub const DEFAULT_BACKUP_DIR: &str = "backup";

/// Bytes written by simulated corruption
pub const DEFAULT_CORRUPTION_LEN: usize = 100;

/// Keeper configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    /// Working root; the initial namespace cursor
    pub root: PathBuf,
    /// Journal file, relative to `root` unless absolute
    pub journal_path: PathBuf,
    /// Backup directory, relative to `root` unless absolute
    pub backup_dir: PathBuf,
    /// Length of the random block written by simulated corruption
    pub corruption_len: usize,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_root(root)
    }
}

impl KeeperConfig {
    /// Defaults anchored at the given root
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            journal_path: PathBuf::from(DEFAULT_JOURNAL_FILE),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
            corruption_len: DEFAULT_CORRUPTION_LEN,
        }
    }

    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> JkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| JkError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> JkResult<Self> {
        toml::from_str(text).map_err(|e| JkError::Config(e.to_string()))
    }

    /// Absolute working root. A relative root is taken from the process
    /// current directory.
    pub fn root_path(&self) -> JkResult<KeeperPath> {
        if self.root.is_absolute() {
            KeeperPath::new(&self.root)
        } else {
            let cwd = std::env::current_dir()?;
            KeeperPath::new(cwd.join(&self.root))
        }
    }

    pub fn journal_file(&self) -> JkResult<PathBuf> {
        Ok(self.root_path()?.resolve(&self.journal_path).into())
    }

    pub fn backup_path(&self) -> JkResult<PathBuf> {
        Ok(self.root_path()?.resolve(&self.backup_dir).into())
    }
}
