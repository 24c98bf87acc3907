// SPDX-License-Identifier: AGPL-3.0-or-later
//! Namespace cursor
//!
//! Tracks the keeper's current directory. It is a plain field rather than
//! the process working directory, so several keepers can coexist.

use jk_core::{JkError, JkResult, KeeperPath};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Navigator {
    cwd: KeeperPath,
}

impl Navigator {
    pub fn new(root: KeeperPath) -> Self {
        Self { cwd: root }
    }

    pub fn current(&self) -> &KeeperPath {
        &self.cwd
    }

    /// Resolve a name against the current directory
    pub fn resolve(&self, name: impl AsRef<Path>) -> KeeperPath {
        self.cwd.resolve(name)
    }

    /// Move the cursor. The target must exist and be a directory.
    pub fn change_directory(&mut self, path: impl AsRef<Path>) -> JkResult<&KeeperPath> {
        let target = self.resolve(path);
        let meta = fs::metadata(target.as_path()).map_err(|e| JkError::lookup(&target, e))?;
        if !meta.is_dir() {
            return Err(JkError::NotADirectory(target.to_string()));
        }

        info!(from = %self.cwd, to = %target, "Changed directory");
        self.cwd = target;
        Ok(&self.cwd)
    }
}
