// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fault injection
//!
//! Deliberate damage for exercising the recovery paths: overwrite a file
//! with random bytes, or throw the journal away as a crash would.

use jk_core::{JkError, JkResult, KeeperPath};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::keeper::FileKeeper;

impl FileKeeper {
    /// Overwrite a file with random bytes and evict it from the cache, so
    /// the next read sees the damage on disk.
    pub fn simulate_corruption(&mut self, name: impl AsRef<Path>) -> JkResult<KeeperPath> {
        let path = self.resolve(name);
        let meta = fs::metadata(path.as_path()).map_err(|e| JkError::lookup(&path, e))?;
        if meta.is_dir() {
            return Err(JkError::InvalidPath(format!("{} is a directory", path)));
        }

        let mut noise = vec![0u8; self.corruption_len];
        rand::thread_rng().fill_bytes(&mut noise);
        fs::write(path.as_path(), &noise).map_err(|e| JkError::write_failed(path.as_path(), e))?;

        self.cache.remove(&path);
        self.commit()?;

        warn!(path = %path, bytes = noise.len(), "File corrupted");
        Ok(path)
    }

    /// Delete the journal file. The in-memory cache is left alone; the
    /// loss only shows after the next open. Returns whether a journal existed.
    pub fn simulate_crash(&mut self) -> JkResult<bool> {
        let removed = self.journal.remove()?;
        if removed {
            warn!(journal = %self.journal.path().display(), "Simulated crash: journal deleted");
        } else {
            info!("No journal to delete");
        }
        Ok(removed)
    }
}
