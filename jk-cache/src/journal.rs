// SPDX-License-Identifier: AGPL-3.0-or-later
//! Recovery journal
//!
//! A single JSON snapshot of the whole content cache. It is read once when
//! the keeper opens and rewritten in full after every cache mutation, so
//! after a restart the last snapshot becomes the initial cache.

use jk_core::{JkError, JkResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::content_cache::ContentCache;

const JOURNAL_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    entries: &'a BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    entries: BTreeMap<String, String>,
}

/// Handle on the journal file
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Strict read. `Ok(None)` when there is no journal,
    /// `JournalCorrupt` when it cannot be decoded.
    pub fn read(&self) -> JkResult<Option<ContentCache>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&data)
            .map(Some)
            .map_err(|message| JkError::JournalCorrupt { path: self.path.clone(), message })
    }

    /// Startup load. Never fails: an absent journal is a cold start and an
    /// unreadable or corrupt one is logged and replaced by an empty cache.
    pub fn load(&self) -> ContentCache {
        match self.read() {
            Ok(Some(cache)) => {
                info!(path = %self.path.display(), entries = cache.len(), "Recovered from journal");
                cache
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "No journal, starting with empty cache");
                ContentCache::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unusable journal");
                ContentCache::new()
            }
        }
    }

    /// Rewrite the journal with the full cache contents.
    ///
    /// Written to a temp file first and renamed over the journal, so a
    /// failed write leaves the previous snapshot intact.
    pub fn persist(&self, cache: &ContentCache) -> JkResult<()> {
        self.write_snapshot(cache).map_err(|source| JkError::JournalPersist {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), entries = cache.len(), "Journal persisted");
        Ok(())
    }

    /// Sibling written before the rename: `<journal file name>.jk-tmp`
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".jk-tmp");
        self.path.with_file_name(name)
    }

    fn write_snapshot(&self, cache: &ContentCache) -> io::Result<()> {
        let data = encode(cache).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, &data)?;
        fs::rename(&temp_path, &self.path)
    }

    /// Delete the journal file. Returns whether there was one to delete.
    pub fn remove(&self) -> JkResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Serialize a cache snapshot
pub fn encode(cache: &ContentCache) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(&SnapshotRef {
        version: JOURNAL_VERSION,
        entries: cache.entries(),
    })
}

/// Deserialize a cache snapshot
pub fn decode(data: &[u8]) -> Result<ContentCache, String> {
    let snapshot: Snapshot = serde_json::from_slice(data).map_err(|e| e.to_string())?;
    if snapshot.version != JOURNAL_VERSION {
        return Err(format!("unsupported journal version {}", snapshot.version));
    }
    Ok(ContentCache::from_entries(snapshot.entries))
}
