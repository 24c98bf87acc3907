// SPDX-License-Identifier: AGPL-3.0-or-later
//! In-memory content cache
//!
//! Maps the normalized absolute path of a file to the content last read or
//! written through the keeper. Entries are never refreshed from disk on
//! their own; a file changed behind the keeper's back stays stale here.

use jk_core::KeeperPath;
use std::collections::BTreeMap;
use std::path::Path;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: u64,
    pub total_size: u64,
    pub hit_count: u64,
    pub miss_count: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 { 0.0 } else { self.hit_count as f64 / total as f64 }
    }
}

/// Path to content map
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    entries: BTreeMap<String, String>,
    hits: u64,
    misses: u64,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a journal snapshot
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries, hits: 0, misses: 0 }
    }

    /// Look up content, counting the hit or miss
    pub fn get(&mut self, path: &KeeperPath) -> Option<&str> {
        match self.entries.get(&path.to_key()) {
            Some(content) => {
                self.hits += 1;
                Some(content.as_str())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up content without touching the statistics
    pub fn peek(&self, path: &KeeperPath) -> Option<&str> {
        self.entries.get(&path.to_key()).map(String::as_str)
    }

    pub fn contains(&self, path: &KeeperPath) -> bool {
        self.entries.contains_key(&path.to_key())
    }

    pub fn put(&mut self, path: &KeeperPath, content: impl Into<String>) {
        self.entries.insert(path.to_key(), content.into());
    }

    pub fn remove(&mut self, path: &KeeperPath) -> Option<String> {
        self.entries.remove(&path.to_key())
    }

    /// Move an entry to a new key, keeping its content.
    /// Returns false when `old` was not cached.
    pub fn rename(&mut self, old: &KeeperPath, new: &KeeperPath) -> bool {
        match self.entries.remove(&old.to_key()) {
            Some(content) => {
                self.entries.insert(new.to_key(), content);
                true
            }
            None => false,
        }
    }

    /// Re-key every entry at or below `old_dir` to sit under `new_dir`.
    /// Returns how many entries moved.
    pub fn rename_prefix(&mut self, old_dir: &KeeperPath, new_dir: &KeeperPath) -> usize {
        let moved: Vec<(String, String)> = self
            .entries
            .iter()
            .filter_map(|(key, _)| {
                let rest = Path::new(key).strip_prefix(old_dir.as_path()).ok()?;
                Some((key.clone(), new_dir.resolve(rest).to_key()))
            })
            .collect();

        for (old_key, new_key) in &moved {
            if let Some(content) = self.entries.remove(old_key) {
                self.entries.insert(new_key.clone(), content);
            }
        }
        moved.len()
    }

    /// Drop every entry at or below `dir`. Returns how many were removed.
    pub fn remove_prefix(&mut self, dir: &KeeperPath) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| !Path::new(key).starts_with(dir.as_path()));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len() as u64,
            total_size: self.entries.values().map(|v| v.len() as u64).sum(),
            hit_count: self.hits,
            miss_count: self.misses,
        }
    }
}
