// SPDX-License-Identifier: AGPL-3.0-or-later
//! Persistence layer for Journal Keeper
//!
//! - [`ContentCache`]: in-memory map of absolute path to last-known content
//! - [`Journal`]: full snapshot of the cache, rewritten after each mutation
//! - [`BackupStore`]: one last-known-good copy per basename

pub mod backup_store;
pub mod content_cache;
pub mod journal;

pub use backup_store::{BackupEntry, BackupStore};
pub use content_cache::{CacheStats, ContentCache};
pub use journal::Journal;
