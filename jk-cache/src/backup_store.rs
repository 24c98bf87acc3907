// SPDX-License-Identifier: AGPL-3.0-or-later
//! Backup store
//!
//! A flat directory holding one copy per basename. A newer backup of the
//! same name replaces the older one; restoring reads a backup without
//! consuming it.

use chrono::{DateTime, Utc};
use jk_core::{JkError, JkResult};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Backup directory listing entry
#[derive(Debug, Clone)]
pub struct BackupEntry {
    pub name: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    /// BLAKE3 of the backed-up bytes, hex encoded
    pub checksum: String,
}

/// Basename-addressed backup directory
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the backup directory if missing
    pub fn ensure_dir(&self) -> JkResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| JkError::write_failed(&self.dir, e))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the backup for `name`. Only a bare file name is
    /// accepted so lookups cannot leave the backup directory.
    pub fn backup_path(&self, name: &str) -> JkResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.dir.join(name)),
            _ => Err(JkError::InvalidPath(name.to_string())),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.backup_path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Copy the current content of `source` into the store under its basename.
    pub fn backup(&self, source: &Path) -> JkResult<PathBuf> {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| JkError::InvalidPath(source.display().to_string()))?;
        let target = self.backup_path(name)?;
        if same_file(source, &target) {
            // copying a file onto itself truncates it
            debug!(name, "Source is its own backup");
            return Ok(target);
        }

        let copy = || -> io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            fs::copy(source, &target)?;
            Ok(())
        };
        copy().map_err(|source| JkError::BackupWriteFailed { name: name.to_string(), source })?;

        debug!(name, backup = %target.display(), "Backup written");
        Ok(target)
    }

    /// Copy the backup for `name` to `destination` and return its content.
    pub fn restore(&self, name: &str, destination: &Path) -> JkResult<String> {
        let source = self.backup_path(name)?;
        if !source.is_file() {
            return Err(JkError::BackupNotFound(name.to_string()));
        }

        let data = fs::read(&source)?;
        let content = String::from_utf8(data)
            .map_err(|_| JkError::NotText(source.display().to_string()))?;

        fs::write(destination, content.as_bytes())
            .map_err(|e| JkError::write_failed(destination, e))?;

        debug!(name, destination = %destination.display(), "Backup restored");
        Ok(content)
    }

    /// BLAKE3 checksum of the stored backup
    pub fn checksum(&self, name: &str) -> JkResult<String> {
        let path = self.backup_path(name)?;
        if !path.is_file() {
            return Err(JkError::BackupNotFound(name.to_string()));
        }
        Ok(hash_content(&fs::read(path)?))
    }

    /// All backups, sorted by name. A missing directory lists as empty.
    pub fn list(&self) -> JkResult<Vec<BackupEntry>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            let data = fs::read(entry.path())?;
            entries.push(BackupEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: meta.len(),
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
                checksum: hash_content(&data),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Hash content using BLAKE3
pub fn hash_content(data: &[u8]) -> String {
    hex::encode(blake3::hash(data).as_bytes())
}

/// Whether both paths name the same existing file
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
