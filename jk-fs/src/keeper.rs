// SPDX-License-Identifier: AGPL-3.0-or-later
//! File operation facade

use jk_cache::{BackupStore, ContentCache, Journal};
use jk_core::{EntryInfo, JkError, JkResult, KeeperConfig, KeeperPath, Outcome};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::navigator::Navigator;

/// Journaled file keeper.
///
/// Owns the cache, the journal handle and the namespace cursor. All
/// methods take `&mut self`; there is exactly one writer.
pub struct FileKeeper {
    pub(crate) navigator: Navigator,
    pub(crate) cache: ContentCache,
    pub(crate) journal: Journal,
    pub(crate) backups: BackupStore,
    pub(crate) corruption_len: usize,
}

impl FileKeeper {
    /// Open a keeper: create the backup directory and load the journal.
    pub fn open(config: &KeeperConfig) -> JkResult<Self> {
        let root = config.root_path()?;
        let journal = Journal::new(config.journal_file()?);
        let backups = BackupStore::new(config.backup_path()?);
        backups.ensure_dir()?;

        let cache = journal.load();
        info!(root = %root, journal = %journal.path().display(), cached = cache.len(), "Keeper opened");

        Ok(Self {
            navigator: Navigator::new(root),
            cache,
            journal,
            backups,
            corruption_len: config.corruption_len,
        })
    }

    pub fn current_dir(&self) -> &KeeperPath {
        self.navigator.current()
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Paths that currently have cached content, in key order
    pub fn cached_paths(&self) -> Vec<KeeperPath> {
        self.cache.keys().filter_map(|k| KeeperPath::new(k).ok()).collect()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    /// Resolve a name against the current directory
    pub fn resolve(&self, name: impl AsRef<Path>) -> KeeperPath {
        self.navigator.resolve(name)
    }

    /// Write the cache snapshot. Called after every cache mutation, once
    /// the namespace change it reflects has succeeded.
    pub(crate) fn commit(&self) -> JkResult<()> {
        self.journal.persist(&self.cache)
    }

    /// Best-effort backup; failures are logged and handed back in the outcome.
    fn backup(&self, path: &KeeperPath) -> JkResult<()> {
        match self.backups.backup(path.as_path()) {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(path = %path, error = %e, "Backup failed");
                Err(e)
            }
        }
    }

    /// Create or overwrite a file, creating missing parent directories.
    pub fn create(&mut self, name: impl AsRef<Path>, content: &str) -> JkResult<Outcome> {
        let path = self.resolve(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent.as_path())
                .map_err(|e| JkError::write_failed(parent.as_path(), e))?;
        }
        fs::write(path.as_path(), content).map_err(|e| JkError::write_failed(path.as_path(), e))?;

        self.cache.put(&path, content);
        self.commit()?;
        let backup = self.backup(&path);

        info!(path = %path, bytes = content.len(), "File created");
        Ok(Outcome::with_backup(path, backup))
    }

    /// Read a file, from the cache when possible. Content read from disk
    /// is cached; content that is not UTF-8 is reported and not cached.
    pub fn read(&mut self, name: impl AsRef<Path>) -> JkResult<String> {
        let path = self.resolve(name);
        if let Some(content) = self.cache.get(&path) {
            debug!(path = %path, "Cache hit");
            return Ok(content.to_owned());
        }

        debug!(path = %path, "Cache miss");
        let data = fs::read(path.as_path()).map_err(|e| JkError::lookup(&path, e))?;
        let content = String::from_utf8(data).map_err(|_| JkError::NotText(path.to_string()))?;

        self.cache.put(&path, content.clone());
        self.commit()?;
        Ok(content)
    }

    /// Delete a file
    pub fn delete(&mut self, name: impl AsRef<Path>) -> JkResult<KeeperPath> {
        let path = self.resolve(name);
        if !exists(&path) {
            return Err(JkError::NotFound(path.to_string()));
        }
        fs::remove_file(path.as_path()).map_err(|e| JkError::write_failed(path.as_path(), e))?;

        self.cache.remove(&path);
        self.commit()?;

        info!(path = %path, "File deleted");
        Ok(path)
    }

    /// Create a directory and its parents. Succeeds if it already exists.
    pub fn create_directory(&mut self, name: impl AsRef<Path>) -> JkResult<KeeperPath> {
        let path = self.resolve(name);
        fs::create_dir_all(path.as_path()).map_err(|e| JkError::write_failed(path.as_path(), e))?;

        info!(path = %path, "Directory created");
        Ok(path)
    }

    /// Delete a directory tree and purge every cache entry beneath it.
    pub fn delete_directory(&mut self, name: impl AsRef<Path>) -> JkResult<KeeperPath> {
        let path = self.resolve(name);
        let meta = fs::symlink_metadata(path.as_path()).map_err(|e| JkError::lookup(&path, e))?;
        if !meta.is_dir() {
            return Err(JkError::NotADirectory(path.to_string()));
        }
        fs::remove_dir_all(path.as_path()).map_err(|e| JkError::write_failed(path.as_path(), e))?;

        let purged = self.cache.remove_prefix(&path);
        self.commit()?;

        info!(path = %path, purged, "Directory deleted");
        Ok(path)
    }

    /// Rename a file or directory. Never overwrites an existing target.
    pub fn rename(&mut self, old: impl AsRef<Path>, new: impl AsRef<Path>) -> JkResult<Outcome> {
        let old_path = self.resolve(old);
        let new_path = self.resolve(new);
        if !exists(&old_path) {
            return Err(JkError::NotFound(old_path.to_string()));
        }
        if exists(&new_path) {
            return Err(JkError::AlreadyExists(new_path.to_string()));
        }
        fs::rename(old_path.as_path(), new_path.as_path())
            .map_err(|e| JkError::write_failed(new_path.as_path(), e))?;

        // a cached target is stale: the path was free on disk
        self.cache.remove_prefix(&new_path);
        let is_dir = new_path.as_path().is_dir();
        if is_dir {
            self.cache.rename_prefix(&old_path, &new_path);
        } else {
            self.cache.rename(&old_path, &new_path);
        }
        self.commit()?;

        info!(from = %old_path, to = %new_path, "Renamed");
        if is_dir {
            Ok(Outcome::done(new_path))
        } else {
            let backup = self.backup(&new_path);
            Ok(Outcome::with_backup(new_path, backup))
        }
    }

    /// Move a file or directory into `destination`.
    ///
    /// Cache entries for the source are dropped and not re-created at the
    /// destination; the next read there goes to disk.
    pub fn move_entry(
        &mut self,
        name: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> JkResult<KeeperPath> {
        let (source, target) = self.transfer_paths(name, destination)?;

        if let Err(e) = fs::rename(source.as_path(), target.as_path()) {
            // rename cannot cross filesystems; fall back to copy + delete
            debug!(source = %source, error = %e, "Rename failed, copying instead");
            copy_tree(source.as_path(), target.as_path())
                .map_err(|e| JkError::write_failed(target.as_path(), e))?;
            remove_any(source.as_path()).map_err(|e| JkError::write_failed(source.as_path(), e))?;
        }

        self.cache.remove_prefix(&source);
        self.cache.remove_prefix(&target);
        self.commit()?;

        info!(from = %source, to = %target, "Moved");
        Ok(target)
    }

    /// Copy a file or directory tree into `destination`. Copies are not cached.
    pub fn copy(
        &mut self,
        name: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> JkResult<KeeperPath> {
        let (source, target) = self.transfer_paths(name, destination)?;
        copy_tree(source.as_path(), target.as_path())
            .map_err(|e| JkError::write_failed(target.as_path(), e))?;

        info!(from = %source, to = %target, "Copied");
        Ok(target)
    }

    /// Validate a move or copy and compute `destination/<basename>`.
    fn transfer_paths(
        &self,
        name: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> JkResult<(KeeperPath, KeeperPath)> {
        let source = self.resolve(name);
        if !exists(&source) {
            return Err(JkError::NotFound(source.to_string()));
        }

        let dest_dir = self.resolve(destination);
        let meta = fs::metadata(dest_dir.as_path()).map_err(|e| JkError::lookup(&dest_dir, e))?;
        if !meta.is_dir() {
            return Err(JkError::NotADirectory(dest_dir.to_string()));
        }

        let target = dest_dir.resolve(source.basename()?);
        if exists(&target) {
            return Err(JkError::AlreadyExists(target.to_string()));
        }
        if target.starts_with(&source) {
            return Err(JkError::InvalidPath(format!("{} is inside {}", target, source)));
        }
        Ok((source, target))
    }

    /// Entry names directly under `name`, or the current directory.
    /// Order is whatever the OS returns. Errors yield an empty listing.
    pub fn list(&self, name: Option<&Path>) -> Vec<String> {
        self.list_entries(name).into_iter().map(|e| e.name).collect()
    }

    /// Like [`list`](Self::list) with kind and size per entry
    pub fn list_entries(&self, name: Option<&Path>) -> Vec<EntryInfo> {
        let dir = match name {
            Some(name) => self.resolve(name),
            None => self.current_dir().clone(),
        };
        match read_entries(dir.as_path()) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %dir, error = %e, "Listing failed");
                Vec::new()
            }
        }
    }

    pub fn change_directory(&mut self, path: impl AsRef<Path>) -> JkResult<&KeeperPath> {
        self.navigator.change_directory(path)
    }

    /// Copy the backup of `name` over `destination`, then re-cache and
    /// journal the restored content.
    pub fn restore(&mut self, name: &str, destination: impl AsRef<Path>) -> JkResult<String> {
        let target = self.resolve(destination);
        let content = self.backups.restore(name, target.as_path())?;

        self.cache.put(&target, content.clone());
        self.commit()?;

        info!(name, path = %target, "Restored from backup");
        Ok(content)
    }

    /// Does nothing but wait; kept for front ends that offer it.
    pub fn defragment(&self, delay: Duration) {
        info!(path = %self.current_dir(), "Defragmenting");
        std::thread::sleep(delay);
        info!("Defragmentation complete");
    }
}

fn exists(path: &KeeperPath) -> bool {
    fs::symlink_metadata(path.as_path()).is_ok()
}

fn read_entries(dir: &Path) -> io::Result<Vec<EntryInfo>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let size = if file_type.is_file() {
            entry.metadata().ok().map(|m| m.len())
        } else {
            None
        };
        entries.push(EntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind: file_type.into(),
            size,
        });
    }
    Ok(entries)
}

/// Copy a file, or a directory tree, to `target`
fn copy_tree(source: &Path, target: &Path) -> io::Result<()> {
    if !source.is_dir() {
        fs::copy(source, target)?;
        return Ok(());
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let dest = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

fn remove_any(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn keeper() -> (TempDir, FileKeeper) {
        let dir = tempfile::tempdir().unwrap();
        let keeper = FileKeeper::open(&KeeperConfig::with_root(dir.path())).unwrap();
        (dir, keeper)
    }

    #[test]
    fn test_open_creates_backup_dir() {
        let (dir, keeper) = keeper();
        assert!(dir.path().join("backup").is_dir());
        assert!(keeper.cache().is_empty());
        assert_eq!(keeper.current_dir().as_path(), dir.path());
    }

    #[test]
    fn test_create_writes_cache_journal_backup() {
        let (dir, mut keeper) = keeper();
        let outcome = keeper.create("notes.txt", "hello").unwrap();

        assert!(!outcome.is_degraded());
        assert_eq!(fs::read_to_string(dir.path().join("notes.txt")).unwrap(), "hello");
        assert_eq!(keeper.cache().peek(&outcome.path), Some("hello"));
        assert!(keeper.journal().exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("backup/notes.txt")).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_create_makes_parents() {
        let (dir, mut keeper) = keeper();
        keeper.create("a/b/c.txt", "deep").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a/b/c.txt")).unwrap(), "deep");
    }

    #[test]
    fn test_create_write_failed() {
        let (dir, mut keeper) = keeper();
        fs::write(dir.path().join("blocker"), "x").unwrap();
        let err = keeper.create("blocker/inner.txt", "nope").unwrap_err();
        assert!(matches!(err, JkError::WriteFailed { .. }));
    }

    #[test]
    fn test_create_with_failing_backup_is_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let mut keeper = FileKeeper::open(&KeeperConfig::with_root(dir.path())).unwrap();
        // a file where the backup slot should go makes the copy fail
        fs::remove_dir_all(dir.path().join("backup")).unwrap();
        fs::write(dir.path().join("backup"), "not a dir").unwrap();

        let outcome = keeper.create("x.txt", "data").unwrap();
        assert!(outcome.is_degraded());
        assert!(matches!(outcome.backup_error, Some(JkError::BackupWriteFailed { .. })));
        assert_eq!(keeper.read("x.txt").unwrap(), "data");
    }

    #[test]
    fn test_create_inside_backup_dir_keeps_content() {
        let (dir, mut keeper) = keeper();
        let outcome = keeper.create("backup/notes.txt", "precious").unwrap();

        assert!(!outcome.is_degraded());
        assert_eq!(
            fs::read_to_string(dir.path().join("backup/notes.txt")).unwrap(),
            "precious"
        );

        keeper.simulate_crash().unwrap();
        let mut fresh = FileKeeper::open(&KeeperConfig::with_root(dir.path())).unwrap();
        assert_eq!(fresh.read("backup/notes.txt").unwrap(), "precious");
    }

    #[test]
    fn test_read_from_disk_populates_cache() {
        let (dir, mut keeper) = keeper();
        fs::write(dir.path().join("outside.txt"), "written elsewhere").unwrap();

        assert_eq!(keeper.read("outside.txt").unwrap(), "written elsewhere");
        assert!(keeper.cache().contains(&keeper.resolve("outside.txt")));
        assert_eq!(keeper.cache().stats().miss_count, 1);

        keeper.read("outside.txt").unwrap();
        assert_eq!(keeper.cache().stats().hit_count, 1);
    }

    #[test]
    fn test_read_serves_stale_cache() {
        let (dir, mut keeper) = keeper();
        keeper.create("f.txt", "v1").unwrap();
        fs::write(dir.path().join("f.txt"), "v2").unwrap();
        assert_eq!(keeper.read("f.txt").unwrap(), "v1");
    }

    #[test]
    fn test_read_not_found() {
        let (_dir, mut keeper) = keeper();
        assert!(matches!(keeper.read("nope.txt"), Err(JkError::NotFound(_))));
    }

    #[test]
    fn test_read_binary_is_not_cached() {
        let (dir, mut keeper) = keeper();
        fs::write(dir.path().join("bin"), [0xc3, 0x28, 0xff]).unwrap();
        assert!(matches!(keeper.read("bin"), Err(JkError::NotText(_))));
        assert!(keeper.cache().is_empty());
    }

    #[test]
    fn test_delete() {
        let (dir, mut keeper) = keeper();
        keeper.create("gone.txt", "bye").unwrap();
        keeper.delete("gone.txt").unwrap();

        assert!(!dir.path().join("gone.txt").exists());
        assert!(keeper.cache().is_empty());
        assert!(matches!(keeper.delete("gone.txt"), Err(JkError::NotFound(_))));
    }

    #[test]
    fn test_create_directory_idempotent() {
        let (dir, mut keeper) = keeper();
        keeper.create_directory("docs").unwrap();
        keeper.create_directory("docs").unwrap();
        assert!(dir.path().join("docs").is_dir());
    }

    #[test]
    fn test_lookup_errors_other_than_missing_stay_io() {
        let (_dir, mut keeper) = keeper();
        // a NUL byte fails the lookup with InvalidInput, not NotFound
        assert!(matches!(keeper.delete_directory("bad\0name"), Err(JkError::Io(_))));
        assert!(matches!(keeper.simulate_corruption("bad\0name"), Err(JkError::Io(_))));
        assert!(matches!(keeper.read("bad\0name"), Err(JkError::Io(_))));
    }

    #[test]
    fn test_delete_directory_errors() {
        let (_dir, mut keeper) = keeper();
        assert!(matches!(keeper.delete_directory("none"), Err(JkError::NotFound(_))));

        keeper.create("plain.txt", "x").unwrap();
        assert!(matches!(
            keeper.delete_directory("plain.txt"),
            Err(JkError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_rename_file() {
        let (dir, mut keeper) = keeper();
        keeper.create("old.txt", "content").unwrap();
        let outcome = keeper.rename("old.txt", "new.txt").unwrap();

        assert!(!outcome.is_degraded());
        assert_eq!(keeper.cache().peek(&outcome.path), Some("content"));
        assert!(!keeper.cache().contains(&keeper.resolve("old.txt")));
        assert!(dir.path().join("backup/new.txt").is_file());
    }

    #[test]
    fn test_rename_onto_externally_deleted_target() {
        let (dir, mut keeper) = keeper();
        keeper.create("q.txt", "old q").unwrap();
        fs::remove_file(dir.path().join("q.txt")).unwrap();
        fs::write(dir.path().join("p.txt"), "p content").unwrap();

        keeper.rename("p.txt", "q.txt").unwrap();
        assert_eq!(keeper.read("q.txt").unwrap(), "p content");
        assert_eq!(
            keeper.journal().load().peek(&keeper.resolve("q.txt")),
            Some("p content")
        );
    }

    #[test]
    fn test_rename_directory_onto_stale_cached_tree() {
        let (dir, mut keeper) = keeper();
        keeper.create("dst/a.txt", "stale").unwrap();
        fs::remove_dir_all(dir.path().join("dst")).unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/b.txt"), "b").unwrap();

        keeper.rename("src", "dst").unwrap();
        assert!(!keeper.cache().contains(&keeper.resolve("dst/a.txt")));
        assert!(matches!(keeper.read("dst/a.txt"), Err(JkError::NotFound(_))));
    }

    #[test]
    fn test_rename_directory_moves_nested_entries() {
        let (dir, mut keeper) = keeper();
        keeper.create("src/a.txt", "a").unwrap();
        keeper.rename("src", "dst").unwrap();

        assert_eq!(keeper.cache().peek(&keeper.resolve("dst/a.txt")), Some("a"));
        assert!(!keeper.cache().contains(&keeper.resolve("src/a.txt")));
        assert!(!dir.path().join("backup/dst").exists());
    }

    #[test]
    fn test_rename_missing_source() {
        let (_dir, mut keeper) = keeper();
        assert!(matches!(keeper.rename("a", "b"), Err(JkError::NotFound(_))));
    }

    #[test]
    fn test_move_drops_cache_entry() {
        let (dir, mut keeper) = keeper();
        keeper.create_directory("archive").unwrap();
        keeper.create("report.txt", "q3").unwrap();

        let target = keeper.move_entry("report.txt", "archive").unwrap();
        assert_eq!(target.as_path(), dir.path().join("archive/report.txt"));
        assert!(!dir.path().join("report.txt").exists());
        assert!(!keeper.cache().contains(&keeper.resolve("report.txt")));
        // moved content is not re-cached at the destination
        assert!(!keeper.cache().contains(&target));
        assert_eq!(keeper.read("archive/report.txt").unwrap(), "q3");
    }

    #[test]
    fn test_move_onto_externally_deleted_target() {
        let (dir, mut keeper) = keeper();
        keeper.create("archive/r.txt", "old r").unwrap();
        fs::remove_file(dir.path().join("archive/r.txt")).unwrap();
        fs::write(dir.path().join("r.txt"), "new r").unwrap();

        let target = keeper.move_entry("r.txt", "archive").unwrap();
        assert!(!keeper.cache().contains(&target));
        assert_eq!(keeper.read("archive/r.txt").unwrap(), "new r");
    }

    #[test]
    fn test_cached_paths() {
        let (_dir, mut keeper) = keeper();
        assert!(keeper.cached_paths().is_empty());

        let b = keeper.create("b.txt", "b").unwrap().path;
        let a = keeper.create("a.txt", "a").unwrap().path;
        assert_eq!(keeper.cached_paths(), vec![a, b.clone()]);

        keeper.delete("a.txt").unwrap();
        assert_eq!(keeper.cached_paths(), vec![b]);
    }

    #[test]
    fn test_move_errors() {
        let (_dir, mut keeper) = keeper();
        keeper.create_directory("dest").unwrap();
        keeper.create("dest/f.txt", "existing").unwrap();
        keeper.create("f.txt", "incoming").unwrap();

        assert!(matches!(keeper.move_entry("missing", "dest"), Err(JkError::NotFound(_))));
        assert!(matches!(keeper.move_entry("f.txt", "nowhere"), Err(JkError::NotFound(_))));
        assert!(matches!(keeper.move_entry("f.txt", "dest"), Err(JkError::AlreadyExists(_))));
        assert!(matches!(keeper.move_entry("f.txt", "f.txt"), Err(JkError::NotADirectory(_))));
    }

    #[test]
    fn test_move_directory_into_itself() {
        let (_dir, mut keeper) = keeper();
        keeper.create_directory("outer/inner").unwrap();
        assert!(matches!(
            keeper.move_entry("outer", "outer/inner"),
            Err(JkError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_copy_file_leaves_cache_alone() {
        let (dir, mut keeper) = keeper();
        keeper.create_directory("copies").unwrap();
        keeper.create("orig.txt", "same").unwrap();
        let before = keeper.cache().len();

        let target = keeper.copy("orig.txt", "copies").unwrap();
        assert_eq!(fs::read_to_string(target.as_path()).unwrap(), "same");
        assert!(dir.path().join("orig.txt").exists());
        assert_eq!(keeper.cache().len(), before);
        assert!(matches!(keeper.copy("orig.txt", "copies"), Err(JkError::AlreadyExists(_))));
    }

    #[test]
    fn test_copy_directory_tree() {
        let (dir, mut keeper) = keeper();
        keeper.create("tree/one.txt", "1").unwrap();
        keeper.create("tree/sub/two.txt", "2").unwrap();
        keeper.create_directory("out").unwrap();

        keeper.copy("tree", "out").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("out/tree/one.txt")).unwrap(), "1");
        assert_eq!(fs::read_to_string(dir.path().join("out/tree/sub/two.txt")).unwrap(), "2");
    }

    #[test]
    fn test_list() {
        let (_dir, mut keeper) = keeper();
        keeper.create("a.txt", "a").unwrap();
        keeper.create_directory("sub").unwrap();
        keeper.create("sub/b.txt", "b").unwrap();

        let mut names = keeper.list(None);
        names.sort();
        assert!(names.contains(&"a.txt".to_string()));
        assert!(names.contains(&"sub".to_string()));
        assert!(names.contains(&"backup".to_string()));

        assert_eq!(keeper.list(Some(Path::new("sub"))), vec!["b.txt".to_string()]);

        let entries = keeper.list_entries(Some(Path::new("sub")));
        assert_eq!(entries[0].size, Some(1));
    }

    #[test]
    fn test_list_error_is_empty() {
        let (_dir, keeper) = keeper();
        assert!(keeper.list(Some(Path::new("does-not-exist"))).is_empty());
    }

    #[test]
    fn test_change_directory_scopes_names() {
        let (dir, mut keeper) = keeper();
        keeper.create_directory("work").unwrap();
        keeper.change_directory("work").unwrap();
        keeper.create("inside.txt", "w").unwrap();

        assert!(dir.path().join("work/inside.txt").is_file());
        assert!(matches!(
            keeper.change_directory("work/inside.txt"),
            Err(JkError::NotFound(_))
        ));
        assert!(matches!(
            keeper.change_directory("inside.txt"),
            Err(JkError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_restore_not_found() {
        let (_dir, mut keeper) = keeper();
        assert!(matches!(
            keeper.restore("never.txt", "never.txt"),
            Err(JkError::BackupNotFound(_))
        ));
    }

    #[test]
    fn test_defragment_is_inert() {
        let (_dir, mut keeper) = keeper();
        keeper.create("a.txt", "a").unwrap();
        let before = keeper.cache().entries().clone();
        keeper.defragment(Duration::from_millis(1));
        assert_eq!(keeper.cache().entries(), &before);
    }
}
