// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use chrono::{DateTime, Utc};
use console::style;
use jk_core::{EntryKind, JkResult, KeeperConfig, Outcome};
use jk_fs::FileKeeper;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::{Table, Tabled};

/// Config file looked up in the platform config directory
const CONFIG_FILE: &str = "jk.toml";

/// Default config location, e.g. `~/.config/journal-keeper/jk.toml`
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "jk", "journal-keeper")
        .map(|d| d.config_dir().join(CONFIG_FILE))
}

/// Resolve configuration: explicit file, then the platform default file,
/// then built-in defaults. `--root` wins over any configured root.
pub fn load_config(config: Option<&Path>, root: Option<&Path>) -> JkResult<KeeperConfig> {
    let mut loaded = match config {
        Some(path) => KeeperConfig::load(path)?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => KeeperConfig::load(path)?,
            None => KeeperConfig::default(),
        },
    };
    if let Some(root) = root {
        loaded.root = root.to_path_buf();
    }
    Ok(loaded)
}

pub fn open_keeper(config: Option<&Path>, root: Option<&Path>, dir: Option<&Path>) -> JkResult<FileKeeper> {
    let config = load_config(config, root)?;
    let mut keeper = FileKeeper::open(&config)?;
    if let Some(dir) = dir {
        keeper.change_directory(dir)?;
    }
    Ok(keeper)
}

/// Format a timestamp for display
fn format_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format file size
fn format_size(size: Option<u64>, human: bool) -> String {
    match size {
        Some(s) if human => bytesize::ByteSize(s).to_string(),
        Some(s) => s.to_string(),
        None => "-".to_string(),
    }
}

/// Format entry kind
fn format_kind(kind: EntryKind) -> String {
    match kind {
        EntryKind::Directory => style("d").cyan().to_string(),
        EntryKind::File => "-".to_string(),
        EntryKind::Symlink => style("l").magenta().to_string(),
        EntryKind::Unknown => "?".to_string(),
    }
}

fn report(action: &str, outcome: &Outcome) {
    println!("{} {}", style(action).green(), outcome.path);
    if let Some(e) = &outcome.backup_error {
        eprintln!("{} {}", style("warning:").yellow(), e);
    }
}

pub fn create(keeper: &mut FileKeeper, name: &str, content: &str) -> JkResult<()> {
    let outcome = keeper.create(name, content)?;
    report("Created", &outcome);
    Ok(())
}

pub fn cat(keeper: &mut FileKeeper, name: &str) -> JkResult<()> {
    let content = keeper.read(name)?;
    println!("{content}");
    Ok(())
}

pub fn rm(keeper: &mut FileKeeper, name: &str) -> JkResult<()> {
    let path = keeper.delete(name)?;
    println!("{} {}", style("Deleted").green(), path);
    Ok(())
}

pub fn mkdir(keeper: &mut FileKeeper, name: &str) -> JkResult<()> {
    let path = keeper.create_directory(name)?;
    println!("{} {}", style("Created directory").green(), path);
    Ok(())
}

pub fn rmdir(keeper: &mut FileKeeper, name: &str) -> JkResult<()> {
    let path = keeper.delete_directory(name)?;
    println!("{} {}", style("Deleted directory").green(), path);
    Ok(())
}

pub fn rename(keeper: &mut FileKeeper, old: &str, new: &str) -> JkResult<()> {
    let outcome = keeper.rename(old, new)?;
    report("Renamed to", &outcome);
    Ok(())
}

pub fn mv(keeper: &mut FileKeeper, name: &str, dest: &str) -> JkResult<()> {
    let target = keeper.move_entry(name, dest)?;
    println!("{} {}", style("Moved to").green(), target);
    Ok(())
}

pub fn cp(keeper: &mut FileKeeper, name: &str, dest: &str) -> JkResult<()> {
    let target = keeper.copy(name, dest)?;
    println!("{} {}", style("Copied to").green(), target);
    Ok(())
}

#[derive(Tabled)]
struct LsEntry {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// List directory contents
pub fn ls(keeper: &mut FileKeeper, path: Option<&str>, long: bool, human: bool) -> JkResult<()> {
    let path = path.map(Path::new);
    if long {
        let entries: Vec<LsEntry> = keeper
            .list_entries(path)
            .into_iter()
            .map(|e| LsEntry {
                kind: format_kind(e.kind),
                size: format_size(e.size, human),
                name: e.name,
            })
            .collect();

        if entries.is_empty() {
            println!("(empty directory)");
        } else {
            println!("{}", Table::new(entries));
        }
    } else {
        let names = keeper.list(path);
        if names.is_empty() {
            println!("(empty directory)");
        } else {
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

pub fn restore(keeper: &mut FileKeeper, name: &str, dest: Option<&str>) -> JkResult<()> {
    let dest = dest.unwrap_or(name);
    let content = keeper.restore(name, dest)?;
    println!(
        "{} {} ({} bytes)",
        style("Restored").green(),
        keeper.resolve(dest),
        content.len()
    );
    Ok(())
}

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Backed up")]
    modified: String,
    #[tabled(rename = "BLAKE3")]
    checksum: String,
}

pub fn backups(keeper: &mut FileKeeper, human: bool) -> JkResult<()> {
    let rows: Vec<BackupRow> = keeper
        .backups()
        .list()?
        .into_iter()
        .map(|b| BackupRow {
            name: b.name,
            size: format_size(Some(b.size), human),
            modified: format_time(b.modified),
            checksum: b.checksum[..16].to_string(),
        })
        .collect();

    if rows.is_empty() {
        println!("(no backups in {})", keeper.backups().dir().display());
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}

pub fn corrupt(keeper: &mut FileKeeper, name: &str) -> JkResult<()> {
    let path = keeper.simulate_corruption(name)?;
    println!("{} {}", style("Corrupted").red(), path);
    Ok(())
}

pub fn crash(keeper: &mut FileKeeper) -> JkResult<()> {
    if keeper.simulate_crash()? {
        println!("{}", style("Simulated crash: journal deleted").red());
    } else {
        println!("No journal file found to simulate a crash");
    }
    Ok(())
}

pub fn defrag(keeper: &mut FileKeeper, seconds: u64) -> JkResult<()> {
    println!("Defragmenting... This may take a while.");
    keeper.defragment(Duration::from_secs(seconds));
    println!("Defragmentation complete.");
    Ok(())
}

pub fn status(keeper: &mut FileKeeper) -> JkResult<()> {
    let stats = keeper.cache().stats();
    println!("{:<12} {}", style("Directory").bold(), keeper.current_dir());
    println!(
        "{:<12} {} ({})",
        style("Journal").bold(),
        keeper.journal().path().display(),
        if keeper.journal().exists() { "present" } else { "missing" }
    );
    println!("{:<12} {}", style("Backups").bold(), keeper.backups().dir().display());
    println!(
        "{:<12} {} entries, {}",
        style("Cache").bold(),
        stats.entries,
        bytesize::ByteSize(stats.total_size)
    );
    for path in keeper.cached_paths() {
        println!("  {path}");
    }
    Ok(())
}
