// SPDX-License-Identifier: AGPL-3.0-or-later
//! Journaled file keeper
//!
//! [`FileKeeper`] puts a content cache, a recovery journal and a backup
//! store in front of ordinary filesystem calls. Every mutation touches the
//! namespace first, then the cache, then the journal, then (for creates
//! and renames) the backup store.
//!
//! ```no_run
//! use jk_core::KeeperConfig;
//! use jk_fs::FileKeeper;
//!
//! # fn main() -> jk_core::JkResult<()> {
//! let mut keeper = FileKeeper::open(&KeeperConfig::with_root("/srv/files"))?;
//! keeper.create("notes.txt", "hello")?;
//! assert_eq!(keeper.read("notes.txt")?, "hello");
//! # Ok(())
//! # }
//! ```

pub mod fault;
pub mod keeper;
pub mod navigator;

pub use keeper::FileKeeper;
pub use navigator::Navigator;
