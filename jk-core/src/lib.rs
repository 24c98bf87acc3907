// SPDX-License-Identifier: AGPL-3.0-or-later
//! Journal Keeper Core
//!
//! Shared types for the journaled file keeper: errors, normalized paths,
//! configuration and operation outcomes.

pub mod config;
pub mod entry;
pub mod error;
pub mod path;

pub use config::KeeperConfig;
pub use entry::{EntryInfo, EntryKind, Outcome};
pub use error::{JkError, JkResult};
pub use path::KeeperPath;
