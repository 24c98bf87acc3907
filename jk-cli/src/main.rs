// SPDX-License-Identifier: AGPL-3.0-or-later
//! Journal Keeper CLI
//!
//! One subcommand per keeper operation. Each run opens the keeper (loading
//! the journal), performs the operation and exits.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jk")]
#[command(author, version, about = "Journal Keeper - journaled file operations with backup and recovery", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Working root (defaults to the current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory, relative to the root, to run the command in
    #[arg(short = 'C', long = "dir", global = true)]
    dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or overwrite a file
    Create {
        /// File name
        name: String,

        /// File content
        content: String,
    },

    /// Display file contents
    Cat {
        /// File to display
        name: String,
    },

    /// Delete a file
    Rm {
        /// File to delete
        name: String,
    },

    /// Create a directory
    Mkdir {
        /// Directory to create
        name: String,
    },

    /// Delete a directory tree
    Rmdir {
        /// Directory to delete
        name: String,
    },

    /// Rename a file or directory
    Rename {
        /// Current name
        old: String,

        /// New name
        new: String,
    },

    /// Move a file or directory into another directory
    Mv {
        /// Entry to move
        name: String,

        /// Destination directory
        dest: String,
    },

    /// Copy a file or directory into another directory
    Cp {
        /// Entry to copy
        name: String,

        /// Destination directory
        dest: String,
    },

    /// List directory contents
    #[command(alias = "dir")]
    Ls {
        /// Directory to list (defaults to the current directory)
        path: Option<String>,

        /// Long format with details
        #[arg(short, long)]
        long: bool,

        /// Human-readable sizes
        #[arg(short = 'H', long)]
        human: bool,
    },

    /// Restore a file from its backup
    Restore {
        /// Backup name (a file basename)
        name: String,

        /// Where to restore to (defaults to the name in the current directory)
        dest: Option<String>,
    },

    /// List the backup store
    Backups {
        /// Human-readable sizes
        #[arg(short = 'H', long)]
        human: bool,
    },

    /// Overwrite a file with random bytes
    Corrupt {
        /// File to corrupt
        name: String,
    },

    /// Delete the journal, as a crash would
    Crash,

    /// Pretend to defragment (waits, changes nothing)
    Defrag {
        /// Seconds to wait
        #[arg(long, default_value_t = 2)]
        seconds: u64,
    },

    /// Show cache and journal status
    Status,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = commands::open_keeper(cli.config.as_deref(), cli.root.as_deref(), cli.dir.as_deref())
        .and_then(|mut keeper| {
            let keeper = &mut keeper;
            match cli.command {
                Commands::Create { name, content } => commands::create(keeper, &name, &content),
                Commands::Cat { name } => commands::cat(keeper, &name),
                Commands::Rm { name } => commands::rm(keeper, &name),
                Commands::Mkdir { name } => commands::mkdir(keeper, &name),
                Commands::Rmdir { name } => commands::rmdir(keeper, &name),
                Commands::Rename { old, new } => commands::rename(keeper, &old, &new),
                Commands::Mv { name, dest } => commands::mv(keeper, &name, &dest),
                Commands::Cp { name, dest } => commands::cp(keeper, &name, &dest),
                Commands::Ls { path, long, human } => {
                    commands::ls(keeper, path.as_deref(), long, human)
                }
                Commands::Restore { name, dest } => {
                    commands::restore(keeper, &name, dest.as_deref())
                }
                Commands::Backups { human } => commands::backups(keeper, human),
                Commands::Corrupt { name } => commands::corrupt(keeper, &name),
                Commands::Crash => commands::crash(keeper),
                Commands::Defrag { seconds } => commands::defrag(keeper, seconds),
                Commands::Status => commands::status(keeper),
            }
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
