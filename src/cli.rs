// src/cli.rs

//! CLI definitions and run configuration
//!
//! Command-line surface via clap; the `list` and `pull` subcommands are the
//! mutually exclusive operations. The parsed CLI is folded into an immutable
//! [`RunConfig`] that every command entry point receives by reference.

use crate::db;
use crate::output::ColorWhen;
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "pacrat")]
#[command(version)]
#[command(about = "Keep track of locally modified pacman configuration files", long_about = None)]
pub struct Cli {
    /// Use colored output
    ///
    /// A bare `-c`/`--color` means auto; an explicit WHEN needs `=` syntax,
    /// so trailing targets are never swallowed as a color value.
    #[arg(
        short = 'c',
        long,
        global = true,
        value_enum,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = ColorWhen::Auto,
        default_missing_value = "auto",
        value_name = "WHEN"
    )]
    pub color: ColorWhen,

    /// Output more
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List modified configuration files and their snapshot status
    List {
        #[command(flatten)]
        opts: RunOptions,
    },

    /// Archive modified configuration files into per-package snapshot
    /// directories
    Pull {
        #[command(flatten)]
        opts: RunOptions,
    },
}

/// Options shared by both operations
#[derive(Args)]
pub struct RunOptions {
    /// Include unmodified files, not only locally changed ones
    #[arg(short, long)]
    pub all: bool,

    /// Filesystem root the tracked paths resolve against
    #[arg(long, default_value = db::DEFAULT_ROOT, value_name = "DIR")]
    pub root: PathBuf,

    /// Pacman database path
    #[arg(long, default_value = db::DEFAULT_DBPATH, value_name = "DIR")]
    pub dbpath: PathBuf,

    /// Directory holding the per-package snapshot trees
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub snapshot_dir: PathBuf,

    /// Only consider packages matching these patterns
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

/// The operation a run performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Pull,
}

/// Immutable per-run configuration, built once from the parsed CLI
pub struct RunConfig {
    pub operation: Operation,
    pub include_unmodified: bool,
    pub root: PathBuf,
    pub dbpath: PathBuf,
    pub snapshot_dir: PathBuf,
    /// Explicit package targets, deduplicated, order preserved; empty means
    /// every installed package
    pub targets: Vec<String>,
    pub color: ColorWhen,
}

impl RunConfig {
    /// Fold the parsed CLI into a run configuration
    ///
    /// Returns `None` when no subcommand was given.
    pub fn from_cli(cli: Cli) -> Option<Self> {
        let color = cli.color;
        let (operation, opts) = match cli.command? {
            Commands::List { opts } => (Operation::List, opts),
            Commands::Pull { opts } => (Operation::Pull, opts),
        };

        Some(Self {
            operation,
            include_unmodified: opts.all,
            root: opts.root,
            dbpath: opts.dbpath,
            snapshot_dir: opts.snapshot_dir,
            targets: dedup_targets(opts.targets),
            color,
        })
    }
}

fn dedup_targets(targets: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    targets
        .into_iter()
        .filter(|target| {
            let fresh = seen.insert(target.clone());
            if fresh {
                debug!("adding target: {}", target);
            }
            fresh
        })
        .collect()
}
