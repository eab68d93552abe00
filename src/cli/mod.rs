//! CLI argument parsing for notesweep
//!
//! Uses clap with global flags: --config, --database-dir, --sync-dir,
//! --format, --dry-run, --quiet, --verbose, --log-level, --log-json

pub mod output;
pub mod parse;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use notesweep_core::scan::ScanStrategy;
pub use output::OutputFormat;
use parse::parse_scan_strategy;

/// Notesweep - reconcile a note app's database against its sync directory
#[derive(Parser, Debug)]
#[command(name = "notesweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the TOML config file
    #[arg(long, global = true, env = "NOTESWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the application's SQLite database
    #[arg(long, global = true)]
    pub database_dir: Option<PathBuf>,

    /// Local sync directory holding the content files
    #[arg(long, global = true)]
    pub sync_dir: Option<PathBuf>,

    /// Report the disposal plan without mutating anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Process name checked by the host-application guard
    #[arg(long, global = true)]
    pub host_process: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile revision records against the sync directory's content files
    Revisions(RevisionsArgs),

    /// Reconcile tag records against an export archive
    Tags(TagsArgs),
}

#[derive(Args, Debug)]
pub struct RevisionsArgs {
    /// Delete orphaned files instead of archiving them
    #[arg(long, conflicts_with = "archive")]
    pub delete: bool,

    /// Archive orphaned files (the default; overrides a `disposal = "delete"` config)
    #[arg(long)]
    pub archive: bool,

    /// Skip the pre-cleanup backup of the sync directory
    #[arg(long)]
    pub no_backup: bool,

    /// How to inspect files for the revision marker
    #[arg(long, default_value = "auto", value_parser = parse_scan_strategy)]
    pub scan_strategy: ScanStrategy,
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Path of the export archive (tar format, e.g. a .jex file)
    #[arg(long)]
    pub export: PathBuf,

    /// Delete orphaned tag files instead of archiving them
    #[arg(long, conflicts_with = "archive")]
    pub delete: bool,

    /// Archive orphaned tag files (the default)
    #[arg(long)]
    pub archive: bool,
}
