//! Command dispatch for notesweep

pub mod report;
pub mod revisions;
pub mod tags;

use notesweep_core::config::Config;
use notesweep_core::dispose::DisposalMode;
use notesweep_core::error::{Result, SweepError};
use notesweep_core::guard;

use crate::cli::{Cli, Commands};

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => Err(SweepError::UsageError(
            "missing command (expected: revisions or tags)".to_string(),
        )),
        Some(Commands::Revisions(args)) => revisions::run(cli, args),
        Some(Commands::Tags(args)) => tags::run(cli, args),
    }
}

/// Resolve the run configuration: config file first, CLI overrides second.
/// Resolution happens once; the resulting config is passed by reference into
/// every component.
pub(crate) fn resolve_config(cli: &Cli, delete: bool, archive: bool) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.database_dir {
        config.database_dir = dir.clone();
    }
    if let Some(dir) = &cli.sync_dir {
        config.sync_dir = dir.clone();
    }
    if let Some(process) = &cli.host_process {
        config.host_process = process.clone();
    }
    if cli.dry_run {
        config.dry_run = true;
    }
    if delete {
        config.disposal = DisposalMode::Delete;
    }
    if archive {
        config.disposal = DisposalMode::Archive;
    }

    Ok(config)
}

/// Abort before touching anything if the host application is running
pub(crate) fn ensure_host_inactive(config: &Config) -> Result<()> {
    let guard = guard::detect(&config.host_process);
    if guard.is_host_active() {
        return Err(SweepError::HostApplicationActive {
            process: config.host_process.clone(),
        });
    }
    Ok(())
}
