//! Revision reconciliation pipeline: guard, backup, load both sets,
//! reconcile, dispose.

use notesweep_core::backup;
use notesweep_core::db::Database;
use notesweep_core::dispose;
use notesweep_core::error::Result;
use notesweep_core::reconcile::{reconcile, OrphanPolarity};
use notesweep_core::scan;

use crate::cli::{Cli, RevisionsArgs};
use crate::commands::report::{self, SweepReport};
use crate::commands::{ensure_host_inactive, resolve_config};

pub fn run(cli: &Cli, args: &RevisionsArgs) -> Result<()> {
    let mut config = resolve_config(cli, args.delete, args.archive)?;
    if args.no_backup {
        config.backup = false;
    }

    ensure_host_inactive(&config)?;

    let db = Database::open(&config)?;
    let authoritative = db.revision_ids()?;
    let observed = scan::revision_ids(&config.sync_dir, args.scan_strategy)?;

    if config.backup && !config.dry_run {
        backup::backup(&config)?;
    }

    // Orphans are files on disk with no database row; database rows with no
    // file are only warned about, never auto-fixed.
    let outcome = reconcile(&authoritative, &observed, OrphanPolarity::ObservedExtra);
    tracing::info!(
        authoritative = authoritative.len(),
        observed = observed.len(),
        orphans = outcome.orphans.len(),
        missing = outcome.missing.len(),
        "revisions reconciled"
    );

    let disposal = dispose::dispose(&outcome.orphans, &config)?;
    let report = SweepReport::new(
        "revisions",
        &config,
        authoritative.len(),
        observed.len(),
        outcome,
        disposal,
    );
    report::render(cli, &report)
}
