//! Tag reconciliation pipeline: the export archive is the authority for
//! "still referenced", so orphans are database rows absent from the export.

use notesweep_core::db::Database;
use notesweep_core::dispose;
use notesweep_core::error::{Result, SweepError};
use notesweep_core::export;
use notesweep_core::reconcile::{reconcile, OrphanPolarity};

use crate::cli::{Cli, TagsArgs};
use crate::commands::report::{self, SweepReport};
use crate::commands::{ensure_host_inactive, resolve_config};

pub fn run(cli: &Cli, args: &TagsArgs) -> Result<()> {
    let config = resolve_config(cli, args.delete, args.archive)?;

    ensure_host_inactive(&config)?;

    let db = Database::open(&config)?;
    let authoritative = db.tag_ids()?;
    let observed = export::export_ids(&args.export, config.id_length)?;

    let outcome = reconcile(&authoritative, &observed, OrphanPolarity::AuthoritativeExtra);
    tracing::info!(
        authoritative = authoritative.len(),
        observed = observed.len(),
        orphans = outcome.orphans.len(),
        missing = outcome.missing.len(),
        "tags reconciled"
    );

    // Disposal touches the sync directory, so it must exist when there is
    // real work to do.
    if !config.dry_run && !outcome.orphans.is_empty() && !config.sync_dir.is_dir() {
        return Err(SweepError::SyncDirNotFound {
            path: config.sync_dir.clone(),
        });
    }

    let disposal = dispose::dispose(&outcome.orphans, &config)?;
    let report = SweepReport::new(
        "tags",
        &config,
        authoritative.len(),
        observed.len(),
        outcome,
        disposal,
    );
    report::render(cli, &report)
}
