//! Reconciliation report rendering (human and JSON)

use serde::Serialize;

use notesweep_core::config::Config;
use notesweep_core::dispose::{DisposalMode, DisposalReport};
use notesweep_core::error::Result;
use notesweep_core::reconcile::Reconciliation;

use crate::cli::{Cli, OutputFormat};

/// One run's reconciliation outcome, ready for rendering
#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub kind: &'static str,
    pub in_sync: bool,
    pub authoritative_count: usize,
    pub observed_count: usize,
    pub dry_run: bool,
    pub disposal_mode: DisposalMode,
    pub missing: Vec<String>,
    pub orphans: Vec<String>,
    pub disposal: DisposalReport,
}

impl SweepReport {
    pub fn new(
        kind: &'static str,
        config: &Config,
        authoritative_count: usize,
        observed_count: usize,
        outcome: Reconciliation,
        disposal: DisposalReport,
    ) -> Self {
        Self {
            kind,
            in_sync: outcome.in_sync(),
            authoritative_count,
            observed_count,
            dry_run: config.dry_run,
            disposal_mode: config.disposal,
            missing: outcome.missing.into_iter().collect(),
            orphans: outcome.orphans.into_iter().collect(),
            disposal,
        }
    }
}

pub fn render(cli: &Cli, report: &SweepReport) -> Result<()> {
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Human => render_human(cli, report),
    }
    Ok(())
}

fn render_human(cli: &Cli, report: &SweepReport) {
    if report.in_sync {
        if !cli.quiet {
            println!(
                "{}: database and files are fully in sync ({} records)",
                report.kind, report.authoritative_count
            );
        }
        return;
    }

    if !report.missing.is_empty() {
        tracing::warn!(
            kind = report.kind,
            count = report.missing.len(),
            "records are missing their counterpart"
        );
        eprintln!(
            "warning: {} record(s) are missing their counterpart:",
            report.missing.len()
        );
        for id in &report.missing {
            eprintln!("    - {}", id);
        }
    }

    if report.orphans.is_empty() {
        if !cli.quiet {
            println!("{}: no orphans found", report.kind);
        }
        return;
    }

    if report.dry_run {
        println!(
            "{}: {} orphan(s) found (dry run, nothing disposed of):",
            report.kind,
            report.orphans.len()
        );
        for file in &report.disposal.planned {
            println!("    - {}", file);
        }
        return;
    }

    let verb = match report.disposal_mode {
        DisposalMode::Archive => "archived",
        DisposalMode::Delete => "deleted",
    };
    println!(
        "{}: {} orphan(s) found, {} {}:",
        report.kind,
        report.orphans.len(),
        report.disposal.disposed.len(),
        verb
    );
    for file in &report.disposal.disposed {
        println!("    - {}", file);
    }
    for failure in &report.disposal.failures {
        eprintln!(
            "warning: could not dispose of {}: {}",
            failure.file, failure.reason
        );
    }
}
