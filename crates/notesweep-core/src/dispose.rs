//! Disposal executor: archives, deletes, or merely reports orphan candidates.
//!
//! Disposal is candidate-by-candidate and continues past per-item failures;
//! a file that vanished between the scan and the disposal pass is recorded
//! and skipped, never a reason to abort the run. The database is never
//! touched.

use std::collections::BTreeSet;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;

/// What to do with orphan candidates when not in dry-run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisposalMode {
    /// Move each candidate's content file into the archive subdirectory
    #[default]
    Archive,
    /// Permanently remove each candidate's content file
    Delete,
}

/// A single candidate that could not be disposed of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisposalFailure {
    pub file: String,
    pub reason: String,
}

/// Outcome of one disposal pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisposalReport {
    /// Dry-run plan: files that would have been disposed of
    pub planned: Vec<String>,
    /// Files actually archived or deleted
    pub disposed: Vec<String>,
    /// Per-item failures; the run is still considered successful
    pub failures: Vec<DisposalFailure>,
}

/// Dispose of the given orphan candidates according to the config.
///
/// Candidates are identifiers; the corresponding content file is
/// `<id>.md` inside the sync directory.
pub fn dispose(candidates: &BTreeSet<String>, config: &Config) -> Result<DisposalReport> {
    let mut report = DisposalReport::default();

    if config.dry_run {
        report.planned = candidates.iter().map(|id| content_file(id)).collect();
        return Ok(report);
    }

    let archive_dir = config.archive_dir();
    if config.disposal == DisposalMode::Archive && !candidates.is_empty() {
        fs::create_dir_all(&archive_dir)?;
    }

    for id in candidates {
        let file = content_file(id);
        let src = config.sync_dir.join(&file);

        let outcome = match config.disposal {
            DisposalMode::Archive => fs::rename(&src, archive_dir.join(&file)),
            DisposalMode::Delete => fs::remove_file(&src),
        };

        match outcome {
            Ok(()) => report.disposed.push(file),
            Err(e) => {
                tracing::warn!(file = %file, error = %e, "failed to dispose of candidate");
                report.failures.push(DisposalFailure {
                    file,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn content_file(id: &str) -> String {
    format!("{}.md", id)
}
