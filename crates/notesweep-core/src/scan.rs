//! Observed set loader for revisions: scans the sync directory's content
//! files and keeps the ones carrying the revision type marker.
//!
//! Two interchangeable strategies sit behind the same contract: an in-process
//! per-line scan, and a batch filter that delegates to `grep -l` (much faster
//! on large sync directories). Both produce the same result set.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};

/// Marker line identifying a revision content file
pub const REVISION_MARKER: &str = "type_: 13";

/// Content file extension
const CONTENT_EXT: &str = "md";

/// File count above which `Auto` prefers the external grep filter
const BATCH_THRESHOLD: usize = 5_000;

/// How to inspect content files for the revision marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanStrategy {
    /// Pick per file count: external grep on large directories (unix),
    /// in-process scan otherwise
    #[default]
    Auto,
    /// Read every file line by line in-process
    PerLine,
    /// Delegate to `grep -l` (unix only)
    ExternalGrep,
}

/// Derive the set of revision identifiers from the sync directory.
///
/// A file counts iff some line contains [`REVISION_MARKER`]; the identifier
/// is the filename stem. An empty directory yields an empty set; a missing
/// directory is a fatal storage error.
pub fn revision_ids(sync_dir: &Path, strategy: ScanStrategy) -> Result<HashSet<String>> {
    if !sync_dir.is_dir() {
        return Err(SweepError::SyncDirNotFound {
            path: sync_dir.to_path_buf(),
        });
    }

    let files = content_files(sync_dir)?;
    tracing::debug!(count = files.len(), strategy = ?strategy, "scanning content files");

    match strategy {
        ScanStrategy::PerLine => per_line_scan(&files),
        ScanStrategy::ExternalGrep => {
            if cfg!(unix) {
                grep_scan(sync_dir, &files)
            } else {
                Err(SweepError::UsageError(
                    "scan strategy 'external-grep' is only available on unix".to_string(),
                ))
            }
        }
        ScanStrategy::Auto => {
            if cfg!(unix) && files.len() >= BATCH_THRESHOLD {
                // Fall back to the in-process scan if grep cannot be spawned.
                match grep_scan(sync_dir, &files) {
                    Ok(ids) => Ok(ids),
                    Err(SweepError::Scan(reason)) => {
                        tracing::warn!(reason, "grep unavailable, scanning in-process");
                        per_line_scan(&files)
                    }
                    Err(e) => Err(e),
                }
            } else {
                per_line_scan(&files)
            }
        }
    }
}

/// Non-recursive listing of `*.md` files in the sync directory
fn content_files(sync_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(sync_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == CONTENT_EXT) {
            files.push(path);
        }
    }
    Ok(files)
}

fn per_line_scan(files: &[PathBuf]) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();

    for path in files {
        if file_has_marker(path)? {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.insert(stem.to_string());
            }
        }
    }

    Ok(ids)
}

/// Scan one file, short-circuiting on the first marker line
fn file_has_marker(path: &Path) -> Result<bool> {
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        if line?.contains(REVISION_MARKER) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Batch filter via `grep -l`, run from inside the sync directory so the
/// output is plain filenames
fn grep_scan(sync_dir: &Path, files: &[PathBuf]) -> Result<HashSet<String>> {
    if files.is_empty() {
        return Ok(HashSet::new());
    }

    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
        .collect();

    let output = Command::new("grep")
        .arg("-l")
        .arg(REVISION_MARKER)
        .args(&names)
        .current_dir(sync_dir)
        .output()
        .map_err(|e| SweepError::Scan(format!("failed to spawn grep: {}", e)))?;

    // grep exits 1 when nothing matched; that is an empty set, not an error.
    match output.status.code() {
        Some(0) | Some(1) => {}
        _ => {
            return Err(SweepError::Scan(format!(
                "grep failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    let ids = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|name| name.strip_suffix(".md"))
        .map(|stem| stem.to_string())
        .collect();

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_revision(dir: &Path, id: &str) {
        fs::write(
            dir.join(format!("{}.md", id)),
            format!("{}\n\nsome revision body\ntype_: 13\n", id),
        )
        .unwrap();
    }

    fn write_note(dir: &Path, id: &str) {
        fs::write(
            dir.join(format!("{}.md", id)),
            format!("{}\n\nplain note body\ntype_: 1\n", id),
        )
        .unwrap();
    }

    #[test]
    fn missing_directory_is_fatal() {
        let err = revision_ids(Path::new("/no/such/sync/dir"), ScanStrategy::PerLine).unwrap_err();
        assert!(matches!(err, SweepError::SyncDirNotFound { .. }));
    }

    #[test]
    fn empty_directory_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let ids = revision_ids(dir.path(), ScanStrategy::PerLine).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn only_marker_files_survive() {
        let dir = tempfile::tempdir().unwrap();
        write_revision(dir.path(), "rev1");
        write_revision(dir.path(), "rev2");
        write_note(dir.path(), "note1");
        fs::write(dir.path().join("ignored.txt"), REVISION_MARKER).unwrap();

        let ids = revision_ids(dir.path(), ScanStrategy::PerLine).unwrap();
        assert_eq!(
            ids,
            HashSet::from(["rev1".to_string(), "rev2".to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn grep_strategy_matches_per_line() {
        let dir = tempfile::tempdir().unwrap();
        write_revision(dir.path(), "rev1");
        write_note(dir.path(), "note1");

        let per_line = revision_ids(dir.path(), ScanStrategy::PerLine).unwrap();
        let grep = revision_ids(dir.path(), ScanStrategy::ExternalGrep).unwrap();
        assert_eq!(per_line, grep);
    }

    #[cfg(unix)]
    #[test]
    fn grep_with_no_matches_is_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "note1");

        let ids = revision_ids(dir.path(), ScanStrategy::ExternalGrep).unwrap();
        assert!(ids.is_empty());
    }
}
