//! Observed set loader for tags: derives identifiers from the member names
//! of an export archive produced by the host application (tar format).

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use tar::Archive;

use crate::error::{Result, SweepError};

/// Export members under this prefix are attachments, not records
const RESERVED_PREFIX: &str = "resources/";

/// Read the set of record identifiers referenced by an export archive.
///
/// Each member name outside the `resources/` subtree contributes its first
/// `id_length` characters. Members with shorter or non-UTF8 names contribute
/// nothing. An unreadable or malformed archive is fatal.
pub fn export_ids(path: &Path, id_length: usize) -> Result<HashSet<String>> {
    let file = File::open(path).map_err(|e| SweepError::ArchiveRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut archive = Archive::new(file);
    let entries = archive.entries().map_err(|e| SweepError::ArchiveRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut ids = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| SweepError::ArchiveRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let member = entry.path().map_err(|e| SweepError::ArchiveRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let Some(name) = member.to_str() else {
            continue;
        };
        if name.starts_with(RESERVED_PREFIX) {
            continue;
        }

        if name.chars().count() >= id_length {
            ids.insert(name.chars().take(id_length).collect());
        }
    }

    tracing::debug!(path = %path.display(), count = ids.len(), "read export ids");
    Ok(ids)
}
