//! Backup of the sync directory before any disposal, with LIFO rotation of
//! prior backups (`<stem>.1.tgz` newest through `<stem>.5.tgz` oldest).

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, SweepError};

/// Rotated backups kept besides the current one
const MAX_ROTATIONS: u32 = 5;

/// Create a gzipped tar of the sync directory at `config.backup_file`,
/// excluding the orphan archive subtree. An existing backup is rotated
/// first; the archive falling off slot 5 is evicted with a warning.
pub fn backup(config: &Config) -> Result<()> {
    if !config.sync_dir.is_dir() {
        return Err(SweepError::SyncDirNotFound {
            path: config.sync_dir.clone(),
        });
    }

    if config.backup_file.is_file() {
        rotate(&config.backup_file)?;
    }

    create_archive(config).map_err(|e| SweepError::Backup(e.to_string()))?;
    tracing::info!(file = %config.backup_file.display(), "backup written");
    Ok(())
}

/// Shift every rotated backup up one slot and move the current backup into
/// slot 1
fn rotate(backup_file: &Path) -> Result<()> {
    let oldest = rotated_path(backup_file, MAX_ROTATIONS);
    if oldest.is_file() {
        tracing::warn!(
            file = %oldest.display(),
            "backups are piling up, evicting the oldest"
        );
        fs::remove_file(&oldest)?;
    }

    for n in (1..MAX_ROTATIONS).rev() {
        let from = rotated_path(backup_file, n);
        if from.is_file() {
            fs::rename(&from, rotated_path(backup_file, n + 1))?;
        }
    }

    fs::rename(backup_file, rotated_path(backup_file, 1))?;
    Ok(())
}

/// `/path/backup.tgz` -> `/path/backup.<n>.tgz`
fn rotated_path(backup_file: &Path, n: u32) -> PathBuf {
    let mut name = backup_file.with_extension("").into_os_string();
    name.push(format!(".{}.tgz", n));
    PathBuf::from(name)
}

fn create_archive(config: &Config) -> std::io::Result<()> {
    let file = File::create(&config.backup_file)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for entry in WalkDir::new(&config.sync_dir) {
        let entry = entry.map_err(std::io::Error::other)?;
        let path = entry.path();

        // Leave any previously archived orphans out of the backup.
        if path
            .components()
            .any(|c| c.as_os_str() == config.archive_dir_name.as_str())
        {
            continue;
        }

        if path.is_file() {
            let name = path
                .strip_prefix(&config.sync_dir)
                .map_err(std::io::Error::other)?;
            builder.append_path_with_name(path, name)?;
        }
    }

    builder.into_inner()?.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn test_config(root: &Path) -> Config {
        let sync_dir = root.join("sync");
        fs::create_dir_all(&sync_dir).unwrap();
        Config {
            sync_dir,
            backup_file: root.join("backup.tgz"),
            ..Config::default()
        }
    }

    fn backup_names(root: &Path) -> BTreeSet<String> {
        fs::read_dir(root)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".tgz"))
            .collect()
    }

    fn archive_members(path: &Path) -> BTreeSet<String> {
        let decoder = flate2::read::GzDecoder::new(File::open(path).unwrap());
        let mut archive = tar::Archive::new(decoder);
        archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn backup_excludes_orphan_archive_subtree() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());

        fs::write(config.sync_dir.join("a.md"), "a").unwrap();
        fs::write(config.sync_dir.join("b.md"), "b").unwrap();
        fs::create_dir_all(config.archive_dir()).unwrap();
        fs::write(config.archive_dir().join("old.md"), "old").unwrap();

        backup(&config).unwrap();

        assert_eq!(
            archive_members(&config.backup_file),
            BTreeSet::from(["a.md".to_string(), "b.md".to_string()])
        );
    }

    #[test]
    fn rotation_shifts_each_index_up_by_one() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        fs::write(config.sync_dir.join("a.md"), "a").unwrap();

        // Current backup plus three rotated ones.
        fs::write(&config.backup_file, "current").unwrap();
        for n in 1..=3 {
            fs::write(rotated_path(&config.backup_file, n), format!("gen{}", n)).unwrap();
        }

        backup(&config).unwrap();

        assert_eq!(
            backup_names(root.path()),
            BTreeSet::from([
                "backup.tgz".to_string(),
                "backup.1.tgz".to_string(),
                "backup.2.tgz".to_string(),
                "backup.3.tgz".to_string(),
                "backup.4.tgz".to_string(),
            ])
        );
        // The previous current backup now occupies slot 1.
        assert_eq!(
            fs::read_to_string(rotated_path(&config.backup_file, 1)).unwrap(),
            "current"
        );
        assert_eq!(
            fs::read_to_string(rotated_path(&config.backup_file, 4)).unwrap(),
            "gen3"
        );
    }

    #[test]
    fn rotation_evicts_slot_five() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        fs::write(config.sync_dir.join("a.md"), "a").unwrap();

        fs::write(&config.backup_file, "current").unwrap();
        for n in 1..=5 {
            fs::write(rotated_path(&config.backup_file, n), format!("gen{}", n)).unwrap();
        }

        backup(&config).unwrap();

        // Still five rotated backups; the old gen5 is gone.
        assert_eq!(backup_names(root.path()).len(), 6);
        assert_eq!(
            fs::read_to_string(rotated_path(&config.backup_file, 5)).unwrap(),
            "gen4"
        );
    }

    #[test]
    fn first_backup_needs_no_rotation() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        fs::write(config.sync_dir.join("a.md"), "a").unwrap();

        backup(&config).unwrap();

        assert_eq!(
            backup_names(root.path()),
            BTreeSet::from(["backup.tgz".to_string()])
        );
    }
}
