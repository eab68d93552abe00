//! Run configuration for notesweep
//!
//! Settings are resolved once at startup (TOML file, then CLI overrides) and
//! passed by reference into each component. There are no ambient globals and
//! no reconfiguration during a run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dispose::DisposalMode;
use crate::error::{Result, SweepError};

/// Fixed identifier length used by the host application (32 hex characters).
pub const DEFAULT_ID_LENGTH: usize = 32;

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing the host application's SQLite database
    #[serde(default = "default_database_dir")]
    pub database_dir: PathBuf,

    /// Database file name inside `database_dir`
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Local sync directory holding one content file per record
    #[serde(default = "default_sync_dir")]
    pub sync_dir: PathBuf,

    /// Subdirectory of `sync_dir` that orphans are archived into
    #[serde(default = "default_archive_dir_name")]
    pub archive_dir_name: String,

    /// Path of the backup archive (`.tgz`)
    #[serde(default = "default_backup_file")]
    pub backup_file: PathBuf,

    /// Whether to back up the sync directory before disposing of anything
    #[serde(default = "default_backup")]
    pub backup: bool,

    /// Identifier length (filename stems and export member prefixes)
    #[serde(default = "default_id_length")]
    pub id_length: usize,

    /// Process name checked by the host-application guard
    #[serde(default = "default_host_process")]
    pub host_process: String,

    /// Report the disposal plan without mutating anything
    #[serde(default)]
    pub dry_run: bool,

    /// What to do with orphan candidates when executing
    #[serde(default)]
    pub disposal: DisposalMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_dir: default_database_dir(),
            database_name: default_database_name(),
            sync_dir: default_sync_dir(),
            archive_dir_name: default_archive_dir_name(),
            backup_file: default_backup_file(),
            backup: default_backup(),
            id_length: default_id_length(),
            host_process: default_host_process(),
            dry_run: false,
            disposal: DisposalMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SweepError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SweepError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Full path of the SQLite database file
    pub fn db_path(&self) -> PathBuf {
        self.database_dir.join(&self.database_name)
    }

    /// Full path of the orphan archive subdirectory
    pub fn archive_dir(&self) -> PathBuf {
        self.sync_dir.join(&self.archive_dir_name)
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_database_dir() -> PathBuf {
    home_dir().join(".config").join("joplin-desktop")
}

fn default_database_name() -> String {
    "database.sqlite".to_string()
}

fn default_sync_dir() -> PathBuf {
    home_dir().join("Joplin")
}

fn default_archive_dir_name() -> String {
    ".orphaned_revisions_archive".to_string()
}

fn default_backup_file() -> PathBuf {
    home_dir().join("notesweep_backup.tgz")
}

fn default_backup() -> bool {
    true
}

fn default_id_length() -> usize {
    DEFAULT_ID_LENGTH
}

fn default_host_process() -> String {
    "joplin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "sync_dir = \"/data/notes\"\ndry_run = true\ndisposal = \"delete\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sync_dir, PathBuf::from("/data/notes"));
        assert!(config.dry_run);
        assert_eq!(config.disposal, DisposalMode::Delete);
        assert_eq!(config.id_length, DEFAULT_ID_LENGTH);
        assert_eq!(config.database_name, "database.sqlite");
    }

    #[test]
    fn malformed_toml_is_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sync_dir = [not toml").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, SweepError::InvalidConfig { .. }));
    }

    #[test]
    fn archive_dir_is_under_sync_dir() {
        let config = Config {
            sync_dir: PathBuf::from("/data/notes"),
            ..Config::default()
        };
        assert_eq!(
            config.archive_dir(),
            PathBuf::from("/data/notes/.orphaned_revisions_archive")
        );
    }
}
