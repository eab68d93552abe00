//! Error types and exit codes for notesweep
//!
//! Exit codes:
//! - 0: Success (including "fully in sync" / nothing to do)
//! - 1: Generic failure (I/O, SQL, unreadable archive)
//! - 2: Usage error (bad flags/args)
//! - 3: Storage unavailable (database or sync directory not mounted/found)
//! - 4: Host application active (guard trip)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Storage unavailable - database or sync dir unreachable (3)
    Storage = 3,
    /// Host application running - refusing to touch its data (4)
    HostActive = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during a notesweep run
#[derive(Error, Debug)]
pub enum SweepError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("--format may only be specified once")]
    DuplicateFormat,

    #[error("{0}")]
    UsageError(String),

    // Storage preconditions (exit code 3)
    #[error("database directory not found: {path:?} (is the container mounted?)")]
    DatabaseDirNotFound { path: PathBuf },

    #[error("sync directory not found: {path:?}")]
    SyncDirNotFound { path: PathBuf },

    // Guard trip (exit code 4)
    #[error("host application '{process}' appears to be running; close it before cleaning up")]
    HostApplicationActive { process: String },

    // Generic failures (exit code 1)
    #[error("failed to read export archive {path:?}: {reason}")]
    ArchiveRead { path: PathBuf, reason: String },

    #[error("backup failed: {0}")]
    Backup(String),

    #[error("file scan failed: {0}")]
    Scan(String),

    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SweepError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SweepError::UnknownFormat(_)
            | SweepError::DuplicateFormat
            | SweepError::UsageError(_) => ExitCode::Usage,

            SweepError::DatabaseDirNotFound { .. } | SweepError::SyncDirNotFound { .. } => {
                ExitCode::Storage
            }

            SweepError::HostApplicationActive { .. } => ExitCode::HostActive,

            SweepError::ArchiveRead { .. }
            | SweepError::Backup(_)
            | SweepError::Scan(_)
            | SweepError::Sql(_)
            | SweepError::InvalidConfig { .. }
            | SweepError::Io(_)
            | SweepError::Json(_)
            | SweepError::Other(_) => ExitCode::Failure,
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            SweepError::UnknownFormat(_) => "unknown_format",
            SweepError::DuplicateFormat => "duplicate_format",
            SweepError::UsageError(_) => "usage_error",
            SweepError::DatabaseDirNotFound { .. } => "database_dir_not_found",
            SweepError::SyncDirNotFound { .. } => "sync_dir_not_found",
            SweepError::HostApplicationActive { .. } => "host_application_active",
            SweepError::ArchiveRead { .. } => "archive_read",
            SweepError::Backup(_) => "backup_failed",
            SweepError::Scan(_) => "scan_failed",
            SweepError::Sql(_) => "sql_error",
            SweepError::InvalidConfig { .. } => "invalid_config",
            SweepError::Io(_) => "io_error",
            SweepError::Json(_) => "json_error",
            SweepError::Other(_) => "other",
        }
    }
}

/// Result type alias for notesweep operations
pub type Result<T> = std::result::Result<T, SweepError>;
