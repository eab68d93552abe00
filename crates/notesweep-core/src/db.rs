//! Authoritative set loader backed by the host application's SQLite database
//!
//! All access is read-only; disposal never mutates the database.

use std::collections::HashSet;

use rusqlite::{Connection, OpenFlags};

use crate::config::Config;
use crate::error::{Result, SweepError};

/// Read-only handle on the host application's database
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database named by the config.
    ///
    /// The containing directory must exist (e.g. an encrypted container may
    /// not be mounted); a missing directory is a fatal storage error.
    pub fn open(config: &Config) -> Result<Self> {
        if !config.database_dir.is_dir() {
            return Err(SweepError::DatabaseDirNotFound {
                path: config.database_dir.clone(),
            });
        }

        let conn = Connection::open_with_flags(
            config.db_path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Database { conn })
    }

    /// Identifiers of all revision records
    pub fn revision_ids(&self) -> Result<HashSet<String>> {
        self.select_ids("SELECT id FROM revisions")
    }

    /// Identifiers of all tag and note-tag records (one combined set)
    pub fn tag_ids(&self) -> Result<HashSet<String>> {
        let mut ids = self.select_ids("SELECT id FROM tags")?;
        ids.extend(self.select_ids("SELECT id FROM note_tags")?);
        Ok(ids)
    }

    fn select_ids(&self, sql: &str) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ids = HashSet::new();
        for row in rows {
            ids.insert(row?);
        }

        tracing::debug!(query = sql, count = ids.len(), "loaded authoritative ids");
        Ok(ids)
    }
}
