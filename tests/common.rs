use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn notesweep() -> Command {
    cargo_bin_cmd!("notesweep")
}

/// Process name no host guard should ever find
pub const NO_SUCH_PROCESS: &str = "notesweep-test-ghost-process";

/// A temporary data store: database directory plus sync directory
pub struct Fixture {
    pub root: tempfile::TempDir,
    pub database_dir: PathBuf,
    pub sync_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let database_dir = root.path().join("joplin-desktop");
        let sync_dir = root.path().join("sync");
        fs::create_dir_all(&database_dir).unwrap();
        fs::create_dir_all(&sync_dir).unwrap();
        Self {
            root,
            database_dir,
            sync_dir,
        }
    }

    /// Create the SQLite database with the given revision and tag ids
    pub fn seed_db(&self, revisions: &[&str], tags: &[&str], note_tags: &[&str]) {
        let conn = rusqlite::Connection::open(self.database_dir.join("database.sqlite")).unwrap();
        conn.execute_batch(
            "CREATE TABLE revisions (id TEXT PRIMARY KEY);
             CREATE TABLE tags (id TEXT PRIMARY KEY);
             CREATE TABLE note_tags (id TEXT PRIMARY KEY);",
        )
        .unwrap();

        for id in revisions {
            conn.execute("INSERT INTO revisions (id) VALUES (?1)", [id])
                .unwrap();
        }
        for id in tags {
            conn.execute("INSERT INTO tags (id) VALUES (?1)", [id])
                .unwrap();
        }
        for id in note_tags {
            conn.execute("INSERT INTO note_tags (id) VALUES (?1)", [id])
                .unwrap();
        }
    }

    /// Write a content file carrying the revision type marker
    pub fn write_revision_file(&self, id: &str) {
        fs::write(
            self.sync_dir.join(format!("{}.md", id)),
            format!("{}\n\nrevision payload\ntype_: 13\n", id),
        )
        .unwrap();
    }

    /// Write a content file without the revision marker
    #[allow(dead_code)]
    pub fn write_note_file(&self, id: &str) {
        fs::write(
            self.sync_dir.join(format!("{}.md", id)),
            format!("{}\n\nnote payload\ntype_: 1\n", id),
        )
        .unwrap();
    }

    /// Write a plain file (used as a would-be tag counterpart)
    #[allow(dead_code)]
    pub fn write_plain_file(&self, name: &str) {
        fs::write(self.sync_dir.join(name), "payload").unwrap();
    }

    /// Base command with this fixture's paths and a guard that never trips
    pub fn cmd(&self) -> Command {
        let mut cmd = notesweep();
        cmd.arg("--database-dir")
            .arg(&self.database_dir)
            .arg("--sync-dir")
            .arg(&self.sync_dir)
            .arg("--host-process")
            .arg(NO_SUCH_PROCESS);
        cmd
    }

    pub fn sync_file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.sync_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Build a tar export archive with the given member names
#[allow(dead_code)]
pub fn write_export(path: &Path, members: &[&str]) {
    let file = fs::File::create(path).unwrap();
    let mut builder = tar::Builder::new(file);

    for name in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(4);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, &b"body"[..]).unwrap();
    }

    builder.finish().unwrap();
}
