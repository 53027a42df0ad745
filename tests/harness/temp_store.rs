use std::path::PathBuf;

use lotwatch::adapter::outbound::store::FileSeenStore;
use tempfile::TempDir;

/// File-backed store inside a private temporary directory.
pub struct TempStore {
    dir: TempDir,
}

impl TempStore {
    pub fn create() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("valve_index.json")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.path().join("valve_index.json.lock")
    }

    pub fn store(&self) -> FileSeenStore {
        FileSeenStore::new(self.path())
    }
}
