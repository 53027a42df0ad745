//! File-backed seen-listings store.
//!
//! The set is kept as a single JSON document. Saves go to a temporary file
//! next to the target which is then renamed over it, so a crash mid-write
//! leaves the previous version intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{ListingKey, SeenListings};
use crate::error::PersistenceError;
use crate::port::SeenStore;

/// Current store file format version.
const STORE_VERSION: u32 = 1;

#[derive(Serialize)]
struct StoreFileRef<'a> {
    version: u32,
    updated_at: DateTime<Utc>,
    listings: Vec<&'a ListingKey>,
}

#[derive(Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    listings: Vec<ListingKey>,
}

/// [`SeenStore`] persisted to one JSON file at a fixed path.
#[derive(Debug, Clone)]
pub struct FileSeenStore {
    path: PathBuf,
}

impl FileSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_err(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl SeenStore for FileSeenStore {
    fn load(&self) -> Result<SeenListings, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No store file yet, starting empty");
                return Ok(SeenListings::new());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let file: StoreFile =
            serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Decode {
                path: self.path.clone(),
                source,
            })?;

        if file.version != STORE_VERSION {
            return Err(PersistenceError::Version {
                found: file.version,
                expected: STORE_VERSION,
            });
        }

        debug!(
            path = %self.path.display(),
            count = file.listings.len(),
            updated_at = ?file.updated_at,
            "Loaded seen listings"
        );

        Ok(file.listings.into_iter().collect())
    }

    fn save(&self, seen: &SeenListings) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec_pretty(&StoreFileRef {
            version: STORE_VERSION,
            updated_at: Utc::now(),
            listings: seen.sorted_keys(),
        })
        .map_err(PersistenceError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;
        }

        let temp_path = self.temp_path();
        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            self.write_err(e)
        };

        let mut file = fs::File::create(&temp_path).map_err(|e| self.write_err(e))?;
        file.write_all(&json).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        debug!(path = %self.path.display(), count = seen.len(), "Saved seen listings");
        Ok(())
    }
}
