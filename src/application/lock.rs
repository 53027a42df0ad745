//! Single-writer lock around one cycle.
//!
//! The load, mutate and save of the seen set must not interleave between
//! overlapping invocations. The lock is a file created exclusively next to
//! the store. It holds a token unique to one acquisition, and a guard only
//! removes the file while it still holds that token.
//!
//! A lock file older than the stale limit is assumed to belong to a crashed
//! run. Takeover renames it aside to a unique name first, so of two runs
//! racing for the same stale file only one wins it.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use crate::error::LockError;

/// Lock file location and staleness policy.
#[derive(Debug, Clone)]
pub struct CycleLock {
    path: PathBuf,
    stale_after: Duration,
}

/// Held lock; releases on drop if still owned.
#[derive(Debug)]
pub struct CycleLockGuard {
    path: PathBuf,
    token: String,
}

impl CycleLockGuard {
    /// Token written into the lock file by this acquisition.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

fn new_token() -> String {
    format!("{}:{:016x}", std::process::id(), rand::random::<u64>())
}

impl CycleLock {
    pub fn new(path: impl Into<PathBuf>, stale_after: Duration) -> Self {
        Self {
            path: path.into(),
            stale_after,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the lock or report who holds it.
    pub fn acquire(&self) -> Result<CycleLockGuard, LockError> {
        match self.try_create() {
            Err(LockError::Held { .. }) if self.is_stale() => {
                self.take_over_stale()?;
                self.try_create()
            }
            other => other,
        }
    }

    fn try_create(&self) -> Result<CycleLockGuard, LockError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_err(source))?;
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Err(self.held()),
            Err(source) => return Err(self.io_err(source)),
        };

        let token = new_token();
        if let Err(source) = writeln!(file, "{token}").and_then(|()| file.sync_all()) {
            drop(file);
            let _ = fs::remove_file(&self.path);
            return Err(self.io_err(source));
        }

        debug!(path = %self.path.display(), token = %token, "Cycle lock acquired");
        Ok(CycleLockGuard {
            path: self.path.clone(),
            token,
        })
    }

    /// Move a stale lock file out of the way.
    ///
    /// The rename is atomic, so only one contender captures the file. If
    /// the captured file turns out to be fresh (a racing run replaced the
    /// stale one first), it is linked back and the lock counts as held.
    fn take_over_stale(&self) -> Result<(), LockError> {
        let observed = read_token(&self.path);
        let aside = self.aside_path();

        match fs::rename(&self.path, &aside) {
            Ok(()) => {}
            // Someone else took it over or released it; just retry the create.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(source) => return Err(self.io_err(source)),
        }

        let captured = read_token(&aside);
        if captured != observed || !is_older_than(&aside, self.stale_after) {
            if fs::hard_link(&aside, &self.path).is_err() {
                warn!(path = %self.path.display(), "Could not restore a live cycle lock");
            }
            let _ = fs::remove_file(&aside);
            return Err(self.held());
        }

        warn!(
            path = %self.path.display(),
            previous = captured.as_deref().unwrap_or("?"),
            "Took over stale cycle lock"
        );
        let _ = fs::remove_file(&aside);
        Ok(())
    }

    fn aside_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".stale-{:016x}", rand::random::<u64>()));
        PathBuf::from(name)
    }

    fn is_stale(&self) -> bool {
        is_older_than(&self.path, self.stale_after)
    }

    fn held(&self) -> LockError {
        LockError::Held {
            path: self.path.clone(),
        }
    }

    fn io_err(&self, source: std::io::Error) -> LockError {
        LockError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn read_token(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|contents| contents.trim().to_string())
}

fn is_older_than(path: &Path, limit: Duration) -> bool {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age > limit)
}

impl Drop for CycleLockGuard {
    fn drop(&mut self) {
        match read_token(&self.path) {
            Some(current) if current == self.token => {
                if let Err(e) = fs::remove_file(&self.path) {
                    warn!(path = %self.path.display(), error = %e, "Failed to release cycle lock");
                }
            }
            Some(_) => {
                warn!(path = %self.path.display(), "Cycle lock was taken over, leaving it in place");
            }
            None => {
                debug!(path = %self.path.display(), "Cycle lock already gone");
            }
        }
    }
}
