//! Seen-listings store configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

fn default_store_path() -> PathBuf {
    PathBuf::from("valve_index.json")
}

const fn default_lock_stale_secs() -> u64 {
    600
}

/// Location of the durable store and its cycle lock.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Defaults to the store path with `.lock` appended.
    #[serde(default)]
    pub lock_path: Option<PathBuf>,
    /// Age after which a leftover lock file is taken over.
    #[serde(default = "default_lock_stale_secs")]
    pub lock_stale_secs: u64,
}

impl StoreConfig {
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.lock_path.clone().unwrap_or_else(|| {
            let mut name = self.path.clone().into_os_string();
            name.push(".lock");
            PathBuf::from(name)
        })
    }

    #[must_use]
    pub const fn lock_stale_after(&self) -> Duration {
        Duration::from_secs(self.lock_stale_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            lock_path: None,
            lock_stale_secs: default_lock_stale_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_path_defaults_next_to_store() {
        let config = StoreConfig {
            path: PathBuf::from("data/valve_index.json"),
            ..Default::default()
        };
        assert_eq!(config.lock_path(), PathBuf::from("data/valve_index.json.lock"));
    }

    #[test]
    fn explicit_lock_path_wins() {
        let config = StoreConfig {
            lock_path: Some(PathBuf::from("/tmp/lotwatch.lock")),
            ..Default::default()
        };
        assert_eq!(config.lock_path(), PathBuf::from("/tmp/lotwatch.lock"));
    }
}
