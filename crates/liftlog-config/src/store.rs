//! Local log store configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the libSQL database file. Empty means the platform data dir.
    #[serde(default)]
    pub path: String,

    /// How long a write waits for another process holding the database lock.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Resolve the database path, falling back to
    /// `<data_dir>/liftlog/liftlog.db`, then `./liftlog.db`.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if !self.path.is_empty() {
            return PathBuf::from(&self.path);
        }
        dirs::data_dir().map_or_else(
            || PathBuf::from("liftlog.db"),
            |dir| dir.join("liftlog").join("liftlog.db"),
        )
    }
}
