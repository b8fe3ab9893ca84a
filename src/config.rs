use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Detector configuration. Every option has a hard-coded default, so an
/// absent or partial config file is never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Consult the Tor exit-node list during classification.
    pub enable_tor_detection: bool,

    /// How long a fetched exit-node list stays fresh, in seconds.
    pub tor_cache_duration: u64,

    /// Source of the free-text exit-node listing.
    pub tor_exit_node_url: String,

    /// Upper bound on a single exit-node list fetch, in seconds.
    pub tor_fetch_timeout: u64,

    /// Scan the user-agent for known crawlers.
    pub enable_robot_detection: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enable_tor_detection: true,
            tor_cache_duration: 3600,
            tor_exit_node_url: "https://check.torproject.org/exit-addresses".to_string(),
            tor_fetch_timeout: 10,
            enable_robot_detection: true,
        }
    }
}

impl DetectorConfig {
    /// Load a config from a YAML file. Missing keys fall back to defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub(crate) fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.tor_cache_duration)
    }

    pub(crate) fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.tor_fetch_timeout)
    }
}
