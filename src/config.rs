//! Host configuration loaded from TOML.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::data::tables::read_toml;
use crate::error::CacheError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Root of the static tables (`quests/`, `creatures/`, `communicator/`)
    pub data_dir: PathBuf,
    /// How often the reset clock is polled
    pub update_interval_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            update_interval_ms: 1000,
        }
    }
}

impl CacheConfig {
    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        if !path.exists() {
            warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let config: Self = read_toml(path)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn update_interval(&self) -> Duration {
        // interval() panics on zero
        Duration::from_millis(self.update_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = CacheConfig::load(&temp_dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.update_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quest-cache.toml");
        std::fs::write(&path, "data_dir = \"/srv/tables\"\n").unwrap();

        let config = CacheConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/tables"));
        assert_eq!(config.update_interval_ms, 1000);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = CacheConfig {
            update_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.update_interval(), Duration::from_millis(1));
    }
}
