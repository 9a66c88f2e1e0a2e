//! Versioned, swappable configuration
//!
//! Every analysis pins one `ConfigSnapshot` for its whole run. Reloading
//! builds and validates a new snapshot first and then swaps the pointer, so
//! in-flight analyses never observe a half-applied change.

use super::file::load_config;
use super::settings::EngineConfig;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

/// A validated configuration together with its version number
#[derive(Debug)]
pub struct ConfigSnapshot {
    version: u64,
    config: EngineConfig,
}

impl ConfigSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Shared handle to the current configuration snapshot
#[derive(Debug, Clone)]
pub struct SharedConfig {
    current: Arc<RwLock<Arc<ConfigSnapshot>>>,
}

impl SharedConfig {
    /// Start at version 1
    pub fn new(config: EngineConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(ConfigSnapshot { version: 1, config }))),
        }
    }

    /// The snapshot in effect right now
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&*self.current.read())
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Install an already validated configuration, returning its version
    pub fn replace(&self, config: EngineConfig) -> u64 {
        let mut current = self.current.write();
        let version = current.version + 1;
        *current = Arc::new(ConfigSnapshot { version, config });
        log::info!("Configuration updated to version {}", version);
        version
    }

    /// Load `path` and install it. A file that fails to load or validate
    /// leaves the current snapshot untouched.
    pub fn reload_from(&self, path: &Path) -> anyhow::Result<u64> {
        let config = load_config(path)?;
        Ok(self.replace(config))
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
