//! Config loading, validation, and path helpers.

use super::model::Config;
use super::types::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, expand_home};
use crate::error::{MgrError, Result};
use crate::scan::ScanExclude;
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(MgrError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            MgrError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config the process should run with.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when it exists and built-in defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/git-mgr/config.yaml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| MgrError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            MgrError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `threads` must be at least 1
    /// - `history_file` must be non-empty when `history` is on
    /// - `scan_exclude` entries must be valid globs
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(MgrError::ConfigError(
                "threads must be at least 1".to_string(),
            ));
        }

        if self.history && self.history_file.trim().is_empty() {
            return Err(MgrError::ConfigError(
                "history_file must be non-empty when history is enabled".to_string(),
            ));
        }

        ScanExclude::new(&self.scan_exclude)?;
        Ok(())
    }

    /// Compiled `scan_exclude` patterns.
    pub fn scan_exclude(&self) -> Result<ScanExclude> {
        ScanExclude::new(&self.scan_exclude)
    }

    /// Expanded history file path, or `None` when history is disabled.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history.then(|| expand_home(&self.history_file))
    }

    /// Expanded startup script path, if one is configured.
    pub fn startup_script_path(&self) -> Option<PathBuf> {
        self.startup_script.as_deref().map(expand_home)
    }
}
