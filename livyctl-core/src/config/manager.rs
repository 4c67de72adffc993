//! Locating and loading the configuration file.

use std::path::{Path, PathBuf};

use super::settings::LivySettings;
use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "LIVYCTL_CONFIG_DIR";

/// Name of the settings file inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the platform config directory
const APP_DIR_NAME: &str = "livyctl";

/// Locates and loads `livyctl` settings
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the default configuration directory
    ///
    /// Uses `$LIVYCTL_CONFIG_DIR` when set, otherwise `livyctl` under the
    /// platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no configuration directory can be
    /// determined.
    pub fn new() -> ConfigResult<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(Self::with_config_dir(PathBuf::from(dir)));
        }
        let base = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?;
        Ok(Self::with_config_dir(base.join(APP_DIR_NAME)))
    }

    /// Creates a manager for an explicit directory; a leading `~` is expanded
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        let config_dir = match config_dir.to_str() {
            Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
            None => config_dir,
        };
        Self { config_dir }
    }

    /// Configuration directory
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the settings file
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Loads settings, falling back to defaults when the file is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load_settings(&self) -> ConfigResult<LivySettings> {
        let path = self.settings_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(LivySettings::default());
        }

        let text = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;
        let settings = LivySettings::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }
}
