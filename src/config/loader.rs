use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::system::FileSystemInterface;

use super::types::Config;

/// Configuration loader that uses dependency injection for file system operations
pub struct ConfigLoader<F: FileSystemInterface> {
    file_system: F,
    config_path: PathBuf,
}

impl<F: FileSystemInterface> ConfigLoader<F> {
    pub fn new(file_system: F, config_path: PathBuf) -> Self {
        Self {
            file_system,
            config_path,
        }
    }

    /// Load configuration from the configured path
    pub fn load_config(&self) -> Result<Config> {
        debug!("Loading configuration from: {}", self.config_path.display());

        if !self.file_system.config_file_exists(&self.config_path) {
            info!("Configuration file not found, creating default configuration");
            return self.create_default_config();
        }

        let config_content = self
            .file_system
            .read_config_file(&self.config_path)
            .with_context(|| {
                format!(
                    "Failed to read configuration file: {}",
                    self.config_path.display()
                )
            })?;

        let config: Config = toml::from_str(&config_content).with_context(|| {
            format!(
                "Failed to parse configuration file: {}",
                self.config_path.display()
            )
        })?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Save configuration to the configured path
    pub fn save_config(&self, config: &Config) -> Result<()> {
        debug!("Saving configuration to: {}", self.config_path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = self.config_path.parent() {
            self.file_system
                .create_config_dir(parent)
                .with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
        }

        let config_content =
            toml::to_string_pretty(config).context("Failed to serialize configuration")?;

        self.file_system
            .write_config_file(&self.config_path, &config_content)
            .with_context(|| {
                format!(
                    "Failed to write configuration file: {}",
                    self.config_path.display()
                )
            })?;

        info!("Configuration saved to: {}", self.config_path.display());
        Ok(())
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// Check if the configuration file exists
    pub fn config_exists(&self) -> bool {
        self.file_system.config_file_exists(&self.config_path)
    }

    /// Create and save a default configuration
    fn create_default_config(&self) -> Result<Config> {
        let config = Config::default();

        // Try to create parent directories, but don't fail if we can't
        if let Some(parent) = self.config_path.parent() {
            if let Err(e) = self.file_system.create_config_dir(parent) {
                warn!(
                    "Could not create config directory {}: {}. Using default config without saving.",
                    parent.display(),
                    e
                );
                return Ok(config);
            }
        }

        // Try to save the config, but don't fail if we can't
        if let Err(e) = self.save_config(&config) {
            warn!(
                "Could not save default config to {}: {}. Using default config.",
                self.config_path.display(),
                e
            );
            return Ok(config);
        }

        info!(
            "Created default configuration file: {}",
            self.config_path.display()
        );
        Ok(config)
    }

    /// Get reference to the file system (for testing)
    #[cfg(any(test, feature = "test-mocks"))]
    #[allow(dead_code)]
    pub fn get_file_system(&self) -> &F {
        &self.file_system
    }
}

// Convenience constructor for production use with StandardFileSystem
impl ConfigLoader<crate::system::StandardFileSystem> {
    pub fn new_production(config_path: PathBuf) -> Self {
        Self::new(crate::system::StandardFileSystem, config_path)
    }

    /// Create a production config loader with the default path
    pub fn new_with_default_path() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self::new_production(config_path))
    }

    /// Get the default configuration path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get user config directory")?;
        Ok(config_dir.join("audio-endpoint-reconciler/config.toml"))
    }
}
