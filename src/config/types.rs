use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub preference: PreferenceConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
    pub log_to_file: bool,
    pub log_json: bool,
    pub keep_log_days: u64,
    pub log_dir: Option<PathBuf>, // None = platform-local data directory
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Substring looked for in endpoint friendly names, case-insensitive
    pub device_pattern: String,
    pub max_attempts: u32,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceConfig {
    /// Per-user subkey holding the application's device preference values
    pub registry_subkey: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub interactive: bool, // false suppresses all modal dialogs
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
            log_json: false,
            keep_log_days: 14,
            log_dir: None,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            device_pattern: "Sanas".to_string(),
            max_attempts: 5,
            poll_interval_ms: 3000,
        }
    }
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            registry_subkey: r"Software\Zoom\AudioSettings".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { interactive: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            detection: DetectionConfig::default(),
            preference: PreferenceConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Config {
    /// Reject configurations that would make a check run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.detection.device_pattern.trim().is_empty() {
            bail!("detection.device_pattern must not be empty");
        }
        if self.detection.max_attempts == 0 {
            bail!("detection.max_attempts must be at least 1");
        }
        if self.preference.registry_subkey.trim().is_empty() {
            bail!("preference.registry_subkey must not be empty");
        }
        Ok(())
    }
}

impl DetectionConfig {
    pub fn matches(&self, device_name: &str) -> bool {
        device_name
            .to_lowercase()
            .contains(&self.device_pattern.to_lowercase())
    }
}
