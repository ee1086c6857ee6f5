use anyhow::Result;
use std::path::Path;

#[cfg(windows)]
use anyhow::Context;

use crate::endpoint::Direction;
use crate::system::traits::{
    AudioEndpointInterface, FileSystemInterface, PreferenceStoreInterface, SystemClockInterface,
};

#[cfg(windows)]
use crate::endpoint::mmdevice::DeviceEnumerator;

/// Production implementation of AudioEndpointInterface using the MMDevice API
#[cfg(windows)]
pub struct WindowsAudioSystem {
    enumerator: DeviceEnumerator,
}

#[cfg(windows)]
impl WindowsAudioSystem {
    pub fn new() -> Result<Self> {
        Ok(Self {
            enumerator: DeviceEnumerator::new()?,
        })
    }
}

#[cfg(windows)]
impl AudioEndpointInterface for WindowsAudioSystem {
    fn default_endpoint_id(&self, direction: Direction) -> Result<String> {
        self.enumerator.default_endpoint_id(direction)
    }

    fn resolve_friendly_name(&self, endpoint_id: &str) -> Result<String> {
        self.enumerator.friendly_name(endpoint_id)
    }
}

/// Stand-in audio system for platforms without the MMDevice API
#[cfg(not(windows))]
pub struct UnsupportedAudioSystem;

#[cfg(not(windows))]
impl UnsupportedAudioSystem {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
}

#[cfg(not(windows))]
impl AudioEndpointInterface for UnsupportedAudioSystem {
    fn default_endpoint_id(&self, direction: Direction) -> Result<String> {
        Err(anyhow::anyhow!(
            "default {} endpoint queries require Windows",
            direction
        ))
    }

    fn resolve_friendly_name(&self, _endpoint_id: &str) -> Result<String> {
        Err(anyhow::anyhow!("endpoint name lookup requires Windows"))
    }
}

/// Production implementation of PreferenceStoreInterface over HKEY_CURRENT_USER
#[cfg(windows)]
pub struct RegistryPreferenceStore {
    subkey: String,
}

#[cfg(windows)]
impl RegistryPreferenceStore {
    pub fn new(subkey: &str) -> Self {
        Self {
            subkey: subkey.to_string(),
        }
    }

    fn open_read(&self) -> std::io::Result<winreg::RegKey> {
        winreg::RegKey::predef(winreg::enums::HKEY_CURRENT_USER).open_subkey(&self.subkey)
    }
}

#[cfg(windows)]
impl PreferenceStoreInterface for RegistryPreferenceStore {
    fn namespace_exists(&self) -> Result<bool> {
        match self.open_read() {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to open registry key {}", self.subkey))
            }
        }
    }

    fn read_value(&self, name: &str) -> Result<Option<String>> {
        let key = match self.open_read() {
            Ok(key) => key,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open registry key {}", self.subkey));
            }
        };

        match key.get_value::<String, _>(name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read registry value {name}")),
        }
    }

    fn write_value(&self, name: &str, value: &str) -> Result<()> {
        let key = winreg::RegKey::predef(winreg::enums::HKEY_CURRENT_USER)
            .open_subkey_with_flags(&self.subkey, winreg::enums::KEY_SET_VALUE)
            .with_context(|| {
                format!("Failed to open registry key {} for writing", self.subkey)
            })?;

        key.set_value(name, &value)
            .with_context(|| format!("Failed to write registry value {name}"))
    }
}

/// Stand-in preference store for platforms without the Windows registry
#[cfg(not(windows))]
pub struct UnsupportedPreferenceStore;

#[cfg(not(windows))]
impl UnsupportedPreferenceStore {
    pub fn new(_subkey: &str) -> Self {
        Self
    }
}

#[cfg(not(windows))]
impl PreferenceStoreInterface for UnsupportedPreferenceStore {
    fn namespace_exists(&self) -> Result<bool> {
        Err(anyhow::anyhow!("the preference store requires the Windows registry"))
    }

    fn read_value(&self, _name: &str) -> Result<Option<String>> {
        Err(anyhow::anyhow!("the preference store requires the Windows registry"))
    }

    fn write_value(&self, _name: &str, _value: &str) -> Result<()> {
        Err(anyhow::anyhow!("the preference store requires the Windows registry"))
    }
}

/// Production implementation of FileSystemInterface using std::fs
pub struct StandardFileSystem;

impl FileSystemInterface for StandardFileSystem {
    fn read_config_file(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))
    }

    fn write_config_file(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write config file: {}", e))
    }

    fn config_file_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_config_dir(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .map_err(|e| anyhow::anyhow!("Failed to create config directory: {}", e))
    }
}

/// Production clock backed by std::thread::sleep
pub struct SystemClock;

impl SystemClockInterface for SystemClock {
    fn sleep_ms(&self, milliseconds: u64) {
        std::thread::sleep(std::time::Duration::from_millis(milliseconds));
    }
}

// Platform-resolved adapter types used by the production constructors
#[cfg(windows)]
pub type DefaultAudioSystem = WindowsAudioSystem;
#[cfg(not(windows))]
pub type DefaultAudioSystem = UnsupportedAudioSystem;

#[cfg(windows)]
pub type DefaultPreferenceStore = RegistryPreferenceStore;
#[cfg(not(windows))]
pub type DefaultPreferenceStore = UnsupportedPreferenceStore;

// Default implementations for production use
impl Default for StandardFileSystem {
    fn default() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self
    }
}
