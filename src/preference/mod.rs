use anyhow::Result;
use tracing::{debug, warn};

use crate::error::ReconcileError;
use crate::system::traits::PreferenceStoreInterface;

/// Value name for the application's resolved recording device
pub const ACTIVE_INPUT_DEVICE: &str = "ActiveRealRecordingDevice";
/// Value name for the user's preferred recording device name
pub const PREFERRED_INPUT_NAME: &str = "PreferredWaveInDeviceName";
/// Value name for the application's resolved playback device
pub const ACTIVE_OUTPUT_DEVICE: &str = "ActivePlaybackDevice";
/// Value name for the user's preferred playback device name
pub const PREFERRED_OUTPUT_NAME: &str = "PreferredWaveOutDeviceName";

/// All four device preference fields, in the order they're cleared
pub const DEVICE_FIELDS: [&str; 4] = [
    ACTIVE_INPUT_DEVICE,
    PREFERRED_INPUT_NAME,
    ACTIVE_OUTPUT_DEVICE,
    PREFERRED_OUTPUT_NAME,
];

/// Snapshot of the dependent application's audio device preference.
///
/// Individual values missing from the store read back as empty strings;
/// only a missing namespace distinguishes "never configured" from
/// "configured with blanks".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppAudioPreference {
    pub active_input_device: String,
    pub preferred_input_name: String,
    pub active_output_device: String,
    pub preferred_output_name: String,
}

/// Typed access to the application's preference namespace
pub struct PreferenceStore<P: PreferenceStoreInterface> {
    store: P,
}

impl<P: PreferenceStoreInterface> PreferenceStore<P> {
    pub fn new(store: P) -> Self {
        Self { store }
    }

    /// Read the current preference, or None when the namespace is absent
    pub fn read(&self) -> Result<Option<AppAudioPreference>> {
        if !self.store.namespace_exists()? {
            debug!("Preference namespace not present");
            return Ok(None);
        }

        Ok(Some(AppAudioPreference {
            active_input_device: self.read_field(ACTIVE_INPUT_DEVICE)?,
            preferred_input_name: self.read_field(PREFERRED_INPUT_NAME)?,
            active_output_device: self.read_field(ACTIVE_OUTPUT_DEVICE)?,
            preferred_output_name: self.read_field(PREFERRED_OUTPUT_NAME)?,
        }))
    }

    /// Blank every device field so the application re-resolves its devices
    /// from the system defaults.
    ///
    /// Clears are per-field, not transactional: a denied field is logged and
    /// the remaining fields are still written. Denied fields are collected
    /// into the returned error.
    pub fn clear_input_and_output(&self) -> Result<(), ReconcileError> {
        let mut denied = Vec::new();

        for field in DEVICE_FIELDS {
            match self.store.write_value(field, "") {
                Ok(()) => debug!("Cleared preference field {}", field),
                Err(e) => {
                    warn!("Could not clear preference field {}: {}", field, e);
                    denied.push(field);
                }
            }
        }

        if denied.is_empty() {
            Ok(())
        } else {
            Err(ReconcileError::WriteDenied {
                fields: denied.join(", "),
            })
        }
    }

    fn read_field(&self, name: &str) -> Result<String> {
        Ok(self.store.read_value(name)?.unwrap_or_default())
    }
}
