//! Test utility builders for creating detection results and configurations
//!
//! This module provides builder patterns for easily creating test data.
//! Individual methods may not be used by all tests, so dead code warnings are suppressed.

#![allow(dead_code)]

use audio_endpoint_reconciler::config::Config;
use audio_endpoint_reconciler::endpoint::DetectionResult;

/// Builder for creating test DetectionResult instances
pub struct DetectionResultBuilder {
    speaker_name: String,
    mic_name: String,
    attempts_used: u32,
    matched_both: bool,
}

impl DetectionResultBuilder {
    pub fn new() -> Self {
        Self {
            speaker_name: "Test Speakers".to_string(),
            mic_name: "Test Microphone".to_string(),
            attempts_used: 1,
            matched_both: false,
        }
    }

    pub fn speaker(mut self, name: &str) -> Self {
        self.speaker_name = name.to_string();
        self
    }

    pub fn mic(mut self, name: &str) -> Self {
        self.mic_name = name.to_string();
        self
    }

    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts_used = attempts;
        self
    }

    pub fn matched_both(mut self) -> Self {
        self.matched_both = true;
        self
    }

    pub fn build(self) -> DetectionResult {
        DetectionResult {
            speaker_name: self.speaker_name,
            mic_name: self.mic_name,
            attempts_used: self.attempts_used,
            matched_both: self.matched_both,
        }
    }
}

impl Default for DetectionResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test Config instances
pub struct ConfigBuilder {
    pattern: String,
    max_attempts: u32,
    poll_interval_ms: u64,
    interactive: bool,
    registry_subkey: String,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            pattern: "Sanas".to_string(),
            max_attempts: 5,
            // Tests use mock clocks, so the interval value is only recorded
            poll_interval_ms: 0,
            interactive: true,
            registry_subkey: r"Software\TestApp\AudioSettings".to_string(),
        }
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn registry_subkey(mut self, subkey: &str) -> Self {
        self.registry_subkey = subkey.to_string();
        self
    }

    pub fn build(self) -> Config {
        let mut config = Config::default();
        config.detection.device_pattern = self.pattern;
        config.detection.max_attempts = self.max_attempts;
        config.detection.poll_interval_ms = self.poll_interval_ms;
        config.notifications.interactive = self.interactive;
        config.preference.registry_subkey = self.registry_subkey;
        config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for creating common test scenarios
pub mod scenarios {
    use audio_endpoint_reconciler::endpoint::Direction;
    use audio_endpoint_reconciler::preference::{
        AppAudioPreference, ACTIVE_INPUT_DEVICE, ACTIVE_OUTPUT_DEVICE, PREFERRED_INPUT_NAME,
        PREFERRED_OUTPUT_NAME,
    };
    use audio_endpoint_reconciler::system::{MockAudioSystem, MockPreferenceStore};

    /// A preference still pointing at the onboard sound card
    pub fn realtek_preference() -> AppAudioPreference {
        AppAudioPreference {
            active_input_device: "Realtek Microphone Array".to_string(),
            preferred_input_name: "Realtek Microphone Array".to_string(),
            active_output_device: "Realtek Speakers".to_string(),
            preferred_output_name: "Realtek Speakers".to_string(),
        }
    }

    /// A preference already pointing at the target device
    pub fn target_preference() -> AppAudioPreference {
        AppAudioPreference {
            active_input_device: "Sanas Headset Microphone".to_string(),
            preferred_input_name: "Sanas Headset Microphone".to_string(),
            active_output_device: "Sanas Headset Earphone".to_string(),
            preferred_output_name: "Sanas Headset Earphone".to_string(),
        }
    }

    /// Store a preference the way the dependent application would
    pub fn seed_preference(store: &MockPreferenceStore, preference: &AppAudioPreference) {
        store.set_stored_value(ACTIVE_INPUT_DEVICE, &preference.active_input_device);
        store.set_stored_value(PREFERRED_INPUT_NAME, &preference.preferred_input_name);
        store.set_stored_value(ACTIVE_OUTPUT_DEVICE, &preference.active_output_device);
        store.set_stored_value(PREFERRED_OUTPUT_NAME, &preference.preferred_output_name);
        store.clear_call_history();
    }

    /// Both default endpoints are the target device from the first query
    pub fn target_is_default(audio: &MockAudioSystem) {
        audio.set_default_endpoint(Direction::Render, "sanas-render", "Sanas Headset Earphone");
        audio.set_default_endpoint(Direction::Capture, "sanas-capture", "Sanas Headset Microphone");
    }

    /// Both default endpoints stay on the onboard sound card
    pub fn target_never_default(audio: &MockAudioSystem) {
        audio.set_default_endpoint(Direction::Render, "realtek-render", "Realtek Speakers");
        audio.set_default_endpoint(
            Direction::Capture,
            "realtek-capture",
            "Realtek Microphone Array",
        );
    }
}
