use anyhow::Result;
use tracing::{info, warn};

use crate::config::DetectionConfig;
use crate::endpoint::DetectionResult;
use crate::notifications::{DialogPresenter, NotificationGateway};
use crate::preference::PreferenceStore;
use crate::reconcile::ReconcileOutcome;
use crate::system::traits::PreferenceStoreInterface;

/// Decides what to do with the application preference after detection.
///
/// A single matching direction is enough to reconcile: the poll loop's early
/// exit wants both endpoints, the gate here wants either.
pub struct ReconciliationEngine<P: PreferenceStoreInterface, D: DialogPresenter> {
    preference_store: PreferenceStore<P>,
    notifications: NotificationGateway<D>,
}

impl<P: PreferenceStoreInterface, D: DialogPresenter> ReconciliationEngine<P, D> {
    pub fn new(preference_store: PreferenceStore<P>, notifications: NotificationGateway<D>) -> Self {
        Self {
            preference_store,
            notifications,
        }
    }

    pub fn evaluate(
        &self,
        detection: &DetectionResult,
        rules: &DetectionConfig,
    ) -> Result<ReconcileOutcome> {
        let speaker_matches = rules.matches(&detection.speaker_name);
        let mic_matches = rules.matches(&detection.mic_name);

        if !speaker_matches && !mic_matches {
            info!(
                "'{}' is not a default endpoint (render='{}', capture='{}')",
                rules.device_pattern, detection.speaker_name, detection.mic_name
            );
            self.notifications.target_not_default(&rules.device_pattern);
            return Ok(ReconcileOutcome::TargetNotDefault);
        }

        let preference = match self.preference_store.read()? {
            Some(preference) => preference,
            None => {
                info!("No application preference found, nothing to reconcile");
                return Ok(ReconcileOutcome::PreferenceAbsent);
            }
        };

        // Only the active input field decides alignment; the output fields
        // are cleared alongside it but never inspected.
        if rules.matches(&preference.active_input_device) {
            info!(
                "Application already records from '{}'",
                preference.active_input_device
            );
            return Ok(ReconcileOutcome::AlreadyAligned);
        }

        info!(
            "Application records from '{}', clearing device preference",
            preference.active_input_device
        );
        if let Err(e) = self.preference_store.clear_input_and_output() {
            // Failed fields were logged individually; the next scheduled
            // run retries them.
            warn!("Device preference only partially cleared: {}", e);
        }
        self.notifications.preference_corrected(&rules.device_pattern);

        Ok(ReconcileOutcome::Corrected)
    }
}
