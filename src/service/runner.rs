use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::endpoint::{DetectionResult, PollingController};
use crate::notifications::{DialogPresenter, NotificationGateway};
use crate::preference::PreferenceStore;
use crate::reconcile::{ReconcileOutcome, ReconciliationEngine};
use crate::system::traits::{
    AudioEndpointInterface, PreferenceStoreInterface, SystemClockInterface,
};

/// Everything one check run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub detection: DetectionResult,
    pub outcome: ReconcileOutcome,
}

/// Main reconciler service with dependency injection for complete testability
pub struct ReconcilerService<
    A: AudioEndpointInterface,
    P: PreferenceStoreInterface,
    D: DialogPresenter,
    C: SystemClockInterface,
> {
    poller: PollingController<A, C>,
    engine: ReconciliationEngine<P, D>,
    config: Config,
}

impl<
    A: AudioEndpointInterface,
    P: PreferenceStoreInterface,
    D: DialogPresenter,
    C: SystemClockInterface,
> ReconcilerService<A, P, D, C>
{
    pub fn new(
        audio_system: A,
        preference_store: P,
        dialogs: D,
        clock: C,
        config: Config,
    ) -> Self {
        let poller = PollingController::new(audio_system, clock);
        let engine = ReconciliationEngine::new(
            PreferenceStore::new(preference_store),
            NotificationGateway::with_presenter(&config, dialogs),
        );

        Self {
            poller,
            engine,
            config,
        }
    }

    /// Run one complete check: poll the default endpoints, then reconcile
    /// the application preference against what was found.
    pub fn execute(&self) -> Result<RunReport> {
        info!(
            "Checking default endpoints for '{}'",
            self.config.detection.device_pattern
        );

        let detection = self.poller.detect(&self.config.detection);
        info!(
            "Detection finished after {} attempt(s): render='{}', capture='{}', both matched: {}",
            detection.attempts_used,
            detection.speaker_name,
            detection.mic_name,
            detection.matched_both
        );

        let outcome = self.engine.evaluate(&detection, &self.config.detection)?;

        Ok(RunReport { detection, outcome })
    }

    /// Get the active configuration
    pub fn get_config(&self) -> &Config {
        &self.config
    }
}

// Convenience constructor for production use
impl
    ReconcilerService<
        crate::system::DefaultAudioSystem,
        crate::system::DefaultPreferenceStore,
        crate::notifications::DefaultDialogPresenter,
        crate::system::SystemClock,
    >
{
    pub fn new_production(config: Config) -> Result<Self> {
        let audio_system = crate::system::DefaultAudioSystem::new()?;
        let preference_store =
            crate::system::DefaultPreferenceStore::new(&config.preference.registry_subkey);
        let dialogs = crate::notifications::DefaultDialogPresenter::new();
        let clock = crate::system::SystemClock;

        Ok(Self::new(
            audio_system,
            preference_store,
            dialogs,
            clock,
            config,
        ))
    }
}

// Convenience constructor for testing
#[cfg(any(test, feature = "test-mocks"))]
impl
    ReconcilerService<
        crate::system::MockAudioSystem,
        crate::system::MockPreferenceStore,
        crate::notifications::TestDialogPresenter,
        crate::system::MockSystemClock,
    >
{
    #[allow(dead_code)] // Used by integration tests which run in different compilation context
    pub fn new_for_testing(config: Config) -> Self {
        let audio_system = crate::system::MockAudioSystem::new();
        let preference_store = crate::system::MockPreferenceStore::new();
        let dialogs = crate::notifications::TestDialogPresenter::new();
        let clock = crate::system::MockSystemClock::new();

        Self::new(audio_system, preference_store, dialogs, clock, config)
    }
}
