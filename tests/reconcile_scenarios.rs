use audio_endpoint_reconciler::endpoint::Direction;
use audio_endpoint_reconciler::notifications::{DialogKind, TestDialogPresenter};
use audio_endpoint_reconciler::preference::{ACTIVE_INPUT_DEVICE, DEVICE_FIELDS};
use audio_endpoint_reconciler::reconcile::ReconcileOutcome;
use audio_endpoint_reconciler::service::ReconcilerService;
use audio_endpoint_reconciler::system::{MockAudioSystem, MockPreferenceStore, MockSystemClock};

mod test_utils;
use test_utils::builders::{scenarios, ConfigBuilder};

type TestService =
    ReconcilerService<MockAudioSystem, MockPreferenceStore, TestDialogPresenter, MockSystemClock>;

/// Wire a service around externally held mocks so tests can inspect them
fn service_with(
    audio: &MockAudioSystem,
    store: &MockPreferenceStore,
    dialogs: &TestDialogPresenter,
    clock: &MockSystemClock,
    config: audio_endpoint_reconciler::Config,
) -> TestService {
    ReconcilerService::new(
        audio.clone(),
        store.clone(),
        dialogs.clone(),
        clock.clone(),
        config,
    )
}

/// Target is the default everywhere but the application still points elsewhere
#[cfg(test)]
mod corrected_run {
    use super::*;

    #[test]
    fn test_misaligned_preference_is_cleared() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_is_default(&audio);
        scenarios::seed_preference(&store, &scenarios::realtek_preference());

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());
        let report = service.execute().unwrap();

        assert_eq!(report.outcome, ReconcileOutcome::Corrected);
        assert!(report.detection.matched_both);
        assert_eq!(report.detection.attempts_used, 1);

        // All four fields were blanked
        for field in DEVICE_FIELDS {
            assert_eq!(store.stored_value(field).unwrap(), "");
        }
    }

    #[test]
    fn test_first_attempt_match_never_sleeps() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_is_default(&audio);
        scenarios::seed_preference(&store, &scenarios::realtek_preference());

        let service = service_with(
            &audio,
            &store,
            &dialogs,
            &clock,
            ConfigBuilder::new().poll_interval_ms(3000).build(),
        );
        service.execute().unwrap();

        assert!(clock.get_sleep_calls().is_empty());
    }

    #[test]
    fn test_acknowledgment_names_the_target() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_is_default(&audio);
        scenarios::seed_preference(&store, &scenarios::realtek_preference());

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());
        service.execute().unwrap();

        let shown = dialogs.get_shown_dialogs();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, DialogKind::Acknowledgment);
        assert!(shown[0].1.contains("Sanas"));
    }
}

/// Target never becomes the default in either direction
#[cfg(test)]
mod target_missing {
    use super::*;

    #[test]
    fn test_all_attempts_run_and_warning_is_shown() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_never_default(&audio);
        scenarios::seed_preference(&store, &scenarios::realtek_preference());

        let service = service_with(
            &audio,
            &store,
            &dialogs,
            &clock,
            ConfigBuilder::new().poll_interval_ms(3000).build(),
        );
        let report = service.execute().unwrap();

        assert_eq!(report.outcome, ReconcileOutcome::TargetNotDefault);
        assert!(!report.detection.matched_both);
        assert_eq!(report.detection.attempts_used, 5);
        // Sleeps happen between attempts, never after the last
        assert_eq!(clock.get_sleep_calls(), vec![3000; 4]);

        let shown = dialogs.get_shown_dialogs();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, DialogKind::Warning);
    }

    #[test]
    fn test_store_is_never_touched() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_never_default(&audio);
        scenarios::seed_preference(&store, &scenarios::realtek_preference());

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());
        service.execute().unwrap();

        // Not even the namespace check runs when the gate is false
        assert_eq!(store.get_namespace_checks(), 0);
        assert!(store.get_read_calls().is_empty());
        assert!(store.get_write_calls().is_empty());
    }
}

/// The dependent application has never stored a preference
#[cfg(test)]
mod preference_absent {
    use super::*;

    #[test]
    fn test_absent_namespace_is_benign() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        // Render matches, capture does not: the OR gate still opens
        audio.set_default_endpoint(Direction::Render, "sanas-render", "Sanas Headset Earphone");
        audio.set_default_endpoint(Direction::Capture, "realtek-capture", "Realtek Microphone Array");

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());
        let report = service.execute().unwrap();

        assert_eq!(report.outcome, ReconcileOutcome::PreferenceAbsent);
        assert!(store.get_write_calls().is_empty());
        assert!(dialogs.get_shown_dialogs().is_empty());
    }
}

/// The application already records from the target device
#[cfg(test)]
mod already_aligned {
    use super::*;

    #[test]
    fn test_aligned_preference_is_left_alone() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_is_default(&audio);
        scenarios::seed_preference(&store, &scenarios::target_preference());

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());
        let report = service.execute().unwrap();

        assert_eq!(report.outcome, ReconcileOutcome::AlreadyAligned);
        assert!(store.get_write_calls().is_empty());
        assert!(dialogs.get_shown_dialogs().is_empty());
    }
}

/// Re-running a check must always be safe
#[cfg(test)]
mod idempotence {
    use super::*;

    #[test]
    fn test_aligned_runs_never_mutate() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_is_default(&audio);
        scenarios::seed_preference(&store, &scenarios::target_preference());

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());

        for _ in 0..2 {
            let report = service.execute().unwrap();
            assert_eq!(report.outcome, ReconcileOutcome::AlreadyAligned);
        }
        assert!(store.get_write_calls().is_empty());
    }

    #[test]
    fn test_corrected_runs_converge_to_empty_fields() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_is_default(&audio);
        scenarios::seed_preference(&store, &scenarios::realtek_preference());

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());

        // A cleared field no longer matches the pattern, so the second run
        // corrects again rather than reporting alignment.
        let first = service.execute().unwrap();
        let second = service.execute().unwrap();

        assert_eq!(first.outcome, ReconcileOutcome::Corrected);
        assert_eq!(second.outcome, ReconcileOutcome::Corrected);
        for field in DEVICE_FIELDS {
            assert_eq!(store.stored_value(field).unwrap(), "");
        }
        assert_eq!(dialogs.get_shown_dialogs().len(), 2);
    }
}

/// The poll loop wants both directions, the reconcile gate wants either
#[cfg(test)]
mod gate_asymmetry {
    use super::*;

    #[test]
    fn test_single_direction_match_exhausts_polling_but_still_reconciles() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        // Speaker matches on every attempt, mic never does
        audio.set_default_endpoint(Direction::Render, "sanas-render", "Sanas Headset Earphone");
        audio.set_default_endpoint(Direction::Capture, "realtek-capture", "Realtek Microphone Array");
        scenarios::seed_preference(&store, &scenarios::realtek_preference());

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());
        let report = service.execute().unwrap();

        // No early exit without both directions matching
        assert!(!report.detection.matched_both);
        assert_eq!(report.detection.attempts_used, 5);

        // But one matching direction is enough to correct the preference
        assert_eq!(report.outcome, ReconcileOutcome::Corrected);
        assert_eq!(store.stored_value(ACTIVE_INPUT_DEVICE).unwrap(), "");
    }
}

/// Pattern matching ignores case throughout
#[cfg(test)]
mod case_insensitivity {
    use super::*;

    #[test]
    fn test_lowercase_endpoint_names_match() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        audio.set_default_endpoint(Direction::Render, "r-1", "sanas headset earphone");
        audio.set_default_endpoint(Direction::Capture, "c-1", "SANAS HEADSET MICROPHONE");
        scenarios::seed_preference(&store, &scenarios::realtek_preference());

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());
        let report = service.execute().unwrap();

        assert!(report.detection.matched_both);
        assert_eq!(report.outcome, ReconcileOutcome::Corrected);
    }

    #[test]
    fn test_lowercase_stored_preference_counts_as_aligned() {
        let audio = MockAudioSystem::new();
        let store = MockPreferenceStore::new();
        let dialogs = TestDialogPresenter::new();
        let clock = MockSystemClock::new();
        scenarios::target_is_default(&audio);
        store.set_stored_value(ACTIVE_INPUT_DEVICE, "sanas headset");
        store.clear_call_history();

        let service = service_with(&audio, &store, &dialogs, &clock, ConfigBuilder::new().build());
        let report = service.execute().unwrap();

        assert_eq!(report.outcome, ReconcileOutcome::AlreadyAligned);
        assert!(store.get_write_calls().is_empty());
    }
}
