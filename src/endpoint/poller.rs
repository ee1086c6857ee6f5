use tracing::{debug, warn};

use crate::config::DetectionConfig;
use crate::endpoint::resolver::EndpointResolver;
use crate::endpoint::{DetectionResult, Direction};
use crate::system::traits::{AudioEndpointInterface, SystemClockInterface};

/// Polls the default endpoints until both match the target pattern or the
/// attempt budget runs out. Detection never fails: endpoints that cannot be
/// resolved on an attempt keep the name seen on an earlier attempt, so a
/// device that appeared briefly still counts for matching.
pub struct PollingController<A: AudioEndpointInterface, C: SystemClockInterface> {
    resolver: EndpointResolver<A>,
    clock: C,
}

impl<A: AudioEndpointInterface, C: SystemClockInterface> PollingController<A, C> {
    pub fn new(audio_system: A, clock: C) -> Self {
        Self {
            resolver: EndpointResolver::new(audio_system),
            clock,
        }
    }

    /// Run one bounded detection pass over both directions
    pub fn detect(&self, rules: &DetectionConfig) -> DetectionResult {
        let max_attempts = rules.max_attempts.max(1);

        let mut speaker_name = String::new();
        let mut mic_name = String::new();
        let mut attempts_used = 0;
        let mut matched_both = false;

        for attempt in 1..=max_attempts {
            attempts_used = attempt;

            self.refresh_name(Direction::Render, attempt, &mut speaker_name);
            self.refresh_name(Direction::Capture, attempt, &mut mic_name);

            debug!(
                "Attempt {}/{}: render='{}', capture='{}'",
                attempt, max_attempts, speaker_name, mic_name
            );

            if rules.matches(&speaker_name) && rules.matches(&mic_name) {
                matched_both = true;
                break;
            }

            // Block between attempts only; the last attempt ends the pass.
            if attempt < max_attempts {
                self.clock.sleep_ms(rules.poll_interval_ms);
            }
        }

        DetectionResult {
            speaker_name,
            mic_name,
            attempts_used,
            matched_both,
        }
    }

    fn refresh_name(&self, direction: Direction, attempt: u32, name: &mut String) {
        match self.resolver.default_endpoint_name(direction) {
            Ok(current) => *name = current,
            Err(e) => warn!("Attempt {}: {}", attempt, e),
        }
    }
}
