use tracing::debug;

use crate::endpoint::{AudioEndpoint, Direction};
use crate::error::ReconcileError;
use crate::system::traits::AudioEndpointInterface;

/// Resolves the current default endpoint for a direction to a domain value.
///
/// A missing default endpoint is an error; a missing friendly name is not.
/// Some drivers briefly expose a device before its property store is
/// populated, so an unreadable name degrades to an empty string and the
/// caller treats it as a non-match.
pub struct EndpointResolver<A: AudioEndpointInterface> {
    audio_system: A,
}

impl<A: AudioEndpointInterface> EndpointResolver<A> {
    pub fn new(audio_system: A) -> Self {
        Self { audio_system }
    }

    /// Query the OS for the current default endpoint in the given direction
    pub fn default_endpoint(&self, direction: Direction) -> Result<AudioEndpoint, ReconcileError> {
        let id = self
            .audio_system
            .default_endpoint_id(direction)
            .map_err(|e| ReconcileError::EndpointUnavailable {
                direction,
                reason: e.to_string(),
            })?;

        let friendly_name = match self.audio_system.resolve_friendly_name(&id) {
            Ok(name) => name,
            Err(e) => {
                debug!("No friendly name for {} endpoint {}: {}", direction, id, e);
                String::new()
            }
        };

        Ok(AudioEndpoint {
            id,
            friendly_name,
            direction,
        })
    }

    /// Convenience wrapper returning just the friendly name
    pub fn default_endpoint_name(&self, direction: Direction) -> Result<String, ReconcileError> {
        Ok(self.default_endpoint(direction)?.friendly_name)
    }
}
