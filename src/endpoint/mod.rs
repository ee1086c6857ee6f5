use std::fmt;

pub mod poller;
pub mod resolver;

#[cfg(windows)]
pub mod mmdevice;

pub use poller::PollingController;
pub use resolver::EndpointResolver;

/// Data-flow direction of an audio endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Playback (speakers, headphones)
    Render,
    /// Recording (microphones, line-in)
    Capture,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Render => write!(f, "render"),
            Direction::Capture => write!(f, "capture"),
        }
    }
}

/// A system audio endpoint as reported by the OS
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEndpoint {
    /// Opaque OS identifier for the endpoint
    pub id: String,
    /// Human-readable name shown in the sound settings UI
    pub friendly_name: String,
    pub direction: Direction,
}

impl fmt::Display for AudioEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.friendly_name, self.id)
    }
}

/// Outcome of a bounded detection pass over both endpoint directions
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    /// Friendly name of the default render endpoint, empty if never resolved
    pub speaker_name: String,
    /// Friendly name of the default capture endpoint, empty if never resolved
    pub mic_name: String,
    /// Number of polling attempts consumed, at least 1
    pub attempts_used: u32,
    /// Whether both directions matched the target pattern before attempts ran out
    pub matched_both: bool,
}
