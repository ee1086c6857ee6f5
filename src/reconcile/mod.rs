use std::fmt;

pub mod engine;

pub use engine::ReconciliationEngine;

/// What a reconciliation run decided about the preference store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Neither default endpoint matched the target; the store was left alone
    TargetNotDefault,
    /// The preference namespace does not exist; nothing to reconcile
    PreferenceAbsent,
    /// The stored input preference already points at the target
    AlreadyAligned,
    /// The device fields were cleared so the application re-resolves them
    Corrected,
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileOutcome::TargetNotDefault => write!(f, "target not default"),
            ReconcileOutcome::PreferenceAbsent => write!(f, "preference absent"),
            ReconcileOutcome::AlreadyAligned => write!(f, "already aligned"),
            ReconcileOutcome::Corrected => write!(f, "corrected"),
        }
    }
}
