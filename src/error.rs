use thiserror::Error;

use crate::endpoint::Direction;

/// Failure classes the reconciliation flow tells apart.
///
/// The absence of the whole preference namespace is not an error; the store
/// reports it as `None` and the run ends without touching anything.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The OS could not report a default endpoint for a direction. Transient:
    /// retried within the polling budget, treated as a non-match afterwards.
    #[error("no default {direction} endpoint available: {reason}")]
    EndpointUnavailable { direction: Direction, reason: String },

    /// One or more preference fields could not be written. The remaining
    /// fields were still cleared before this was reported.
    #[error("preference store denied writes to: {fields}")]
    WriteDenied { fields: String },
}
