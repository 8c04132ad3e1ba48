//! Errors reported by the privileged transport.

use crate::common::ErrorSeverity;

/// Failure to hand a report to the host stack or the physical device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Channel to the host or device is gone
    #[error("Transport closed")]
    Closed,

    /// Lower layer refused the report
    #[error("Report rejected: {0}")]
    Rejected(String),
}

impl TransportError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TransportError::Closed => ErrorSeverity::Critical,
            TransportError::Rejected(_) => ErrorSeverity::Warning,
        }
    }
}
