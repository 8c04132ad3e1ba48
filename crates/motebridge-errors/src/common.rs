//! Top-level error type and classification shared by all motebridge crates.

use core::fmt;

use crate::{ConfigError, DeviceError, TransportError};

/// Top-level error type wrapping every sub-error of the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Device slot and identity errors
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            BridgeError::Device(_) => ErrorCategory::Device,
            BridgeError::Config(_) => ErrorCategory::Config,
            BridgeError::Transport(_) => ErrorCategory::Transport,
            BridgeError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BridgeError::Device(e) => e.severity(),
            BridgeError::Config(_) => ErrorSeverity::Error,
            BridgeError::Transport(e) => e.severity(),
            BridgeError::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        BridgeError::Other(msg.into())
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Device slot and identity errors
    Device = 1,
    /// Configuration errors
    Config = 2,
    /// Transport errors
    Transport = 3,
    /// Other errors
    Other = 255,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Device => write!(f, "Device"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Transport => write!(f, "Transport"),
            ErrorCategory::Other => write!(f, "Other"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the device can no longer be served
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Device.to_string(), "Device");
        assert_eq!(ErrorCategory::Config.to_string(), "Config");
        assert_eq!(ErrorCategory::Transport.to_string(), "Transport");
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_bridge_error_category() {
        let err: BridgeError = DeviceError::SlotOutOfRange { handle: 40, capacity: 16 }.into();
        assert_eq!(err.category(), ErrorCategory::Device);

        let err = BridgeError::other("boom");
        assert_eq!(err.category(), ErrorCategory::Other);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_bridge_error_is_std_error() {
        let err: BridgeError = TransportError::Closed.into();
        let _: &dyn std::error::Error = &err;
    }
}
