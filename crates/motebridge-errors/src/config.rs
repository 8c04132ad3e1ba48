//! Configuration errors.

/// Errors raised by configuration updates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Configuration may only change while the affected device is disconnected
    #[error("Cannot reconfigure {key} while a matching device is connected")]
    DeviceConnected {
        /// Device address or kind the update was keyed on
        key: String,
    },

    /// Family blob does not belong to the kind it was applied to
    #[error("Family options for {expected} cannot be applied to {key}")]
    FamilyMismatch {
        /// Key the update was applied to
        key: String,
        /// Family the blob belongs to
        expected: String,
    },
}

impl ConfigError {
    /// Create a connected-device precondition violation.
    pub fn device_connected(key: impl Into<String>) -> Self {
        ConfigError::DeviceConnected { key: key.into() }
    }
}
