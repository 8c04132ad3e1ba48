//! Device slot and identity errors.

use crate::common::ErrorSeverity;

/// Errors raised while attaching or addressing a device slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Handle does not address a slot of the registry
    #[error("Slot handle {handle} out of range (capacity {capacity})")]
    SlotOutOfRange {
        /// Offending handle
        handle: usize,
        /// Registry capacity
        capacity: usize,
    },

    /// Slot holds no device
    #[error("Slot {0} has no active device")]
    SlotNotActive(usize),

    /// First-party controllers are handled by the host directly
    #[error("Device {0} is an official controller and is not bridged")]
    OfficialController(String),

    /// No parser claims the vendor/product pair
    #[error("Unsupported device: vendor={vendor_id:#06x}, product={product_id:#06x}")]
    UnsupportedDevice {
        /// Vendor ID
        vendor_id: u16,
        /// Product ID
        product_id: u16,
    },
}

impl DeviceError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DeviceError::SlotOutOfRange { .. } => ErrorSeverity::Error,
            DeviceError::SlotNotActive(_) => ErrorSeverity::Warning,
            DeviceError::OfficialController(_) => ErrorSeverity::Info,
            DeviceError::UnsupportedDevice { .. } => ErrorSeverity::Error,
        }
    }

    /// Create an unsupported device error.
    pub fn unsupported(vendor_id: u16, product_id: u16) -> Self {
        DeviceError::UnsupportedDevice {
            vendor_id,
            product_id,
        }
    }
}
