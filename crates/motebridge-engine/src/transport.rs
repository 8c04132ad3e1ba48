//! Boundary to the privileged Bluetooth/host stack.

use motebridge_errors::TransportError;
use tracing::warn;

/// Sends reports on behalf of the bridge.
///
/// `handle` is the slot handle the device was connected with. Failures are
/// logged by the bridge and never retried.
pub trait PrivilegedTransport: Send + Sync {
    /// Send an encoded target report to the host.
    fn send_to_host(&self, handle: usize, bytes: &[u8]) -> Result<(), TransportError>;

    /// Send a raw vendor report to the physical device.
    fn send_to_device(&self, handle: usize, bytes: &[u8]) -> Result<(), TransportError>;
}

/// A transport bound to one device, handed to family adapters.
#[derive(Clone, Copy)]
pub struct DeviceLink<'a> {
    handle: usize,
    transport: &'a dyn PrivilegedTransport,
}

impl<'a> DeviceLink<'a> {
    pub fn new(handle: usize, transport: &'a dyn PrivilegedTransport) -> Self {
        Self { handle, transport }
    }

    #[inline]
    pub fn handle(&self) -> usize {
        self.handle
    }

    /// Fire-and-forget send to the device.
    pub fn send(&self, bytes: &[u8]) {
        if let Err(err) = self.transport.send_to_device(self.handle, bytes) {
            warn!(slot = self.handle, %err, report = bytes.first().copied(), "device report not sent");
        }
    }
}

impl core::fmt::Debug for DeviceLink<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceLink").field("handle", &self.handle).finish_non_exhaustive()
    }
}
