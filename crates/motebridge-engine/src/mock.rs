//! Recording transport for tests and offline replay.

use std::sync::atomic::{AtomicBool, Ordering};

use motebridge_errors::TransportError;
use parking_lot::Mutex;

use crate::transport::PrivilegedTransport;

/// Which way a recorded report went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToHost,
    ToDevice,
}

/// One report the bridge sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReport {
    pub direction: Direction,
    pub handle: usize,
    pub bytes: Vec<u8>,
}

/// A [`PrivilegedTransport`] that records every report in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Mutex<Vec<SentReport>>,
    reject_host: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every host send fail until called again with `false`.
    pub fn set_reject_host(&self, reject: bool) {
        self.reject_host.store(reject, Ordering::Release);
    }

    /// Everything sent so far.
    pub fn sent(&self) -> Vec<SentReport> {
        self.sent.lock().clone()
    }

    /// Remove and return everything sent so far.
    pub fn take(&self) -> Vec<SentReport> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Reports sent to the host for `handle`, oldest first.
    pub fn host_reports(&self, handle: usize) -> Vec<Vec<u8>> {
        self.filtered(Direction::ToHost, handle)
    }

    /// Reports sent to the device at `handle`, oldest first.
    pub fn device_reports(&self, handle: usize) -> Vec<Vec<u8>> {
        self.filtered(Direction::ToDevice, handle)
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }

    fn filtered(&self, direction: Direction, handle: usize) -> Vec<Vec<u8>> {
        self.sent
            .lock()
            .iter()
            .filter(|r| r.direction == direction && r.handle == handle)
            .map(|r| r.bytes.clone())
            .collect()
    }

    fn record(&self, direction: Direction, handle: usize, bytes: &[u8]) {
        self.sent.lock().push(SentReport {
            direction,
            handle,
            bytes: bytes.to_vec(),
        });
    }
}

impl PrivilegedTransport for MockTransport {
    fn send_to_host(&self, handle: usize, bytes: &[u8]) -> Result<(), TransportError> {
        if self.reject_host.load(Ordering::Acquire) {
            return Err(TransportError::Rejected("host link down".into()));
        }
        self.record(Direction::ToHost, handle, bytes);
        Ok(())
    }

    fn send_to_device(&self, handle: usize, bytes: &[u8]) -> Result<(), TransportError> {
        self.record(Direction::ToDevice, handle, bytes);
        Ok(())
    }
}
