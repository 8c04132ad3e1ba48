//! Fixed-size pool of device slots.

use std::sync::Arc;

use motebridge_cipher::CipherTables;
use motebridge_errors::DeviceError;
use parking_lot::Mutex;

use crate::slot::DeviceSlot;

/// Owns every device slot. Each slot has its own lock; nothing locks two
/// slots at once.
#[derive(Debug)]
pub struct DeviceRegistry {
    slots: Box<[Mutex<DeviceSlot>]>,
}

impl DeviceRegistry {
    pub fn new(capacity: usize, tables: &Arc<CipherTables>) -> Self {
        let slots = (0..capacity)
            .map(|handle| Mutex::new(DeviceSlot::vacant(handle, Arc::clone(tables))))
            .collect();
        Self { slots }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The slot for `handle`.
    pub fn slot(&self, handle: usize) -> Result<&Mutex<DeviceSlot>, DeviceError> {
        self.slots.get(handle).ok_or(DeviceError::SlotOutOfRange {
            handle,
            capacity: self.slots.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mutex<DeviceSlot>> {
        self.slots.iter()
    }

    /// Number of slots with a connected device. Locks each slot in turn.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.lock().is_active()).count()
    }

    /// `true` if any active slot satisfies `pred`.
    pub fn any_active(&self, mut pred: impl FnMut(&DeviceSlot) -> bool) -> bool {
        self.slots.iter().any(|s| {
            let slot = s.lock();
            slot.is_active() && pred(&slot)
        })
    }
}
