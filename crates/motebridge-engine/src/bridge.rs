//! The bridge: connect/disconnect, inbound reports and the report timer.
//!
//! Lock order: a slot lock may be held while the configuration is read
//! (Switch kind refinement). Configuration writes never hold a slot lock,
//! and no path holds two slot locks.

use std::sync::Arc;

use motebridge_cipher::CipherTables;
use motebridge_errors::{BridgeError, ConfigError, DeviceError};
use motebridge_mapping::{CommonConfig, ConfigKey, ConfigStore, FamilyConfig, MappingTable};
use motebridge_report::{DeviceKind, TargetReport};
use parking_lot::{Mutex, MutexGuard, RwLock};
use tracing::{debug, error, info, trace, warn};

use crate::config::EngineConfig;
use crate::family::{Controller, FamilyContext};
use crate::identity::{DeviceIdentity, classify};
use crate::registry::DeviceRegistry;
use crate::slot::{DeviceSlot, SlotSnapshot};
use crate::timer::TimerHandle;
use crate::transport::{DeviceLink, PrivilegedTransport};

/// State shared with the timer thread.
struct Shared {
    registry: DeviceRegistry,
    config: RwLock<ConfigStore>,
    transport: Arc<dyn PrivilegedTransport>,
    tables: Arc<CipherTables>,
    tick_period_ns: u64,
    timer_thread: bool,
}

impl Shared {
    /// One pass over every slot: continuous, ready devices get a report.
    fn tick(&self) {
        for slot in self.registry.iter() {
            let mut slot = slot.lock();
            if !slot.is_active() || !slot.status.ready || !slot.emulator.continuous() {
                continue;
            }
            let report = slot.remapped();
            self.send_input(&mut slot, report);
        }
    }

    /// Encode `report` in the slot's current mode and send it.
    fn send_input(&self, slot: &mut DeviceSlot, report: TargetReport) {
        let wire = slot.emulator.encode_input(&report);
        slot.last_sent = Some(report);
        self.send_host(slot, wire.as_bytes());
    }

    fn send_host(&self, slot: &mut DeviceSlot, bytes: &[u8]) {
        match self.transport.send_to_host(slot.handle, bytes) {
            Ok(()) => slot.latches.host_send_failed = false,
            Err(err) => {
                if !slot.latches.host_send_failed {
                    slot.latches.host_send_failed = true;
                    warn!(slot = slot.handle, kind = ?slot.kind, %err, "host report not sent");
                }
            }
        }
    }
}

/// Bridges third-party pads to the emulated remote.
///
/// Every method takes `&self`; the bridge is shared between the device
/// input path, the host command path and the timer thread.
pub struct Bridge {
    shared: Arc<Shared>,
    timer: Mutex<Option<TimerHandle>>,
}

impl core::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bridge")
            .field("capacity", &self.shared.registry.capacity())
            .field("timer_running", &self.is_timer_running())
            .finish_non_exhaustive()
    }
}

impl Bridge {
    /// A bridge whose configuration store holds the default mapping for
    /// every kind and `config.default_deadzone` as the global deadzone.
    pub fn new(config: EngineConfig, transport: Arc<dyn PrivilegedTransport>) -> Self {
        let store = ConfigStore::with_defaults(CommonConfig {
            deadzone: config.default_deadzone,
        });
        Self::with_store(config, transport, store)
    }

    pub fn with_store(
        config: EngineConfig,
        transport: Arc<dyn PrivilegedTransport>,
        store: ConfigStore,
    ) -> Self {
        let registry = DeviceRegistry::new(config.slot_count, &config.cipher_tables);
        Self {
            shared: Arc::new(Shared {
                registry,
                config: RwLock::new(store),
                transport,
                tick_period_ns: config.tick_period_ns(),
                timer_thread: config.timer_thread,
                tables: config.cipher_tables,
            }),
            timer: Mutex::new(None),
        }
    }

    /// Bind a device to slot `handle` and start talking to it.
    ///
    /// A device still occupying the slot is torn down first. Starts the
    /// report timer if it is not running.
    pub fn connect(&self, handle: usize, identity: DeviceIdentity) -> Result<DeviceKind, BridgeError> {
        let kind = match classify(&identity) {
            Ok(kind) => kind,
            Err(err) => {
                info!(slot = handle, address = %identity.address, %err, "device not bridged");
                return Err(err.into());
            }
        };
        let link = DeviceLink::new(handle, &*self.shared.transport);
        {
            let mut slot = self.shared.registry.slot(handle)?.lock();
            if slot.is_active() {
                warn!(slot = handle, kind = ?slot.kind, "slot reused without disconnect");
                slot.controller.teardown(&link);
            }
            let config = self.shared.config.read().resolve(kind, identity.address);

            *slot = DeviceSlot::vacant(handle, Arc::clone(&self.shared.tables));
            slot.address = identity.address;
            slot.vendor_id = identity.vendor_id;
            slot.product_id = identity.product_id;
            slot.kind = kind;
            slot.config = config;
            slot.controller = Controller::for_kind(kind);
            slot.controller.init(&link);
            slot.active = true;
        }
        info!(
            slot = handle,
            kind = ?kind,
            address = %identity.address,
            vendor_id = identity.vendor_id,
            product_id = identity.product_id,
            "device connected"
        );

        if let Err(err) = self.ensure_timer() {
            error!(slot = handle, %err, "report timer unavailable, releasing slot");
            self.release(handle);
            return Err(err);
        }
        Ok(kind)
    }

    /// Tear down the device in slot `handle`. Stops the report timer when
    /// no device remains.
    pub fn disconnect(&self, handle: usize) -> Result<(), BridgeError> {
        {
            let mut slot = self.active_slot(handle)?;
            let link = DeviceLink::new(handle, &*self.shared.transport);
            slot.controller.teardown(&link);
            info!(slot = handle, kind = ?slot.kind, "device disconnected");
            *slot = DeviceSlot::vacant(handle, Arc::clone(&self.shared.tables));
        }

        let mut timer = self.timer.lock();
        if self.shared.registry.active_count() == 0 {
            if let Some(running) = timer.take() {
                running.stop();
            }
        }
        Ok(())
    }

    /// Feed one raw report from the device in slot `handle`.
    ///
    /// Unrecognized reports are dropped without any state change.
    pub fn on_device_input(&self, handle: usize, bytes: &[u8]) -> Result<(), BridgeError> {
        let mut guard = self.active_slot(handle)?;
        let slot = &mut *guard;
        let was_ready = slot.status.ready;

        let address = slot.address;
        let store = &self.shared.config;
        let resolve = move |kind| store.read().resolve(kind, address);
        let mut ctx = FamilyContext {
            link: DeviceLink::new(handle, &*self.shared.transport),
            kind: slot.kind,
            leds: slot.emulator.leds(),
            resolve: &resolve,
            refined: None,
        };
        if !slot.controller.parse(bytes, &mut slot.status, &mut ctx) {
            trace!(slot = handle, report = bytes.first().copied(), len = bytes.len(), "unrecognized device report");
            return Ok(());
        }

        if let Some((kind, config)) = ctx.refined.take() {
            if kind != slot.kind {
                info!(slot = handle, from = ?slot.kind, kind = ?kind, "device kind refined");
            }
            slot.kind = kind;
            slot.config = config;
            slot.latches.no_mapping = false;
        }

        if !slot.status.ready {
            return Ok(());
        }
        if !was_ready {
            info!(slot = handle, kind = ?slot.kind, "device ready");
            let status = slot.host_status();
            let announce = slot.emulator.status_report(&status);
            self.shared.send_host(slot, announce.as_bytes());
        }
        if !slot.emulator.continuous() {
            let report = slot.remapped();
            if slot.last_sent != Some(report) {
                self.shared.send_input(slot, report);
            }
        }
        Ok(())
    }

    /// Feed one command report the host addressed to slot `handle`.
    pub fn on_host_command(&self, handle: usize, bytes: &[u8]) -> Result<(), BridgeError> {
        let mut guard = self.active_slot(handle)?;
        let slot = &mut *guard;

        let status = slot.host_status();
        let outcome = slot.emulator.handle_command(bytes, &status);
        for reply in &outcome.replies {
            self.shared.send_host(slot, reply.as_bytes());
        }

        let link = DeviceLink::new(handle, &*self.shared.transport);
        if let Some(leds) = outcome.led {
            debug!(slot = handle, leds, "host set LEDs");
            slot.controller.set_led(leds, &link);
        }
        if let Some(on) = outcome.rumble {
            debug!(slot = handle, on, "host set rumble");
            slot.controller.set_rumble(on, &link);
        }
        if outcome.mode_changed && slot.status.ready {
            self.shared.send_input(slot, status.report);
        }
        Ok(())
    }

    /// Run one scheduler pass on the calling thread.
    ///
    /// The timer thread calls this every period; tests and offline replay
    /// call it directly.
    pub fn tick(&self) {
        self.shared.tick();
    }

    pub fn apply_common(
        &self,
        key: ConfigKey,
        value: Option<CommonConfig>,
    ) -> Result<(), ConfigError> {
        self.ensure_disconnected(key)?;
        self.shared.config.write().apply_common(key, value);
        Ok(())
    }

    pub fn apply_mapping(
        &self,
        key: ConfigKey,
        value: Option<MappingTable>,
    ) -> Result<(), ConfigError> {
        self.ensure_disconnected(key)?;
        self.shared.config.write().apply_mapping(key, value);
        Ok(())
    }

    pub fn apply_family(
        &self,
        key: ConfigKey,
        value: Option<FamilyConfig>,
    ) -> Result<(), ConfigError> {
        self.ensure_disconnected(key)?;
        self.shared.config.write().apply_family(key, value)
    }

    /// Copy of slot `handle` if a device is connected there.
    pub fn snapshot(&self, handle: usize) -> Option<SlotSnapshot> {
        let slot = self.shared.registry.slot(handle).ok()?.lock();
        slot.is_active().then(|| slot.snapshot())
    }

    pub fn active_count(&self) -> usize {
        self.shared.registry.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.shared.registry.capacity()
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.lock().is_some()
    }

    /// Disconnect every device and stop the timer.
    pub fn shutdown(&self) {
        for handle in 0..self.shared.registry.capacity() {
            // Vacant slots report SlotNotActive; nothing to do for them.
            if self.disconnect(handle).is_ok() {
                debug!(slot = handle, "disconnected at shutdown");
            }
        }
        if let Some(running) = self.timer.lock().take() {
            running.stop();
        }
    }

    fn active_slot(&self, handle: usize) -> Result<MutexGuard<'_, DeviceSlot>, DeviceError> {
        let slot = self.shared.registry.slot(handle)?.lock();
        if slot.is_active() {
            Ok(slot)
        } else {
            Err(DeviceError::SlotNotActive(handle))
        }
    }

    fn ensure_disconnected(&self, key: ConfigKey) -> Result<(), ConfigError> {
        if self
            .shared
            .registry
            .any_active(|slot| key.matches(slot.kind, slot.address))
        {
            warn!(%key, "configuration change rejected, device connected");
            return Err(ConfigError::device_connected(key.to_string()));
        }
        Ok(())
    }

    fn ensure_timer(&self) -> Result<(), BridgeError> {
        if !self.shared.timer_thread {
            return Ok(());
        }
        let mut timer = self.timer.lock();
        if timer.is_none() {
            let shared = Arc::clone(&self.shared);
            let spawned = TimerHandle::spawn(self.shared.tick_period_ns, move || shared.tick())
                .map_err(|err| BridgeError::other(format!("failed to spawn report timer: {err}")))?;
            *timer = Some(spawned);
        }
        Ok(())
    }

    fn release(&self, handle: usize) {
        if let Ok(slot) = self.shared.registry.slot(handle) {
            *slot.lock() = DeviceSlot::vacant(handle, Arc::clone(&self.shared.tables));
        }
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        if let Some(running) = self.timer.get_mut().take() {
            running.stop();
        }
    }
}
