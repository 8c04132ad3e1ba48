//! Per-device state owned by the registry.

use std::sync::Arc;

use motebridge_cipher::{CipherState, CipherTables};
use motebridge_mapping::{ResolvedConfig, remap};
use motebridge_report::{BdAddr, CanonicalReport, DeviceKind, TargetReport};
use motebridge_wiimote::{Emulator, HostStatus, InputMode};

use crate::family::Controller;

/// What the parsers maintain about a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStatus {
    /// Latest canonical report.
    pub report: CanonicalReport,
    /// Battery level `0..=4`.
    pub battery: u8,
    pub charging: bool,
    /// Set once the device delivers steady-state input.
    pub ready: bool,
}

/// Per-slot latches that keep the 10 ms tick from repeating a log line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LogLatches {
    pub no_mapping: bool,
    pub host_send_failed: bool,
}

/// One entry of the slot pool.
#[derive(Debug)]
pub struct DeviceSlot {
    pub(crate) active: bool,
    pub(crate) handle: usize,
    pub(crate) address: BdAddr,
    pub(crate) vendor_id: u16,
    pub(crate) product_id: u16,
    pub(crate) kind: DeviceKind,
    pub(crate) status: DeviceStatus,
    pub(crate) emulator: Emulator,
    pub(crate) config: ResolvedConfig,
    pub(crate) controller: Controller,
    /// Last input report sent to the host, for on-change reporting.
    pub(crate) last_sent: Option<TargetReport>,
    pub(crate) latches: LogLatches,
}

impl DeviceSlot {
    pub(crate) fn vacant(handle: usize, tables: Arc<CipherTables>) -> Self {
        Self {
            active: false,
            handle,
            address: BdAddr::default(),
            vendor_id: 0,
            product_id: 0,
            kind: DeviceKind::SwitchGeneric,
            status: DeviceStatus::default(),
            emulator: Emulator::new(tables),
            config: ResolvedConfig::default(),
            controller: Controller::for_kind(DeviceKind::SwitchGeneric),
            last_sent: None,
            latches: LogLatches::default(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remap the current canonical report with the slot's resolved
    /// configuration.
    pub(crate) fn remapped(&mut self) -> TargetReport {
        if self.config.mapping.is_none() && !self.latches.no_mapping {
            self.latches.no_mapping = true;
            tracing::info!(slot = self.handle, kind = ?self.kind, "no mapping configured, output stays neutral");
        }
        remap(
            &self.status.report,
            self.config.mapping.as_deref(),
            &self.config.common,
        )
    }

    pub(crate) fn host_status(&mut self) -> HostStatus {
        HostStatus {
            report: self.remapped(),
            battery: self.status.battery,
        }
    }

    pub fn snapshot(&self) -> SlotSnapshot {
        SlotSnapshot {
            handle: self.handle,
            address: self.address,
            vendor_id: self.vendor_id,
            product_id: self.product_id,
            kind: self.kind,
            status: self.status,
            mode: self.emulator.mode(),
            continuous: self.emulator.continuous(),
            leds: self.emulator.leds(),
            rumble: self.emulator.rumble(),
            encryption: self.emulator.registers().active_cipher().is_some(),
            cipher: self.emulator.registers().cipher().copied(),
            config: self.config.clone(),
        }
    }
}

/// Read-only copy of an active slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub handle: usize,
    pub address: BdAddr,
    pub vendor_id: u16,
    pub product_id: u16,
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    pub mode: InputMode,
    pub continuous: bool,
    pub leds: u8,
    pub rumble: bool,
    /// Extension bytes are currently obfuscated.
    pub encryption: bool,
    /// Derived from the host's key, whether or not obfuscation is on.
    pub cipher: Option<CipherState>,
    pub config: ResolvedConfig,
}
