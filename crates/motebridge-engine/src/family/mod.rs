//! Per-family device adapters.
//!
//! Wire formats live in the protocol crates; the adapters here keep the
//! per-device state those formats need (output counters, current LEDs and
//! rumble, the Switch handshake) and decide what to send when.

mod ds3;
mod ds4;
mod dualsense;
mod switch;
mod xbox;

pub use ds3::DualShock3;
pub use ds4::DualShock4;
pub use dualsense::DualSense;
pub use switch::{HandshakeState, Switch};
pub use xbox::XboxOne;

use motebridge_mapping::ResolvedConfig;
use motebridge_report::DeviceKind;

use crate::slot::DeviceStatus;
use crate::transport::DeviceLink;

/// What a parser may need beyond the raw bytes.
pub struct FamilyContext<'a> {
    pub link: DeviceLink<'a>,
    /// Kind the device is currently treated as.
    pub kind: DeviceKind,
    /// Current host LED mask.
    pub leds: u8,
    /// Resolve configuration for a (refined) kind of this device.
    pub resolve: &'a dyn Fn(DeviceKind) -> ResolvedConfig,
    /// Set by a parser that learned the device's concrete kind.
    pub refined: Option<(DeviceKind, ResolvedConfig)>,
}

impl core::fmt::Debug for FamilyContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FamilyContext")
            .field("link", &self.link)
            .field("kind", &self.kind)
            .field("leds", &self.leds)
            .field("refined", &self.refined)
            .finish_non_exhaustive()
    }
}

/// The adapter of a connected device, selected once at connect.
#[derive(Debug, Clone)]
pub enum Controller {
    DualShock3(DualShock3),
    DualShock4(DualShock4),
    DualSense(DualSense),
    Switch(Switch),
    XboxOne(XboxOne),
}

impl Controller {
    pub fn for_kind(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::DualShock3 => Self::DualShock3(DualShock3::default()),
            DeviceKind::DualShock4 => Self::DualShock4(DualShock4::default()),
            DeviceKind::DualSense => Self::DualSense(DualSense::default()),
            DeviceKind::SwitchGeneric
            | DeviceKind::JoyConLeft
            | DeviceKind::JoyConRight
            | DeviceKind::ProController
            | DeviceKind::SwitchRetro => Self::Switch(Switch::default()),
            DeviceKind::XboxOne => Self::XboxOne(XboxOne::default()),
        }
    }

    /// Send whatever start-up requests the family needs.
    pub fn init(&mut self, link: &DeviceLink<'_>) {
        match self {
            Self::DualShock3(c) => c.init(link),
            Self::DualShock4(c) => c.init(link),
            Self::DualSense(c) => c.init(link),
            Self::Switch(c) => c.init(link),
            Self::XboxOne(_) => {}
        }
    }

    /// Decode one input report into `status`. Returns `false` when the
    /// report was not recognized and nothing changed.
    pub fn parse(
        &mut self,
        bytes: &[u8],
        status: &mut DeviceStatus,
        ctx: &mut FamilyContext<'_>,
    ) -> bool {
        match self {
            Self::DualShock3(c) => c.parse(bytes, status),
            Self::DualShock4(c) => c.parse(bytes, status),
            Self::DualSense(c) => c.parse(bytes, status),
            Self::Switch(c) => c.parse(bytes, status, ctx),
            Self::XboxOne(c) => c.parse(bytes, status),
        }
    }

    pub fn set_led(&mut self, leds: u8, link: &DeviceLink<'_>) {
        match self {
            Self::DualShock3(c) => c.set_led(leds, link),
            Self::DualShock4(c) => c.set_led(leds, link),
            Self::DualSense(c) => c.set_led(leds, link),
            Self::Switch(c) => c.set_led(leds, link),
            // No player indicator on the Xbox pad.
            Self::XboxOne(_) => {}
        }
    }

    pub fn set_rumble(&mut self, on: bool, link: &DeviceLink<'_>) {
        match self {
            Self::DualShock3(c) => c.set_rumble(on, link),
            Self::DualShock4(c) => c.set_rumble(on, link),
            Self::DualSense(c) => c.set_rumble(on, link),
            Self::Switch(c) => c.set_rumble(on, link),
            Self::XboxOne(c) => c.set_rumble(on, link),
        }
    }

    /// Stop any running motor before the slot is released.
    pub fn teardown(&mut self, link: &DeviceLink<'_>) {
        if self.rumble() {
            self.set_rumble(false, link);
        }
    }

    fn rumble(&self) -> bool {
        match self {
            Self::DualShock3(c) => c.rumble,
            Self::DualShock4(c) => c.rumble,
            Self::DualSense(c) => c.rumble,
            Self::Switch(c) => c.rumble,
            Self::XboxOne(c) => c.rumble,
        }
    }

    /// Handshake progress for Switch-family devices.
    pub fn handshake_state(&self) -> Option<HandshakeState> {
        match self {
            Self::Switch(c) => Some(c.state()),
            _ => None,
        }
    }
}
