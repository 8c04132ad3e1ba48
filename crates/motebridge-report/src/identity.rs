//! Device identity types: Bluetooth address, device kind and family.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A 6-byte Bluetooth device address, most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BdAddr(pub [u8; 6]);

impl BdAddr {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Failure to parse a colon-separated Bluetooth address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBdAddrError(String);

impl fmt::Display for ParseBdAddrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bluetooth address: {}", self.0)
    }
}

impl std::error::Error for ParseBdAddrError {}

impl FromStr for BdAddr {
    type Err = ParseBdAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 6];
        let mut parts = s.split(':');
        for byte in &mut out {
            let part = parts.next().ok_or_else(|| ParseBdAddrError(s.to_string()))?;
            if part.len() != 2 {
                return Err(ParseBdAddrError(s.to_string()));
            }
            *byte = u8::from_str_radix(part, 16)
                .map_err(|err| ParseBdAddrError(format!("{s} ({err})")))?;
        }
        if parts.next().is_some() {
            return Err(ParseBdAddrError(s.to_string()));
        }
        Ok(Self(out))
    }
}

/// Controller family: groups kinds that share a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    PlayStation,
    Switch,
    Xbox,
}

/// Concrete device kind. The high nibble encodes the family block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DeviceKind {
    DualShock3 = 0x10,
    DualShock4 = 0x11,
    DualSense = 0x12,
    /// Switch-family device before its device-info reply arrived.
    SwitchGeneric = 0x20,
    JoyConLeft = 0x21,
    JoyConRight = 0x22,
    ProController = 0x23,
    /// Retro/alternate pads without analog sticks.
    SwitchRetro = 0x24,
    XboxOne = 0x30,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 9] = [
        DeviceKind::DualShock3,
        DeviceKind::DualShock4,
        DeviceKind::DualSense,
        DeviceKind::SwitchGeneric,
        DeviceKind::JoyConLeft,
        DeviceKind::JoyConRight,
        DeviceKind::ProController,
        DeviceKind::SwitchRetro,
        DeviceKind::XboxOne,
    ];

    pub const fn family(self) -> Family {
        match self {
            DeviceKind::DualShock3 | DeviceKind::DualShock4 | DeviceKind::DualSense => {
                Family::PlayStation
            }
            DeviceKind::SwitchGeneric
            | DeviceKind::JoyConLeft
            | DeviceKind::JoyConRight
            | DeviceKind::ProController
            | DeviceKind::SwitchRetro => Family::Switch,
            DeviceKind::XboxOne => Family::Xbox,
        }
    }

    /// Wire value of this kind.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_u8() == value)
    }

    /// `false` for kinds with no analog sticks to calibrate.
    pub const fn has_sticks(self) -> bool {
        !matches!(self, DeviceKind::SwitchRetro)
    }

    pub const fn name(self) -> &'static str {
        match self {
            DeviceKind::DualShock3 => "DualShock 3",
            DeviceKind::DualShock4 => "DualShock 4",
            DeviceKind::DualSense => "DualSense",
            DeviceKind::SwitchGeneric => "Switch controller",
            DeviceKind::JoyConLeft => "Joy-Con (L)",
            DeviceKind::JoyConRight => "Joy-Con (R)",
            DeviceKind::ProController => "Pro Controller",
            DeviceKind::SwitchRetro => "Switch retro pad",
            DeviceKind::XboxOne => "Xbox One controller",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
