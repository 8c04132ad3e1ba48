//! Nintendo Switch-family identifiers, subcommand codes and SPI addresses.

use motebridge_report::DeviceKind;

/// Nintendo vendor ID.
pub const NINTENDO_VENDOR_ID: u16 = 0x057E;

pub mod product_ids {
    pub const JOYCON_LEFT: u16 = 0x2006;
    pub const JOYCON_RIGHT: u16 = 0x2007;
    pub const PRO_CONTROLLER: u16 = 0x2009;
    /// SNES controller for Switch Online.
    pub const SNES_CONTROLLER: u16 = 0x2017;

    pub const ALL: [u16; 4] = [JOYCON_LEFT, JOYCON_RIGHT, PRO_CONTROLLER, SNES_CONTROLLER];
}

pub mod report_ids {
    /// Output: rumble plus subcommand.
    pub const SUBCOMMAND: u8 = 0x01;
    /// Output: rumble only.
    pub const RUMBLE: u8 = 0x10;
    /// Input: full state plus subcommand reply.
    pub const REPLY: u8 = 0x21;
    /// Input: full state, sent every 15 ms in mode `0x30`.
    pub const FULL: u8 = 0x30;
    /// Input: basic HID state, sent on change.
    pub const BASIC: u8 = 0x3F;
}

pub mod subcommands {
    pub const DEVICE_INFO: u8 = 0x02;
    pub const SET_INPUT_MODE: u8 = 0x03;
    pub const SPI_READ: u8 = 0x10;
    pub const SET_PLAYER_LIGHTS: u8 = 0x30;
    pub const ENABLE_VIBRATION: u8 = 0x48;

    /// Argument of [`SET_INPUT_MODE`] selecting the full report.
    pub const INPUT_MODE_FULL: u8 = 0x30;
}

/// SPI flash addresses of the stick calibration blocks.
pub mod spi {
    /// `B2 A1` here means the user left-stick block is present.
    pub const USER_LEFT_MAGIC: u32 = 0x8010;
    pub const USER_LEFT_DATA: u32 = 0x8012;
    /// `B2 A1` here means the user right-stick block is present.
    pub const USER_RIGHT_MAGIC: u32 = 0x801B;
    pub const USER_RIGHT_DATA: u32 = 0x801D;
    pub const FACTORY_LEFT_DATA: u32 = 0x603D;
    pub const FACTORY_RIGHT_DATA: u32 = 0x6046;
}

/// Refine a device-info sub-type byte into a concrete kind.
///
/// Unknown sub-types return `None`; the device stays generic.
pub fn device_type_kind(device_type: u8) -> Option<DeviceKind> {
    match device_type {
        0x01 => Some(DeviceKind::JoyConLeft),
        0x02 => Some(DeviceKind::JoyConRight),
        0x03 => Some(DeviceKind::ProController),
        0x0B..=0x0E => Some(DeviceKind::SwitchRetro),
        _ => None,
    }
}
