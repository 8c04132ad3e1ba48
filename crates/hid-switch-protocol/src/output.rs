//! Switch-family output reports.

use crate::ids::{report_ids, subcommands};

/// Length of a `0x01` rumble + subcommand report.
pub const SUBCOMMAND_REPORT_LEN: usize = 49;

/// Length of a `0x10` rumble-only report.
pub const RUMBLE_REPORT_LEN: usize = 10;

/// Rumble data for both actuators at rest (160 Hz / 320 Hz, zero amplitude).
pub const NEUTRAL_RUMBLE: [u8; 8] = [0x00, 0x01, 0x40, 0x40, 0x00, 0x01, 0x40, 0x40];

/// Rumble data for a moderate buzz on both actuators.
pub const ACTIVE_RUMBLE: [u8; 8] = [0x28, 0x88, 0x60, 0x61, 0x28, 0x88, 0x60, 0x61];

const SUBCOMMAND_OFFSET: usize = 10;
const ARGS_OFFSET: usize = 11;

/// 4-bit packet counter carried in byte 1 of every output report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketCounter(u8);

impl PacketCounter {
    /// Current value, then advance modulo 16.
    pub fn next(&mut self) -> u8 {
        let value = self.0;
        self.0 = (self.0 + 1) & 0x0F;
        value
    }
}

fn rumble_bytes(on: bool) -> [u8; 8] {
    if on { ACTIVE_RUMBLE } else { NEUTRAL_RUMBLE }
}

/// Build a `0x01` report carrying rumble data and a subcommand.
///
/// Layout (49 bytes):
/// - Byte 0: `0x01` (report ID)
/// - Byte 1: packet counter (low nibble)
/// - Bytes 2–9: rumble data
/// - Byte 10: subcommand ID
/// - Bytes 11–48: arguments, truncated to fit
pub fn build_subcommand_report(
    counter: u8,
    rumble: bool,
    subcommand: u8,
    args: &[u8],
) -> [u8; SUBCOMMAND_REPORT_LEN] {
    let mut out = [0u8; SUBCOMMAND_REPORT_LEN];
    out[0] = report_ids::SUBCOMMAND;
    out[1] = counter & 0x0F;
    out[2..10].copy_from_slice(&rumble_bytes(rumble));
    out[SUBCOMMAND_OFFSET] = subcommand;
    let n = args.len().min(SUBCOMMAND_REPORT_LEN - ARGS_OFFSET);
    out[ARGS_OFFSET..ARGS_OFFSET + n].copy_from_slice(&args[..n]);
    out
}

/// Build a `0x10` rumble-only report.
pub fn build_rumble_report(counter: u8, on: bool) -> [u8; RUMBLE_REPORT_LEN] {
    let mut out = [0u8; RUMBLE_REPORT_LEN];
    out[0] = report_ids::RUMBLE;
    out[1] = counter & 0x0F;
    out[2..10].copy_from_slice(&rumble_bytes(on));
    out
}

/// Arguments of an SPI flash read subcommand.
pub fn spi_read_args(address: u32, len: u8) -> [u8; 5] {
    let a = address.to_le_bytes();
    [a[0], a[1], a[2], a[3], len]
}

/// Arguments of the player lights subcommand: low nibble = lights on.
pub fn player_lights_args(leds: u8) -> [u8; 1] {
    [leds & 0x0F]
}

/// Arguments of the input mode subcommand selecting the full report.
pub fn full_input_mode_args() -> [u8; 1] {
    [subcommands::INPUT_MODE_FULL]
}
