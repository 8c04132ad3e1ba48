//! Xbox One rumble output report.

use crate::ids::report_ids;

pub const RUMBLE_REPORT_LEN: usize = 9;

/// Enable flags for the strong and weak main motors.
const ENABLE_MAIN_MOTORS: u8 = 0x03;
const MAGNITUDE: u8 = 0x64;
const DURATION_MAX: u8 = 0xFF;

/// Build rumble report `0x03`.
///
/// Layout (9 bytes):
/// - Byte 0: `0x03` (report ID)
/// - Byte 1: motor enable flags
/// - Bytes 2–3: left/right trigger motors (unused)
/// - Byte 4: strong motor, byte 5: weak motor (0–100)
/// - Byte 6: duration in 10 ms units
/// - Byte 7: start delay, byte 8: loop count
pub fn build_rumble_report(on: bool) -> [u8; RUMBLE_REPORT_LEN] {
    let magnitude = if on { MAGNITUDE } else { 0 };
    [
        report_ids::RUMBLE,
        ENABLE_MAIN_MOTORS,
        0,
        0,
        magnitude,
        magnitude,
        DURATION_MAX,
        0,
        0,
    ]
}
