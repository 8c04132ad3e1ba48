//! DualShock 3 output reports.

use crate::ids::report_ids;

/// Output report `0x01` length.
pub const OUTPUT_REPORT_LEN: usize = 49;

/// Feature report that starts Bluetooth input reporting.
pub const ENABLE_REPORT: [u8; 5] = [report_ids::ENABLE, 0x42, 0x03, 0x00, 0x00];

/// Per-LED blink parameters: duty length, enabled, duty off, duty on, pad.
const LED_PARAMS: [u8; 5] = [0xFF, 0x27, 0x10, 0x00, 0x32];

/// Build the enable feature report.
pub fn build_enable_report() -> [u8; 5] {
    ENABLE_REPORT
}

/// Build output report `0x01`.
///
/// Layout (49 bytes):
/// - Byte 0: `0x01` (report ID)
/// - Bytes 1–5: rumble (padding, right duration, right on, left duration, left force)
/// - Bytes 6–9: reserved
/// - Byte 10: LED bitmap, player LED N at bit N (1–4)
/// - Bytes 11–35: four 5-byte LED parameter blocks, then one zeroed block
/// - Bytes 36–48: reserved
///
/// `leds` uses bit 0 for player 1.
pub fn build_output_report(leds: u8, rumble: bool) -> [u8; OUTPUT_REPORT_LEN] {
    let mut out = [0u8; OUTPUT_REPORT_LEN];
    out[0] = report_ids::OUTPUT;
    if rumble {
        out[2] = 0xFE;
        out[3] = 0x01;
        out[4] = 0xFE;
        out[5] = 0xFF;
    }
    out[10] = (leds & 0x0F) << 1;
    for block in out[11..31].chunks_exact_mut(LED_PARAMS.len()) {
        block.copy_from_slice(&LED_PARAMS);
    }
    out
}
