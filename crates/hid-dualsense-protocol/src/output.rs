//! DualSense Bluetooth output report.

use motebridge_hid_common::seal_bt_crc;

use crate::ids::report_ids;

/// Bluetooth output report length, including the trailing CRC.
pub const OUTPUT_REPORT_LEN: usize = 78;

/// Start of the common output block shared with the USB report.
const COMMON: usize = 3;

const TAG: u8 = 0x10;
const VALID0_COMPATIBLE_VIBRATION: u8 = 0x01;
const VALID0_HAPTICS_SELECT: u8 = 0x02;
const VALID1_LIGHTBAR: u8 = 0x04;
const VALID1_PLAYER_LEDS: u8 = 0x10;
const VALID2_LIGHTBAR_SETUP: u8 = 0x02;
const LIGHTBAR_SETUP_LIGHT_OUT: u8 = 0x02;

/// Player LED patterns for players 1–4 (five LEDs, centre is bit 2).
const PLAYER_PATTERNS: [u8; 4] = [0x04, 0x0A, 0x15, 0x1B];

/// Lightbar colours for players 1–4.
const PLAYER_COLORS: [[u8; 3]; 4] = [
    [0x00, 0x00, 0x40],
    [0x40, 0x00, 0x00],
    [0x00, 0x40, 0x00],
    [0x20, 0x00, 0x20],
];

/// Player index (0–3) for an LED mask: lowest set bit wins.
fn player_index(leds: u8) -> Option<usize> {
    let leds = leds & 0x0F;
    (leds != 0).then(|| leds.trailing_zeros() as usize)
}

/// Player LED pattern for a target LED mask; `0` turns the LEDs off.
pub fn player_pattern(leds: u8) -> u8 {
    player_index(leds).map_or(0, |i| PLAYER_PATTERNS[i])
}

/// Running 4-bit sequence counter carried in byte 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSequence(u8);

impl OutputSequence {
    /// Current value, then advance modulo 16.
    pub fn next(&mut self) -> u8 {
        let seq = self.0;
        self.0 = (self.0 + 1) & 0x0F;
        seq
    }
}

/// Build output report `0x31`.
///
/// Layout (78 bytes):
/// - Byte 0: `0x31` (report ID)
/// - Byte 1: sequence number in the high nibble
/// - Byte 2: `0x10` (tag)
/// - Bytes 3–4: valid flags 0/1
/// - Byte 5: right motor, byte 6: left motor
/// - Byte 41: valid flag 2
/// - Byte 44: lightbar setup
/// - Byte 46: player LEDs
/// - Bytes 47–49: lightbar RGB
/// - Bytes 74–77: CRC32 little-endian
///
/// The lightbar setup flag is only sent with `release_lightbar`, which the
/// first report after connect needs to take the lightbar out of its boot
/// animation.
pub fn build_output_report(
    seq: u8,
    leds: u8,
    rumble: bool,
    release_lightbar: bool,
) -> [u8; OUTPUT_REPORT_LEN] {
    let mut out = [0u8; OUTPUT_REPORT_LEN];
    out[0] = report_ids::OUTPUT;
    out[1] = (seq & 0x0F) << 4;
    out[2] = TAG;

    out[COMMON] = VALID0_COMPATIBLE_VIBRATION | VALID0_HAPTICS_SELECT;
    out[COMMON + 1] = VALID1_LIGHTBAR | VALID1_PLAYER_LEDS;
    if rumble {
        out[COMMON + 2] = 0xFF;
        out[COMMON + 3] = 0xFF;
    }
    if release_lightbar {
        out[COMMON + 38] = VALID2_LIGHTBAR_SETUP;
        out[COMMON + 41] = LIGHTBAR_SETUP_LIGHT_OUT;
    }
    out[COMMON + 43] = player_pattern(leds);
    let color = player_index(leds).map_or([0; 3], |i| PLAYER_COLORS[i]);
    out[COMMON + 44..COMMON + 47].copy_from_slice(&color);

    seal_bt_crc(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use motebridge_hid_common::verify_bt_crc;

    #[test]
    fn test_layout() {
        let out = build_output_report(3, 0b0010, true, true);
        assert_eq!(out[0], 0x31);
        assert_eq!(out[1], 0x30);
        assert_eq!(out[2], 0x10);
        assert_eq!(out[3], 0x03);
        assert_eq!(out[4], 0x14);
        assert_eq!((out[5], out[6]), (0xFF, 0xFF));
        assert_eq!(out[41], 0x02);
        assert_eq!(out[44], 0x02);
        assert_eq!(out[46], 0x0A);
        assert_eq!(&out[47..50], &[0x40, 0x00, 0x00]);
        assert!(verify_bt_crc(&out));
    }

    #[test]
    fn test_no_lightbar_release() {
        let out = build_output_report(0, 0, false, false);
        assert_eq!(out[41], 0);
        assert_eq!(out[44], 0);
        assert_eq!(out[46], 0);
        assert!(verify_bt_crc(&out));
    }

    #[test]
    fn test_player_patterns() {
        assert_eq!(player_pattern(0b0001), 0x04);
        assert_eq!(player_pattern(0b0010), 0x0A);
        assert_eq!(player_pattern(0b0100), 0x15);
        assert_eq!(player_pattern(0b1000), 0x1B);
        assert_eq!(player_pattern(0b0011), 0x04);
        assert_eq!(player_pattern(0), 0);
    }

    #[test]
    fn test_sequence_wraps() {
        let mut seq = OutputSequence::default();
        let values: Vec<u8> = (0..18).map(|_| seq.next()).collect();
        assert_eq!(values[15], 15);
        assert_eq!(values[16], 0);
        assert_eq!(values[17], 1);
    }
}
