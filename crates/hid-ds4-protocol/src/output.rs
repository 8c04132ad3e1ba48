//! DualShock 4 Bluetooth output report.

use motebridge_hid_common::seal_bt_crc;

use crate::ids::report_ids;

/// Bluetooth output report length, including the trailing CRC.
pub const OUTPUT_REPORT_LEN: usize = 78;

const FLAGS_HID_CRC: u8 = 0xC0;
const FLAGS_RUMBLE_LED_FLASH: u8 = 0x07;
const RUMBLE_WEAK: u8 = 0x80;
const RUMBLE_STRONG: u8 = 0xFF;

/// Lightbar colours for players 1–4.
const PLAYER_COLORS: [[u8; 3]; 4] = [
    [0x00, 0x00, 0x40],
    [0x40, 0x00, 0x00],
    [0x00, 0x40, 0x00],
    [0x20, 0x00, 0x20],
];

/// Lightbar colour for a player LED mask: the lowest set bit selects the
/// player, an empty mask turns the lightbar off.
pub fn player_color(leds: u8) -> [u8; 3] {
    let leds = leds & 0x0F;
    if leds == 0 {
        return [0; 3];
    }
    PLAYER_COLORS[leds.trailing_zeros() as usize]
}

/// Build output report `0x11`.
///
/// Layout (78 bytes):
/// - Byte 0: `0x11` (report ID)
/// - Byte 1: `0xC0` (HID + CRC flags)
/// - Byte 3: `0x07` (rumble, lightbar and flash valid)
/// - Byte 6: weak (right) motor
/// - Byte 7: strong (left) motor
/// - Bytes 8–10: lightbar RGB
/// - Bytes 11–12: flash on/off (zero = steady)
/// - Bytes 74–77: CRC32 little-endian
pub fn build_output_report(leds: u8, rumble: bool) -> [u8; OUTPUT_REPORT_LEN] {
    let mut out = [0u8; OUTPUT_REPORT_LEN];
    out[0] = report_ids::OUTPUT;
    out[1] = FLAGS_HID_CRC;
    out[3] = FLAGS_RUMBLE_LED_FLASH;
    if rumble {
        out[6] = RUMBLE_WEAK;
        out[7] = RUMBLE_STRONG;
    }
    out[8..11].copy_from_slice(&player_color(leds));
    seal_bt_crc(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use motebridge_hid_common::verify_bt_crc;

    #[test]
    fn test_header_and_crc() {
        let out = build_output_report(0x01, false);
        assert_eq!(out[0], 0x11);
        assert_eq!(out[1], 0xC0);
        assert_eq!(out[3], 0x07);
        assert_eq!(&out[8..11], &[0x00, 0x00, 0x40]);
        assert!(verify_bt_crc(&out));
    }

    #[test]
    fn test_rumble() {
        let out = build_output_report(0, true);
        assert_eq!((out[6], out[7]), (0x80, 0xFF));
        assert_eq!(&out[8..11], &[0; 3]);
        assert!(verify_bt_crc(&out));
    }

    #[test]
    fn test_player_colors() {
        assert_eq!(player_color(0b0010), [0x40, 0x00, 0x00]);
        assert_eq!(player_color(0b0110), [0x40, 0x00, 0x00]);
        assert_eq!(player_color(0b1000), [0x20, 0x00, 0x20]);
        assert_eq!(player_color(0xF0), [0; 3]);
    }
}
