//! Switch-family input reports.
//!
//! Full report (`0x30`, and the state prefix of `0x21`):
//!
//! | Byte | Content |
//! |------|---------|
//! | 1 | timer |
//! | 2 | high nibble: battery level in bits 5–7 (0–4), charging 0x10 |
//! | 3 | right: Y 0x01, X 0x02, B 0x04, A 0x08, SR 0x10, SL 0x20, R 0x40, ZR 0x80 |
//! | 4 | shared: Minus 0x01, Plus 0x02, RS 0x04, LS 0x08, Home 0x10, Capture 0x20 |
//! | 5 | left: Down 0x01, Up 0x02, Right 0x04, Left 0x08, SR 0x10, SL 0x20, L 0x40, ZL 0x80 |
//! | 6–8 | left stick, two 12-bit values packed little-endian |
//! | 9–11 | right stick, same packing |
//!
//! Basic report (`0x3F`):
//!
//! | Byte | Content |
//! |------|---------|
//! | 1 | B 0x01, A 0x02, Y 0x04, X 0x08, L 0x10, R 0x20, ZL 0x40, ZR 0x80 |
//! | 2 | Minus 0x01, Plus 0x02, LS 0x04, RS 0x08, Home 0x10, Capture 0x20 |
//! | 3 | hat, 0 = N clockwise, 8 = released |
//! | 4–11 | LX, LY, RX, RY as u16 LE (Y grows downwards) |

use motebridge_hid_common::{ButtonTable, decode_bits};
use motebridge_report::{BATTERY_LEVEL_MAX, Button, hat_buttons};

use crate::ids::report_ids;

/// Number of distinct 12-bit stick values.
pub const STICK_RANGE_12BIT: u32 = 4096;

const FULL_MIN_LEN: usize = 12;
const BASIC_MIN_LEN: usize = 12;

const RIGHT: &ButtonTable = &[
    (0x01, Button::West),
    (0x02, Button::North),
    (0x04, Button::South),
    (0x08, Button::East),
    (0x10, Button::Sr),
    (0x20, Button::Sl),
    (0x40, Button::R1),
    (0x80, Button::R2),
];

const SHARED: &ButtonTable = &[
    (0x01, Button::Select),
    (0x02, Button::Start),
    (0x04, Button::R3),
    (0x08, Button::L3),
    (0x10, Button::Home),
    (0x20, Button::Capture),
];

const LEFT: &ButtonTable = &[
    (0x01, Button::Down),
    (0x02, Button::Up),
    (0x04, Button::Right),
    (0x08, Button::Left),
    (0x10, Button::Sr),
    (0x20, Button::Sl),
    (0x40, Button::L1),
    (0x80, Button::L2),
];

const BASIC_FACE: &ButtonTable = &[
    (0x01, Button::South),
    (0x02, Button::East),
    (0x04, Button::West),
    (0x08, Button::North),
    (0x10, Button::L1),
    (0x20, Button::R1),
    (0x40, Button::L2),
    (0x80, Button::R2),
];

const BASIC_SYSTEM: &ButtonTable = &[
    (0x01, Button::Select),
    (0x02, Button::Start),
    (0x04, Button::L3),
    (0x08, Button::R3),
    (0x10, Button::Home),
    (0x20, Button::Capture),
];

/// State decoded from a full (`0x30`/`0x21`) report. Sticks stay raw until
/// calibration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FullInput {
    /// Canonical button mask.
    pub buttons: u32,
    /// Raw 12-bit LX, LY, RX, RY (Y grows upwards).
    pub sticks: [u16; 4],
    /// Battery level 0–4.
    pub battery: u8,
    pub charging: bool,
}

/// State decoded from a basic (`0x3F`) report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BasicInput {
    pub buttons: u32,
    /// Raw 16-bit LX, LY, RX, RY (Y grows downwards).
    pub sticks: [u16; 4],
}

fn unpack_stick(b: &[u8]) -> (u16, u16) {
    let x = u16::from(b[0]) | (u16::from(b[1] & 0x0F) << 8);
    let y = u16::from(b[1] >> 4) | (u16::from(b[2]) << 4);
    (x, y)
}

/// Parse the full state of a `0x30` or `0x21` report.
pub fn parse_full_report(data: &[u8]) -> Option<FullInput> {
    if data.len() < FULL_MIN_LEN
        || !matches!(data[0], report_ids::FULL | report_ids::REPLY)
    {
        return None;
    }
    let (lx, ly) = unpack_stick(&data[6..9]);
    let (rx, ry) = unpack_stick(&data[9..12]);
    Some(FullInput {
        buttons: decode_bits(data[3], RIGHT)
            | decode_bits(data[4], SHARED)
            | decode_bits(data[5], LEFT),
        sticks: [lx, ly, rx, ry],
        battery: (data[2] >> 5).min(BATTERY_LEVEL_MAX),
        charging: data[2] & 0x10 != 0,
    })
}

/// Parse a basic `0x3F` report.
pub fn parse_basic_report(data: &[u8]) -> Option<BasicInput> {
    if data.len() < BASIC_MIN_LEN || data[0] != report_ids::BASIC {
        return None;
    }
    let le = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]);
    Some(BasicInput {
        buttons: decode_bits(data[1], BASIC_FACE)
            | decode_bits(data[2], BASIC_SYSTEM)
            | hat_buttons(data[3]),
        sticks: [le(4), le(6), le(8), le(10)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use motebridge_report::ButtonId;

    #[test]
    fn test_unpack_stick() {
        // x = 0x7FF, y = 0x800
        assert_eq!(unpack_stick(&[0xFF, 0x07, 0x80]), (0x7FF, 0x800));
        assert_eq!(unpack_stick(&[0xFF, 0xFF, 0xFF]), (0xFFF, 0xFFF));
    }

    #[test]
    fn test_full_report() -> Result<(), String> {
        let mut r = [0u8; 49];
        r[0] = 0x30;
        r[2] = 0x90;
        r[3] = 0x04 | 0x40;
        r[4] = 0x10;
        r[5] = 0x02;
        r[6..9].copy_from_slice(&[0x00, 0x08, 0x80]);
        let state = parse_full_report(&r).ok_or("parse failed")?;
        assert_eq!(
            state.buttons,
            Button::Up.mask() | Button::South.mask() | Button::R1.mask() | Button::Home.mask()
        );
        assert_eq!(state.sticks[0], 0x800);
        assert_eq!(state.sticks[1], 0x800);
        assert_eq!(state.battery, 4);
        assert!(state.charging);
        Ok(())
    }

    #[test]
    fn test_reply_carries_state() {
        let mut r = [0u8; 49];
        r[0] = 0x21;
        r[5] = 0x80;
        assert_eq!(
            parse_full_report(&r).map(|s| s.buttons),
            Some(Button::L2.mask())
        );
    }

    #[test]
    fn test_basic_report() -> Result<(), String> {
        let mut r = [0u8; 12];
        r[0] = 0x3F;
        r[1] = 0x02;
        r[2] = 0x20;
        r[3] = 0x06;
        r[4..6].copy_from_slice(&0x8000u16.to_le_bytes());
        let state = parse_basic_report(&r).ok_or("parse failed")?;
        assert_eq!(
            state.buttons,
            Button::Left.mask() | Button::East.mask() | Button::Capture.mask()
        );
        assert_eq!(state.sticks[0], 0x8000);
        Ok(())
    }

    #[test]
    fn test_rejects_other_reports() {
        assert!(parse_full_report(&[0x3F; 12]).is_none());
        assert!(parse_basic_report(&[0x30; 12]).is_none());
        assert!(parse_full_report(&[0x30; 8]).is_none());
    }
}
