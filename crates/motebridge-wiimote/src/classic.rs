//! Classic extension data format (6 bytes).
//!
//! | Byte | 7 | 6 | 5 | 4 | 3 | 2 | 1 | 0 |
//! |------|---|---|---|---|---|---|---|---|
//! | 0 | RX 4 | RX 3 | LX 5..0 |||||
//! | 1 | RX 2 | RX 1 | LY 5..0 |||||
//! | 2 | RX 0 | LT 4 | LT 3 | RY 4..0 ||||
//! | 3 | LT 2 | LT 1 | LT 0 | RT 4..0 ||||
//! | 4 | Right | Down | L | Minus | Home | Plus | R | 1 |
//! | 5 | ZL | B | Y | A | X | ZR | Left | Up |
//!
//! Sticks are unsigned with the centre at half range and Y growing upwards.
//! Buttons are active low.

use motebridge_report::{Axis, TargetButton, TargetReport};

/// Length of the classic data block.
pub const CLASSIC_DATA_LEN: usize = 6;

const TRIGGER_FULL: u8 = 0x1F;

const BYTE4: [(u8, TargetButton); 7] = [
    (0x80, TargetButton::Right),
    (0x40, TargetButton::Down),
    (0x20, TargetButton::L),
    (0x10, TargetButton::Minus),
    (0x08, TargetButton::Home),
    (0x04, TargetButton::Plus),
    (0x02, TargetButton::R),
];

const BYTE5: [(u8, TargetButton); 8] = [
    (0x80, TargetButton::Zl),
    (0x40, TargetButton::B),
    (0x20, TargetButton::Y),
    (0x10, TargetButton::A),
    (0x08, TargetButton::X),
    (0x04, TargetButton::Zr),
    (0x02, TargetButton::Left),
    (0x01, TargetButton::Up),
];

/// Quantize a canonical axis value to `bits` unsigned bits.
fn quantize(value: i16, bits: u32) -> u8 {
    let steps = 1i32 << bits;
    let q = (i32::from(value) + 1024) * steps / 2048;
    // Fits: clamped to at most 63.
    q.clamp(0, steps - 1) as u8
}

/// Inverse of [`quantize`] at the step's lower edge.
fn expand(q: u8, bits: u32) -> i32 {
    i32::from(q) * (2048 >> bits) - 1024
}

/// Encode the classic data block for `report`.
pub fn encode_classic(report: &TargetReport) -> [u8; CLASSIC_DATA_LEN] {
    let lx = quantize(report.axis(Axis::LeftX), 6);
    let ly = quantize(report.axis(Axis::LeftY), 6);
    let rx = quantize(report.axis(Axis::RightX), 5);
    let ry = quantize(report.axis(Axis::RightY), 5);
    let lt = if report.is_pressed(TargetButton::L) { TRIGGER_FULL } else { 0 };
    let rt = if report.is_pressed(TargetButton::R) { TRIGGER_FULL } else { 0 };

    let released = |table: &[(u8, TargetButton)], idle: u8| {
        table
            .iter()
            .filter(|(_, b)| report.is_pressed(*b))
            .fold(idle, |acc, (bit, _)| acc & !bit)
    };

    [
        ((rx & 0x18) << 3) | (lx & 0x3F),
        ((rx & 0x06) << 5) | (ly & 0x3F),
        ((rx & 0x01) << 7) | ((lt & 0x18) << 2) | (ry & 0x1F),
        ((lt & 0x07) << 5) | (rt & 0x1F),
        released(&BYTE4, 0xFF),
        released(&BYTE5, 0xFF),
    ]
}

/// Decode a classic data block back into a target report.
///
/// Axes come back at the lower edge of their quantization step. Core
/// buttons are not part of the block and stay released.
pub fn decode_classic(data: &[u8; CLASSIC_DATA_LEN]) -> TargetReport {
    let lx = data[0] & 0x3F;
    let ly = data[1] & 0x3F;
    let rx = ((data[0] >> 3) & 0x18) | ((data[1] >> 5) & 0x06) | (data[2] >> 7);
    let ry = data[2] & 0x1F;

    let mut report = TargetReport::new();
    for (bit, button) in BYTE4 {
        report.set(button, data[4] & bit == 0);
    }
    for (bit, button) in BYTE5 {
        report.set(button, data[5] & bit == 0);
    }
    report.set_axis(Axis::LeftX, expand(lx, 6));
    report.set_axis(Axis::LeftY, expand(ly, 6));
    report.set_axis(Axis::RightX, expand(rx, 5));
    report.set_axis(Axis::RightY, expand(ry, 5));
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_block() {
        let block = encode_classic(&TargetReport::new());
        // LX = LY = 32, RX = RY = 16, triggers 0, nothing pressed.
        assert_eq!(block, [0x20 | 0x80, 0x20, 0x10, 0x00, 0xFF, 0xFF]);
        assert!(decode_classic(&block).is_neutral());
    }

    #[test]
    fn test_quantize_edges() {
        assert_eq!(quantize(-1023, 6), 0);
        assert_eq!(quantize(1023, 6), 63);
        assert_eq!(quantize(0, 6), 32);
        assert_eq!(quantize(-1023, 5), 0);
        assert_eq!(quantize(1023, 5), 31);
        assert_eq!(quantize(0, 5), 16);
    }

    #[test]
    fn test_buttons_active_low() {
        let mut r = TargetReport::new();
        r.press(TargetButton::B);
        r.press(TargetButton::Up);
        r.press(TargetButton::Home);
        let block = encode_classic(&r);
        assert_eq!(block[4], 0xFF & !0x08);
        assert_eq!(block[5], 0xFF & !0x40 & !0x01);
        let back = decode_classic(&block);
        assert_eq!(back.buttons(), r.buttons());
    }

    #[test]
    fn test_triggers_follow_shoulders() {
        let mut r = TargetReport::new();
        r.press(TargetButton::L);
        let block = encode_classic(&r);
        assert_eq!((block[2] >> 5) & 0x03, 0x03);
        assert_eq!(block[3] >> 5, 0x07);
        assert_eq!(block[3] & 0x1F, 0);
    }

    #[test]
    fn test_axes_roundtrip_within_step() {
        let mut r = TargetReport::new();
        r.set_axis(Axis::LeftX, -700);
        r.set_axis(Axis::LeftY, 300);
        r.set_axis(Axis::RightX, 1000);
        r.set_axis(Axis::RightY, -50);
        let back = decode_classic(&encode_classic(&r));
        for axis in [Axis::LeftX, Axis::LeftY] {
            assert!((back.axis(axis) - r.axis(axis)).abs() < 32, "{axis:?}");
        }
        for axis in [Axis::RightX, Axis::RightY] {
            assert!((back.axis(axis) - r.axis(axis)).abs() < 64, "{axis:?}");
        }
    }
}
