//! DualShock 4 input report parsing.
//!
//! Data block (offset 1 in report `0x01`, offset 3 in report `0x11`):
//!
//! | Data byte | Content |
//! |-----------|---------|
//! | 0–3 | LX, LY, RX, RY (0–255, Y grows downwards) |
//! | 4 | hat (low nibble, 0 = N clockwise, 8 = released), Square 0x10, Cross 0x20, Circle 0x40, Triangle 0x80 |
//! | 5 | L1 0x01, R1 0x02, L2 0x04, R2 0x08, Share 0x10, Options 0x20, L3 0x40, R3 0x80 |
//! | 6 | PS 0x01, touchpad click 0x02 |
//! | 29 | battery low nibble 0–10, cable 0x10 (full report only) |

use motebridge_hid_common::{ButtonTable, decode_bits};
use motebridge_report::{
    Axis, Button, CanonicalReport, hat_buttons, rescale_battery, rescale_bits,
};

use crate::ids::report_ids;

/// Full Bluetooth input report length.
pub const FULL_REPORT_LEN: usize = 78;

const REDUCED_OFFSET: usize = 1;
const FULL_OFFSET: usize = 3;
const BUTTON_DATA_LEN: usize = 7;
const BATTERY_INDEX: usize = 29;
const BATTERY_MAX: u8 = 10;
const CABLE: u8 = 0x10;

const FACE: &ButtonTable = &[
    (0x10, Button::West),
    (0x20, Button::South),
    (0x40, Button::East),
    (0x80, Button::North),
];

const SHOULDER: &ButtonTable = &[
    (0x01, Button::L1),
    (0x02, Button::R1),
    (0x04, Button::L2),
    (0x08, Button::R2),
    (0x10, Button::Select),
    (0x20, Button::Start),
    (0x40, Button::L3),
    (0x80, Button::R3),
];

const SYSTEM: &ButtonTable = &[(0x01, Button::Home), (0x02, Button::Touchpad)];

/// Decoded DualShock 4 input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ds4InputState {
    pub report: CanonicalReport,
    /// Battery level 0–4, `None` in reduced reports.
    pub battery: Option<u8>,
    pub charging: bool,
    /// `true` when decoded from the full `0x11` report.
    pub full: bool,
}

/// Parse report `0x01` or `0x11`; `None` for anything else.
pub fn parse_input_report(data: &[u8]) -> Option<Ds4InputState> {
    let (offset, full) = match data.first().copied()? {
        report_ids::INPUT_REDUCED => (REDUCED_OFFSET, false),
        report_ids::INPUT_FULL => (FULL_OFFSET, true),
        _ => return None,
    };
    let block = data.get(offset..offset + BUTTON_DATA_LEN)?;

    let mut report = CanonicalReport::new();
    report.set_buttons(
        hat_buttons(block[4] & 0x0F)
            | decode_bits(block[4], FACE)
            | decode_bits(block[5], SHOULDER)
            | decode_bits(block[6], SYSTEM),
    );
    report.set_axis(Axis::LeftX, i32::from(rescale_bits(u32::from(block[0]), 8)));
    report.set_axis(Axis::LeftY, -i32::from(rescale_bits(u32::from(block[1]), 8)));
    report.set_axis(Axis::RightX, i32::from(rescale_bits(u32::from(block[2]), 8)));
    report.set_axis(Axis::RightY, -i32::from(rescale_bits(u32::from(block[3]), 8)));

    let status = if full {
        data.get(offset + BATTERY_INDEX).copied()
    } else {
        None
    };

    Some(Ds4InputState {
        report,
        battery: status.map(|s| rescale_battery(s & 0x0F, BATTERY_MAX)),
        charging: status.is_some_and(|s| s & CABLE != 0),
        full,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_report() -> [u8; FULL_REPORT_LEN] {
        let mut r = [0u8; FULL_REPORT_LEN];
        r[0] = 0x11;
        r[1] = 0xC0;
        r[3..7].copy_from_slice(&[0x80; 4]);
        r[7] = 0x08;
        r
    }

    #[test]
    fn test_dpad_up_and_cross() -> Result<(), String> {
        let mut r = full_report();
        r[7] = 0x20;
        let state = parse_input_report(&r).ok_or("parse failed")?;
        assert_eq!(
            state.report.pressed().collect::<Vec<_>>(),
            vec![Button::Up, Button::South]
        );
        assert_eq!(state.report.axes(), [0; 4]);
        assert!(state.full);
        Ok(())
    }

    #[test]
    fn test_reduced_report_offset() -> Result<(), String> {
        let r = [0x01, 0x80, 0x80, 0x80, 0x80, 0x08 | 0x80, 0x21, 0x01, 0, 0];
        let state = parse_input_report(&r).ok_or("parse failed")?;
        assert_eq!(
            state.report.pressed().collect::<Vec<_>>(),
            vec![Button::North, Button::L1, Button::Start, Button::Home]
        );
        assert_eq!(state.battery, None);
        assert!(!state.full);
        Ok(())
    }

    #[test]
    fn test_battery_and_cable() -> Result<(), String> {
        let mut r = full_report();
        r[3 + 29] = 0x10 | 0x05;
        let state = parse_input_report(&r).ok_or("parse failed")?;
        assert_eq!(state.battery, Some(2));
        assert!(state.charging);
        r[3 + 29] = 0x0B;
        let state = parse_input_report(&r).ok_or("parse failed")?;
        assert_eq!(state.battery, Some(4));
        assert!(!state.charging);
        Ok(())
    }

    #[test]
    fn test_released_hat_values() -> Result<(), String> {
        let mut r = full_report();
        for hat in 8..16u8 {
            r[7] = hat;
            let state = parse_input_report(&r).ok_or("parse failed")?;
            assert_eq!(state.report.buttons(), 0, "hat {hat}");
        }
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_and_truncated() {
        assert!(parse_input_report(&[0x12, 0, 0, 0, 0, 0, 0, 0, 0, 0]).is_none());
        assert!(parse_input_report(&[0x11, 0xC0, 0x00, 0x80]).is_none());
        assert!(parse_input_report(&[]).is_none());
    }
}
