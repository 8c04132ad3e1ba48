//! DualShock 3 input report parsing.
//!
//! Layout of report `0x01` (49 bytes):
//!
//! | Byte | Content |
//! |------|---------|
//! | 0 | report ID `0x01` |
//! | 2 | Select 0x01, L3 0x02, R3 0x04, Start 0x08, Up 0x10, Right 0x20, Down 0x40, Left 0x80 |
//! | 3 | L2 0x01, R2 0x02, L1 0x04, R1 0x08, Triangle 0x10, Circle 0x20, Cross 0x40, Square 0x80 |
//! | 4 | PS 0x01 |
//! | 6–9 | LX, LY, RX, RY (0–255, Y grows downwards) |
//! | 30 | battery: 0–5, `0xEE` charging, `0xEF` charged |

use motebridge_hid_common::{ButtonTable, decode_bits};
use motebridge_report::{
    Axis, BATTERY_LEVEL_MAX, Button, CanonicalReport, rescale_battery, rescale_bits,
};

use crate::ids::report_ids;

/// Full input report length.
pub const INPUT_REPORT_LEN: usize = 49;

const MIN_LEN: usize = 31;
const BATTERY_MAX: u8 = 5;
const BATTERY_CHARGING: u8 = 0xEE;
const BATTERY_CHARGED: u8 = 0xEF;

const BYTE2: &ButtonTable = &[
    (0x01, Button::Select),
    (0x02, Button::L3),
    (0x04, Button::R3),
    (0x08, Button::Start),
    (0x10, Button::Up),
    (0x20, Button::Right),
    (0x40, Button::Down),
    (0x80, Button::Left),
];

const BYTE3: &ButtonTable = &[
    (0x01, Button::L2),
    (0x02, Button::R2),
    (0x04, Button::L1),
    (0x08, Button::R1),
    (0x10, Button::North),
    (0x20, Button::East),
    (0x40, Button::South),
    (0x80, Button::West),
];

/// Decoded DualShock 3 input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ds3InputState {
    pub report: CanonicalReport,
    /// Battery level 0–4.
    pub battery: u8,
    pub charging: bool,
}

/// Parse an input report.
///
/// Returns `None` for other report IDs or truncated reports.
pub fn parse_input_report(data: &[u8]) -> Option<Ds3InputState> {
    if data.len() < MIN_LEN || data[0] != report_ids::INPUT {
        return None;
    }

    let mut report = CanonicalReport::new();
    report.set_buttons(decode_bits(data[2], BYTE2) | decode_bits(data[3], BYTE3));
    report.set(Button::Home, data[4] & 0x01 != 0);

    report.set_axis(Axis::LeftX, i32::from(rescale_bits(u32::from(data[6]), 8)));
    report.set_axis(Axis::LeftY, -i32::from(rescale_bits(u32::from(data[7]), 8)));
    report.set_axis(Axis::RightX, i32::from(rescale_bits(u32::from(data[8]), 8)));
    report.set_axis(Axis::RightY, -i32::from(rescale_bits(u32::from(data[9]), 8)));

    let (battery, charging) = match data[30] {
        BATTERY_CHARGING | BATTERY_CHARGED => (BATTERY_LEVEL_MAX, true),
        level => (rescale_battery(level, BATTERY_MAX), false),
    };

    Some(Ds3InputState {
        report,
        battery,
        charging,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral() -> [u8; INPUT_REPORT_LEN] {
        let mut r = [0u8; INPUT_REPORT_LEN];
        r[0] = 0x01;
        r[6..10].copy_from_slice(&[0x80; 4]);
        r[30] = 0x05;
        r
    }

    #[test]
    fn test_neutral_report() -> Result<(), String> {
        let state = parse_input_report(&neutral()).ok_or("parse failed")?;
        assert!(state.report.is_neutral());
        assert_eq!(state.battery, 4);
        assert!(!state.charging);
        Ok(())
    }

    #[test]
    fn test_buttons() -> Result<(), String> {
        let mut r = neutral();
        r[2] = 0x10 | 0x08;
        r[3] = 0x40 | 0x04;
        r[4] = 0x01;
        let state = parse_input_report(&r).ok_or("parse failed")?;
        let pressed: Vec<_> = state.report.pressed().collect();
        assert_eq!(
            pressed,
            vec![Button::Up, Button::South, Button::L1, Button::Start, Button::Home]
        );
        Ok(())
    }

    #[test]
    fn test_y_axis_points_up() -> Result<(), String> {
        let mut r = neutral();
        r[7] = 0x00;
        r[9] = 0xFF;
        let state = parse_input_report(&r).ok_or("parse failed")?;
        assert_eq!(state.report.axis(Axis::LeftY), 1023);
        assert!(state.report.axis(Axis::RightY) < -1000);
        Ok(())
    }

    #[test]
    fn test_battery_states() -> Result<(), String> {
        let mut r = neutral();
        r[30] = BATTERY_CHARGING;
        let state = parse_input_report(&r).ok_or("parse failed")?;
        assert!(state.charging);
        r[30] = 0x01;
        let state = parse_input_report(&r).ok_or("parse failed")?;
        assert_eq!(state.battery, 0);
        assert!(!state.charging);
        Ok(())
    }

    #[test]
    fn test_rejects_other_ids_and_short() {
        let mut r = neutral();
        r[0] = 0x02;
        assert!(parse_input_report(&r).is_none());
        assert!(parse_input_report(&neutral()[..20]).is_none());
        assert!(parse_input_report(&[]).is_none());
    }
}
