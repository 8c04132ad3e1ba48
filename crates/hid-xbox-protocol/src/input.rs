//! Xbox One input report parsing.
//!
//! Report `0x01` (17 bytes):
//!
//! | Byte | Content |
//! |------|---------|
//! | 1–8 | LX, LY, RX, RY as u16 LE (0–65535, Y grows downwards) |
//! | 9–12 | LT, RT as u16 LE (10-bit) |
//! | 13 | hat: 1 = N clockwise to 8 = NW, 0 = released |
//! | 14 | A 0x01, B 0x02, X 0x08, Y 0x10, LB 0x40, RB 0x80 |
//! | 15 | View 0x04, Menu 0x08, Guide 0x10, LS 0x20, RS 0x40 |
//! | 16 | Share 0x01 |
//!
//! Report `0x02`: byte 1 bit 0 = Guide. Report `0x04`: byte 1 bits 0–1 battery
//! level 0–3, bit 4 charging.

use motebridge_hid_common::{ButtonTable, decode_bits};
use motebridge_report::{
    Axis, Button, CanonicalReport, hat_buttons, rescale_battery, rescale_bits,
};

use crate::ids::report_ids;

/// Gamepad report length.
pub const GAMEPAD_REPORT_LEN: usize = 17;

/// Trigger value (of 1023) at which a trigger counts as pressed.
pub const TRIGGER_THRESHOLD: u16 = 256;

const BATTERY_MAX: u8 = 3;
const CHARGING: u8 = 0x10;

const FACE: &ButtonTable = &[
    (0x01, Button::South),
    (0x02, Button::East),
    (0x08, Button::West),
    (0x10, Button::North),
    (0x40, Button::L1),
    (0x80, Button::R1),
];

const SYSTEM: &ButtonTable = &[
    (0x04, Button::Select),
    (0x08, Button::Start),
    (0x10, Button::Home),
    (0x20, Button::L3),
    (0x40, Button::R3),
];

const EXTRA: &ButtonTable = &[(0x01, Button::Capture)];

/// One decoded Xbox input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XboxInput {
    /// Complete gamepad state.
    Gamepad(CanonicalReport),
    /// Guide button state only.
    Guide(bool),
    /// Battery level 0–4 and charging flag.
    Battery { level: u8, charging: bool },
}

fn le16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

/// Rotate the 1-based hat (0 = released) onto the zero-based table.
fn rotate_hat(raw: u8) -> u8 {
    if raw > 8 { 8 } else { (raw + 8) % 9 }
}

/// Parse report `0x01`, `0x02` or `0x04`; `None` for anything else.
pub fn parse_input_report(data: &[u8]) -> Option<XboxInput> {
    match data.first().copied()? {
        report_ids::GAMEPAD if data.len() >= GAMEPAD_REPORT_LEN => {
            let mut report = CanonicalReport::new();
            report.set_buttons(
                hat_buttons(rotate_hat(data[13]))
                    | decode_bits(data[14], FACE)
                    | decode_bits(data[15], SYSTEM)
                    | decode_bits(data[16], EXTRA),
            );
            report.set(Button::L2, le16(data, 9) >= TRIGGER_THRESHOLD);
            report.set(Button::R2, le16(data, 11) >= TRIGGER_THRESHOLD);

            let stick = |at: usize| rescale_bits(u32::from(le16(data, at)), 16);
            report.set_axis(Axis::LeftX, i32::from(stick(1)));
            report.set_axis(Axis::LeftY, -i32::from(stick(3)));
            report.set_axis(Axis::RightX, i32::from(stick(5)));
            report.set_axis(Axis::RightY, -i32::from(stick(7)));
            Some(XboxInput::Gamepad(report))
        }
        report_ids::GUIDE => data.get(1).map(|b| XboxInput::Guide(b & 0x01 != 0)),
        report_ids::BATTERY => data.get(1).map(|b| XboxInput::Battery {
            level: rescale_battery(b & 0x03, BATTERY_MAX),
            charging: b & CHARGING != 0,
        }),
        _ => None,
    }
}
