//! DualSense input report parsing.
//!
//! Full report `0x31` (78 bytes, data at offset 2):
//!
//! | Data byte | Content |
//! |-----------|---------|
//! | 0–3 | LX, LY, RX, RY (0–255, Y grows downwards) |
//! | 4–5 | L2, R2 analog |
//! | 6 | sequence number |
//! | 7 | hat (low nibble), Square 0x10, Cross 0x20, Circle 0x40, Triangle 0x80 |
//! | 8 | L1 0x01, R1 0x02, L2 0x04, R2 0x08, Create 0x10, Options 0x20, L3 0x40, R3 0x80 |
//! | 9 | PS 0x01, touchpad 0x02, mute 0x04 |
//! | 52 | status: battery low nibble 0–10, charge state high nibble |
//!
//! The reduced report `0x01` (data at offset 1) carries the sticks at 0–3 and
//! the three button bytes at 4–6.

use motebridge_hid_common::{ButtonTable, decode_bits};
use motebridge_report::{
    Axis, Button, CanonicalReport, hat_buttons, rescale_battery, rescale_bits,
};

use crate::ids::report_ids;

/// Full Bluetooth input report length.
pub const FULL_REPORT_LEN: usize = 78;

const REDUCED_OFFSET: usize = 1;
const FULL_OFFSET: usize = 2;
const REDUCED_BUTTONS: usize = 4;
const FULL_BUTTONS: usize = 7;
const STATUS_INDEX: usize = 52;
const BATTERY_MAX: u8 = 10;

/// Charge state in the status high nibble.
const CHARGE_CHARGING: u8 = 0x1;
const CHARGE_FULL: u8 = 0x2;

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

const SYSTEM: &ButtonTable = &[
    (0x01, Button::Home),
    (0x02, Button::Touchpad),
    (0x04, Button::Mute),
];

/// Decoded DualSense input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DualSenseInputState {
    pub report: CanonicalReport,
    /// Battery level 0–4, `None` in reduced reports.
    pub battery: Option<u8>,
    pub charging: bool,
    pub full: bool,
}

/// Parse report `0x01` or `0x31`; `None` for anything else.
pub fn parse_input_report(data: &[u8]) -> Option<DualSenseInputState> {
    let (offset, buttons_at, full) = match data.first().copied()? {
        report_ids::INPUT_REDUCED => (REDUCED_OFFSET, REDUCED_BUTTONS, false),
        report_ids::INPUT_FULL => (FULL_OFFSET, FULL_BUTTONS, true),
        _ => return None,
    };
    let block = data.get(offset..offset + buttons_at + 3)?;
    let buttons = &block[buttons_at..];

    let mut report = CanonicalReport::new();
    report.set_buttons(
        hat_buttons(buttons[0] & 0x0F)
            | decode_bits(buttons[0], FACE)
            | decode_bits(buttons[1], SHOULDER)
            | decode_bits(buttons[2], SYSTEM),
    );
    report.set_axis(Axis::LeftX, i32::from(rescale_bits(u32::from(block[0]), 8)));
    report.set_axis(Axis::LeftY, -i32::from(rescale_bits(u32::from(block[1]), 8)));
    report.set_axis(Axis::RightX, i32::from(rescale_bits(u32::from(block[2]), 8)));
    report.set_axis(Axis::RightY, -i32::from(rescale_bits(u32::from(block[3]), 8)));

    let status = if full {
        data.get(offset + STATUS_INDEX).copied()
    } else {
        None
    };
    let charge_state = status.map(|s| s >> 4);

    Some(DualSenseInputState {
        report,
        battery: status.map(|s| rescale_battery(s & 0x0F, BATTERY_MAX)),
        charging: matches!(charge_state, Some(CHARGE_CHARGING | CHARGE_FULL)),
        full,
    })
}
