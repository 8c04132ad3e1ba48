//! Bit-to-button tables.

use motebridge_report::{Button, ButtonId};

/// `(bit mask, button)` pairs for one report byte.
pub type ButtonTable = [(u8, Button)];

/// Canonical button mask for every bit of `byte` listed in `table`.
pub fn decode_bits(byte: u8, table: &ButtonTable) -> u32 {
    table
        .iter()
        .filter(|(bit, _)| byte & bit != 0)
        .fold(0, |acc, (_, button)| acc | button.mask())
}
