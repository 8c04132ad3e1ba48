//! The two core button bytes that lead almost every input report.
//!
//! | Byte | 0x01 | 0x02 | 0x04 | 0x08 | 0x10 | 0x80 |
//! |------|------|------|------|------|------|------|
//! | 0 | Left | Right | Down | Up | Plus | |
//! | 1 | Two | One | B | A | Minus | Home |

use motebridge_report::{ButtonId, TargetButton, TargetReport};

const BYTE0: [(u8, TargetButton); 5] = [
    (0x01, TargetButton::CoreLeft),
    (0x02, TargetButton::CoreRight),
    (0x04, TargetButton::CoreDown),
    (0x08, TargetButton::CoreUp),
    (0x10, TargetButton::CorePlus),
];

const BYTE1: [(u8, TargetButton); 6] = [
    (0x01, TargetButton::CoreTwo),
    (0x02, TargetButton::CoreOne),
    (0x04, TargetButton::CoreB),
    (0x08, TargetButton::CoreA),
    (0x10, TargetButton::CoreMinus),
    (0x80, TargetButton::CoreHome),
];

fn encode_byte(report: &TargetReport, table: &[(u8, TargetButton)]) -> u8 {
    table
        .iter()
        .filter(|(_, b)| report.is_pressed(*b))
        .fold(0, |acc, (bit, _)| acc | bit)
}

fn decode_byte(byte: u8, table: &[(u8, TargetButton)]) -> u32 {
    table
        .iter()
        .filter(|(bit, _)| byte & bit != 0)
        .fold(0, |acc, (_, b)| acc | b.mask())
}

/// Core button bytes for `report`.
pub fn encode_core_buttons(report: &TargetReport) -> [u8; 2] {
    [encode_byte(report, &BYTE0), encode_byte(report, &BYTE1)]
}

/// Target button mask for two core button bytes.
pub fn decode_core_buttons(bytes: [u8; 2]) -> u32 {
    decode_byte(bytes[0], &BYTE0) | decode_byte(bytes[1], &BYTE1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let mut r = TargetReport::new();
        r.press(TargetButton::CoreHome);
        r.press(TargetButton::CoreUp);
        r.press(TargetButton::A);
        assert_eq!(encode_core_buttons(&r), [0x08, 0x80]);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let mut r = TargetReport::new();
        for b in TargetButton::ALL.iter().filter(|b| b.is_core()) {
            r.press(*b);
        }
        let bytes = encode_core_buttons(&r);
        assert_eq!(bytes, [0x1F, 0x9F]);
        assert_eq!(decode_core_buttons(bytes), r.buttons());
    }
}
