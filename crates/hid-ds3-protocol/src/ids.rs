//! Sony DualShock 3 identifiers.

/// Sony Interactive Entertainment vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

/// DualShock 3 / Sixaxis product ID.
pub const DS3_PRODUCT_ID: u16 = 0x0268;

pub mod report_ids {
    /// Full input report (buttons, sticks, pressure, battery, motion).
    pub const INPUT: u8 = 0x01;
    /// Output report carrying rumble and LEDs.
    pub const OUTPUT: u8 = 0x01;
    /// Feature report that switches on Bluetooth reporting.
    pub const ENABLE: u8 = 0xF4;
}
