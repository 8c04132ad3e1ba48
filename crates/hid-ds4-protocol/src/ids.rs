//! Sony DualShock 4 identifiers.

/// Sony Interactive Entertainment vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

pub mod product_ids {
    /// First-generation DualShock 4 (CUH-ZCT1).
    pub const DS4_V1: u16 = 0x05C4;
    /// Second-generation DualShock 4 (CUH-ZCT2).
    pub const DS4_V2: u16 = 0x09CC;

    pub const ALL: [u16; 2] = [DS4_V1, DS4_V2];
}

pub mod report_ids {
    /// Reduced input report sent before the first output report.
    pub const INPUT_REDUCED: u8 = 0x01;
    /// Full Bluetooth input report.
    pub const INPUT_FULL: u8 = 0x11;
    /// Bluetooth output report (rumble, lightbar).
    pub const OUTPUT: u8 = 0x11;
}
