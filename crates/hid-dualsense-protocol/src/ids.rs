//! Sony DualSense identifiers.

/// Sony Interactive Entertainment vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

pub mod product_ids {
    pub const DUALSENSE: u16 = 0x0CE6;
    pub const DUALSENSE_EDGE: u16 = 0x0DF2;

    pub const ALL: [u16; 2] = [DUALSENSE, DUALSENSE_EDGE];
}

pub mod report_ids {
    /// Reduced input report sent before the first output report.
    pub const INPUT_REDUCED: u8 = 0x01;
    /// Full Bluetooth input report.
    pub const INPUT_FULL: u8 = 0x31;
    /// Bluetooth output report.
    pub const OUTPUT: u8 = 0x31;
}
