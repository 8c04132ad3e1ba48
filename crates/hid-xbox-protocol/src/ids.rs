//! Microsoft Xbox One controller identifiers.

/// Microsoft vendor ID.
pub const MICROSOFT_VENDOR_ID: u16 = 0x045E;

pub mod product_ids {
    /// Xbox One S controller, early Bluetooth firmware.
    pub const XBOX_ONE_S_LEGACY: u16 = 0x02E0;
    /// Xbox One S controller.
    pub const XBOX_ONE_S: u16 = 0x02FD;
    /// Xbox Series X|S controller.
    pub const XBOX_SERIES: u16 = 0x0B13;
    /// Xbox One Elite Series 2 controller.
    pub const XBOX_ELITE_2: u16 = 0x0B20;

    pub const ALL: [u16; 4] = [XBOX_ONE_S_LEGACY, XBOX_ONE_S, XBOX_SERIES, XBOX_ELITE_2];
}

pub mod report_ids {
    /// Sticks, triggers, hat and buttons.
    pub const GAMEPAD: u8 = 0x01;
    /// Guide button only.
    pub const GUIDE: u8 = 0x02;
    /// Battery status.
    pub const BATTERY: u8 = 0x04;
    /// Rumble output report.
    pub const RUMBLE: u8 = 0x03;
}
