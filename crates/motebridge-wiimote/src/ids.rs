//! Report IDs and memory map constants.

/// Host → device command reports. Byte 1 bit 0 of every command is rumble.
pub mod command_ids {
    pub const RUMBLE: u8 = 0x10;
    pub const LEDS: u8 = 0x11;
    pub const REPORT_MODE: u8 = 0x12;
    pub const IR_ENABLE: u8 = 0x13;
    pub const SPEAKER_ENABLE: u8 = 0x14;
    pub const STATUS_REQUEST: u8 = 0x15;
    pub const WRITE_MEMORY: u8 = 0x16;
    pub const READ_MEMORY: u8 = 0x17;
    pub const SPEAKER_DATA: u8 = 0x18;
    pub const SPEAKER_MUTE: u8 = 0x19;
    pub const IR_ENABLE_2: u8 = 0x1A;
}

/// Device → host reports.
pub mod input_ids {
    pub const STATUS: u8 = 0x20;
    pub const READ_DATA: u8 = 0x21;
    pub const ACK: u8 = 0x22;
}

/// Byte 1 flags shared by command reports.
pub mod flags {
    pub const RUMBLE: u8 = 0x01;
    pub const ACKNOWLEDGE: u8 = 0x02;
    /// Enable bit of IR/speaker commands, continuous bit of the mode command.
    pub const ENABLE: u8 = 0x04;
}

/// Memory spaces and addresses.
pub mod memory_map {
    /// Space byte bit selecting control registers rather than EEPROM.
    pub const SPACE_REGISTERS: u8 = 0x04;
    /// Register block of the extension controller.
    pub const EXTENSION_BLOCK: u32 = 0xA4_0000;
    /// Highest readable EEPROM address (exclusive).
    pub const EEPROM_END: u32 = 0x1700;
    /// Offset of the accelerometer calibration in EEPROM.
    pub const EEPROM_ACCEL_CALIBRATION: u32 = 0x0016;

    /// Extension register offsets.
    pub const EXT_CALIBRATION: u8 = 0x20;
    pub const EXT_KEY: u8 = 0x40;
    pub const EXT_KEY_LAST: u8 = 0x4F;
    pub const EXT_ENCRYPTION: u8 = 0xF0;
    pub const EXT_IDENTIFIER: u8 = 0xFA;
}

/// Error nibbles of read-data replies.
pub mod read_errors {
    pub const OK: u8 = 0x0;
    pub const UNMAPPED: u8 = 0x8;
}
