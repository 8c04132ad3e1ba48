//! Switch-family Bluetooth HID protocol.
//!
//! Covers Joy-Con (L/R), the Pro Controller and the retro pads that share
//! the same firmware protocol. Controllers start in the "basic" report
//! (`0x3F`); the host walks them through a subcommand handshake (device
//! info, factory/user stick calibration via SPI flash reads) and then
//! switches them to the full report (`0x30`).
//!
//! This crate is I/O-free: it decodes reports and replies, decodes and
//! applies stick calibration, and builds subcommand reports. The handshake
//! sequencing lives with the per-device state in the engine.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod calibration;
pub mod ids;
pub mod input;
pub mod output;
pub mod reply;

pub use calibration::{
    AxisCalibration, AxisExtents, CALIBRATION_BLOCK_LEN, StickCalibration, USER_CALIBRATION_MAGIC,
    decode_left_calibration, decode_right_calibration,
};
pub use ids::{NINTENDO_VENDOR_ID, device_type_kind, product_ids, report_ids, spi, subcommands};
pub use input::{BasicInput, FullInput, STICK_RANGE_12BIT, parse_basic_report, parse_full_report};
pub use output::{
    ACTIVE_RUMBLE, NEUTRAL_RUMBLE, PacketCounter, RUMBLE_REPORT_LEN, SUBCOMMAND_REPORT_LEN,
    build_rumble_report, build_subcommand_report, full_input_mode_args, player_lights_args,
    spi_read_args,
};
pub use reply::{SpiReadReply, SubcommandReply, parse_subcommand_reply};
