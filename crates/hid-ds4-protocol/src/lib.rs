//! DualShock 4 Bluetooth HID protocol.
//!
//! Until the host sends its first output report the controller only emits
//! the reduced report `0x01`; afterwards it switches to the full report
//! `0x11`. Both carry the same data block at different offsets, decoded by
//! [`parse_input_report`].
//!
//! Bluetooth output reports end with a CRC32 over the HIDP prefix byte `0xA2`
//! and the report body.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod output;

pub use motebridge_hid_common::{bt_crc32, verify_bt_crc};
pub use ids::{SONY_VENDOR_ID, product_ids, report_ids};
pub use input::{Ds4InputState, FULL_REPORT_LEN, parse_input_report};
pub use output::{OUTPUT_REPORT_LEN, build_output_report, player_color};
