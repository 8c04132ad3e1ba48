//! DualSense Bluetooth HID protocol.
//!
//! Like the DualShock 4, the DualSense starts in a reduced report (`0x01`)
//! and switches to the full report (`0x31`) once it has received an output
//! report. Output reports carry a 4-bit sequence number in the high nibble of
//! byte 1 and a trailing CRC32.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod output;

pub use ids::{SONY_VENDOR_ID, product_ids, report_ids};
pub use input::{DualSenseInputState, FULL_REPORT_LEN, parse_input_report};
pub use output::{OUTPUT_REPORT_LEN, OutputSequence, build_output_report, player_pattern};
