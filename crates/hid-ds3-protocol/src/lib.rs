//! DualShock 3 (Sixaxis) Bluetooth HID protocol.
//!
//! Pure functions over byte slices: input report `0x01` decoding into the
//! canonical report model, and the fixed-layout output report carrying player
//! LEDs and rumble. Offsets include the report ID byte; the HIDP transaction
//! header is stripped by the transport.
//!
//! The controller stays silent over Bluetooth until it receives the
//! [`build_enable_report`] feature report.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod output;

pub use ids::{DS3_PRODUCT_ID, SONY_VENDOR_ID, report_ids};
pub use input::{Ds3InputState, INPUT_REPORT_LEN, parse_input_report};
pub use output::{ENABLE_REPORT, OUTPUT_REPORT_LEN, build_enable_report, build_output_report};
