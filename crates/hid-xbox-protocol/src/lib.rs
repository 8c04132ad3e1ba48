//! Xbox One controller Bluetooth HID protocol.
//!
//! The controller splits its state over three input reports: `0x01` carries
//! sticks, triggers, hat and buttons; `0x02` carries only the Guide button;
//! `0x04` carries battery status. [`parse_input_report`] returns which of the
//! three was decoded so the caller can merge partial updates. The controller
//! has no player LEDs.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod output;

pub use ids::{MICROSOFT_VENDOR_ID, product_ids, report_ids};
pub use input::{GAMEPAD_REPORT_LEN, TRIGGER_THRESHOLD, XboxInput, parse_input_report};
pub use output::{RUMBLE_REPORT_LEN, build_rumble_report};
