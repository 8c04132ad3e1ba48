//! The emulated official controller: a remote with a classic extension.
//!
//! [`Emulator`] holds the host-visible state of one emulated device (reporting
//! mode, LEDs, rumble, extension registers and cipher). It consumes host
//! command reports (`0x10`–`0x1A`) and produces the replies and side effects
//! they call for; [`Emulator::encode_input`] turns a [`TargetReport`] into the
//! input report of the current mode.
//!
//! [`TargetReport`]: motebridge_report::TargetReport

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod classic;
pub mod core_buttons;
pub mod emulator;
pub mod ids;
pub mod memory;
pub mod report;

pub use classic::{CLASSIC_DATA_LEN, decode_classic, encode_classic};
pub use core_buttons::{decode_core_buttons, encode_core_buttons};
pub use emulator::{CommandOutcome, Emulator, HostStatus};
pub use ids::{command_ids, input_ids};
pub use memory::{ACCEL_CALIBRATION_BLOCK, ExtensionRegisters, RegisterEvent};
pub use report::{InputMode, MAX_REPORT_LEN, WireReport, extension_bytes};
