//! Helpers shared by the per-vendor protocol crates.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod bits;
pub mod crc;

pub use bits::{ButtonTable, decode_bits};
pub use crc::{BT_OUTPUT_PREFIX, bt_crc32, seal_bt_crc, verify_bt_crc};
