//! The bridge between third-party pads and the emulated remote.
//!
//! A [`Bridge`] owns a fixed pool of device slots. Raw vendor reports arrive
//! through [`Bridge::on_device_input`] and are decoded by the slot's
//! [`Controller`]; host command reports arrive through
//! [`Bridge::on_host_command`] and drive the slot's emulated remote. A timer
//! thread ticks every 10 ms and, for every ready device whose host asked for
//! continuous reporting, remaps the latest canonical report and sends the
//! encoded input report to the host.
//!
//! All I/O goes through a [`PrivilegedTransport`] supplied by the host stack.
//!
//! ```
//! use std::sync::Arc;
//!
//! use motebridge_engine::{Bridge, Classification, DeviceIdentity, EngineConfig, MockTransport};
//! use motebridge_report::{BdAddr, DeviceKind};
//!
//! let transport = Arc::new(MockTransport::new());
//! let bridge = Bridge::new(EngineConfig::default(), transport.clone());
//!
//! let identity = DeviceIdentity {
//!     address: BdAddr([0, 1, 2, 3, 4, 5]),
//!     classification: Classification::ThirdPartySeen,
//!     vendor_id: 0x054C,
//!     product_id: 0x09CC,
//! };
//! assert_eq!(bridge.connect(0, identity)?, DeviceKind::DualShock4);
//! bridge.disconnect(0)?;
//! # Ok::<(), motebridge_errors::BridgeError>(())
//! ```

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod bridge;
pub mod config;
pub mod family;
pub mod identity;
pub mod mock;
pub mod registry;
pub mod slot;
mod timer;
pub mod transport;

pub use bridge::Bridge;
pub use config::EngineConfig;
pub use family::{Controller, FamilyContext, HandshakeState};
pub use identity::{Classification, DeviceIdentity, classify};
pub use mock::MockTransport;
pub use registry::DeviceRegistry;
pub use slot::{DeviceSlot, DeviceStatus, SlotSnapshot};
pub use transport::{DeviceLink, PrivilegedTransport};
