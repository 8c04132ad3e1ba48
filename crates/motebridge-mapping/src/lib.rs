//! Remapping engine and configuration resolver.
//!
//! A [`MappingTable`] turns a canonical source report into a target report;
//! [`ConfigStore`] decides, per connected device, which table, which
//! [`CommonConfig`] and which [`FamilyConfig`] apply. Every configuration
//! value type derives `serde` so an external loader can build them.
//!
//! ```
//! use motebridge_mapping::{CommonConfig, ConfigStore, remap};
//! use motebridge_report::{BdAddr, Button, CanonicalReport, DeviceKind, TargetButton};
//!
//! let store = ConfigStore::with_defaults(CommonConfig::default());
//! let resolved = store.resolve(DeviceKind::DualShock4, BdAddr::default());
//!
//! let mut input = CanonicalReport::new();
//! input.press(Button::South);
//! let out = remap(&input, resolved.mapping.as_deref(), &resolved.common);
//! assert!(out.is_pressed(TargetButton::B));
//! ```

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod remap;
pub mod resolver;
pub mod table;

pub use config::{CommonConfig, DEFAULT_DEADZONE, FamilyConfig, SwitchOptions};
pub use remap::remap;
pub use resolver::{ConfigKey, ConfigStore, ResolvedConfig, Tiered};
pub use table::{Destination, MappingEntry, MappingTable, Source, default_mapping};
