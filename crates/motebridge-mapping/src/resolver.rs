//! Three-tier configuration lookup.
//!
//! Every setting resolves independently through, in order: the per-device
//! override (keyed by Bluetooth address), the per-kind override, the per-kind
//! default, and for [`CommonConfig`] only, the store's global default.

use std::fmt;
use std::sync::Arc;

use motebridge_errors::ConfigError;
use motebridge_report::{BdAddr, DeviceKind};
use serde::{Deserialize, Serialize};

use crate::config::{CommonConfig, FamilyConfig};
use crate::table::{MappingTable, default_mapping};

/// What an override is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    Device(BdAddr),
    Kind(DeviceKind),
}

impl ConfigKey {
    /// `true` if a device with this identity is covered by the key.
    pub fn matches(&self, kind: DeviceKind, address: BdAddr) -> bool {
        match self {
            ConfigKey::Device(a) => *a == address,
            ConfigKey::Kind(k) => *k == kind,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKey::Device(addr) => write!(f, "device {addr}"),
            ConfigKey::Kind(kind) => write!(f, "kind {kind}"),
        }
    }
}

/// One setting's three lists. Lists are short and unordered.
#[derive(Debug, Clone)]
pub struct Tiered<V> {
    device: Vec<(BdAddr, V)>,
    kind_override: Vec<(DeviceKind, V)>,
    kind_default: Vec<(DeviceKind, V)>,
}

impl<V> Default for Tiered<V> {
    fn default() -> Self {
        Self {
            device: Vec::new(),
            kind_override: Vec::new(),
            kind_default: Vec::new(),
        }
    }
}

fn upsert<K: PartialEq, V>(list: &mut Vec<(K, V)>, key: K, value: Option<V>) {
    let existing = list.iter().position(|(k, _)| *k == key);
    match (existing, value) {
        (Some(i), Some(v)) => list[i].1 = v,
        (Some(i), None) => {
            list.swap_remove(i);
        }
        (None, Some(v)) => list.push((key, v)),
        (None, None) => {}
    }
}

fn lookup<'a, K: PartialEq, V>(list: &'a [(K, V)], key: &K) -> Option<&'a V> {
    list.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

impl<V> Tiered<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// First hit of device override, kind override, kind default.
    pub fn resolve(&self, kind: DeviceKind, address: BdAddr) -> Option<&V> {
        lookup(&self.device, &address)
            .or_else(|| lookup(&self.kind_override, &kind))
            .or_else(|| lookup(&self.kind_default, &kind))
    }

    /// Set (`Some`) or remove (`None`) an override.
    pub fn apply(&mut self, key: ConfigKey, value: Option<V>) {
        match key {
            ConfigKey::Device(addr) => upsert(&mut self.device, addr, value),
            ConfigKey::Kind(kind) => upsert(&mut self.kind_override, kind, value),
        }
    }

    /// Set or remove a kind default.
    pub fn set_default(&mut self, kind: DeviceKind, value: Option<V>) {
        upsert(&mut self.kind_default, kind, value);
    }
}

/// Configuration resolved for one device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedConfig {
    pub common: CommonConfig,
    /// `None` means the device's output stays neutral.
    pub mapping: Option<Arc<MappingTable>>,
    /// `None` means "no extra options".
    pub family: Option<FamilyConfig>,
}

/// All configuration tiers for every setting.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    global: CommonConfig,
    common: Tiered<CommonConfig>,
    mapping: Tiered<Arc<MappingTable>>,
    family: Tiered<FamilyConfig>,
}

impl ConfigStore {
    /// An empty store: no mappings anywhere.
    pub fn new(global: CommonConfig) -> Self {
        Self {
            global,
            ..Self::default()
        }
    }

    /// A store with [`default_mapping`] seeded as the default of every kind.
    pub fn with_defaults(global: CommonConfig) -> Self {
        let mut store = Self::new(global);
        let table = Arc::new(default_mapping());
        for kind in DeviceKind::ALL {
            store.mapping.set_default(kind, Some(Arc::clone(&table)));
        }
        store
    }

    pub fn resolve(&self, kind: DeviceKind, address: BdAddr) -> ResolvedConfig {
        ResolvedConfig {
            common: self
                .common
                .resolve(kind, address)
                .copied()
                .unwrap_or(self.global),
            mapping: self.mapping.resolve(kind, address).cloned(),
            family: self
                .family
                .resolve(kind, address)
                .copied()
                .filter(|f| f.family() == kind.family()),
        }
    }

    pub fn global(&self) -> CommonConfig {
        self.global
    }

    pub fn set_global(&mut self, global: CommonConfig) {
        self.global = global;
    }

    pub fn apply_common(&mut self, key: ConfigKey, value: Option<CommonConfig>) {
        self.common.apply(key, value);
    }

    pub fn apply_mapping(&mut self, key: ConfigKey, value: Option<MappingTable>) {
        self.mapping.apply(key, value.map(Arc::new));
    }

    /// Per-kind family blobs must belong to that kind's family. Device-keyed
    /// blobs are checked at resolution and ignored when they do not match.
    pub fn apply_family(
        &mut self,
        key: ConfigKey,
        value: Option<FamilyConfig>,
    ) -> Result<(), ConfigError> {
        if let (ConfigKey::Kind(kind), Some(cfg)) = (key, value.as_ref()) {
            if cfg.family() != kind.family() {
                return Err(ConfigError::FamilyMismatch {
                    key: key.to_string(),
                    expected: format!("{:?}", cfg.family()),
                });
            }
        }
        self.family.apply(key, value);
        Ok(())
    }

    pub fn set_default_common(&mut self, kind: DeviceKind, value: Option<CommonConfig>) {
        self.common.set_default(kind, value);
    }

    pub fn set_default_mapping(&mut self, kind: DeviceKind, value: Option<MappingTable>) {
        self.mapping.set_default(kind, value.map(Arc::new));
    }

    pub fn set_default_family(&mut self, kind: DeviceKind, value: Option<FamilyConfig>) {
        self.family.set_default(kind, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwitchOptions;
    use crate::table::MappingEntry;
    use motebridge_report::{Button, TargetButton};

    const ADDR: BdAddr = BdAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    const OTHER: BdAddr = BdAddr([0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB]);

    #[test]
    fn test_lookup_outlives_key() {
        let list = vec![(ADDR, 1u16), (OTHER, 2u16)];
        let found = {
            let key = OTHER;
            lookup(&list, &key)
        };
        assert_eq!(found, Some(&2));
        assert_eq!(lookup(&list, &BdAddr([0; 6])), None);
    }

    #[test]
    fn test_common_precedence() {
        let mut store = ConfigStore::new(CommonConfig { deadzone: 100 });
        let kind = DeviceKind::DualSense;
        assert_eq!(store.resolve(kind, ADDR).common.deadzone, 100);

        store.set_default_common(kind, Some(CommonConfig { deadzone: 200 }));
        assert_eq!(store.resolve(kind, ADDR).common.deadzone, 200);

        store.apply_common(ConfigKey::Kind(kind), Some(CommonConfig { deadzone: 300 }));
        assert_eq!(store.resolve(kind, ADDR).common.deadzone, 300);

        store.apply_common(ConfigKey::Device(ADDR), Some(CommonConfig { deadzone: 400 }));
        assert_eq!(store.resolve(kind, ADDR).common.deadzone, 400);
        assert_eq!(store.resolve(kind, OTHER).common.deadzone, 300);

        store.apply_common(ConfigKey::Device(ADDR), None);
        assert_eq!(store.resolve(kind, ADDR).common.deadzone, 300);
        store.apply_common(ConfigKey::Kind(kind), None);
        assert_eq!(store.resolve(kind, ADDR).common.deadzone, 200);
    }

    #[test]
    fn test_fields_resolve_independently() {
        let mut store = ConfigStore::with_defaults(CommonConfig::default());
        let custom = MappingTable::new(vec![MappingEntry::button(Button::South, TargetButton::A)]);
        store.apply_mapping(ConfigKey::Device(ADDR), Some(custom.clone()));
        store.apply_common(
            ConfigKey::Kind(DeviceKind::XboxOne),
            Some(CommonConfig { deadzone: 42 }),
        );

        let resolved = store.resolve(DeviceKind::XboxOne, ADDR);
        assert_eq!(resolved.mapping.as_deref(), Some(&custom));
        assert_eq!(resolved.common.deadzone, 42);
        assert_eq!(resolved.family, None);

        let resolved = store.resolve(DeviceKind::DualShock3, ADDR);
        assert_eq!(resolved.mapping.as_deref(), Some(&custom));
        assert_eq!(resolved.common.deadzone, 512);
    }

    #[test]
    fn test_empty_store_has_no_mapping() {
        let store = ConfigStore::new(CommonConfig::default());
        assert!(store.resolve(DeviceKind::DualShock4, ADDR).mapping.is_none());
    }

    #[test]
    fn test_family_mismatch_rejected() {
        let mut store = ConfigStore::new(CommonConfig::default());
        let switch = FamilyConfig::Switch(SwitchOptions {
            disable_calibration: true,
        });
        let err = store.apply_family(ConfigKey::Kind(DeviceKind::DualShock4), Some(switch));
        assert!(matches!(err, Err(ConfigError::FamilyMismatch { .. })));
        assert!(
            store
                .apply_family(ConfigKey::Kind(DeviceKind::ProController), Some(switch))
                .is_ok()
        );
        assert_eq!(
            store.resolve(DeviceKind::ProController, ADDR).family,
            Some(switch)
        );
        assert_eq!(store.resolve(DeviceKind::JoyConLeft, ADDR).family, None);
    }

    #[test]
    fn test_device_family_blob_filtered_by_kind() {
        let mut store = ConfigStore::new(CommonConfig::default());
        let switch = FamilyConfig::Switch(SwitchOptions::default());
        assert!(
            store
                .apply_family(ConfigKey::Device(ADDR), Some(switch))
                .is_ok()
        );
        assert_eq!(store.resolve(DeviceKind::DualSense, ADDR).family, None);
        assert_eq!(
            store.resolve(DeviceKind::SwitchGeneric, ADDR).family,
            Some(switch)
        );
    }

    #[test]
    fn test_key_matches() {
        assert!(ConfigKey::Device(ADDR).matches(DeviceKind::XboxOne, ADDR));
        assert!(!ConfigKey::Device(ADDR).matches(DeviceKind::XboxOne, OTHER));
        assert!(ConfigKey::Kind(DeviceKind::XboxOne).matches(DeviceKind::XboxOne, OTHER));
        assert_eq!(ConfigKey::Device(ADDR).to_string(), "device 00:11:22:33:44:55");
    }
}
