//! Per-device configuration values.

use motebridge_report::Family;
use serde::{Deserialize, Serialize};

/// Global default stick-as-button threshold.
pub const DEFAULT_DEADZONE: u16 = 512;

/// Settings every device kind understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// Stick magnitude (0–1023) at which a stick direction mapped to a
    /// button counts as pressed.
    pub deadzone: u16,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
        }
    }
}

/// Switch-family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchOptions {
    /// Skip the SPI calibration reads and use fallback calibration.
    pub disable_calibration: bool,
}

/// Family-specific options. Families without extra options have no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum FamilyConfig {
    Switch(SwitchOptions),
}

impl FamilyConfig {
    pub const fn family(&self) -> Family {
        match self {
            FamilyConfig::Switch(_) => Family::Switch,
        }
    }

    pub const fn switch(&self) -> Option<&SwitchOptions> {
        match self {
            FamilyConfig::Switch(options) => Some(options),
        }
    }
}
