//! Engine configuration.

use std::sync::Arc;

use motebridge_cipher::CipherTables;
use motebridge_mapping::DEFAULT_DEADZONE;
use serde::{Deserialize, Serialize};

/// Default number of device slots.
pub const DEFAULT_SLOT_COUNT: usize = 16;

/// Default report emission period.
pub const DEFAULT_TICK_PERIOD_MS: u64 = 10;

/// Engine-wide settings fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size of the slot pool; connect handles index into it.
    pub slot_count: usize,
    /// Period of the continuous-reporting timer.
    pub tick_period_ms: u64,
    /// Deadzone used where no tier sets one.
    pub default_deadzone: u16,
    /// Run the report timer on its own thread while devices are connected.
    /// Offline replay turns this off and calls `Bridge::tick` itself.
    pub timer_thread: bool,
    /// Answer/substitution tables for the extension cipher. Not serialized;
    /// a host with its own table set loads it with `CipherTables::from_raw`.
    #[serde(skip)]
    pub cipher_tables: Arc<CipherTables>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            default_deadzone: DEFAULT_DEADZONE,
            timer_thread: true,
            cipher_tables: Arc::new(CipherTables::default()),
        }
    }
}

impl EngineConfig {
    /// Tick period in nanoseconds, never zero.
    pub fn tick_period_ns(&self) -> u64 {
        self.tick_period_ms.max(1).saturating_mul(1_000_000)
    }
}
