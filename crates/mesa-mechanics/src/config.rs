//! Configuration for a game table.

use mesa_core::attributes::DEFAULT_POINT_BUDGET;
use mesa_core::enemy::DEFAULT_ENEMY_HP;
use mesa_core::log::DEFAULT_LOG_CAPACITY;
use mesa_core::storage::DEFAULT_PREFIX;

/// Most dice a single GM roll may throw by default.
pub const DEFAULT_MAX_DICE: u32 = 20;

/// Configuration for a [`GameTable`](crate::GameTable).
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Points a character must distribute at creation.
    pub point_budget: u32,
    /// Entries kept in the event log and GM notes.
    pub log_capacity: usize,
    /// Upper bound on dice per GM roll.
    pub max_dice: u32,
    /// Maximum HP for enemies created without one.
    pub default_enemy_hp: u32,
    /// Namespace for persisted keys.
    pub storage_prefix: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: None,
            point_budget: DEFAULT_POINT_BUDGET,
            log_capacity: DEFAULT_LOG_CAPACITY,
            max_dice: DEFAULT_MAX_DICE,
            default_enemy_hp: DEFAULT_ENEMY_HP,
            storage_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl TableConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the point budget.
    pub fn with_point_budget(mut self, budget: u32) -> Self {
        self.point_budget = budget;
        self
    }

    /// Set the log retention count (at least 1).
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity.max(1);
        self
    }

    /// Set the dice-per-roll limit (at least 1).
    pub fn with_max_dice(mut self, max: u32) -> Self {
        self.max_dice = max.max(1);
        self
    }

    /// Set the fallback enemy HP (at least 1).
    pub fn with_default_enemy_hp(mut self, hp: u32) -> Self {
        self.default_enemy_hp = hp.max(1);
        self
    }

    /// Set the storage namespace.
    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }
}
