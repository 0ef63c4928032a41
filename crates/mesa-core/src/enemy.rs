//! Enemies, their attacks, and the persisted enemy store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::hp::HitPoints;
use crate::id::EnemyId;
use crate::storage::{Storage, keys};

/// Maximum HP used when the input does not parse to a positive number.
pub const DEFAULT_ENEMY_HP: u32 = 50;
/// Success threshold (out of 20) for attacks that do not name one.
pub const DEFAULT_SUCCESS_CHANCE: u32 = 10;

/// One attack an enemy can make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    /// Display name.
    pub name: String,
    /// Damage dealt on success.
    #[serde(default)]
    pub damage: u32,
    /// The attack succeeds when a d20 rolls at or under this value.
    #[serde(default = "default_success_chance")]
    pub success_chance: u32,
}

fn default_success_chance() -> u32 {
    DEFAULT_SUCCESS_CHANCE
}

impl Attack {
    /// An attack with the given name, damage, and threshold.
    pub fn new(name: impl Into<String>, damage: u32, success_chance: u32) -> Self {
        Self {
            name: name.into(),
            damage,
            success_chance,
        }
    }
}

impl fmt::Display for Attack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} dmg, {}/20)",
            self.name, self.damage, self.success_chance
        )
    }
}

/// Parses `name[:damage[:chance]]`. Missing or unreadable numbers fall back
/// to 0 damage and a threshold of 10.
impl FromStr for Attack {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(CoreError::invalid("attack needs a name"));
        }
        let damage = parts.next().and_then(|d| d.parse().ok()).unwrap_or(0);
        let success_chance = parts
            .next()
            .and_then(|c| c.parse().ok())
            .unwrap_or(DEFAULT_SUCCESS_CHANCE);
        Ok(Self::new(name, damage, success_chance))
    }
}

/// Parse a maximum HP input, falling back to `default` unless it is a
/// positive number.
pub fn parse_max_hp(input: Option<&str>, default: u32) -> u32 {
    input
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|hp| *hp > 0)
        .unwrap_or(default)
}

/// A GM-controlled opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique id.
    pub id: EnemyId,
    /// Display name.
    pub name: String,
    /// Current and maximum HP.
    #[serde(flatten)]
    pub hp: HitPoints,
    /// Attacks in display order.
    #[serde(default)]
    pub attacks: Vec<Attack>,
    /// Whether the enemy currently takes part in combat.
    #[serde(default)]
    pub in_battle: bool,
    /// When the enemy was created.
    pub created_at: DateTime<Utc>,
}

impl Enemy {
    /// Returns true once HP has reached zero.
    pub fn is_defeated(&self) -> bool {
        self.hp.is_defeated()
    }
}

/// Input for [`EnemyStore::create`].
#[derive(Debug, Clone)]
pub struct NewEnemy {
    /// Display name; surrounding whitespace is trimmed.
    pub name: String,
    /// Maximum HP; `None` or zero uses the store default.
    pub max_hp: Option<u32>,
    /// Attacks.
    pub attacks: Vec<Attack>,
}

/// CRUD, HP lifecycle, and battle participation for enemies.
#[derive(Debug, Clone)]
pub struct EnemyStore {
    storage: Storage,
    default_hp: u32,
}

impl EnemyStore {
    /// Create a store over shared storage.
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            default_hp: DEFAULT_ENEMY_HP,
        }
    }

    /// Use a different fallback maximum HP.
    pub fn with_default_hp(mut self, hp: u32) -> Self {
        self.default_hp = hp;
        self
    }

    /// All enemies in creation order, with HP normalized.
    pub fn all(&self) -> Vec<Enemy> {
        let mut list: Vec<Enemy> = self.storage.get_or_default(keys::ENEMIES);
        for e in &mut list {
            e.hp = HitPoints::with_current(i64::from(e.hp.current_hp), e.hp.max_hp);
        }
        list
    }

    /// Look up an enemy by id.
    pub fn get(&self, id: EnemyId) -> Option<Enemy> {
        self.all().into_iter().find(|e| e.id == id)
    }

    /// Look up an enemy by case-insensitive name, then by a unique id
    /// prefix.
    pub fn find(&self, query: &str) -> CoreResult<Option<Enemy>> {
        let query = query.trim();
        let lower = query.to_lowercase();
        let list = self.all();
        if let Some(e) = list.iter().find(|e| e.name.to_lowercase() == lower) {
            return Ok(Some(e.clone()));
        }
        let mut matches = list.into_iter().filter(|e| e.id.matches_prefix(query));
        let found = matches.next();
        if matches.next().is_some() {
            return Err(CoreError::invalid(format!(
                "'{query}' matches more than one enemy; use a longer id"
            )));
        }
        Ok(found)
    }

    /// Enemies flagged as in battle.
    pub fn in_battle(&self) -> Vec<Enemy> {
        self.all().into_iter().filter(|e| e.in_battle).collect()
    }

    /// Validate and persist a new enemy at full HP.
    pub fn create(&self, input: NewEnemy) -> CoreResult<Enemy> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid("enter an enemy name"));
        }
        let max_hp = input
            .max_hp
            .filter(|hp| *hp > 0)
            .unwrap_or(self.default_hp);
        let enemy = Enemy {
            id: EnemyId::new(),
            name: name.to_string(),
            hp: HitPoints::full(max_hp),
            attacks: input.attacks,
            in_battle: false,
            created_at: Utc::now(),
        };

        let mut list = self.all();
        list.push(enemy.clone());
        self.storage.set(keys::ENEMIES, &list)?;
        tracing::debug!(id = %enemy.id, name = %enemy.name, "created enemy");
        Ok(enemy)
    }

    /// Insert or replace an enemy by id.
    pub fn save(&self, enemy: Enemy) -> CoreResult<()> {
        let mut list = self.all();
        match list.iter_mut().find(|e| e.id == enemy.id) {
            Some(slot) => *slot = enemy,
            None => list.push(enemy),
        }
        self.storage.set(keys::ENEMIES, &list)
    }

    /// Remove an enemy, clearing the selection if it pointed here.
    pub fn delete(&self, id: EnemyId) -> CoreResult<()> {
        let mut list = self.all();
        list.retain(|e| e.id != id);
        self.storage.set(keys::ENEMIES, &list)?;
        if self.selected() == Some(id) {
            self.storage.remove(keys::SELECTED_ENEMY)?;
        }
        tracing::debug!(%id, "deleted enemy");
        Ok(())
    }

    /// Set or clear the selected enemy.
    pub fn set_selected(&self, id: Option<EnemyId>) -> CoreResult<()> {
        match id {
            Some(id) => self.storage.set(keys::SELECTED_ENEMY, &id),
            None => self.storage.remove(keys::SELECTED_ENEMY),
        }
    }

    /// The selected enemy id, if any.
    pub fn selected(&self) -> Option<EnemyId> {
        self.storage.get(keys::SELECTED_ENEMY, None)
    }

    fn mutate(&self, id: EnemyId, f: impl FnOnce(&mut Enemy)) -> CoreResult<Enemy> {
        let mut list = self.all();
        let enemy = list
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::not_found("enemy", id))?;
        f(enemy);
        let updated = enemy.clone();
        self.storage.set(keys::ENEMIES, &list)?;
        Ok(updated)
    }

    /// Flip the in-battle flag.
    pub fn toggle_in_battle(&self, id: EnemyId) -> CoreResult<Enemy> {
        let enemy = self.mutate(id, |e| e.in_battle = !e.in_battle)?;
        tracing::debug!(%id, in_battle = enemy.in_battle, "toggled enemy battle flag");
        Ok(enemy)
    }

    /// Set current HP, clamped to `[0, max]`.
    pub fn update_hp(&self, id: EnemyId, value: i64) -> CoreResult<Enemy> {
        self.mutate(id, |e| {
            e.hp.set(value);
        })
    }

    /// Add HP, clamped to `[0, max]`.
    pub fn heal(&self, id: EnemyId, amount: i64) -> CoreResult<Enemy> {
        self.mutate(id, |e| {
            e.hp.adjust(amount);
        })
    }

    /// Remove HP, clamped to `[0, max]`.
    pub fn damage(&self, id: EnemyId, amount: i64) -> CoreResult<Enemy> {
        let enemy = self.mutate(id, |e| {
            e.hp.adjust(amount.saturating_neg());
        })?;
        tracing::debug!(%id, hp = %enemy.hp, "enemy damaged");
        Ok(enemy)
    }

    /// Restore HP to maximum.
    pub fn reset_hp(&self, id: EnemyId) -> CoreResult<Enemy> {
        self.mutate(id, |e| e.hp.reset())
    }
}
