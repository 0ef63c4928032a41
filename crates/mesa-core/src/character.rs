//! Player characters and their persisted store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, BaseAttributes, validate_distribution};
use crate::catalog::ClassCatalog;
use crate::error::{CoreError, CoreResult};
use crate::hp::HitPoints;
use crate::id::CharacterId;
use crate::storage::{Storage, keys};

/// Minimum maximum HP of any character.
pub const MIN_MAX_HP: i64 = 20;
/// Maximum HP gained per point of effective Health.
pub const HP_PER_HEALTH: i64 = 5;

/// A player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique id.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Key into the class catalog.
    #[serde(rename = "class")]
    pub class_key: String,
    /// The player's point distribution, before class modifiers.
    pub attributes: BaseAttributes,
    /// Current and maximum HP.
    #[serde(flatten)]
    pub hp: HitPoints,
    /// When the character was created.
    pub created_at: DateTime<Utc>,
}

impl Character {
    /// Returns true once HP has reached zero.
    pub fn is_defeated(&self) -> bool {
        self.hp.is_defeated()
    }
}

/// Input for [`CharacterStore::create`].
#[derive(Debug, Clone)]
pub struct NewCharacter {
    /// Display name; surrounding whitespace is trimmed.
    pub name: String,
    /// Class key.
    pub class_key: String,
    /// Base attribute distribution.
    pub attributes: BaseAttributes,
}

/// Maximum HP for a class and distribution: `max(20, 5 * effective Health)`.
pub fn max_hp_for(catalog: &ClassCatalog, class_key: &str, attrs: &BaseAttributes) -> u32 {
    let health = i64::from(catalog.apply_modifiers(attrs, class_key).get(Attribute::Health));
    let max = (HP_PER_HEALTH * health).max(MIN_MAX_HP);
    u32::try_from(max).unwrap_or(u32::MAX)
}

/// CRUD and HP lifecycle for characters.
#[derive(Debug, Clone)]
pub struct CharacterStore {
    storage: Storage,
    catalog: Arc<ClassCatalog>,
}

impl CharacterStore {
    /// Create a store over shared storage and catalog.
    pub fn new(storage: Storage, catalog: Arc<ClassCatalog>) -> Self {
        Self { storage, catalog }
    }

    /// All characters in creation order.
    ///
    /// Records written before HP tracking get their maximum HP recomputed
    /// and start at full HP. Otherwise the stored current HP is clamped into
    /// range.
    pub fn all(&self) -> Vec<Character> {
        let mut list: Vec<Character> = self.storage.get_or_default(keys::CHARACTERS);
        for c in &mut list {
            if c.hp.max_hp == 0 {
                c.hp = HitPoints::full(max_hp_for(&self.catalog, &c.class_key, &c.attributes));
            } else {
                c.hp = HitPoints::with_current(i64::from(c.hp.current_hp), c.hp.max_hp);
            }
        }
        list
    }

    /// Look up a character by id.
    pub fn get(&self, id: CharacterId) -> Option<Character> {
        self.all().into_iter().find(|c| c.id == id)
    }

    /// Look up a character by case-insensitive name, then by id prefix.
    ///
    /// A prefix shared by several characters is rejected rather than
    /// resolved to one of them.
    pub fn find(&self, query: &str) -> CoreResult<Option<Character>> {
        let query = query.trim();
        let lower = query.to_lowercase();
        let list = self.all();
        if let Some(c) = list.iter().find(|c| c.name.to_lowercase() == lower) {
            return Ok(Some(c.clone()));
        }
        let mut matches = list.into_iter().filter(|c| c.id.matches_prefix(query));
        let found = matches.next();
        if matches.next().is_some() {
            return Err(CoreError::invalid(format!(
                "'{query}' matches more than one character; use a longer id"
            )));
        }
        Ok(found)
    }

    /// Validate and persist a new character at full HP.
    pub fn create(&self, input: NewCharacter, budget: u32) -> CoreResult<Character> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid("enter a character name"));
        }
        if self.catalog.get(&input.class_key).is_none() {
            return Err(CoreError::not_found("class", &input.class_key));
        }
        validate_distribution(&input.attributes, budget)?;

        let max_hp = max_hp_for(&self.catalog, &input.class_key, &input.attributes);
        let character = Character {
            id: CharacterId::new(),
            name: name.to_string(),
            class_key: input.class_key,
            attributes: input.attributes,
            hp: HitPoints::full(max_hp),
            created_at: Utc::now(),
        };

        let mut list = self.all();
        list.push(character.clone());
        self.storage.set(keys::CHARACTERS, &list)?;
        tracing::debug!(id = %character.id, name = %character.name, "created character");
        Ok(character)
    }

    /// Insert or replace a character by id.
    pub fn save(&self, character: Character) -> CoreResult<()> {
        let mut list = self.all();
        match list.iter_mut().find(|c| c.id == character.id) {
            Some(slot) => *slot = character,
            None => list.push(character),
        }
        self.storage.set(keys::CHARACTERS, &list)
    }

    /// Remove a character, clearing the selection if it pointed here.
    pub fn delete(&self, id: CharacterId) -> CoreResult<()> {
        let mut list = self.all();
        list.retain(|c| c.id != id);
        self.storage.set(keys::CHARACTERS, &list)?;
        if self.selected() == Some(id) {
            self.storage.remove(keys::SELECTED_CHARACTER)?;
        }
        tracing::debug!(%id, "deleted character");
        Ok(())
    }

    /// Set or clear the selected character.
    pub fn set_selected(&self, id: Option<CharacterId>) -> CoreResult<()> {
        match id {
            Some(id) => self.storage.set(keys::SELECTED_CHARACTER, &id),
            None => self.storage.remove(keys::SELECTED_CHARACTER),
        }
    }

    /// The selected character id, if any.
    pub fn selected(&self) -> Option<CharacterId> {
        self.storage.get(keys::SELECTED_CHARACTER, None)
    }

    fn mutate_hp(
        &self,
        id: CharacterId,
        f: impl FnOnce(&mut HitPoints),
    ) -> CoreResult<Character> {
        let mut list = self.all();
        let character = list
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::not_found("character", id))?;
        f(&mut character.hp);
        let updated = character.clone();
        self.storage.set(keys::CHARACTERS, &list)?;
        tracing::debug!(%id, hp = %updated.hp, "character HP changed");
        Ok(updated)
    }

    /// Set current HP, clamped to `[0, max]`.
    pub fn update_hp(&self, id: CharacterId, value: i64) -> CoreResult<Character> {
        self.mutate_hp(id, |hp| {
            hp.set(value);
        })
    }

    /// Add HP, clamped to `[0, max]`.
    pub fn heal(&self, id: CharacterId, amount: i64) -> CoreResult<Character> {
        self.mutate_hp(id, |hp| {
            hp.adjust(amount);
        })
    }

    /// Remove HP, clamped to `[0, max]`.
    pub fn damage(&self, id: CharacterId, amount: i64) -> CoreResult<Character> {
        self.mutate_hp(id, |hp| {
            hp.adjust(amount.saturating_neg());
        })
    }

    /// Restore HP to maximum.
    pub fn reset_hp(&self, id: CharacterId) -> CoreResult<Character> {
        self.mutate_hp(id, HitPoints::reset)
    }
}
