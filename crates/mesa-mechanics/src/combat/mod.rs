//! Battle state machine and turn order.
//!
//! A battle is either inactive or active. Starting one builds a turn order
//! that alternates the GM with each character; turns then advance
//! cyclically until the battle ends. The state is persisted after every
//! transition.

pub mod action;

pub use action::{AbilityTarget, ability_log_text, attack_log_text};

use serde::{Deserialize, Serialize};

use mesa_core::storage::keys;
use mesa_core::{CharacterId, Storage};

use crate::error::{MechError, MechResult};

/// One slot in the turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEntry {
    /// The GM acts (enemies, environment).
    Gm,
    /// A player character acts.
    Player {
        /// The acting character.
        id: CharacterId,
    },
}

impl TurnEntry {
    /// Returns true for a GM slot.
    pub fn is_gm(&self) -> bool {
        matches!(self, Self::Gm)
    }

    /// The character of a player slot.
    pub fn character_id(&self) -> Option<CharacterId> {
        match self {
            Self::Gm => None,
            Self::Player { id } => Some(*id),
        }
    }
}

/// The persisted battle state.
///
/// When `active` is false, `turn_order` is empty and `current_turn_index`
/// is 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    /// Whether a battle is running.
    pub active: bool,
    /// GM and player slots in order.
    pub turn_order: Vec<TurnEntry>,
    /// Index into `turn_order` of the current slot.
    pub current_turn_index: usize,
}

impl BattleState {
    /// The slot whose turn it is, if a battle is active.
    pub fn current(&self) -> Option<TurnEntry> {
        if !self.active {
            return None;
        }
        self.turn_order.get(self.current_turn_index).copied()
    }
}

/// Start, advance, and end battles.
#[derive(Debug, Clone)]
pub struct BattleController {
    storage: Storage,
}

impl BattleController {
    /// Create a controller over shared storage.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The current battle state.
    pub fn state(&self) -> BattleState {
        self.storage.get_or_default(keys::BATTLE)
    }

    fn save(&self, state: &BattleState) -> MechResult<()> {
        self.storage.set(keys::BATTLE, state)?;
        Ok(())
    }

    /// Start a battle: the order is GM then each character, repeated.
    pub fn start(&self, character_ids: &[CharacterId]) -> MechResult<BattleState> {
        if self.is_active() {
            return Err(MechError::BattleAlreadyActive);
        }
        let turn_order = character_ids
            .iter()
            .flat_map(|id| [TurnEntry::Gm, TurnEntry::Player { id: *id }])
            .collect();
        let state = BattleState {
            active: true,
            turn_order,
            current_turn_index: 0,
        };
        self.save(&state)?;
        tracing::debug!(slots = state.turn_order.len(), "battle started");
        Ok(state)
    }

    /// Advance to the next slot, wrapping at the end. Does nothing when no
    /// battle is active.
    pub fn next_turn(&self) -> MechResult<BattleState> {
        let mut state = self.state();
        if !state.active || state.turn_order.is_empty() {
            return Ok(state);
        }
        state.current_turn_index = (state.current_turn_index + 1) % state.turn_order.len();
        self.save(&state)?;
        Ok(state)
    }

    /// End the battle and clear the turn order.
    pub fn end(&self) -> MechResult<BattleState> {
        let state = BattleState::default();
        self.save(&state)?;
        tracing::debug!("battle ended");
        Ok(state)
    }

    /// The slot whose turn it is.
    pub fn current_turn(&self) -> Option<TurnEntry> {
        self.state().current()
    }

    /// The character whose turn it is, if it is a player's turn.
    pub fn current_character_id(&self) -> Option<CharacterId> {
        self.current_turn().and_then(|t| t.character_id())
    }

    /// Returns true when a battle is active and it is the GM's turn.
    pub fn is_gm_turn(&self) -> bool {
        self.current_turn().is_some_and(|t| t.is_gm())
    }

    /// Returns true while a battle is running.
    pub fn is_active(&self) -> bool {
        self.state().active
    }
}
