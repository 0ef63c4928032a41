//! Combat resolution and turn management for Mesa.
//!
//! Provides dice rolling, ability checks (d20 + modifier against a
//! difficulty), enemy attacks (d20 roll-under), a persisted battle
//! controller, and [`GameTable`], which ties them to the stores in
//! `mesa-core` and records every action in the event log.

pub mod combat;
pub mod config;
pub mod dice;
pub mod error;
pub mod resolution;
pub mod table;

pub use combat::{AbilityTarget, BattleController, BattleState, TurnEntry};
pub use config::TableConfig;
pub use dice::{DiceRoll, Die};
pub use error::{MechError, MechResult};
pub use resolution::{AbilityCheck, AbilityEffect, AttackCheck};
pub use table::{GameTable, Resolved};
