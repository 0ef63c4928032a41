//! Resolution of character abilities and enemy attacks.
//!
//! - **Abilities** roll high: d20 + attribute modifier must meet the
//!   ability's difficulty.
//! - **Enemy attacks** roll under: a d20 at or below the attack's success
//!   chance hits.
//!
//! Both expose a pure `evaluate` over a given roll and a `resolve_*` entry
//! point that looks up the participants and draws the roll.

pub mod ability;
pub mod enemy_attack;

pub use ability::{AbilityCheck, AbilityEffect, attribute_modifier, resolve_ability};
pub use enemy_attack::{AttackCheck, resolve_enemy_attack};
