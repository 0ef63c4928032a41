//! Enemy attacks: roll a d20 at or under the attack's success chance.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use mesa_core::{Attack, CharacterId, CharacterStore, CoreError, EnemyId, EnemyStore};

use crate::dice::Die;
use crate::error::MechResult;

/// The outcome of an enemy attack. Building one changes no state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackCheck {
    /// The attacker.
    pub enemy: EnemyId,
    /// The attacker's name at the time of the attack.
    pub enemy_name: String,
    /// The attack used.
    pub attack: Attack,
    /// The target character.
    pub target: CharacterId,
    /// The raw d20.
    pub roll: u32,
    /// `roll <= attack.success_chance`.
    pub success: bool,
    /// Damage dealt on success, 0 on a miss.
    pub damage: u32,
}

impl AttackCheck {
    /// Evaluate an attack for a given d20 roll.
    pub fn evaluate(
        enemy: EnemyId,
        enemy_name: impl Into<String>,
        attack: Attack,
        target: CharacterId,
        roll: u32,
    ) -> Self {
        let success = roll <= attack.success_chance;
        let damage = if success { attack.damage } else { 0 };
        Self {
            enemy,
            enemy_name: enemy_name.into(),
            attack,
            target,
            roll,
            success,
            damage,
        }
    }

    /// The attack's success threshold out of 20.
    pub fn threshold(&self) -> u32 {
        self.attack.success_chance
    }
}

/// Resolve an enemy's attack against a character with a fresh d20.
///
/// Fails with `NotFound` when the enemy, the attack index, or the target is
/// missing. Performs no mutation.
pub fn resolve_enemy_attack(
    enemies: &EnemyStore,
    characters: &CharacterStore,
    enemy_id: EnemyId,
    attack_index: usize,
    target: CharacterId,
    rng: &mut StdRng,
) -> MechResult<AttackCheck> {
    let enemy = enemies
        .get(enemy_id)
        .ok_or_else(|| CoreError::not_found("enemy", enemy_id))?;
    let attack = enemy
        .attacks
        .get(attack_index)
        .cloned()
        .ok_or_else(|| CoreError::not_found("attack", attack_index))?;
    if characters.get(target).is_none() {
        return Err(CoreError::not_found("character", target).into());
    }

    let roll = Die::D20.roll(rng);
    let check = AttackCheck::evaluate(enemy.id, enemy.name, attack, target, roll);
    tracing::debug!(
        enemy = %check.enemy_name,
        attack = %check.attack.name,
        roll = check.roll,
        success = check.success,
        "resolved enemy attack"
    );
    Ok(check)
}
