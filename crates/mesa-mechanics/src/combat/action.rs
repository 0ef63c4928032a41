//! Ability targets and the log lines describing resolved actions.

use mesa_core::{CharacterId, EnemyId};

use crate::resolution::{AbilityCheck, AbilityEffect, AttackCheck};

/// Who an ability is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityTarget {
    /// No explicit target: self for heals, nobody otherwise.
    None,
    /// An enemy, for attacks.
    Enemy(EnemyId),
    /// A character, for single-target heals.
    Character(CharacterId),
    /// Every living character.
    AllCharacters,
}

impl std::fmt::Display for AbilityTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "no target"),
            Self::Enemy(id) => write!(f, "enemy {id}"),
            Self::Character(id) => write!(f, "character {id}"),
            Self::AllCharacters => write!(f, "all characters"),
        }
    }
}

/// Describe an ability use for the event log.
///
/// `target_name` names the enemy hit or the character healed; `None` on a
/// heal means the user healed themselves.
pub fn ability_log_text(check: &AbilityCheck, target_name: Option<&str>) -> String {
    let mut text = format!(
        "{} used {}! {}",
        check.character_name,
        check.ability.name,
        check.breakdown()
    );
    if !check.success {
        text.push_str(" - FAILED!");
        return text;
    }

    text.push_str(" - SUCCESS!");
    match (check.effect, target_name) {
        (AbilityEffect::Damage { amount, critical }, Some(target)) => {
            if critical {
                text.push_str(" Critical hit!");
            }
            text.push_str(&format!(" Dealt {amount} damage to {target}."));
        }
        (AbilityEffect::Heal { amount }, Some(target)) => {
            text.push_str(&format!(" {target} recovered {amount} HP."));
        }
        (AbilityEffect::Heal { amount }, None) => {
            text.push_str(&format!(" Recovered {amount} HP."));
        }
        (AbilityEffect::HealAll { amount }, _) => {
            text.push_str(&format!(" Everyone recovered {amount} HP."));
        }
        _ => {}
    }
    text
}

/// Describe an enemy attack for the event log.
pub fn attack_log_text(check: &AttackCheck, target_name: &str) -> String {
    let mut text = format!(
        "{} used {} against {}! Rolled {} (chance: {}/20)",
        check.enemy_name,
        check.attack.name,
        target_name,
        check.roll,
        check.threshold()
    );
    if check.success {
        text.push_str(&format!(" - HIT! Dealt {} damage.", check.damage));
    } else {
        text.push_str(" - MISSED!");
    }
    text
}
