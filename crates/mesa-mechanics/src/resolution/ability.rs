//! Ability checks: d20 + attribute modifier against a difficulty.
//!
//! The modifier is `floor(effective attribute / 5)`. An ability's hit-bonus
//! rule adds to the total; on success, damage and healing are the ability's
//! flat amount plus its scaling bonus. A successful damaging attack may
//! also land a critical hit, which multiplies the damage.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use mesa_core::{
    AbilityDefinition, AbilityKind, CharacterId, CharacterStore, ClassCatalog, CoreError,
    EffectiveAttributes,
};

use crate::dice::Die;
use crate::error::MechResult;

/// Points of effective attribute per point of roll modifier.
pub const MODIFIER_DIVISOR: i32 = 5;

/// The roll modifier for an effective attribute value.
pub fn attribute_modifier(value: i32) -> i32 {
    value.div_euclid(MODIFIER_DIVISOR)
}

/// What a resolved ability does to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityEffect {
    /// Nothing: the check failed or the ability has no amount.
    None,
    /// Damage one enemy.
    Damage {
        /// HP removed.
        amount: u32,
        /// Whether the critical multiplier applied.
        critical: bool,
    },
    /// Heal one character.
    Heal {
        /// HP restored.
        amount: u32,
    },
    /// Heal every living character.
    HealAll {
        /// HP restored to each.
        amount: u32,
    },
}

/// The outcome of an ability check. Carries everything needed to apply
/// and describe it; building one changes no state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityCheck {
    /// Who used the ability.
    pub character: CharacterId,
    /// Their name at the time of use.
    pub character_name: String,
    /// The ability used.
    pub ability: AbilityDefinition,
    /// The raw d20.
    pub roll: u32,
    /// `floor(attribute / 5)`.
    pub modifier: i32,
    /// Bonus from the ability's hit-bonus rule.
    pub hit_bonus: i32,
    /// `roll + modifier + hit_bonus`.
    pub total: i32,
    /// The ability's difficulty.
    pub difficulty: i32,
    /// `total >= difficulty`.
    pub success: bool,
    /// The effect to apply.
    pub effect: AbilityEffect,
}

impl AbilityCheck {
    /// Evaluate an ability for a given d20 roll.
    ///
    /// `critical` is only honoured for successful attacks that deal damage
    /// and carry a critical rule.
    pub fn evaluate(
        character: CharacterId,
        character_name: impl Into<String>,
        ability: AbilityDefinition,
        attrs: &EffectiveAttributes,
        roll: u32,
        critical: bool,
    ) -> Self {
        let modifier = attribute_modifier(attrs.get(ability.attribute));
        let hit_bonus = ability.hit_bonus.map(|r| r.bonus(attrs)).unwrap_or(0);
        let roll_value = i32::try_from(roll).unwrap_or(i32::MAX);
        let total = roll_value.saturating_add(modifier).saturating_add(hit_bonus);
        let difficulty = ability.difficulty;
        let success = total >= difficulty;
        let effect = if success {
            effect_of(&ability, attrs, critical)
        } else {
            AbilityEffect::None
        };

        Self {
            character,
            character_name: character_name.into(),
            ability,
            roll,
            modifier,
            hit_bonus,
            total,
            difficulty,
            success,
            effect,
        }
    }

    /// The roll breakdown, e.g. `Rolled 7 + 3 = 10 (difficulty 10)`.
    pub fn breakdown(&self) -> String {
        if self.hit_bonus == 0 {
            format!(
                "Rolled {} + {} = {} (difficulty {})",
                self.roll, self.modifier, self.total, self.difficulty
            )
        } else {
            format!(
                "Rolled {} + {} + {} = {} (difficulty {})",
                self.roll, self.modifier, self.hit_bonus, self.total, self.difficulty
            )
        }
    }
}

fn effect_of(
    ability: &AbilityDefinition,
    attrs: &EffectiveAttributes,
    critical: bool,
) -> AbilityEffect {
    let scaled = |base: u32, rule: Option<mesa_core::ScalingRule>| -> u32 {
        let bonus = rule.map(|r| r.bonus(attrs)).unwrap_or(0);
        let amount = i64::from(base) + i64::from(bonus);
        u32::try_from(amount.max(0)).unwrap_or(u32::MAX)
    };

    match ability.kind {
        AbilityKind::Attack => match ability.damage {
            Some(damage) => {
                let mut amount = scaled(damage, ability.damage_scale);
                let critical = critical && ability.critical.is_some();
                if let Some(crit) = ability.critical.filter(|_| critical) {
                    amount = amount.saturating_mul(crit.mult);
                }
                AbilityEffect::Damage { amount, critical }
            }
            None => AbilityEffect::None,
        },
        AbilityKind::Defense | AbilityKind::Support => match ability.heal {
            Some(heal) => {
                let amount = scaled(heal, ability.heal_scale);
                if ability.heals_everyone() {
                    AbilityEffect::HealAll { amount }
                } else {
                    AbilityEffect::Heal { amount }
                }
            }
            None => AbilityEffect::None,
        },
    }
}

/// Resolve a character's ability with a fresh d20.
///
/// Fails with `NotFound` when the character, their class, or the ability
/// is missing. Performs no mutation.
pub fn resolve_ability(
    characters: &CharacterStore,
    catalog: &ClassCatalog,
    character_id: CharacterId,
    ability_key: &str,
    rng: &mut StdRng,
) -> MechResult<AbilityCheck> {
    let character = characters
        .get(character_id)
        .ok_or_else(|| CoreError::not_found("character", character_id))?;
    let class = catalog
        .get(&character.class_key)
        .ok_or_else(|| CoreError::not_found("class", &character.class_key))?;
    let ability = class
        .ability(ability_key)
        .ok_or_else(|| CoreError::not_found("ability", ability_key))?
        .clone();
    let attrs = character.attributes.apply(&class.modifiers);

    let roll = Die::D20.roll(rng);
    let probe = AbilityCheck::evaluate(
        character.id,
        character.name.clone(),
        ability,
        &attrs,
        roll,
        false,
    );

    let crit_chance = probe
        .ability
        .critical
        .filter(|_| matches!(probe.effect, AbilityEffect::Damage { .. }))
        .map(|crit| crit.chance.clamp(0.0, 1.0));
    let check = match crit_chance {
        Some(chance) if rng.random_bool(chance) => AbilityCheck::evaluate(
            character.id,
            character.name,
            probe.ability,
            &attrs,
            roll,
            true,
        ),
        _ => probe,
    };

    tracing::debug!(
        character = %check.character_name,
        ability = %check.ability.key,
        roll = check.roll,
        total = check.total,
        success = check.success,
        "resolved ability"
    );
    Ok(check)
}
