//! Read-only class reference data: classes, attribute modifiers, abilities.
//!
//! The catalog is loaded once at startup and never mutated. The built-in
//! catalog ships two classes; an alternative catalog can be loaded from a
//! JSON array of class definitions.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, AttributeModifiers, BaseAttributes, EffectiveAttributes};
use crate::error::{CoreError, CoreResult};

/// What an ability does when it succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    /// Damages a chosen enemy.
    Attack,
    /// Heals a chosen ally, or the user.
    Defense,
    /// Party-wide effects.
    Support,
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "attack"),
            Self::Defense => write!(f, "defense"),
            Self::Support => write!(f, "support"),
        }
    }
}

/// A bonus derived from an effective attribute:
/// `floor(value / per) * mult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingRule {
    /// The attribute the bonus is read from.
    pub attribute: Attribute,
    /// Divisor applied to the attribute value. Zero disables the rule.
    pub per: u32,
    /// Multiplier applied after division.
    pub mult: i32,
}

impl ScalingRule {
    /// Compute the bonus for a set of effective attributes.
    pub fn bonus(&self, attrs: &EffectiveAttributes) -> i32 {
        let Ok(per) = i32::try_from(self.per) else {
            return 0;
        };
        if per == 0 {
            return 0;
        }
        attrs
            .get(self.attribute)
            .div_euclid(per)
            .saturating_mul(self.mult)
    }
}

/// Chance for a successful attack to deal multiplied damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalHit {
    /// Probability in `[0, 1]`.
    pub chance: f64,
    /// Damage multiplier on a critical.
    pub mult: u32,
}

/// A class-specific action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    /// Stable key, unique within the class.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Flavour text.
    #[serde(default)]
    pub description: String,
    /// Attribute whose effective value feeds the roll modifier.
    pub attribute: Attribute,
    /// Target that roll + modifier must meet or exceed.
    pub difficulty: i32,
    /// Effect category.
    #[serde(rename = "type")]
    pub kind: AbilityKind,
    /// Flat damage for attacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    /// Flat healing for defense and support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heal: Option<u32>,
    /// Heal every living character instead of one target.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub heal_all: bool,
    /// Extra damage from an attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_scale: Option<ScalingRule>,
    /// Extra to-hit from an attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_bonus: Option<ScalingRule>,
    /// Extra healing from an attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heal_scale: Option<ScalingRule>,
    /// Critical hit chance and multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<CriticalHit>,
}

impl AbilityDefinition {
    /// A bare ability with no effect fields.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        attribute: Attribute,
        difficulty: i32,
        kind: AbilityKind,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: String::new(),
            attribute,
            difficulty,
            kind,
            damage: None,
            heal: None,
            heal_all: false,
            damage_scale: None,
            hit_bonus: None,
            heal_scale: None,
            critical: None,
        }
    }

    fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Returns true when the ability needs an enemy target.
    pub fn targets_enemy(&self) -> bool {
        self.kind == AbilityKind::Attack
    }

    /// Returns true when the ability heals every living character.
    pub fn heals_everyone(&self) -> bool {
        self.kind == AbilityKind::Support && self.heal_all
    }
}

/// A playable class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Stable key referenced by characters.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Flavour text.
    #[serde(default)]
    pub description: String,
    /// Additive deltas applied to base attributes.
    #[serde(default)]
    pub modifiers: AttributeModifiers,
    /// Abilities in display order.
    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,
}

impl ClassDefinition {
    /// Find an ability by key.
    pub fn ability(&self, key: &str) -> Option<&AbilityDefinition> {
        self.abilities.iter().find(|a| a.key == key)
    }
}

/// The set of available classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassCatalog {
    classes: Vec<ClassDefinition>,
}

impl ClassCatalog {
    /// Build a catalog from class definitions, rejecting duplicate keys and
    /// out-of-range critical chances.
    pub fn new(classes: Vec<ClassDefinition>) -> CoreResult<Self> {
        let catalog = Self { classes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from a JSON array of class definitions.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let classes: Vec<ClassDefinition> = serde_json::from_str(json)?;
        Self::new(classes)
    }

    /// Read a catalog from a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// All classes in catalog order.
    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    /// Look up a class by key.
    pub fn get(&self, key: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.key == key)
    }

    /// Abilities of a class, or an empty slice when the class is unknown.
    pub fn abilities(&self, key: &str) -> &[AbilityDefinition] {
        self.get(key).map(|c| c.abilities.as_slice()).unwrap_or(&[])
    }

    /// Apply a class's modifiers to base attributes.
    ///
    /// An unknown class key is not an error here: the base attributes come
    /// back unchanged.
    pub fn apply_modifiers(&self, attrs: &BaseAttributes, key: &str) -> EffectiveAttributes {
        match self.get(key) {
            Some(class) => attrs.apply(&class.modifiers),
            None => {
                tracing::debug!(class = key, "unknown class, attributes left unmodified");
                attrs.to_effective()
            }
        }
    }

    fn validate(&self) -> CoreResult<()> {
        let mut class_keys = HashSet::new();
        for class in &self.classes {
            if !class_keys.insert(class.key.as_str()) {
                return Err(CoreError::invalid(format!(
                    "duplicate class key '{}'",
                    class.key
                )));
            }
            let mut ability_keys = HashSet::new();
            for ability in &class.abilities {
                if !ability_keys.insert(ability.key.as_str()) {
                    return Err(CoreError::invalid(format!(
                        "duplicate ability key '{}' in class '{}'",
                        ability.key, class.key
                    )));
                }
                let bad_crit = ability
                    .critical
                    .filter(|crit| !(0.0..=1.0).contains(&crit.chance));
                if let Some(crit) = bad_crit {
                    return Err(CoreError::invalid(format!(
                        "critical chance {} of '{}' is outside [0, 1]",
                        crit.chance, ability.key
                    )));
                }
            }
        }
        Ok(())
    }

    /// The built-in classes: Warrior and Mage.
    pub fn builtin() -> Self {
        Self {
            classes: vec![warrior(), mage()],
        }
    }
}

impl Default for ClassCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn warrior() -> ClassDefinition {
    use Attribute::*;

    let mut precise = AbilityDefinition::new(
        "precise_strike",
        "Precise Strike",
        Agility,
        9,
        AbilityKind::Attack,
    )
    .describe("A focused attack that favours accuracy; works best with agility.");
    precise.damage = Some(10);
    precise.hit_bonus = Some(ScalingRule {
        attribute: Agility,
        per: 5,
        mult: 1,
    });
    precise.damage_scale = Some(ScalingRule {
        attribute: Strength,
        per: 5,
        mult: 2,
    });

    let mut furious = AbilityDefinition::new(
        "furious_strike",
        "Furious Strike",
        Strength,
        14,
        AbilityKind::Attack,
    )
    .describe("A heavy blow that turns strength into damage, but is harder to land.");
    furious.damage = Some(22);
    furious.damage_scale = Some(ScalingRule {
        attribute: Strength,
        per: 4,
        mult: 4,
    });
    furious.critical = Some(CriticalHit {
        chance: 0.05,
        mult: 2,
    });

    let mut sword = AbilityDefinition::new(
        "sword_strike",
        "Sword Strike",
        Strength,
        10,
        AbilityKind::Attack,
    )
    .describe("Delivers a powerful blow with the sword.");
    sword.damage = Some(15);

    let mut shield = AbilityDefinition::new(
        "shield_block",
        "Shield Block",
        Health,
        8,
        AbilityKind::Defense,
    )
    .describe("Raises the shield for protection.");
    shield.heal = Some(10);

    ClassDefinition {
        key: "warrior".to_string(),
        name: "Warrior".to_string(),
        description: "A sturdy melee fighter trained in weapons and armour.".to_string(),
        modifiers: AttributeModifiers::default()
            .with(Agility, 2)
            .with(Health, 6)
            .with(Strength, 6)
            .with(Intelligence, 0)
            .with(Magic, 0)
            .with(Luck, 1),
        abilities: vec![sword, shield, precise, furious],
    }
}

fn mage() -> ClassDefinition {
    use Attribute::*;

    let mut fireball =
        AbilityDefinition::new("fireball", "Fireball", Magic, 12, AbilityKind::Attack)
            .describe("Conjures a devastating ball of fire.");
    fireball.damage = Some(25);

    let mut blessing =
        AbilityDefinition::new("blessing", "Blessing", Magic, 10, AbilityKind::Support)
            .describe("Restores the health of every ally.");
    blessing.heal = Some(15);
    blessing.heal_all = true;

    let mut burst = AbilityDefinition::new(
        "arcane_burst",
        "Arcane Burst",
        Magic,
        11,
        AbilityKind::Attack,
    )
    .describe("Surges of magical energy that draw on intelligence and magic.");
    burst.damage = Some(18);
    burst.damage_scale = Some(ScalingRule {
        attribute: Magic,
        per: 4,
        mult: 3,
    });
    burst.hit_bonus = Some(ScalingRule {
        attribute: Intelligence,
        per: 5,
        mult: 1,
    });

    let mut shield = AbilityDefinition::new(
        "arcane_shield",
        "Arcane Shield",
        Intelligence,
        10,
        AbilityKind::Defense,
    )
    .describe("A magical barrier that restores HP; stronger with intelligence.");
    shield.heal = Some(12);
    shield.heal_scale = Some(ScalingRule {
        attribute: Intelligence,
        per: 5,
        mult: 3,
    });

    ClassDefinition {
        key: "mage".to_string(),
        name: "Mage".to_string(),
        description: "A master of the arcane arts, frail but powerful in magic.".to_string(),
        modifiers: AttributeModifiers::default()
            .with(Agility, 0)
            .with(Health, 1)
            .with(Strength, 0)
            .with(Intelligence, 6)
            .with(Magic, 8)
            .with(Luck, 0),
        abilities: vec![fireball, blessing, burst, shield],
    }
}
