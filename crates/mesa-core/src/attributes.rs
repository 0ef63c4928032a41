//! The six character attributes and point-budget distribution.
//!
//! Base attributes are a non-negative distribution that must spend an exact
//! point budget. Class modifiers are signed deltas, so effective attributes
//! are signed as well.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default number of points a player distributes at character creation.
pub const DEFAULT_POINT_BUDGET: u32 = 40;

/// One of the six fixed attributes, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Speed and reflexes.
    Agility,
    /// Toughness; drives maximum HP.
    Health,
    /// Physical power.
    Strength,
    /// Reasoning and knowledge.
    Intelligence,
    /// Arcane aptitude.
    Magic,
    /// Fortune.
    Luck,
}

impl Attribute {
    /// All attributes in declared order.
    pub const ALL: [Attribute; 6] = [
        Self::Agility,
        Self::Health,
        Self::Strength,
        Self::Intelligence,
        Self::Magic,
        Self::Luck,
    ];

    /// Parse an attribute name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.to_string().to_lowercase() == lower)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agility => write!(f, "Agility"),
            Self::Health => write!(f, "Health"),
            Self::Strength => write!(f, "Strength"),
            Self::Intelligence => write!(f, "Intelligence"),
            Self::Magic => write!(f, "Magic"),
            Self::Luck => write!(f, "Luck"),
        }
    }
}

/// A mapping from attribute to value, iterated in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet<T>(BTreeMap<Attribute, T>);

/// A player's point distribution.
pub type BaseAttributes = AttributeSet<u32>;
/// Additive per-class deltas.
pub type AttributeModifiers = AttributeSet<i32>;
/// Base attributes with class modifiers applied.
pub type EffectiveAttributes = AttributeSet<i32>;

impl<T> Default for AttributeSet<T> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<T: Copy + Default> AttributeSet<T> {
    /// A set with every attribute at the default value (zero).
    pub fn zeroed() -> Self {
        Self(Attribute::ALL.into_iter().map(|a| (a, T::default())).collect())
    }

    /// Value of an attribute, or zero when absent.
    pub fn get(&self, attribute: Attribute) -> T {
        self.0.get(&attribute).copied().unwrap_or_default()
    }

    /// Set the value of an attribute.
    pub fn set(&mut self, attribute: Attribute, value: T) {
        self.0.insert(attribute, value);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, attribute: Attribute, value: T) -> Self {
        self.set(attribute, value);
        self
    }

    /// Iterate `(attribute, value)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, T)> + '_ {
        self.0.iter().map(|(a, v)| (*a, *v))
    }
}

impl<T: Copy + Default> FromIterator<(Attribute, T)> for AttributeSet<T> {
    fn from_iter<I: IntoIterator<Item = (Attribute, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl BaseAttributes {
    /// Base values widened to signed effective values, before modifiers.
    pub fn to_effective(&self) -> EffectiveAttributes {
        self.iter()
            .map(|(a, v)| (a, i32::try_from(v).unwrap_or(i32::MAX)))
            .collect()
    }

    /// Add modifiers on top of these base values.
    pub fn apply(&self, modifiers: &AttributeModifiers) -> EffectiveAttributes {
        let mut out = self.to_effective();
        for (attribute, delta) in modifiers.iter() {
            out.set(attribute, out.get(attribute).saturating_add(delta));
        }
        out
    }
}

/// Sum of every attribute value.
pub fn total_points(attrs: &BaseAttributes) -> u64 {
    attrs.iter().map(|(_, v)| u64::from(v)).sum()
}

/// Reduce a distribution until it fits the budget.
///
/// Attributes are reduced in reverse declared order: the last attribute
/// absorbs as much of the excess as it can, then the one before it, and so
/// on. A distribution already within budget is returned unchanged.
pub fn clamp_distribution(attrs: &BaseAttributes, budget: u32) -> BaseAttributes {
    let mut out = attrs.clone();
    let mut sum = total_points(&out);
    let budget = u64::from(budget);

    for attribute in Attribute::ALL.into_iter().rev() {
        if sum <= budget {
            break;
        }
        let value = out.get(attribute);
        let reduce_by = (sum - budget).min(u64::from(value));
        // reduce_by <= value, so it fits in u32
        let reduce_by = reduce_by as u32;
        out.set(attribute, value - reduce_by);
        sum -= u64::from(reduce_by);
    }
    out
}

/// Check that a distribution spends exactly the budget.
pub fn validate_distribution(attrs: &BaseAttributes, budget: u32) -> CoreResult<()> {
    let total = total_points(attrs);
    let budget = u64::from(budget);
    if total == budget {
        return Ok(());
    }
    let remaining = budget as i64 - total.min(i64::MAX as u64) as i64;
    Err(CoreError::invalid(format!(
        "distribute exactly {budget} points (remaining: {remaining})"
    )))
}
