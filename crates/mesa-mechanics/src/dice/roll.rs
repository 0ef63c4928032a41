//! Multi-die rolls and their results.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use mesa_core::DiceDetails;

use super::Die;

/// The result of rolling `times` dice of `sides` faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Faces per die.
    pub sides: u32,
    /// Number of dice.
    pub times: u32,
    /// Each die's result, in roll order.
    pub rolls: Vec<u32>,
    /// Sum of all rolls.
    pub total: u32,
}

impl DiceRoll {
    /// Attach an actor to produce log details.
    pub fn details(&self, actor: impl Into<String>) -> DiceDetails {
        DiceDetails {
            sides: self.sides,
            times: self.times,
            rolls: self.rolls.clone(),
            total: self.total,
            actor: actor.into(),
        }
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        write!(
            f,
            "{}d{}: [{}] = {}",
            self.times,
            self.sides,
            values.join(", "),
            self.total
        )
    }
}

/// Roll `times` dice with `sides` faces each. Callers clamp `times`.
pub fn roll(sides: u32, times: u32, rng: &mut StdRng) -> DiceRoll {
    let die = Die::Custom(sides.max(1));
    let rolls: Vec<u32> = (0..times).map(|_| die.roll(rng)).collect();
    let total = rolls.iter().fold(0u32, |acc, v| acc.saturating_add(*v));
    DiceRoll {
        sides,
        times,
        rolls,
        total,
    }
}
