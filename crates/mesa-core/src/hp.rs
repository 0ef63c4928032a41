//! Hit points: a current value clamped between zero and a fixed maximum.

use serde::{Deserialize, Serialize};

/// Current and maximum hit points.
///
/// `current` always stays within `0..=max`. Adjustments take wide signed
/// amounts so that negative or oversized inputs saturate instead of
/// wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    /// Current HP. Records written before HP tracking existed have none;
    /// those load as "full" and get clamped to `max`.
    #[serde(default = "HitPoints::unset_current")]
    pub current_hp: u32,
    /// Maximum HP, fixed at creation. Zero marks a legacy record.
    #[serde(default)]
    pub max_hp: u32,
}

impl HitPoints {
    /// Full hit points.
    pub fn full(max: u32) -> Self {
        Self {
            current_hp: max,
            max_hp: max,
        }
    }

    /// Hit points with an explicit current value, clamped to `0..=max`.
    pub fn with_current(current: i64, max: u32) -> Self {
        Self {
            current_hp: clamp_hp(current, max),
            max_hp: max,
        }
    }

    fn unset_current() -> u32 {
        u32::MAX
    }

    /// Set the current value, clamping to bounds. Returns the new value.
    pub fn set(&mut self, value: i64) -> u32 {
        self.current_hp = clamp_hp(value, self.max_hp);
        self.current_hp
    }

    /// Adjust by a signed delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i64) -> u32 {
        self.set(i64::from(self.current_hp).saturating_add(delta))
    }

    /// Restore to maximum.
    pub fn reset(&mut self) {
        self.current_hp = self.max_hp;
    }

    /// Returns true once HP has reached zero.
    pub fn is_defeated(&self) -> bool {
        self.current_hp == 0
    }

    /// Fraction of HP remaining (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.current_hp) / f64::from(self.max_hp)
    }
}

impl std::fmt::Display for HitPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current_hp, self.max_hp)
    }
}

fn clamp_hp(value: i64, max: u32) -> u32 {
    // clamped into 0..=max, so the cast is lossless
    value.clamp(0, i64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn full_starts_at_max() {
        let hp = HitPoints::full(30);
        assert_eq!(hp.current_hp, 30);
        assert!(!hp.is_defeated());
    }

    #[test]
    fn adjust_clamps_both_ends() {
        let mut hp = HitPoints::full(20);
        assert_eq!(hp.adjust(-25), 0);
        assert!(hp.is_defeated());
        assert_eq!(hp.adjust(100), 20);
    }

    #[test]
    fn reset_restores_max() {
        let mut hp = HitPoints::with_current(3, 50);
        hp.reset();
        assert_eq!(hp.current_hp, 50);
    }

    #[test]
    fn fraction() {
        let hp = HitPoints::with_current(10, 40);
        assert!((hp.fraction() - 0.25).abs() < f64::EPSILON);
        let zero = HitPoints::full(0);
        assert!(zero.fraction().abs() < f64::EPSILON);
    }

    #[test]
    fn legacy_record_loads_as_full() {
        let hp: HitPoints = serde_json::from_str(r#"{"max_hp":50}"#).unwrap();
        assert_eq!(hp.current_hp, u32::MAX);
        let normalized = HitPoints::with_current(i64::from(hp.current_hp), hp.max_hp);
        assert_eq!(normalized.current_hp, 50);
    }

    #[test]
    fn display() {
        assert_eq!(HitPoints::with_current(7, 20).to_string(), "7/20");
    }

    proptest! {
        #[test]
        fn adjust_stays_in_bounds(max in 0u32..1000, start in any::<i64>(), delta in any::<i64>()) {
            let mut hp = HitPoints::with_current(start, max);
            let value = hp.adjust(delta);
            prop_assert!(value <= hp.max_hp);
            prop_assert_eq!(value, hp.current_hp);
        }
    }
}
