//! Bounded, newest-first log of session events.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreResult;
use crate::storage::{Storage, keys};

/// Default number of entries kept.
pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// Category of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogKind {
    /// A GM dice roll.
    Dice,
    /// The scenario image changed.
    Scenario,
    /// Environmental or other direct damage.
    Damage,
    /// HP restored.
    Heal,
    /// A character used an ability.
    Ability,
    /// An enemy attacked.
    EnemyAttack,
    /// Battle started or ended.
    Battle,
    /// The turn advanced.
    Turn,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Dice => "dice",
            Self::Scenario => "scenario",
            Self::Damage => "damage",
            Self::Heal => "heal",
            Self::Ability => "ability",
            Self::EnemyAttack => "enemy-attack",
            Self::Battle => "battle",
            Self::Turn => "turn",
        };
        f.write_str(label)
    }
}

/// The individual results behind a dice log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceDetails {
    /// Faces per die.
    pub sides: u32,
    /// Number of dice rolled.
    pub times: u32,
    /// Each die's result.
    pub rolls: Vec<u32>,
    /// Sum of all rolls.
    pub total: u32,
    /// Who rolled, e.g. `"gm"`.
    pub actor: String,
}

/// One logged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique id.
    pub id: Uuid,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Category.
    #[serde(rename = "type")]
    pub kind: LogKind,
    /// Human-readable description.
    pub text: String,
    /// Roll details for dice entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice: Option<DiceDetails>,
}

impl LogEntry {
    /// A new entry stamped now.
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            text: text.into(),
            dice: None,
        }
    }

    /// Attach dice details.
    pub fn with_dice(mut self, dice: DiceDetails) -> Self {
        self.dice = Some(dice);
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.kind,
            self.text
        )
    }
}

/// The persisted event log.
#[derive(Debug, Clone)]
pub struct EventLog {
    storage: Storage,
    capacity: usize,
}

impl EventLog {
    /// A log keeping [`DEFAULT_LOG_CAPACITY`] entries.
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            capacity: DEFAULT_LOG_CAPACITY,
        }
    }

    /// Use a different retention count.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Prepend an entry, dropping the oldest beyond capacity.
    pub fn add(&self, entry: LogEntry) -> CoreResult<LogEntry> {
        tracing::debug!(kind = %entry.kind, text = %entry.text, "log entry");
        self.storage
            .prepend_bounded(keys::LOG, entry.clone(), self.capacity)?;
        Ok(entry)
    }

    /// Shorthand for [`add`](Self::add) with a plain entry.
    pub fn record(&self, kind: LogKind, text: impl Into<String>) -> CoreResult<LogEntry> {
        self.add(LogEntry::new(kind, text))
    }

    /// Entries, newest first.
    pub fn all(&self) -> Vec<LogEntry> {
        self.storage.get_or_default(keys::LOG)
    }

    /// Remove every entry.
    pub fn clear(&self) -> CoreResult<()> {
        self.storage.set(keys::LOG, &Vec::<LogEntry>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn newest_first() {
        let log = EventLog::new(Storage::in_memory());
        log.record(LogKind::Battle, "first").unwrap();
        log.record(LogKind::Turn, "second").unwrap();
        let entries = log.all();
        assert_eq!(entries[0].text, "second");
        assert_eq!(entries[1].text, "first");
    }

    #[test]
    fn capped_at_capacity() {
        let log = EventLog::new(Storage::in_memory());
        for i in 0..60 {
            log.record(LogKind::Dice, format!("roll {i}")).unwrap();
        }
        let entries = log.all();
        assert_eq!(entries.len(), DEFAULT_LOG_CAPACITY);
        assert_eq!(entries[0].text, "roll 59");
        assert_eq!(entries[49].text, "roll 10");
    }

    #[test]
    fn clear_empties() {
        let log = EventLog::new(Storage::in_memory());
        log.record(LogKind::Heal, "x").unwrap();
        log.clear().unwrap();
        assert!(log.all().is_empty());
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&LogKind::EnemyAttack).unwrap();
        assert_eq!(json, "\"enemy-attack\"");
        let entry = LogEntry::new(LogKind::Dice, "d6").with_dice(DiceDetails {
            sides: 6,
            times: 1,
            rolls: vec![4],
            total: 4,
            actor: "gm".to_string(),
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "dice");
        assert_eq!(value["dice"]["actor"], "gm");
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity(capacity in 1usize..10, count in 0usize..25) {
            let log = EventLog::new(Storage::in_memory()).with_capacity(capacity);
            for i in 0..count {
                log.record(LogKind::Turn, i.to_string()).unwrap();
            }
            let entries = log.all();
            prop_assert_eq!(entries.len(), count.min(capacity));
            if count > 0 {
                prop_assert_eq!(&entries[0].text, &(count - 1).to_string());
            }
        }
    }
}
