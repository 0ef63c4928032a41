//! Core types for Mesa: characters, enemies, the class catalog, and the
//! persisted state of a tabletop session.
//!
//! Every store holds a clone of one [`Storage`] handle, so a single backend
//! (in memory, or a directory of JSON files) carries the whole session.

/// The six attributes and point-budget distribution.
pub mod attributes;
/// Class reference data: modifiers and abilities.
pub mod catalog;
/// Player characters and their store.
pub mod character;
/// Enemies, attacks, and their store.
pub mod enemy;
/// Error types used throughout the crate.
pub mod error;
/// GM notes.
pub mod gm;
/// Hit points clamped to a maximum.
pub mod hp;
/// Character and enemy identifiers.
pub mod id;
/// The bounded event log.
pub mod log;
/// Scenario image and asset manifest.
pub mod scenario;
/// Namespaced JSON key-value storage.
pub mod storage;
/// The optional story document.
pub mod story;

/// Re-export attribute types.
pub use attributes::{Attribute, AttributeModifiers, BaseAttributes, EffectiveAttributes};
/// Re-export catalog types.
pub use catalog::{AbilityDefinition, AbilityKind, ClassCatalog, ClassDefinition, ScalingRule};
/// Re-export character types.
pub use character::{Character, CharacterStore, NewCharacter};
/// Re-export enemy types.
pub use enemy::{Attack, Enemy, EnemyStore, NewEnemy};
/// Re-export error types.
pub use error::{CoreError, CoreResult, ErrorKind};
/// Re-export GM note types.
pub use gm::{GmMessage, GmMessages};
/// Re-export hit points.
pub use hp::HitPoints;
/// Re-export identifiers.
pub use id::{CharacterId, EnemyId};
/// Re-export log types.
pub use log::{DiceDetails, EventLog, LogEntry, LogKind};
/// Re-export scenario types.
pub use scenario::{AssetImage, ScenarioStore};
/// Re-export storage types.
pub use storage::{Backend, Storage};
/// Re-export story types.
pub use story::{Story, StoryPart};
