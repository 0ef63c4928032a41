//! Namespaced key-value persistence with JSON values.
//!
//! A [`Storage`] handle wraps a shared [`Backend`] and a key prefix. Every
//! store in the crate holds a clone of the same handle, so all of them read
//! and write one medium. Reads never fail: a missing key, a backend error,
//! or a value that no longer deserializes all yield the caller's fallback.

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CoreResult;

/// Default namespace for every persisted key.
pub const DEFAULT_PREFIX: &str = "rpg_offline_v1";

/// Logical keys of the persisted state.
pub mod keys {
    /// The character list.
    pub const CHARACTERS: &str = "characters";
    /// The enemy list.
    pub const ENEMIES: &str = "enemies";
    /// Battle state and turn order.
    pub const BATTLE: &str = "battleState";
    /// The event log.
    pub const LOG: &str = "log";
    /// Id of the selected character.
    pub const SELECTED_CHARACTER: &str = "selectedCharacterId";
    /// Id of the selected enemy.
    pub const SELECTED_ENEMY: &str = "selectedEnemyId";
    /// Current scenario image reference.
    pub const SCENARIO: &str = "scenarioImage";
    /// GM messages.
    pub const GM_MESSAGES: &str = "gmMessages";
}

/// A raw string key-value medium.
///
/// Implementations use interior mutability so a backend can be shared
/// between stores behind an `Arc`.
pub trait Backend: Send + Sync {
    /// Read the raw value for a key, or `None` if absent.
    fn read(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write a raw value, replacing any previous one.
    fn write(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> CoreResult<()>;
}

/// A shared, namespaced JSON view over a backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn Backend>,
    prefix: String,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Storage {
    /// Wrap a backend under a key prefix.
    pub fn new(backend: Arc<dyn Backend>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// A fresh in-memory storage under the default prefix.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), DEFAULT_PREFIX)
    }

    /// The key prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }

    /// Read and decode a value, falling back on any failure.
    pub fn get<T: DeserializeOwned>(&self, name: &str, fallback: T) -> T {
        let key = self.key(name);
        match self.backend.read(&key) {
            Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(%key, error = %e, "stored value is unreadable, using fallback");
                    fallback
                }
            },
            Ok(_) => fallback,
            Err(e) => {
                tracing::warn!(%key, error = %e, "storage read failed, using fallback");
                fallback
            }
        }
    }

    /// [`get`](Self::get) with `T::default()` as the fallback.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        self.get(name, T::default())
    }

    /// Encode and write a value.
    pub fn set<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> CoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(&self.key(name), &raw)
    }

    /// Remove a value.
    pub fn remove(&self, name: &str) -> CoreResult<()> {
        self.backend.delete(&self.key(name))
    }

    /// Insert an item at the front of a stored list, keeping at most
    /// `capacity` items. Returns the list length after the write.
    pub fn prepend_bounded<T>(&self, name: &str, item: T, capacity: usize) -> CoreResult<usize>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut list: Vec<T> = self.get_or_default(name);
        list.insert(0, item);
        list.truncate(capacity);
        self.set(name, &list)?;
        Ok(list.len())
    }
}
