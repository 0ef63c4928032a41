//! In-memory backend for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CoreError, CoreResult};

use super::Backend;

/// A backend holding every key in a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> CoreResult<Option<String>> {
        let values = self.values.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut values = self.values.write().map_err(|_| CoreError::LockPoisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> CoreResult<()> {
        let mut values = self.values.write().map_err(|_| CoreError::LockPoisoned)?;
        values.remove(key);
        Ok(())
    }
}
