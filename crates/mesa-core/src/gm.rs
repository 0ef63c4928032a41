//! Free-form GM notes, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::log::DEFAULT_LOG_CAPACITY;
use crate::storage::{Storage, keys};

/// A note written by the GM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmMessage {
    /// Unique id.
    pub id: Uuid,
    /// Note text.
    pub text: String,
    /// When it was written.
    pub timestamp: DateTime<Utc>,
}

/// The persisted list of GM notes.
#[derive(Debug, Clone)]
pub struct GmMessages {
    storage: Storage,
    capacity: usize,
}

impl GmMessages {
    /// A list keeping [`DEFAULT_LOG_CAPACITY`] notes.
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

    /// Add a note. Blank text is rejected.
    pub fn add(&self, text: &str) -> CoreResult<GmMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::invalid("message text is empty"));
        }
        let message = GmMessage {
            id: Uuid::new_v4(),
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        self.storage
            .prepend_bounded(keys::GM_MESSAGES, message.clone(), self.capacity)?;
        Ok(message)
    }

    /// Notes, newest first.
    pub fn all(&self) -> Vec<GmMessage> {
        self.storage.get_or_default(keys::GM_MESSAGES)
    }

    /// Remove every note.
    pub fn clear(&self) -> CoreResult<()> {
        self.storage.remove(keys::GM_MESSAGES)
    }
}
