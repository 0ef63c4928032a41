//! Error types for the core stores and reference data.

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Broad category of a failure, used by callers that only need to know
/// whether to report a missing record, a rejected input, or a broken store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A lookup by id or key missed.
    NotFound,
    /// The input was rejected before any state changed.
    ValidationFailed,
    /// The storage backend could not complete a write.
    Storage,
}

/// Errors that can occur when reading reference data or mutating stores.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A character, enemy, class, ability, or attack could not be found.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// What was looked up (e.g. "character", "ability").
        kind: &'static str,
        /// The id or key that missed.
        key: String,
    },

    /// Input was rejected (point budget, missing name, bad target).
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// The storage lock was poisoned by a panicking writer.
    #[error("storage lock was poisoned")]
    LockPoisoned,

    /// Filesystem error from a directory-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Build a [`CoreError::NotFound`] for the given kind and key.
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Build a [`CoreError::ValidationFailed`] with a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ValidationFailed(_) => ErrorKind::ValidationFailed,
            Self::LockPoisoned | Self::Io(_) | Self::Json(_) => ErrorKind::Storage,
        }
    }
}
