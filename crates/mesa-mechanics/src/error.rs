//! Error types for the mechanics engine.

use mesa_core::{CoreError, ErrorKind};

/// Errors that can occur during resolution and combat.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A store or catalog error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The chosen target cannot receive this action.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// A battle is already running.
    #[error("a battle is already active")]
    BattleAlreadyActive,

    /// A battle needs at least one character.
    #[error("create at least one character before starting a battle")]
    NoCharacters,

    /// A damage or heal amount must be positive.
    #[error("invalid amount: {0} (must be greater than 0)")]
    InvalidAmount(i64),
}

impl MechError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::InvalidTarget(_)
            | Self::BattleAlreadyActive
            | Self::NoCharacters
            | Self::InvalidAmount(_) => ErrorKind::ValidationFailed,
        }
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
