//! Recoverable errors surfaced by the library.
//!
//! Rule vetoes and malformed player input are not errors: they are boolean
//! outcomes consumed by the calling action. Defective actions or handlers
//! abort dispatch with a panic. What remains is configuration and state
//! encoding, covered here. Input parsing has its own
//! [`InputError`](crate::participant::InputError), which never leaves the
//! action that asked.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse match configuration")]
    Parse(#[source] serde_json::Error),

    #[error("player count {0} outside 1..=255")]
    PlayerCount(usize),

    #[error("configuration seats {expected} players but {seated} participants were provided")]
    SeatMismatch { expected: usize, seated: usize },

    #[error("starting life must be positive, got {0}")]
    StartingLife(i64),

    #[error("draw pool is empty")]
    EmptyDrawPool,

    #[error("draw pool contains the hidden placeholder")]
    HiddenInDrawPool,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode match snapshot")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode match snapshot")]
    Decode(#[source] bincode::Error),
}
