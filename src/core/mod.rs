//! Core match types: players, cards, state, RNG, configuration, errors.
//!
//! These are the nouns actions operate on. The dispatch machinery that
//! moves actions through their lifecycle lives in [`crate::engine`].

pub mod card;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use card::Card;
pub use config::MatchConfig;
pub use error::{ConfigError, EngineError, Result, SnapshotError};
pub use player::{Player, PlayerId, PlayerMap, PlayerState};
pub use rng::{GameRng, GameRngState};
pub use state::{MatchState, StateSnapshot};
