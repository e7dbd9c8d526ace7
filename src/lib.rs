//! # ccg-dispatch
//!
//! The rules-dispatch core of a turn-based networked card game.
//!
//! ## Design Principles
//!
//! 1. **Everything Is an Action**: Damage, drawing, a whole turn stage. Rules
//!    compose by having one action dispatch others and branch on the result.
//!
//! 2. **Interception Over Modification**: Card effects and house rules are
//!    event handlers that veto, cancel, edit, or replace actions in flight.
//!    Actions never know who is listening.
//!
//! 3. **Two Sides, One Ruleset**: The authoritative side (server) deals
//!    hidden information; the mirrored side (client) sees placeholders until
//!    cards are revealed. Each action says explicitly what it does on both.
//!
//! ## Architecture
//!
//! - **Explicit Context**: Actions receive `&mut Game`, handlers receive
//!   `&MatchState`. There is no global game.
//!
//! - **Persistent Data Structures**: Hands are `im::Vector`, so state
//!   snapshots are cheap.
//!
//! - **Deterministic Randomness**: The authoritative side draws from a
//!   seeded ChaCha8 RNG whose position is part of every snapshot.
//!
//! ## Modules
//!
//! - `core`: Players, cards, match state, RNG, configuration, errors
//! - `engine`: Action and handler contracts, the `Game` dispatcher
//! - `participant`: The seat boundary: reveals and player input
//! - `actions`: The basic ruleset (attack, graze, heal, turn stages)
//! - `handlers`: Ready-made interceptors (journal, veto)

pub mod core;
pub mod engine;
pub mod participant;
pub mod actions;
pub mod handlers;

// Re-export commonly used types
pub use crate::core::{
    Card, PlayerId, PlayerMap, Player, PlayerState,
    GameRng, GameRngState,
    MatchConfig, MatchState, StateSnapshot,
    ConfigError, EngineError, SnapshotError,
};

pub use crate::engine::{
    Action, ActionCategory, CategorySet,
    EventHandler, EventKind, Gate, HandlerId, Payload,
    Game, Side, Outcome, Dispatched,
};

pub use crate::participant::{Participant, Prompt, Scripted, InputError};

pub use crate::actions::{
    Attack, Damage, Heal,
    DrawCards, DropCardIndex, ChooseCard, CardCondition,
    DropCardStage, ActionStage,
};

pub use crate::handlers::{ActionJournal, Journal, Veto, VetoMode};
