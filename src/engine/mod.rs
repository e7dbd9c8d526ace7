//! Action dispatch: the action contract, events and handlers, and the
//! per-match dispatcher.
//!
//! ## Design Philosophy
//!
//! All rule logic lives in two kinds of objects:
//!
//! - **Actions** are self-contained state transitions. Complex rules are
//!   built by having one action's apply method dispatch further actions and
//!   branch on their success.
//! - **Handlers** intercept actions as they move through the lifecycle.
//!   They can veto, cancel, edit, or replace an action without the action
//!   knowing they exist.
//!
//! [`Game`] sits between the two and is the only thing that runs an action.
//!
//! ## Example
//!
//! ```
//! use ccg_dispatch::actions::Damage;
//! use ccg_dispatch::core::{MatchConfig, PlayerId};
//! use ccg_dispatch::engine::{Game, Side};
//! use ccg_dispatch::participant::{Participant, Scripted};
//!
//! let config = MatchConfig::new(2);
//! let seats = (0..2).map(|_| Box::new(Scripted::new()) as Box<dyn Participant>);
//! let mut game = Game::from_config(Side::Authoritative, &config, seats).unwrap();
//!
//! assert!(game.process_action(Damage::new(PlayerId::new(1), 1)));
//! assert_eq!(game.player_state(PlayerId::new(1)).life, 3);
//! ```

pub mod action;
pub mod event;
pub mod game;

pub use action::{Action, ActionCategory, AsAny, CategorySet};
pub use event::{EventHandler, EventKind, Gate, HandlerId, Payload};
pub use game::{Dispatched, Game, Outcome, Side};
