//! The dispatcher.
//!
//! `Game` owns the match state, the ordered handler chain, and the side this
//! process plays. It is the single authority for moving an action through
//! its lifecycle.
//!
//! ## Dispatch algorithm
//!
//! 1. Gate: the action's own `can_fire` and an `ActionCanFire` emission.
//!    A veto returns `false` before anything else runs.
//! 2. `set_up`.
//! 3. Emit `ActionBefore`; continue with whatever action comes back.
//! 4. Gate again and check `cancelled`. A failure here abandons the action:
//!    no apply, no `ActionAfter`, no `clean_up`.
//! 5. Exactly one of `apply_authoritative` / `apply_mirrored`, by side.
//! 6. Emit `ActionAfter`.
//! 7. `clean_up`.
//! 8. Return the apply result.
//!
//! Apply methods receive `&mut Game` and may dispatch sub-actions; nesting
//! is plain recursion on the caller's stack.

use tracing::{debug, trace};

use super::action::Action;
use super::event::{EventHandler, EventKind, Gate, HandlerId, Payload};
use crate::core::{
    ConfigError, MatchConfig, MatchState, Player, PlayerId, PlayerMap, PlayerState, SnapshotError,
};
use crate::participant::Participant;

/// Which execution role this process plays, fixed for the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    /// Originates hidden information (the server).
    Authoritative,
    /// Receives redacted information (a client).
    Mirrored,
}

impl Side {
    /// Is this the authoritative side?
    #[must_use]
    pub const fn is_authoritative(self) -> bool {
        matches!(self, Side::Authoritative)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Authoritative => f.write_str("authoritative"),
            Side::Mirrored => f.write_str("mirrored"),
        }
    }
}

/// How a dispatch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The gate refused the action before set-up.
    Vetoed,
    /// The action was set up, then cancelled or refused by the second gate.
    Cancelled,
    /// The action executed and its apply method returned this value.
    Executed(bool),
}

/// Result of [`Game::dispatch`]: the outcome plus the final action object.
///
/// The action may not be the one that was submitted if a handler replaced
/// it during `ActionBefore`.
#[derive(Debug)]
pub struct Dispatched {
    action: Box<dyn Action>,
    outcome: Outcome,
}

impl Dispatched {
    /// Did the action execute and report success?
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Executed(true))
    }

    /// How the dispatch ended.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The final action object.
    #[must_use]
    pub fn action(&self) -> &dyn Action {
        self.action.as_ref()
    }

    /// The final action as concrete type `A`, if it is one.
    #[must_use]
    pub fn downcast<A: Action>(&self) -> Option<&A> {
        self.action.downcast_ref::<A>()
    }

    /// Take the final action object.
    #[must_use]
    pub fn into_action(self) -> Box<dyn Action> {
        self.action
    }
}

struct Registration {
    id: HandlerId,
    handler: Box<dyn EventHandler>,
}

/// Per-match dispatcher.
pub struct Game {
    side: Side,
    state: MatchState,
    handlers: Vec<Registration>,
    next_handler_id: u32,
    depth: usize,
}

impl Game {
    /// Create a dispatcher over prepared match state.
    pub fn new(side: Side, state: MatchState) -> Self {
        Self {
            side,
            state,
            handlers: Vec::new(),
            next_handler_id: 0,
            depth: 0,
        }
    }

    /// Validate `config`, seat one player per participant, and create a
    /// dispatcher.
    pub fn from_config(
        side: Side,
        config: &MatchConfig,
        participants: impl IntoIterator<Item = Box<dyn Participant>>,
    ) -> crate::core::Result<Self> {
        config.validate()?;

        let players: Vec<Player> = participants
            .into_iter()
            .map(|agent| Player::new(PlayerState::new(config.starting_life), agent))
            .collect();
        if players.len() != config.player_count {
            return Err(ConfigError::SeatMismatch {
                expected: config.player_count,
                seated: players.len(),
            }
            .into());
        }
        let players = PlayerMap::from_vec(players);

        debug!(
            target: "engine::game",
            side = %side,
            players = config.player_count,
            seed = config.seed,
            "match created"
        );

        Ok(Self::new(side, MatchState::new(players, config)))
    }

    /// The side this process plays.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Match state.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Match state, mutably. Only action apply methods should mutate it.
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Shorthand for a player's ruleset state.
    #[must_use]
    pub fn player_state(&self, player: PlayerId) -> &PlayerState {
        self.state.player_state(player)
    }

    /// Number of dispatches currently on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Encoded snapshot of the match state.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        self.state.snapshot().encode()
    }

    // === Handlers ===

    /// Append a handler to the chain. Registration order is invocation order.
    pub fn register_handler(&mut self, handler: impl EventHandler + 'static) -> HandlerId {
        let id = HandlerId::new(self.next_handler_id);
        self.next_handler_id += 1;

        trace!(target: "engine::game", handler = handler.name(), id = %id, "handler registered");
        self.handlers.push(Registration {
            id,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a handler, keeping the order of the rest.
    pub fn unregister_handler(&mut self, id: HandlerId) -> Option<Box<dyn EventHandler>> {
        let pos = self.handlers.iter().position(|r| r.id == id)?;
        Some(self.handlers.remove(pos).handler)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    // === Dispatch ===

    /// Offer `payload` to every handler in registration order.
    ///
    /// A handler sees the payload only if its scope admits the carried
    /// action's category (payloads without an action always pass) and it
    /// reports interest. Its output replaces the payload for the next handler.
    ///
    /// Panics if a handler returns a different payload variant than it was
    /// given.
    pub fn emit_event<'a>(&mut self, kind: EventKind, mut payload: Payload<'a>) -> Payload<'a> {
        // Handlers cannot reach the game, so nothing registers mid-emission.
        let mut handlers = std::mem::take(&mut self.handlers);

        for registration in &mut handlers {
            let handler = registration.handler.as_mut();

            if let Some(category) = payload.category() {
                if !handler.scope().contains(category) {
                    continue;
                }
            }
            if !handler.interested(kind, &payload) {
                continue;
            }

            let variant = payload.variant();
            trace!(
                target: "engine::emit",
                event = %kind,
                handler = handler.name(),
                id = %registration.id,
                "handler invoked"
            );
            payload = handler.handle(kind, payload, &self.state);

            assert_eq!(
                payload.variant(),
                variant,
                "{} replaced a {variant} payload with a {} payload during {kind}",
                handler.name(),
                payload.variant()
            );
        }

        self.handlers = handlers;
        payload
    }

    /// Would `action` be allowed to fire right now?
    ///
    /// Combines the action's own precondition with an `ActionCanFire`
    /// emission. Handlers see a read-only gate and can only deny.
    pub fn can_fire(&mut self, action: &dyn Action) -> bool {
        if !action.can_fire(&self.state) {
            return false;
        }

        self.emit_event(EventKind::ActionCanFire, Payload::Gate(Gate::new(action)))
            .into_gate(EventKind::ActionCanFire)
            .allowed()
    }

    /// Run `action` through its lifecycle and report whether it succeeded.
    ///
    /// A veto, a cancellation, and an apply method returning `false` all
    /// yield `false`; callers treat that as "the action had no effect".
    pub fn process_action<A: Action>(&mut self, action: A) -> bool {
        self.dispatch(Box::new(action)).succeeded()
    }

    /// Like [`process_action`](Self::process_action), but hands back the
    /// final action object so its result fields can be read.
    pub fn dispatch(&mut self, action: Box<dyn Action>) -> Dispatched {
        self.depth += 1;
        let dispatched = self.run_lifecycle(action);
        self.depth -= 1;
        dispatched
    }

    fn run_lifecycle(&mut self, mut action: Box<dyn Action>) -> Dispatched {
        if !self.can_fire(action.as_ref()) {
            debug!(
                target: "engine::dispatch",
                action = action.name(),
                depth = self.depth,
                "action vetoed"
            );
            return Dispatched {
                action,
                outcome: Outcome::Vetoed,
            };
        }

        action.set_up(self);

        action = self
            .emit_event(EventKind::ActionBefore, Payload::Action(action))
            .into_action(EventKind::ActionBefore);

        // set_up has run, but clean_up is skipped on this path.
        if !self.can_fire(action.as_ref()) || action.is_cancelled() {
            debug!(
                target: "engine::dispatch",
                action = action.name(),
                depth = self.depth,
                cancelled = action.is_cancelled(),
                "action abandoned after set-up"
            );
            return Dispatched {
                action,
                outcome: Outcome::Cancelled,
            };
        }

        let succeeded = match self.side {
            Side::Authoritative => action.apply_authoritative(self),
            Side::Mirrored => action.apply_mirrored(self),
        };

        action = self
            .emit_event(EventKind::ActionAfter, Payload::Action(action))
            .into_action(EventKind::ActionAfter);

        action.clean_up(self);

        debug!(
            target: "engine::dispatch",
            action = action.name(),
            depth = self.depth,
            side = %self.side,
            succeeded,
            "action executed"
        );

        Dispatched {
            action,
            outcome: Outcome::Executed(succeeded),
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("side", &self.side)
            .field("state", &self.state)
            .field("handlers", &self.handlers.len())
            .field("depth", &self.depth)
            .finish()
    }
}
