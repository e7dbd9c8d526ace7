//! Events, payloads, and the interceptor contract.
//!
//! The dispatcher emits three events around every action:
//!
//! - [`EventKind::ActionCanFire`] over a read-only [`Gate`], twice: before
//!   set-up and again after `ActionBefore`.
//! - [`EventKind::ActionBefore`] over the action itself. Handlers may edit
//!   parameters, cancel, or swap in a different action.
//! - [`EventKind::ActionAfter`] over the executed action and its results.
//!
//! Rulesets can emit their own [`EventKind::Custom`] events with a JSON
//! payload through [`Game::emit_event`](super::Game::emit_event).
//!
//! ## Payload replacement
//!
//! A handler receives the payload by value and returns the payload that
//! continues down the chain. It may return a different action, but it must
//! return the same variant it was given. The dispatcher checks this after
//! every handler and panics on a mismatch: a handler that turns an action
//! into something else is defective.

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionCategory, CategorySet};
use crate::core::MatchState;

/// Kind of an emitted event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Asking whether an action may fire.
    ActionCanFire,
    /// An action is set up and about to execute.
    ActionBefore,
    /// An action has executed.
    ActionAfter,
    /// Ruleset-defined event.
    Custom(&'static str),
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::ActionCanFire => f.write_str("action_can_fire"),
            EventKind::ActionBefore => f.write_str("action_before"),
            EventKind::ActionAfter => f.write_str("action_after"),
            EventKind::Custom(name) => f.write_str(name),
        }
    }
}

/// Read-only view of an action being gated, plus the running verdict.
///
/// Handlers can inspect the action and deny it, but cannot edit or replace
/// it during gating.
#[derive(Debug)]
pub struct Gate<'a> {
    action: &'a dyn Action,
    allowed: bool,
}

impl<'a> Gate<'a> {
    /// Open a gate over `action`, initially allowed.
    pub fn new(action: &'a dyn Action) -> Self {
        Self {
            action,
            allowed: true,
        }
    }

    /// The action being gated.
    #[must_use]
    pub fn action(&self) -> &'a dyn Action {
        self.action
    }

    /// Current verdict.
    #[must_use]
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    /// Veto the action. Later handlers cannot overturn this.
    pub fn deny(&mut self) {
        self.allowed = false;
    }
}

/// Tagged payload carried by an event.
#[derive(Debug)]
pub enum Payload<'a> {
    /// An in-flight action (`ActionBefore`, `ActionAfter`).
    Action(Box<dyn Action>),
    /// A gating query (`ActionCanFire`).
    Gate(Gate<'a>),
    /// Ruleset data for custom events.
    Custom(serde_json::Value),
}

impl<'a> Payload<'a> {
    /// Variant name, for diagnostics.
    #[must_use]
    pub fn variant(&self) -> &'static str {
        match self {
            Payload::Action(_) => "action",
            Payload::Gate(_) => "gate",
            Payload::Custom(_) => "custom",
        }
    }

    /// The action carried by this payload, if any.
    #[must_use]
    pub fn action(&self) -> Option<&dyn Action> {
        match self {
            Payload::Action(action) => Some(action.as_ref()),
            Payload::Gate(gate) => Some(gate.action()),
            Payload::Custom(_) => None,
        }
    }

    /// The in-flight action, mutably. Gated actions are read-only.
    pub fn action_mut(&mut self) -> Option<&mut (dyn Action + 'static)> {
        match self {
            Payload::Action(action) => Some(action.as_mut()),
            Payload::Gate(_) | Payload::Custom(_) => None,
        }
    }

    /// Category of the carried action, if any.
    #[must_use]
    pub fn category(&self) -> Option<ActionCategory> {
        self.action().map(|action| action.category())
    }

    /// Is the carried action of concrete type `A`?
    #[must_use]
    pub fn is_action<A: Action>(&self) -> bool {
        self.action().is_some_and(|action| action.is::<A>())
    }

    pub(crate) fn into_action(self, kind: EventKind) -> Box<dyn Action> {
        match self {
            Payload::Action(action) => action,
            other => panic!(
                "{kind} emission produced a {} payload where an action was required",
                other.variant()
            ),
        }
    }

    pub(crate) fn into_gate(self, kind: EventKind) -> Gate<'a> {
        match self {
            Payload::Gate(gate) => gate,
            other => panic!(
                "{kind} emission produced a {} payload where a gate was required",
                other.variant()
            ),
        }
    }
}

/// Identifier of a registered handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandlerId(pub u32);

impl HandlerId {
    /// Create a new handler ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handler({})", self.0)
    }
}

/// An interceptor registered on a game.
///
/// Handlers are offered every event in registration order. A handler whose
/// scope admits the payload's action category and that reports interest gets
/// to transform the payload; its output is what the next handler sees.
///
/// ## Implementation Notes
///
/// - `interested` may be called any number of times and must not depend on
///   ordering beyond registration order.
/// - `handle` mutates only the payload and the handler's own fields. Match
///   state is read-only here; changing it is the job of actions.
/// - `handle` must return the variant it received.
pub trait EventHandler {
    /// Short name for logs.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or(path)
    }

    /// Action categories this handler may see.
    fn scope(&self) -> CategorySet {
        CategorySet::INTERCEPTABLE
    }

    /// Does this handler want to transform `payload` for `kind`?
    fn interested(&self, kind: EventKind, payload: &Payload<'_>) -> bool;

    /// Transform the payload.
    fn handle<'a>(&mut self, kind: EventKind, payload: Payload<'a>, state: &MatchState) -> Payload<'a>;
}
