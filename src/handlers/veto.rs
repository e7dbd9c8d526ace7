//! Blocking actions by rule.

use crate::core::MatchState;
use crate::engine::{Action, CategorySet, EventHandler, EventKind, Payload};

/// How a [`Veto`] stops an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VetoMode {
    /// Deny at the gate. The action is never set up.
    Deny,
    /// Cancel during `ActionBefore`. The action is set up but never applied.
    Cancel,
}

/// Stops every action in scope that matches a predicate.
///
/// ```
/// use ccg_dispatch::actions::Heal;
/// use ccg_dispatch::handlers::{Veto, VetoMode};
///
/// // Nobody may heal.
/// let no_heals = Veto::deny(|action, _state| action.is::<Heal>());
/// assert_eq!(no_heals.mode(), VetoMode::Deny);
/// ```
pub struct Veto<F> {
    predicate: F,
    mode: VetoMode,
    scope: CategorySet,
}

impl<F> Veto<F>
where
    F: FnMut(&dyn Action, &MatchState) -> bool,
{
    /// Deny matching actions at the gate.
    pub fn deny(predicate: F) -> Self {
        Self {
            predicate,
            mode: VetoMode::Deny,
            scope: CategorySet::INTERCEPTABLE,
        }
    }

    /// Cancel matching actions after set-up.
    pub fn cancel(predicate: F) -> Self {
        Self {
            mode: VetoMode::Cancel,
            ..Self::deny(predicate)
        }
    }

    /// Restrict which categories are considered (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, scope: CategorySet) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn mode(&self) -> VetoMode {
        self.mode
    }
}

impl<F> std::fmt::Debug for Veto<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Veto")
            .field("mode", &self.mode)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl<F> EventHandler for Veto<F>
where
    F: FnMut(&dyn Action, &MatchState) -> bool,
{
    fn name(&self) -> &'static str {
        "Veto"
    }

    fn scope(&self) -> CategorySet {
        self.scope
    }

    fn interested(&self, kind: EventKind, _payload: &Payload<'_>) -> bool {
        match self.mode {
            VetoMode::Deny => kind == EventKind::ActionCanFire,
            VetoMode::Cancel => kind == EventKind::ActionBefore,
        }
    }

    fn handle<'a>(&mut self, _kind: EventKind, mut payload: Payload<'a>, state: &MatchState) -> Payload<'a> {
        match &mut payload {
            Payload::Gate(gate) => {
                if (self.predicate)(gate.action(), state) {
                    gate.deny();
                }
            }
            Payload::Action(action) => {
                if (self.predicate)(action.as_ref(), state) {
                    action.cancel(true);
                }
            }
            Payload::Custom(_) => {}
        }
        payload
    }
}
