//! The action contract.
//!
//! An action is one candidate state transition. It carries its parameters
//! from construction, a `cancelled` flag handlers may set, and after a
//! successful execution its own result fields (which cards were drawn, which
//! indices were chosen). The same object is both the request and the record
//! of its outcome.
//!
//! ## Lifecycle
//!
//! ```text
//! Constructed -> Gated -> SetUp -> BeforeEmitted -> Cancelled
//!                                                -> Executed -> AfterEmitted -> CleanedUp
//! ```
//!
//! [`Game`](super::Game) owns the lifecycle; actions only provide the hooks.
//! Both apply methods are required: every action states explicitly what it
//! does on the authoritative side and on the mirrored side, and the two must
//! agree on success for the same logical situation.
//!
//! ## Categories
//!
//! [`ActionCategory`] classifies actions by who may intercept them. Handlers
//! declare a [`CategorySet`] scope and never see actions outside it.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::game::Game;
use crate::core::MatchState;

/// Who may intercept an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    /// Engine-level transitions (damage, drawing, discarding).
    Generic,
    /// Card or skill actions initiated by a player.
    User,
    /// The basic card actions (attack, graze, heal). Also user actions.
    Base,
    /// Bookkeeping that handlers should not rewrite.
    Internal,
}

impl ActionCategory {
    const fn bit(self) -> u8 {
        match self {
            ActionCategory::Generic => 1,
            ActionCategory::User => 1 << 1,
            ActionCategory::Base => 1 << 2,
            ActionCategory::Internal => 1 << 3,
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionCategory::Generic => "generic",
            ActionCategory::User => "user",
            ActionCategory::Base => "base",
            ActionCategory::Internal => "internal",
        };
        f.write_str(label)
    }
}

/// A set of [`ActionCategory`] values, used as a handler's interception scope.
///
/// ```
/// use ccg_dispatch::engine::{ActionCategory, CategorySet};
///
/// let scope = CategorySet::USER_ACTIONS;
/// assert!(scope.contains(ActionCategory::Base));
/// assert!(!scope.contains(ActionCategory::Generic));
/// assert!(!CategorySet::INTERCEPTABLE.contains(ActionCategory::Internal));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CategorySet(u8);

impl CategorySet {
    /// No categories.
    pub const NONE: Self = Self(0);

    /// Every category, including internal actions.
    pub const ALL: Self = Self(0b1111);

    /// Every category except internal actions. The default handler scope.
    pub const INTERCEPTABLE: Self = Self(0b0111);

    /// User actions, including base actions.
    pub const USER_ACTIONS: Self = Self(0b0110);

    /// A set holding one category.
    #[must_use]
    pub const fn only(category: ActionCategory) -> Self {
        Self(category.bit())
    }

    /// Add a category (builder pattern).
    #[must_use]
    pub const fn with(self, category: ActionCategory) -> Self {
        Self(self.0 | category.bit())
    }

    /// Remove a category (builder pattern).
    #[must_use]
    pub const fn without(self, category: ActionCategory) -> Self {
        Self(self.0 & !category.bit())
    }

    /// Is `category` in this set?
    #[must_use]
    pub const fn contains(self, category: ActionCategory) -> bool {
        self.0 & category.bit() != 0
    }
}

/// Upcast to `Any` so callers can read a concrete action's result fields.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A self-contained, side-aware state transition.
///
/// ## Implementation Notes
///
/// - `can_fire`: the action's own precondition. Handlers get a second say
///   through the `ActionCanFire` event; the dispatcher combines both.
/// - `apply_authoritative` / `apply_mirrored`: exactly one runs per dispatch,
///   chosen by the game's side. An apply method may build further actions and
///   dispatch them on the same `game`; that is the only form of composition.
/// - `cancel`: only sets the flag. Handlers call it during `ActionBefore`.
pub trait Action: AsAny + fmt::Debug {
    /// Short name for logs and journals.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or(path)
    }

    /// Who may intercept this action.
    fn category(&self) -> ActionCategory {
        ActionCategory::Generic
    }

    /// The action's own precondition against current state.
    fn can_fire(&self, _state: &MatchState) -> bool {
        true
    }

    /// Runs after the gate passes and before `ActionBefore` is emitted.
    fn set_up(&mut self, _game: &mut Game) {}

    /// Execute on the side that originates hidden information.
    fn apply_authoritative(&mut self, game: &mut Game) -> bool;

    /// Execute on a side that receives redacted information.
    fn apply_mirrored(&mut self, game: &mut Game) -> bool;

    /// Runs after `ActionAfter`, only if the action executed.
    fn clean_up(&mut self, _game: &mut Game) {}

    /// Has a handler cancelled this action?
    fn is_cancelled(&self) -> bool;

    /// Set or clear the cancellation flag.
    fn cancel(&mut self, cancel: bool);
}

impl<'a> dyn Action + 'a {
    /// Is this action of concrete type `A`?
    #[must_use]
    pub fn is<A: Action>(&self) -> bool {
        self.as_any().is::<A>()
    }

    /// Borrow as concrete type `A`.
    #[must_use]
    pub fn downcast_ref<A: Action>(&self) -> Option<&A> {
        self.as_any().downcast_ref::<A>()
    }

    /// Borrow mutably as concrete type `A`.
    pub fn downcast_mut<A: Action>(&mut self) -> Option<&mut A> {
        self.as_any_mut().downcast_mut::<A>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Nop {
        cancelled: bool,
    }

    impl Action for Nop {
        fn apply_authoritative(&mut self, _game: &mut Game) -> bool {
            true
        }

        fn apply_mirrored(&mut self, _game: &mut Game) -> bool {
            true
        }

        fn is_cancelled(&self) -> bool {
            self.cancelled
        }

        fn cancel(&mut self, cancel: bool) {
            self.cancelled = cancel;
        }
    }

    #[test]
    fn test_default_name_strips_path() {
        assert_eq!(Nop::default().name(), "Nop");
    }

    #[test]
    fn test_default_category_is_generic() {
        assert_eq!(Nop::default().category(), ActionCategory::Generic);
    }

    #[test]
    fn test_cancel_sets_flag() {
        let mut nop = Nop::default();
        assert!(!nop.is_cancelled());
        nop.cancel(true);
        assert!(nop.is_cancelled());
        nop.cancel(false);
        assert!(!nop.is_cancelled());
    }

    #[test]
    fn test_downcast() {
        let mut boxed: Box<dyn Action> = Box::new(Nop::default());

        assert!(boxed.is::<Nop>());
        assert!(boxed.downcast_ref::<Nop>().is_some());
        boxed.downcast_mut::<Nop>().unwrap().cancelled = true;
        assert!(boxed.is_cancelled());
    }

    #[test]
    fn test_category_set() {
        let set = CategorySet::NONE.with(ActionCategory::Generic);
        assert!(set.contains(ActionCategory::Generic));
        assert!(!set.contains(ActionCategory::User));

        let set = CategorySet::ALL.without(ActionCategory::Generic);
        assert!(!set.contains(ActionCategory::Generic));
        assert!(set.contains(ActionCategory::Internal));

        assert_eq!(CategorySet::only(ActionCategory::Base).with(ActionCategory::User), CategorySet::USER_ACTIONS);
        assert_eq!(CategorySet::ALL.without(ActionCategory::Internal), CategorySet::INTERCEPTABLE);
    }
}
