//! Recording executed actions.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::MatchState;
use crate::engine::{ActionCategory, CategorySet, EventHandler, EventKind, Payload};

/// One executed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub name: String,
    pub category: ActionCategory,
}

/// Read side of an [`ActionJournal`], kept by whoever registered it.
#[derive(Clone, Debug, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<JournalEntry>>>,
}

impl Journal {
    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.borrow().clone()
    }

    /// Action names recorded so far, oldest first.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|e| e.name.clone()).collect()
    }

    /// How many times an action named `name` executed.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.entries.borrow().iter().filter(|e| e.name == name).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Records every action in scope as it finishes executing.
///
/// Only `ActionAfter` is observed, so vetoed and cancelled actions never
/// appear. Nested actions finish first and are therefore recorded before
/// the action that dispatched them. The payload is passed through untouched.
///
/// ```
/// use ccg_dispatch::handlers::ActionJournal;
/// use ccg_dispatch::engine::CategorySet;
///
/// let journal = ActionJournal::new().with_scope(CategorySet::USER_ACTIONS);
/// let log = journal.journal();
/// // game.register_handler(journal);
/// assert!(log.is_empty());
/// ```
#[derive(Debug)]
pub struct ActionJournal {
    scope: CategorySet,
    journal: Journal,
}

impl ActionJournal {
    /// A journal of every interceptable action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: CategorySet::INTERCEPTABLE,
            journal: Journal::default(),
        }
    }

    /// Restrict what is recorded (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, scope: CategorySet) -> Self {
        self.scope = scope;
        self
    }

    /// A handle on the recorded entries. Take it before registering.
    #[must_use]
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

impl Default for ActionJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ActionJournal {
    fn scope(&self) -> CategorySet {
        self.scope
    }

    fn interested(&self, kind: EventKind, payload: &Payload<'_>) -> bool {
        kind == EventKind::ActionAfter && payload.action().is_some()
    }

    fn handle<'a>(&mut self, _kind: EventKind, payload: Payload<'a>, _state: &MatchState) -> Payload<'a> {
        if let Some(action) = payload.action() {
            self.journal.entries.borrow_mut().push(JournalEntry {
                name: action.name().to_string(),
                category: action.category(),
            });
        }
        payload
    }
}
