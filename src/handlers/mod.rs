//! Ready-made interceptors.
//!
//! - [`ActionJournal`]: records executed actions, e.g. "log all attacks".
//! - [`Veto`]: denies or cancels actions matching a predicate.
//!
//! Rulesets write their own handlers by implementing
//! [`EventHandler`](crate::engine::EventHandler); these two cover the
//! common cases and double as examples.

pub mod journal;
pub mod veto;

pub use journal::{ActionJournal, Journal, JournalEntry};
pub use veto::{Veto, VetoMode};
