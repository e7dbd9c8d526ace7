//! The basic ruleset: attack, graze, heal, and the stages of a turn.
//!
//! Each action is a small struct whose public fields are its parameters
//! and, after a successful dispatch, its results. Read results back through
//! [`Game::dispatch`](crate::engine::Game::dispatch) and
//! [`Dispatched::downcast`](crate::engine::Dispatched::downcast).
//!
//! | Action          | Category | Succeeds when                          |
//! |-----------------|----------|----------------------------------------|
//! | `Damage`        | Generic  | always                                 |
//! | `Heal`          | Base     | always                                 |
//! | `Attack`        | Base     | the damage lands                       |
//! | `DrawCards`     | Generic  | always                                 |
//! | `DropCardIndex` | Generic  | always (bad indices fail the gate)     |
//! | `ChooseCard`    | Generic  | the answer is valid and meets the rule |
//! | `DropCardStage` | Generic  | always                                 |
//! | `ActionStage`   | Generic  | always                                 |

pub mod attack;
pub mod cards;
pub mod life;
pub mod stages;

pub use attack::Attack;
pub use cards::{CardCondition, ChooseCard, DrawCards, DrawOrigin, DropCardIndex, DropReason};
pub use life::{Damage, Heal};
pub use stages::{ActionStage, DropCardStage};

use crate::core::{Card, PlayerId};
use crate::engine::Action;

/// The action a played card triggers, aimed at `object` and attributed to
/// `source`. Grazes and placeholders trigger nothing.
#[must_use]
pub fn action_for_card(card: Card, source: PlayerId, object: PlayerId) -> Option<Box<dyn Action>> {
    match card {
        Card::Attack => Some(Box::new(Attack::new(object, 1).with_source(source))),
        Card::Heal => Some(Box::new(Heal::new(object, 1).with_source(source))),
        Card::Graze | Card::Hidden => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_for_card() {
        let source = PlayerId::new(0);
        let object = PlayerId::new(1);

        let attack = action_for_card(Card::Attack, source, object).unwrap();
        let attack = attack.downcast_ref::<Attack>().unwrap();
        assert_eq!(attack.target, object);
        assert_eq!(attack.source, Some(source));

        let heal = action_for_card(Card::Heal, source, source).unwrap();
        assert!(heal.is::<Heal>());

        assert!(action_for_card(Card::Graze, source, object).is_none());
        assert!(action_for_card(Card::Hidden, source, object).is_none());
    }
}
