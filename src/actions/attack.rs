//! Attacks, the composition pattern every other rule copies.
//!
//! An attack never touches state directly. It asks the target for a graze
//! and then dispatches one of two follow-ups depending on the answer:
//!
//! ```text
//! Attack
//! └── ChooseCard(target, exactly one graze)
//!     ├── fails     -> Damage(target)          Attack returns Damage's result
//!     └── succeeds  -> DropCardIndex(grazes)   Attack returns false
//! ```
//!
//! Every step is a separate dispatch, so handlers see (and may veto,
//! cancel, or replace) each one independently.

use tracing::debug;

use super::cards::{CardCondition, ChooseCard, DropCardIndex};
use super::life::Damage;
use crate::core::{Card, MatchState, PlayerId};
use crate::engine::{Action, ActionCategory, Game};

/// Attack a player for `damage`, unless they graze.
///
/// Returns `true` only if the damage landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attack {
    pub target: PlayerId,
    pub damage: i64,
    /// Who attacked, when a player did.
    pub source: Option<PlayerId>,
    cancelled: bool,
}

impl Attack {
    #[must_use]
    pub fn new(target: PlayerId, damage: i64) -> Self {
        Self {
            target,
            damage,
            source: None,
            cancelled: false,
        }
    }

    /// Set the attacker (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: PlayerId) -> Self {
        self.source = Some(source);
        self
    }

    fn resolve(&mut self, game: &mut Game) -> bool {
        let choice = game.dispatch(Box::new(ChooseCard::new(
            self.target,
            CardCondition::ExactlyOne(Card::Graze),
        )));

        let grazed = choice
            .succeeded()
            .then(|| choice.downcast::<ChooseCard>())
            .flatten()
            .map(|chosen| chosen.card_indices.clone());

        match grazed {
            Some(indices) => {
                debug!(target: "actions::attack", target_player = %self.target, "attack grazed");
                game.process_action(DropCardIndex::new(self.target, indices));
                false
            }
            None => {
                let mut damage = Damage::new(self.target, self.damage);
                damage.source = self.source;
                game.process_action(damage)
            }
        }
    }
}

impl Action for Attack {
    fn category(&self) -> ActionCategory {
        ActionCategory::Base
    }

    fn can_fire(&self, state: &MatchState) -> bool {
        state.is_seated(self.target)
    }

    fn apply_authoritative(&mut self, game: &mut Game) -> bool {
        self.resolve(game)
    }

    fn apply_mirrored(&mut self, game: &mut Game) -> bool {
        self.resolve(game)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn cancel(&mut self, cancel: bool) {
        self.cancelled = cancel;
    }
}
