//! Turn stages.
//!
//! Stages are actions too: a host drives a turn by dispatching a draw
//! stage, an action stage, and a drop stage for the current player, and
//! handlers can intercept a whole stage the same way they intercept a card.

use tracing::debug;

use super::action_for_card;
use super::cards::{CardCondition, ChooseCard, DropCardIndex};
use crate::core::{Card, MatchState, PlayerId};
use crate::engine::{Action, Game};
use crate::participant::{parse_use_card, CardIndices, Prompt};

/// Discard down to hand limit (current life, never below zero).
///
/// The target picks which cards to discard. If they do not pick exactly the
/// right number, the excess is taken from the front of the hand. Always
/// succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropCardStage {
    pub target: PlayerId,
    /// Cards discarded, as the other players saw them.
    pub dropped: Vec<Card>,
    cancelled: bool,
}

impl DropCardStage {
    #[must_use]
    pub fn new(target: PlayerId) -> Self {
        Self {
            target,
            dropped: Vec::new(),
            cancelled: false,
        }
    }

    fn run(&mut self, game: &mut Game) -> bool {
        let state = game.player_state(self.target);
        // At or below zero life the limit is zero: the whole hand goes.
        let limit = usize::try_from(state.life).unwrap_or(0);
        let excess = state.hand_size().saturating_sub(limit);
        if excess == 0 {
            return true;
        }

        let choice = game.dispatch(Box::new(ChooseCard::new(self.target, CardCondition::Count(excess))));
        let indices: CardIndices = choice
            .succeeded()
            .then(|| choice.downcast::<ChooseCard>())
            .flatten()
            .map_or_else(|| (0..excess).collect(), |chosen| chosen.card_indices.clone());

        let discarded = game.dispatch(Box::new(DropCardIndex::new(self.target, indices)));
        if discarded.succeeded() {
            if let Some(drop) = discarded.downcast::<DropCardIndex>() {
                self.dropped = drop.cards.clone();
            }
        }
        true
    }
}

impl Action for DropCardStage {
    fn can_fire(&self, state: &MatchState) -> bool {
        state.is_seated(self.target)
    }

    fn apply_authoritative(&mut self, game: &mut Game) -> bool {
        self.run(game)
    }

    fn apply_mirrored(&mut self, game: &mut Game) -> bool {
        self.run(game)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn cancel(&mut self, cancel: bool) {
        self.cancelled = cancel;
    }
}

/// Let the target play cards until they stop.
///
/// Each round asks for `[card_index, player_index]`. The card is shown to
/// the other players, dropped as used, and its associated action (if any)
/// is dispatched at the chosen player with the target as source. A missing
/// or malformed answer ends the stage. Always succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionStage {
    pub target: PlayerId,
    /// Cards played, as the other players saw them.
    pub played: Vec<Card>,
    cancelled: bool,
}

impl ActionStage {
    #[must_use]
    pub fn new(target: PlayerId) -> Self {
        Self {
            target,
            played: Vec::new(),
            cancelled: false,
        }
    }

    fn run(&mut self, game: &mut Game) -> bool {
        loop {
            let hand_size = game.player_state(self.target).hand_size();
            let player_count = game.state().player_count();
            let prompt = Prompt::UseCard {
                hand_size,
                player_count,
            };
            let answer = game.state_mut().player_mut(self.target).user_input(prompt);

            let play = match parse_use_card(answer.as_ref(), hand_size, player_count) {
                Ok(play) => play,
                Err(err) => {
                    debug!(
                        target: "actions::stages",
                        target_player = %self.target,
                        played = self.played.len(),
                        reason = %err,
                        "action stage ended"
                    );
                    break;
                }
            };

            let held = game.player_state(self.target).cards[play.card_index];
            let card = game
                .state_mut()
                .reveal_to_others(self.target, vec![held])
                .into_iter()
                .next()
                .unwrap_or(held);

            game.process_action(DropCardIndex::used(self.target, play.card_index));
            if let Some(action) = action_for_card(card, self.target, play.object) {
                game.dispatch(action);
            }
            self.played.push(card);
        }
        true
    }
}

impl Action for ActionStage {
    fn can_fire(&self, state: &MatchState) -> bool {
        state.is_seated(self.target)
    }

    fn apply_authoritative(&mut self, game: &mut Game) -> bool {
        self.run(game)
    }

    fn apply_mirrored(&mut self, game: &mut Game) -> bool {
        self.run(game)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn cancel(&mut self, cancel: bool) {
        self.cancelled = cancel;
    }
}
