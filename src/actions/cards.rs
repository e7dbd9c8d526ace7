//! Moving cards: drawing, choosing, and dropping.
//!
//! These are the actions that touch hidden information. A card's face is
//! known to the authoritative side; the mirrored side holds `Hidden`
//! placeholders until a reveal tells it otherwise. Every action here passes
//! disclosed cards through the observers' `reveal` and records what they
//! saw, so both sides finish with the same public record.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Card, MatchState, PlayerId};
use crate::engine::{Action, Game};
use crate::participant::{parse_card_indices, CardIndices, Prompt};

// =============================================================================
// Drawing
// =============================================================================

/// Why cards are being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawOrigin {
    /// A card or skill effect.
    Effect,
    /// The turn's draw stage.
    Stage,
}

/// Draw `amount` cards into the target's hand.
///
/// The authoritative side deals faces from the match draw pool using the
/// match RNG; the mirrored side draws `Hidden` placeholders. Either way the
/// target's `reveal` decides what actually lands in the hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCards {
    pub target: PlayerId,
    pub amount: usize,
    pub origin: DrawOrigin,
    /// Cards added to the hand, after the target's reveal.
    pub cards: Vec<Card>,
    cancelled: bool,
}

impl DrawCards {
    #[must_use]
    pub fn new(target: PlayerId, amount: usize) -> Self {
        Self {
            target,
            amount,
            origin: DrawOrigin::Effect,
            cards: Vec::new(),
            cancelled: false,
        }
    }

    /// The draw stage of a turn.
    #[must_use]
    pub fn stage(target: PlayerId, amount: usize) -> Self {
        Self {
            origin: DrawOrigin::Stage,
            ..Self::new(target, amount)
        }
    }

    fn receive(&mut self, game: &mut Game, drawn: Vec<Card>) -> bool {
        let player = game.state_mut().player_mut(self.target);
        let cards = player.reveal(drawn);
        player.state.cards.extend(cards.iter().copied());

        debug!(
            target: "actions::cards",
            target_player = %self.target,
            drawn = cards.len(),
            hand = player.state.hand_size(),
            "cards drawn"
        );
        self.cards = cards;
        true
    }
}

impl Action for DrawCards {
    fn name(&self) -> &'static str {
        match self.origin {
            DrawOrigin::Effect => "DrawCards",
            DrawOrigin::Stage => "DrawCardStage",
        }
    }

    fn can_fire(&self, state: &MatchState) -> bool {
        state.is_seated(self.target)
    }

    fn apply_authoritative(&mut self, game: &mut Game) -> bool {
        let dealt = game.state_mut().deal(self.amount);
        self.receive(game, dealt)
    }

    fn apply_mirrored(&mut self, game: &mut Game) -> bool {
        self.receive(game, vec![Card::Hidden; self.amount])
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn cancel(&mut self, cancel: bool) {
        self.cancelled = cancel;
    }
}

// =============================================================================
// Dropping
// =============================================================================

/// Why cards are leaving a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropReason {
    /// Discarded (to an attack's graze, or down to hand limit).
    Discard,
    /// Played from the hand during the action stage.
    Used,
}

/// Remove cards from the target's hand by index and show them to everyone
/// else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropCardIndex {
    pub target: PlayerId,
    pub card_indices: CardIndices,
    pub reason: DropReason,
    /// The dropped cards as the other players saw them, in `card_indices`
    /// order.
    pub cards: Vec<Card>,
    cancelled: bool,
}

impl DropCardIndex {
    #[must_use]
    pub fn new(target: PlayerId, card_indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            target,
            card_indices: card_indices.into_iter().collect(),
            reason: DropReason::Discard,
            cards: Vec::new(),
            cancelled: false,
        }
    }

    /// Drop a card that was just played.
    #[must_use]
    pub fn used(target: PlayerId, card_index: usize) -> Self {
        Self {
            reason: DropReason::Used,
            ..Self::new(target, [card_index])
        }
    }

    fn apply(&mut self, game: &mut Game) -> bool {
        let hand = &mut game.state_mut().player_mut(self.target).state.cards;
        let dropped: Vec<Card> = self.card_indices.iter().map(|&i| hand[i]).collect();

        let mut descending = self.card_indices.clone();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        for index in descending {
            hand.remove(index);
        }

        self.cards = game.state_mut().reveal_to_others(self.target, dropped);
        true
    }
}

impl Action for DropCardIndex {
    fn name(&self) -> &'static str {
        match self.reason {
            DropReason::Discard => "DropCardIndex",
            DropReason::Used => "DropUsedCard",
        }
    }

    /// Every index must name a distinct card currently in hand.
    fn can_fire(&self, state: &MatchState) -> bool {
        if !state.is_seated(self.target) {
            return false;
        }
        let hand_size = state.player_state(self.target).hand_size();
        self.card_indices.iter().enumerate().all(|(pos, &index)| {
            index < hand_size && !self.card_indices[..pos].contains(&index)
        })
    }

    fn apply_authoritative(&mut self, game: &mut Game) -> bool {
        self.apply(game)
    }

    fn apply_mirrored(&mut self, game: &mut Game) -> bool {
        self.apply(game)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn cancel(&mut self, cancel: bool) {
        self.cancelled = cancel;
    }
}

// =============================================================================
// Choosing
// =============================================================================

/// What a chosen set of cards must look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCondition {
    /// A single card with this face.
    ExactlyOne(Card),
    /// Any `n` cards.
    Count(usize),
}

impl CardCondition {
    /// Do `cards` satisfy this condition?
    ///
    /// ```
    /// use ccg_dispatch::actions::CardCondition;
    /// use ccg_dispatch::core::Card;
    ///
    /// let graze = CardCondition::ExactlyOne(Card::Graze);
    /// assert!(graze.is_met(&[Card::Graze]));
    /// assert!(!graze.is_met(&[Card::Graze, Card::Graze]));
    /// assert!(CardCondition::Count(2).is_met(&[Card::Attack, Card::Heal]));
    /// ```
    #[must_use]
    pub fn is_met(&self, cards: &[Card]) -> bool {
        match *self {
            CardCondition::ExactlyOne(face) => matches!(cards, [card] if *card == face),
            CardCondition::Count(n) => cards.len() == n,
        }
    }
}

/// Ask the target to pick cards from their hand.
///
/// Succeeds when the answer parses to in-range indices and the chosen cards,
/// as the other players see them, satisfy the condition. Anything else
/// (no answer, a malformed answer, the wrong cards) is "no choice" and
/// fails. Only a success fills `card_indices`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChooseCard {
    pub target: PlayerId,
    pub condition: CardCondition,
    /// Chosen hand indices, ascending.
    pub card_indices: CardIndices,
    cancelled: bool,
}

impl ChooseCard {
    #[must_use]
    pub fn new(target: PlayerId, condition: CardCondition) -> Self {
        Self {
            target,
            condition,
            card_indices: CardIndices::new(),
            cancelled: false,
        }
    }

    fn apply(&mut self, game: &mut Game) -> bool {
        let hand_size = game.player_state(self.target).hand_size();
        let prompt = Prompt::ChooseCards {
            condition: self.condition,
            hand_size,
        };
        let answer = game.state_mut().player_mut(self.target).user_input(prompt);

        let indices = match parse_card_indices(answer.as_ref(), hand_size) {
            Ok(indices) => indices,
            Err(err) => {
                debug!(target: "actions::cards", target_player = %self.target, %err, "no card chosen");
                return false;
            }
        };

        let hand = &game.player_state(self.target).cards;
        let chosen: Vec<Card> = indices.iter().map(|&i| hand[i]).collect();
        let seen = game.state_mut().reveal_to_others(self.target, chosen);

        if !self.condition.is_met(&seen) {
            debug!(target: "actions::cards", target_player = %self.target, ?seen, "chosen cards rejected");
            return false;
        }

        self.card_indices = indices;
        true
    }
}

impl Action for ChooseCard {
    fn can_fire(&self, state: &MatchState) -> bool {
        state.is_seated(self.target)
    }

    fn apply_authoritative(&mut self, game: &mut Game) -> bool {
        self.apply(game)
    }

    fn apply_mirrored(&mut self, game: &mut Game) -> bool {
        self.apply(game)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn cancel(&mut self, cancel: bool) {
        self.cancelled = cancel;
    }
}
