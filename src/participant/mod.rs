//! The boundary between the engine and whoever sits in a seat.
//!
//! A [`Participant`] is the only thing an action consults outside of match
//! state. It answers two kinds of calls, both synchronous:
//!
//! - [`Participant::reveal`]: cards are being disclosed to this seat. The
//!   participant returns what it actually sees, which lets a mirrored client
//!   swap `Hidden` placeholders for faces received from the server, or lets
//!   a server redact what it forwards.
//! - [`Participant::user_input`]: the seat must make a choice. The answer is
//!   raw JSON; actions parse it with the functions in [`input`] and treat
//!   anything malformed as "no choice".
//!
//! [`Scripted`] answers from a queue and is what hot-seat hosts, replays and
//! tests use.

pub mod input;
pub mod scripted;

pub use input::{parse_card_indices, parse_use_card, CardIndices, CardUse, InputError};
pub use scripted::Scripted;

use crate::actions::CardCondition;
use crate::core::Card;

/// A choice an action is asking a seat to make.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// Pick card indices from your hand that satisfy `condition`.
    ///
    /// Expected answer: a JSON list of integers, e.g. `[0, 2]`.
    ChooseCards {
        condition: CardCondition,
        hand_size: usize,
    },
    /// Play a card from your hand at a player, or answer nothing to stop.
    ///
    /// Expected answer: `[card_index, player_index]`.
    UseCard {
        hand_size: usize,
        player_count: usize,
    },
}

impl Prompt {
    /// Stable name, suitable for a wire protocol.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Prompt::ChooseCards { .. } => "choose_card",
            Prompt::UseCard { .. } => "action_stage_usecard",
        }
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

/// Whoever sits in a seat: a local player, a network peer, a bot, a script.
pub trait Participant {
    /// Cards are being disclosed to this seat; return what it sees.
    ///
    /// The default shows the cards unchanged.
    fn reveal(&mut self, cards: Vec<Card>) -> Vec<Card> {
        cards
    }

    /// Block until this seat answers `prompt`. `None` means no answer.
    fn user_input(&mut self, prompt: Prompt) -> Option<serde_json::Value>;
}
