//! Cards held in hand.
//!
//! The authoritative side knows every card. The mirrored side sees cards
//! drawn by other players as [`Card::Hidden`] until a reveal substitutes the
//! real face.

use serde::{Deserialize, Serialize};

/// A card face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Card {
    /// Attack a player.
    Attack,
    /// Dodge an incoming attack.
    Graze,
    /// Restore life.
    Heal,
    /// Opaque placeholder for a card this side may not see.
    Hidden,
}

impl Card {
    /// Every face that can be dealt.
    pub const DEALABLE: [Card; 3] = [Card::Attack, Card::Graze, Card::Heal];

    /// Is this the opaque placeholder?
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Card::Hidden)
    }

    /// Lowercase name used in logs and prompts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Card::Attack => "attack",
            Card::Graze => "graze",
            Card::Heal => "heal",
            Card::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
