//! Life changes.

use tracing::debug;

use crate::core::{MatchState, PlayerId};
use crate::engine::{Action, ActionCategory, Game};

/// Lose `amount` life.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Damage {
    pub target: PlayerId,
    pub amount: i64,
    /// Who dealt the damage, when a player did.
    pub source: Option<PlayerId>,
    cancelled: bool,
}

impl Damage {
    #[must_use]
    pub fn new(target: PlayerId, amount: i64) -> Self {
        Self {
            target,
            amount,
            source: None,
            cancelled: false,
        }
    }

    /// Attribute the damage to a player (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: PlayerId) -> Self {
        self.source = Some(source);
        self
    }

    fn apply(&mut self, game: &mut Game) -> bool {
        let state = &mut game.state_mut().player_mut(self.target).state;
        state.life -= self.amount;
        debug!(
            target: "actions::life",
            target_player = %self.target,
            amount = self.amount,
            life = state.life,
            "damage dealt"
        );
        true
    }
}

impl Action for Damage {
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

/// Gain `amount` life. Played from a heal card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heal {
    pub target: PlayerId,
    pub amount: i64,
    pub source: Option<PlayerId>,
    cancelled: bool,
}

impl Heal {
    #[must_use]
    pub fn new(target: PlayerId, amount: i64) -> Self {
        Self {
            target,
            amount,
            source: None,
            cancelled: false,
        }
    }

    /// Set who played the heal (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: PlayerId) -> Self {
        self.source = Some(source);
        self
    }

    fn apply(&mut self, game: &mut Game) -> bool {
        game.state_mut().player_mut(self.target).state.life += self.amount;
        true
    }
}

impl Action for Heal {
    fn category(&self) -> ActionCategory {
        ActionCategory::Base
    }

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
