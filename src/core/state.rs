//! Match state: seated players, shared tags, and the match RNG.
//!
//! ## MatchState
//!
//! Everything actions mutate during a match. Handlers only ever see it
//! through a shared reference.
//!
//! ## StateSnapshot
//!
//! A serializable copy of the observable parts of `MatchState` (player
//! states, tags, RNG position). Two sides that processed the same actions
//! produce identical snapshots for public information, which makes the
//! encoded form a convenient desync fingerprint.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::config::MatchConfig;
use super::error::SnapshotError;
use super::player::{Player, PlayerId, PlayerMap, PlayerState};
use super::rng::{GameRng, GameRngState};

/// Mutable state of one match.
///
/// ## Tags
///
/// `tags` use `FxHashMap<String, i64>` for ruleset-shared flags and
/// counters (e.g. "attacks_this_turn"). Store non-integer values as
/// integers: booleans as 0/1, players as their index.
#[derive(Debug)]
pub struct MatchState {
    players: PlayerMap<Player>,

    /// Ruleset-shared tags.
    pub tags: FxHashMap<String, i64>,

    rng: GameRng,

    draw_pool: Vec<Card>,

    stage_draw_amount: usize,
}

impl MatchState {
    /// Create match state for already-seated players.
    ///
    /// Panics if the draw pool is empty. `Game::from_config` validates the
    /// whole config first and reports this as `ConfigError::EmptyDrawPool`.
    pub fn new(players: PlayerMap<Player>, config: &MatchConfig) -> Self {
        assert!(!config.draw_pool.is_empty(), "Draw pool must not be empty");

        Self {
            players,
            tags: FxHashMap::default(),
            rng: GameRng::new(config.seed),
            draw_pool: config.draw_pool.clone(),
            stage_draw_amount: config.stage_draw_amount,
        }
    }

    /// Replace the RNG (builder pattern), for injecting a known sequence.
    #[must_use]
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Is `player` seated in this match?
    #[must_use]
    pub fn is_seated(&self, player: PlayerId) -> bool {
        self.players.contains(player)
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids()
    }

    /// Get a seated player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    /// Get a seated player mutably.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// Shorthand for a player's ruleset state.
    #[must_use]
    pub fn player_state(&self, player: PlayerId) -> &PlayerState {
        &self.players[player].state
    }

    /// Pass `cards` through every player except `owner`, in seat order.
    ///
    /// Each observer may redact or substitute what it is shown; the output
    /// of one observer is the input of the next.
    pub fn reveal_to_others(&mut self, owner: PlayerId, cards: Vec<Card>) -> Vec<Card> {
        self.players
            .others_mut(owner)
            .fold(cards, |cards, (_, observer)| observer.reveal(cards))
    }

    // === Tags ===

    /// Get a tag value with default.
    #[must_use]
    pub fn tag(&self, key: &str, default: i64) -> i64 {
        self.tags.get(key).copied().unwrap_or(default)
    }

    /// Set a tag value.
    pub fn set_tag(&mut self, key: impl Into<String>, value: i64) {
        self.tags.insert(key.into(), value);
    }

    /// Modify a tag value by delta.
    pub fn modify_tag(&mut self, key: &str, delta: i64) {
        let current = self.tag(key, 0);
        self.tags.insert(key.to_string(), current + delta);
    }

    // === Hidden information ===

    /// The match RNG. Only the authoritative side should draw from it.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Faces the authoritative side deals from.
    #[must_use]
    pub fn draw_pool(&self) -> &[Card] {
        &self.draw_pool
    }

    /// Cards dealt by a draw stage.
    #[must_use]
    pub fn stage_draw_amount(&self) -> usize {
        self.stage_draw_amount
    }

    /// Deal `amount` faces uniformly from the draw pool.
    ///
    /// Only the authoritative side should call this.
    pub fn deal(&mut self, amount: usize) -> Vec<Card> {
        let Self { rng, draw_pool, .. } = self;
        (0..amount)
            .filter_map(|_| rng.choose(draw_pool).copied())
            .collect()
    }

    // === Snapshots ===

    /// Capture a serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        let mut tags: Vec<(String, i64)> =
            self.tags.iter().map(|(k, v)| (k.clone(), *v)).collect();
        tags.sort();

        StateSnapshot {
            players: self.players.iter().map(|(_, p)| p.state.clone()).collect(),
            tags,
            rng: self.rng.state(),
        }
    }

    /// Overwrite player states, tags, and RNG position from a snapshot.
    ///
    /// Participants stay seated. Panics if the snapshot was taken from a
    /// match with a different player count.
    pub fn restore(&mut self, snapshot: &StateSnapshot) {
        assert_eq!(
            snapshot.players.len(),
            self.player_count(),
            "Snapshot player count does not match seated players"
        );

        for ((_, player), state) in self.players.iter_mut().zip(&snapshot.players) {
            player.state = state.clone();
        }
        self.tags = snapshot.tags.iter().cloned().collect();
        self.rng = GameRng::from_state(&snapshot.rng);
    }
}

/// Serializable copy of match state.
///
/// Tags are stored sorted so equal states encode to equal bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Player states in seat order.
    pub players: Vec<PlayerState>,
    /// Tags sorted by key.
    pub tags: Vec<(String, i64)>,
    /// RNG position.
    pub rng: GameRngState,
}

impl StateSnapshot {
    /// Encode with bincode.
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Decode from bincode.
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}
