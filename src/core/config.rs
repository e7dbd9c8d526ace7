//! Match configuration.
//!
//! Hosts configure a match at startup: how many seats, starting life, the
//! faces the authoritative side deals from, how many cards a draw stage
//! deals, and the RNG seed. The dispatch engine never hardcodes these.
//!
//! Configuration is plain serde data so it can be loaded from JSON. Missing
//! fields fall back to [`MatchConfig::default`].

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::error::ConfigError;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Life each player starts with.
    pub starting_life: i64,

    /// Faces the authoritative side draws from, uniformly.
    pub draw_pool: Vec<Card>,

    /// Cards dealt by a draw stage.
    pub stage_draw_amount: usize,

    /// Seed for the match RNG.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_life: 4,
            draw_pool: Card::DEALABLE.to_vec(),
            stage_draw_amount: 2,
            seed: 0,
        }
    }
}

impl MatchConfig {
    /// Create a configuration for `player_count` players with defaults.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set starting life.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set how many cards a draw stage deals.
    #[must_use]
    pub fn with_stage_draw_amount(mut self, cards: usize) -> Self {
        self.stage_draw_amount = cards;
        self
    }

    /// Replace the draw pool.
    #[must_use]
    pub fn with_draw_pool(mut self, pool: impl Into<Vec<Card>>) -> Self {
        self.draw_pool = pool.into();
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=255).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.starting_life <= 0 {
            return Err(ConfigError::StartingLife(self.starting_life));
        }
        if self.draw_pool.is_empty() {
            return Err(ConfigError::EmptyDrawPool);
        }
        if self.draw_pool.iter().any(|c| c.is_hidden()) {
            return Err(ConfigError::HiddenInDrawPool);
        }
        Ok(())
    }
}
