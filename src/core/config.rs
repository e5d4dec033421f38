//! Game configuration.
//!
//! `GameConfig` carries every knob a game is set up with: seat count, round
//! limit, victory threshold, the bank's starting supply, the exposure size,
//! and the seed for deck shuffling. It is a plain serde struct so front ends
//! can keep it in whatever format they like; the engine never reads files.

use serde::{Deserialize, Serialize};

use crate::core::tokens::TokenPool;
use crate::error::{EngineError, EngineResult};

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table.
pub const MAX_PLAYERS: usize = 4;

/// Complete game configuration.
///
/// ```
/// use splendor_engine::core::GameConfig;
///
/// let config = GameConfig::new(3)
///     .with_victory_threshold(15)
///     .with_round_limit(40)
///     .with_standard_supply();
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.initial_bank().gold(), 5);
/// assert_eq!(config.patron_slots(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of participants (2-4).
    pub player_count: usize,

    /// The game ends once more than this many rounds have completed.
    pub round_limit: u32,

    /// Score that triggers the final round.
    pub victory_threshold: u32,

    /// Bank tokens per color at setup.
    pub color_supply: u8,

    /// Bank gold at setup.
    pub wildcard_supply: u8,

    /// Face-up cards per tier.
    pub exposed_per_tier: usize,

    /// Seed for deck shuffling.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            round_limit: 50,
            victory_threshold: 15,
            color_supply: 7,
            wildcard_supply: 5,
            exposed_per_tier: 4,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Defaults for the given seat count.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_round_limit(mut self, rounds: u32) -> Self {
        self.round_limit = rounds;
        self
    }

    #[must_use]
    pub fn with_victory_threshold(mut self, points: u32) -> Self {
        self.victory_threshold = points;
        self
    }

    #[must_use]
    pub fn with_supply(mut self, per_color: u8, wildcard: u8) -> Self {
        self.color_supply = per_color;
        self.wildcard_supply = wildcard;
        self
    }

    /// Tabletop supply scaling: 4 per color for two participants, 5 for
    /// three, 7 for four. Gold stays at 5.
    #[must_use]
    pub fn with_standard_supply(mut self) -> Self {
        self.color_supply = match self.player_count {
            2 => 4,
            3 => 5,
            _ => 7,
        };
        self.wildcard_supply = 5;
        self
    }

    #[must_use]
    pub fn with_exposed_per_tier(mut self, count: usize) -> Self {
        self.exposed_per_tier = count;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Bank contents at setup.
    #[must_use]
    pub fn initial_bank(&self) -> TokenPool {
        TokenPool::uniform(self.color_supply, self.wildcard_supply)
    }

    /// Number of patron exposure slots.
    #[must_use]
    pub fn patron_slots(&self) -> usize {
        self.player_count + 1
    }

    /// Reject configurations that cannot produce a playable board.
    pub fn validate(&self) -> EngineResult<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "player count {} outside {MIN_PLAYERS}..={MAX_PLAYERS}",
                self.player_count
            )));
        }
        if self.color_supply == 0 {
            return Err(EngineError::InvalidConfig(
                "bank must start with at least one token per color".to_string(),
            ));
        }
        if self.exposed_per_tier == 0 {
            return Err(EngineError::InvalidConfig(
                "at least one card per tier must be exposed".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.victory_threshold, 15);
        assert_eq!(config.initial_bank(), TokenPool::uniform(7, 5));
        assert_eq!(config.exposed_per_tier, 4);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::new(4)
            .with_round_limit(10)
            .with_victory_threshold(9)
            .with_supply(6, 3)
            .with_seed(7);

        assert_eq!(config.player_count, 4);
        assert_eq!(config.round_limit, 10);
        assert_eq!(config.victory_threshold, 9);
        assert_eq!(config.initial_bank(), TokenPool::uniform(6, 3));
        assert_eq!(config.seed, 7);
        assert_eq!(config.patron_slots(), 5);
    }

    #[test]
    fn test_standard_supply_scaling() {
        let supplies: Vec<_> = [2, 3, 4]
            .iter()
            .map(|&n| GameConfig::new(n).with_standard_supply().color_supply)
            .collect();
        assert_eq!(supplies, vec![4, 5, 7]);
    }

    #[test]
    fn test_validate_player_count() {
        assert!(GameConfig::new(1).validate().is_err());
        assert!(GameConfig::new(5).validate().is_err());
        for n in MIN_PLAYERS..=MAX_PLAYERS {
            assert!(GameConfig::new(n).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_supply() {
        let err = GameConfig::new(2).with_supply(0, 5).validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
        assert!(GameConfig::new(2).with_exposed_per_tier(0).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new(3).with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
