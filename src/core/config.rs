//! Game configuration.
//!
//! All values are fixed at startup and read-only afterwards. The
//! surrounding process decides where they come from (file, CLI, ...);
//! the core only validates and consumes them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a single game.
///
/// Construct with [`GameConfig::default`] and adjust via the `with_*`
/// builders, or deserialize from any serde format.
///
/// ```
/// use std::time::Duration;
/// use triad::core::GameConfig;
///
/// let config = GameConfig::default()
///     .with_turn_duration(Duration::from_secs(30))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of slots on the board.
    pub board_size: usize,

    /// Number of cards in the deck at game start.
    pub deck_size: usize,

    /// Capacity of each player's pending-action queue.
    ///
    /// Matches the marker limit: a player can never usefully queue more
    /// actions than markers they may hold.
    pub action_queue_capacity: usize,

    /// Length of one round before the board is reshuffled.
    pub turn_duration: Duration,

    /// Remaining time below which the countdown enters warning mode and
    /// is refreshed at a fine granularity.
    pub warning_threshold: Duration,

    /// How long a player is frozen after scoring a point.
    pub point_freeze: Duration,

    /// How long a player is frozen after a failed submission.
    pub penalty_freeze: Duration,

    /// Artificial delay applied to each card placement/removal, so the
    /// display collaborator can pace its animation. Zero disables it.
    pub placement_delay: Duration,

    /// Seed for all randomness (dealing and synthetic input).
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 12,
            deck_size: 81,
            action_queue_capacity: 3,
            turn_duration: Duration::from_secs(60),
            warning_threshold: Duration::from_secs(5),
            point_freeze: Duration::from_secs(1),
            penalty_freeze: Duration::from_secs(3),
            placement_delay: Duration::from_millis(100),
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Set the board size.
    #[must_use]
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Set the deck size.
    #[must_use]
    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.deck_size = deck_size;
        self
    }

    /// Set the turn duration.
    #[must_use]
    pub fn with_turn_duration(mut self, turn_duration: Duration) -> Self {
        self.turn_duration = turn_duration;
        self
    }

    /// Set the countdown warning threshold.
    #[must_use]
    pub fn with_warning_threshold(mut self, warning_threshold: Duration) -> Self {
        self.warning_threshold = warning_threshold;
        self
    }

    /// Set both freeze durations.
    #[must_use]
    pub fn with_freezes(mut self, point: Duration, penalty: Duration) -> Self {
        self.point_freeze = point;
        self.penalty_freeze = penalty;
        self
    }

    /// Set the per-operation placement delay.
    #[must_use]
    pub fn with_placement_delay(mut self, placement_delay: Duration) -> Self {
        self.placement_delay = placement_delay;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check startup constraints.
    ///
    /// A board needs room for at least one triple, the deck must be able
    /// to cover the board, and slot IDs must stay addressable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 3 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        if self.board_size > u8::MAX as usize + 1 {
            return Err(ConfigError::BoardTooLarge(self.board_size));
        }
        if self.deck_size < self.board_size {
            return Err(ConfigError::DeckTooSmall {
                deck: self.deck_size,
                board: self.board_size,
            });
        }
        if self.action_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_board() {
        let config = GameConfig::default().with_board_size(2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardTooSmall(2))
        ));
    }

    #[test]
    fn test_rejects_oversized_board() {
        let config = GameConfig::default()
            .with_board_size(300)
            .with_deck_size(400);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardTooLarge(300))
        ));
    }

    #[test]
    fn test_rejects_deck_smaller_than_board() {
        let config = GameConfig::default().with_board_size(12).with_deck_size(6);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DeckTooSmall { deck: 6, board: 12 })
        ));
    }

    #[test]
    fn test_rejects_zero_queue_capacity() {
        let mut config = GameConfig::default();
        config.action_queue_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroQueueCapacity)
        ));
    }

    #[test]
    fn test_round_trips_through_serde() {
        let config = GameConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 99);
        assert_eq!(back.board_size, config.board_size);
        assert_eq!(back.turn_duration, config.turn_duration);
    }
}
