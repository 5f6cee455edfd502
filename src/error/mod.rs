//! Error types.
//!
//! The core resolves all in-game races silently (stale submissions and
//! racing clears are no-ops), so the only fallible surface is
//! configuration validation at startup.

use thiserror::Error;

/// Rejected configuration, reported before any thread is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The board cannot hold a single triple.
    #[error("board must have at least 3 slots, got {0}")]
    BoardTooSmall(usize),

    /// Slot IDs are a single byte; the board must stay addressable.
    #[error("board size {0} exceeds the maximum of 256 slots")]
    BoardTooLarge(usize),

    /// The deck must be able to fill the board at least once.
    #[error("deck of {deck} cards cannot fill a board of {board} slots")]
    DeckTooSmall { deck: usize, board: usize },

    /// A zero-capacity action queue would deadlock every player.
    #[error("action queue capacity must be at least 1")]
    ZeroQueueCapacity,

    /// A game needs someone to play it.
    #[error("at least one player is required")]
    NoPlayers,

    /// Player IDs are a single byte.
    #[error("at most 256 players supported, got {0}")]
    TooManyPlayers(usize),
}
