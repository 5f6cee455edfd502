//! # triad
//!
//! Concurrency core for a turn-based pattern-matching card game: many
//! player threads race to mark triples of cards on a shared board, one
//! referee thread judges them.
//!
//! ## Design Principles
//!
//! 1. **Single-writer ownership**: the card ↔ slot mapping and the deck
//!    belong to the referee; each selection belongs to its player, with
//!    the referee's forced clears as the one synchronized exception.
//!
//! 2. **Per-slot locking**: the board has no global lock. Operations on
//!    different slots run in parallel, and nothing ever holds two slot
//!    locks, so the board cannot deadlock.
//!
//! 3. **One-shot rendezvous**: a player that submits a triple blocks on
//!    a single-use resume signal owned by its submission. The referee
//!    fires it exactly once, after all board mutation; duplicate or
//!    lost wakeups are unrepresentable.
//!
//! 4. **Capabilities at the edges**: rendering ([`display::DisplaySink`])
//!    and match arithmetic ([`validate::MatchValidator`]) are traits the
//!    host implements; the core never renders and never inspects card
//!    values.
//!
//! ## Modules
//!
//! - `core`: identifiers, configuration, RNG, cancellation
//! - `board`: the shared slot grid with per-slot locks
//! - `validate`: match validation capability
//! - `display`: display capability
//! - `submit`: submission channel and resume rendezvous
//! - `player`: selection, seat, input sources, agent thread
//! - `referee`: round lifecycle and judging
//! - `game`: assembly, thread spawning and joining
//! - `error`: startup validation errors

pub mod board;
pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod player;
pub mod referee;
pub mod submit;
pub mod validate;

// Re-export commonly used types
pub use crate::core::{CardId, GameConfig, GameRng, PlayerId, SlotId, StopFlag};

pub use crate::board::Board;
pub use crate::display::{DisplaySink, LogDisplay, NullDisplay};
pub use crate::error::ConfigError;
pub use crate::game::{Game, PlayerKind};
pub use crate::player::{
    ActionSource, GeneratedInput, HumanInput, InputHandle, PlayerAgent, Seat, Selection,
};
pub use crate::referee::Referee;
pub use crate::submit::{ResumeWaiter, Submission, SubmissionChannel};
pub use crate::validate::MatchValidator;
