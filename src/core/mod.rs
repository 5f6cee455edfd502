//! Core types: identifiers, configuration, RNG, cancellation.
//!
//! These are the game-agnostic building blocks every other module
//! depends on.

pub mod config;
pub mod ids;
pub mod rng;
pub mod stop;

pub use config::GameConfig;
pub use ids::{CardId, PlayerId, SlotId};
pub use rng::GameRng;
pub use stop::StopFlag;
