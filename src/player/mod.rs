//! Player-side machinery: selection, seat state, input sources, and the
//! agent thread.
//!
//! - [`Selection`]: the up-to-3 marked slots a player is building.
//! - [`Seat`]: the shared slice of a player the referee also touches
//!   (score, freeze phase, forced selection clears).
//! - [`ActionSource`] / [`HumanInput`] / [`GeneratedInput`]: where slot
//!   choices come from.
//! - [`PlayerAgent`]: the per-player thread tying it together.

pub mod agent;
pub mod input;
pub mod seat;
pub mod selection;

pub use agent::PlayerAgent;
pub use input::{ActionSource, GeneratedInput, HumanInput, InputHandle};
pub use seat::{ActionOutcome, PlayerPhase, Seat};
pub use selection::{Selection, SELECTION_CAPACITY};
