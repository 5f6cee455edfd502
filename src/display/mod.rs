//! Display capability boundary.
//!
//! The core never renders anything. It reports every observable event
//! through [`DisplaySink`] and moves on; implementations draw a UI, drive
//! a terminal, or ignore the calls entirely. All methods are
//! fire-and-forget with default no-op bodies, so test doubles implement
//! only what they record.

use std::time::Duration;

use crate::core::{CardId, PlayerId, SlotId};

/// Fire-and-forget sink for everything worth showing.
///
/// Implementations must be cheap and non-blocking from the core's point
/// of view; a sink that needs to do slow work should hand the event off
/// to its own thread.
pub trait DisplaySink: Send + Sync {
    /// A card was placed on a slot.
    fn card_placed(&self, _card: CardId, _slot: SlotId) {}

    /// A slot's card was removed.
    fn card_removed(&self, _slot: SlotId) {}

    /// A player put a marker on a slot.
    fn marker_placed(&self, _player: PlayerId, _slot: SlotId) {}

    /// A player's marker left a slot (toggled off or force-cleared).
    fn marker_removed(&self, _player: PlayerId, _slot: SlotId) {}

    /// Round countdown refresh. `warn` is set near expiry.
    fn countdown(&self, _remaining: Duration, _warn: bool) {}

    /// A player's score changed.
    fn score(&self, _player: PlayerId, _score: u32) {}

    /// Freeze countdown refresh; zero remaining means the freeze ended.
    fn freeze(&self, _player: PlayerId, _remaining: Duration) {}

    /// Final announcement. Every player with the maximal score is listed.
    fn winners(&self, _players: &[PlayerId]) {}
}

/// Sink that ignores every event. Useful for tests and headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {}

/// Sink that routes events to the `log` crate at debug level
/// (winners at info). A stand-in until a real frontend is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn card_placed(&self, card: CardId, slot: SlotId) {
        log::debug!("{card} placed on {slot}");
    }

    fn card_removed(&self, slot: SlotId) {
        log::debug!("card removed from {slot}");
    }

    fn marker_placed(&self, player: PlayerId, slot: SlotId) {
        log::debug!("{player} marked {slot}");
    }

    fn marker_removed(&self, player: PlayerId, slot: SlotId) {
        log::debug!("{player} unmarked {slot}");
    }

    fn countdown(&self, remaining: Duration, warn: bool) {
        log::trace!("countdown {}ms warn={warn}", remaining.as_millis());
    }

    fn score(&self, player: PlayerId, score: u32) {
        log::debug!("{player} score {score}");
    }

    fn freeze(&self, player: PlayerId, remaining: Duration) {
        log::trace!("{player} frozen for {}ms", remaining.as_millis());
    }

    fn winners(&self, players: &[PlayerId]) {
        log::info!("winners: {players:?}");
    }
}
