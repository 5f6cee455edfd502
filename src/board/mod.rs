//! The shared board: a fixed grid of slots holding cards and markers.
//!
//! ## Ownership
//!
//! The card ↔ slot mapping is written only by the referee. Marker sets
//! are written by the owning player for placement/toggle and by the
//! referee when it empties a slot. The board itself enforces neither
//! schedule; it only guarantees per-slot linearizability.
//!
//! ## Locking
//!
//! One mutex per slot. Operations on different slots never contend, and
//! no operation takes two slot locks, so the board cannot deadlock. The
//! card → slot reverse index has its own lock and is always updated
//! while the corresponding slot lock is held, keeping both directions of
//! the mapping in agreement:
//!
//! `card_at(s) == Some(c)  ⇔  slot_of(c) == Some(s)`

use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{CardId, PlayerId, SlotId};
use crate::display::DisplaySink;

/// Contents of a single slot.
#[derive(Debug, Default)]
struct SlotState {
    card: Option<CardId>,
    markers: SmallVec<[PlayerId; 4]>,
}

/// Shared grid of card slots with per-slot locking.
///
/// All methods take `&self`; the board is meant to live in an [`Arc`]
/// shared by the referee and every player thread.
pub struct Board {
    slots: Vec<Mutex<SlotState>>,
    /// Reverse index, card → slot. Written under the slot's lock.
    index: RwLock<FxHashMap<CardId, SlotId>>,
    display: Arc<dyn DisplaySink>,
    placement_delay: Duration,
}

impl Board {
    /// Create an empty board with `board_size` slots.
    ///
    /// `placement_delay` paces card placement/removal for the display
    /// collaborator; pass zero to disable.
    pub fn new(
        board_size: usize,
        display: Arc<dyn DisplaySink>,
        placement_delay: Duration,
    ) -> Self {
        Self {
            slots: (0..board_size).map(|_| Mutex::default()).collect(),
            index: RwLock::new(FxHashMap::default()),
            display,
            placement_delay,
        }
    }

    /// Number of slots on the board.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    fn guard(&self, slot: SlotId) -> MutexGuard<'_, SlotState> {
        // A panic while holding a slot lock leaves the game unwinding
        // anyway; recover the guard rather than poisoning every reader.
        self.slots[slot.index()]
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn pace(&self) {
        if !self.placement_delay.is_zero() {
            std::thread::sleep(self.placement_delay);
        }
    }

    /// Place `card` on `slot`.
    ///
    /// Returns `false` without effect if the slot is occupied or the card
    /// is already on the board. On success both mapping directions are
    /// updated before the display is notified, so a marker placed after
    /// this call observes the card.
    pub fn place_card(&self, card: CardId, slot: SlotId) -> bool {
        self.pace();
        let mut state = self.guard(slot);
        if state.card.is_some() {
            return false;
        }
        {
            let mut index = self.index.write().unwrap_or_else(|e| e.into_inner());
            if index.contains_key(&card) {
                return false;
            }
            index.insert(card, slot);
        }
        state.card = Some(card);
        self.display.card_placed(card, slot);
        true
    }

    /// Remove the card on `slot`, clearing every marker there.
    ///
    /// No-op returning `None` if the slot is already empty. Markers of
    /// *all* players are cleared: another player's in-progress selection
    /// may coincidentally sit on this slot.
    pub fn remove_card(&self, slot: SlotId) -> Option<CardId> {
        self.pace();
        let mut state = self.guard(slot);
        let card = state.card.take()?;
        self.index
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&card);
        for player in state.markers.drain(..) {
            self.display.marker_removed(player, slot);
        }
        self.display.card_removed(slot);
        Some(card)
    }

    /// Place `player`'s marker on `slot`.
    ///
    /// Succeeds only if the slot holds a card and the player has no
    /// marker there yet; otherwise a silent no-op returning `false`.
    pub fn place_marker(&self, player: PlayerId, slot: SlotId) -> bool {
        let mut state = self.guard(slot);
        if state.card.is_none() || state.markers.contains(&player) {
            return false;
        }
        state.markers.push(player);
        self.display.marker_placed(player, slot);
        true
    }

    /// Remove `player`'s marker from `slot`, if present.
    ///
    /// Returns whether a marker was removed; removing an absent marker
    /// has no side effects.
    pub fn remove_marker(&self, player: PlayerId, slot: SlotId) -> bool {
        let mut state = self.guard(slot);
        match state.markers.iter().position(|&p| p == player) {
            Some(at) => {
                state.markers.remove(at);
                self.display.marker_removed(player, slot);
                true
            }
            None => false,
        }
    }

    /// Ground-truth membership test for `player`'s marker on `slot`.
    ///
    /// Players reconcile their local selection against this: the referee
    /// may have cleared the slot since the marker was placed.
    #[must_use]
    pub fn has_marker(&self, player: PlayerId, slot: SlotId) -> bool {
        self.guard(slot).markers.contains(&player)
    }

    /// The card currently on `slot`, if any.
    #[must_use]
    pub fn card_at(&self, slot: SlotId) -> Option<CardId> {
        self.guard(slot).card
    }

    /// The slot currently holding `card`, if it is on the board.
    #[must_use]
    pub fn slot_of(&self, card: CardId) -> Option<SlotId> {
        self.index
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&card)
            .copied()
    }

    /// All cards currently on the board, in no particular order.
    #[must_use]
    pub fn cards_on_board(&self) -> Vec<CardId> {
        self.index
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .copied()
            .collect()
    }

    /// All slots currently holding a card.
    #[must_use]
    pub fn occupied_slots(&self) -> Vec<SlotId> {
        self.index
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .copied()
            .collect()
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.index.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// All slots currently empty, in slot order. Referee-side dealing.
    #[must_use]
    pub fn empty_slots(&self) -> Vec<SlotId> {
        SlotId::all(self.size())
            .filter(|&slot| self.guard(slot).card.is_none())
            .collect()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size())
            .field("occupied", &self.occupied_count())
            .finish()
    }
}
