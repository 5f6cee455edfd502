//! The referee-visible slice of a player: score, freeze state, and the
//! shared selection.
//!
//! A [`Seat`] is the one structure with two writers. The owning agent
//! applies actions through it; the referee awards points, starts
//! freezes, and force-clears selection entries for slots it empties.
//! Everything is internally synchronized, and clears are idempotent, so
//! redundant reconciliation is harmless.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::core::{PlayerId, SlotId};
use crate::player::selection::{Selection, SELECTION_CAPACITY};

/// Freeze state machine.
///
/// A single enum rather than two booleans: "point-frozen and
/// penalty-frozen at once" is not representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPhase {
    /// Acting normally.
    Active,
    /// Frozen after scoring, until the deadline.
    PointFrozen { until: Instant },
    /// Frozen after a failed submission, until the deadline.
    PenaltyFrozen { until: Instant },
}

/// What applying one action did. See [`Seat::apply_action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The slot was already selected; the marker was toggled off.
    ToggledOff,
    /// A marker was placed; the selection is not yet complete.
    Placed,
    /// The third marker was placed; the selection is ready to submit.
    Completed([SlotId; 3]),
    /// Nothing happened (empty slot, or selection already full).
    Ignored,
}

/// Per-player shared state.
#[derive(Debug)]
pub struct Seat {
    id: PlayerId,
    selection: Mutex<Selection>,
    phase: Mutex<PlayerPhase>,
    score: AtomicU32,
}

impl Seat {
    /// Create an active seat with zero score.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            selection: Mutex::new(Selection::new()),
            phase: Mutex::new(PlayerPhase::Active),
            score: AtomicU32::new(0),
        }
    }

    /// The seated player.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Current score. Monotonically non-decreasing.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.load(Ordering::SeqCst)
    }

    /// Add one point. Referee only. Returns the new total.
    pub fn award_point(&self) -> u32 {
        self.score.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn selection_guard(&self) -> std::sync::MutexGuard<'_, Selection> {
        self.selection.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn phase_guard(&self) -> std::sync::MutexGuard<'_, PlayerPhase> {
        self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a point freeze ending `duration` from now. Referee only,
    /// called before the player's resume signal fires.
    pub fn begin_point_freeze(&self, duration: Duration) {
        *self.phase_guard() = PlayerPhase::PointFrozen {
            until: Instant::now() + duration,
        };
    }

    /// Start a penalty freeze ending `duration` from now. Referee only.
    pub fn begin_penalty_freeze(&self, duration: Duration) {
        *self.phase_guard() = PlayerPhase::PenaltyFrozen {
            until: Instant::now() + duration,
        };
    }

    /// Whether a freeze is in effect.
    ///
    /// Stays `true` past the deadline until the owning agent observes
    /// the expiry and calls [`end_freeze`](Self::end_freeze); the agent
    /// is the only thread that leaves the frozen state.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        *self.phase_guard() != PlayerPhase::Active
    }

    /// Time left on the current freeze.
    ///
    /// `None` when active; `Some(Duration::ZERO)` once the deadline has
    /// passed but the freeze has not been ended yet.
    #[must_use]
    pub fn freeze_remaining(&self) -> Option<Duration> {
        match *self.phase_guard() {
            PlayerPhase::Active => None,
            PlayerPhase::PointFrozen { until } | PlayerPhase::PenaltyFrozen { until } => {
                Some(until.saturating_duration_since(Instant::now()))
            }
        }
    }

    /// Return to the active phase. Owning agent only.
    pub fn end_freeze(&self) {
        *self.phase_guard() = PlayerPhase::Active;
    }

    /// Apply one selected slot on behalf of the owning agent.
    ///
    /// The selection lock is held across the board mutation, so a
    /// concurrent forced clear by the referee either happens entirely
    /// before this action (the slot is empty, the action is ignored) or
    /// entirely after it (the new entry is cleared eagerly). A selection
    /// can therefore never complete with a dead entry.
    pub fn apply_action(&self, board: &Board, slot: SlotId) -> ActionOutcome {
        let mut selection = self.selection_guard();

        if selection.contains(slot) {
            // Toggle off. The referee may have cleared the slot already;
            // both removals are then no-ops.
            board.remove_marker(self.id, slot);
            selection.remove(slot);
            return ActionOutcome::ToggledOff;
        }

        if selection.len() >= SELECTION_CAPACITY {
            return ActionOutcome::Ignored;
        }
        if !board.place_marker(self.id, slot) {
            return ActionOutcome::Ignored;
        }
        selection.add(slot);
        match selection.full() {
            Some(slots) => ActionOutcome::Completed(slots),
            None => ActionOutcome::Placed,
        }
    }

    /// Drop the selection entry for `slot`, if present.
    ///
    /// Referee-side eager reconciliation: called for every slot the
    /// referee empties, for every seat. Idempotent.
    pub fn clear_slot(&self, slot: SlotId) {
        self.selection_guard().remove(slot);
    }

    /// Drop the whole selection. Used on reshuffle.
    pub fn clear_selection(&self) {
        self.selection_guard().clear();
    }

    /// Number of currently selected slots.
    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selection_guard().len()
    }

    /// Snapshot of the selected slots.
    #[must_use]
    pub fn selected_slots(&self) -> Vec<SlotId> {
        self.selection_guard().iter().collect()
    }
}
