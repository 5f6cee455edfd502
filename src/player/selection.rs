//! A player's in-progress selection of marked slots.

use crate::core::SlotId;

/// Maximum markers a player may hold at once.
pub const SELECTION_CAPACITY: usize = 3;

/// Up to three marked slots, in marking order.
///
/// Array-backed with tombstones: removing an entry leaves a hole that
/// the next addition fills, so surviving entries keep their order.
///
/// ```
/// use triad::core::SlotId;
/// use triad::player::Selection;
///
/// let mut sel = Selection::new();
/// assert!(sel.add(SlotId::new(4)));
/// assert!(sel.add(SlotId::new(7)));
/// assert!(sel.remove(SlotId::new(4)));
/// assert_eq!(sel.len(), 1);
/// assert!(sel.full().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    slots: [Option<SlotId>; SELECTION_CAPACITY],
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of marked slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no slot is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Whether `slot` is part of the selection.
    #[must_use]
    pub fn contains(&self, slot: SlotId) -> bool {
        self.slots.contains(&Some(slot))
    }

    /// Add `slot` to the first free entry.
    ///
    /// Returns `false` if the selection is full or already contains the
    /// slot.
    pub fn add(&mut self, slot: SlotId) -> bool {
        if self.contains(slot) {
            return false;
        }
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(entry) => {
                *entry = Some(slot);
                true
            }
            None => false,
        }
    }

    /// Remove `slot` from the selection.
    ///
    /// Idempotent: removing an absent slot returns `false` with no
    /// effect. Safe to call redundantly from the referee's forced-clear
    /// path.
    pub fn remove(&mut self, slot: SlotId) -> bool {
        match self.slots.iter_mut().find(|s| **s == Some(slot)) {
            Some(entry) => {
                *entry = None;
                true
            }
            None => false,
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.slots = [None; SELECTION_CAPACITY];
    }

    /// The three slots if the selection is complete, in marking order.
    #[must_use]
    pub fn full(&self) -> Option<[SlotId; 3]> {
        match self.slots {
            [Some(a), Some(b), Some(c)] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Iterate over the marked slots.
    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }
}
