//! The referee: single coordinating thread owning round lifecycle.
//!
//! Per round: deal the board full, run the countdown while evaluating
//! submissions one at a time, then reshuffle everything back into the
//! deck. The loop ends when deck and board together hold no valid
//! triple, or on an external stop, after which every player with the
//! maximal score is announced.
//!
//! The referee is the only writer of the card ↔ slot mapping and of the
//! deck, and the only thread that delivers resume signals.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::core::{CardId, GameConfig, GameRng, PlayerId, SlotId, StopFlag};
use crate::display::DisplaySink;
use crate::player::Seat;
use crate::submit::{Submission, SubmissionChannel};
use crate::validate::MatchValidator;

/// Idle-wait granularity far from the round deadline.
const COARSE_POLL: Duration = Duration::from_secs(1);

/// Idle-wait granularity inside the warning threshold, so the countdown
/// display stays fresh near expiry.
const FINE_POLL: Duration = Duration::from_millis(10);

/// Why one submission produced no score change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stale {
    Frozen,
    MarkerGone,
}

/// The coordinating actor. One per game; [`run`](Referee::run) is the
/// referee thread's body.
pub struct Referee {
    config: GameConfig,
    board: Arc<Board>,
    seats: Vec<Arc<Seat>>,
    /// Cards not currently on the board. Referee-exclusive; matched
    /// cards leave both deck and board for good.
    deck: Vec<CardId>,
    submissions: SubmissionChannel,
    validator: Arc<dyn MatchValidator>,
    display: Arc<dyn DisplaySink>,
    stop: StopFlag,
    rng: GameRng,
}

impl Referee {
    /// Build a referee over a freshly built board. The deck starts as
    /// every card `0..deck_size`.
    pub fn new(
        config: GameConfig,
        board: Arc<Board>,
        seats: Vec<Arc<Seat>>,
        submissions: SubmissionChannel,
        validator: Arc<dyn MatchValidator>,
        display: Arc<dyn DisplaySink>,
        stop: StopFlag,
        rng: GameRng,
    ) -> Self {
        let deck = (0..config.deck_size as u32).map(CardId::new).collect();
        Self {
            config,
            board,
            seats,
            deck,
            submissions,
            validator,
            display,
            stop,
            rng,
        }
    }

    /// Round loop. Returns the winners once play is exhausted or a stop
    /// was requested; the stop flag is set before returning so player
    /// threads can be joined by the caller.
    pub fn run(&mut self) -> Vec<PlayerId> {
        log::info!("referee starting");

        while !self.should_finish() {
            self.deal();
            self.log_hints();
            self.round();
            self.reshuffle();
        }

        self.stop.set();
        let winners = self.winners();
        self.display.winners(&winners);
        log::info!("referee terminated, winners: {winners:?}");
        winners
    }

    /// True once no valid triple remains anywhere, or a stop came in.
    fn should_finish(&self) -> bool {
        if self.stop.is_set() {
            return true;
        }
        let mut pool = self.deck.clone();
        pool.extend(self.board.cards_on_board());
        self.validator.find_triples(&pool, 1).is_empty()
    }

    /// Fill every empty slot with a uniformly random remaining deck
    /// card until the board is full or the deck runs out.
    fn deal(&mut self) {
        for slot in self.board.empty_slots() {
            if self.deck.is_empty() {
                break;
            }
            let at = self.rng.gen_range_usize(0..self.deck.len());
            let card = self.deck.swap_remove(at);
            if !self.board.place_card(card, slot) {
                self.deck.push(card);
            }
        }
        log::debug!(
            "dealt board up to {} cards, {} left in deck",
            self.board.occupied_count(),
            self.deck.len()
        );
    }

    /// Log every valid triple currently on the board, by slot.
    fn log_hints(&self) {
        let on_board = self.board.cards_on_board();
        for triple in self.validator.find_triples(&on_board, usize::MAX) {
            let mut slots: Vec<_> = triple
                .iter()
                .filter_map(|&card| self.board.slot_of(card))
                .collect();
            slots.sort_unstable();
            log::debug!("hint: valid triple at {slots:?}");
        }
    }

    /// One countdown period: idle-wait on the submission channel,
    /// evaluating at most one submission per wake, until the deadline
    /// or a stop.
    fn round(&mut self) {
        let deadline = Instant::now() + self.config.turn_duration;
        self.display.countdown(self.config.turn_duration, false);

        while !self.stop.is_set() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let warn = remaining < self.config.warning_threshold;
            let poll = remaining.min(if warn { FINE_POLL } else { COARSE_POLL });

            if let Some(submission) = self.submissions.poll(poll) {
                self.evaluate(submission);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            self.display
                .countdown(remaining, remaining < self.config.warning_threshold);
        }
    }

    /// Judge one submission and resume its player.
    ///
    /// The board mutation (if any) and the freeze are complete before
    /// the resume fires, so the player wakes to a settled world.
    fn evaluate(&mut self, submission: Submission) {
        let player = submission.player;
        let slots = submission.slots;

        match self.check_live(&submission) {
            Err(reason) => {
                log::debug!("{player} submission {slots:?} ignored: {reason:?}");
            }
            Ok([a, b, c]) => {
                if self.validator.is_valid_triple(a, b, c) {
                    self.score(player, slots);
                } else {
                    log::debug!("{player} submitted invalid triple {slots:?}");
                    self.seats[player.index()].begin_penalty_freeze(self.config.penalty_freeze);
                }
            }
        }
        submission.resume();
    }

    /// Re-validate a dequeued submission against current ground truth.
    ///
    /// The queue wait may have made it stale: the player got frozen by
    /// an earlier submission of theirs, or the referee cleared one of
    /// the marked slots in the meantime.
    fn check_live(&self, submission: &Submission) -> Result<[CardId; 3], Stale> {
        let player = submission.player;
        if self.seats[player.index()].is_frozen() {
            return Err(Stale::Frozen);
        }

        let mut cards = [CardId::new(0); 3];
        for (i, &slot) in submission.slots.iter().enumerate() {
            if !self.board.has_marker(player, slot) {
                return Err(Stale::MarkerGone);
            }
            cards[i] = self.board.card_at(slot).ok_or(Stale::MarkerGone)?;
        }
        Ok(cards)
    }

    /// Apply a valid triple: clear the three slots, reconcile every
    /// seat's selection, refill from the deck, award the point and start
    /// the point freeze.
    fn score(&mut self, player: PlayerId, slots: [SlotId; 3]) {
        for slot in slots {
            // Removed cards leave play permanently, so they go nowhere.
            self.board.remove_card(slot);
            for seat in &self.seats {
                seat.clear_slot(slot);
            }
        }
        self.deal();

        let seat = &self.seats[player.index()];
        let total = seat.award_point();
        self.display.score(player, total);
        seat.begin_point_freeze(self.config.point_freeze);
        log::info!("{player} scored, total {total}");
    }

    /// Return every board card to the deck and clear all markers and
    /// selections. The board ends fully empty.
    fn reshuffle(&mut self) {
        for slot in SlotId::all(self.board.size()) {
            if let Some(card) = self.board.remove_card(slot) {
                self.deck.push(card);
            }
        }
        for seat in &self.seats {
            seat.clear_selection();
        }
        log::debug!("reshuffled, deck at {} cards", self.deck.len());
    }

    /// Every player holding the maximal score, ties included.
    fn winners(&self) -> Vec<PlayerId> {
        let max = self.seats.iter().map(|s| s.score()).max().unwrap_or(0);
        self.seats
            .iter()
            .filter(|s| s.score() == max)
            .map(|s| s.id())
            .collect()
    }
}
