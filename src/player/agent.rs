//! The player agent: one thread per participant.
//!
//! The loop mirrors the round protocol: sit out a freeze if one is in
//! effect, otherwise take the next action from the source and apply it
//! to the board through the seat. Completing a third marker submits the
//! selection and blocks until the referee's verdict resumes us.

use std::sync::Arc;
use std::time::Duration;

use crate::board::Board;
use crate::core::{PlayerId, SlotId, StopFlag};
use crate::display::DisplaySink;
use crate::player::input::ActionSource;
use crate::player::seat::{ActionOutcome, Seat};
use crate::submit::{Submission, SubmissionChannel};

/// How long one action wait blocks before re-checking the stop flag.
const ACTION_POLL: Duration = Duration::from_millis(100);

/// Cadence of freeze countdown refreshes for the display.
const FREEZE_TICK: Duration = Duration::from_secs(1);

/// A single participant's acting thread.
///
/// Built by the game glue; [`run`](PlayerAgent::run) is the thread body.
pub struct PlayerAgent {
    seat: Arc<Seat>,
    board: Arc<Board>,
    submissions: SubmissionChannel,
    source: Box<dyn ActionSource>,
    display: Arc<dyn DisplaySink>,
    stop: StopFlag,
}

impl PlayerAgent {
    /// Assemble an agent around its seat and action source.
    pub fn new(
        seat: Arc<Seat>,
        board: Arc<Board>,
        submissions: SubmissionChannel,
        source: Box<dyn ActionSource>,
        display: Arc<dyn DisplaySink>,
        stop: StopFlag,
    ) -> Self {
        Self {
            seat,
            board,
            submissions,
            source,
            display,
            stop,
        }
    }

    /// The player this agent acts for.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.seat.id()
    }

    /// Main loop. Runs until the stop flag is set, then joins any
    /// auxiliary input thread before returning.
    pub fn run(mut self) {
        let player = self.seat.id();
        log::info!("{player} thread starting");

        while !self.stop.is_set() {
            if self.seat.is_frozen() {
                self.freeze_wait();
                continue;
            }
            if let Some(slot) = self.source.next_action(ACTION_POLL) {
                self.apply(slot);
            }
        }

        self.source.shutdown();
        log::info!("{player} thread terminated");
    }

    /// Sit out the current freeze, refreshing the display once per
    /// second, then discard any actions that piled up meanwhile.
    fn freeze_wait(&mut self) {
        let player = self.seat.id();
        while let Some(remaining) = self.seat.freeze_remaining() {
            if remaining.is_zero() {
                break;
            }
            self.display.freeze(player, remaining);
            std::thread::sleep(remaining.min(FREEZE_TICK));
            if self.stop.is_set() {
                return;
            }
        }
        self.display.freeze(player, Duration::ZERO);
        self.seat.end_freeze();
        self.source.drain();
    }

    fn apply(&mut self, slot: SlotId) {
        match self.seat.apply_action(&self.board, slot) {
            ActionOutcome::Completed(slots) => self.submit(slots),
            ActionOutcome::ToggledOff | ActionOutcome::Placed | ActionOutcome::Ignored => {}
        }
    }

    /// Hand the completed selection to the referee and suspend until the
    /// verdict. Exactly one resume arrives per submission; a stop
    /// request unblocks both waits.
    fn submit(&mut self, slots: [SlotId; 3]) {
        let player = self.seat.id();
        log::debug!("{player} submitting {slots:?}");
        let (submission, waiter) = Submission::new(player, slots);
        if self.submissions.submit(submission, &self.stop) {
            waiter.wait(&self.stop);
        }
    }
}
