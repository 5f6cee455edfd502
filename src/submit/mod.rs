//! Submission plumbing: the bounded FIFO channel from players to the
//! referee, and the one-shot rendezvous that resumes a player after its
//! submission is evaluated.
//!
//! A player that completes its third marker builds a [`Submission`],
//! keeps the paired [`ResumeWaiter`], enqueues the submission and blocks
//! on the waiter. The referee consumes the submission, mutates the board
//! as needed, and fires the [`ResumeSignal`] exactly once. The signal is
//! consumed by value, so a duplicate wakeup cannot be expressed.

use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::core::{PlayerId, SlotId, StopFlag};

/// Cadence at which blocked threads re-check the stop flag.
const STOP_POLL: Duration = Duration::from_millis(50);

/// Referee-side half of the rendezvous. Firing it consumes it.
#[derive(Debug)]
pub struct ResumeSignal(Sender<()>);

impl ResumeSignal {
    /// Wake the submitting player. Safe to call after the player has
    /// already unwound (the wakeup is simply dropped).
    pub fn resume(self) {
        let _ = self.0.send(());
    }
}

/// Player-side half of the rendezvous.
#[derive(Debug)]
pub struct ResumeWaiter(Receiver<()>);

impl ResumeWaiter {
    /// Block until resumed or until `stop` is set.
    ///
    /// Returns `true` if the resume arrived, `false` on cancellation.
    pub fn wait(&self, stop: &StopFlag) -> bool {
        loop {
            match self.0.recv_timeout(STOP_POLL) {
                Ok(()) => return true,
                Err(RecvTimeoutError::Timeout) => {
                    if stop.is_set() {
                        return false;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }
}

/// A completed 3-marker selection awaiting the referee's verdict.
#[derive(Debug)]
pub struct Submission {
    /// The submitting player.
    pub player: PlayerId,
    /// The three marked slots, in marking order.
    pub slots: [SlotId; 3],
    resume: ResumeSignal,
}

impl Submission {
    /// Build a submission and the waiter its owner will block on.
    #[must_use]
    pub fn new(player: PlayerId, slots: [SlotId; 3]) -> (Self, ResumeWaiter) {
        let (tx, rx) = bounded(1);
        (
            Self {
                player,
                slots,
                resume: ResumeSignal(tx),
            },
            ResumeWaiter(rx),
        )
    }

    /// Release the submitting player. Consumes the submission: one
    /// resume per submission, by construction.
    pub fn resume(self) {
        self.resume.resume();
    }
}

/// Bounded FIFO queue of submissions, players → referee.
///
/// Capacity equals the player count, so backpressure is transient: every
/// producer blocks at most until the referee drains one entry.
#[derive(Clone)]
pub struct SubmissionChannel {
    tx: Sender<Submission>,
    rx: Receiver<Submission>,
}

impl SubmissionChannel {
    /// Create a channel holding at most `capacity` pending submissions.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// Enqueue a submission, blocking under backpressure.
    ///
    /// Returns `false` if `stop` was set before the submission went in;
    /// the caller's waiter will then never fire and must not be waited on.
    pub fn submit(&self, submission: Submission, stop: &StopFlag) -> bool {
        let mut pending = submission;
        loop {
            match self.tx.send_timeout(pending, STOP_POLL) {
                Ok(()) => return true,
                Err(crossbeam_channel::SendTimeoutError::Timeout(back)) => {
                    if stop.is_set() {
                        return false;
                    }
                    pending = back;
                }
                Err(crossbeam_channel::SendTimeoutError::Disconnected(_)) => return false,
            }
        }
    }

    /// Dequeue the oldest pending submission, waiting up to `timeout`.
    #[must_use]
    pub fn poll(&self, timeout: Duration) -> Option<Submission> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl std::fmt::Debug for SubmissionChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionChannel")
            .field("pending", &self.rx.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(a: u8, b: u8, c: u8) -> [SlotId; 3] {
        [SlotId::new(a), SlotId::new(b), SlotId::new(c)]
    }

    #[test]
    fn test_resume_wakes_waiter() {
        let (sub, waiter) = Submission::new(PlayerId::new(0), slots(0, 1, 2));
        sub.resume();
        assert!(waiter.wait(&StopFlag::new()));
    }

    #[test]
    fn test_wait_observes_stop() {
        let (_sub, waiter) = Submission::new(PlayerId::new(0), slots(0, 1, 2));
        let stop = StopFlag::new();
        stop.set();
        assert!(!waiter.wait(&stop));
    }

    #[test]
    fn test_wait_ends_when_signal_dropped() {
        let (sub, waiter) = Submission::new(PlayerId::new(0), slots(0, 1, 2));
        drop(sub);
        assert!(!waiter.wait(&StopFlag::new()));
    }

    #[test]
    fn test_fifo_order() {
        let channel = SubmissionChannel::new(2);
        let stop = StopFlag::new();

        let (first, _w1) = Submission::new(PlayerId::new(0), slots(0, 1, 2));
        let (second, _w2) = Submission::new(PlayerId::new(1), slots(3, 4, 5));
        assert!(channel.submit(first, &stop));
        assert!(channel.submit(second, &stop));

        let out = channel.poll(Duration::ZERO).expect("first pending");
        assert_eq!(out.player, PlayerId::new(0));
        let out = channel.poll(Duration::ZERO).expect("second pending");
        assert_eq!(out.player, PlayerId::new(1));
        assert!(channel.poll(Duration::ZERO).is_none());
    }

    #[test]
    fn test_submit_cancelled_under_backpressure() {
        let channel = SubmissionChannel::new(1);
        let stop = StopFlag::new();

        let (first, _w1) = Submission::new(PlayerId::new(0), slots(0, 1, 2));
        assert!(channel.submit(first, &stop));

        // Channel full; a stop request must unblock the producer.
        stop.set();
        let (second, _w2) = Submission::new(PlayerId::new(1), slots(3, 4, 5));
        assert!(!channel.submit(second, &stop));
    }

    #[test]
    fn test_poll_times_out_when_empty() {
        let channel = SubmissionChannel::new(1);
        assert!(channel.poll(Duration::from_millis(1)).is_none());
    }
}
