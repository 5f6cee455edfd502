//! Action sources: where a player's slot choices come from.
//!
//! The agent's main loop is agnostic to the source. [`HumanInput`] is
//! fed by the surrounding process through an [`InputHandle`];
//! [`GeneratedInput`] owns an auxiliary thread that samples random
//! occupied slots, the automated participant of the game.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender};

use crate::board::Board;
use crate::core::{GameRng, PlayerId, SlotId, StopFlag};

/// How long the generator sleeps when the board holds no cards.
const IDLE_RETRY: Duration = Duration::from_millis(100);

/// Cadence at which a blocked generator re-checks the stop flag.
const STOP_POLL: Duration = Duration::from_millis(50);

/// A blocking, cancellable stream of slot choices.
pub trait ActionSource: Send {
    /// Wait up to `timeout` for the next chosen slot.
    fn next_action(&mut self, timeout: Duration) -> Option<SlotId>;

    /// Discard everything queued so far. Called when a freeze ends:
    /// choices made while frozen are dropped, not replayed.
    fn drain(&mut self);

    /// Release auxiliary resources on agent shutdown. Must be called
    /// before the owning agent's thread exits.
    fn shutdown(&mut self) {}
}

/// Feeding end of a human player's action queue.
///
/// Cheap to clone; hand it to whatever reads the real input device.
#[derive(Clone, Debug)]
pub struct InputHandle {
    tx: Sender<SlotId>,
}

impl InputHandle {
    /// Queue a slot choice.
    ///
    /// Non-blocking: returns `false` if the queue is full or the player
    /// has exited, and the press is dropped. A human re-presses; the
    /// queue bound exists precisely to shed input while the player is
    /// suspended.
    pub fn press(&self, slot: SlotId) -> bool {
        self.tx.try_send(slot).is_ok()
    }
}

/// Action source backed by external input events.
#[derive(Debug)]
pub struct HumanInput {
    rx: Receiver<SlotId>,
}

impl HumanInput {
    /// Create the source and the handle that feeds it.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, InputHandle) {
        let (tx, rx) = bounded(capacity);
        (Self { rx }, InputHandle { tx })
    }
}

impl ActionSource for HumanInput {
    fn next_action(&mut self, timeout: Duration) -> Option<SlotId> {
        self.rx.recv_timeout(timeout).ok()
    }

    fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

/// Action source driven by a synthetic input thread.
///
/// The generator picks uniformly among occupied slots. With an empty
/// board it sleeps [`IDLE_RETRY`] between samples instead of spinning,
/// and a full queue blocks it (bounded send) without ever outliving a
/// stop request.
#[derive(Debug)]
pub struct GeneratedInput {
    rx: Receiver<SlotId>,
    generator: Option<JoinHandle<()>>,
}

impl GeneratedInput {
    /// Spawn the generator thread for `player`.
    pub fn spawn(
        player: PlayerId,
        board: Arc<Board>,
        capacity: usize,
        mut rng: GameRng,
        stop: StopFlag,
    ) -> Self {
        let (tx, rx) = bounded(capacity);
        let generator = thread::Builder::new()
            .name(format!("generator-{}", player.0))
            .spawn(move || {
                log::info!("input generator for {player} starting");
                'main: while !stop.is_set() {
                    let occupied = board.occupied_slots();
                    let Some(&slot) = rng.choose(&occupied) else {
                        thread::sleep(IDLE_RETRY);
                        continue;
                    };
                    let mut pending = slot;
                    loop {
                        match tx.send_timeout(pending, STOP_POLL) {
                            Ok(()) => break,
                            Err(SendTimeoutError::Timeout(back)) => {
                                if stop.is_set() {
                                    break 'main;
                                }
                                pending = back;
                            }
                            Err(SendTimeoutError::Disconnected(_)) => break 'main,
                        }
                    }
                }
                log::info!("input generator for {player} terminated");
            })
            .expect("spawn input generator thread");

        Self {
            rx,
            generator: Some(generator),
        }
    }
}

impl ActionSource for GeneratedInput {
    fn next_action(&mut self, timeout: Duration) -> Option<SlotId> {
        self.rx.recv_timeout(timeout).ok()
    }

    fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }

    fn shutdown(&mut self) {
        if let Some(generator) = self.generator.take() {
            let _ = generator.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::display::NullDisplay;

    #[test]
    fn test_human_input_delivers_in_order() {
        let (mut source, handle) = HumanInput::new(3);
        assert!(handle.press(SlotId::new(4)));
        assert!(handle.press(SlotId::new(1)));
        assert_eq!(
            source.next_action(Duration::from_millis(10)),
            Some(SlotId::new(4))
        );
        assert_eq!(
            source.next_action(Duration::from_millis(10)),
            Some(SlotId::new(1))
        );
        assert_eq!(source.next_action(Duration::from_millis(1)), None);
    }

    #[test]
    fn test_human_input_sheds_presses_when_full() {
        let (mut source, handle) = HumanInput::new(1);
        assert!(handle.press(SlotId::new(0)));
        assert!(!handle.press(SlotId::new(1)));
        source.drain();
        assert!(handle.press(SlotId::new(2)));
    }

    #[test]
    fn test_drain_discards_everything() {
        let (mut source, handle) = HumanInput::new(3);
        handle.press(SlotId::new(0));
        handle.press(SlotId::new(1));
        source.drain();
        assert_eq!(source.next_action(Duration::from_millis(1)), None);
    }

    #[test]
    fn test_generator_produces_occupied_slots() {
        let board = Arc::new(Board::new(4, Arc::new(NullDisplay), Duration::ZERO));
        board.place_card(CardId::new(0), SlotId::new(2));
        let stop = StopFlag::new();

        let mut source = GeneratedInput::spawn(
            PlayerId::new(0),
            Arc::clone(&board),
            3,
            GameRng::new(1).for_stream("input-0"),
            stop.clone(),
        );

        let slot = source
            .next_action(Duration::from_secs(2))
            .expect("generator produces an action");
        assert_eq!(slot, SlotId::new(2));

        stop.set();
        source.shutdown();
    }

    #[test]
    fn test_generator_idles_on_empty_board_and_stops() {
        let board = Arc::new(Board::new(4, Arc::new(NullDisplay), Duration::ZERO));
        let stop = StopFlag::new();

        let mut source = GeneratedInput::spawn(
            PlayerId::new(1),
            board,
            3,
            GameRng::new(1).for_stream("input-1"),
            stop.clone(),
        );

        assert_eq!(source.next_action(Duration::from_millis(30)), None);
        stop.set();
        // Joins promptly: the generator checks the flag on every cycle.
        source.shutdown();
    }
}
