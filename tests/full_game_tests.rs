//! Full-stack game tests: real threads, real channels, real rounds.
//!
//! These exercise the whole assembly — referee thread, player threads,
//! input generators, submission rendezvous — and assert only on
//! properties that are deterministic despite scheduling: conservation
//! of cards, final scores, termination, and prompt cancellation.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use triad::core::{CardId, GameConfig, PlayerId, SlotId};
use triad::display::DisplaySink;
use triad::game::{Game, PlayerKind};
use triad::validate::MatchValidator;

/// Validator accepting any three cards.
struct AllValid;

impl MatchValidator for AllValid {
    fn is_valid_triple(&self, _: CardId, _: CardId, _: CardId) -> bool {
        true
    }
}

/// Validator that rejects every submission but keeps the game alive by
/// claiming the pool still contains a triple.
struct NeverValid;

impl MatchValidator for NeverValid {
    fn is_valid_triple(&self, _: CardId, _: CardId, _: CardId) -> bool {
        false
    }

    fn find_triples(&self, pool: &[CardId], _max: usize) -> Vec<[CardId; 3]> {
        if pool.len() >= 3 {
            vec![[pool[0], pool[1], pool[2]]]
        } else {
            Vec::new()
        }
    }
}

/// Display double that records score and freeze events.
#[derive(Default)]
struct Recording {
    scores: Mutex<Vec<(PlayerId, u32)>>,
    freezes: Mutex<Vec<(PlayerId, Duration)>>,
    winners: Mutex<Vec<PlayerId>>,
}

impl DisplaySink for Recording {
    fn score(&self, player: PlayerId, score: u32) {
        self.scores.lock().unwrap().push((player, score));
    }

    fn freeze(&self, player: PlayerId, remaining: Duration) {
        self.freezes.lock().unwrap().push((player, remaining));
    }

    fn winners(&self, players: &[PlayerId]) {
        *self.winners.lock().unwrap() = players.to_vec();
    }
}

fn fast_config() -> GameConfig {
    GameConfig::default()
        .with_board_size(3)
        .with_deck_size(9)
        .with_turn_duration(Duration::from_secs(2))
        .with_warning_threshold(Duration::from_millis(200))
        .with_freezes(Duration::from_millis(5), Duration::from_millis(5))
        .with_placement_delay(Duration::ZERO)
        .with_seed(42)
}

/// Two automated players burn through a 9-card deck where every triple
/// is valid. Exactly three triples can ever be scored, each submission
/// gets exactly one verdict, and the game terminates on its own.
#[test]
fn test_automated_game_consumes_the_deck() {
    let display = Arc::new(Recording::default());
    let game = Game::new(
        fast_config(),
        &[PlayerKind::Automated, PlayerKind::Automated],
        Arc::new(AllValid),
        Arc::clone(&display) as Arc<dyn DisplaySink>,
    )
    .expect("valid game");

    let winners = game.run();

    // 9 cards, 3 per match: the final score totals must sum to 3.
    let scores = display.scores.lock().unwrap();
    let mut final_score = [0u32; 2];
    for &(player, score) in scores.iter() {
        final_score[player.index()] = score;
    }
    assert_eq!(final_score[0] + final_score[1], 3);

    // Winners are everyone at the maximum, and were announced.
    let max = final_score.iter().max().copied().unwrap();
    let expected: Vec<_> = PlayerId::all(2)
        .filter(|p| final_score[p.index()] == max)
        .collect();
    assert_eq!(winners, expected);
    assert_eq!(*display.winners.lock().unwrap(), expected);
}

/// A scripted human player marks three slots on a board where any
/// triple is valid, scores exactly one point, and the 3-card deck is
/// then exhausted, ending the game.
#[test]
fn test_scripted_player_scores_one_point() {
    let display = Arc::new(Recording::default());
    let config = fast_config()
        .with_deck_size(3)
        .with_turn_duration(Duration::from_secs(3));
    let game = Game::new(
        config,
        &[PlayerKind::Human],
        Arc::new(AllValid),
        Arc::clone(&display) as Arc<dyn DisplaySink>,
    )
    .expect("valid game");

    let handle = game.input_handle(PlayerId::new(0)).expect("human handle");
    let feeder = thread::spawn(move || {
        // Let the referee finish dealing first.
        thread::sleep(Duration::from_millis(500));
        for slot in [SlotId::new(0), SlotId::new(1), SlotId::new(2)] {
            assert!(handle.press(slot));
        }
    });

    let winners = game.run();
    feeder.join().expect("feeder exits");

    assert_eq!(winners, vec![PlayerId::new(0)]);
    assert_eq!(
        *display.scores.lock().unwrap(),
        vec![(PlayerId::new(0), 1)]
    );
    // The scored player sat out a point freeze.
    assert!(display
        .freezes
        .lock()
        .unwrap()
        .iter()
        .any(|&(p, _)| p == PlayerId::new(0)));
}

/// An invalid submission penalizes the player without any score.
#[test]
fn test_invalid_submission_draws_a_penalty() {
    let display = Arc::new(Recording::default());
    let config = fast_config()
        .with_turn_duration(Duration::from_secs(10))
        .with_freezes(Duration::from_millis(5), Duration::from_millis(300));
    let game = Game::new(
        config,
        &[PlayerKind::Human],
        Arc::new(NeverValid),
        Arc::clone(&display) as Arc<dyn DisplaySink>,
    )
    .expect("valid game");

    let handle = game.input_handle(PlayerId::new(0)).expect("human handle");
    let stop = game.stop_handle();
    let feeder = thread::spawn(move || {
        thread::sleep(Duration::from_millis(500));
        for slot in [SlotId::new(0), SlotId::new(1), SlotId::new(2)] {
            assert!(handle.press(slot));
        }
        // Leave time for the verdict and the freeze display updates.
        thread::sleep(Duration::from_millis(500));
        stop.set();
    });

    game.run();
    feeder.join().expect("feeder exits");

    assert!(display.scores.lock().unwrap().is_empty());
    let freezes = display.freezes.lock().unwrap();
    assert!(freezes
        .iter()
        .any(|&(p, remaining)| p == PlayerId::new(0) && !remaining.is_zero()));
}

/// A stop request ends a long-turn game promptly, joining every thread.
#[test]
fn test_stop_signal_unwinds_promptly() {
    let game = Game::new(
        fast_config().with_turn_duration(Duration::from_secs(60)),
        &[
            PlayerKind::Automated,
            PlayerKind::Automated,
            PlayerKind::Human,
        ],
        Arc::new(NeverValid),
        Arc::new(triad::display::NullDisplay),
    )
    .expect("valid game");

    let stop = game.stop_handle();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(300));
        stop.set();
    });

    let started = Instant::now();
    let winners = game.run();
    stopper.join().expect("stopper exits");

    // Everyone ties at zero under a validator that rejects everything.
    assert_eq!(winners.len(), 3);
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "stop took {:?}",
        started.elapsed()
    );
}
