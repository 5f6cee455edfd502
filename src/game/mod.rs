//! Game assembly and thread lifecycle.
//!
//! [`Game::new`] validates the configuration and wires the shared
//! structures together; [`Game::run`] spawns one thread per player,
//! runs the referee on the calling thread, and joins everything before
//! returning the winners. No thread is abandoned: the referee sets the
//! stop flag on its way out and `run` waits for every agent (each agent
//! joins its own input generator).

use std::sync::Arc;
use std::thread;

use crate::board::Board;
use crate::core::{GameConfig, GameRng, PlayerId, StopFlag};
use crate::display::DisplaySink;
use crate::error::ConfigError;
use crate::player::{ActionSource, GeneratedInput, HumanInput, InputHandle, PlayerAgent, Seat};
use crate::referee::Referee;
use crate::submit::SubmissionChannel;
use crate::validate::MatchValidator;

/// Who controls a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    /// Actions arrive from outside through an [`InputHandle`].
    Human,
    /// Actions come from a synthetic input generator thread.
    Automated,
}

/// A fully wired game, ready to run.
///
/// ```no_run
/// use std::sync::Arc;
/// use triad::core::{CardId, GameConfig};
/// use triad::display::NullDisplay;
/// use triad::game::{Game, PlayerKind};
/// use triad::validate::MatchValidator;
///
/// struct AlwaysMatch;
/// impl MatchValidator for AlwaysMatch {
///     fn is_valid_triple(&self, _: CardId, _: CardId, _: CardId) -> bool {
///         true
///     }
/// }
///
/// let game = Game::new(
///     GameConfig::default(),
///     &[PlayerKind::Automated, PlayerKind::Automated],
///     Arc::new(AlwaysMatch),
///     Arc::new(NullDisplay),
/// )
/// .expect("valid configuration");
/// let winners = game.run();
/// println!("winners: {winners:?}");
/// ```
pub struct Game {
    config: GameConfig,
    board: Arc<Board>,
    seats: Vec<Arc<Seat>>,
    submissions: SubmissionChannel,
    validator: Arc<dyn MatchValidator>,
    display: Arc<dyn DisplaySink>,
    stop: StopFlag,
    rng: GameRng,
    agents: Vec<PlayerAgent>,
    handles: Vec<Option<InputHandle>>,
}

impl Game {
    /// Wire up a game for the given roster.
    ///
    /// Automated players get their input generator thread immediately;
    /// with an empty board it idles cheaply until dealing starts.
    pub fn new(
        config: GameConfig,
        roster: &[PlayerKind],
        validator: Arc<dyn MatchValidator>,
        display: Arc<dyn DisplaySink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if roster.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        if roster.len() > u8::MAX as usize + 1 {
            return Err(ConfigError::TooManyPlayers(roster.len()));
        }

        let stop = StopFlag::new();
        let rng = GameRng::new(config.seed);
        let board = Arc::new(Board::new(
            config.board_size,
            Arc::clone(&display),
            config.placement_delay,
        ));
        let submissions = SubmissionChannel::new(roster.len());

        let mut seats = Vec::with_capacity(roster.len());
        let mut agents = Vec::with_capacity(roster.len());
        let mut handles = Vec::with_capacity(roster.len());

        for (index, kind) in roster.iter().enumerate() {
            let id = PlayerId::new(index as u8);
            let seat = Arc::new(Seat::new(id));

            let (source, handle): (Box<dyn ActionSource>, Option<InputHandle>) = match kind {
                PlayerKind::Human => {
                    let (source, handle) = HumanInput::new(config.action_queue_capacity);
                    (Box::new(source), Some(handle))
                }
                PlayerKind::Automated => {
                    let source = GeneratedInput::spawn(
                        id,
                        Arc::clone(&board),
                        config.action_queue_capacity,
                        rng.for_stream(&format!("input-{index}")),
                        stop.clone(),
                    );
                    (Box::new(source), None)
                }
            };

            agents.push(PlayerAgent::new(
                Arc::clone(&seat),
                Arc::clone(&board),
                submissions.clone(),
                source,
                Arc::clone(&display),
                stop.clone(),
            ));
            seats.push(seat);
            handles.push(handle);
        }

        Ok(Self {
            config,
            board,
            seats,
            submissions,
            validator,
            display,
            stop,
            rng,
            agents,
            handles,
        })
    }

    /// Flag that stops the game from any thread.
    #[must_use]
    pub fn stop_handle(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Input feed for a human player; `None` for automated ones.
    #[must_use]
    pub fn input_handle(&self, player: PlayerId) -> Option<InputHandle> {
        self.handles.get(player.index())?.clone()
    }

    /// Current scores, by player.
    #[must_use]
    pub fn scores(&self) -> Vec<(PlayerId, u32)> {
        self.seats.iter().map(|s| (s.id(), s.score())).collect()
    }

    /// Play the game to completion on the calling thread.
    ///
    /// Blocks until the deck runs dry of triples or the stop handle
    /// fires, then joins every player thread and returns the winners.
    pub fn run(self) -> Vec<PlayerId> {
        let Self {
            config,
            board,
            seats,
            submissions,
            validator,
            display,
            stop,
            rng,
            agents,
            handles: _,
        } = self;

        let mut workers = Vec::with_capacity(agents.len());
        for agent in agents {
            let name = format!("player-{}", agent.player().0);
            let worker = thread::Builder::new()
                .name(name)
                .spawn(move || agent.run())
                .expect("spawn player thread");
            workers.push(worker);
        }

        let mut referee = Referee::new(
            config,
            board,
            seats,
            submissions,
            validator,
            display,
            stop,
            rng.for_stream("deal"),
        );
        let winners = referee.run();

        // The referee set the stop flag before returning; every agent
        // unwinds from its current blocking point and joins here.
        for worker in workers {
            let _ = worker.join();
        }
        winners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::display::NullDisplay;
    use std::time::Duration;

    struct NoTriples;

    impl MatchValidator for NoTriples {
        fn is_valid_triple(&self, _: CardId, _: CardId, _: CardId) -> bool {
            false
        }
    }

    fn quick_config() -> GameConfig {
        GameConfig::default()
            .with_board_size(4)
            .with_deck_size(9)
            .with_turn_duration(Duration::from_millis(200))
            .with_warning_threshold(Duration::from_millis(50))
            .with_freezes(Duration::from_millis(10), Duration::from_millis(10))
            .with_placement_delay(Duration::ZERO)
    }

    #[test]
    fn test_rejects_empty_roster() {
        let result = Game::new(
            quick_config(),
            &[],
            Arc::new(NoTriples),
            Arc::new(NullDisplay),
        );
        assert!(matches!(result, Err(ConfigError::NoPlayers)));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = Game::new(
            quick_config().with_board_size(2),
            &[PlayerKind::Human],
            Arc::new(NoTriples),
            Arc::new(NullDisplay),
        );
        assert!(matches!(result, Err(ConfigError::BoardTooSmall(2))));
    }

    #[test]
    fn test_input_handles_only_for_humans() {
        let game = Game::new(
            quick_config(),
            &[PlayerKind::Human, PlayerKind::Automated],
            Arc::new(NoTriples),
            Arc::new(NullDisplay),
        )
        .expect("valid game");

        assert!(game.input_handle(PlayerId::new(0)).is_some());
        assert!(game.input_handle(PlayerId::new(1)).is_none());
        assert!(game.input_handle(PlayerId::new(9)).is_none());

        // Tear the unstarted game down cleanly.
        game.stop_handle().set();
        game.run();
    }

    #[test]
    fn test_run_with_dead_deck_finishes_immediately() {
        let game = Game::new(
            quick_config(),
            &[PlayerKind::Automated, PlayerKind::Automated],
            Arc::new(NoTriples),
            Arc::new(NullDisplay),
        )
        .expect("valid game");

        let winners = game.run();
        assert_eq!(winners, vec![PlayerId::new(0), PlayerId::new(1)]);
    }

    #[test]
    fn test_stop_handle_ends_a_live_game() {
        struct AllValid;
        impl MatchValidator for AllValid {
            fn is_valid_triple(&self, _: CardId, _: CardId, _: CardId) -> bool {
                true
            }
        }

        let game = Game::new(
            quick_config().with_turn_duration(Duration::from_secs(60)),
            &[PlayerKind::Automated],
            Arc::new(AllValid),
            Arc::new(NullDisplay),
        )
        .expect("valid game");

        let stop = game.stop_handle();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(300));
            stop.set();
        });

        let winners = game.run();
        assert_eq!(winners.len(), 1);
        stopper.join().expect("stopper exits");
    }
}
