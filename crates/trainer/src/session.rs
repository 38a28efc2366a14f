//! Self-play session runner

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use adaptive_strategy::{AdaptiveStrategy, FileStore};
use othello_core::{
    AutomatedPlayer, Board, Game, GameError, GameObserver, ObserverHandle, Player, StoneColor,
    StrategyHandle,
};
use random_strategy::RandomStrategy;

use crate::config::TrainerConfig;
use crate::results::SessionResults;

/// Which strategy drives a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Random,
    Adaptive,
}

impl StrategyKind {
    pub fn parse(spec: &str) -> Option<Self> {
        match spec.to_lowercase().as_str() {
            "random" | "rand" => Some(StrategyKind::Random),
            "adaptive" | "weighted" | "learn" => Some(StrategyKind::Adaptive),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Adaptive => "adaptive",
        }
    }
}

/// Tallies finished games from their final boards.
#[derive(Default)]
struct OutcomeTally {
    results: Vec<StoneColor>,
}

impl GameObserver for OutcomeTally {
    fn game_ended(&mut self, board: &Board) {
        self.results.push(board.counts().winner());
    }
}

/// Runs batches of self-play games. The engine applies learning rewards on
/// every terminal entry, so a session with an adaptive seat trains its weight
/// table as a side effect and persists it under `config.weights_dir`.
pub struct TrainingSession {
    config: TrainerConfig,
}

impl TrainingSession {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Plays `config.games` games back to back and returns the tally.
    pub fn run(&self, black: StrategyKind, white: StrategyKind) -> Result<SessionResults, GameError> {
        let mut game = Game::new(
            self.seat(StoneColor::Black, black, 0xb1ac4),
            self.seat(StoneColor::White, white, 0x3417e),
        )?;

        let tally: Rc<RefCell<OutcomeTally>> = Rc::new(RefCell::new(OutcomeTally::default()));
        let handle: ObserverHandle = tally.clone();
        game.add_observer(&handle);

        for game_no in 0..self.config.games {
            // Immediate mode: the whole game runs inside start.
            game.start();
            if self.config.verbose {
                let counts = game.counts();
                info!(
                    game = game_no + 1,
                    black = counts.black,
                    white = counts.white,
                    "game finished"
                );
            }
        }

        let mut results = SessionResults::new(black.label(), white.label());
        for &winner in &tally.borrow().results {
            results.record(winner);
        }
        Ok(results)
    }

    fn seat(&self, color: StoneColor, kind: StrategyKind, salt: u64) -> Player {
        let strategy_seed = self.config.seed.map(|s| s ^ salt);
        let strategy = match kind {
            StrategyKind::Random => {
                let strategy = match strategy_seed {
                    Some(seed) => RandomStrategy::from_seed(seed),
                    None => RandomStrategy::new(),
                };
                StrategyHandle::Scoring(Box::new(strategy))
            }
            StrategyKind::Adaptive => {
                let store = Box::new(FileStore::new(&self.config.weights_dir));
                let strategy = match strategy_seed {
                    Some(seed) => AdaptiveStrategy::from_seed(store, seed),
                    None => AdaptiveStrategy::new(store),
                };
                StrategyHandle::Learning(Box::new(strategy))
            }
        };
        match self.config.seed {
            Some(seed) => {
                Player::Automated(AutomatedPlayer::from_seed(color, strategy, seed ^ salt.rotate_left(8)))
            }
            None => Player::automated(color, strategy),
        }
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;

    fn config(games: u32, dir: &str) -> TrainerConfig {
        TrainerConfig {
            games,
            seed: Some(0xfeed),
            weights_dir: std::env::temp_dir()
                .join(format!("{dir}_{}", std::process::id()))
                .to_string_lossy()
                .into_owned(),
            verbose: false,
        }
    }

    #[test]
    fn test_random_self_play_session() {
        let session = TrainingSession::new(config(3, "trainer_random"));
        let results = session
            .run(StrategyKind::Random, StrategyKind::Random)
            .unwrap();

        assert_eq!(results.games, 3);
        assert_eq!(results.black_wins + results.white_wins + results.draws, 3);
        assert_eq!(results.black, "random");
        assert_eq!(results.white, "random");
    }

    #[test]
    fn test_adaptive_session_persists_weights() {
        let config = config(2, "trainer_adaptive");
        let dir = config.weights_dir.clone();
        let _ = std::fs::remove_dir_all(&dir);

        let session = TrainingSession::new(config);
        let results = session
            .run(StrategyKind::Adaptive, StrategyKind::Random)
            .unwrap();

        assert_eq!(results.games, 2);
        let weights_file =
            std::path::Path::new(&dir).join(format!("{}.json", adaptive_strategy::DEFAULT_KEY));
        assert!(weights_file.exists(), "weight table was not persisted");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!(StrategyKind::parse("random"), Some(StrategyKind::Random));
        assert_eq!(StrategyKind::parse("Adaptive"), Some(StrategyKind::Adaptive));
        assert_eq!(StrategyKind::parse("minimax"), None);
    }
}
