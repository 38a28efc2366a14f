//! Human and automated seats.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::StrategyHandle;
use crate::board::Board;
use crate::types::{Pos, StoneColor};

/// A human seat. Humans act through out-of-band input, so they never produce
/// a move synchronously; clicks arrive via `Game::report_click`.
#[derive(Clone, Copy, Debug)]
pub struct HumanPlayer {
    color: StoneColor,
}

impl HumanPlayer {
    pub fn new(color: StoneColor) -> Self {
        Self { color }
    }

    pub fn color(&self) -> StoneColor {
        self.color
    }
}

/// A strategy-driven seat. The random source is a constructor parameter so
/// tests and reproducible sessions can pin it down.
pub struct AutomatedPlayer {
    color: StoneColor,
    strategy: StrategyHandle,
    rng: StdRng,
}

impl std::fmt::Debug for AutomatedPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomatedPlayer")
            .field("color", &self.color)
            .field("strategy", &self.strategy.name())
            .field("rng", &self.rng)
            .finish()
    }
}

impl AutomatedPlayer {
    pub fn new(color: StoneColor, strategy: StrategyHandle) -> Self {
        Self::with_rng(color, strategy, StdRng::from_entropy())
    }

    pub fn from_seed(color: StoneColor, strategy: StrategyHandle, seed: u64) -> Self {
        Self::with_rng(color, strategy, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(color: StoneColor, strategy: StrategyHandle, rng: StdRng) -> Self {
        Self {
            color,
            strategy,
            rng,
        }
    }

    pub fn color(&self) -> StoneColor {
        self.color
    }

    /// Picks a move from the snapshot, or None to pass.
    ///
    /// Every legal candidate is scored once. Candidates tied at the exact
    /// maximum are collected and one is drawn uniformly, so selection never
    /// depends on enumeration order. When the strategy learns, the pick is
    /// recorded before being returned.
    pub fn choose_move(&mut self, board: &Board) -> Option<Pos> {
        let mut candidates = Vec::new();
        board.legal_moves_into(self.color, &mut candidates);
        if candidates.is_empty() {
            return None; // pass
        }

        let mut best_score = f64::NEG_INFINITY;
        let mut best: Vec<Pos> = Vec::new();
        for &mv in &candidates {
            let score = self.strategy.evaluate(board, self.color, mv);
            if score > best_score {
                best_score = score;
                best.clear();
                best.push(mv);
            } else if score == best_score {
                best.push(mv);
            }
        }

        let pick = best[self.rng.gen_range(0..best.len())];
        if let StrategyHandle::Learning(strategy) = &mut self.strategy {
            strategy.record_move(pick);
        }
        Some(pick)
    }

    pub(crate) fn strategy_mut(&mut self) -> &mut StrategyHandle {
        &mut self.strategy
    }
}

/// A seat at the board. The color is fixed for the player's lifetime.
#[derive(Debug)]
pub enum Player {
    Human(HumanPlayer),
    Automated(AutomatedPlayer),
}

impl Player {
    pub fn human(color: StoneColor) -> Self {
        Player::Human(HumanPlayer::new(color))
    }

    pub fn automated(color: StoneColor, strategy: StrategyHandle) -> Self {
        Player::Automated(AutomatedPlayer::new(color, strategy))
    }

    pub fn color(&self) -> StoneColor {
        match self {
            Player::Human(p) => p.color(),
            Player::Automated(p) => p.color(),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Player::Human(_))
    }
}
