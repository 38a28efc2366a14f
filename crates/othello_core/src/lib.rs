pub mod board;
pub mod error;
pub mod game;
pub mod observer;
pub mod player;
pub mod types;

// Re-export core game logic (not strategy-specific)
pub use board::*;
pub use error::*;
pub use game::*;
pub use observer::*;
pub use player::*;
pub use types::*;

// =============================================================================
// Strategy traits — implemented by all evaluation strategies
// =============================================================================

/// Trait that all move-scoring strategies implement.
///
/// `evaluate` is called once per legal candidate per decision and returns a
/// score where higher is better. The automated player keeps every candidate
/// tied at the exact maximum and breaks the tie uniformly at random, so a
/// flat scorer degenerates to uniform random move selection.
pub trait Strategy {
    /// Scores placing a stone of `color` at `mv` on `board`.
    fn evaluate(&mut self, board: &Board, color: StoneColor, mv: Pos) -> f64;

    /// Returns the strategy's name for reporting.
    fn name(&self) -> &str;
}

/// A strategy that learns from game outcomes.
///
/// The owning player feeds `record_move` every move it commits to; when the
/// game ends the engine calls `apply_outcome` with +1.0 / -1.0 / 0.0 as the
/// owning color won / lost / drew.
pub trait LearningStrategy: Strategy {
    fn record_move(&mut self, mv: Pos);
    fn apply_outcome(&mut self, reward: f64);
}

/// Tagged handle over the two strategy families.
///
/// The learning operations exist only on the `Learning` variant, so call
/// sites reach them through an exhaustive match instead of probing runtime
/// types.
pub enum StrategyHandle {
    Scoring(Box<dyn Strategy>),
    Learning(Box<dyn LearningStrategy>),
}

impl StrategyHandle {
    pub fn evaluate(&mut self, board: &Board, color: StoneColor, mv: Pos) -> f64 {
        match self {
            StrategyHandle::Scoring(s) => s.evaluate(board, color, mv),
            StrategyHandle::Learning(s) => s.evaluate(board, color, mv),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StrategyHandle::Scoring(s) => s.name(),
            StrategyHandle::Learning(s) => s.name(),
        }
    }
}
