//! Random Evaluation Strategy
//!
//! Scores every candidate with a uniform sample in [0,1), ignoring the board
//! entirely. The automated player keeps the candidates tied at the maximum
//! and draws among them, so with this scorer move selection degenerates to a
//! uniform random legal move. Useful for:
//! - Exercising the game loop before any learning is involved
//! - Baseline comparisons (any informed strategy should beat this)

use othello_core::{Board, Pos, StoneColor, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod lib_tests;

/// An evaluation strategy that provides no information.
///
/// The random source is injected so tests and reproducible sessions can pin
/// the sequence down.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn evaluate(&mut self, _board: &Board, _color: StoneColor, _mv: Pos) -> f64 {
        self.rng.gen::<f64>()
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
