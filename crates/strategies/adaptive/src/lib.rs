//! Adaptive Positional-Weight Strategy
//!
//! Scores candidate moves from a persisted per-cell weight table plus a small
//! exploration jitter, records every move it commits to, and folds the game
//! outcome back into the table when the engine reports it:
//!
//! - win:  +1.0 reward, each recorded cell gains `LEARNING_RATE`
//! - loss: -1.0 reward, each recorded cell loses `LEARNING_RATE`
//! - draw:  0.0 reward, the table is untouched
//!
//! The table outlives individual games and is written back through a
//! [`WeightStore`] after every learning update; the move history is per-game
//! and cleared by the update.

mod store;
mod weights;

pub use store::{FileStore, MemoryStore, StoreError, WeightStore};
pub use weights::WeightTable;

use othello_core::{Board, LearningStrategy, Pos, StoneColor, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};


/// Fraction of the reward folded into each recorded cell.
const LEARNING_RATE: f64 = 0.1;

/// Amplitude of the exploration jitter added to every evaluation. Keeps the
/// choice slightly exploratory even while the table is static.
const JITTER: f64 = 0.05;

/// Storage key for the default weight table.
pub const DEFAULT_KEY: &str = "cpu_weights_v1";

pub struct AdaptiveStrategy {
    weights: WeightTable,
    history: Vec<Pos>,
    rng: StdRng,
    store: Box<dyn WeightStore>,
    key: String,
    name: String,
}

impl AdaptiveStrategy {
    /// Loads the table stored under [`DEFAULT_KEY`], falling back to the
    /// standard prior when the store has nothing usable.
    pub fn new(store: Box<dyn WeightStore>) -> Self {
        Self::with_key(store, DEFAULT_KEY, StdRng::from_entropy())
    }

    pub fn from_seed(store: Box<dyn WeightStore>, seed: u64) -> Self {
        Self::with_key(store, DEFAULT_KEY, StdRng::seed_from_u64(seed))
    }

    pub fn with_key(store: Box<dyn WeightStore>, key: &str, rng: StdRng) -> Self {
        let weights = match store.load(key) {
            Some(table) => table,
            None => {
                debug!(key, "no stored weights, starting from the standard prior");
                WeightTable::standard()
            }
        };
        Self {
            weights,
            history: Vec::new(),
            rng,
            store,
            key: key.to_string(),
            name: format!("Adaptive-{key}"),
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Strategy for AdaptiveStrategy {
    fn evaluate(&mut self, _board: &Board, _color: StoneColor, mv: Pos) -> f64 {
        self.weights.get(mv) + self.rng.gen::<f64>() * JITTER
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LearningStrategy for AdaptiveStrategy {
    fn record_move(&mut self, mv: Pos) {
        self.history.push(mv);
    }

    fn apply_outcome(&mut self, reward: f64) {
        debug!(reward, moves = self.history.len(), "applying game outcome");
        for &mv in &self.history {
            self.weights.add(mv, LEARNING_RATE * reward);
        }
        self.history.clear();
        if let Err(e) = self.store.save(&self.key, &self.weights) {
            warn!(error = %e, key = %self.key, "failed to persist weights");
        }
    }
}
