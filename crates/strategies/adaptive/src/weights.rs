//! Positional weight table.

use othello_core::Pos;
use serde::{Deserialize, Serialize};

/// Weight of each cell when the strategy considers placing there, row-major.
/// The table persists across games; outcome rewards are folded into it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    size: usize,
    cells: Vec<f64>,
}

/// The standard 8x8 positional prior: corners strong, cells next to a corner
/// penalized, far edges mildly favored, interior near-neutral.
const STANDARD_8X8: [f64; 64] = [
    20.0, -7.0, 11.0, 8.0, 8.0, 11.0, -7.0, 20.0, //
    -7.0, -10.0, -4.0, 2.0, 2.0, -4.0, -10.0, -7.0, //
    11.0, -4.0, 5.0, 2.0, 2.0, 5.0, -4.0, 11.0, //
    8.0, 2.0, 2.0, 1.0, 1.0, 2.0, 2.0, 8.0, //
    8.0, 2.0, 2.0, 1.0, 1.0, 2.0, 2.0, 8.0, //
    11.0, -4.0, 5.0, 2.0, 2.0, 5.0, -4.0, 11.0, //
    -7.0, -10.0, -4.0, 2.0, 2.0, -4.0, -10.0, -7.0, //
    20.0, -7.0, 11.0, 8.0, 8.0, 11.0, -7.0, 20.0, //
];

impl WeightTable {
    /// The standard prior for the 8x8 board.
    pub fn standard() -> Self {
        Self {
            size: 8,
            cells: STANDARD_8X8.to_vec(),
        }
    }

    /// A flat table for nonstandard board sizes.
    pub fn zeroed(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Deserialized tables are only trusted when the dimensions line up.
    pub fn is_consistent(&self) -> bool {
        self.size > 0 && self.cells.len() == self.size * self.size
    }

    /// Out-of-table positions read as 0.0, mirroring how the board treats
    /// out-of-range cells.
    pub fn get(&self, pos: Pos) -> f64 {
        match self.index(pos) {
            Some(i) => self.cells[i],
            None => 0.0,
        }
    }

    pub fn add(&mut self, pos: Pos, delta: f64) {
        if let Some(i) = self.index(pos) {
            self.cells[i] += delta;
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row < 0
            || pos.col < 0
            || pos.row as usize >= self.size
            || pos.col as usize >= self.size
        {
            return None;
        }
        Some(pos.row as usize * self.size + pos.col as usize)
    }
}
