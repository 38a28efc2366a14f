use std::fmt;

use crate::error::GameError;
use crate::types::{Pos, StoneColor, StoneCounts};

/// Standard board size.
pub const DEFAULT_SIZE: usize = 8;

/// The 8 scan directions for capture detection.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Grid state plus the capture rules, with no knowledge of turns or game
/// termination. `apply_move` is the only mutator; everything handed outside
/// the engine is a deep copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<StoneColor>,
}

impl Board {
    /// Standard 8x8 board with the four-stone center seed.
    pub fn new() -> Self {
        Self::seeded(DEFAULT_SIZE)
    }

    /// A seeded board of any even size >= 4. The center seed has no integral
    /// midpoint on an odd grid, so those sizes are rejected outright.
    pub fn with_size(size: usize) -> Result<Self, GameError> {
        if size < 4 || size % 2 != 0 {
            return Err(GameError::InvalidBoardSize { size });
        }
        Ok(Self::seeded(size))
    }

    pub(crate) fn seeded(size: usize) -> Self {
        let mut board = Board {
            size,
            cells: vec![StoneColor::Empty; size * size],
        };
        let mid = (size / 2) as i8;
        board.set(Pos::new(mid - 1, mid - 1), StoneColor::White);
        board.set(Pos::new(mid, mid), StoneColor::White);
        board.set(Pos::new(mid - 1, mid), StoneColor::Black);
        board.set(Pos::new(mid, mid - 1), StoneColor::Black);
        board
    }

    /// Builds a board from rows of `.` / `B` / `W`. Used by tests and
    /// position analysis; panics on malformed input like a notation parser.
    pub fn from_grid(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(
            size >= 4 && size % 2 == 0,
            "grid must be even-sized and at least 4x4"
        );
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            assert_eq!(row.len(), size, "grid rows must form a square");
            for ch in row.chars() {
                cells.push(match ch {
                    '.' => StoneColor::Empty,
                    'B' => StoneColor::Black,
                    'W' => StoneColor::White,
                    _ => panic!("invalid grid char: {ch}"),
                });
            }
        }
        Board { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && (p.row as usize) < self.size && (p.col as usize) < self.size
    }

    /// Cell lookup. Out-of-range reads as Empty so capture scans can walk
    /// off the edge without a separate bounds branch.
    pub fn cell(&self, p: Pos) -> StoneColor {
        if self.in_bounds(p) {
            self.cells[self.index(p)]
        } else {
            StoneColor::Empty
        }
    }

    /// True iff `p` is an empty in-range cell where `color` captures at
    /// least one opponent run.
    pub fn can_place(&self, p: Pos, color: StoneColor) -> bool {
        if !self.is_open(p, color) {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.bracketed_run(p, dir, color) > 0)
    }

    /// Every opponent stone flipped by placing `color` at `p`: the union of
    /// the bracketed runs over all 8 directions. Empty when the move is
    /// illegal. Directions never overlap, so the result has set semantics.
    pub fn compute_captures(&self, p: Pos, color: StoneColor) -> Vec<Pos> {
        let mut captures = Vec::new();
        if !self.is_open(p, color) {
            return captures;
        }
        let opponent = color.opponent();
        for &(dr, dc) in &DIRECTIONS {
            let start = captures.len();
            let mut cur = p.offset(dr, dc);
            while self.cell(cur) == opponent {
                captures.push(cur);
                cur = cur.offset(dr, dc);
            }
            // The run only counts if it ends on our own stone.
            if self.cell(cur) != color {
                captures.truncate(start);
            }
        }
        captures
    }

    /// Places `color` at `p` and flips the captured runs. A placement with no
    /// captures leaves the board untouched; callers are expected to have
    /// checked `can_place` already, this is a safety net.
    pub fn apply_move(&mut self, p: Pos, color: StoneColor) {
        let captures = self.compute_captures(p, color);
        if captures.is_empty() {
            return;
        }
        self.set(p, color);
        for c in captures {
            self.set(c, color);
        }
    }

    pub fn legal_moves(&self, color: StoneColor) -> Vec<Pos> {
        let mut moves = Vec::new();
        self.legal_moves_into(color, &mut moves);
        moves
    }

    pub fn legal_moves_into(&self, color: StoneColor, out: &mut Vec<Pos>) {
        out.clear();
        for row in 0..self.size as i8 {
            for col in 0..self.size as i8 {
                let p = Pos::new(row, col);
                if self.can_place(p, color) {
                    out.push(p);
                }
            }
        }
    }

    pub fn has_legal_move(&self, color: StoneColor) -> bool {
        for row in 0..self.size as i8 {
            for col in 0..self.size as i8 {
                if self.can_place(Pos::new(row, col), color) {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_stone())
    }

    pub fn counts(&self) -> StoneCounts {
        let mut counts = StoneCounts { black: 0, white: 0 };
        for &cell in &self.cells {
            match cell {
                StoneColor::Black => counts.black += 1,
                StoneColor::White => counts.white += 1,
                StoneColor::Empty => {}
            }
        }
        counts
    }

    /// Deep copy for safe external exposure.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    fn is_open(&self, p: Pos, color: StoneColor) -> bool {
        color.is_stone() && self.in_bounds(p) && self.cell(p) == StoneColor::Empty
    }

    /// Length of the opponent run from `p` in `dir` that ends on a stone of
    /// `color`; 0 when the run exits the board or meets an empty cell.
    fn bracketed_run(&self, p: Pos, dir: (i8, i8), color: StoneColor) -> usize {
        let opponent = color.opponent();
        let mut len = 0;
        let mut cur = p.offset(dir.0, dir.1);
        while self.cell(cur) == opponent {
            len += 1;
            cur = cur.offset(dir.0, dir.1);
        }
        if len > 0 && self.cell(cur) == color { len } else { 0 }
    }

    fn index(&self, p: Pos) -> usize {
        p.row as usize * self.size + p.col as usize
    }

    fn set(&mut self, p: Pos, color: StoneColor) {
        let i = self.index(p);
        self.cells[i] = color;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size as i8 {
            for col in 0..self.size as i8 {
                let ch = match self.cell(Pos::new(row, col)) {
                    StoneColor::Empty => '.',
                    StoneColor::Black => 'B',
                    StoneColor::White => 'W',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
