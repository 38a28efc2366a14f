//! Turn state machine: move validation, pass handling, termination, and
//! observer notification.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::StrategyHandle;
use crate::board::Board;
use crate::error::GameError;
use crate::observer::{GameObserver, ObserverHandle, ObserverSlot};
use crate::player::Player;
use crate::types::{Pos, StoneColor, StoneCounts};

/// How automated turns are driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Automated turns are played synchronously as soon as they come up;
    /// a pure self-play game runs to completion inside `start`.
    #[default]
    Immediate,
    /// Automated turns are surfaced through [`Game::pending_auto`] and played
    /// back by the outer layer via [`Game::play_auto`], after whatever pacing
    /// delay it wants.
    Deferred,
}

/// Token for a deferred automated turn. A token issued before a restart or a
/// termination no longer matches and is discarded by [`Game::play_auto`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingAuto {
    color: StoneColor,
    generation: u64,
}

impl PendingAuto {
    pub fn color(&self) -> StoneColor {
        self.color
    }
}

/// The game engine: owns the live board and both seats, validates and applies
/// moves, walks pass chains, detects termination, and notifies observers.
///
/// Everything runs on one thread; the engine is one unit of mutual exclusion
/// by construction (`Rc`-based observer plumbing keeps it `!Send`).
#[derive(Debug)]
pub struct Game {
    board: Board,
    active: StoneColor,
    game_over: bool,
    consecutive_passes: u8,
    players: [Player; 2], // [Black, White]
    observers: Vec<ObserverSlot>,
    generation: u64,
    mode: AdvanceMode,
}

impl Game {
    /// A standard game. Seats must match their colors.
    pub fn new(black: Player, white: Player) -> Result<Self, GameError> {
        Self::from_position(Board::new(), StoneColor::Black, black, white)
    }

    /// A game starting from an arbitrary position, for tests and analysis.
    /// Use [`Game::resume`] to drive play without resetting the board.
    pub fn from_position(
        board: Board,
        active: StoneColor,
        black: Player,
        white: Player,
    ) -> Result<Self, GameError> {
        if black.color() != StoneColor::Black {
            return Err(GameError::PlayerColorMismatch {
                expected: StoneColor::Black,
                got: black.color(),
            });
        }
        if white.color() != StoneColor::White {
            return Err(GameError::PlayerColorMismatch {
                expected: StoneColor::White,
                got: white.color(),
            });
        }
        if !active.is_stone() {
            return Err(GameError::InvalidActiveColor);
        }
        Ok(Self {
            board,
            active,
            game_over: false,
            consecutive_passes: 0,
            players: [black, white],
            observers: Vec::new(),
            generation: 0,
            mode: AdvanceMode::Immediate,
        })
    }

    pub fn set_advance_mode(&mut self, mode: AdvanceMode) {
        self.mode = mode;
    }

    /// Registers an observer. The engine holds only a weak reference and
    /// notifies in registration order; dropping the handle unregisters.
    pub fn add_observer(&mut self, observer: &ObserverHandle) {
        self.observers.push(Rc::downgrade(observer));
    }

    /// Starts (or restarts) a game: fresh board, Black to move, counters
    /// cleared. Any deferred automated move issued earlier becomes stale.
    pub fn start(&mut self) {
        let size = self.board.size();
        self.board = Board::seeded(size);
        self.active = StoneColor::Black;
        self.game_over = false;
        self.consecutive_passes = 0;
        self.generation = self.generation.wrapping_add(1);
        debug!(generation = self.generation, "game started");
        self.notify_board_updated();
        self.notify_turn_changed();
        self.run_automated();
    }

    /// Resets the board and plays again.
    pub fn restart(&mut self) {
        self.start();
    }

    /// Drives play from the current position without resetting it. Intended
    /// for games built with [`Game::from_position`].
    pub fn resume(&mut self) {
        if self.game_over {
            return;
        }
        self.run_automated();
    }

    /// Confirms a move for the active color. Submissions in a terminal state
    /// or on an illegal cell are dropped silently: both legitimate callers
    /// (the click path and automated players) pre-filter, so this check only
    /// guards the state against a misbehaving caller.
    pub fn submit_move(&mut self, pos: Pos) {
        if !self.try_move(pos) {
            return;
        }
        self.run_automated();
    }

    /// Entry point for UI clicks. The click becomes a move only when the
    /// game is live, the active seat is human, and the cell is legal for the
    /// active color; anything else is ignored.
    pub fn report_click(&mut self, pos: Pos) {
        if self.game_over {
            return;
        }
        if !self.players[seat_index(self.active)].is_human() {
            return;
        }
        if !self.board.can_place(pos, self.active) {
            return;
        }
        self.submit_move(pos);
    }

    /// The automated turn waiting to be played, if any. Only meaningful in
    /// [`AdvanceMode::Deferred`].
    pub fn pending_auto(&self) -> Option<PendingAuto> {
        if self.game_over || !self.active_is_automated() {
            return None;
        }
        Some(PendingAuto {
            color: self.active,
            generation: self.generation,
        })
    }

    /// Plays a deferred automated turn. The token is re-checked against the
    /// current generation and terminal flag, so a move scheduled before a
    /// restart or a finished game is discarded instead of applied.
    pub fn play_auto(&mut self, token: PendingAuto) {
        if self.game_over
            || token.generation != self.generation
            || token.color != self.active
            || !self.active_is_automated()
        {
            trace!(?token, "stale automated move discarded");
            return;
        }
        self.step_automated();
        if self.mode == AdvanceMode::Immediate {
            self.run_automated();
        }
    }

    /// Board snapshot; the live board is never aliased out.
    pub fn board(&self) -> Board {
        self.board.snapshot()
    }

    pub fn active_color(&self) -> StoneColor {
        self.active
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Legal moves for the active color (move highlighting).
    pub fn legal_moves(&self) -> Vec<Pos> {
        self.board.legal_moves(self.active)
    }

    pub fn counts(&self) -> StoneCounts {
        self.board.counts()
    }

    fn try_move(&mut self, pos: Pos) -> bool {
        if self.game_over || !self.board.can_place(pos, self.active) {
            trace!(?pos, active = ?self.active, "move rejected");
            return false;
        }
        self.board.apply_move(pos, self.active);
        self.consecutive_passes = 0;
        debug!(?pos, color = ?self.active, "move applied");
        self.notify_board_updated();
        self.advance_turn();
        true
    }

    /// Hands the turn over after a move or a pass. At most two flips happen
    /// per transition, and the pass counter moves at most once per distinct
    /// stuck color, never once per flip.
    fn advance_turn(&mut self) {
        for _ in 0..2 {
            self.active = self.active.opponent();
            if self.board.is_full() {
                self.end_game();
                return;
            }
            if self.board.has_legal_move(self.active) {
                self.notify_turn_changed();
                return;
            }
            // Stuck: one forced pass, then hand the turn straight back.
            self.consecutive_passes += 1;
            debug!(color = ?self.active, passes = self.consecutive_passes, "forced pass");
            if self.consecutive_passes >= 2 {
                self.end_game();
                return;
            }
            self.notify_turn_changed();
        }
    }

    /// Pass from an automated player that found no legal move. Normal turn
    /// advance never leaves the turn on a stuck color, so this is only
    /// reachable when a game opens (or is loaded) on one.
    fn pass(&mut self) {
        self.consecutive_passes += 1;
        debug!(color = ?self.active, passes = self.consecutive_passes, "pass");
        if self.consecutive_passes >= 2 {
            self.end_game();
        } else {
            self.advance_turn();
        }
    }

    /// Plays automated turns until a human turn, a deferral, or termination.
    fn run_automated(&mut self) {
        if self.mode == AdvanceMode::Deferred {
            return;
        }
        while !self.game_over && self.active_is_automated() {
            if !self.step_automated() {
                break;
            }
        }
    }

    fn step_automated(&mut self) -> bool {
        let snapshot = self.board.snapshot();
        let choice = match &mut self.players[seat_index(self.active)] {
            Player::Automated(player) => player.choose_move(&snapshot),
            Player::Human(_) => return false,
        };
        match choice {
            Some(mv) => self.try_move(mv),
            None => {
                self.pass();
                true
            }
        }
    }

    /// Terminal entry. Guarded so that a full board and a completed pass
    /// chain in the same transition still emit `game_ended` exactly once.
    fn end_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        let counts = self.board.counts();
        let winner = counts.winner();
        debug!(black = counts.black, white = counts.white, ?winner, "game over");
        for player in &mut self.players {
            if let Player::Automated(p) = player {
                let color = p.color();
                if let StrategyHandle::Learning(strategy) = p.strategy_mut() {
                    let reward = if winner == StoneColor::Empty {
                        0.0
                    } else if winner == color {
                        1.0
                    } else {
                        -1.0
                    };
                    strategy.apply_outcome(reward);
                }
            }
        }
        self.notify_game_ended();
    }

    fn active_is_automated(&self) -> bool {
        matches!(
            self.players[seat_index(self.active)],
            Player::Automated(_)
        )
    }

    fn notify_board_updated(&mut self) {
        let snapshot = self.board.snapshot();
        self.for_each_observer(|o| o.board_updated(&snapshot));
    }

    fn notify_turn_changed(&mut self) {
        let color = self.active;
        self.for_each_observer(|o| o.turn_changed(color));
    }

    fn notify_game_ended(&mut self) {
        let snapshot = self.board.snapshot();
        self.for_each_observer(|o| o.game_ended(&snapshot));
    }

    fn for_each_observer(&mut self, mut f: impl FnMut(&mut dyn GameObserver)) {
        // Dropped observers fall out here; live ones keep registration order.
        self.observers.retain(|slot| match slot.upgrade() {
            Some(observer) => {
                f(&mut *observer.borrow_mut());
                true
            }
            None => false,
        });
    }
}

fn seat_index(color: StoneColor) -> usize {
    match color {
        StoneColor::Black => 0,
        StoneColor::White => 1,
        StoneColor::Empty => unreachable!("no seat for Empty"),
    }
}

#[cfg(test)]
mod game_tests;
