use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::observer::ObserverHandle;
use crate::player::AutomatedPlayer;
use crate::types::pos;
use crate::{Strategy, StrategyHandle};

struct FlatEval;

impl Strategy for FlatEval {
    fn evaluate(&mut self, _board: &Board, _color: StoneColor, _mv: Pos) -> f64 {
        0.0
    }

    fn name(&self) -> &str {
        "Flat"
    }
}

fn cpu(color: StoneColor, seed: u64) -> Player {
    Player::Automated(AutomatedPlayer::from_seed(
        color,
        StrategyHandle::Scoring(Box::new(FlatEval)),
        seed,
    ))
}

fn humans() -> Result<Game, GameError> {
    Game::new(
        Player::human(StoneColor::Black),
        Player::human(StoneColor::White),
    )
}

/// Records every notification in delivery order.
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
    last_board: Option<Board>,
}

impl GameObserver for EventLog {
    fn board_updated(&mut self, board: &Board) {
        self.events.push("board".to_string());
        self.last_board = Some(board.snapshot());
    }

    fn turn_changed(&mut self, color: StoneColor) {
        self.events.push(format!("turn:{color:?}"));
    }

    fn game_ended(&mut self, _board: &Board) {
        self.events.push("end".to_string());
    }
}

#[test]
fn seat_colors_are_checked() {
    let err = Game::new(
        Player::human(StoneColor::White),
        Player::human(StoneColor::White),
    )
    .unwrap_err();
    assert_eq!(
        err,
        GameError::PlayerColorMismatch {
            expected: StoneColor::Black,
            got: StoneColor::White,
        }
    );

    let err = Game::from_position(
        Board::new(),
        StoneColor::Empty,
        Player::human(StoneColor::Black),
        Player::human(StoneColor::White),
    )
    .unwrap_err();
    assert_eq!(err, GameError::InvalidActiveColor);
}

#[test]
fn click_applies_a_legal_move() {
    let mut game = humans().unwrap();
    game.start();
    assert_eq!(game.active_color(), StoneColor::Black);

    game.report_click(pos(2, 3));
    let counts = game.counts();
    assert_eq!((counts.black, counts.white), (4, 1));
    assert_eq!(game.active_color(), StoneColor::White);
}

#[test]
fn illegal_and_out_of_turn_clicks_are_ignored() {
    let mut game = humans().unwrap();
    game.start();
    let before = game.board();

    // Not a legal cell for Black.
    game.report_click(pos(0, 0));
    // Legal for White, but it is Black's turn.
    game.report_click(pos(2, 4));
    // Off the board entirely.
    game.report_click(pos(-3, 12));

    assert_eq!(game.board(), before);
    assert_eq!(game.active_color(), StoneColor::Black);
}

#[test]
fn illegal_submissions_are_silent_noops() {
    let mut game = humans().unwrap();
    game.start();
    let before = game.board();
    game.submit_move(pos(0, 0));
    assert_eq!(game.board(), before);
    assert_eq!(game.active_color(), StoneColor::Black);
}

#[test]
fn clicks_are_ignored_on_an_automated_turn() {
    let mut game = Game::new(cpu(StoneColor::Black, 3), Player::human(StoneColor::White)).unwrap();
    game.set_advance_mode(AdvanceMode::Deferred);
    game.start();
    let before = game.board();

    // Black is automated and pending; a click on a black opening must not
    // play Black's move through the human path.
    game.report_click(pos(2, 3));
    assert_eq!(game.board(), before);
    assert!(game.pending_auto().is_some());
}

#[test]
fn observer_order_is_board_then_turn() {
    let mut game = humans().unwrap();
    let log: Rc<RefCell<EventLog>> = Rc::new(RefCell::new(EventLog::default()));
    let handle: ObserverHandle = log.clone();
    game.add_observer(&handle);

    game.start();
    game.report_click(pos(2, 3));

    let log = log.borrow();
    assert_eq!(
        log.events,
        vec![
            "board".to_string(),
            "turn:Black".to_string(),
            "board".to_string(),
            "turn:White".to_string(),
        ]
    );
    // The snapshot carries the post-move position.
    let snapshot = log.last_board.as_ref().unwrap();
    assert_eq!(snapshot.cell(pos(3, 3)), StoneColor::Black);
}

#[test]
fn dropped_observers_are_pruned() {
    let mut game = humans().unwrap();
    let kept: Rc<RefCell<EventLog>> = Rc::new(RefCell::new(EventLog::default()));
    let kept_handle: ObserverHandle = kept.clone();
    game.add_observer(&kept_handle);
    {
        let dropped: Rc<RefCell<EventLog>> = Rc::new(RefCell::new(EventLog::default()));
        let dropped_handle: ObserverHandle = dropped.clone();
        game.add_observer(&dropped_handle);
    }

    game.start();
    assert_eq!(kept.borrow().events.len(), 2);
}

#[test]
fn deferred_mode_waits_for_the_driver() {
    let mut game = Game::new(cpu(StoneColor::Black, 1), cpu(StoneColor::White, 2)).unwrap();
    game.set_advance_mode(AdvanceMode::Deferred);
    game.start();

    // Nothing played yet.
    assert_eq!(game.counts().total(), 4);
    let token = game.pending_auto().unwrap();
    assert_eq!(token.color(), StoneColor::Black);

    game.play_auto(token);
    assert_eq!(game.counts().total(), 5);
    assert_eq!(game.active_color(), StoneColor::White);
    assert!(game.pending_auto().is_some());
}

#[test]
fn stale_auto_moves_are_discarded_after_restart() {
    let mut game = Game::new(cpu(StoneColor::Black, 1), cpu(StoneColor::White, 2)).unwrap();
    game.set_advance_mode(AdvanceMode::Deferred);
    game.start();

    let stale = game.pending_auto().unwrap();
    game.restart();
    game.play_auto(stale);

    // The pre-restart token must not land on the new game.
    assert_eq!(game.counts().total(), 4);
    assert_eq!(game.active_color(), StoneColor::Black);

    // A fresh token works.
    let fresh = game.pending_auto().unwrap();
    game.play_auto(fresh);
    assert_eq!(game.counts().total(), 5);
}

#[test]
fn pending_auto_is_none_for_human_turns() {
    let mut game = humans().unwrap();
    game.set_advance_mode(AdvanceMode::Deferred);
    game.start();
    assert!(game.pending_auto().is_none());
}

#[test]
fn terminal_board_is_immutable_until_restart() {
    // One empty cell left; Black fills it and the game ends.
    let board = Board::from_grid(&[
        ".WBBBBBB",
        "WWWWWWWW",
        "BBBBBBBB",
        "WWWWWWWW",
        "BBBBBBBB",
        "WWWWWWWW",
        "BBBBBBBB",
        "WWWWWWWW",
    ]);
    let mut game = Game::from_position(
        board,
        StoneColor::Black,
        Player::human(StoneColor::Black),
        Player::human(StoneColor::White),
    )
    .unwrap();

    game.report_click(pos(0, 0));
    assert!(game.is_over());
    assert!(game.board().is_full());

    let terminal = game.board();
    game.submit_move(pos(0, 0));
    game.report_click(pos(0, 0));
    assert_eq!(game.board(), terminal);
}
