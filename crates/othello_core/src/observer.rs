//! Observer protocol toward the rendering/driver layer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::board::Board;
use crate::types::StoneColor;

/// Receives game state changes. Within a single transition the relative
/// order is always `board_updated`, then `turn_changed`, then (on
/// termination) `game_ended`. Delivery is synchronous and every board an
/// observer sees is a snapshot; reading engine state from a callback sees
/// the post-transition state.
pub trait GameObserver {
    fn board_updated(&mut self, _board: &Board) {}

    /// `color` is the side to move next, or the side that was just forced
    /// to pass when a pass chain is being walked.
    fn turn_changed(&mut self, _color: StoneColor) {}

    fn game_ended(&mut self, _board: &Board) {}
}

/// Shared handle observers register through. The engine keeps only a weak
/// reference, so dropping the handle unregisters the observer.
pub type ObserverHandle = Rc<RefCell<dyn GameObserver>>;

pub(crate) type ObserverSlot = Weak<RefCell<dyn GameObserver>>;
