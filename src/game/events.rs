//! Move notification
//!
//! Listeners subscribed through `ChessGame::subscribe_on_move` are called
//! after every accepted move, once the record is final (promotion applied,
//! check flag set, game-over status decided). They run synchronously on the
//! thread that made the move, in subscription order.

use crate::game::resources::game_over::GameStatus;
use crate::game::resources::history::MoveRecord;

/// Handle returned by `subscribe_on_move`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Payload delivered to move listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvent {
    pub record: MoveRecord,
    /// Status after the move; `GameOver` for the final move of a game
    pub status: GameStatus,
    /// One-based ply index of this move
    pub ply: usize,
}

type Listener = Box<dyn FnMut(&MoveEvent) + Send>;

/// Ordered set of move listeners
#[derive(Default)]
pub struct MoveListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl MoveListeners {
    pub fn subscribe(&mut self, listener: impl FnMut(&MoveEvent) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false when the id is unknown
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, event: &MoveEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for MoveListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
