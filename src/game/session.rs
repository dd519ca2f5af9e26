//! Shared game and AI game loop
//!
//! A UI thread and an AI worker both need the same [`ChessGame`]. The game
//! is wrapped in a [`SharedGame`] (`Arc<parking_lot::Mutex<_>>`) and every
//! move is made while holding the lock, so moves are serialized and a
//! pending promotion choice blocks any other move.
//!
//! [`spawn_game_loop`] starts a worker thread that keeps playing AI turns
//! and reports what happened over a channel:
//!
//! ```text
//!   UI thread                         game-loop thread
//!   ─────────                         ────────────────
//!   lock → try_move (human)           lock → play_ai_turn
//!   events.recv() ◄── LoopEvent ───── send
//!   handle.stop() ─── stop ─────────► exits at next poll
//! ```

use crate::game::engine::{AiTurn, ChessGame};
use crate::game::error::MoveRejection;
use crate::game::resources::game_over::{GameOutcome, GameStatus};
use crate::game::resources::history::MoveRecord;
use crate::game::types::Color;
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Game shared between the UI and the game loop
pub type SharedGame = Arc<Mutex<ChessGame>>;

pub fn shared(game: ChessGame) -> SharedGame {
    Arc::new(Mutex::new(game))
}

/// What the game loop observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Moved { record: MoveRecord, status: GameStatus },
    Passed { color: Color },
    Rejected { color: Color, rejection: MoveRejection },
    Finished(GameOutcome),
    /// Stopped after the configured number of plies without a result
    PlyLimitReached { plies: usize },
}

/// Game loop tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLoopConfig {
    /// How long to wait before polling again when it's a human's turn
    pub poll_interval: Duration,
    /// Stop once the history holds this many plies
    pub max_plies: Option<usize>,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
            max_plies: None,
        }
    }
}

/// Owner side of a running game loop
///
/// Dropping the handle also stops the loop, at its next poll.
#[derive(Debug)]
pub struct GameLoopHandle {
    stop_tx: Sender<()>,
    events: Receiver<LoopEvent>,
    thread: Option<JoinHandle<()>>,
}

impl GameLoopHandle {
    pub fn events(&self) -> &Receiver<LoopEvent> {
        &self.events
    }

    /// Ask the loop to exit; it finishes the turn in progress first
    pub fn stop(&self) {
        // Already stopped when the loop has exited
        let _ = self.stop_tx.try_send(());
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the loop thread to exit
    pub fn join(mut self) -> thread::Result<()> {
        match self.thread.take() {
            Some(thread) => thread.join(),
            None => Ok(()),
        }
    }
}

/// Start a worker thread that plays AI turns on `game`
///
/// The loop ends when the game is over or `max_plies` is reached. It also
/// ends after the first [`LoopEvent::Passed`] or [`LoopEvent::Rejected`],
/// on [`GameLoopHandle::stop`], and when the event receiver is dropped.
///
/// # Errors
///
/// Fails only if the OS refuses to spawn the thread.
pub fn spawn_game_loop(game: SharedGame, config: GameLoopConfig) -> std::io::Result<GameLoopHandle> {
    let (stop_tx, stop_rx) = bounded::<()>(1);
    let (event_tx, events) = unbounded::<LoopEvent>();

    let thread = thread::Builder::new()
        .name("game-loop".to_string())
        .spawn(move || run_game_loop(&game, config, &stop_rx, &event_tx))?;

    info!("[SESSION] Game loop started");
    Ok(GameLoopHandle {
        stop_tx,
        events,
        thread: Some(thread),
    })
}

fn run_game_loop(
    game: &SharedGame,
    config: GameLoopConfig,
    stop_rx: &Receiver<()>,
    event_tx: &Sender<LoopEvent>,
) {
    loop {
        let (event, wait, last) = {
            let mut game = game.lock();
            if let GameStatus::GameOver(outcome) = game.status() {
                let _ = event_tx.send(LoopEvent::Finished(outcome));
                info!("[SESSION] Game loop finished: {}", outcome.message());
                return;
            }
            let plies = game.history().len();
            if config.max_plies.is_some_and(|limit| plies >= limit) {
                let _ = event_tx.send(LoopEvent::PlyLimitReached { plies });
                info!("[SESSION] Game loop stopped after {plies} plies");
                return;
            }

            // A pass or a refused move would repeat on every poll, so both end the loop
            let color = game.current_turn();
            match game.play_ai_turn() {
                AiTurn::NotAiTurn => (None, true, false),
                AiTurn::Played(record) => (
                    Some(LoopEvent::Moved {
                        record,
                        status: game.status(),
                    }),
                    false,
                    false,
                ),
                AiTurn::Passed => (Some(LoopEvent::Passed { color }), false, true),
                AiTurn::Rejected(rejection) => {
                    (Some(LoopEvent::Rejected { color, rejection }), false, true)
                }
            }
        };

        if let Some(event) = event {
            if event_tx.send(event).is_err() {
                debug!("[SESSION] Event receiver dropped, stopping game loop");
                return;
            }
        }
        if last {
            info!("[SESSION] Game loop stopped: AI could not move");
            return;
        }

        let stopped = if wait {
            match stop_rx.recv_timeout(config.poll_interval) {
                Err(RecvTimeoutError::Timeout) => false,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            }
        } else {
            !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty))
        };
        if stopped {
            info!("[SESSION] Game loop stopped");
            return;
        }
    }
}
