//! Chess game engine
//!
//! [`ChessGame`] owns everything that changes during a game: the board, the
//! two players, the status, the move history and the move listeners. It is
//! the single entry point for moves, human or AI.
//!
//! # Move pipeline
//!
//! ```text
//! try_move(from, to, requester)
//!   ├─ game over?              → MoveRejection::GameOver
//!   ├─ requester to move?      → MoveRejection::WrongTurn
//!   ├─ own piece on `from`?    → MoveRejection::NoPiece / NotYourPiece
//!   ├─ `to` in move options?   → MoveRejection::IllegalTarget
//!   ├─ own king safe after?    → MoveRejection::SelfCheck   (scratch board)
//!   ├─ execute, credit capture
//!   ├─ promote pawn on the last row
//!   ├─ check / checkmate / stalemate for the opponent
//!   └─ record, notify listeners, flip turn
//! ```
//!
//! Rejections happen before anything is touched, so a rejected move leaves
//! the game exactly as it was. Check and checkmate detection simulate moves
//! on clones produced by [`Board::with_trial_move`]; the live board is only
//! mutated by the accepted move itself.

use crate::game::ai::CandidateMove;
use crate::game::components::GameState;
use crate::game::error::{GameError, GameResult, MoveRejection};
use crate::game::events::{ListenerId, MoveEvent, MoveListeners};
use crate::game::resources::game_over::{GameOutcome, GameStatus};
use crate::game::resources::history::{self, MoveHistory, MoveRecord};
use crate::game::resources::player::{is_promotion_move, Player, PromotionChooser};
use crate::game::rules::Board;
use crate::game::types::{Cell, Color, Piece, PieceKind};
use tracing::{debug, error, info, warn};

/// Result of asking the side to move to play an AI turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTurn {
    /// Game over, or the side to move is human
    NotAiTurn,
    /// The policy declined to pick a move
    Passed,
    Played(MoveRecord),
    /// The policy picked a move the rules refused
    Rejected(MoveRejection),
}

/// A game of chess between two players
pub struct ChessGame {
    board: Board,
    /// Indexed by [`slot`]: White first
    players: [Player; 2],
    /// Side to move; stays on the mover once the game is over
    turn: Color,
    status: GameStatus,
    history: MoveHistory,
    listeners: MoveListeners,
    promotion_chooser: Option<Box<dyn PromotionChooser>>,
    default_promotion: PieceKind,
}

fn slot(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

/// Whether `color`'s king is attacked on `board`
///
/// A side without a king is never in check; [`ChessGame::with_board`] only
/// accepts positions with one king per side.
fn king_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.find_king(color) else {
        return false;
    };
    board
        .pieces_of(color.opponent())
        .iter()
        .any(|(cell, piece)| board.movement_options(*cell, piece).contains(&king))
}

/// Movement options of the piece on `from` that keep its own king safe
fn safe_targets(board: &Board, from: Cell) -> Vec<Cell> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    board
        .movement_options(from, piece)
        .into_iter()
        .filter(|to| !king_in_check(&board.with_trial_move(from, *to), piece.color))
        .collect()
}

/// Whether `color` has at least one move that leaves its king safe
fn has_safe_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .iter()
        .any(|(cell, _)| !safe_targets(board, *cell).is_empty())
}

/// Status for `color` to move on `board`
fn status_for(board: &Board, color: Color) -> GameStatus {
    if has_safe_move(board, color) {
        GameStatus::ToMove(color)
    } else if king_in_check(board, color) {
        GameStatus::GameOver(GameOutcome::Checkmate {
            winner: color.opponent(),
        })
    } else {
        GameStatus::GameOver(GameOutcome::Stalemate)
    }
}

/// Reject positions no legal game can reach
fn check_position(board: &Board, side_to_move: Color) -> GameResult<()> {
    for color in Color::ALL {
        let kings = board
            .pieces_of(color)
            .iter()
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(GameError::InvalidConfiguration {
                message: format!("{color} has {kings} kings"),
            });
        }
    }
    let waiting = side_to_move.opponent();
    if king_in_check(board, waiting) {
        return Err(GameError::InvalidConfiguration {
            message: format!("{waiting} is in check but {side_to_move} is to move"),
        });
    }
    Ok(())
}

impl ChessGame {
    /// Start a game on the standard board with White to move
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] when both players have the same
    /// color.
    pub fn new(players: [Player; 2]) -> GameResult<Self> {
        Self::with_board(players, Board::standard(), Color::White)
    }

    /// Start a game from a custom position
    ///
    /// If `side_to_move` has no legal move in the given position the game
    /// starts already finished.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] when both players have the same
    /// color, when either side does not have exactly one king, or when the
    /// side not to move is already in check.
    pub fn with_board(players: [Player; 2], board: Board, side_to_move: Color) -> GameResult<Self> {
        let [first, second] = players;
        if first.color() == second.color() {
            return Err(GameError::InvalidConfiguration {
                message: format!("both players are {}", first.color()),
            });
        }
        let players = if first.color() == Color::White {
            [first, second]
        } else {
            [second, first]
        };
        check_position(&board, side_to_move)?;

        let status = status_for(&board, side_to_move);
        if let GameStatus::GameOver(outcome) = status {
            info!("[ENGINE] Game starts finished: {}", outcome.message());
        }

        Ok(ChessGame {
            board,
            players,
            turn: side_to_move,
            status,
            history: MoveHistory::default(),
            listeners: MoveListeners::default(),
            promotion_chooser: None,
            default_promotion: PieceKind::Queen,
        })
    }

    /// Two human players named after their colors
    pub fn two_humans() -> Self {
        ChessGame {
            board: Board::standard(),
            players: [
                Player::human("White", Color::White),
                Player::human("Black", Color::Black),
            ],
            turn: Color::White,
            status: GameStatus::default(),
            history: MoveHistory::default(),
            listeners: MoveListeners::default(),
            promotion_chooser: None,
            default_promotion: PieceKind::Queen,
        }
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    /// Attempt a move for `requester`
    ///
    /// Pawns reaching the last row promote to whatever the promotion
    /// chooser picks, or to the default piece.
    pub fn try_move(
        &mut self,
        from: Cell,
        to: Cell,
        requester: Color,
    ) -> Result<MoveRecord, MoveRejection> {
        self.make_move(from, to, requester, None)
    }

    /// Like [`Self::try_move`] with an explicit promotion choice
    ///
    /// The choice only matters when the move promotes; a kind a pawn can't
    /// become falls back to the chooser and then the default.
    pub fn try_move_with_promotion(
        &mut self,
        from: Cell,
        to: Cell,
        requester: Color,
        promotion: PieceKind,
    ) -> Result<MoveRecord, MoveRejection> {
        self.make_move(from, to, requester, Some(promotion))
    }

    /// [`Self::try_move`] flattened to whether the move was accepted
    pub fn attempt_move(&mut self, from: Cell, to: Cell, requester: Color) -> bool {
        self.try_move(from, to, requester).is_ok()
    }

    fn make_move(
        &mut self,
        from: Cell,
        to: Cell,
        requester: Color,
        promotion: Option<PieceKind>,
    ) -> Result<MoveRecord, MoveRejection> {
        let result = self.validate(from, to, requester);
        if let Err(rejection) = result {
            debug!("[ENGINE] Rejected {from}-{to} for {requester}: {rejection}");
            return Err(rejection);
        }

        let mut record = self.board.execute_move(from, to).map_err(|err| {
            error!("[ENGINE] Validated move {from}-{to} failed to execute: {err}");
            MoveRejection::IllegalTarget { from, to }
        })?;

        if let Some(captured) = record.captured {
            self.players[slot(requester)].credit_capture(captured);
        }

        if is_promotion_move(record.piece.kind, requester, to.row, self.board.size()) {
            let kind = self.resolve_promotion(requester, to, promotion);
            match self.board.promote(to, kind) {
                Ok(promoted) => {
                    debug!("[PROMOTION] {requester} pawn on {to} becomes {}", promoted.kind);
                    record.promotion = Some(promoted.kind);
                }
                Err(err) => error!("[PROMOTION] Promotion on {to} failed: {err}"),
            }
        }

        let opponent = requester.opponent();
        record.gives_check = king_in_check(&self.board, opponent);
        self.status = status_for(&self.board, opponent);
        self.history.add_move(record);

        match self.status {
            GameStatus::ToMove(next) => self.turn = next,
            GameStatus::GameOver(outcome) => info!("[ENGINE] Game over: {}", outcome.message()),
        }
        debug!(
            "[ENGINE] Accepted {} ({})",
            history::move_token(&record),
            self.status
        );

        let event = MoveEvent {
            record,
            status: self.status,
            ply: self.history.len(),
        };
        self.listeners.notify(&event);

        Ok(record)
    }

    /// All rejection checks, without touching the game
    fn validate(&self, from: Cell, to: Cell, requester: Color) -> Result<(), MoveRejection> {
        let side = self.status.side_to_move().ok_or(MoveRejection::GameOver)?;
        if requester != side {
            return Err(MoveRejection::WrongTurn { requester });
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or(MoveRejection::NoPiece { cell: from })?;
        if piece.color != requester {
            return Err(MoveRejection::NotYourPiece { cell: from });
        }

        if !self.board.movement_options(from, piece).contains(&to) {
            return Err(MoveRejection::IllegalTarget { from, to });
        }

        if king_in_check(&self.board.with_trial_move(from, to), requester) {
            return Err(MoveRejection::SelfCheck { from, to });
        }

        Ok(())
    }

    /// Explicit choice, then the chooser, then the default
    fn resolve_promotion(&mut self, color: Color, cell: Cell, explicit: Option<PieceKind>) -> PieceKind {
        if let Some(kind) = explicit {
            if kind.is_promotion_target() {
                return kind;
            }
            warn!("[PROMOTION] Cannot promote to {kind}, asking the chooser instead");
        }

        let Some(chooser) = self.promotion_chooser.as_mut() else {
            return self.default_promotion;
        };
        match chooser.choose(color, cell) {
            Some(kind) if kind.is_promotion_target() => kind,
            Some(kind) => {
                warn!(
                    "[PROMOTION] Chooser picked {kind}, using {} instead",
                    self.default_promotion
                );
                self.default_promotion
            }
            None => self.default_promotion,
        }
    }

    /// Let the side to move play if it is an AI
    ///
    /// The policy's choice goes through [`Self::try_move`] like any human
    /// move.
    pub fn play_ai_turn(&mut self) -> AiTurn {
        let Some(side) = self.status.side_to_move() else {
            return AiTurn::NotAiTurn;
        };
        if self.players[slot(side)].is_human() {
            return AiTurn::NotAiTurn;
        }

        let candidates = self.legal_moves(side);
        let state = self.state();
        let player = &mut self.players[slot(side)];
        let Some((from, to)) = player.take_turn(&state, &candidates) else {
            warn!("[AI] {} passed with {} candidates", player.name, candidates.len());
            return AiTurn::Passed;
        };
        debug!("[AI] {} chose {from}-{to}", player.name);

        match self.try_move(from, to, side) {
            Ok(record) => AiTurn::Played(record),
            Err(rejection) => {
                warn!("[AI] Move {from}-{to} refused: {rejection}");
                AiTurn::Rejected(rejection)
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Side to move, or the side that made the final move once it's over
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn winner(&self) -> Option<Color> {
        self.status.winner()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[slot(color)]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Snapshot of board, status and moves
    pub fn state(&self) -> GameState {
        GameState {
            board: self.board.snapshot(),
            status: self.status,
            history: self.history.as_slice().to_vec(),
        }
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        king_in_check(&self.board, color)
    }

    /// In check with no move that escapes it
    pub fn is_checkmate(&self, color: Color) -> bool {
        king_in_check(&self.board, color) && !has_safe_move(&self.board, color)
    }

    /// Not in check but without any legal move
    pub fn is_stalemate(&self, color: Color) -> bool {
        !king_in_check(&self.board, color) && !has_safe_move(&self.board, color)
    }

    /// Cells the piece on `from` may move to without exposing its king
    ///
    /// Empty for an empty square. Works for either color regardless of
    /// whose turn it is, for move highlighting.
    pub fn legal_targets(&self, from: Cell) -> Vec<Cell> {
        safe_targets(&self.board, from)
    }

    /// Legal targets of the piece on `from` that hold an enemy piece
    pub fn potential_captures(&self, from: Cell) -> Vec<Cell> {
        let Some(color) = self.board.color_at(from) else {
            return Vec::new();
        };
        self.legal_targets(from)
            .into_iter()
            .filter(|to| self.board.color_at(*to) == Some(color.opponent()))
            .collect()
    }

    /// Every legal move for `color` with its consequences
    pub fn legal_moves(&self, color: Color) -> Vec<CandidateMove> {
        let size = self.board.size();
        let mut moves = Vec::new();
        for (from, piece) in self.board.pieces_of(color) {
            for to in self.board.movement_options(from, &piece) {
                let trial = self.board.with_trial_move(from, to);
                if king_in_check(&trial, color) {
                    continue;
                }
                moves.push(CandidateMove {
                    from,
                    to,
                    piece,
                    captured: self.board.piece_at(to).copied(),
                    gives_check: king_in_check(&trial, color.opponent()),
                    promotes: is_promotion_move(piece.kind, color, to.row, size),
                });
            }
        }
        moves
    }

    /// Pieces `color` still has on the board
    pub fn pieces_for(&self, color: Color) -> Vec<(Cell, Piece)> {
        self.board.pieces_of(color)
    }

    /// Numbered notation, one entry per ply (`"1. Pe2-e4"`, `"Pe7-e5"`)
    pub fn formatted_history(&self) -> Vec<String> {
        history::format_history(self.history.as_slice())
    }

    pub fn last_move_summary(&self) -> String {
        history::last_move_summary(self.history.as_slice())
    }

    /// Movetext on one line, `"1. Pe2-e4 Pe7-e5"`
    pub fn pgn_movetext(&self) -> String {
        history::movetext(self.history.as_slice())
    }

    // ------------------------------------------------------------------
    // Collaborators
    // ------------------------------------------------------------------

    pub fn subscribe_on_move(
        &mut self,
        listener: impl FnMut(&MoveEvent) + Send + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn set_promotion_chooser(&mut self, chooser: impl PromotionChooser + 'static) {
        self.promotion_chooser = Some(Box::new(chooser));
    }

    pub fn clear_promotion_chooser(&mut self) {
        self.promotion_chooser = None;
    }

    pub fn default_promotion(&self) -> PieceKind {
        self.default_promotion
    }

    /// Piece used when no valid promotion choice is made
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPromotion`] for pawns and kings.
    pub fn set_default_promotion(&mut self, kind: PieceKind) -> GameResult<()> {
        if !kind.is_promotion_target() {
            return Err(GameError::InvalidPromotion { kind });
        }
        self.default_promotion = kind;
        Ok(())
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame::two_humans()
    }
}

impl std::fmt::Debug for ChessGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChessGame")
            .field("players", &self.players)
            .field("turn", &self.turn)
            .field("status", &self.status)
            .field("moves", &self.history.len())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
