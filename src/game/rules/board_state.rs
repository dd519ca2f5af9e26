//! Board state representation
//!
//! [`Board`] owns square occupancy for one game. It keeps two indices:
//!
//! - cell → optional piece, with exactly one entry per on-board cell
//! - piece id → cell, for every piece still on the board
//!
//! Both are private and every mutator updates them together, so they can't
//! drift apart. Mutators are mechanical: rule checking happens in
//! [`super::piece_moves`] and in the engine one layer up.

use super::piece_moves::{is_legal, pseudo_moves};
use crate::game::error::{GameError, GameResult};
use crate::game::resources::history::MoveRecord;
use crate::game::types::{Cell, Color, Piece, PieceId, PieceKind, MAX_BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Standard back rank from file `a` to file `h`
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Square occupancy of an N×N board
#[derive(Debug, Clone)]
pub struct Board {
    size: u8,
    squares: BTreeMap<Cell, Option<Piece>>,
    locations: BTreeMap<PieceId, Cell>,
    next_id: u32,
}

impl Board {
    /// Create an empty `size`×`size` board
    ///
    /// # Errors
    ///
    /// [`GameError::UnsupportedBoardSize`] unless `1 <= size <= 26`.
    pub fn empty(size: u8) -> GameResult<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GameError::UnsupportedBoardSize { size });
        }
        Ok(Board::with_size(size))
    }

    fn with_size(size: u8) -> Self {
        let mut squares = BTreeMap::new();
        for row in 1..=size {
            for file in 0..size {
                squares.insert(Cell::new(row, (b'a' + file) as char), None);
            }
        }

        Board {
            size,
            squares,
            locations: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Standard 8×8 initial position
    pub fn standard() -> Self {
        let mut board = Board::with_size(8);
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let col = (b'a' + file as u8) as char;
            board.spawn(Cell::new(1, col), *kind, Color::White);
            board.spawn(Cell::new(2, col), PieceKind::Pawn, Color::White);
            board.spawn(Cell::new(7, col), PieceKind::Pawn, Color::Black);
            board.spawn(Cell::new(8, col), *kind, Color::Black);
        }

        board
    }

    /// Put a new piece on an empty square (position setup)
    ///
    /// # Errors
    ///
    /// [`GameError::CellOffBoard`] or [`GameError::SquareOccupied`].
    pub fn place(&mut self, cell: Cell, kind: PieceKind, color: Color) -> GameResult<PieceId> {
        self.ensure_on_board(cell)?;
        if !self.is_empty(cell) {
            return Err(GameError::SquareOccupied { cell });
        }
        Ok(self.spawn(cell, kind, color))
    }

    /// Take a piece off the board (position setup)
    pub fn remove(&mut self, cell: Cell) -> GameResult<Option<Piece>> {
        self.ensure_on_board(cell)?;
        let removed = self.squares.get_mut(&cell).and_then(Option::take);
        if let Some(piece) = removed {
            self.locations.remove(&piece.id);
        }
        Ok(removed)
    }

    fn spawn(&mut self, cell: Cell, kind: PieceKind, color: Color) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.squares.insert(cell, Some(Piece::new(id, kind, color)));
        self.locations.insert(id, cell);
        id
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.squares.contains_key(&cell)
    }

    fn ensure_on_board(&self, cell: Cell) -> GameResult<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GameError::CellOffBoard {
                cell,
                size: self.size,
            })
        }
    }

    pub fn piece_at(&self, cell: Cell) -> Option<&Piece> {
        self.squares.get(&cell).and_then(Option::as_ref)
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.piece_at(cell).is_none()
    }

    pub fn color_at(&self, cell: Cell) -> Option<Color> {
        self.piece_at(cell).map(|piece| piece.color)
    }

    /// Cell currently holding the piece with this id
    pub fn cell_of(&self, id: PieceId) -> Option<Cell> {
        self.locations.get(&id).copied()
    }

    /// Every on-board cell, row by row from `a1`
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.squares.keys().copied()
    }

    /// Occupied squares in cell order
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, &Piece)> + '_ {
        self.squares
            .iter()
            .filter_map(|(cell, piece)| piece.as_ref().map(|piece| (*cell, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> Vec<(Cell, Piece)> {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(cell, piece)| (cell, *piece))
            .collect()
    }

    pub fn find_king(&self, color: Color) -> Option<Cell> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(cell, _)| cell)
    }

    /// Cells `piece` may move to from `cell`, ignoring check
    ///
    /// Runs the piece's generator, drops off-board candidates and keeps the
    /// targets the rule table accepts. Never mutates the board.
    pub fn movement_options(&self, cell: Cell, piece: &Piece) -> Vec<Cell> {
        pseudo_moves(cell, piece, self.size)
            .into_iter()
            .filter_map(|coordinate| coordinate.to_cell(self.size))
            .filter(|target| is_legal(self, cell, *target))
            .collect()
    }

    /// Mechanically apply a move
    ///
    /// Relocates the piece on `from` to `to`, overwriting any occupant, and
    /// bumps its move count. The overwritten occupant is reported as the
    /// captured piece. No legality checks are made here.
    ///
    /// # Errors
    ///
    /// [`GameError::CellOffBoard`] for either cell, [`GameError::EmptySquare`]
    /// when `from` is empty.
    pub fn execute_move(&mut self, from: Cell, to: Cell) -> GameResult<MoveRecord> {
        self.ensure_on_board(from)?;
        self.ensure_on_board(to)?;
        let piece = *self
            .piece_at(from)
            .ok_or(GameError::EmptySquare { cell: from })?;

        let captured = self.relocate(from, to);
        if let Some(Some(moved)) = self.squares.get_mut(&to) {
            moved.move_count += 1;
        }
        debug_assert!(self.is_consistent());

        debug!(
            "[BOARD] {} {} {} -> {}{}",
            piece.color,
            piece.kind,
            from,
            to,
            captured
                .map(|c| format!(" (captures {})", c.kind))
                .unwrap_or_default()
        );

        let mut record = MoveRecord::new(from, to, piece);
        record.captured = captured;
        Ok(record)
    }

    /// Scratch copy with the piece on `from` moved to `to`
    ///
    /// Used to simulate candidate moves; the move count is left untouched.
    /// Off-board cells or an empty `from` produce an unchanged copy.
    pub fn with_trial_move(&self, from: Cell, to: Cell) -> Board {
        let mut trial = self.clone();
        if self.contains(to) && !self.is_empty(from) {
            trial.relocate(from, to);
        }
        trial
    }

    /// Moves whatever is on `from` to `to`, returning the overwritten occupant
    fn relocate(&mut self, from: Cell, to: Cell) -> Option<Piece> {
        let moving = self.squares.get_mut(&from).and_then(Option::take)?;
        let captured = self
            .squares
            .insert(to, Some(moving))
            .flatten();
        if let Some(captured) = captured {
            self.locations.remove(&captured.id);
        }
        self.locations.insert(moving.id, to);
        captured
    }

    /// Replace the pawn on `cell` with a new piece of `kind`
    ///
    /// The new piece gets a fresh id, keeps the pawn's color and move count
    /// and is flagged as promoted.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptySquare`], [`GameError::NotAPawn`] or
    /// [`GameError::InvalidPromotion`] (pawn or king targets).
    pub fn promote(&mut self, cell: Cell, kind: PieceKind) -> GameResult<Piece> {
        self.ensure_on_board(cell)?;
        let pawn = *self
            .piece_at(cell)
            .ok_or(GameError::EmptySquare { cell })?;
        if pawn.kind != PieceKind::Pawn {
            return Err(GameError::NotAPawn {
                cell,
                kind: pawn.kind,
            });
        }
        if !kind.is_promotion_target() {
            return Err(GameError::InvalidPromotion { kind });
        }

        let id = PieceId(self.next_id);
        self.next_id += 1;
        let promoted = Piece {
            id,
            kind,
            color: pawn.color,
            move_count: pawn.move_count,
            promoted_from_pawn: true,
        };

        self.locations.remove(&pawn.id);
        self.locations.insert(id, cell);
        self.squares.insert(cell, Some(promoted));
        debug_assert!(self.is_consistent());

        Ok(promoted)
    }

    /// Read-only copy of the current occupancy
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size,
            squares: self.squares.clone(),
        }
    }

    /// Verify that both indices describe the same position
    pub fn is_consistent(&self) -> bool {
        let expected_cells = self.size as usize * self.size as usize;
        if self.squares.len() != expected_cells {
            return false;
        }

        let occupied: Vec<(Cell, &Piece)> = self.pieces().collect();
        occupied.len() == self.locations.len()
            && occupied
                .iter()
                .all(|(cell, piece)| self.locations.get(&piece.id) == Some(cell))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

/// Read-only projection of a board's occupancy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: u8,
    pub squares: BTreeMap<Cell, Option<Piece>>,
}

impl BoardSnapshot {
    pub fn get(&self, cell: Cell) -> Option<&Piece> {
        self.squares.get(&cell).and_then(Option::as_ref)
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Cell, &Piece)> + '_ {
        self.squares
            .iter()
            .filter_map(|(cell, piece)| piece.as_ref().map(|piece| (*cell, piece)))
    }
}

impl fmt::Display for BoardSnapshot {
    /// Text diagram with the highest row on top, `.` for empty squares
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.size).rev() {
            write!(f, "{row:>2} ")?;
            for file in 0..self.size {
                let cell = Cell::new(row, (b'a' + file) as char);
                let symbol = self.get(cell).map_or('.', Piece::symbol);
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for file in 0..self.size {
            write!(f, " {}", (b'a' + file) as char)?;
        }
        writeln!(f)
    }
}
