//! Type definitions for chess game logic
//!
//! Value types shared by the rule table, the board and the engine:
//!
//! - [`Cell`] - an on-board square, `row` 1..=N and `col` letter `'a'`..
//! - [`Coordinate`] - an unchecked (file, row) pair emitted by move generators
//! - [`Color`], [`PieceKind`], [`Piece`] - piece identity

use crate::game::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest supported board edge (files `a`..=`z`)
pub const MAX_BOARD_SIZE: u8 = 26;

/// Board square identified by (row, column)
///
/// Rows count from 1 (White's back rank on a standard board), columns are
/// letters starting at `'a'`. Serializes as algebraic text (`"e4"`) so it can
/// be used as a JSON map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Cell {
    pub row: u8,
    pub col: char,
}

impl Cell {
    /// Create a cell from a row number and column letter
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let e4 = Cell::new(4, 'e');
    /// assert_eq!(e4.to_string(), "e4");
    /// ```
    pub const fn new(row: u8, col: char) -> Self {
        Cell { row, col }
    }

    /// Zero-based file index (`'a'` = 0)
    pub fn file(self) -> i16 {
        self.col as i16 - 'a' as i16
    }

    /// Unchecked coordinate of this cell
    pub fn coordinate(self) -> Coordinate {
        Coordinate::new(self.file(), self.row as i16)
    }

    /// Coordinate reached by stepping `(d_file, d_row)` from this cell
    pub fn offset(self, d_file: i16, d_row: i16) -> Coordinate {
        Coordinate::new(self.file() + d_file, self.row as i16 + d_row)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}

impl FromStr for Cell {
    type Err = GameError;

    /// Parse algebraic notation (`"e4"`, `"h10"` on larger boards)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidCell { text: s.to_string() };
        let mut chars = s.chars();
        let col = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        if !col.is_ascii_lowercase() {
            return Err(invalid());
        }
        let row: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(Cell { row, col })
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.to_string()
    }
}

impl TryFrom<String> for Cell {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Candidate destination produced by a move generator
///
/// May lie outside the board; [`crate::game::rules::Board`] resolves
/// coordinates to cells and drops the ones that are off-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Zero-based file (`'a'` = 0)
    pub file: i16,
    /// One-based row
    pub row: i16,
}

impl Coordinate {
    pub const fn new(file: i16, row: i16) -> Self {
        Coordinate { file, row }
    }

    /// Resolve to a cell on a `size`×`size` board
    pub fn to_cell(self, size: u8) -> Option<Cell> {
        let size = size as i16;
        if (0..size).contains(&self.file) && (1..=size).contains(&self.row) {
            Some(Cell::new(self.row as u8, (b'a' + self.file as u8) as char))
        } else {
            None
        }
    }
}

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction pawns of this color advance in
    pub fn forward(self) -> i16 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row a pawn of this color promotes on
    pub fn promotion_row(self, size: u8) -> u8 {
        match self {
            Color::White => size,
            Color::Black => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chess piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to
    pub const PROMOTION_TARGETS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Notation letter; pawns are written `P`
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Material value in pawns
    ///
    /// The king has no material value; losing it ends the game.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTION_TARGETS.contains(&self)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Board-allocated piece identity
///
/// Two pieces of the same kind and color are still different pieces; the
/// board's reverse index is keyed by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// A piece on (or captured from) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    /// Successful moves made by this piece; gates the pawn double step
    pub move_count: u32,
    pub promoted_from_pawn: bool,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Piece {
            id,
            kind,
            color,
            move_count: 0,
            promoted_from_pawn: false,
        }
    }

    pub fn has_moved(&self) -> bool {
        self.move_count > 0
    }

    /// Single-character symbol, uppercase for White
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}
