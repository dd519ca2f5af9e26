//! Chess piece movement rules
//!
//! The movement rule table: for every [`PieceKind`] a pseudo-move generator
//! and a legality check against a board. Pure functions with no side effects.
//!
//! Generators ignore the board edge and any blocking that is not intrinsic
//! to the piece's shape; [`Board::movement_options`] drops off-board
//! coordinates and then asks [`is_legal`] about each remaining target.

use super::board_state::Board;
use crate::game::types::{Cell, Coordinate, Piece, PieceKind};

const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

const KING_OFFSETS: [(i16, i16); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const ROOK_DIRECTIONS: [(i16, i16); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i16, i16); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const QUEEN_DIRECTIONS: [(i16, i16); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Ray directions `(d_file, d_row)` of a sliding piece; empty for the others
pub fn ray_directions(kind: PieceKind) -> &'static [(i16, i16)] {
    match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
    }
}

/// Candidate destinations for `piece` standing on `cell`
///
/// Sliding rays are cast `extent` steps, which is enough to cross a board of
/// that size from any square. The result may contain off-board coordinates.
pub fn pseudo_moves(cell: Cell, piece: &Piece, extent: u8) -> Vec<Coordinate> {
    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.color.forward();
            let mut moves = vec![cell.offset(0, forward)];
            if !piece.has_moved() {
                moves.push(cell.offset(0, 2 * forward));
            }
            moves.push(cell.offset(-1, forward));
            moves.push(cell.offset(1, forward));
            moves
        }
        PieceKind::Knight => offsets_from(cell, &KNIGHT_OFFSETS),
        PieceKind::King => offsets_from(cell, &KING_OFFSETS),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            let directions = ray_directions(piece.kind);
            let mut moves = Vec::with_capacity(directions.len() * extent as usize);
            for &(d_file, d_row) in directions {
                for step in 1..=extent as i16 {
                    moves.push(cell.offset(d_file * step, d_row * step));
                }
            }
            moves
        }
    }
}

fn offsets_from(cell: Cell, offsets: &[(i16, i16)]) -> Vec<Coordinate> {
    offsets
        .iter()
        .map(|&(d_file, d_row)| cell.offset(d_file, d_row))
        .collect()
}

/// Check if the piece on `from` may move to `to` on this board
///
/// Considers occupancy, blocking and capture color. Does not consider
/// whether the move exposes the mover's king.
pub fn is_legal(board: &Board, from: Cell, to: Cell) -> bool {
    // Can't move to the same square
    if from == to {
        return false;
    }

    if !board.contains(to) {
        return false;
    }

    let Some(piece) = board.piece_at(from) else {
        return false;
    };

    // Can't capture your own pieces
    if board.color_at(to) == Some(piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => is_valid_pawn_move(board, piece, from, to),
        PieceKind::Knight => is_valid_knight_move(from, to),
        PieceKind::King => is_valid_king_move(from, to),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            is_clear_ray(board, from, to, ray_directions(piece.kind))
        }
    }
}

fn deltas(from: Cell, to: Cell) -> (i16, i16) {
    (to.file() - from.file(), to.row as i16 - from.row as i16)
}

fn is_valid_pawn_move(board: &Board, pawn: &Piece, from: Cell, to: Cell) -> bool {
    let forward = pawn.color.forward();
    let (d_file, d_row) = deltas(from, to);

    // Forward move
    if d_file == 0 && d_row == forward {
        return board.is_empty(to);
    }

    // Double move from starting position
    if d_file == 0 && d_row == 2 * forward && !pawn.has_moved() {
        let intermediate = from.offset(0, forward).to_cell(board.size());
        return intermediate.is_some_and(|cell| board.is_empty(cell)) && board.is_empty(to);
    }

    // Capture diagonally; friendly targets were already excluded
    if d_file.abs() == 1 && d_row == forward {
        return !board.is_empty(to);
    }

    false
}

fn is_valid_knight_move(from: Cell, to: Cell) -> bool {
    let (d_file, d_row) = deltas(from, to);
    let (d_file, d_row) = (d_file.abs(), d_row.abs());
    (d_file == 2 && d_row == 1) || (d_file == 1 && d_row == 2)
}

fn is_valid_king_move(from: Cell, to: Cell) -> bool {
    let (d_file, d_row) = deltas(from, to);
    d_file.abs() <= 1 && d_row.abs() <= 1
}

/// Shared validator of the sliding pieces
///
/// `to` must lie on one of `directions` from `from`, every square strictly
/// between them must be empty, and `to` itself must be empty or hold an
/// enemy piece (checked by the caller).
fn is_clear_ray(board: &Board, from: Cell, to: Cell, directions: &[(i16, i16)]) -> bool {
    let (d_file, d_row) = deltas(from, to);

    // Must be a straight line: same file, same row or a true diagonal
    if d_file != 0 && d_row != 0 && d_file.abs() != d_row.abs() {
        return false;
    }

    let step = (d_file.signum(), d_row.signum());
    if !directions.contains(&step) {
        return false;
    }

    let distance = d_file.abs().max(d_row.abs());
    for n in 1..distance {
        let Some(cell) = from.offset(step.0 * n, step.1 * n).to_cell(board.size()) else {
            return false;
        };
        if !board.is_empty(cell) {
            return false;
        }
    }

    true
}
