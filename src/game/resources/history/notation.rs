//! Move notation formatting
//!
//! Long algebraic tokens grouped into numbered pairs:
//!
//! ```text
//! 1. Pe2-e4
//! Pe7-e5
//! 2. Qd1-h5
//! Nb8-c6
//! 3. Qh5xf7+
//! ```
//!
//! Token layout: piece letter, from-cell, `x` or `-`, to-cell, optional
//! `=` + promotion letter, optional `+` when the move gave check. The move
//! number is written only on White's ply.

use super::history::MoveRecord;
use crate::game::types::Color;

/// Format a single move without its number prefix
pub fn move_token(record: &MoveRecord) -> String {
    let mut token = String::with_capacity(10);
    token.push(record.piece.kind.letter());
    token.push_str(&record.from.to_string());
    token.push(if record.is_capture() { 'x' } else { '-' });
    token.push_str(&record.to.to_string());
    if let Some(kind) = record.promotion {
        token.push('=');
        token.push(kind.letter());
    }
    if record.gives_check {
        token.push('+');
    }
    token
}

/// Format a whole move list, one entry per ply
///
/// Full-move numbers count White's plies. A list opening with a Black ply
/// (a game set up with Black to move) starts with `"1... "`.
pub fn format_history(moves: &[MoveRecord]) -> Vec<String> {
    let mut number = 1;
    moves
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let token = move_token(record);
            match record.color() {
                Color::White => format!("{number}. {token}"),
                Color::Black => {
                    let line = if index == 0 {
                        format!("{number}... {token}")
                    } else {
                        token
                    };
                    number += 1;
                    line
                }
            }
        })
        .collect()
}

/// Space-separated movetext, e.g. `1. Pe2-e4 Pe7-e5 2. Ng1-f3`
pub fn movetext(moves: &[MoveRecord]) -> String {
    format_history(moves).join(" ")
}

/// Human readable description of the most recent move
///
/// `"Game started"` before the first move, otherwise for example
/// `"White pawn from e7 to f8 captures rook and promotes to queen"`.
pub fn last_move_summary(moves: &[MoveRecord]) -> String {
    let Some(last) = moves.last() else {
        return "Game started".to_string();
    };

    let mut summary = format!(
        "{} {} from {} to {}",
        last.color(),
        last.piece.kind,
        last.from,
        last.to
    );
    if let Some(captured) = last.captured {
        summary.push_str(&format!(" captures {}", captured.kind));
    }
    if let Some(kind) = last.promotion {
        summary.push_str(&format!(" and promotes to {kind}"));
    }
    summary
}
