//! Rules Engine Benchmarks
//!
//! Performance benchmarks for move generation and check detection using
//! Criterion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tabletop_chess::game::ai::material_balance;
use tabletop_chess::game::rules::Board;
use tabletop_chess::game::{Cell, ChessGame, Color};

fn cell(text: &str) -> Cell {
    text.parse().unwrap()
}

/// Position after 1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5
fn italian_game() -> ChessGame {
    let mut game = ChessGame::two_humans();
    for (from, to) in [
        ("e2", "e4"),
        ("e7", "e5"),
        ("g1", "f3"),
        ("b8", "c6"),
        ("f1", "c4"),
        ("f8", "c5"),
    ] {
        let side = game.current_turn();
        game.try_move(cell(from), cell(to), side).unwrap();
    }
    game
}

fn bench_standard_board(c: &mut Criterion) {
    c.bench_function("standard_board", |b| b.iter(|| black_box(Board::standard())));
}

fn bench_movement_options_starting(c: &mut Criterion) {
    let board = Board::standard();

    c.bench_function("movement_options_starting_position", |b| {
        b.iter(|| {
            let total: usize = board
                .pieces_of(Color::White)
                .iter()
                .map(|(cell, piece)| board.movement_options(*cell, piece).len())
                .sum();
            black_box(total)
        })
    });
}

fn bench_legal_moves_both_colors(c: &mut Criterion) {
    let game = italian_game();

    c.bench_function("legal_moves_both_colors", |b| {
        b.iter(|| {
            let white = game.legal_moves(Color::White);
            let black = game.legal_moves(Color::Black);
            black_box((white.len(), black.len()))
        })
    });
}

fn bench_check_detection(c: &mut Criterion) {
    let game = italian_game();

    c.bench_function("is_king_in_check", |b| {
        b.iter(|| black_box(game.is_king_in_check(Color::Black)))
    });
    c.bench_function("is_checkmate", |b| {
        b.iter(|| black_box(game.is_checkmate(Color::Black)))
    });
}

fn bench_full_move_cycle(c: &mut Criterion) {
    c.bench_function("full_move_cycle", |b| {
        b.iter(|| {
            let mut game = ChessGame::two_humans();
            let record = game.try_move(cell("e2"), cell("e4"), Color::White);
            let balance = material_balance(&game.board().snapshot(), Color::White);
            black_box((record.is_ok(), balance))
        })
    });
}

criterion_group!(
    benches,
    bench_standard_board,
    bench_movement_options_starting,
    bench_legal_moves_both_colors,
    bench_check_detection,
    bench_full_move_cycle,
);
criterion_main!(benches);
