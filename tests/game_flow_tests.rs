//! Game Flow Integration Tests
//!
//! Tests for full game flows including:
//! - Turn alternation
//! - Move rejection and idempotence
//! - Check, checkmate and stalemate
//! - Promotion
//! - History, notation and listeners

use std::sync::{Arc, Mutex};
use tabletop_chess::game::events::MoveEvent;
use tabletop_chess::game::resources::game_over::{GameOutcome, GameStatus};
use tabletop_chess::game::resources::player::{FixedPromotion, Player};
use tabletop_chess::game::rules::Board;
use tabletop_chess::game::{Cell, ChessGame, Color, GameError, MoveRejection, PieceKind};

fn cell(text: &str) -> Cell {
    text.parse().unwrap()
}

/// Play `from-to` pairs for whichever side is to move, panicking on rejection
fn play(game: &mut ChessGame, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        let side = game.current_turn();
        if let Err(rejection) = game.try_move(cell(from), cell(to), side) {
            panic!("{from}-{to} for {side} rejected: {rejection}");
        }
    }
}

fn humans() -> [Player; 2] {
    [
        Player::human("White", Color::White),
        Player::human("Black", Color::Black),
    ]
}

fn custom_game(pieces: &[(PieceKind, Color, &str)], side_to_move: Color) -> ChessGame {
    let mut board = Board::empty(8).unwrap();
    for &(kind, color, at) in pieces {
        board.place(cell(at), kind, color).unwrap();
    }
    ChessGame::with_board(humans(), board, side_to_move).unwrap()
}

// ============================================================================
// Turn Alternation Tests
// ============================================================================

#[test]
fn test_white_moves_first() {
    let game = ChessGame::two_humans();
    assert_eq!(game.current_turn(), Color::White);
    assert_eq!(game.status(), GameStatus::ToMove(Color::White));
    assert_eq!(game.last_move_summary(), "Game started");
}

#[test]
fn test_pawn_double_step_then_cannot_retreat() {
    let mut game = ChessGame::two_humans();

    let record = game
        .try_move(cell("e2"), cell("e4"), Color::White)
        .unwrap();
    assert_eq!(record.piece.kind, PieceKind::Pawn);
    assert_eq!(game.formatted_history(), vec!["1. Pe2-e4"]);
    assert_eq!(game.current_turn(), Color::Black);

    play(&mut game, &[("e7", "e5")]);
    assert_eq!(
        game.try_move(cell("e4"), cell("e3"), Color::White),
        Err(MoveRejection::IllegalTarget {
            from: cell("e4"),
            to: cell("e3")
        })
    );
    assert_eq!(game.current_turn(), Color::White, "rejection keeps the turn");
}

#[test]
fn test_turns_alternate() {
    let mut game = ChessGame::two_humans();
    play(&mut game, &[("d2", "d4"), ("d7", "d5"), ("g1", "f3")]);

    assert_eq!(game.current_turn(), Color::Black);
    assert_eq!(
        game.formatted_history(),
        vec!["1. Pd2-d4", "Pd7-d5", "2. Ng1-f3"]
    );
    assert_eq!(game.pgn_movetext(), "1. Pd2-d4 Pd7-d5 2. Ng1-f3");
    let colors: Vec<Color> = game.history().iter().map(|record| record.color()).collect();
    assert_eq!(colors, vec![Color::White, Color::Black, Color::White]);
}

// ============================================================================
// Rejection Tests
// ============================================================================

#[test]
fn test_rejections() {
    let mut game = ChessGame::two_humans();

    assert_eq!(
        game.try_move(cell("e7"), cell("e5"), Color::Black),
        Err(MoveRejection::WrongTurn {
            requester: Color::Black
        })
    );
    assert_eq!(
        game.try_move(cell("e4"), cell("e5"), Color::White),
        Err(MoveRejection::NoPiece { cell: cell("e4") })
    );
    assert_eq!(
        game.try_move(cell("e7"), cell("e5"), Color::White),
        Err(MoveRejection::NotYourPiece { cell: cell("e7") })
    );
    assert_eq!(
        game.try_move(cell("a1"), cell("a3"), Color::White),
        Err(MoveRejection::IllegalTarget {
            from: cell("a1"),
            to: cell("a3")
        })
    );
    assert!(!game.attempt_move(cell("b1"), cell("b3"), Color::White));
    assert!(game.history().is_empty());
}

#[test]
fn test_rejection_is_idempotent() {
    //! Verifies a rejected move leaves the game exactly as it was
    let mut game = ChessGame::two_humans();
    play(&mut game, &[("e2", "e4"), ("e7", "e5")]);
    let before = game.state();

    for _ in 0..3 {
        assert!(game.try_move(cell("e4"), cell("e5"), Color::White).is_err());
    }
    assert_eq!(game.state(), before);
}

#[test]
fn test_self_check_rejected() {
    //! Verifies a pinned piece can't leave the pin line
    let mut game = custom_game(
        &[
            (PieceKind::King, Color::White, "e1"),
            (PieceKind::Bishop, Color::White, "e2"),
            (PieceKind::Rook, Color::Black, "e8"),
            (PieceKind::King, Color::Black, "a8"),
        ],
        Color::White,
    );

    assert_eq!(
        game.try_move(cell("e2"), cell("d3"), Color::White),
        Err(MoveRejection::SelfCheck {
            from: cell("e2"),
            to: cell("d3")
        })
    );
    assert!(game.legal_targets(cell("e2")).is_empty());
    assert!(game.attempt_move(cell("e1"), cell("d1"), Color::White));
}

#[test]
fn test_king_cannot_step_into_check() {
    let mut game = custom_game(
        &[
            (PieceKind::King, Color::White, "e1"),
            (PieceKind::Rook, Color::Black, "d8"),
            (PieceKind::King, Color::Black, "h8"),
        ],
        Color::White,
    );

    assert!(matches!(
        game.try_move(cell("e1"), cell("d1"), Color::White),
        Err(MoveRejection::SelfCheck { .. })
    ));
    let targets = game.legal_targets(cell("e1"));
    assert!(targets.iter().all(|to| to.col != 'd'));
}

// ============================================================================
// Check and Game Over Tests
// ============================================================================

#[test]
fn test_check_flag_in_notation() {
    let mut game = ChessGame::two_humans();
    play(
        &mut game,
        &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")],
    );

    assert!(game.is_king_in_check(Color::Black));
    assert!(game.history().last_move().unwrap().gives_check);
    assert_eq!(game.formatted_history().last().unwrap(), "2. Qd1-h5+");
    assert_eq!(game.status(), GameStatus::ToMove(Color::Black));
}

#[test]
fn test_fools_mate() {
    let mut game = ChessGame::two_humans();
    play(
        &mut game,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );

    assert_eq!(
        game.status(),
        GameStatus::GameOver(GameOutcome::Checkmate {
            winner: Color::Black
        })
    );
    assert_eq!(game.winner(), Some(Color::Black));
    assert!(game.is_checkmate(Color::White));
    assert_eq!(game.current_turn(), Color::Black, "turn does not flip after mate");
    assert_eq!(game.formatted_history().last().unwrap(), "Qd8-h4+");

    assert_eq!(
        game.try_move(cell("a2"), cell("a3"), Color::White),
        Err(MoveRejection::GameOver)
    );
    assert_eq!(game.history().len(), 4);
}

#[test]
fn test_back_rank_mate() {
    let mut game = custom_game(
        &[
            (PieceKind::King, Color::White, "g1"),
            (PieceKind::Rook, Color::White, "a1"),
            (PieceKind::Pawn, Color::White, "f2"),
            (PieceKind::Pawn, Color::White, "g2"),
            (PieceKind::Pawn, Color::White, "h2"),
            (PieceKind::King, Color::Black, "g8"),
            (PieceKind::Pawn, Color::Black, "f7"),
            (PieceKind::Pawn, Color::Black, "g7"),
            (PieceKind::Pawn, Color::Black, "h7"),
        ],
        Color::White,
    );

    play(&mut game, &[("a1", "a8")]);

    assert_eq!(game.winner(), Some(Color::White));
    assert!(game.is_game_over());
    assert_eq!(game.formatted_history(), vec!["1. Ra1-a8+"]);
}

#[test]
fn test_check_that_can_be_blocked_is_not_mate() {
    let mut game = custom_game(
        &[
            (PieceKind::King, Color::White, "g1"),
            (PieceKind::Rook, Color::White, "a1"),
            (PieceKind::King, Color::Black, "g8"),
            (PieceKind::Pawn, Color::Black, "f7"),
            (PieceKind::Pawn, Color::Black, "g7"),
            (PieceKind::Pawn, Color::Black, "h7"),
            (PieceKind::Bishop, Color::Black, "c6"),
        ],
        Color::White,
    );

    play(&mut game, &[("a1", "a8")]);

    assert!(game.is_king_in_check(Color::Black));
    assert_eq!(game.status(), GameStatus::ToMove(Color::Black));
    assert_eq!(game.potential_captures(cell("c6")), vec![cell("a8")]);

    play(&mut game, &[("c6", "a8")]);
    assert_eq!(game.formatted_history(), vec!["1. Ra1-a8+", "Bc6xa8"]);
    let black = game.player(Color::Black);
    assert_eq!(black.captured().count(PieceKind::Rook), 1);
    assert_eq!(
        game.last_move_summary(),
        "Black bishop from c6 to a8 captures rook"
    );
}

#[test]
fn test_stalemate_ends_game_as_draw() {
    let mut game = custom_game(
        &[
            (PieceKind::King, Color::Black, "a8"),
            (PieceKind::Queen, Color::White, "b5"),
            (PieceKind::King, Color::White, "h1"),
        ],
        Color::White,
    );

    play(&mut game, &[("b5", "b6")]);

    assert_eq!(game.status(), GameStatus::GameOver(GameOutcome::Stalemate));
    assert_eq!(game.winner(), None);
    assert!(!game.is_king_in_check(Color::Black));
    assert!(game.is_stalemate(Color::Black));
}

// ============================================================================
// Custom Position Tests
// ============================================================================

#[test]
fn test_black_to_move_numbering() {
    //! Verifies move numbers follow White's plies when Black moves first
    let mut game = custom_game(
        &[
            (PieceKind::King, Color::White, "e1"),
            (PieceKind::Pawn, Color::White, "h2"),
            (PieceKind::King, Color::Black, "e8"),
            (PieceKind::Pawn, Color::Black, "a7"),
        ],
        Color::Black,
    );

    play(&mut game, &[("a7", "a6"), ("h2", "h3"), ("e8", "d8")]);

    assert_eq!(
        game.formatted_history(),
        vec!["1... Pa7-a6", "2. Ph2-h3", "Ke8-d8"]
    );
    assert_eq!(game.pgn_movetext(), "1... Pa7-a6 2. Ph2-h3 Ke8-d8");
}

#[test]
fn test_position_with_capturable_king_rejected() {
    //! Verifies a position where the mover could take the enemy king is refused
    let mut board = Board::empty(8).unwrap();
    board.place(cell("e1"), PieceKind::King, Color::White).unwrap();
    board.place(cell("e2"), PieceKind::Queen, Color::White).unwrap();
    board.place(cell("e8"), PieceKind::King, Color::Black).unwrap();
    board.place(cell("a7"), PieceKind::Pawn, Color::Black).unwrap();

    assert!(matches!(
        ChessGame::with_board(humans(), board, Color::White),
        Err(GameError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_position_without_king_rejected() {
    let mut board = Board::empty(8).unwrap();
    board.place(cell("e1"), PieceKind::King, Color::White).unwrap();
    board.place(cell("e2"), PieceKind::Queen, Color::White).unwrap();
    board.place(cell("a7"), PieceKind::Pawn, Color::Black).unwrap();

    assert!(matches!(
        ChessGame::with_board(humans(), board, Color::White),
        Err(GameError::InvalidConfiguration { .. })
    ));
}

// ============================================================================
// Capture Tests
// ============================================================================

#[test]
fn test_capture_credited_to_mover() {
    let mut game = ChessGame::two_humans();
    play(&mut game, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);

    let record = game.history().last_move().unwrap();
    assert_eq!(record.captured.map(|p| p.kind), Some(PieceKind::Pawn));
    assert_eq!(game.formatted_history().last().unwrap(), "2. Pe4xd5");

    let white = game.player(Color::White).captured();
    let black = game.player(Color::Black).captured();
    assert_eq!(white.len(), 1);
    assert!(black.is_empty());
    assert_eq!(white.material_advantage(black), 1);
    assert_eq!(game.pieces_for(Color::Black).len(), 15);
}

#[test]
fn test_legal_moves_report_consequences() {
    let mut game = ChessGame::two_humans();
    play(&mut game, &[("e2", "e4"), ("d7", "d5")]);

    let moves = game.legal_moves(Color::White);
    let capture = moves
        .iter()
        .find(|m| m.from == cell("e4") && m.to == cell("d5"))
        .expect("exd5 is legal");
    assert_eq!(capture.captured.map(|p| p.kind), Some(PieceKind::Pawn));
    assert!(!capture.gives_check);

    let check = moves
        .iter()
        .find(|m| m.from == cell("f1") && m.to == cell("b5"))
        .expect("Bb5 is legal");
    assert!(check.gives_check);
}

// ============================================================================
// Promotion Tests
// ============================================================================

fn promotion_game() -> ChessGame {
    custom_game(
        &[
            (PieceKind::Pawn, Color::White, "e7"),
            (PieceKind::Rook, Color::Black, "d8"),
            (PieceKind::King, Color::White, "h1"),
            (PieceKind::King, Color::Black, "a6"),
        ],
        Color::White,
    )
}

#[test]
fn test_promotion_defaults_to_queen() {
    let mut game = promotion_game();
    let record = game
        .try_move(cell("e7"), cell("e8"), Color::White)
        .unwrap();

    assert_eq!(record.promotion, Some(PieceKind::Queen));
    let promoted = game.board().piece_at(cell("e8")).unwrap();
    assert_eq!(promoted.kind, PieceKind::Queen);
    assert_eq!(promoted.color, Color::White);
    assert!(promoted.promoted_from_pawn);
    assert_eq!(game.formatted_history(), vec!["1. Pe7-e8=Q"]);
}

#[test]
fn test_promotion_with_capture_and_explicit_choice() {
    let mut game = promotion_game();
    let record = game
        .try_move_with_promotion(cell("e7"), cell("d8"), Color::White, PieceKind::Knight)
        .unwrap();

    assert_eq!(record.promotion, Some(PieceKind::Knight));
    assert_eq!(record.captured.map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(
        game.last_move_summary(),
        "White pawn from e7 to d8 captures rook and promotes to knight"
    );
}

#[test]
fn test_promotion_uses_chooser() {
    let mut game = promotion_game();
    game.set_promotion_chooser(FixedPromotion(PieceKind::Rook));

    let record = game
        .try_move(cell("e7"), cell("e8"), Color::White)
        .unwrap();
    assert_eq!(record.promotion, Some(PieceKind::Rook));
}

#[test]
fn test_promotion_invalid_choice_falls_back() {
    let mut game = promotion_game();
    game.set_promotion_chooser(|_: Color, _: Cell| Some(PieceKind::King));

    let record = game
        .try_move_with_promotion(cell("e7"), cell("e8"), Color::White, PieceKind::Pawn)
        .unwrap();
    assert_eq!(record.promotion, Some(PieceKind::Queen));
}

#[test]
fn test_black_promotes_by_capture_on_row_one() {
    let mut game = custom_game(
        &[
            (PieceKind::Pawn, Color::Black, "d2"),
            (PieceKind::Rook, Color::White, "e1"),
            (PieceKind::King, Color::White, "h8"),
            (PieceKind::King, Color::Black, "a3"),
        ],
        Color::Black,
    );

    let record = game
        .try_move(cell("d2"), cell("e1"), Color::Black)
        .unwrap();

    assert_eq!(record.promotion, Some(PieceKind::Queen));
    assert_eq!(record.captured.map(|p| p.kind), Some(PieceKind::Rook));
    let promoted = game.board().piece_at(cell("e1")).unwrap();
    assert_eq!(promoted.kind, PieceKind::Queen);
    assert_eq!(promoted.color, Color::Black);
    assert!(promoted.promoted_from_pawn);
    assert_eq!(game.player(Color::Black).captured().count(PieceKind::Rook), 1);
    assert_eq!(game.formatted_history(), vec!["1... Pd2xe1=Q"]);
    assert_eq!(
        game.last_move_summary(),
        "Black pawn from d2 to e1 captures rook and promotes to queen"
    );
    assert_eq!(game.current_turn(), Color::White);
}

#[test]
fn test_promotion_choice_ignored_for_normal_moves() {
    let mut game = ChessGame::two_humans();
    let record = game
        .try_move_with_promotion(cell("e2"), cell("e4"), Color::White, PieceKind::Rook)
        .unwrap();
    assert_eq!(record.promotion, None);
}

// ============================================================================
// Listener Tests
// ============================================================================

#[test]
fn test_listeners_receive_final_records() {
    let events: Arc<Mutex<Vec<MoveEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let mut game = ChessGame::two_humans();
    let sink = Arc::clone(&events);
    let id = game.subscribe_on_move(move |event| sink.lock().unwrap().push(*event));

    play(
        &mut game,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );

    {
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].ply, 1);
        let last = events.last().unwrap();
        assert!(last.record.gives_check);
        assert_eq!(last.status, game.status());
        assert!(last.status.is_game_over());
    }

    assert!(game.unsubscribe(id));
    assert!(!game.unsubscribe(id));
}

#[test]
fn test_rejected_moves_not_broadcast() {
    let count = Arc::new(Mutex::new(0usize));
    let mut game = ChessGame::two_humans();
    let counter = Arc::clone(&count);
    game.subscribe_on_move(move |_| *counter.lock().unwrap() += 1);

    assert!(!game.attempt_move(cell("e2"), cell("e5"), Color::White));
    assert_eq!(*count.lock().unwrap(), 0);
}
