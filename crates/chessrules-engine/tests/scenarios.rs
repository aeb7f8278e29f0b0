//! Full-game scenarios driven through the public selection interface.

use chessrules_engine::castling::castling_moves;
use chessrules_engine::{
    BoardBuilder, Game, GameError, GameResult, GameState, Move, MoveEvent, MoveOutcome, PieceKind,
    Side, Square,
};

fn sq(name: &str) -> Square {
    Square::from_name(name).unwrap()
}

/// Plays `from`-`to` for the side whose turn it is and returns the event.
fn play(game: &mut Game, from: &str, to: &str) -> MoveEvent {
    let side = game.turn().expect("game should accept moves");
    game.select(sq(from), side).unwrap();
    match game.move_to(sq(to)).unwrap() {
        MoveOutcome::Completed(event) => event,
        other => panic!("{}-{} did not complete: {:?}", from, to, other),
    }
}

fn play_all(game: &mut Game, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        play(game, from, to);
    }
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play_all(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
    let mate = play(&mut game, "d8", "h4");

    assert_eq!(mate.kind, PieceKind::Queen);
    assert!(mate.gave_check);
    assert!(game.is_in_check(Side::White));
    assert_eq!(
        game.state(),
        GameState::Over(GameResult::Checkmate {
            winner: Side::Black
        })
    );
    assert_eq!(game.history().len(), 4);
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
        ],
    );
    let mate = play(&mut game, "h5", "f7");
    assert!(mate.was_capture);
    assert_eq!(mate.captured, Some(PieceKind::Pawn));
    assert_eq!(
        game.result(),
        Some(GameResult::Checkmate {
            winner: Side::White
        })
    );
}

#[test]
fn check_that_can_be_answered_is_not_mate() {
    let mut game = Game::new();
    play_all(&mut game, &[("e2", "e4"), ("f7", "f6")]);
    let check = play(&mut game, "d1", "h5");
    assert!(check.gave_check);
    assert!(game.is_in_check(Side::Black));
    assert!(game.result().is_none());
    assert_eq!(game.turn(), Some(Side::Black));

    let block = play(&mut game, "g7", "g6");
    assert!(!block.gave_check);
    assert!(!game.is_in_check(Side::Black));
}

#[test]
fn en_passant_capture() {
    let mut game = Game::new();
    play_all(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5")]);
    let push = play(&mut game, "d7", "d5");
    assert_eq!(game.board().en_passant_target(Side::Black), Some(sq("d6")));
    assert!(!push.was_en_passant);

    game.select(sq("e5"), Side::White).unwrap();
    assert!(game.selected_destinations().contains(sq("d6")));
    let capture = match game.move_to(sq("d6")).unwrap() {
        MoveOutcome::Completed(event) => event,
        other => panic!("unexpected outcome {:?}", other),
    };

    assert!(capture.was_en_passant);
    assert!(capture.was_capture);
    assert_eq!(capture.captured, Some(PieceKind::Pawn));
    assert_eq!(game.board().piece_at(sq("d5")), None);
    assert_eq!(game.board().piece_at(sq("d6")).unwrap().side, Side::White);
    assert_eq!(game.captured(Side::Black).len(), 1);
}

#[test]
fn en_passant_window_closes() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    // White declines the capture; the chance is gone next turn.
    play_all(&mut game, &[("g1", "f3"), ("a6", "a5")]);
    assert_eq!(game.board().en_passant_target(Side::Black), None);

    game.select(sq("e5"), Side::White).unwrap();
    assert!(!game.selected_destinations().contains(sq("d6")));
    assert_eq!(
        game.move_to(sq("d6")),
        Err(GameError::IllegalDestination(sq("d6")))
    );
}

#[test]
fn kingside_castling() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
        ],
    );

    let expected = Move::Castle {
        king_from: Square::new(4, 0).unwrap(),
        king_to: Square::new(6, 0).unwrap(),
        rook_from: Square::new(7, 0).unwrap(),
        rook_to: Square::new(5, 0).unwrap(),
    };
    assert_eq!(castling_moves(game.board(), Side::White), vec![expected]);
    assert_eq!(game.castling_options(), vec![expected]);

    let castle = play(&mut game, "e1", "g1");
    assert!(castle.was_castle);
    assert_eq!(castle.kind, PieceKind::King);

    let king = game.board().piece_at(sq("g1")).unwrap();
    let rook = game.board().piece_at(sq("f1")).unwrap();
    assert_eq!((king.kind, rook.kind), (PieceKind::King, PieceKind::Rook));
    assert!(king.moved && rook.moved);
    assert!(castling_moves(game.board(), Side::White).is_empty());
}

#[test]
fn castling_lost_after_king_returns() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("g8", "f6"),
            ("f1", "e2"),
            ("f8", "e7"),
            ("e1", "f1"),
            ("e8", "f8"),
            ("f1", "e1"),
            ("f8", "e8"),
        ],
    );
    assert!(castling_moves(game.board(), Side::White).is_empty());
    assert!(castling_moves(game.board(), Side::Black).is_empty());
}

#[test]
fn promotion_with_capture() {
    let board = BoardBuilder::new()
        .piece(PieceKind::King, Side::White, sq("e1"))
        .piece(PieceKind::King, Side::Black, sq("e8"))
        .piece(PieceKind::Pawn, Side::Black, sq("b2"))
        .piece(PieceKind::Rook, Side::White, sq("a1"))
        .side_to_move(Side::Black)
        .build()
        .unwrap();
    let mut game = Game::from_board(board);

    game.select(sq("b2"), Side::Black).unwrap();
    assert_eq!(
        game.move_to(sq("a1")).unwrap(),
        MoveOutcome::PromotionPending(sq("a1"))
    );
    assert_eq!(game.move_to(sq("a2")), Err(GameError::PromotionPending));

    let event = game.promote(PieceKind::Queen).unwrap();
    assert!(event.was_promotion && event.was_capture);
    assert_eq!(event.captured, Some(PieceKind::Rook));
    assert_eq!(event.promoted_to, Some(PieceKind::Queen));
    assert!(event.gave_check);
    assert_eq!(game.captured(Side::White)[0].kind, PieceKind::Rook);
    assert_eq!(game.turn(), Some(Side::White));
}

#[test]
fn back_rank_mate() {
    let board = BoardBuilder::new()
        .piece(PieceKind::King, Side::Black, sq("g8"))
        .piece(PieceKind::Pawn, Side::Black, sq("f7"))
        .piece(PieceKind::Pawn, Side::Black, sq("g7"))
        .piece(PieceKind::Pawn, Side::Black, sq("h7"))
        .piece(PieceKind::Rook, Side::White, sq("a1"))
        .piece(PieceKind::King, Side::White, sq("g1"))
        .build()
        .unwrap();
    let mut game = Game::from_board(board);
    let mate = play(&mut game, "a1", "a8");
    assert!(mate.gave_check);
    assert_eq!(
        game.result(),
        Some(GameResult::Checkmate {
            winner: Side::White
        })
    );
}

#[test]
fn forfeit_ends_game() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    assert_eq!(
        game.forfeit(Side::Black).unwrap().winner(),
        Some(Side::White)
    );
    assert_eq!(game.click(sq("e7")), Err(GameError::GameOver));
}
