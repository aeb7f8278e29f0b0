//! Attack queries: is a square attacked, is a king in check.

use crate::movegen::attacked_squares;
use crate::{Board, SquareSet};
use chessrules_core::{Side, Square};

/// Returns true if any piece of `by_side` attacks `sq`.
///
/// Check-safety of the attacker is ignored: a pinned piece still attacks.
pub fn is_attacked(board: &Board, sq: Square, by_side: Side) -> bool {
    board
        .pieces_of(by_side)
        .any(|piece| attacked_squares(board, &piece).contains(sq))
}

/// Returns every square attacked by `by_side`.
pub fn attacked_by(board: &Board, by_side: Side) -> SquareSet {
    board
        .pieces_of(by_side)
        .fold(SquareSet::EMPTY, |acc, piece| {
            acc | attacked_squares(board, &piece)
        })
}

/// Returns true if the king of `side` is attacked.
pub fn is_in_check(board: &Board, side: Side) -> bool {
    match board.king_square(side) {
        Some(king) => is_attacked(board, king, side.opposite()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardBuilder;
    use chessrules_core::PieceKind;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn startpos_attacks() {
        let board = Board::standard();
        assert!(is_attacked(&board, sq(4, 2), Side::White));
        assert!(!is_attacked(&board, sq(4, 3), Side::White));
        assert!(is_attacked(&board, sq(5, 5), Side::Black));
        assert!(!is_in_check(&board, Side::White));
        assert!(!is_in_check(&board, Side::Black));
        // Pawns cover the whole third rank; knights add nothing new.
        assert_eq!(attacked_by(&board, Side::White).len(), 8);
    }

    #[test]
    fn slider_check_through_empty_squares() {
        let board = BoardBuilder::new()
            .piece(PieceKind::King, Side::White, sq(4, 0))
            .piece(PieceKind::King, Side::Black, sq(0, 7))
            .piece(PieceKind::Rook, Side::Black, sq(4, 6))
            .build()
            .unwrap();
        assert!(is_in_check(&board, Side::White));
        assert!(!is_in_check(&board, Side::Black));
    }

    #[test]
    fn blocked_slider_does_not_check() {
        let board = BoardBuilder::new()
            .piece(PieceKind::King, Side::White, sq(4, 0))
            .piece(PieceKind::Knight, Side::White, sq(4, 3))
            .piece(PieceKind::King, Side::Black, sq(0, 7))
            .piece(PieceKind::Rook, Side::Black, sq(4, 6))
            .build()
            .unwrap();
        assert!(!is_in_check(&board, Side::White));
        assert!(is_attacked(&board, sq(4, 3), Side::Black));
        assert!(!is_attacked(&board, sq(4, 2), Side::Black));
    }

    #[test]
    fn pawn_attacks_diagonally_not_forward() {
        let board = BoardBuilder::new()
            .piece(PieceKind::King, Side::White, sq(0, 0))
            .piece(PieceKind::King, Side::Black, sq(7, 7))
            .piece(PieceKind::Pawn, Side::Black, sq(3, 4))
            .build()
            .unwrap();
        assert!(is_attacked(&board, sq(2, 3), Side::Black));
        assert!(is_attacked(&board, sq(4, 3), Side::Black));
        assert!(!is_attacked(&board, sq(3, 3), Side::Black));
    }

    #[test]
    fn pinned_piece_still_gives_check() {
        // The black knight is pinned to its king by the white rook, but it
        // still attacks the white king.
        let board = BoardBuilder::new()
            .piece(PieceKind::King, Side::White, sq(2, 1))
            .piece(PieceKind::Rook, Side::White, sq(3, 0))
            .piece(PieceKind::King, Side::Black, sq(3, 7))
            .piece(PieceKind::Knight, Side::Black, sq(3, 3))
            .build()
            .unwrap();
        assert!(is_in_check(&board, Side::White));
    }
}
