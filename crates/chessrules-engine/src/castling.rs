//! Castling availability.

use crate::attacks::{is_attacked, is_in_check};
use crate::Board;
use chessrules_core::{Move, Piece, PieceKind, Side, Square};
use tracing::trace;

/// Returns the castling moves currently open to `side`.
///
/// Castling needs an unmoved king that is not in check and an unmoved rook on
/// the king's rank at least three files away. Every square strictly between
/// them must be empty, and the two squares the king steps through must not be
/// attacked. The king moves two squares toward the rook, and the rook lands
/// on the square the king passed over.
pub fn castling_moves(board: &Board, side: Side) -> Vec<Move> {
    let Some(king) = board
        .pieces_of(side)
        .find(|p| p.kind == PieceKind::King)
    else {
        return Vec::new();
    };
    if king.moved || is_in_check(board, side) {
        return Vec::new();
    }

    board
        .pieces_of(side)
        .filter(|p| p.kind == PieceKind::Rook && !p.moved)
        .filter(|rook| rook.square.rank() == king.square.rank())
        .filter_map(|rook| castle_with(board, &king, &rook))
        .collect()
}

fn castle_with(board: &Board, king: &Piece, rook: &Piece) -> Option<Move> {
    let king_file = i8::try_from(king.square.file()).ok()?;
    let rook_file = i8::try_from(rook.square.file()).ok()?;
    let distance = rook_file - king_file;
    if distance.abs() < 3 {
        return None;
    }
    let dir = distance.signum();

    let occupied = board.occupied_squares();
    let mut between = king.square.offset(dir, 0)?;
    while between != rook.square {
        if occupied.contains(between) {
            trace!(king = %king.square, rook = %rook.square, blocker = %between, "castling path blocked");
            return None;
        }
        between = between.offset(dir, 0)?;
    }

    let transit = king.square.offset(dir, 0)?;
    let king_to = king.square.offset(2 * dir, 0)?;
    let enemy = king.side.opposite();
    if is_attacked(board, transit, enemy) || is_attacked(board, king_to, enemy) {
        trace!(king = %king.square, rook = %rook.square, "castling through attacked square");
        return None;
    }

    Some(Move::Castle {
        king_from: king.square,
        king_to,
        rook_from: rook.square,
        rook_to: transit,
    })
}

/// Returns true if `side` may castle toward the rook on `rook_square`.
pub fn can_castle_with(board: &Board, side: Side, rook_square: Square) -> bool {
    castling_moves(board, side)
        .iter()
        .any(|m| matches!(m, Move::Castle { rook_from, .. } if *rook_from == rook_square))
}
