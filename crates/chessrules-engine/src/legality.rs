//! Legal move filtering.
//!
//! A pseudo-legal move is legal if, once played on a copy of the board, the
//! mover's king is not attacked. The board passed in is only ever borrowed,
//! so it is unchanged whatever the outcome.

use crate::apply::apply;
use crate::attacks::is_in_check;
use crate::castling::castling_moves;
use crate::movegen::pseudo_moves;
use crate::{Board, SquareSet};
use chessrules_core::{Move, Piece, PieceKind, Side, Square};

/// Returns the legal moves of `piece`, castling excluded.
pub fn legal_moves(board: &Board, piece: &Piece) -> Vec<Move> {
    pseudo_moves(board, piece)
        .into_iter()
        .filter(|mv| is_legal(board, piece.side, *mv))
        .collect()
}

/// Returns every legal move of `side`, castling included.
pub fn all_legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves: Vec<Move> = board
        .pieces_of(side)
        .flat_map(|piece| legal_moves(board, &piece))
        .collect();
    moves.extend(castling_moves(board, side));
    moves
}

/// Returns the legal moves of the piece on `sq`, castling included for a king.
///
/// Empty if the square is empty.
pub fn moves_from(board: &Board, sq: Square) -> Vec<Move> {
    let Some(piece) = board.piece_at(sq) else {
        return Vec::new();
    };
    let mut moves = legal_moves(board, &piece);
    if piece.kind == PieceKind::King {
        moves.extend(castling_moves(board, piece.side));
    }
    moves
}

/// Returns the legal destinations of the piece on `sq`.
pub fn legal_destinations(board: &Board, sq: Square) -> SquareSet {
    moves_from(board, sq).into_iter().map(|m| m.to()).collect()
}

/// Returns true if `side` has at least one legal move.
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    board
        .pieces_of(side)
        .any(|piece| !legal_moves(board, &piece).is_empty())
        || !castling_moves(board, side).is_empty()
}

/// Plays `mv` on a trial copy and checks the mover's king.
fn is_legal(board: &Board, side: Side, mv: Move) -> bool {
    // Only reachable when the opponent was left in check; never legal.
    if mv.captured_piece().is_some_and(|p| p.kind == PieceKind::King) {
        return false;
    }
    let mut trial = board.clone();
    apply(&mut trial, mv);
    !is_in_check(&trial, side)
}
